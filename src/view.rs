//! The descriptor capability.

use crate::context::Context;
use crate::geometry::Size;
use crate::layout::Flexibility;
use crate::widget::WidgetRef;
use core::fmt;

/// A type-erased descriptor.
pub type AnyView = Box<dyn View>;

/// How a descriptor participates in linear layout beyond its flexibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Regular,
    /// Collapses to a hairline along a stack's main axis and stretches across it.
    Divider,
}

/// Joins a structural path and a segment.
pub fn join<S: fmt::Display>(path: &str, segment: S) -> String {
    format!("{}/{}", path, segment)
}

/// Views describe one node of UI: a leaf, a container or a decorator around another view.
///
/// Views are cheap values rebuilt on every render. The widgets they bind to live in the
/// [`Context`]'s identity cache and are keyed by structural path: every operation receives the
/// path of the node's parent and derives its own key from it (see [`View::path`]). Containers
/// hand each child `own_path/index`.
///
/// Only `name` and `measure` are required; the other operations default to looking the widget up
/// at this view's path.
pub trait View: fmt::Debug {
    /// Path segment for this view.
    fn name(&self) -> &'static str;

    /// How eagerly this view claims space along each axis.
    fn flexibility(&self) -> Flexibility {
        Flexibility::default()
    }

    /// Tie-breaker among `High`-flexibility siblings; higher goes first.
    fn priority(&self) -> f64 {
        0.
    }

    fn role(&self) -> Role {
        Role::Regular
    }

    /// The key of this view's own widget.
    fn path(&self, path: &str) -> String {
        join(path, self.name())
    }

    /// Creates or reuses this node's widget, configures it, and recurses into children.
    fn create(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        self.lookup(path, cx)
    }

    /// Resolves the widget's size within `proposed` and resets its origin to zero.
    ///
    /// Returns `None` if the node has no widget.
    fn measure(&self, path: &str, proposed: Size, cx: &mut Context) -> Option<WidgetRef>;

    /// Applies size-independent transforms once every node has been measured.
    fn finalize_transform(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        self.lookup(path, cx)
    }

    /// Returns the already-created widget for this node.
    fn lookup(&self, path: &str, cx: &Context) -> Option<WidgetRef> {
        cx.query(&self.path(path))
    }
}

impl View for AnyView {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn flexibility(&self) -> Flexibility {
        (**self).flexibility()
    }

    fn priority(&self) -> f64 {
        (**self).priority()
    }

    fn role(&self) -> Role {
        (**self).role()
    }

    fn path(&self, path: &str) -> String {
        (**self).path(path)
    }

    fn create(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        (**self).create(path, cx)
    }

    fn measure(&self, path: &str, proposed: Size, cx: &mut Context) -> Option<WidgetRef> {
        (**self).measure(path, proposed, cx)
    }

    fn finalize_transform(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        (**self).finalize_transform(path, cx)
    }

    fn lookup(&self, path: &str, cx: &Context) -> Option<WidgetRef> {
        (**self).lookup(path, cx)
    }
}

/// Builds a `Vec<AnyView>` from a list of views.
#[macro_export]
macro_rules! views {
    ($($view:expr),* $(,)?) => {
        vec![$($crate::ViewExt::into_any($view)),*]
    };
}
