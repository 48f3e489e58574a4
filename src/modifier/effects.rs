//! Layout-signal overrides and size-independent transforms.

use super::Modifier;
use crate::context::Context;
use crate::geometry::{self, Size, Transform, DEGREES_TO_RADIANS};
use crate::view::View;
use crate::widget::WidgetRef;

/// Proposes an unbounded size on the chosen axes so the content reports its natural size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSize {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Modifier for FixedSize {
    fn measure(
        &self,
        content: &dyn View,
        path: &str,
        mut proposed: Size,
        cx: &mut Context,
    ) -> Option<WidgetRef> {
        if self.horizontal {
            proposed.x = f64::INFINITY;
        }
        if self.vertical {
            proposed.y = f64::INFINITY;
        }
        content.measure(path, proposed, cx)
    }
}

/// Overrides the priority stacks use to order `High`-flexibility children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPriority(pub f64);

impl Modifier for LayoutPriority {
    fn priority(&self, _content: &dyn View) -> f64 {
        self.0
    }
}

/// Composes a transform onto the content's widget after layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformEffect(pub Transform);

impl TransformEffect {
    pub fn offset(x: f64, y: f64) -> TransformEffect {
        TransformEffect(geometry::translation(x, y))
    }

    /// A rotation by `degrees`.
    pub fn rotation(degrees: f64) -> TransformEffect {
        TransformEffect(geometry::rotation(degrees * DEGREES_TO_RADIANS))
    }

    pub fn scale(x: f64, y: f64) -> TransformEffect {
        TransformEffect(geometry::scale(x, y))
    }
}

impl Modifier for TransformEffect {
    fn finalize_transform(
        &self,
        content: &dyn View,
        path: &str,
        cx: &mut Context,
    ) -> Option<WidgetRef> {
        let widget = content.finalize_transform(path, cx)?;
        {
            let mut widget = widget.borrow_mut();
            widget.transform = geometry::concat(widget.transform, self.0);
        }
        Some(widget)
    }
}
