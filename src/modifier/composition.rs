use super::Modifier;
use crate::context::Context;
use crate::geometry::Size;
use crate::layout::Alignment;
use crate::view::{join, AnyView, View};
use crate::widget::{WidgetKind, WidgetRef};
use cgmath::{Vector2, Zero};
use std::rc::Rc;

/// Whether the secondary content goes below or above the primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layering {
    Background,
    Overlay,
}

/// Secondary content sized to the primary content and aligned within it.
///
/// The secondary view is created under its own segment so it never shares a path with the
/// primary content.
#[derive(Debug)]
pub struct Composite {
    pub layering: Layering,
    pub secondary: AnyView,
    pub alignment: Alignment,
}

impl Composite {
    fn segment(&self) -> &'static str {
        match self.layering {
            Layering::Background => "Background",
            Layering::Overlay => "Overlay",
        }
    }
}

const SECONDARY: &str = "secondary";

impl Modifier for Composite {
    fn wrapper(&self) -> Option<&'static str> {
        Some(self.segment())
    }

    fn create(&self, content: &dyn View, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        let own = join(path, self.segment());
        let widget = cx.obtain(&own, || WidgetKind::Container);
        widget.borrow_mut().remove_all_subviews();

        let primary = content.create(&own, cx);
        let secondary = self.secondary.create(&join(&own, SECONDARY), cx);
        let ordered = match self.layering {
            Layering::Background => [secondary, primary],
            Layering::Overlay => [primary, secondary],
        };

        for subview in ordered.iter().flatten() {
            widget.borrow_mut().add_subview(Rc::clone(subview));
        }
        Some(widget)
    }

    fn measure(
        &self,
        content: &dyn View,
        path: &str,
        proposed: Size,
        cx: &mut Context,
    ) -> Option<WidgetRef> {
        let own = join(path, self.segment());
        let widget = cx.query(&own)?;

        let size = match content.measure(&own, proposed, cx) {
            Some(primary) => primary.borrow().frame.size,
            None => Vector2::zero(),
        };
        widget.borrow_mut().reset_frame(size);

        if let Some(secondary) = self.secondary.measure(&join(&own, SECONDARY), size, cx) {
            let mut secondary = secondary.borrow_mut();
            let origin = self.alignment.origin(size, secondary.frame.size);
            secondary.frame.origin = origin;
        }
        Some(widget)
    }

    fn finalize_transform(
        &self,
        content: &dyn View,
        path: &str,
        cx: &mut Context,
    ) -> Option<WidgetRef> {
        let own = join(path, self.segment());
        content.finalize_transform(&own, cx);
        self.secondary.finalize_transform(&join(&own, SECONDARY), cx);
        cx.query(&own)
    }
}
