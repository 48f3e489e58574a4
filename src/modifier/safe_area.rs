use super::{create_wrapper, finalize_wrapper, Modifier};
use crate::context::Context;
use crate::geometry::{Edges, Size};
use crate::layout::{Flex, Flexibility};
use crate::view::{join, View};
use crate::widget::WidgetRef;
use cgmath::Vector2;

const SEGMENT: &str = "IgnoresSafeArea";

/// Extends the content under the host's safe-area insets on the given edges.
///
/// The wrapper itself keeps the proposed size; the content gets the proposal grown by the insets,
/// is centered in it, and is then shifted up and left by the top and leading insets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IgnoresSafeArea(pub Edges);

impl Modifier for IgnoresSafeArea {
    fn wrapper(&self) -> Option<&'static str> {
        Some(SEGMENT)
    }

    fn flexibility(&self, _content: &dyn View) -> Flexibility {
        Flexibility::new(Flex::Low, Flex::Low)
    }

    fn create(&self, content: &dyn View, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        create_wrapper(SEGMENT, content, path, cx)
    }

    fn measure(
        &self,
        content: &dyn View,
        path: &str,
        proposed: Size,
        cx: &mut Context,
    ) -> Option<WidgetRef> {
        let own = join(path, SEGMENT);
        let widget = cx.query(&own)?;
        widget.borrow_mut().reset_frame(proposed);

        let insets = self.0.select(cx.safe_area_insets());
        let grown = Vector2::new(proposed.x + insets.horizontal(), proposed.y + insets.vertical());

        if let Some(child) = content.measure(&own, grown, cx) {
            let mut child = child.borrow_mut();
            let size = child.frame.size;
            child.frame.origin.x += (grown.x - size.x) / 2. - insets.leading;
            child.frame.origin.y += (grown.y - size.y) / 2. - insets.top;
        }
        Some(widget)
    }

    fn finalize_transform(
        &self,
        content: &dyn View,
        path: &str,
        cx: &mut Context,
    ) -> Option<WidgetRef> {
        finalize_wrapper(SEGMENT, content, path, cx)
    }
}
