use super::{create_wrapper, finalize_wrapper, Modifier};
use crate::context::Context;
use crate::geometry::{EdgeInsets, Size};
use crate::layout::{Flex, Flexibility};
use crate::view::{join, View};
use crate::widget::WidgetRef;
use cgmath::{Point2, Vector2, Zero};

const SEGMENT: &str = "Padding";

/// Default padding on each edge.
pub const DEFAULT_PADDING: f64 = 16.;

/// Insets the content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding(pub EdgeInsets);

impl Modifier for Padding {
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
        let insets = self.0;

        let inner = Vector2::new(
            (proposed.x - insets.horizontal()).max(0.),
            (proposed.y - insets.vertical()).max(0.),
        );
        let child_size = match content.measure(&own, inner, cx) {
            Some(child) => {
                let mut child = child.borrow_mut();
                child.frame.origin = Point2::new(insets.leading, insets.top);
                child.frame.size
            }
            None => Vector2::zero(),
        };

        widget.borrow_mut().reset_frame(Vector2::new(
            child_size.x + insets.horizontal(),
            child_size.y + insets.vertical(),
        ));
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
