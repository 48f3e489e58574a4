use super::Modifier;
use crate::context::Context;
use crate::geometry::Size;
use crate::layout::{Flex, Flexibility};
use crate::view::View;
use crate::widget::WidgetRef;

/// Forces a width/height ratio on the measured content.
///
/// Ratios of at least 1 derive the height from the width; smaller positive ratios derive the
/// width from the height. Other values leave the size alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio(pub f64);

impl Modifier for AspectRatio {
    fn flexibility(&self, _content: &dyn View) -> Flexibility {
        if self.0 >= 1. {
            Flexibility::new(Flex::High, Flex::Low)
        } else if self.0 > 0. {
            Flexibility::new(Flex::Low, Flex::High)
        } else {
            Flexibility::new(Flex::High, Flex::High)
        }
    }

    fn measure(
        &self,
        content: &dyn View,
        path: &str,
        proposed: Size,
        cx: &mut Context,
    ) -> Option<WidgetRef> {
        let widget = content.measure(path, proposed, cx)?;
        {
            let mut widget = widget.borrow_mut();
            let ratio = self.0;
            if ratio >= 1. {
                widget.frame.size.y = widget.frame.size.x / ratio;
            } else if ratio > 0. {
                widget.frame.size.x = widget.frame.size.y * ratio;
            }
        }
        Some(widget)
    }
}
