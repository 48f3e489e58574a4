use super::{create_wrapper, finalize_wrapper, Modifier};
use crate::context::Context;
use crate::geometry::Size;
use crate::layout::{Alignment, Flex, Flexibility};
use crate::view::{join, View};
use crate::widget::WidgetRef;
use cgmath::Vector2;

const SEGMENT: &str = "Frame";

/// Size constraints, with the content aligned inside the resulting frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub width: Option<f64>,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub height: Option<f64>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
    pub alignment: Alignment,
}

impl Frame {
    /// A frame fixing either dimension.
    pub fn fixed(width: Option<f64>, height: Option<f64>) -> Frame {
        Frame {
            width,
            height,
            ..Frame::default()
        }
    }

    /// A frame bounding both dimensions.
    pub fn bounded(
        min_width: Option<f64>,
        max_width: Option<f64>,
        min_height: Option<f64>,
        max_height: Option<f64>,
    ) -> Frame {
        Frame {
            min_width,
            max_width,
            min_height,
            max_height,
            ..Frame::default()
        }
    }

    pub fn aligned(self, alignment: Alignment) -> Frame {
        Frame { alignment, ..self }
    }
}

/// Clamps one proposed dimension.
fn constrain(proposed: f64, fixed: Option<f64>, min: Option<f64>, max: Option<f64>) -> f64 {
    if let Some(fixed) = fixed {
        return fixed;
    }
    let mut value = proposed;
    if let Some(min) = min {
        value = value.max(min);
    }
    if let Some(max) = max {
        value = value.min(max);
    }
    value
}

/// Resolves one dimension once the content has been measured.
fn resolve(
    constrained: f64,
    child: f64,
    fixed: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
) -> f64 {
    if fixed.is_some() || max.is_some() {
        constrained
    } else {
        min.map_or(child, |min| child.max(min))
    }
}

impl Modifier for Frame {
    fn wrapper(&self) -> Option<&'static str> {
        Some(SEGMENT)
    }

    fn flexibility(&self, _content: &dyn View) -> Flexibility {
        Flexibility::new(
            if self.width.is_some() { Flex::Low } else { Flex::High },
            if self.height.is_some() { Flex::Low } else { Flex::High },
        )
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

        let constrained = Vector2::new(
            constrain(proposed.x, self.width, self.min_width, self.max_width),
            constrain(proposed.y, self.height, self.min_height, self.max_height),
        );

        let child = match content.measure(&own, constrained, cx) {
            Some(child) => child,
            None => {
                widget.borrow_mut().reset_frame(constrained);
                return Some(widget);
            }
        };

        let mut child = child.borrow_mut();
        let size = Vector2::new(
            resolve(constrained.x, child.frame.size.x, self.width, self.min_width, self.max_width),
            resolve(
                constrained.y,
                child.frame.size.y,
                self.height,
                self.min_height,
                self.max_height,
            ),
        );
        widget.borrow_mut().reset_frame(size);
        child.frame.origin = self.alignment.origin(size, child.frame.size);

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constrain_prefers_fixed() {
        assert_eq!(constrain(300., Some(100.), Some(200.), None), 100.);
        assert_eq!(constrain(300., None, None, Some(50.)), 50.);
        // max wins over min
        assert_eq!(constrain(10., None, Some(40.), Some(20.)), 20.);
    }

    #[test]
    fn test_resolve_broadens_to_min() {
        assert_eq!(resolve(300., 20., None, Some(40.), None), 40.);
        assert_eq!(resolve(300., 80., None, Some(40.), None), 80.);
        assert_eq!(resolve(300., 20., None, None, Some(1000.)), 300.);
    }
}
