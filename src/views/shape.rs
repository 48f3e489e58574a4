use crate::color::Color;
use crate::context::Context;
use crate::geometry::Size;
use crate::view::View;
use crate::widget::{ShapePath, ShapeView, WidgetKind, WidgetRef};
use cgmath::Point2;

/// A vector shape filling its proposed size. Style it with `fill`, `stroke` and `line_width`.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub outline: ShapePath,
}

impl Shape {
    pub fn rect() -> Shape {
        Shape {
            outline: ShapePath::Rect,
        }
    }

    pub fn rounded_rect(radius: f64) -> Shape {
        Shape {
            outline: ShapePath::RoundedRect(radius),
        }
    }

    pub fn ellipse() -> Shape {
        Shape {
            outline: ShapePath::Ellipse,
        }
    }

    /// A polygon with vertices in unit coordinates.
    pub fn polygon(points: Vec<Point2<f64>>) -> Shape {
        Shape {
            outline: ShapePath::Polygon(points),
        }
    }
}

impl View for Shape {
    fn name(&self) -> &'static str {
        "Shape"
    }

    fn create(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        let widget = cx.obtain(&self.path(path), || {
            WidgetKind::Shape(ShapeView::new(ShapePath::Rect))
        });
        if let WidgetKind::Shape(shape) = &mut widget.borrow_mut().kind {
            *shape = ShapeView::new(self.outline.clone());
        }
        Some(widget)
    }

    fn measure(&self, path: &str, proposed: Size, cx: &mut Context) -> Option<WidgetRef> {
        let widget = cx.query(&self.path(path))?;
        widget.borrow_mut().reset_frame(proposed);
        Some(widget)
    }
}

/// A solid color filling its proposed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorFill(pub Color);

impl View for ColorFill {
    fn name(&self) -> &'static str {
        "Color"
    }

    fn create(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        let widget = cx.obtain(&self.path(path), || WidgetKind::Container);
        {
            let mut widget = widget.borrow_mut();
            widget.remove_all_subviews();
            widget.background = self.0;
        }
        Some(widget)
    }

    fn measure(&self, path: &str, proposed: Size, cx: &mut Context) -> Option<WidgetRef> {
        let widget = cx.query(&self.path(path))?;
        widget.borrow_mut().reset_frame(proposed);
        Some(widget)
    }
}
