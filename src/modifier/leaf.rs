//! Modifiers that only apply to particular widget kinds.
//!
//! Each one checks the kind of the content's widget and leaves widgets of any other kind
//! untouched.

use super::{configure, Modifier};
use crate::color::Color;
use crate::context::Context;
use crate::events::Target;
use crate::geometry::Size;
use crate::layout::{Flex, Flexibility};
use crate::view::View;
use crate::widget::{
    ContentMode, Font, ImageCorners, Keyboard, TextAlignment, Widget, WidgetKind, WidgetRef,
};

/// A kind-specific property.
#[derive(Debug, Clone)]
pub enum LeafAttribute {
    /// Labels and text inputs.
    Font(Font),
    /// Labels and text inputs; the highlighted color only applies to labels.
    ForegroundColor { color: Color, highlighted: Option<Color> },
    /// Labels. Zero is unlimited.
    LineLimit(usize),
    /// Labels and text inputs.
    TextAlignment(TextAlignment),
    /// Labels. Text shrinks to fit when the factor is below 1.
    MinimumScaleFactor(f64),
    /// Any widget.
    ContentMode(ContentMode),
    /// Images.
    Corners(ImageCorners),
    /// Shapes.
    Fill(Color),
    /// Shapes.
    Stroke(Color),
    /// Shapes.
    LineWidth(f64),
    /// Controls.
    Target(Target),
    /// Controls.
    Disabled(bool),
    /// Text inputs.
    Keyboard(Keyboard),
    /// Text inputs.
    Secure(bool),
}

impl LeafAttribute {
    fn apply(&self, widget: &mut Widget) {
        if let LeafAttribute::ContentMode(mode) = self {
            widget.content_mode = *mode;
            return;
        }

        match (&mut widget.kind, self) {
            (WidgetKind::Label(label), LeafAttribute::Font(font)) => label.font = font.clone(),
            (WidgetKind::TextInput(input), LeafAttribute::Font(font)) => input.font = font.clone(),
            (WidgetKind::Label(label), LeafAttribute::ForegroundColor { color, highlighted }) => {
                label.color = *color;
                label.highlighted_color = *highlighted;
            }
            (WidgetKind::TextInput(input), LeafAttribute::ForegroundColor { color, .. }) => {
                input.color = *color
            }
            (WidgetKind::Label(label), LeafAttribute::LineLimit(limit)) => {
                label.line_limit = *limit
            }
            (WidgetKind::Label(label), LeafAttribute::TextAlignment(alignment)) => {
                label.alignment = *alignment
            }
            (WidgetKind::TextInput(input), LeafAttribute::TextAlignment(alignment)) => {
                input.alignment = *alignment
            }
            (WidgetKind::Label(label), LeafAttribute::MinimumScaleFactor(factor)) => {
                label.minimum_scale_factor = *factor;
                label.adjusts_font_size = *factor < 1.;
            }
            (WidgetKind::Image(image), LeafAttribute::Corners(corners)) => image.corners = *corners,
            (WidgetKind::Shape(shape), LeafAttribute::Fill(color)) => shape.fill = Some(*color),
            (WidgetKind::Shape(shape), LeafAttribute::Stroke(color)) => shape.stroke = Some(*color),
            (WidgetKind::Shape(shape), LeafAttribute::LineWidth(width)) => {
                shape.line_width = *width
            }
            (WidgetKind::Control(control), LeafAttribute::Target(target)) => {
                control.targets.push(target.clone())
            }
            (WidgetKind::Control(control), LeafAttribute::Disabled(disabled)) => {
                control.enabled = !*disabled
            }
            (WidgetKind::TextInput(input), LeafAttribute::Keyboard(keyboard)) => {
                input.keyboard = *keyboard
            }
            (WidgetKind::TextInput(input), LeafAttribute::Secure(secure)) => input.secure = *secure,
            _ => (),
        }
    }
}

impl Modifier for LeafAttribute {
    fn create(&self, content: &dyn View, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        configure(content, path, cx, |widget, _| self.apply(widget))
    }
}

/// Lets an image or shape take the whole proposed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resizable;

impl Modifier for Resizable {
    fn flexibility(&self, _content: &dyn View) -> Flexibility {
        Flexibility::new(Flex::High, Flex::High)
    }

    fn create(&self, content: &dyn View, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        configure(content, path, cx, |widget, _| {
            widget.content_mode = ContentMode::ScaleToFill
        })
    }

    fn measure(
        &self,
        content: &dyn View,
        path: &str,
        proposed: Size,
        cx: &mut Context,
    ) -> Option<WidgetRef> {
        let widget = content.measure(path, proposed, cx)?;
        widget.borrow_mut().frame.size = proposed;
        Some(widget)
    }
}
