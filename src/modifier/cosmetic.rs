//! Visual properties that never affect measurement.

use super::{configure, Modifier};
use crate::color::Color;
use crate::context::Context;
use crate::events::Gesture;
use crate::widget::{Shadow, Widget, WidgetRef};
use crate::view::View;
use cgmath::Vector2;

/// Default corner radius.
pub const DEFAULT_CORNER_RADIUS: f64 = 12.;

impl Default for Shadow {
    fn default() -> Self {
        Shadow {
            opacity: 0.5,
            radius: 15.,
            offset: Vector2::new(0., 5.),
            color: Color::BLACK,
        }
    }
}

/// A visual property set on the content's widget after it is created.
#[derive(Debug, Clone)]
pub enum Cosmetic {
    Opacity(f64),
    Background(Color),
    /// Accent color; `None` inherits.
    Tint(Option<Color>),
    ZIndex(f64),
    Tag(i64),
    Hidden(bool),
    Clipped(bool),
    AllowsHitTesting(bool),
    /// Rasterizes at the host's display scale.
    Rasterize,
    CornerRadius(f64),
    Border { width: f64, color: Color },
    Shadow(Shadow),
    Gesture(Gesture),
}

impl Cosmetic {
    fn apply(&self, widget: &mut Widget, display_scale: f64) {
        match self {
            Cosmetic::Opacity(opacity) => widget.opacity = *opacity,
            Cosmetic::Background(color) => widget.background = *color,
            Cosmetic::Tint(color) => widget.tint = *color,
            Cosmetic::ZIndex(z) => widget.z_position = *z,
            Cosmetic::Tag(tag) => widget.tag = *tag,
            Cosmetic::Hidden(hidden) => widget.hidden = *hidden,
            Cosmetic::Clipped(clipped) => widget.clips_to_bounds = *clipped,
            Cosmetic::AllowsHitTesting(enabled) => widget.interaction_enabled = *enabled,
            Cosmetic::Rasterize => widget.rasterization = Some(display_scale),
            Cosmetic::CornerRadius(radius) => {
                widget.corner_radius = *radius;
                widget.clips_to_bounds = true;
            }
            Cosmetic::Border { width, color } => widget.border = Some((*width, *color)),
            Cosmetic::Shadow(shadow) => widget.shadow = Some(*shadow),
            Cosmetic::Gesture(gesture) => {
                widget.interaction_enabled = true;
                widget.gestures.push(gesture.clone());
            }
        }
    }
}

impl Modifier for Cosmetic {
    fn create(&self, content: &dyn View, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        configure(content, path, cx, |widget, cx| {
            self.apply(widget, cx.display_scale())
        })
    }
}
