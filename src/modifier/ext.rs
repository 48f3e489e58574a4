use super::*;
use crate::color::Color;
use crate::events::{Action, ControlEvent, Gesture, Target};
use crate::geometry::{EdgeInsets, Edges, Transform};
use crate::layout::Alignment;
use crate::view::{AnyView, View};
use crate::widget::{
    ContentMode, Font, ImageCorners, IndicatorStyle, Keyboard, Shadow, TextAlignment, TextStyle,
};

/// Fluent modifier constructors, available on every view.
pub trait ViewExt: View + Sized + 'static {
    /// Erases the view's type.
    fn into_any(self) -> AnyView {
        Box::new(self)
    }

    /// Wraps the view in an arbitrary modifier.
    fn modifier<M: Modifier>(self, modifier: M) -> Modified<M> {
        Modified::new(self.into_any(), modifier)
    }

    // layout

    fn frame_with(self, frame: Frame) -> Modified<Frame> {
        self.modifier(frame)
    }

    fn frame(self, width: f64, height: f64) -> Modified<Frame> {
        self.modifier(Frame::fixed(Some(width), Some(height)))
    }

    fn width(self, width: f64) -> Modified<Frame> {
        self.modifier(Frame::fixed(Some(width), None))
    }

    fn height(self, height: f64) -> Modified<Frame> {
        self.modifier(Frame::fixed(None, Some(height)))
    }

    /// Takes all proposed width, up to `max`.
    fn max_width(self, max: f64) -> Modified<Frame> {
        self.modifier(Frame::bounded(None, Some(max), None, None))
    }

    fn max_height(self, max: f64) -> Modified<Frame> {
        self.modifier(Frame::bounded(None, None, None, Some(max)))
    }

    fn fixed_size(self) -> Modified<FixedSize> {
        self.fixed_size_axes(true, true)
    }

    fn fixed_size_axes(self, horizontal: bool, vertical: bool) -> Modified<FixedSize> {
        self.modifier(FixedSize {
            horizontal,
            vertical,
        })
    }

    fn layout_priority(self, priority: f64) -> Modified<LayoutPriority> {
        self.modifier(LayoutPriority(priority))
    }

    fn padding(self, amount: f64) -> Modified<Padding> {
        self.modifier(Padding(EdgeInsets::uniform(amount)))
    }

    /// Pads every edge by [`DEFAULT_PADDING`].
    fn default_padding(self) -> Modified<Padding> {
        self.padding(DEFAULT_PADDING)
    }

    fn padding_axes(self, horizontal: f64, vertical: f64) -> Modified<Padding> {
        self.modifier(Padding(EdgeInsets::new(vertical, horizontal, vertical, horizontal)))
    }

    fn padding_insets(self, insets: EdgeInsets) -> Modified<Padding> {
        self.modifier(Padding(insets))
    }

    fn ignores_safe_area(self, edges: Edges) -> Modified<IgnoresSafeArea> {
        self.modifier(IgnoresSafeArea(edges))
    }

    fn aspect_ratio(self, ratio: f64) -> Modified<AspectRatio> {
        self.modifier(AspectRatio(ratio))
    }

    // transforms

    fn offset(self, x: f64, y: f64) -> Modified<TransformEffect> {
        self.modifier(TransformEffect::offset(x, y))
    }

    fn transform_effect(self, transform: Transform) -> Modified<TransformEffect> {
        self.modifier(TransformEffect(transform))
    }

    /// Rotates the view by `degrees`.
    fn rotation(self, degrees: f64) -> Modified<TransformEffect> {
        self.modifier(TransformEffect::rotation(degrees))
    }

    fn scale_effect(self, x: f64, y: f64) -> Modified<TransformEffect> {
        self.modifier(TransformEffect::scale(x, y))
    }

    // composition

    fn background<V: View + 'static>(self, view: V, alignment: Alignment) -> Modified<Composite> {
        self.modifier(Composite {
            layering: Layering::Background,
            secondary: Box::new(view),
            alignment,
        })
    }

    fn overlay<V: View + 'static>(self, view: V, alignment: Alignment) -> Modified<Composite> {
        self.modifier(Composite {
            layering: Layering::Overlay,
            secondary: Box::new(view),
            alignment,
        })
    }

    // cosmetics

    fn opacity(self, opacity: f64) -> Modified<Cosmetic> {
        self.modifier(Cosmetic::Opacity(opacity))
    }

    fn background_color(self, color: Color) -> Modified<Cosmetic> {
        self.modifier(Cosmetic::Background(color))
    }

    fn accent_color(self, color: Option<Color>) -> Modified<Cosmetic> {
        self.modifier(Cosmetic::Tint(color))
    }

    fn z_index(self, z: f64) -> Modified<Cosmetic> {
        self.modifier(Cosmetic::ZIndex(z))
    }

    fn tag(self, tag: i64) -> Modified<Cosmetic> {
        self.modifier(Cosmetic::Tag(tag))
    }

    fn hidden(self, hidden: bool) -> Modified<Cosmetic> {
        self.modifier(Cosmetic::Hidden(hidden))
    }

    fn clipped(self, clipped: bool) -> Modified<Cosmetic> {
        self.modifier(Cosmetic::Clipped(clipped))
    }

    fn allows_hit_testing(self, enabled: bool) -> Modified<Cosmetic> {
        self.modifier(Cosmetic::AllowsHitTesting(enabled))
    }

    fn should_rasterize(self) -> Modified<Cosmetic> {
        self.modifier(Cosmetic::Rasterize)
    }

    fn corner_radius(self, radius: f64) -> Modified<Cosmetic> {
        self.modifier(Cosmetic::CornerRadius(radius))
    }

    /// Rounds corners by [`DEFAULT_CORNER_RADIUS`].
    fn rounded(self) -> Modified<Cosmetic> {
        self.corner_radius(DEFAULT_CORNER_RADIUS)
    }

    fn border(self, width: f64, color: Color) -> Modified<Cosmetic> {
        self.modifier(Cosmetic::Border { width, color })
    }

    fn shadow(self, shadow: Shadow) -> Modified<Cosmetic> {
        self.modifier(Cosmetic::Shadow(shadow))
    }

    fn gesture(self, gesture: Gesture) -> Modified<Cosmetic> {
        self.modifier(Cosmetic::Gesture(gesture))
    }

    fn on_tap<F: 'static + FnMut() + Send>(self, handler: F) -> Modified<Cosmetic> {
        self.gesture(Gesture::tap(handler))
    }

    // kind-specific

    fn font(self, font: Font) -> Modified<LeafAttribute> {
        self.modifier(LeafAttribute::Font(font))
    }

    fn font_style(self, style: TextStyle) -> Modified<LeafAttribute> {
        self.font(Font::style(style))
    }

    fn foreground_color(self, color: Color) -> Modified<LeafAttribute> {
        self.modifier(LeafAttribute::ForegroundColor {
            color,
            highlighted: None,
        })
    }

    fn foreground_colors(self, color: Color, highlighted: Color) -> Modified<LeafAttribute> {
        self.modifier(LeafAttribute::ForegroundColor {
            color,
            highlighted: Some(highlighted),
        })
    }

    fn line_limit(self, lines: usize) -> Modified<LeafAttribute> {
        self.modifier(LeafAttribute::LineLimit(lines))
    }

    fn multiline_text_alignment(self, alignment: TextAlignment) -> Modified<LeafAttribute> {
        self.modifier(LeafAttribute::TextAlignment(alignment))
    }

    fn minimum_scale_factor(self, factor: f64) -> Modified<LeafAttribute> {
        self.modifier(LeafAttribute::MinimumScaleFactor(factor))
    }

    fn resizable(self) -> Modified<Resizable> {
        self.modifier(Resizable)
    }

    fn scaled_to_fill(self) -> Modified<LeafAttribute> {
        self.modifier(LeafAttribute::ContentMode(ContentMode::ScaleAspectFill))
    }

    fn scaled_to_fit(self) -> Modified<LeafAttribute> {
        self.modifier(LeafAttribute::ContentMode(ContentMode::ScaleAspectFit))
    }

    fn image_corners(self, corners: ImageCorners) -> Modified<LeafAttribute> {
        self.modifier(LeafAttribute::Corners(corners))
    }

    fn fill(self, color: Color) -> Modified<LeafAttribute> {
        self.modifier(LeafAttribute::Fill(color))
    }

    fn stroke(self, color: Color) -> Modified<LeafAttribute> {
        self.modifier(LeafAttribute::Stroke(color))
    }

    fn line_width(self, width: f64) -> Modified<LeafAttribute> {
        self.modifier(LeafAttribute::LineWidth(width))
    }

    fn target<F: 'static + FnMut() + Send>(
        self,
        event: ControlEvent,
        handler: F,
    ) -> Modified<LeafAttribute> {
        self.modifier(LeafAttribute::Target(Target {
            event,
            action: Action::new(handler),
        }))
    }

    fn disabled(self, disabled: bool) -> Modified<LeafAttribute> {
        self.modifier(LeafAttribute::Disabled(disabled))
    }

    fn keyboard(self, keyboard: Keyboard) -> Modified<LeafAttribute> {
        self.modifier(LeafAttribute::Keyboard(keyboard))
    }

    fn secure(self, secure: bool) -> Modified<LeafAttribute> {
        self.modifier(LeafAttribute::Secure(secure))
    }

    // scrolling

    fn scroll_insets(
        self,
        content: EdgeInsets,
        indicators: EdgeInsets,
        safe_area: Edges,
    ) -> Modified<ScrollInsets> {
        self.modifier(ScrollInsets {
            content,
            indicators,
            safe_area,
        })
    }

    fn scroll_paging(self, paging: bool) -> Modified<ScrollBehavior> {
        self.modifier(ScrollBehavior::Paging(paging))
    }

    fn scroll_indicators(self, style: Option<IndicatorStyle>) -> Modified<ScrollBehavior> {
        self.modifier(ScrollBehavior::Indicators(style))
    }
}

impl<V: View + 'static> ViewExt for V {}
