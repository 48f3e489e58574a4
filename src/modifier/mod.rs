//! Modifiers: decorators that wrap one view and intercept some of its operations.
//!
//! A modifier only overrides what it changes; everything else forwards to the wrapped content.
//! Modifiers that need a widget of their own (frames, padding, backgrounds...) name a wrapper
//! segment, so their widget lives at `path/Segment` and the content is created beneath it.
//! All others share the content's widget and path.
//!
//! Applying modifiers in a chain nests them: `view.padding(8.).frame(...)` measures the frame
//! first, which in turn measures the padding.

mod aspect;
mod composition;
mod cosmetic;
mod effects;
mod ext;
mod frame;
mod leaf;
mod padding;
mod safe_area;
mod scroll;

pub use aspect::*;
pub use composition::*;
pub use cosmetic::*;
pub use effects::*;
pub use ext::ViewExt;
pub use frame::*;
pub use leaf::*;
pub use padding::*;
pub use safe_area::*;
pub use scroll::*;

use crate::context::Context;
use crate::geometry::Size;
use crate::layout::Flexibility;
use crate::view::{join, AnyView, Role, View};
use crate::widget::{Widget, WidgetKind, WidgetRef};
use core::fmt;

/// Behavior a [`Modified`] view layers over its content.
#[allow(unused_variables)]
pub trait Modifier: fmt::Debug {
    /// Path segment of this modifier's own widget, if it creates one.
    fn wrapper(&self) -> Option<&'static str> {
        None
    }

    fn flexibility(&self, content: &dyn View) -> Flexibility {
        content.flexibility()
    }

    fn priority(&self, content: &dyn View) -> f64 {
        content.priority()
    }

    fn create(&self, content: &dyn View, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        content.create(path, cx)
    }

    fn measure(
        &self,
        content: &dyn View,
        path: &str,
        proposed: Size,
        cx: &mut Context,
    ) -> Option<WidgetRef> {
        content.measure(path, proposed, cx)
    }

    fn finalize_transform(
        &self,
        content: &dyn View,
        path: &str,
        cx: &mut Context,
    ) -> Option<WidgetRef> {
        content.finalize_transform(path, cx)
    }
}

/// A view with a modifier applied.
#[derive(Debug)]
pub struct Modified<M> {
    content: AnyView,
    modifier: M,
}

impl<M: Modifier> Modified<M> {
    pub fn new(content: AnyView, modifier: M) -> Modified<M> {
        Modified { content, modifier }
    }

    pub fn modifier(&self) -> &M {
        &self.modifier
    }
}

impl<M: Modifier> View for Modified<M> {
    fn name(&self) -> &'static str {
        self.modifier
            .wrapper()
            .unwrap_or_else(|| self.content.name())
    }

    fn flexibility(&self) -> Flexibility {
        self.modifier.flexibility(&*self.content)
    }

    fn priority(&self) -> f64 {
        self.modifier.priority(&*self.content)
    }

    fn role(&self) -> Role {
        match self.modifier.wrapper() {
            Some(_) => Role::Regular,
            None => self.content.role(),
        }
    }

    fn path(&self, path: &str) -> String {
        match self.modifier.wrapper() {
            Some(segment) => join(path, segment),
            None => self.content.path(path),
        }
    }

    fn create(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        self.modifier.create(&*self.content, path, cx)
    }

    fn measure(&self, path: &str, proposed: Size, cx: &mut Context) -> Option<WidgetRef> {
        self.modifier.measure(&*self.content, path, proposed, cx)
    }

    fn finalize_transform(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        self.modifier.finalize_transform(&*self.content, path, cx)
    }

    fn lookup(&self, path: &str, cx: &Context) -> Option<WidgetRef> {
        match self.modifier.wrapper() {
            Some(segment) => cx
                .query(&join(path, segment))
                .or_else(|| self.content.lookup(path, cx)),
            None => self.content.lookup(path, cx),
        }
    }
}

/// Creates a wrapper widget at `path/segment` holding the content's widget.
pub(crate) fn create_wrapper(
    segment: &str,
    content: &dyn View,
    path: &str,
    cx: &mut Context,
) -> Option<WidgetRef> {
    let own = join(path, segment);
    let widget = cx.obtain(&own, || WidgetKind::Container);
    widget.borrow_mut().remove_all_subviews();
    if let Some(subview) = content.create(&own, cx) {
        widget.borrow_mut().add_subview(subview);
    }
    Some(widget)
}

/// Finalizes the content beneath a wrapper and returns the wrapper's widget.
pub(crate) fn finalize_wrapper(
    segment: &str,
    content: &dyn View,
    path: &str,
    cx: &mut Context,
) -> Option<WidgetRef> {
    let own = join(path, segment);
    content.finalize_transform(&own, cx);
    cx.query(&own)
}

/// Creates the content and applies `f` to its widget.
pub(crate) fn configure<F>(
    content: &dyn View,
    path: &str,
    cx: &mut Context,
    f: F,
) -> Option<WidgetRef>
where
    F: FnOnce(&mut Widget, &Context),
{
    let widget = content.create(path, cx)?;
    f(&mut widget.borrow_mut(), cx);
    Some(widget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::{self, EdgeInsets, Edges, Rect, DEGREES_TO_RADIANS};
    use crate::layout::{Alignment, Flex};
    use crate::testing::{frame, headless_host, init_logger, measure_root, Probe};
    use crate::views::{ColorFill, IfElse, Shape, Text};
    use crate::{HeadlessSurface, Host};
    use cgmath::{Point2, Vector2};

    #[test]
    fn test_padding_insets_content() {
        let view = Probe::fixed(50., 20.).padding(10.);
        let (cx, widget) = measure_root(&view, 300., 300.);
        assert_eq!(widget.borrow().frame.size, Vector2::new(70., 40.));
        assert_eq!(frame(&cx, "/Padding/Probe").origin, Point2::new(10., 10.));
        assert_eq!(view.flexibility(), Flexibility::new(Flex::Low, Flex::Low));
    }

    #[test]
    fn test_frame_aligns_content() {
        let view = Probe::fixed(20., 20.)
            .frame_with(Frame::fixed(Some(100.), Some(50.)).aligned(Alignment::BOTTOM_TRAILING));
        let (cx, widget) = measure_root(&view, 300., 300.);
        assert_eq!(widget.borrow().frame.size, Vector2::new(100., 50.));
        assert_eq!(frame(&cx, "/Frame/Probe").origin, Point2::new(80., 30.));

        let view = Probe::fixed(20., 20.).frame_with(Frame::bounded(Some(60.), None, None, None));
        let (_, widget) = measure_root(&view, 300., 300.);
        assert_eq!(widget.borrow().frame.size, Vector2::new(60., 20.));

        // only fixed axes resist growing
        let view = Probe::fixed(20., 20.).width(40.);
        assert_eq!(view.flexibility(), Flexibility::new(Flex::Low, Flex::High));
    }

    #[test]
    fn test_aspect_ratio_is_idempotent() {
        let once = Shape::rect().aspect_ratio(2.);
        let twice = Shape::rect().aspect_ratio(2.).aspect_ratio(2.);
        let (_, a) = measure_root(&once, 300., 300.);
        let (_, b) = measure_root(&twice, 300., 300.);
        assert_eq!(a.borrow().frame.size, Vector2::new(300., 150.));
        assert_eq!(a.borrow().frame.size, b.borrow().frame.size);

        let (_, tall) = measure_root(&Shape::rect().aspect_ratio(0.5), 300., 300.);
        assert_eq!(tall.borrow().frame.size, Vector2::new(150., 300.));
    }

    #[test]
    fn test_fixed_size_reports_natural_width() {
        let (_, wrapped) = measure_root(&Text::new("0123456789"), 40., 300.);
        assert!(wrapped.borrow().frame.size.x <= 40.);

        let (_, natural) = measure_root(&Text::new("0123456789").fixed_size(), 40., 300.);
        assert_eq!(natural.borrow().frame.size.x, 85.);
    }

    #[test]
    fn test_background_fills_primary() {
        let view = Text::new("hi").background(ColorFill(Color::WHITE), Alignment::CENTER);
        let (cx, widget) = measure_root(&view, 300., 300.);
        let primary = frame(&cx, "/Background/Text");
        let secondary = frame(&cx, "/Background/secondary/Color");
        assert_eq!(widget.borrow().frame.size, primary.size);
        assert_eq!(secondary.size, primary.size);
        assert_eq!(secondary.origin, Point2::new(0., 0.));

        let subviews = widget.borrow().subviews().len();
        assert_eq!(subviews, 2);
    }

    #[test]
    fn test_cosmetics_share_content_widget() {
        let view = Shape::rect().opacity(0.5).corner_radius(4.).tag(7);
        let (cx, widget) = measure_root(&view, 10., 10.);
        assert_eq!(cx.cache().len(), 1);
        let widget = widget.borrow();
        assert_eq!(widget.opacity, 0.5);
        assert_eq!(widget.corner_radius, 4.);
        assert!(widget.clips_to_bounds);
        assert_eq!(widget.tag, 7);
    }

    #[test]
    fn test_rasterize_uses_display_scale() {
        init_logger();
        let surface = HeadlessSurface::new(Vector2::new(50., 50.)).with_display_scale(2.);
        let mut host = Host::new(surface);
        host.render(Some(Shape::rect().should_rasterize().into_any()), false);
        assert_eq!(host.query("/Shape").unwrap().borrow().rasterization, Some(2.));
    }

    #[test]
    fn test_transforms_do_not_accumulate() {
        let mut host = headless_host(100., 100.);
        host.render(
            Some(Probe::fixed(10., 10.).rotation(90.).offset(10., 0.).into_any()),
            false,
        );
        let expected = geometry::concat(
            geometry::concat(geometry::identity(), geometry::rotation(90. * DEGREES_TO_RADIANS)),
            geometry::translation(10., 0.),
        );
        let first = host.query("/Probe").unwrap().borrow().transform;
        assert_eq!(first, expected);

        host.layout();
        assert_eq!(host.query("/Probe").unwrap().borrow().transform, first);
    }

    #[test]
    fn test_ignores_safe_area_covers_surface() {
        init_logger();
        let surface = HeadlessSurface::new(Vector2::new(300., 300.))
            .with_safe_area_insets(EdgeInsets::new(20., 0., 10., 0.));
        let mut host = Host::new(surface);
        host.render(
            Some(ColorFill(Color::BLACK).ignores_safe_area(Edges::ALL).into_any()),
            false,
        );
        let wrapper = host.query("/IgnoresSafeArea").unwrap().borrow().frame;
        assert_eq!(wrapper, Rect::new(Point2::new(0., 20.), Vector2::new(300., 270.)));
        let fill = host.query("/IgnoresSafeArea/Color").unwrap().borrow().frame;
        assert_eq!(fill, Rect::new(Point2::new(0., -20.), Vector2::new(300., 300.)));
    }

    #[test]
    fn test_branches_never_share_widgets() {
        let (cx, _) = measure_root(&IfElse::new(true, Text::new("yes")), 100., 100.);
        assert!(cx.query("/IfElse.then/Text").is_some());

        let (cx, _) = measure_root(
            &IfElse::new(false, Text::new("yes")).otherwise(Text::new("no")),
            100.,
            100.,
        );
        assert!(cx.query("/IfElse.then/Text").is_none());
        assert!(cx.query("/IfElse.else/Text").is_some());

        let view = IfElse::new(false, Text::new("yes"));
        let mut cx = Context::new();
        assert!(view.create("", &mut cx).is_none());
        assert!(cx.cache().is_empty());
    }
}
