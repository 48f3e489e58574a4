use super::{create_container, finalize_children};
use crate::context::Context;
use crate::geometry::Size;
use crate::layout::{
    self, Alignment, Axis, Flex, Flexibility, HAlignment, VAlignment, DEFAULT_SPACING,
};
use crate::view::{AnyView, View};
use crate::widget::WidgetRef;

/// Lays out children left to right.
#[derive(Debug)]
pub struct HStack {
    pub alignment: VAlignment,
    pub spacing: f64,
    pub children: Vec<AnyView>,
}

impl HStack {
    pub fn new(children: Vec<AnyView>) -> HStack {
        HStack {
            alignment: VAlignment::Center,
            spacing: DEFAULT_SPACING,
            children,
        }
    }

    pub fn alignment(mut self, alignment: VAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }
}

impl View for HStack {
    fn name(&self) -> &'static str {
        "HStack"
    }

    fn flexibility(&self) -> Flexibility {
        Flexibility::new(Flex::High, Flex::Low)
    }

    fn create(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        Some(create_container(&self.path(path), &self.children, cx))
    }

    fn measure(&self, path: &str, proposed: Size, cx: &mut Context) -> Option<WidgetRef> {
        let own = self.path(path);
        let widget = cx.query(&own)?;
        let size = layout::measure_stack(
            Axis::Horizontal,
            self.alignment.into(),
            self.spacing,
            &self.children,
            &own,
            proposed,
            cx,
        );
        widget.borrow_mut().reset_frame(size);
        Some(widget)
    }

    fn finalize_transform(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        finalize_children(&self.path(path), &self.children, cx)
    }
}

/// Lays out children top to bottom.
#[derive(Debug)]
pub struct VStack {
    pub alignment: HAlignment,
    pub spacing: f64,
    pub children: Vec<AnyView>,
}

impl VStack {
    pub fn new(children: Vec<AnyView>) -> VStack {
        VStack {
            alignment: HAlignment::Center,
            spacing: DEFAULT_SPACING,
            children,
        }
    }

    pub fn alignment(mut self, alignment: HAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }
}

impl View for VStack {
    fn name(&self) -> &'static str {
        "VStack"
    }

    fn flexibility(&self) -> Flexibility {
        Flexibility::new(Flex::Low, Flex::High)
    }

    fn create(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        Some(create_container(&self.path(path), &self.children, cx))
    }

    fn measure(&self, path: &str, proposed: Size, cx: &mut Context) -> Option<WidgetRef> {
        let own = self.path(path);
        let widget = cx.query(&own)?;
        let size = layout::measure_stack(
            Axis::Vertical,
            self.alignment.into(),
            self.spacing,
            &self.children,
            &own,
            proposed,
            cx,
        );
        widget.borrow_mut().reset_frame(size);
        Some(widget)
    }

    fn finalize_transform(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        finalize_children(&self.path(path), &self.children, cx)
    }
}

/// Layers children on top of each other.
#[derive(Debug)]
pub struct ZStack {
    pub alignment: Alignment,
    pub children: Vec<AnyView>,
}

impl ZStack {
    pub fn new(children: Vec<AnyView>) -> ZStack {
        ZStack {
            alignment: Alignment::CENTER,
            children,
        }
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl View for ZStack {
    fn name(&self) -> &'static str {
        "ZStack"
    }

    fn create(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        Some(create_container(&self.path(path), &self.children, cx))
    }

    fn measure(&self, path: &str, proposed: Size, cx: &mut Context) -> Option<WidgetRef> {
        let own = self.path(path);
        let widget = cx.query(&own)?;
        let size = layout::measure_overlay(self.alignment, &self.children, &own, proposed, cx);
        widget.borrow_mut().reset_frame(size);
        Some(widget)
    }

    fn finalize_transform(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        finalize_children(&self.path(path), &self.children, cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{frame, measure_root, Probe};
    use crate::views::{Divider, Spacer};
    use cgmath::{Point2, Vector2};

    fn width(cx: &Context, path: &str) -> f64 {
        frame(cx, path).size.x
    }

    #[test]
    fn test_flexible_child_takes_the_rest() {
        let stack = HStack::new(views![
            Probe::fixed(100., 20.),
            Probe::flexible(30.).with_priority(1.),
            Probe::fixed(50., 10.),
        ])
        .spacing(10.);
        let (cx, widget) = measure_root(&stack, 300., 100.);

        assert_eq!(widget.borrow().frame.size, Vector2::new(300., 30.));
        assert_eq!(width(&cx, "/HStack/0/Probe"), 100.);
        assert_eq!(width(&cx, "/HStack/1/Probe"), 130.);
        assert_eq!(width(&cx, "/HStack/2/Probe"), 50.);

        // declaration order, vertically centered
        assert_eq!(frame(&cx, "/HStack/0/Probe").origin, Point2::new(0., 5.));
        assert_eq!(frame(&cx, "/HStack/1/Probe").origin, Point2::new(110., 0.));
        assert_eq!(frame(&cx, "/HStack/2/Probe").origin, Point2::new(250., 10.));
    }

    #[test]
    fn test_main_axis_is_conserved() {
        for &proposal in &[120., 200., 333.5] {
            let stack = HStack::new(views![
                Probe::fixed(40., 10.),
                Probe::flexible(10.).with_priority(1.),
                Probe::fixed(60., 10.),
            ]);
            let (cx, widget) = measure_root(&stack, proposal, 50.);
            let total: f64 = (0..3)
                .map(|i| width(&cx, &format!("/HStack/{}/Probe", i)))
                .sum::<f64>()
                + 2. * DEFAULT_SPACING;
            assert!((total - proposal).abs() < 1e-9, "{} != {}", total, proposal);
            assert!((widget.borrow().frame.size.x - proposal).abs() < 1e-9);
        }
    }

    #[test]
    fn test_priority_goes_first() {
        let stack = HStack::new(views![
            Probe::yielding(200., 10.),
            Probe::yielding(200., 10.).with_priority(1.),
        ])
        .spacing(0.);
        let (cx, _) = measure_root(&stack, 300., 50.);
        assert_eq!(width(&cx, "/HStack/1/Probe"), 200.);
        assert_eq!(width(&cx, "/HStack/0/Probe"), 100.);
        assert_eq!(frame(&cx, "/HStack/1/Probe").origin.x, 100.);

        // the loser still gets a sliver
        let stack = HStack::new(views![
            Probe::yielding(200., 10.),
            Probe::yielding(200., 10.).with_priority(1.),
        ])
        .spacing(0.);
        let (cx, _) = measure_root(&stack, 150., 50.);
        assert_eq!(width(&cx, "/HStack/1/Probe"), 150.);
        assert_eq!(width(&cx, "/HStack/0/Probe"), 1.);
    }

    #[test]
    fn test_spacers_split_leftover() {
        let stack = HStack::new(views![
            Probe::fixed(50., 10.),
            Spacer,
            Probe::fixed(50., 10.),
            Spacer,
        ])
        .spacing(0.);
        let (cx, widget) = measure_root(&stack, 300., 40.);
        assert_eq!(widget.borrow().frame.size, Vector2::new(300., 10.));
        assert_eq!(frame(&cx, "/HStack/1/Spacer").size, Vector2::new(100., 10.));
        assert_eq!(frame(&cx, "/HStack/3/Spacer").origin, Point2::new(200., 0.));
        assert_eq!(width(&cx, "/HStack/3/Spacer"), 100.);

        let stack = HStack::new(views![Probe::fixed(50., 10.), Spacer, Probe::fixed(50., 10.)])
            .spacing(0.);
        let (cx, _) = measure_root(&stack, 300., 40.);
        assert_eq!(width(&cx, "/HStack/1/Spacer"), 200.);
        assert_eq!(frame(&cx, "/HStack/2/Probe").origin.x, 250.);
    }

    #[test]
    fn test_divider_collapses() {
        let stack = VStack::new(views![Probe::fixed(80., 20.), Divider, Probe::fixed(40., 20.)])
            .alignment(HAlignment::Leading)
            .spacing(0.);
        let (cx, widget) = measure_root(&stack, 200., 300.);
        assert_eq!(widget.borrow().frame.size, Vector2::new(80., 41.));
        let divider = frame(&cx, "/VStack/1/Divider");
        assert_eq!(divider.origin, Point2::new(0., 20.));
        assert_eq!(divider.size, Vector2::new(80., 1.));
        assert_eq!(frame(&cx, "/VStack/2/Probe").origin, Point2::new(0., 21.));
    }

    #[test]
    fn test_trailing_alignment() {
        let stack = VStack::new(views![Probe::fixed(80., 20.), Probe::fixed(40., 20.)])
            .alignment(HAlignment::Trailing)
            .spacing(0.);
        let (cx, widget) = measure_root(&stack, 200., 300.);
        assert_eq!(widget.borrow().frame.size, Vector2::new(80., 40.));
        assert_eq!(frame(&cx, "/VStack/0/Probe").origin, Point2::new(0., 0.));
        assert_eq!(frame(&cx, "/VStack/1/Probe").origin, Point2::new(40., 20.));
    }

    #[test]
    fn test_bottom_alignment() {
        let stack = HStack::new(views![Probe::fixed(10., 30.), Probe::fixed(10., 10.)])
            .alignment(VAlignment::Bottom)
            .spacing(5.);
        let (cx, widget) = measure_root(&stack, 200., 300.);
        assert_eq!(widget.borrow().frame.size, Vector2::new(25., 30.));
        assert_eq!(frame(&cx, "/HStack/0/Probe").origin, Point2::new(0., 0.));
        assert_eq!(frame(&cx, "/HStack/1/Probe").origin, Point2::new(15., 20.));
    }

    #[test]
    fn test_overlay_alignment() {
        let stack = ZStack::new(views![Probe::fixed(200., 100.), Probe::fixed(50., 50.)])
            .alignment(Alignment::TOP_TRAILING);
        let (cx, widget) = measure_root(&stack, 400., 400.);
        assert_eq!(widget.borrow().frame.size, Vector2::new(200., 100.));
        assert_eq!(frame(&cx, "/ZStack/0/Probe").origin, Point2::new(0., 0.));
        assert_eq!(frame(&cx, "/ZStack/1/Probe").origin, Point2::new(150., 0.));
    }

    #[test]
    fn test_empty_stack() {
        let stack = VStack::new(Vec::new());
        let (_, widget) = measure_root(&stack, 100., 100.);
        assert_eq!(widget.borrow().frame.size, Vector2::new(0., 0.));
    }
}
