//! Flexibility, alignment, and the two container layout algorithms.
//!
//! Linear stacks measure their children in order of flexibility, handing out the remaining
//! main-axis space as they go, and then arrange them in declaration order. Overlays measure every
//! child against the full proposal and align each within the largest.

use crate::context::Context;
use crate::geometry::{Rect, Size};
use crate::view::{join, AnyView, Role, View};
use cgmath::{EuclideanSpace, Point2, Vector2, Zero};
use core::cmp::Ordering;
use log::trace;

/// Main-axis thickness of a divider inside a stack.
pub const DIVIDER_THICKNESS: f64 = 1.;

/// Default spacing between stack children.
pub const DEFAULT_SPACING: f64 = 5.;

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Component of `v` along this axis.
    pub fn main(self, v: Vector2<f64>) -> f64 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }

    /// Component of `v` across this axis.
    pub fn cross(self, v: Vector2<f64>) -> f64 {
        match self {
            Axis::Horizontal => v.y,
            Axis::Vertical => v.x,
        }
    }

    /// Builds a vector from main and cross components.
    pub fn pack(self, main: f64, cross: f64) -> Vector2<f64> {
        match self {
            Axis::Horizontal => Vector2::new(main, cross),
            Axis::Vertical => Vector2::new(cross, main),
        }
    }
}

/// How eagerly a view claims space, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flex {
    VeryLow,
    Low,
    High,
    /// Only spacers: they take whatever is left over.
    VeryHigh,
}

/// Per-axis flexibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flexibility {
    pub horizontal: Flex,
    pub vertical: Flex,
}

impl Flexibility {
    pub const fn new(horizontal: Flex, vertical: Flex) -> Flexibility {
        Flexibility {
            horizontal,
            vertical,
        }
    }

    pub fn along(self, axis: Axis) -> Flex {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }
}

impl Default for Flexibility {
    fn default() -> Self {
        Flexibility::new(Flex::High, Flex::High)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlignment {
    Leading,
    Center,
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlignment {
    Top,
    Center,
    Bottom,
}

/// Start/center/end placement along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pin {
    Start,
    Center,
    End,
}

impl Pin {
    /// Offset of an item of length `item` inside `extent`.
    pub(crate) fn offset(self, extent: f64, item: f64) -> f64 {
        match self {
            Pin::Start => 0.,
            Pin::Center => (extent - item) / 2.,
            Pin::End => extent - item,
        }
    }
}

impl From<HAlignment> for Pin {
    fn from(alignment: HAlignment) -> Pin {
        match alignment {
            HAlignment::Leading => Pin::Start,
            HAlignment::Center => Pin::Center,
            HAlignment::Trailing => Pin::End,
        }
    }
}

impl From<VAlignment> for Pin {
    fn from(alignment: VAlignment) -> Pin {
        match alignment {
            VAlignment::Top => Pin::Start,
            VAlignment::Center => Pin::Center,
            VAlignment::Bottom => Pin::End,
        }
    }
}

/// A 9-point alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    pub horizontal: HAlignment,
    pub vertical: VAlignment,
}

impl Alignment {
    pub const TOP_LEADING: Alignment = Alignment::new(HAlignment::Leading, VAlignment::Top);
    pub const TOP: Alignment = Alignment::new(HAlignment::Center, VAlignment::Top);
    pub const TOP_TRAILING: Alignment = Alignment::new(HAlignment::Trailing, VAlignment::Top);
    pub const LEADING: Alignment = Alignment::new(HAlignment::Leading, VAlignment::Center);
    pub const CENTER: Alignment = Alignment::new(HAlignment::Center, VAlignment::Center);
    pub const TRAILING: Alignment = Alignment::new(HAlignment::Trailing, VAlignment::Center);
    pub const BOTTOM_LEADING: Alignment = Alignment::new(HAlignment::Leading, VAlignment::Bottom);
    pub const BOTTOM: Alignment = Alignment::new(HAlignment::Center, VAlignment::Bottom);
    pub const BOTTOM_TRAILING: Alignment =
        Alignment::new(HAlignment::Trailing, VAlignment::Bottom);

    pub const fn new(horizontal: HAlignment, vertical: VAlignment) -> Alignment {
        Alignment {
            horizontal,
            vertical,
        }
    }

    /// Origin of an item of size `item` aligned inside `container`.
    pub fn origin(self, container: Size, item: Size) -> Point2<f64> {
        Point2::new(
            Pin::from(self.horizontal).offset(container.x, item.x),
            Pin::from(self.vertical).offset(container.y, item.y),
        )
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::CENTER
    }
}

fn is_spacer(view: &AnyView, axis: Axis) -> bool {
    view.flexibility().along(axis) == Flex::VeryHigh
}

/// Measures and arranges the children of a linear stack whose own widget lives at `path`.
///
/// Returns the stack's size. Children that have no widget are skipped.
pub(crate) fn measure_stack(
    axis: Axis,
    pin: Pin,
    spacing: f64,
    children: &[AnyView],
    path: &str,
    proposed: Size,
    cx: &mut Context,
) -> Size {
    let main_proposal = axis.main(proposed);
    let cross_proposal = axis.cross(proposed);

    let spacer_count = children.iter().filter(|c| is_spacer(c, axis)).count();
    let mut regular: Vec<(usize, &AnyView)> = children
        .iter()
        .enumerate()
        .filter(|(_, c)| !is_spacer(c, axis))
        .collect();

    if regular.is_empty() {
        for (index, child) in children.iter().enumerate() {
            child.measure(&join(path, index), Vector2::zero(), cx);
        }
        return Vector2::zero();
    }

    regular.sort_by(|(_, a), (_, b)| {
        let (fa, fb) = (a.flexibility().along(axis), b.flexibility().along(axis));
        if fa == Flex::High && fb == Flex::High {
            b.priority()
                .partial_cmp(&a.priority())
                .unwrap_or(Ordering::Equal)
        } else {
            fa.cmp(&fb)
        }
    });

    let live = children
        .iter()
        .enumerate()
        .filter(|(index, child)| child.lookup(&join(path, index), cx).is_some())
        .count();
    let mut unallocated = (main_proposal - spacing * (live.max(1) - 1) as f64).max(0.);
    let mut remaining = regular.len();
    let mut cross_extent: f64 = 0.;

    for (index, child) in regular {
        let offer = if child.flexibility().along(axis) == Flex::High && child.priority() > 0. {
            unallocated
        } else {
            unallocated / remaining as f64
        };
        remaining -= 1;

        let proposal = axis.pack(offer.max(1.), cross_proposal);
        let widget = match child.measure(&join(path, index), proposal, cx) {
            Some(widget) => widget,
            None => continue,
        };
        let mut widget = widget.borrow_mut();
        if child.role() == Role::Divider {
            widget.frame.size = axis.pack(DIVIDER_THICKNESS, axis.cross(widget.frame.size));
        }
        let size = widget.frame.size;
        cross_extent = cross_extent.max(axis.cross(size));
        unallocated = (unallocated - axis.main(size)).max(0.);
    }

    let spacer_share = if spacer_count > 0 {
        unallocated / spacer_count as f64
    } else {
        0.
    };
    trace!(
        "stack {:?}: {} left for {} spacers, cross extent {}",
        path,
        unallocated,
        spacer_count,
        cross_extent
    );

    let mut offset = 0.;
    for (index, child) in children.iter().enumerate() {
        let child_path = join(path, index);
        if is_spacer(child, axis) {
            // spacers were skipped above; reset them before placing
            child.measure(&child_path, Vector2::zero(), cx);
        }
        let widget = match child.lookup(&child_path, cx) {
            Some(widget) => widget,
            None => continue,
        };
        let mut widget = widget.borrow_mut();
        let start = axis.pack(offset, 0.);

        if is_spacer(child, axis) {
            let size = axis.pack(spacer_share, cross_extent);
            widget.frame = Rect::new(Point2::from_vec(start), size);
        } else if child.role() == Role::Divider {
            let main = axis.main(widget.frame.size);
            widget.frame = Rect::new(Point2::from_vec(start), axis.pack(main, cross_extent));
        } else {
            let cross = pin.offset(cross_extent, axis.cross(widget.frame.size));
            widget.frame.origin = Point2::from_vec(axis.pack(offset, cross));
        }
        offset += axis.main(widget.frame.size) + spacing;
    }

    axis.pack((offset - spacing).max(0.), cross_extent)
}

/// Measures the children of an overlay whose own widget lives at `path` and aligns them.
pub(crate) fn measure_overlay(
    alignment: Alignment,
    children: &[AnyView],
    path: &str,
    proposed: Size,
    cx: &mut Context,
) -> Size {
    let mut size: Size = Vector2::zero();
    let mut measured = Vec::with_capacity(children.len());
    for (index, child) in children.iter().enumerate() {
        if let Some(widget) = child.measure(&join(path, index), proposed, cx) {
            let child_size = widget.borrow().frame.size;
            size.x = size.x.max(child_size.x);
            size.y = size.y.max(child_size.y);
            measured.push(widget);
        }
    }

    for widget in measured {
        let mut widget = widget.borrow_mut();
        widget.frame.origin = alignment.origin(size, widget.frame.size);
    }
    size
}

#[test]
fn test_alignment_origin() {
    let container = Vector2::new(200., 100.);
    let item = Vector2::new(50., 50.);
    assert_eq!(Alignment::TOP_TRAILING.origin(container, item), Point2::new(150., 0.));
    assert_eq!(Alignment::CENTER.origin(container, item), Point2::new(75., 25.));
    assert_eq!(Alignment::BOTTOM_LEADING.origin(container, item), Point2::new(0., 50.));
}

#[test]
fn test_flex_order() {
    assert!(Flex::VeryLow < Flex::Low);
    assert!(Flex::High < Flex::VeryHigh);
    assert_eq!(
        Flexibility::new(Flex::Low, Flex::High).along(Axis::Vertical),
        Flex::High
    );
}
