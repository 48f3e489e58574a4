use crate::context::Context;
use crate::geometry::Size;
use crate::view::{AnyView, View};
use crate::widget::{ScrollArea, ScrollAxis, WidgetKind, WidgetRef};

/// A scrolling viewport around one view.
///
/// The viewport takes the proposed size; the content is measured unbounded along the scroll
/// axis and its size becomes the scrollable content size.
#[derive(Debug)]
pub struct ScrollView {
    pub axis: ScrollAxis,
    pub content: AnyView,
}

impl ScrollView {
    pub fn new<V: View + 'static>(axis: ScrollAxis, content: V) -> ScrollView {
        ScrollView {
            axis,
            content: Box::new(content),
        }
    }

    pub fn vertical<V: View + 'static>(content: V) -> ScrollView {
        ScrollView::new(ScrollAxis::Vertical, content)
    }

    pub fn horizontal<V: View + 'static>(content: V) -> ScrollView {
        ScrollView::new(ScrollAxis::Horizontal, content)
    }
}

impl View for ScrollView {
    fn name(&self) -> &'static str {
        "ScrollView"
    }

    fn create(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        let own = self.path(path);
        let widget = cx.obtain(&own, || WidgetKind::Scroll(ScrollArea::new(self.axis)));
        {
            let mut widget = widget.borrow_mut();
            widget.remove_all_subviews();
            widget.clips_to_bounds = true;
            if let WidgetKind::Scroll(scroll) = &mut widget.kind {
                scroll.axis = self.axis;
            }
        }
        if let Some(content) = self.content.create(&own, cx) {
            widget.borrow_mut().add_subview(content);
        }
        Some(widget)
    }

    fn measure(&self, path: &str, proposed: Size, cx: &mut Context) -> Option<WidgetRef> {
        let own = self.path(path);
        let widget = cx.query(&own)?;

        let mut inner = proposed;
        if self.axis != ScrollAxis::Horizontal {
            inner.y = f64::INFINITY;
        }
        if self.axis != ScrollAxis::Vertical {
            inner.x = f64::INFINITY;
        }

        let content_size = match self.content.measure(&own, inner, cx) {
            Some(content) => {
                let mut content = content.borrow_mut();
                let size = content.frame.size;
                // unbounded content collapses to the viewport
                if !size.x.is_finite() {
                    content.frame.size.x = proposed.x;
                }
                if !size.y.is_finite() {
                    content.frame.size.y = proposed.y;
                }
                content.frame.size
            }
            None => proposed,
        };

        let mut widget_mut = widget.borrow_mut();
        widget_mut.reset_frame(proposed);
        if let WidgetKind::Scroll(scroll) = &mut widget_mut.kind {
            scroll.content_size = content_size;
        }
        drop(widget_mut);
        Some(widget)
    }

    fn finalize_transform(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        let own = self.path(path);
        self.content.finalize_transform(&own, cx);
        cx.query(&own)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{EdgeInsets, Edges};
    use crate::modifier::ViewExt;
    use crate::testing::{frame, measure_root, Probe};
    use crate::views::VStack;
    use cgmath::Vector2;

    #[test]
    fn test_content_measured_unbounded() {
        let view = ScrollView::vertical(
            VStack::new(views![Probe::fixed(50., 80.), Probe::fixed(50., 80.)]).spacing(0.),
        );
        let (cx, widget) = measure_root(&view, 100., 100.);
        let widget = widget.borrow();
        assert_eq!(widget.frame.size, Vector2::new(100., 100.));
        assert!(widget.clips_to_bounds);
        match &widget.kind {
            WidgetKind::Scroll(scroll) => assert_eq!(scroll.content_size, Vector2::new(50., 160.)),
            kind => panic!("unexpected kind {:?}", kind),
        }
        assert_eq!(frame(&cx, "/ScrollView/VStack/1/Probe").origin.y, 80.);
    }

    #[test]
    fn test_unbounded_content_collapses_to_viewport() {
        let view = ScrollView::horizontal(Probe::flexible(10.));
        let (cx, _) = measure_root(&view, 120., 60.);
        assert_eq!(frame(&cx, "/ScrollView/Probe").size, Vector2::new(120., 10.));
    }

    #[test]
    fn test_insets_and_behavior() {
        let insets = EdgeInsets::uniform(4.);
        let view = ScrollView::vertical(Probe::fixed(10., 10.))
            .scroll_paging(true)
            .scroll_indicators(None)
            .scroll_insets(insets, insets, Edges::NONE);
        let (_, widget) = measure_root(&view, 100., 100.);
        match &widget.borrow().kind {
            WidgetKind::Scroll(scroll) => {
                assert!(scroll.paging);
                assert!(!scroll.shows_vertical_indicator());
                assert_eq!(scroll.content_inset, insets);
                assert_eq!(scroll.indicator_insets, insets);
            }
            kind => panic!("unexpected kind {:?}", kind),
        };
    }
}
