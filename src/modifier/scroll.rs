use super::{configure, Modifier};
use crate::context::Context;
use crate::geometry::{EdgeInsets, Edges, Size};
use crate::view::View;
use crate::widget::{IndicatorStyle, WidgetKind, WidgetRef};

/// Content and indicator insets of a scroll view, optionally extended by the host's safe area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollInsets {
    pub content: EdgeInsets,
    pub indicators: EdgeInsets,
    /// Edges on which the safe-area inset is added to both.
    pub safe_area: Edges,
}

impl Modifier for ScrollInsets {
    fn measure(
        &self,
        content: &dyn View,
        path: &str,
        proposed: Size,
        cx: &mut Context,
    ) -> Option<WidgetRef> {
        let extra = self.safe_area.select(cx.safe_area_insets());
        if let Some(widget) = content.lookup(path, cx) {
            if let WidgetKind::Scroll(scroll) = &mut widget.borrow_mut().kind {
                scroll.content_inset = self.content + extra;
                scroll.indicator_insets = self.indicators + extra;
            }
        }
        content.measure(path, proposed, cx)
    }
}

/// Scroll-view behavior toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Paging(bool),
    /// `None` hides the indicators.
    Indicators(Option<IndicatorStyle>),
}

impl Modifier for ScrollBehavior {
    fn create(&self, content: &dyn View, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        configure(content, path, cx, |widget, _| {
            if let WidgetKind::Scroll(scroll) = &mut widget.kind {
                match *self {
                    ScrollBehavior::Paging(paging) => scroll.paging = paging,
                    ScrollBehavior::Indicators(style) => scroll.indicators = style,
                }
            }
        })
    }
}
