use crate::context::Context;
use crate::geometry::Size;
use crate::layout::Flexibility;
use crate::view::View;
use crate::widget::{WeakWidgetRef, WidgetRef};
use std::rc::Rc;

/// Places a widget owned elsewhere into the tree.
///
/// Only a weak reference is held; once the owner drops the widget, this view contributes
/// nothing. The widget is measured through its own `size_that_fits`.
#[derive(Debug, Clone)]
pub struct Embed {
    widget: WeakWidgetRef,
    flexibility: Flexibility,
}

impl Embed {
    pub fn new(widget: &WidgetRef) -> Embed {
        Embed {
            widget: Rc::downgrade(widget),
            flexibility: Flexibility::default(),
        }
    }

    pub fn with_flexibility(mut self, flexibility: Flexibility) -> Self {
        self.flexibility = flexibility;
        self
    }
}

impl View for Embed {
    fn name(&self) -> &'static str {
        "Embed"
    }

    fn flexibility(&self) -> Flexibility {
        self.flexibility
    }

    fn create(&self, _path: &str, _cx: &mut Context) -> Option<WidgetRef> {
        self.widget.upgrade()
    }

    fn measure(&self, _path: &str, proposed: Size, _cx: &mut Context) -> Option<WidgetRef> {
        let widget = self.widget.upgrade()?;
        {
            let mut widget = widget.borrow_mut();
            let size = widget.size_that_fits(proposed);
            widget.reset_frame(size);
        }
        Some(widget)
    }

    fn finalize_transform(&self, _path: &str, _cx: &mut Context) -> Option<WidgetRef> {
        self.widget.upgrade()
    }

    fn lookup(&self, _path: &str, _cx: &Context) -> Option<WidgetRef> {
        self.widget.upgrade()
    }
}
