use crate::context::Context;
use crate::events::{Action, ControlEvent, Target};
use crate::geometry::{EdgeInsets, Size};
use crate::layout::{Flex, Flexibility};
use crate::view::View;
use crate::widget::{Control, Label, WidgetKind, WidgetRef};
use cgmath::Vector2;
use core::fmt;

/// Space between a button's title and its edges.
const TITLE_INSETS: EdgeInsets = EdgeInsets {
    top: 6.,
    leading: 12.,
    bottom: 6.,
    trailing: 12.,
};

/// A push button.
#[derive(Clone)]
pub struct Button {
    pub title: String,
    pub action: Action,
}

impl Button {
    pub fn new<F: 'static + FnMut() + Send>(title: &str, action: F) -> Button {
        Button {
            title: title.to_string(),
            action: Action::new(action),
        }
    }

    fn intrinsic_size(&self) -> Size {
        let title =
            Label::new(&self.title).size_that_fits(Vector2::new(f64::INFINITY, f64::INFINITY));
        Vector2::new(
            title.x + TITLE_INSETS.horizontal(),
            title.y + TITLE_INSETS.vertical(),
        )
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Button").field("title", &self.title).finish()
    }
}

impl View for Button {
    fn name(&self) -> &'static str {
        "Button"
    }

    fn flexibility(&self) -> Flexibility {
        Flexibility::new(Flex::Low, Flex::Low)
    }

    fn create(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        let intrinsic = self.intrinsic_size();
        let widget = cx.obtain(&self.path(path), || {
            WidgetKind::Control(Control::new(&self.title, intrinsic))
        });
        if let WidgetKind::Control(control) = &mut widget.borrow_mut().kind {
            control.title = self.title.clone();
            control.intrinsic = intrinsic;
            control.targets.push(Target {
                event: ControlEvent::TouchUpInside,
                action: self.action.clone(),
            });
        }
        Some(widget)
    }

    fn measure(&self, path: &str, proposed: Size, cx: &mut Context) -> Option<WidgetRef> {
        let widget = cx.query(&self.path(path))?;
        {
            let mut widget = widget.borrow_mut();
            let size = widget.size_that_fits(proposed);
            widget.reset_frame(size);
        }
        Some(widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::ViewExt;
    use cgmath::Zero;

    fn targets(widget: &WidgetRef) -> usize {
        match &widget.borrow().kind {
            WidgetKind::Control(control) => control.targets.len(),
            _ => 0,
        }
    }

    #[test]
    fn test_button_size_and_targets() {
        let mut cx = Context::new();
        let button = Button::new("OK", || ());
        let widget = button.create("", &mut cx).unwrap();
        button.measure("", Vector2::zero(), &mut cx);

        // two glyphs plus the title insets
        assert_eq!(widget.borrow().frame.size, Vector2::new(41., 33.));
        assert_eq!(targets(&widget), 1);

        // re-rendering does not pile up targets
        let again = button.create("", &mut cx).unwrap();
        assert_eq!(targets(&again), 1);

        let disabled = Button::new("OK", || ()).disabled(true);
        let widget = disabled.create("", &mut cx).unwrap();
        match &widget.borrow().kind {
            WidgetKind::Control(control) => assert!(!control.enabled),
            kind => panic!("unexpected kind {:?}", kind),
        };
    }
}
