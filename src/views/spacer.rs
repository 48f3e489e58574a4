use crate::color::Color;
use crate::context::Context;
use crate::geometry::Size;
use crate::layout::{Flex, Flexibility};
use crate::view::{Role, View};
use crate::widget::{WidgetKind, WidgetRef};
use cgmath::{Vector2, Zero};

/// Takes up an even share of whatever space a stack has left over.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spacer;

impl View for Spacer {
    fn name(&self) -> &'static str {
        "Spacer"
    }

    fn flexibility(&self) -> Flexibility {
        Flexibility::new(Flex::VeryHigh, Flex::VeryHigh)
    }

    fn create(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        Some(cx.obtain(&self.path(path), || WidgetKind::Spacer))
    }

    fn measure(&self, path: &str, _proposed: Size, cx: &mut Context) -> Option<WidgetRef> {
        let widget = cx.query(&self.path(path))?;
        widget.borrow_mut().reset_frame(Vector2::zero());
        Some(widget)
    }
}

/// A hairline separator. Stacks stretch it across their cross axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct Divider;

impl View for Divider {
    fn name(&self) -> &'static str {
        "Divider"
    }

    fn flexibility(&self) -> Flexibility {
        Flexibility::new(Flex::VeryLow, Flex::VeryLow)
    }

    fn role(&self) -> Role {
        Role::Divider
    }

    fn create(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        let widget = cx.obtain(&self.path(path), || WidgetKind::Divider);
        widget.borrow_mut().background = Color::SEPARATOR;
        Some(widget)
    }

    fn measure(&self, path: &str, _proposed: Size, cx: &mut Context) -> Option<WidgetRef> {
        let widget = cx.query(&self.path(path))?;
        widget.borrow_mut().reset_frame(Vector2::zero());
        Some(widget)
    }
}
