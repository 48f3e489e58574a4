use crate::context::Context;
use crate::geometry::Size;
use crate::layout::{Flex, Flexibility};
use crate::view::View;
use crate::widget::{Label, TextInput, WidgetKind, WidgetRef};

/// A text label.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub text: String,
}

impl Text {
    pub fn new(text: &str) -> Text {
        Text {
            text: text.to_string(),
        }
    }
}

impl View for Text {
    fn name(&self) -> &'static str {
        "Text"
    }

    fn create(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        let widget = cx.obtain(&self.path(path), || WidgetKind::Label(Label::new("")));
        if let WidgetKind::Label(label) = &mut widget.borrow_mut().kind {
            *label = Label::new(&self.text);
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

/// An editable text input.
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    pub text: String,
    pub placeholder: String,
}

impl TextField {
    pub fn new(placeholder: &str, text: &str) -> TextField {
        TextField {
            text: text.to_string(),
            placeholder: placeholder.to_string(),
        }
    }
}

impl View for TextField {
    fn name(&self) -> &'static str {
        "TextField"
    }

    fn flexibility(&self) -> Flexibility {
        Flexibility::new(Flex::High, Flex::Low)
    }

    fn create(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        let widget = cx.obtain(&self.path(path), || WidgetKind::TextInput(TextInput::new("", "")));
        if let WidgetKind::TextInput(input) = &mut widget.borrow_mut().kind {
            *input = TextInput::new(&self.text, &self.placeholder);
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
