//! Built-in descriptors.

mod conditional;
mod control;
mod embed;
mod image;
mod scroll;
mod shape;
mod spacer;
mod stack;
mod text;

pub use conditional::*;
pub use control::*;
pub use embed::*;
pub use image::*;
pub use scroll::*;
pub use shape::*;
pub use spacer::*;
pub use stack::*;
pub use text::*;

use crate::context::Context;
use crate::view::{join, AnyView, View};
use crate::widget::{WidgetKind, WidgetRef};

/// Expands a collection into one view per item.
pub fn for_each<I, F, V>(items: I, mut f: F) -> Vec<AnyView>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> V,
    V: View + 'static,
{
    items
        .into_iter()
        .map(|item| Box::new(f(item)) as AnyView)
        .collect()
}

/// Obtains a container widget at `own` and creates each child beneath it.
fn create_container(own: &str, children: &[AnyView], cx: &mut Context) -> WidgetRef {
    let widget = cx.obtain(own, || WidgetKind::Container);
    widget.borrow_mut().remove_all_subviews();
    for (index, child) in children.iter().enumerate() {
        if let Some(subview) = child.create(&join(own, index), cx) {
            widget.borrow_mut().add_subview(subview);
        }
    }
    widget
}

fn finalize_children(own: &str, children: &[AnyView], cx: &mut Context) -> Option<WidgetRef> {
    for (index, child) in children.iter().enumerate() {
        child.finalize_transform(&join(own, index), cx);
    }
    cx.query(own)
}
