//! Declarative views laid out onto a retained tree of native widgets.
//!
//! Views are cheap descriptions rebuilt on every render; a [`Host`] creates or reuses one widget
//! per structural path, measures the tree, and then applies cosmetic transforms.

pub mod backend;
pub mod cache;
pub mod color;
mod config;
mod context;
pub mod events;
pub mod geometry;
mod host;
pub mod images;
pub mod layout;
pub mod modifier;
#[cfg(test)]
mod testing;
#[macro_use]
mod view;
pub mod views;
pub mod widget;

pub use backend::{HeadlessSurface, Surface};
pub use config::Config;
pub use context::Context;
pub use host::{Animation, Completion, Host, RenderState};
pub use modifier::ViewExt;
pub use view::{join, AnyView, Role, View};
