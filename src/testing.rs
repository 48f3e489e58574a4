//! Shared test helpers.

use crate::backend::HeadlessSurface;
use crate::context::Context;
use crate::geometry::{Rect, Size};
use crate::host::Host;
use crate::images::{Bitmap, ImageLoader, ImageSource, LoadError};
use crate::layout::{Flex, Flexibility};
use crate::view::View;
use crate::widget::{WidgetKind, WidgetRef};
use cgmath::Vector2;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A host over a headless surface of the given size.
pub fn headless_host(width: f64, height: f64) -> Host<HeadlessSurface> {
    init_logger();
    Host::new(HeadlessSurface::new(Vector2::new(width, height)))
}

/// A leaf with a natural size; flexible axes clamp it to the proposal.
#[derive(Debug, Clone)]
pub struct Probe {
    pub natural: Size,
    pub flexibility: Flexibility,
    pub priority: f64,
}

impl Probe {
    /// A probe that keeps its natural size whatever it is offered.
    pub fn fixed(width: f64, height: f64) -> Probe {
        Probe {
            natural: Vector2::new(width, height),
            flexibility: Flexibility::new(Flex::Low, Flex::Low),
            priority: 0.,
        }
    }

    /// A probe that takes whatever width it is offered.
    pub fn flexible(height: f64) -> Probe {
        Probe {
            natural: Vector2::new(f64::INFINITY, height),
            flexibility: Flexibility::new(Flex::High, Flex::Low),
            priority: 0.,
        }
    }

    /// A probe of the given natural width that gives way when offered less.
    pub fn yielding(width: f64, height: f64) -> Probe {
        Probe {
            natural: Vector2::new(width, height),
            flexibility: Flexibility::new(Flex::High, Flex::Low),
            priority: 0.,
        }
    }

    pub fn with_priority(mut self, priority: f64) -> Probe {
        self.priority = priority;
        self
    }
}

impl View for Probe {
    fn name(&self) -> &'static str {
        "Probe"
    }

    fn flexibility(&self) -> Flexibility {
        self.flexibility
    }

    fn priority(&self) -> f64 {
        self.priority
    }

    fn create(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        let natural = self.natural;
        let widget = cx.obtain(&self.path(path), || WidgetKind::Custom {
            name: "Probe",
            intrinsic: natural,
        });
        if let WidgetKind::Custom { intrinsic, .. } = &mut widget.borrow_mut().kind {
            *intrinsic = natural;
        }
        Some(widget)
    }

    fn measure(&self, path: &str, proposed: Size, cx: &mut Context) -> Option<WidgetRef> {
        let widget = cx.query(&self.path(path))?;
        // flexible axes give way to the proposal, rigid ones do not
        let fit = |flex: Flex, natural: f64, proposed: f64| {
            if flex >= Flex::High {
                natural.min(proposed)
            } else {
                natural
            }
        };
        let size = Vector2::new(
            fit(self.flexibility.horizontal, self.natural.x, proposed.x),
            fit(self.flexibility.vertical, self.natural.y, proposed.y),
        );
        widget.borrow_mut().reset_frame(size);
        Some(widget)
    }
}

/// Creates and measures `view` at the root path of a fresh context.
pub fn measure_root(view: &dyn View, width: f64, height: f64) -> (Context, WidgetRef) {
    init_logger();
    let mut cx = Context::new();
    view.create("", &mut cx);
    let widget = view
        .measure("", Vector2::new(width, height), &mut cx)
        .expect("root widget");
    view.finalize_transform("", &mut cx);
    (cx, widget)
}

/// Frame of the widget at `path`.
pub fn frame(cx: &Context, path: &str) -> Rect {
    cx.query(path)
        .unwrap_or_else(|| panic!("no widget at {:?}", path))
        .borrow()
        .frame
}

/// Serves 8×4 bitmaps for every source except names starting with `missing`.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    pub loads: AtomicUsize,
}

impl ImageLoader for MemoryLoader {
    fn load(&self, source: &ImageSource) -> Result<Bitmap, LoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        match source {
            ImageSource::Named(name) if name.starts_with("missing") => {
                Err(LoadError::NotFound(source.clone()))
            }
            _ => Ok(Bitmap::new(8, 4, 1.)),
        }
    }
}

impl ImageLoader for Arc<MemoryLoader> {
    fn load(&self, source: &ImageSource) -> Result<Bitmap, LoadError> {
        (**self).load(source)
    }
}
