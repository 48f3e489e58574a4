//! Per-host state handed to every descriptor operation.

use crate::cache::WidgetCache;
use crate::geometry::EdgeInsets;
use crate::images::{
    self, Bitmap, ImageCache, ImageLoader, ImageSource, LoadError, LoadTask, NoLoader,
};
use crate::widget::{WidgetKind, WidgetRef};
use crossbeam::channel::{self, Receiver, Sender};
use log::{trace, warn};
use std::sync::Arc;

/// Messages delivered to the UI thread.
#[derive(Debug)]
pub(crate) enum Message {
    /// The surface bounds changed.
    BoundsChanged,
    /// Something asked for another layout pass.
    Relayout,
    /// A background image load finished.
    ImageLoaded {
        path: String,
        task: u64,
        result: Result<Arc<Bitmap>, LoadError>,
    },
}

/// Render context.
///
/// Owns the identity cache and image memoization for one host. Descriptor operations receive it
/// mutably; it is never shared between hosts.
pub struct Context {
    cache: WidgetCache,
    images: ImageCache,
    loader: Arc<dyn ImageLoader>,
    safe_area_insets: EdgeInsets,
    display_scale: f64,
    sender: Sender<Message>,
    receiver: Receiver<Message>,
}

impl Context {
    pub fn new() -> Context {
        let (sender, receiver) = channel::unbounded();
        Context {
            cache: WidgetCache::new(),
            images: ImageCache::new(),
            loader: Arc::new(NoLoader),
            safe_area_insets: EdgeInsets::ZERO,
            display_scale: 1.,
            sender,
            receiver,
        }
    }

    /// Returns the widget at `path`.
    pub fn query(&self, path: &str) -> Option<WidgetRef> {
        self.cache.query(path)
    }

    /// Returns the widget at `path` with its transient state reset.
    pub fn reuse(&mut self, path: &str) -> Option<WidgetRef> {
        self.cache.reuse(path)
    }

    /// Binds a widget to `path`.
    pub fn store(&mut self, widget: WidgetRef, path: &str) {
        self.cache.store(widget, path);
    }

    /// Reuses or creates the widget for `path`; see [`WidgetCache::obtain`].
    pub fn obtain<F: FnOnce() -> WidgetKind>(&mut self, path: &str, make: F) -> WidgetRef {
        self.cache.obtain(path, make)
    }

    pub fn cache(&self) -> &WidgetCache {
        &self.cache
    }

    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    /// Safe-area insets of the host surface.
    pub fn safe_area_insets(&self) -> EdgeInsets {
        self.safe_area_insets
    }

    /// Pixels per point of the host surface.
    pub fn display_scale(&self) -> f64 {
        self.display_scale
    }

    /// Asks the host to run another layout pass the next time it polls.
    pub fn request_layout(&self) {
        let _ = self.sender.send(Message::Relayout);
    }

    /// Resolves an image on the calling thread, consulting the memo cache first.
    pub fn load_image_now(&self, source: &ImageSource) -> Option<Arc<Bitmap>> {
        if let Some(bitmap) = self.images.get(source) {
            return Some(bitmap);
        }
        match self.loader.load(source) {
            Ok(bitmap) => {
                let bitmap = Arc::new(bitmap);
                self.images.insert(source.clone(), Arc::clone(&bitmap));
                Some(bitmap)
            }
            Err(err) => {
                warn!("failed to load image: {}", err);
                None
            }
        }
    }

    /// Starts a background load whose result will be applied to the image widget at `path`.
    pub fn load_image(&self, source: &ImageSource, path: &str) -> Option<LoadTask> {
        trace!("loading {:?} for {:?}", source, path);
        images::spawn_load(
            Arc::clone(&self.loader),
            self.images.clone(),
            source.clone(),
            path.to_string(),
            self.sender.clone(),
        )
    }

    pub(crate) fn set_loader(&mut self, loader: Arc<dyn ImageLoader>) {
        self.loader = loader;
    }

    pub(crate) fn set_safe_area_insets(&mut self, insets: EdgeInsets) {
        self.safe_area_insets = insets;
    }

    pub(crate) fn set_display_scale(&mut self, scale: f64) {
        self.display_scale = scale;
    }

    pub(crate) fn sender(&self) -> Sender<Message> {
        self.sender.clone()
    }

    pub(crate) fn receiver(&self) -> &Receiver<Message> {
        &self.receiver
    }

    /// Drops all cached widgets and memoized images.
    pub(crate) fn clear(&mut self) {
        self.cache.clear();
        self.images.clear();
    }

    pub(crate) fn begin_pass(&mut self) {
        self.cache.begin_pass();
    }

    /// Drops widgets whose paths were not visited since `begin_pass`.
    pub(crate) fn end_pass(&mut self) -> usize {
        self.cache.end_pass()
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}
