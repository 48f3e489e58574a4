//! Image memoization and background loading.
//!
//! Loading is delegated to an [`ImageLoader`] collaborator. Named images resolve synchronously;
//! file and URL sources load on a worker thread and report back to the host through its message
//! channel, which applies the result on the UI thread.

use crate::context::Message;
use crate::geometry::Size;
use cgmath::Vector2;
use crossbeam::channel::Sender;
use log::{debug, trace, warn};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use thiserror::Error;

/// A decoded image.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixels per point.
    pub scale: f64,
    /// RGBA8 pixel data.
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Creates a transparent bitmap.
    pub fn new(width: u32, height: u32, scale: f64) -> Bitmap {
        Bitmap {
            width,
            height,
            scale,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Size in points.
    pub fn size(&self) -> Size {
        let scale = if self.scale > 0. { self.scale } else { 1. };
        Vector2::new(self.width as f64 / scale, self.height as f64 / scale)
    }
}

/// Where an image comes from. Also the memoization key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageSource {
    /// A bundled asset.
    Named(String),
    File(PathBuf),
    Url(String),
}

impl ImageSource {
    /// Returns true if this source must be loaded off the UI thread.
    pub fn is_async(&self) -> bool {
        match self {
            ImageSource::Named(_) => false,
            ImageSource::File(_) | ImageSource::Url(_) => true,
        }
    }
}

/// Image loading errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("no image found for {0:?}")]
    NotFound(ImageSource),
    #[error("unsupported image source {0:?}")]
    Unsupported(ImageSource),
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("image load was cancelled")]
    Cancelled,
}

/// Resolves image sources to bitmaps.
///
/// Called from worker threads for asynchronous sources.
pub trait ImageLoader: Send + Sync {
    fn load(&self, source: &ImageSource) -> Result<Bitmap, LoadError>;
}

/// A loader that knows no images.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLoader;

impl ImageLoader for NoLoader {
    fn load(&self, source: &ImageSource) -> Result<Bitmap, LoadError> {
        Err(LoadError::Unsupported(source.clone()))
    }
}

/// Memoized images, shared with loader threads.
#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    images: Arc<Mutex<HashMap<ImageSource, Arc<Bitmap>>>>,
}

impl ImageCache {
    pub fn new() -> ImageCache {
        ImageCache::default()
    }

    pub fn get(&self, source: &ImageSource) -> Option<Arc<Bitmap>> {
        self.images.lock().get(source).cloned()
    }

    pub fn insert(&self, source: ImageSource, bitmap: Arc<Bitmap>) {
        self.images.lock().insert(source, bitmap);
    }

    pub fn len(&self) -> usize {
        self.images.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.lock().is_empty()
    }

    /// Drops every memoized image.
    pub fn clear(&self) {
        let mut images = self.images.lock();
        debug!("clearing {} memoized images", images.len());
        images.clear();
    }
}

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

/// A handle on a background image load.
///
/// Cancelling only marks the task; a cancelled task never reports its result.
#[derive(Debug, Clone)]
pub struct LoadTask {
    id: u64,
    source: ImageSource,
    cancelled: Arc<AtomicBool>,
}

impl LoadTask {
    fn new(source: ImageSource) -> LoadTask {
        LoadTask {
            id: NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed),
            source,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            trace!("cancelled image load {} for {:?}", self.id, self.source);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Starts loading `source` on a worker thread.
///
/// The result is memoized and sent as [`Message::ImageLoaded`] for the widget at `path`.
pub(crate) fn spawn_load(
    loader: Arc<dyn ImageLoader>,
    cache: ImageCache,
    source: ImageSource,
    path: String,
    sender: Sender<Message>,
) -> Option<LoadTask> {
    let task = LoadTask::new(source);
    let worker_task = task.clone();

    let spawned = thread::Builder::new()
        .name(format!("image-load-{}", task.id))
        .spawn(move || {
            if worker_task.is_cancelled() {
                return;
            }
            let result = loader.load(&worker_task.source).map(Arc::new);
            // a cancelled load must not refill a cache that was just cleared
            if worker_task.is_cancelled() {
                debug!("discarding cancelled image load {}", worker_task.id);
                return;
            }
            if let Ok(bitmap) = &result {
                cache.insert(worker_task.source.clone(), Arc::clone(bitmap));
            }
            let _ = sender.send(Message::ImageLoaded {
                path,
                task: worker_task.id,
                result,
            });
        });

    match spawned {
        Ok(_) => Some(task),
        Err(err) => {
            warn!("could not spawn image loader thread: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel;
    use std::time::Duration;

    struct Solid;

    impl ImageLoader for Solid {
        fn load(&self, source: &ImageSource) -> Result<Bitmap, LoadError> {
            match source {
                ImageSource::Url(_) => Ok(Bitmap::new(4, 2, 1.)),
                _ => Err(LoadError::NotFound(source.clone())),
            }
        }
    }

    #[test]
    fn test_background_load_memoizes() {
        let cache = ImageCache::new();
        let (sender, receiver) = channel::unbounded();
        let source = ImageSource::Url("https://example.com/a.png".into());

        let task = spawn_load(
            Arc::new(Solid),
            cache.clone(),
            source.clone(),
            "/0".into(),
            sender,
        )
        .unwrap();

        match receiver.recv_timeout(Duration::from_secs(5)).unwrap() {
            Message::ImageLoaded { path, task: id, result } => {
                assert_eq!(path, "/0");
                assert_eq!(id, task.id());
                assert_eq!(result.unwrap().size(), Vector2::new(4., 2.));
            }
            other => panic!("unexpected message {:?}", other),
        }
        assert!(cache.get(&source).is_some());
    }

    /// Blocks in `load` until the test lets it through.
    struct Gated(channel::Receiver<()>);

    impl ImageLoader for Gated {
        fn load(&self, _: &ImageSource) -> Result<Bitmap, LoadError> {
            let _ = self.0.recv();
            Ok(Bitmap::new(1, 1, 1.))
        }
    }

    #[test]
    fn test_cancelled_load_is_not_memoized() {
        let cache = ImageCache::new();
        let (sender, receiver) = channel::unbounded();
        let (release, gate) = channel::bounded(1);
        let loader = Arc::new(Gated(gate));
        let source = ImageSource::Url("https://example.com/a.png".into());

        let task = spawn_load(
            Arc::clone(&loader) as Arc<dyn ImageLoader>,
            cache.clone(),
            source.clone(),
            "/0".into(),
            sender,
        )
        .unwrap();
        task.cancel();
        release.send(()).unwrap();

        // the worker drops its loader when it exits
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while Arc::strong_count(&loader) > 1 && std::time::Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(Arc::strong_count(&loader), 1);
        assert!(cache.get(&source).is_none());
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_load_error_message() {
        let err = Solid.load(&ImageSource::Named("x".into())).unwrap_err();
        assert_eq!(err.to_string(), "no image found for Named(\"x\")");
    }
}
