use crate::context::Context;
use crate::geometry::Size;
use crate::images::{Bitmap, ImageSource};
use crate::layout::{Flex, Flexibility};
use crate::view::View;
use crate::widget::{ImageView, WidgetKind, WidgetRef};
use log::trace;
use std::path::PathBuf;
use std::sync::Arc;

/// What an [`Image`] shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageContent {
    /// An already decoded bitmap.
    Bitmap(Arc<Bitmap>),
    /// A source resolved through the host's image loader.
    Source(ImageSource),
}

/// An image.
///
/// Named sources resolve while the widget is created. File and URL sources show the placeholder
/// until a background load finishes; the host then applies the image and lays out again.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub content: ImageContent,
    pub placeholder: Option<Arc<Bitmap>>,
    pub highlighted: Option<Arc<Bitmap>>,
    pub max_width: f64,
    pub transition: bool,
}

impl Image {
    fn with_content(content: ImageContent) -> Image {
        Image {
            content,
            placeholder: None,
            highlighted: None,
            max_width: 0.,
            transition: false,
        }
    }

    pub fn bitmap(bitmap: Arc<Bitmap>) -> Image {
        Image::with_content(ImageContent::Bitmap(bitmap))
    }

    pub fn named(name: &str) -> Image {
        Image::with_content(ImageContent::Source(ImageSource::Named(name.to_string())))
    }

    pub fn file<P: Into<PathBuf>>(path: P) -> Image {
        Image::with_content(ImageContent::Source(ImageSource::File(path.into())))
    }

    pub fn url(url: &str) -> Image {
        Image::with_content(ImageContent::Source(ImageSource::Url(url.to_string())))
    }

    pub fn placeholder(mut self, placeholder: Arc<Bitmap>) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn highlighted(mut self, highlighted: Arc<Bitmap>) -> Self {
        self.highlighted = Some(highlighted);
        self
    }

    /// Scales the image down to at most `max_width` points wide.
    pub fn max_width(mut self, max_width: f64) -> Self {
        self.max_width = max_width;
        self
    }

    /// Fades the image in once it has loaded.
    pub fn transition(mut self, transition: bool) -> Self {
        self.transition = transition;
        self
    }

    fn apply_source(&self, image: &mut ImageView, source: &ImageSource, own: &str, cx: &Context) {
        if image.source.as_ref() == Some(source)
            && (image.image.is_some() || image.task.is_some())
        {
            return;
        }

        image.cancel();
        image.source = Some(source.clone());
        image.image = None;

        if !source.is_async() {
            image.image = cx.load_image_now(source);
        } else if let Some(bitmap) = cx.images().get(source) {
            trace!("memoized image for {:?}", source);
            image.image = Some(bitmap);
        } else {
            image.task = cx.load_image(source, own);
        }
    }
}

impl View for Image {
    fn name(&self) -> &'static str {
        "Image"
    }

    fn flexibility(&self) -> Flexibility {
        Flexibility::new(Flex::Low, Flex::Low)
    }

    fn create(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        let own = self.path(path);
        let widget = cx.obtain(&own, || WidgetKind::Image(ImageView::new()));
        if let WidgetKind::Image(image) = &mut widget.borrow_mut().kind {
            image.placeholder = self.placeholder.clone();
            image.highlighted = self.highlighted.clone();
            image.max_width = self.max_width;
            image.transition = self.transition;

            match &self.content {
                ImageContent::Bitmap(bitmap) => {
                    image.cancel();
                    image.source = None;
                    image.image = Some(Arc::clone(bitmap));
                }
                ImageContent::Source(source) => self.apply_source(image, source, &own, cx),
            }
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
