//! The platform surface a host renders into.

use crate::context::Message;
use crate::geometry::{EdgeInsets, Rect, Size};
use crate::host::Animation;
use crate::widget::WidgetRef;
use cgmath::{EuclideanSpace, Point2};
use core::fmt;
use crossbeam::channel::Sender;
use std::rc::Rc;
use thiserror::Error;

/// A platform view hosting the widget tree.
pub trait Surface {
    /// Error type.
    type Error: fmt::Debug + fmt::Display;

    /// Bounds of the surface.
    fn bounds(&self) -> Rect;

    /// Insets covered by system chrome.
    fn safe_area_insets(&self) -> EdgeInsets;

    /// Pixels per point.
    fn display_scale(&self) -> f64 {
        1.
    }

    /// Adds a top-level widget.
    fn attach(&mut self, widget: &WidgetRef) -> Result<(), Self::Error>;

    /// Removes every top-level widget.
    fn detach_all(&mut self) -> Result<(), Self::Error>;

    /// Opens an animation block; changes until the matching commit are animated.
    fn begin_animation(&mut self, animation: &Animation) -> Result<(), Self::Error>;

    /// Closes the animation block. The surface finishes `completion` once the animation ends.
    fn commit_animation(&mut self, completion: CompletionHandle) -> Result<(), Self::Error>;

    /// Registers the host's notifier; the surface calls it whenever its bounds change.
    fn subscribe(&mut self, notifier: Notifier);
}

/// Lets a surface wake its host.
#[derive(Clone)]
pub struct Notifier {
    sender: Sender<Message>,
}

impl Notifier {
    pub(crate) fn new(sender: Sender<Message>) -> Notifier {
        Notifier { sender }
    }

    /// The host will lay out again on its next poll.
    pub fn bounds_changed(&self) {
        let _ = self.sender.send(Message::BoundsChanged);
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Notifier")
    }
}

/// The sending half of a [`Completion`](crate::host::Completion).
#[derive(Debug)]
pub struct CompletionHandle {
    sender: Sender<bool>,
}

impl CompletionHandle {
    pub(crate) fn new(sender: Sender<bool>) -> CompletionHandle {
        CompletionHandle { sender }
    }

    /// Reports the end of an animation; `finished` is false if it was interrupted.
    pub fn finish(self, finished: bool) {
        let _ = self.sender.send(finished);
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeadlessError {
    #[error("animation committed without a matching begin")]
    UnbalancedAnimation,
    #[error("animation block already open")]
    NestedAnimation,
}

/// An in-memory surface.
///
/// Keeps track of attached widgets and committed animations, and finishes every animation as
/// soon as it is committed.
#[derive(Debug)]
pub struct HeadlessSurface {
    bounds: Rect,
    safe_area_insets: EdgeInsets,
    display_scale: f64,
    attached: Vec<WidgetRef>,
    open_animation: Option<Animation>,
    animations: Vec<Animation>,
    notifier: Option<Notifier>,
}

impl HeadlessSurface {
    pub fn new(size: Size) -> HeadlessSurface {
        HeadlessSurface {
            bounds: Rect::new(Point2::origin(), size),
            safe_area_insets: EdgeInsets::ZERO,
            display_scale: 1.,
            attached: Vec::new(),
            open_animation: None,
            animations: Vec::new(),
            notifier: None,
        }
    }

    pub fn with_safe_area_insets(mut self, insets: EdgeInsets) -> Self {
        self.safe_area_insets = insets;
        self
    }

    pub fn with_display_scale(mut self, scale: f64) -> Self {
        self.display_scale = scale;
        self
    }

    /// Resizes the surface and notifies the host.
    pub fn set_bounds(&mut self, bounds: Rect) {
        if bounds == self.bounds {
            return;
        }
        self.bounds = bounds;
        if let Some(notifier) = &self.notifier {
            notifier.bounds_changed();
        }
    }

    pub fn attached(&self) -> &[WidgetRef] {
        &self.attached
    }

    /// Returns true if `widget` is attached at the top level.
    pub fn is_attached(&self, widget: &WidgetRef) -> bool {
        self.attached.iter().any(|w| Rc::ptr_eq(w, widget))
    }

    /// Animations committed so far.
    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }
}

impl Surface for HeadlessSurface {
    type Error = HeadlessError;

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn safe_area_insets(&self) -> EdgeInsets {
        self.safe_area_insets
    }

    fn display_scale(&self) -> f64 {
        self.display_scale
    }

    fn attach(&mut self, widget: &WidgetRef) -> Result<(), HeadlessError> {
        self.attached.push(Rc::clone(widget));
        Ok(())
    }

    fn detach_all(&mut self) -> Result<(), HeadlessError> {
        self.attached.clear();
        Ok(())
    }

    fn begin_animation(&mut self, animation: &Animation) -> Result<(), HeadlessError> {
        if self.open_animation.is_some() {
            return Err(HeadlessError::NestedAnimation);
        }
        self.open_animation = Some(*animation);
        Ok(())
    }

    fn commit_animation(&mut self, completion: CompletionHandle) -> Result<(), HeadlessError> {
        match self.open_animation.take() {
            Some(animation) => {
                self.animations.push(animation);
                completion.finish(true);
                Ok(())
            }
            None => Err(HeadlessError::UnbalancedAnimation),
        }
    }

    fn subscribe(&mut self, notifier: Notifier) {
        self.notifier = Some(notifier);
    }
}
