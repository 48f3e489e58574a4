use crate::backend::{CompletionHandle, Notifier, Surface};
use crate::config::Config;
use crate::context::{Context, Message};
use crate::geometry::{EdgeInsets, Rect, Size};
use crate::images::{ImageLoader, LoadTask};
use crate::view::{AnyView, View};
use crate::widget::{WidgetKind, WidgetRef};
use cgmath::{EuclideanSpace, Point2, Vector2, Zero};
use core::cell::Cell;
use crossbeam::channel::{self, Receiver, RecvTimeoutError, TryRecvError};
use log::{debug, log_enabled, trace, warn, Level};
use std::sync::Arc;
use std::time::Duration;

/// Timing curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animation {
    /// No animation; renders synchronously.
    None,
    Linear { duration: f64 },
    EaseIn { duration: f64 },
    EaseInOut { duration: f64 },
    EaseOut { duration: f64 },
    Spring {
        duration: f64,
        damping: f64,
        initial_velocity: f64,
    },
}

impl Animation {
    pub fn linear(config: &Config) -> Animation {
        Animation::Linear {
            duration: config.default_animation_duration,
        }
    }

    pub fn ease_in(config: &Config) -> Animation {
        Animation::EaseIn {
            duration: config.default_animation_duration,
        }
    }

    pub fn ease_in_out(config: &Config) -> Animation {
        Animation::EaseInOut {
            duration: config.default_animation_duration,
        }
    }

    pub fn ease_out(config: &Config) -> Animation {
        Animation::EaseOut {
            duration: config.default_animation_duration,
        }
    }

    pub fn spring(config: &Config) -> Animation {
        Animation::Spring {
            duration: config.default_animation_duration,
            damping: config.spring_damping,
            initial_velocity: config.spring_initial_velocity,
        }
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        match *self {
            Animation::None => 0.,
            Animation::Linear { duration }
            | Animation::EaseIn { duration }
            | Animation::EaseInOut { duration }
            | Animation::EaseOut { duration }
            | Animation::Spring { duration, .. } => duration,
        }
    }
}

/// Signals the end of an animated render.
#[derive(Debug)]
pub struct Completion {
    receiver: Receiver<bool>,
    result: Cell<Option<bool>>,
}

fn completion() -> (CompletionHandle, Completion) {
    let (sender, receiver) = channel::bounded(1);
    let completion = Completion {
        receiver,
        result: Cell::new(None),
    };
    (CompletionHandle::new(sender), completion)
}

impl Completion {
    /// Returns whether the animation finished, or `None` while it is still running.
    ///
    /// A handle dropped without reporting counts as interrupted.
    pub fn try_finished(&self) -> Option<bool> {
        if self.result.get().is_none() {
            match self.receiver.try_recv() {
                Ok(finished) => self.result.set(Some(finished)),
                Err(TryRecvError::Disconnected) => self.result.set(Some(false)),
                Err(TryRecvError::Empty) => (),
            }
        }
        self.result.get()
    }

    /// Blocks until the animation ends.
    pub fn wait(&self) -> bool {
        if let Some(finished) = self.result.get() {
            return finished;
        }
        let finished = self.receiver.recv().unwrap_or(false);
        self.result.set(Some(finished));
        finished
    }

    /// Blocks until the animation ends or `timeout` passes.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<bool> {
        if self.result.get().is_none() {
            match self.receiver.recv_timeout(timeout) {
                Ok(finished) => self.result.set(Some(finished)),
                Err(RecvTimeoutError::Disconnected) => self.result.set(Some(false)),
                Err(RecvTimeoutError::Timeout) => (),
            }
        }
        self.result.get()
    }
}

/// Phases of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Idle,
    /// Widgets are being created.
    Rendering,
    /// Sizes are resolved; transforms are being applied.
    Measured,
}

/// Renders a view tree onto a surface.
///
/// The host owns the identity cache and image memoization, so several hosts never share widgets.
pub struct Host<S: Surface> {
    surface: S,
    cx: Context,
    config: Config,
    root: Option<AnyView>,
    state: RenderState,
}

impl<S: Surface> Host<S> {
    /// Creates a new host with the default configuration.
    ///
    /// Nothing is shown until you call `render`.
    pub fn new(surface: S) -> Host<S> {
        Host::with_config(surface, Config::default())
    }

    pub fn with_config(mut surface: S, config: Config) -> Host<S> {
        let cx = Context::new();
        surface.subscribe(Notifier::new(cx.sender()));

        let mut host = Host {
            surface,
            cx,
            config,
            root: None,
            state: RenderState::Idle,
        };
        host.sync_surface();
        host
    }

    /// Replaces the image loader.
    pub fn with_image_loader<L: ImageLoader + 'static>(mut self, loader: L) -> Self {
        self.cx.set_loader(Arc::new(loader));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Toggles whether layout uses the full surface, and lays out again.
    pub fn set_ignore_safe_area_insets(&mut self, ignore: bool) {
        if self.config.ignore_safe_area_insets != ignore {
            self.config.ignore_safe_area_insets = ignore;
            self.layout();
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn context(&self) -> &Context {
        &self.cx
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Returns the widget bound to `path`.
    pub fn query(&self, path: &str) -> Option<WidgetRef> {
        self.cx.query(path)
    }

    /// Returns the root view's widget.
    pub fn root_widget(&self) -> Option<WidgetRef> {
        self.root.as_ref()?.lookup("", &self.cx)
    }

    /// Size of the rendered root widget.
    pub fn intrinsic_size(&self) -> Size {
        self.root_widget()
            .map_or_else(Vector2::zero, |widget| widget.borrow().frame.size)
    }

    fn sync_surface(&mut self) {
        self.cx.set_safe_area_insets(self.surface.safe_area_insets());
        self.cx.set_display_scale(self.surface.display_scale());
    }

    /// Renders `view`, replacing whatever was shown.
    ///
    /// With `reload`, every cached widget and memoized image is dropped first, so nothing from
    /// earlier renders is reused. Widgets whose paths the new tree no longer visits are dropped
    /// afterwards. `None` leaves the surface empty.
    pub fn render(&mut self, view: Option<AnyView>, reload: bool) {
        trace!("render (reload: {})", reload);
        self.state = RenderState::Rendering;

        if let Err(err) = self.surface.detach_all() {
            warn!("failed to detach widgets: {}", err);
        }
        if reload {
            debug!("reloading: dropping cached widgets and images");
            self.cx.clear();
        }
        self.root = None;
        self.sync_surface();

        self.cx.begin_pass();
        let view = match view {
            Some(view) => view,
            None => {
                self.cx.end_pass();
                self.state = RenderState::Idle;
                return;
            }
        };

        let widget = view.create("", &mut self.cx);
        self.cx.end_pass();
        self.root = Some(view);
        if let Some(widget) = widget {
            if let Err(err) = self.surface.attach(&widget) {
                warn!("failed to attach root widget: {}", err);
            }
        }

        self.layout();
    }

    /// Renders the current view again from scratch.
    pub fn reload(&mut self) {
        let root = self.root.take();
        self.render(root, true);
    }

    /// Renders `view` inside an animation block.
    ///
    /// Widgets that keep their path animate from their old geometry; new widgets just appear.
    pub fn animated_render(&mut self, view: Option<AnyView>, animation: Animation) -> Completion {
        let (handle, completion) = completion();
        if animation == Animation::None {
            self.render(view, false);
            handle.finish(true);
            return completion;
        }

        if let Err(err) = self.surface.begin_animation(&animation) {
            warn!("failed to begin animation: {}", err);
            self.render(view, false);
            handle.finish(false);
            return completion;
        }

        self.render(view, false);

        if let Err(err) = self.surface.commit_animation(handle) {
            warn!("failed to commit animation: {}", err);
        }
        completion
    }

    /// Measures the root within the available bounds, centers it, and applies transforms.
    pub fn layout(&mut self) {
        if self.root.is_none() {
            self.state = RenderState::Idle;
            return;
        }
        self.sync_surface();

        let insets = if self.config.ignore_safe_area_insets {
            EdgeInsets::ZERO
        } else {
            self.cx.safe_area_insets()
        };
        let bounds = Rect::new(Point2::origin(), self.surface.bounds().size);
        let available = bounds.inset_by(insets).size;
        trace!("layout in {:?}", available);

        let view = match &self.root {
            Some(view) => view,
            None => return,
        };

        if let Some(widget) = view.measure("", available, &mut self.cx) {
            let mut widget = widget.borrow_mut();
            let size = widget.frame.size;
            widget.frame.origin = Point2::new(
                insets.leading + (available.x - size.x) / 2.,
                insets.top + (available.y - size.y) / 2.,
            );
        }
        self.state = RenderState::Measured;

        let root = view.finalize_transform("", &mut self.cx);

        if self.config.dump_tree && log_enabled!(Level::Trace) {
            if let Some(root) = root {
                let mut out = String::new();
                root.borrow().dump(0, &mut out);
                trace!("widget tree:\n{}", out);
            }
        }
        self.state = RenderState::Idle;
    }

    /// Handles everything queued by loaders and the surface, laying out again if needed.
    ///
    /// Returns true if a layout pass ran.
    pub fn poll(&mut self) -> bool {
        self.drain(None)
    }

    /// Like `poll`, but waits up to `timeout` for the first message.
    pub fn poll_timeout(&mut self, timeout: Duration) -> bool {
        match self.cx.receiver().recv_timeout(timeout) {
            Ok(message) => self.drain(Some(message)),
            Err(_) => false,
        }
    }

    fn drain(&mut self, first: Option<Message>) -> bool {
        let mut relayout = match first {
            Some(message) => self.handle_message(message),
            None => false,
        };
        loop {
            match self.cx.receiver().try_recv() {
                Ok(message) => relayout |= self.handle_message(message),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        if relayout {
            self.layout();
        }
        relayout
    }

    fn handle_message(&mut self, message: Message) -> bool {
        match message {
            Message::BoundsChanged => {
                trace!("surface bounds changed");
                true
            }
            Message::Relayout => true,
            Message::ImageLoaded { path, task, result } => {
                let widget = match self.cx.query(&path) {
                    Some(widget) => widget,
                    None => {
                        debug!("dropping image for {:?}: widget is gone", path);
                        return false;
                    }
                };
                let mut widget = widget.borrow_mut();
                let image = match &mut widget.kind {
                    WidgetKind::Image(image) => image,
                    _ => return false,
                };
                if image.task.as_ref().map(LoadTask::id) != Some(task) {
                    debug!("ignoring stale image load {} for {:?}", task, path);
                    return false;
                }
                image.task = None;
                match result {
                    Ok(bitmap) => {
                        debug!("image loaded for {:?}", path);
                        image.image = Some(bitmap);
                        true
                    }
                    Err(err) => {
                        warn!("image load for {:?} failed: {}", path, err);
                        false
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessSurface;
    use crate::color::Color;
    use crate::geometry::EdgeInsets;
    use crate::images::Bitmap;
    use crate::modifier::ViewExt;
    use crate::testing::{headless_host, init_logger, MemoryLoader, Probe};
    use crate::views::{HStack, IfElse, Image, Shape, Text, VStack};
    use crate::widget::WidgetKind;
    use std::rc::Rc;
    use std::sync::atomic::Ordering;
    use std::time::Instant;

    fn tree() -> AnyView {
        VStack::new(crate::views![Text::new("a"), Text::new("b").padding(4.)]).into_any()
    }

    fn image_task(host: &Host<HeadlessSurface>, path: &str) -> Option<LoadTask> {
        let widget = host.query(path)?;
        let widget = widget.borrow();
        if let WidgetKind::Image(image) = &widget.kind {
            image.task.clone()
        } else {
            None
        }
    }

    fn image_size(host: &Host<HeadlessSurface>, path: &str) -> Size {
        host.query(path).expect("image widget").borrow().frame.size
    }

    #[test]
    fn test_widgets_keep_identity_across_renders() {
        let mut host = headless_host(320., 480.);
        host.render(Some(tree()), false);

        let mut paths: Vec<String> = host.context().cache().paths().map(String::from).collect();
        paths.sort();
        assert_eq!(
            paths,
            vec!["/VStack", "/VStack/0/Text", "/VStack/1/Padding", "/VStack/1/Padding/Text"]
        );
        let before: Vec<WidgetRef> = paths.iter().map(|p| host.query(p).unwrap()).collect();

        host.render(Some(tree()), false);
        assert_eq!(host.context().cache().len(), paths.len());
        for (path, widget) in paths.iter().zip(&before) {
            assert!(Rc::ptr_eq(widget, &host.query(path).unwrap()), "{} was replaced", path);
        }
        assert!(host.surface().is_attached(&host.query("/VStack").unwrap()));
        assert_eq!(host.surface().attached().len(), 1);
    }

    #[test]
    fn test_reuse_resets_transient_state() {
        let mut host = headless_host(200., 200.);
        host.render(
            Some(
                Text::new("a")
                    .opacity(0.3)
                    .border(2., Color::BLACK)
                    .on_tap(|| ())
                    .allows_hit_testing(false)
                    .into_any(),
            ),
            false,
        );
        let first = host.query("/Text").unwrap();
        {
            let widget = first.borrow();
            assert_eq!(widget.opacity, 0.3);
            assert_eq!(widget.gestures.len(), 1);
            assert!(!widget.interaction_enabled);
        }

        host.render(Some(Text::new("b").into_any()), false);
        let second = host.query("/Text").unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        let widget = second.borrow();
        assert_eq!(widget.opacity, 1.);
        assert_eq!(widget.border, None);
        assert!(widget.gestures.is_empty());
        assert!(widget.interaction_enabled);
        match &widget.kind {
            WidgetKind::Label(label) => assert_eq!(label.text, "b"),
            kind => panic!("unexpected kind {:?}", kind),
        }
    }

    #[test]
    fn test_reload_discards_cache() {
        let mut host = headless_host(200., 200.);
        host.render(Some(Text::new("a").into_any()), false);
        let first = host.query("/Text").unwrap();

        host.render(Some(Shape::rect().into_any()), true);
        assert!(host.query("/Text").is_none());
        assert!(host.query("/Shape").is_some());

        host.render(Some(Text::new("a").into_any()), false);
        assert!(!Rc::ptr_eq(&first, &host.query("/Text").unwrap()));

        let before = host.query("/Text").unwrap();
        host.reload();
        let after = host.query("/Text").unwrap();
        assert!(!Rc::ptr_eq(&before, &after));
        assert_eq!(host.context().cache().len(), 1);
    }

    #[test]
    fn test_render_nothing() {
        let mut host = headless_host(200., 200.);
        host.render(Some(Text::new("a").into_any()), false);
        host.render(None, false);
        assert!(host.surface().attached().is_empty());
        assert!(host.root_widget().is_none());
        assert_eq!(host.intrinsic_size(), Vector2::zero());
        assert_eq!(host.state(), RenderState::Idle);
        assert!(host.context().cache().is_empty());
    }

    #[test]
    fn test_shrinking_tree_drops_stale_widgets() {
        let mut host = headless_host(300., 100.);
        let row = |count: usize| {
            let children: Vec<AnyView> = (0..count)
                .map(|_| Probe::fixed(20., 20.).into_any())
                .collect();
            HStack::new(children).into_any()
        };

        host.render(Some(row(3)), false);
        assert_eq!(host.context().cache().len(), 4);
        let stack = host.query("/HStack").unwrap();
        let kept = host.query("/HStack/0/Probe").unwrap();

        host.render(Some(row(1)), false);
        assert!(host.query("/HStack/1/Probe").is_none());
        assert!(host.query("/HStack/2/Probe").is_none());
        assert_eq!(host.context().cache().len(), 2);
        assert!(Rc::ptr_eq(&stack, &host.query("/HStack").unwrap()));
        assert!(Rc::ptr_eq(&kept, &host.query("/HStack/0/Probe").unwrap()));
        assert_eq!(stack.borrow().subviews().len(), 1);
    }

    #[test]
    fn test_flipped_branch_is_dropped() {
        let mut host = headless_host(200., 200.);
        let view = |flag: bool| IfElse::new(flag, Text::new("yes")).otherwise(Shape::rect());

        host.render(Some(view(true).into_any()), false);
        assert!(host.query("/IfElse.then/Text").is_some());

        host.render(Some(view(false).into_any()), false);
        assert!(host.query("/IfElse.then/Text").is_none());
        assert!(host.query("/IfElse.else/Shape").is_some());
        assert_eq!(host.context().cache().len(), 1);
    }

    #[test]
    fn test_request_layout_runs_on_poll() {
        let mut host = headless_host(300., 300.);
        host.render(Some(Probe::fixed(100., 50.).into_any()), false);
        let widget = host.query("/Probe").unwrap();
        assert_eq!(widget.borrow().frame.origin, Point2::new(100., 125.));
        assert!(!host.poll());

        widget.borrow_mut().frame = Rect::from_xywh(0., 0., 1., 1.);
        host.context().request_layout();
        assert!(host.poll());
        assert_eq!(widget.borrow().frame, Rect::from_xywh(100., 125., 100., 50.));
        assert_eq!(host.state(), RenderState::Idle);
        assert!(!host.poll());
    }

    #[test]
    fn test_root_is_centered_in_safe_area() {
        init_logger();
        let surface = HeadlessSurface::new(Vector2::new(300., 300.))
            .with_safe_area_insets(EdgeInsets::new(20., 0., 10., 0.));
        let mut host = Host::new(surface);
        host.render(Some(Probe::fixed(100., 50.).into_any()), false);
        assert_eq!(
            host.query("/Probe").unwrap().borrow().frame.origin,
            Point2::new(100., 130.)
        );
        assert_eq!(host.intrinsic_size(), Vector2::new(100., 50.));

        host.set_ignore_safe_area_insets(true);
        assert_eq!(
            host.query("/Probe").unwrap().borrow().frame.origin,
            Point2::new(100., 125.)
        );
    }

    #[test]
    fn test_bounds_change_triggers_layout() {
        let mut host = headless_host(300., 300.);
        host.render(Some(Shape::rect().into_any()), false);
        assert_eq!(host.intrinsic_size(), Vector2::new(300., 300.));
        assert!(!host.poll());

        host.surface_mut()
            .set_bounds(Rect::new(Point2::origin(), Vector2::new(200., 100.)));
        assert!(host.poll());
        assert_eq!(host.intrinsic_size(), Vector2::new(200., 100.));
    }

    #[test]
    fn test_animated_render_completes() {
        let mut host = headless_host(200., 200.);
        let animation = Animation::spring(host.config());
        let completion = host.animated_render(Some(Text::new("a").into_any()), animation);
        assert_eq!(completion.try_finished(), Some(true));
        assert_eq!(host.surface().animations(), &[animation][..]);
        assert!(host.query("/Text").is_some());

        let completion = host.animated_render(Some(Text::new("b").into_any()), Animation::None);
        assert_eq!(completion.wait_timeout(Duration::from_secs(1)), Some(true));
        assert_eq!(host.surface().animations().len(), 1);
    }

    #[test]
    fn test_animation_defaults() {
        let config = Config::default();
        assert_eq!(Animation::ease_out(&config).duration(), 0.3);
        assert_eq!(
            Animation::spring(&config),
            Animation::Spring {
                duration: 0.3,
                damping: 0.825,
                initial_velocity: 0.55,
            }
        );
        assert_eq!(Animation::None.duration(), 0.);
    }

    #[test]
    fn test_named_images_resolve_immediately() {
        let mut host = headless_host(200., 200.).with_image_loader(MemoryLoader::default());
        host.render(Some(Image::named("logo").into_any()), false);
        assert_eq!(image_size(&host, "/Image"), Vector2::new(8., 4.));

        host.render(Some(Image::named("missing-logo").into_any()), false);
        assert_eq!(image_size(&host, "/Image"), Vector2::zero());
    }

    #[test]
    fn test_async_image_loads_and_relayouts() {
        let loader = Arc::new(MemoryLoader::default());
        let mut host = headless_host(200., 200.).with_image_loader(Arc::clone(&loader));
        let placeholder = Arc::new(Bitmap::new(2, 2, 1.));
        let view = || {
            Image::url("https://example.com/a.png")
                .placeholder(Arc::clone(&placeholder))
                .into_any()
        };

        host.render(Some(view()), false);
        assert_eq!(image_size(&host, "/Image"), Vector2::new(2., 2.));
        assert!(image_task(&host, "/Image").is_some());

        let deadline = Instant::now() + Duration::from_secs(5);
        while image_task(&host, "/Image").is_some() && Instant::now() < deadline {
            host.poll_timeout(Duration::from_millis(50));
        }
        assert_eq!(image_size(&host, "/Image"), Vector2::new(8., 4.));
        assert_eq!(host.context().images().len(), 1);

        // same source again: nothing to do
        host.render(Some(view()), false);
        assert!(image_task(&host, "/Image").is_none());

        // a new widget for a memoized source is filled in right away
        host.render(Some(VStack::new(crate::views![view()]).into_any()), false);
        assert!(image_task(&host, "/VStack/0/Image").is_none());
        assert_eq!(image_size(&host, "/VStack/0/Image"), Vector2::new(8., 4.));
        assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_changing_source_cancels_load() {
        let mut host = headless_host(200., 200.).with_image_loader(MemoryLoader::default());
        host.render(Some(Image::url("https://example.com/a.png").into_any()), false);
        let first = image_task(&host, "/Image").expect("pending load");

        host.render(Some(Image::url("https://example.com/b.png").into_any()), false);
        assert!(first.is_cancelled());
        let second = image_task(&host, "/Image").expect("pending load");
        assert_ne!(first.id(), second.id());

        let deadline = Instant::now() + Duration::from_secs(5);
        while image_task(&host, "/Image").is_some() && Instant::now() < deadline {
            host.poll_timeout(Duration::from_millis(50));
        }
        assert_eq!(image_size(&host, "/Image"), Vector2::new(8., 4.));

        host.render(Some(Image::url("https://example.com/c.png").into_any()), false);
        let third = image_task(&host, "/Image").expect("pending load");
        host.reload();
        assert!(third.is_cancelled());
    }

    #[test]
    fn test_removed_image_cancels_load() {
        let mut host = headless_host(200., 200.).with_image_loader(MemoryLoader::default());
        host.render(
            Some(VStack::new(crate::views![Image::url("https://example.com/a.png")]).into_any()),
            false,
        );
        let task = image_task(&host, "/VStack/0/Image").expect("pending load");

        host.render(Some(VStack::new(Vec::new()).into_any()), false);
        assert!(task.is_cancelled());
        assert!(host.query("/VStack/0/Image").is_none());

        // whatever the worker already sent is dropped without a layout pass
        assert!(!host.poll_timeout(Duration::from_millis(100)));
    }
}
