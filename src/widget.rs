//! The retained native-widget model.
//!
//! A [`Widget`] is the live platform object a descriptor binds to. The layout engine mutates its
//! geometry fields directly; the platform surface mirrors the tree onto real controls. Widgets are
//! owned by the identity cache and by their superview; everything else holds a
//! [`WeakWidgetRef`].

use crate::color::Color;
use crate::events::{Gesture, Target};
use crate::geometry::{self, EdgeInsets, Rect, Size, Transform};
use crate::images::{Bitmap, ImageSource, LoadTask};
use cgmath::{EuclideanSpace, Point2, Vector2, Zero};
use core::fmt::{self, Write};
use core::mem;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use uuid::Uuid;

/// Average glyph advance as a fraction of the font size.
const GLYPH_ADVANCE: f64 = 0.5;
/// Line height as a multiple of the font size.
const LINE_HEIGHT: f64 = 1.2;
/// Default system font size.
pub const SYSTEM_FONT_SIZE: f64 = 17.;

pub type WidgetRef = Rc<RefCell<Widget>>;
pub type WeakWidgetRef = Weak<RefCell<Widget>>;

/// A unique identifier for a widget.
///
/// (this is just a UUID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(Uuid);

impl WidgetId {
    pub(crate) fn new() -> WidgetId {
        WidgetId(Uuid::new_v4())
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a widget scales its content into its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    ScaleToFill,
    ScaleAspectFit,
    ScaleAspectFill,
    Center,
}

/// Drop shadow parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub opacity: f64,
    pub radius: f64,
    pub offset: Vector2<f64>,
    pub color: Color,
}

/// Text styles with their preferred point sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStyle {
    LargeTitle,
    Title,
    Headline,
    Body,
    Callout,
    Subheadline,
    Footnote,
    Caption,
}

impl TextStyle {
    pub fn point_size(self) -> f64 {
        match self {
            TextStyle::LargeTitle => 34.,
            TextStyle::Title => 28.,
            TextStyle::Headline | TextStyle::Body => 17.,
            TextStyle::Callout => 16.,
            TextStyle::Subheadline => 15.,
            TextStyle::Footnote => 13.,
            TextStyle::Caption => 12.,
        }
    }
}

/// A font description.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Font family name; `None` is the system font.
    pub name: Option<String>,
    pub size: f64,
}

impl Font {
    pub fn system(size: f64) -> Font {
        Font { name: None, size }
    }

    pub fn named(name: &str, size: f64) -> Font {
        Font {
            name: Some(name.to_string()),
            size,
        }
    }

    pub fn style(style: TextStyle) -> Font {
        Font::system(style.point_size())
    }

    fn line_height(&self) -> f64 {
        (self.size * LINE_HEIGHT).ceil()
    }

    fn advance(&self) -> f64 {
        self.size * GLYPH_ADVANCE
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::system(SYSTEM_FONT_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlignment {
    Natural,
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardType {
    Default,
    Ascii,
    Numbers,
    Decimal,
    Url,
    Email,
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardAppearance {
    Default,
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKey {
    Default,
    Go,
    Next,
    Done,
    Search,
    Send,
}

/// Keyboard attributes of a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyboard {
    pub kind: KeyboardType,
    pub appearance: KeyboardAppearance,
    pub return_key: ReturnKey,
}

impl Default for Keyboard {
    fn default() -> Self {
        Keyboard {
            kind: KeyboardType::Default,
            appearance: KeyboardAppearance::Default,
            return_key: ReturnKey::Default,
        }
    }
}

/// A text label.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub font: Font,
    pub color: Color,
    pub highlighted_color: Option<Color>,
    pub alignment: TextAlignment,
    /// Maximum number of lines; zero means unlimited.
    pub line_limit: usize,
    pub minimum_scale_factor: f64,
    pub adjusts_font_size: bool,
}

impl Label {
    pub fn new(text: &str) -> Label {
        Label {
            text: text.to_string(),
            font: Font::default(),
            color: Color::BLACK,
            highlighted_color: None,
            alignment: TextAlignment::Natural,
            line_limit: 0,
            minimum_scale_factor: 1.,
            adjusts_font_size: false,
        }
    }

    /// Estimates the text size within `proposed`, wrapping onto further lines when the text is
    /// wider than the proposal.
    pub fn size_that_fits(&self, proposed: Size) -> Size {
        let natural = self.text.chars().count() as f64 * self.font.advance();
        if natural == 0. {
            return Vector2::zero();
        }

        let line_height = self.font.line_height();
        let max_width = proposed.x.max(0.);
        if natural <= max_width {
            return Vector2::new(natural.ceil(), line_height);
        }

        if self.adjusts_font_size && self.line_limit == 1 {
            let factor = (max_width / natural).max(self.minimum_scale_factor);
            return Vector2::new(
                (natural * factor).min(max_width).ceil(),
                (line_height * factor).ceil(),
            );
        }

        let mut lines = (natural / max_width.max(self.font.advance())).ceil();
        if self.line_limit > 0 {
            lines = lines.min(self.line_limit as f64);
        }
        Vector2::new(max_width, lines * line_height)
    }
}

/// An editable single-line text input.
#[derive(Debug, Clone, PartialEq)]
pub struct TextInput {
    pub text: String,
    pub placeholder: String,
    pub font: Font,
    pub color: Color,
    pub alignment: TextAlignment,
    pub secure: bool,
    pub keyboard: Keyboard,
}

impl TextInput {
    pub fn new(text: &str, placeholder: &str) -> TextInput {
        TextInput {
            text: text.to_string(),
            placeholder: placeholder.to_string(),
            font: Font::default(),
            color: Color::BLACK,
            alignment: TextAlignment::Natural,
            secure: false,
            keyboard: Keyboard::default(),
        }
    }

    /// Text inputs take the full proposed width and one line of height.
    pub fn size_that_fits(&self, proposed: Size) -> Size {
        Vector2::new(proposed.x.max(0.), self.font.line_height() + 8.)
    }
}

/// Corner treatment of an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageCorners {
    None,
    Rounded(f64),
    RoundedTop(f64),
    RoundedBottom(f64),
    Circle,
}

/// An image view, possibly waiting on a background load.
#[derive(Debug, Clone)]
pub struct ImageView {
    pub image: Option<Arc<Bitmap>>,
    pub highlighted: Option<Arc<Bitmap>>,
    pub placeholder: Option<Arc<Bitmap>>,
    /// Images wider than this are scaled down; zero disables the limit.
    pub max_width: f64,
    pub corners: ImageCorners,
    /// Whether a loaded image fades in.
    pub transition: bool,
    /// The source this view currently shows or is loading.
    pub source: Option<ImageSource>,
    /// Pending background load, if any.
    pub task: Option<LoadTask>,
}

impl ImageView {
    pub fn new() -> ImageView {
        ImageView {
            image: None,
            highlighted: None,
            placeholder: None,
            max_width: 0.,
            corners: ImageCorners::None,
            transition: false,
            source: None,
            task: None,
        }
    }

    /// Cancels the pending load, if there is one.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }

    /// The natural size of the displayed (or placeholder) image.
    pub fn size_that_fits(&self, _proposed: Size) -> Size {
        let bitmap = match self.image.as_ref().or_else(|| self.placeholder.as_ref()) {
            Some(bitmap) => bitmap,
            None => return Vector2::zero(),
        };
        let size = bitmap.size();
        if self.max_width > 0. && size.x > self.max_width && size.x > 0. {
            Vector2::new(self.max_width, size.y * self.max_width / size.x)
        } else {
            size
        }
    }
}

impl Default for ImageView {
    fn default() -> Self {
        ImageView::new()
    }
}

/// Outline of a shape widget.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapePath {
    Rect,
    RoundedRect(f64),
    Ellipse,
    /// A closed polygon in unit coordinates (scaled to the widget bounds when drawn).
    Polygon(Vec<Point2<f64>>),
}

/// A vector shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeView {
    pub path: ShapePath,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub line_width: f64,
}

impl ShapeView {
    pub fn new(path: ShapePath) -> ShapeView {
        ShapeView {
            path,
            fill: None,
            stroke: None,
            line_width: 1.,
        }
    }
}

/// A control, such as a button.
#[derive(Debug, Clone)]
pub struct Control {
    pub title: String,
    pub enabled: bool,
    pub intrinsic: Size,
    pub targets: Vec<Target>,
}

impl Control {
    pub fn new(title: &str, intrinsic: Size) -> Control {
        Control {
            title: title.to_string(),
            enabled: true,
            intrinsic,
            targets: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAxis {
    Vertical,
    Horizontal,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorStyle {
    Default,
    Black,
    White,
}

/// A scrolling container.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollArea {
    pub axis: ScrollAxis,
    pub content_size: Size,
    pub content_offset: Vector2<f64>,
    pub content_inset: EdgeInsets,
    pub indicator_insets: EdgeInsets,
    pub paging: bool,
    pub indicators: Option<IndicatorStyle>,
}

impl ScrollArea {
    pub fn new(axis: ScrollAxis) -> ScrollArea {
        ScrollArea {
            axis,
            content_size: Vector2::zero(),
            content_offset: Vector2::zero(),
            content_inset: EdgeInsets::ZERO,
            indicator_insets: EdgeInsets::ZERO,
            paging: false,
            indicators: Some(IndicatorStyle::Default),
        }
    }

    pub fn shows_vertical_indicator(&self) -> bool {
        self.indicators.is_some() && self.axis != ScrollAxis::Horizontal
    }

    pub fn shows_horizontal_indicator(&self) -> bool {
        self.indicators.is_some() && self.axis != ScrollAxis::Vertical
    }
}

/// What a widget is, along with its kind-specific properties.
#[derive(Debug, Clone)]
pub enum WidgetKind {
    /// A plain view that only hosts subviews.
    Container,
    Label(Label),
    TextInput(TextInput),
    Image(ImageView),
    Shape(ShapeView),
    Control(Control),
    Scroll(ScrollArea),
    Spacer,
    Divider,
    /// A widget provided by a collaborator outside this crate, with a fixed intrinsic size.
    Custom { name: &'static str, intrinsic: Size },
}

impl WidgetKind {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Container => "Container",
            WidgetKind::Label(_) => "Label",
            WidgetKind::TextInput(_) => "TextInput",
            WidgetKind::Image(_) => "Image",
            WidgetKind::Shape(_) => "Shape",
            WidgetKind::Control(_) => "Control",
            WidgetKind::Scroll(_) => "Scroll",
            WidgetKind::Spacer => "Spacer",
            WidgetKind::Divider => "Divider",
            WidgetKind::Custom { name, .. } => *name,
        }
    }

    /// Returns true if both kinds are the same variant.
    pub fn same_kind(&self, other: &WidgetKind) -> bool {
        match (self, other) {
            (WidgetKind::Custom { name: a, .. }, WidgetKind::Custom { name: b, .. }) => a == b,
            _ => mem::discriminant(self) == mem::discriminant(other),
        }
    }
}

/// A live native widget.
pub struct Widget {
    id: WidgetId,

    pub kind: WidgetKind,

    /// Frame in the superview's coordinate system.
    pub frame: Rect,

    /// Cosmetic affine transform, applied around the frame center by the platform.
    pub transform: Transform,

    pub opacity: f64,
    pub background: Color,
    pub tint: Option<Color>,
    pub corner_radius: f64,

    /// Border (width, color).
    pub border: Option<(f64, Color)>,
    pub shadow: Option<Shadow>,
    pub z_position: f64,
    pub tag: i64,
    pub hidden: bool,
    pub clips_to_bounds: bool,
    pub interaction_enabled: bool,

    /// Rasterization scale when the widget is rasterized.
    pub rasterization: Option<f64>,
    pub content_mode: ContentMode,
    pub gestures: Vec<Gesture>,

    subviews: Vec<WidgetRef>,
}

impl Widget {
    pub fn new(kind: WidgetKind) -> Widget {
        Widget {
            id: WidgetId::new(),
            kind,
            frame: Rect::zero(),
            transform: geometry::identity(),
            opacity: 1.,
            background: Color::CLEAR,
            tint: None,
            corner_radius: 0.,
            border: None,
            shadow: None,
            z_position: 0.,
            tag: 0,
            hidden: false,
            clips_to_bounds: false,
            interaction_enabled: true,
            rasterization: None,
            content_mode: ContentMode::ScaleToFill,
            gestures: Vec::new(),
            subviews: Vec::new(),
        }
    }

    /// Wraps the widget in a shared reference.
    pub fn into_ref(self) -> WidgetRef {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn subviews(&self) -> &[WidgetRef] {
        &self.subviews
    }

    pub fn add_subview(&mut self, subview: WidgetRef) {
        self.subviews.push(subview);
    }

    pub fn remove_all_subviews(&mut self) {
        self.subviews.clear();
    }

    pub fn size(&self) -> Size {
        self.frame.size
    }

    /// Resets the transform and origin and assigns a size; the superview positions it later.
    pub fn reset_frame(&mut self, size: Size) {
        self.transform = geometry::identity();
        self.frame = Rect::new(Point2::origin(), size);
    }

    /// Resets visual and interaction state a previous frame may have left behind.
    ///
    /// Kind-specific content (text, images, paths) is left alone; the descriptor that reuses
    /// the widget sets it again.
    pub fn reset_transient(&mut self) {
        self.opacity = 1.;
        self.background = Color::CLEAR;
        self.tint = None;
        self.z_position = 0.;
        self.corner_radius = 0.;
        self.border = None;
        self.shadow = None;
        self.tag = 0;
        self.hidden = false;
        self.clips_to_bounds = false;
        self.rasterization = None;
        self.interaction_enabled = true;
        self.gestures.clear();

        if let WidgetKind::Control(control) = &mut self.kind {
            control.enabled = true;
            control.targets.clear();
        }
    }

    /// Cancels any background work tied to this widget.
    pub fn cancel_pending(&mut self) {
        if let WidgetKind::Image(image) = &mut self.kind {
            image.cancel();
        }
    }

    /// The size this widget would like within `proposed`.
    ///
    /// Widgets without content of their own just take the proposal.
    pub fn size_that_fits(&self, proposed: Size) -> Size {
        match &self.kind {
            WidgetKind::Label(label) => label.size_that_fits(proposed),
            WidgetKind::TextInput(input) => input.size_that_fits(proposed),
            WidgetKind::Image(image) => image.size_that_fits(proposed),
            WidgetKind::Control(control) => control.intrinsic,
            WidgetKind::Custom { intrinsic, .. } => {
                Vector2::new(intrinsic.x.min(proposed.x), intrinsic.y.min(proposed.y))
            }
            WidgetKind::Spacer | WidgetKind::Divider => Vector2::zero(),
            WidgetKind::Container | WidgetKind::Shape(_) | WidgetKind::Scroll(_) => proposed,
        }
    }

    /// Writes an indented outline of this widget and its subviews.
    pub fn dump(&self, depth: usize, out: &mut String) {
        let _ = writeln!(
            out,
            "{:indent$}{} {} ({}, {}) {}×{}",
            "",
            self.kind.name(),
            self.id,
            self.frame.origin.x,
            self.frame.origin.y,
            self.frame.size.x,
            self.frame.size.y,
            indent = depth * 2
        );
        for subview in &self.subviews {
            subview.borrow().dump(depth + 1, out);
        }
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Widget")
            .field("id", &self.id)
            .field("kind", &self.kind.name())
            .field("frame", &self.frame)
            .field("opacity", &self.opacity)
            .field("subviews", &self.subviews.len())
            .finish()
    }
}

#[test]
fn test_reset_transient() {
    use crate::events::{Action, ControlEvent};

    let mut widget = Widget::new(WidgetKind::Control(Control::new("OK", Vector2::new(40., 20.))));
    widget.opacity = 0.2;
    widget.corner_radius = 8.;
    widget.border = Some((2., Color::BLACK));
    widget.gestures.push(Gesture::tap(|| {}));
    if let WidgetKind::Control(control) = &mut widget.kind {
        control.enabled = false;
        control.targets.push(Target {
            event: ControlEvent::TouchUpInside,
            action: Action::new(|| {}),
        });
    }

    widget.reset_transient();

    assert_eq!(widget.opacity, 1.);
    assert_eq!(widget.corner_radius, 0.);
    assert!(widget.border.is_none());
    assert!(widget.gestures.is_empty());
    match &widget.kind {
        WidgetKind::Control(control) => {
            assert!(control.enabled);
            assert!(control.targets.is_empty());
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_label_wraps_and_limits_lines() {
    let mut label = Label::new("0123456789");
    label.font = Font::system(10.);
    // ten glyphs at 5 units each
    assert_eq!(label.size_that_fits(Vector2::new(100., 100.)), Vector2::new(50., 12.));
    assert_eq!(label.size_that_fits(Vector2::new(20., 100.)), Vector2::new(20., 36.));
    label.line_limit = 2;
    assert_eq!(label.size_that_fits(Vector2::new(20., 100.)), Vector2::new(20., 24.));
}
