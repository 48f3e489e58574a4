//! Actions attached to widgets: control targets and gesture recognizers.
//!
//! Dispatching input to these is the platform's job; the core only attaches them during the
//! create pass and strips them when a widget is reused.

use core::fmt;
use parking_lot::Mutex;
use std::sync::Arc;

/// A shared callback.
///
/// Cloning an action shares the same closure, so a descriptor can be rebuilt every render while
/// still handing the platform one stable handler.
pub struct Action(Arc<Mutex<dyn FnMut() + Send>>);

impl Clone for Action {
    fn clone(&self) -> Self {
        Action(Arc::clone(&self.0))
    }
}

impl Action {
    pub fn new<F: 'static + FnMut() + Send>(handler: F) -> Self {
        Action(Arc::new(Mutex::new(handler)))
    }

    /// Invokes the handler.
    pub fn invoke(&self) {
        let mut handler = self.0.lock();
        (&mut *handler)();
    }

    /// Returns true if both actions share the same closure.
    pub fn ptr_eq(&self, other: &Action) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Action(..)")
    }
}

/// Control events a target can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    TouchDown,
    TouchUpInside,
    ValueChanged,
    EditingChanged,
    EditingDidEnd,
    PrimaryAction,
}

/// A target/action pair registered on a control.
#[derive(Debug, Clone)]
pub struct Target {
    pub event: ControlEvent,
    pub action: Action,
}

/// Kinds of gesture recognizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Tap { taps: u32 },
    LongPress,
    Pan,
    Swipe,
    Pinch,
}

/// A gesture recognizer attached to a widget.
#[derive(Debug, Clone)]
pub struct Gesture {
    pub kind: GestureKind,
    pub action: Action,
}

impl Gesture {
    pub fn new(kind: GestureKind, action: Action) -> Gesture {
        Gesture { kind, action }
    }

    /// A single-tap recognizer.
    pub fn tap<F: 'static + FnMut() + Send>(handler: F) -> Gesture {
        Gesture::new(GestureKind::Tap { taps: 1 }, Action::new(handler))
    }
}

#[test]
fn test_action_clones_share_handler() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let counter = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&counter);
    let action = Action::new(move || {
        c.fetch_add(1, Ordering::SeqCst);
    });
    let other = action.clone();
    action.invoke();
    other.invoke();

    assert!(action.ptr_eq(&other));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}
