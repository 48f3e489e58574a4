//! The identity cache: structural path to live widget.

use crate::widget::{Widget, WidgetKind, WidgetRef};
use log::{debug, trace};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Maps structural paths to the widgets created for them.
///
/// The cache owns its widgets. A path stays bound to the same widget across renders until the
/// cache is cleared, a descriptor asks for a widget of a different kind at that path, or a pass
/// ends without visiting it.
#[derive(Debug, Default)]
pub struct WidgetCache {
    widgets: HashMap<String, WidgetRef>,
    /// Paths visited since `begin_pass`; `None` outside a pass.
    touched: RefCell<Option<HashSet<String>>>,
}

impl WidgetCache {
    pub fn new() -> WidgetCache {
        WidgetCache::default()
    }

    /// Returns the widget at `path`, if there is one.
    pub fn query(&self, path: &str) -> Option<WidgetRef> {
        self.touch(path);
        self.widgets.get(path).cloned()
    }

    fn touch(&self, path: &str) {
        if let Some(touched) = self.touched.borrow_mut().as_mut() {
            if !touched.contains(path) {
                touched.insert(path.to_string());
            }
        }
    }

    /// Returns the widget at `path` after resetting its transient state.
    pub fn reuse(&mut self, path: &str) -> Option<WidgetRef> {
        let widget = self.query(path)?;
        widget.borrow_mut().reset_transient();
        Some(widget)
    }

    /// Binds `widget` to `path`, returning the widget that was there before.
    pub fn store(&mut self, widget: WidgetRef, path: &str) -> Option<WidgetRef> {
        self.touch(path);
        self.widgets.insert(path.to_string(), widget)
    }

    /// Reuses the widget at `path` if it has the same kind as the one `make` describes, or
    /// creates and stores a new one.
    pub fn obtain<F: FnOnce() -> WidgetKind>(&mut self, path: &str, make: F) -> WidgetRef {
        let kind = make();
        if let Some(widget) = self.reuse(path) {
            let previous = widget.borrow().kind.name();
            if widget.borrow().kind.same_kind(&kind) {
                trace!("reusing {} at {:?}", previous, path);
                return widget;
            }
            debug!("replacing {} at {:?} with {}", previous, path, kind.name());
            widget.borrow_mut().cancel_pending();
        } else {
            trace!("creating {} at {:?}", kind.name(), path);
        }

        let widget = Widget::new(kind).into_ref();
        self.store(Rc::clone(&widget), path);
        widget
    }

    /// Unbinds `path`.
    pub fn remove(&mut self, path: &str) -> Option<WidgetRef> {
        let widget = self.widgets.remove(path)?;
        widget.borrow_mut().cancel_pending();
        Some(widget)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// All bound paths, in no particular order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.widgets.keys().map(String::as_str)
    }

    /// Drops every widget, cancelling any background work they were waiting on.
    pub fn clear(&mut self) {
        debug!("clearing {} cached widgets", self.widgets.len());
        for widget in self.widgets.values() {
            widget.borrow_mut().cancel_pending();
        }
        self.widgets.clear();
        if let Some(touched) = self.touched.get_mut() {
            touched.clear();
        }
    }

    /// Starts recording which paths are visited.
    pub fn begin_pass(&mut self) {
        *self.touched.get_mut() = Some(HashSet::new());
    }

    /// Removes every path not visited since `begin_pass` and returns how many went.
    ///
    /// Does nothing outside a pass.
    pub fn end_pass(&mut self) -> usize {
        let touched = match self.touched.get_mut().take() {
            Some(touched) => touched,
            None => return 0,
        };
        let stale: Vec<String> = self
            .widgets
            .keys()
            .filter(|path| !touched.contains(path.as_str()))
            .cloned()
            .collect();
        for path in &stale {
            trace!("pruning {:?}", path);
            self.remove(path);
        }
        if !stale.is_empty() {
            debug!("pruned {} widgets that left the tree", stale.len());
        }
        stale.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Label;

    #[test]
    fn test_obtain_reuses_same_kind() {
        let mut cache = WidgetCache::new();
        let a = cache.obtain("/0", || WidgetKind::Container);
        a.borrow_mut().opacity = 0.5;
        let b = cache.obtain("/0", || WidgetKind::Container);

        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(b.borrow().opacity, 1.);
    }

    #[test]
    fn test_obtain_replaces_other_kind() {
        let mut cache = WidgetCache::new();
        let a = cache.obtain("/0", || WidgetKind::Container);
        let b = cache.obtain("/0", || WidgetKind::Label(Label::new("hi")));

        assert!(!Rc::ptr_eq(&a, &b));
        assert!(Rc::ptr_eq(&cache.query("/0").unwrap(), &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cache = WidgetCache::new();
        cache.obtain("/0", || WidgetKind::Spacer);
        cache.obtain("/1", || WidgetKind::Divider);
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.query("/0").is_none());
    }

    #[test]
    fn test_end_pass_drops_unvisited_paths() {
        let mut cache = WidgetCache::new();
        let kept = cache.obtain("/0", || WidgetKind::Spacer);
        cache.obtain("/1", || WidgetKind::Divider);
        cache.obtain("/1/0", || WidgetKind::Container);

        // outside a pass nothing is pruned
        assert_eq!(cache.end_pass(), 0);
        assert_eq!(cache.len(), 3);

        cache.begin_pass();
        cache.obtain("/0", || WidgetKind::Spacer);
        assert_eq!(cache.end_pass(), 2);

        let paths: Vec<&str> = cache.paths().collect();
        assert_eq!(paths, vec!["/0"]);
        assert!(Rc::ptr_eq(&kept, &cache.query("/0").unwrap()));
    }
}
