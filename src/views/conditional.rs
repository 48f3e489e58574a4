use crate::context::Context;
use crate::geometry::Size;
use crate::layout::Flexibility;
use crate::view::{join, AnyView, Role, View};
use crate::widget::WidgetRef;

/// Shows one of two optional views.
///
/// The chosen branch is part of the path, so the two branches never share widgets.
#[derive(Debug)]
pub struct IfElse {
    pub condition: bool,
    pub then: Option<AnyView>,
    pub otherwise: Option<AnyView>,
}

impl IfElse {
    pub fn new<V: View + 'static>(condition: bool, then: V) -> IfElse {
        IfElse {
            condition,
            then: Some(Box::new(then)),
            otherwise: None,
        }
    }

    pub fn otherwise<V: View + 'static>(mut self, otherwise: V) -> Self {
        self.otherwise = Some(Box::new(otherwise));
        self
    }

    fn branch(&self, path: &str) -> Option<(&AnyView, String)> {
        if self.condition {
            Some((self.then.as_ref()?, join(path, "IfElse.then")))
        } else {
            Some((self.otherwise.as_ref()?, join(path, "IfElse.else")))
        }
    }
}

impl View for IfElse {
    fn name(&self) -> &'static str {
        "IfElse"
    }

    fn flexibility(&self) -> Flexibility {
        self.branch("")
            .map_or_else(Flexibility::default, |(view, _)| view.flexibility())
    }

    fn priority(&self) -> f64 {
        self.branch("").map_or(0., |(view, _)| view.priority())
    }

    fn role(&self) -> Role {
        self.branch("").map_or(Role::Regular, |(view, _)| view.role())
    }

    fn path(&self, path: &str) -> String {
        match self.branch(path) {
            Some((view, base)) => view.path(&base),
            None => join(path, self.name()),
        }
    }

    fn create(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        let (view, base) = self.branch(path)?;
        view.create(&base, cx)
    }

    fn measure(&self, path: &str, proposed: Size, cx: &mut Context) -> Option<WidgetRef> {
        let (view, base) = self.branch(path)?;
        view.measure(&base, proposed, cx)
    }

    fn finalize_transform(&self, path: &str, cx: &mut Context) -> Option<WidgetRef> {
        let (view, base) = self.branch(path)?;
        view.finalize_transform(&base, cx)
    }

    fn lookup(&self, path: &str, cx: &Context) -> Option<WidgetRef> {
        let (view, base) = self.branch(path)?;
        view.lookup(&base, cx)
    }
}
