//! Widget trait and core widget types

use std::collections::HashMap;

use crate::core::{Context, Event};
use crate::render::ViewNode;
use crate::style::Style;

/// Unique identifier for widgets
pub type WidgetId = u64;

/// Core trait that all UI components implement
pub trait Widget: Send + Sync {
    /// Returns the widget's unique identifier
    fn id(&self) -> WidgetId;
    
    /// Get the widget's style
    fn style(&self) -> &Style;
    
    /// Tag used to locate the widget from tests and scripted input
    fn test_id(&self) -> Option<&str> {
        None
    }
    
    /// Describe this widget, without its children, as a render tree node
    fn view(&self) -> ViewNode;
    
    /// Build the widget tree from current state - returns child widgets.
    /// Only composite widgets (components) produce anything here; the app
    /// calls it for every composite in the tree, not just the root.
    fn build(&self, ctx: &mut Context) -> Vec<BoxedWidget> {
        let _ = ctx;
        Vec::new()
    }
    
    /// Statically owned children (containers)
    fn children(&self) -> &[BoxedWidget] {
        &[]
    }
    
    fn children_mut(&mut self) -> &mut [BoxedWidget] {
        &mut []
    }
    
    /// Handle events (clicks, keyboard, etc.)
    fn on_event(&mut self, event: &Event, ctx: &mut Context) -> bool {
        let _ = (event, ctx);
        false // Not handled by default
    }
    
    /// Called when widget is mounted
    fn on_mount(&mut self, ctx: &mut Context) {
        let _ = ctx;
    }
    
    /// Called when widget is unmounted
    fn on_unmount(&mut self, ctx: &mut Context) {
        let _ = ctx;
    }
}

/// A boxed widget for dynamic dispatch
pub type BoxedWidget = Box<dyn Widget>;

/// Children produced by [`Widget::build`], kept per composite.
///
/// Static children live inside their container; built ones are owned here,
/// keyed by the id of the composite that built them. Composites can sit
/// anywhere in the tree, including inside another composite's output.
#[derive(Default)]
pub struct BuiltChildren {
    by_parent: HashMap<WidgetId, Vec<BoxedWidget>>,
}

impl BuiltChildren {
    /// Build every composite reachable from `root`
    pub fn build(root: &dyn Widget, ctx: &mut Context) -> Self {
        let mut built = Self::default();
        built.collect(root, ctx);
        built
    }
    
    fn collect(&mut self, widget: &dyn Widget, ctx: &mut Context) {
        let children = widget.build(ctx);
        for child in widget.children().iter().chain(&children) {
            self.collect(child.as_ref(), ctx);
        }
        if !children.is_empty() {
            self.by_parent.insert(widget.id(), children);
        }
    }
    
    pub fn get(&self, parent: WidgetId) -> &[BoxedWidget] {
        self.by_parent.get(&parent).map(Vec::as_slice).unwrap_or_default()
    }
    
    /// Render `widget` with its static and built descendants
    pub fn render(&self, widget: &dyn Widget) -> ViewNode {
        let mut node = widget.view();
        node.children.extend(
            widget
                .children()
                .iter()
                .chain(self.get(widget.id()))
                .map(|child| self.render(child.as_ref())),
        );
        node
    }
    
    /// Pre-order walk over `widget` and everything below it, stopping at
    /// the first widget for which `visit` returns true
    pub fn walk_mut(
        &mut self,
        widget: &mut (dyn Widget + 'static),
        visit: &mut dyn FnMut(&mut (dyn Widget + 'static)) -> bool,
    ) -> bool {
        if visit(widget) {
            return true;
        }
        for child in widget.children_mut() {
            if self.walk_mut(child.as_mut(), visit) {
                return true;
            }
        }
        let id = widget.id();
        let Some(mut built) = self.by_parent.remove(&id) else {
            return false;
        };
        let found = built.iter_mut().any(|child| self.walk_mut(child.as_mut(), &mut *visit));
        self.by_parent.insert(id, built);
        found
    }
    
    /// Call `f` on every built widget and its static descendants
    pub fn for_each_mut(&mut self, f: &mut dyn FnMut(&mut (dyn Widget + 'static))) {
        for widget in self.by_parent.values_mut().flatten() {
            for_each_static_mut(widget.as_mut(), f);
        }
    }
    
    pub fn is_empty(&self) -> bool {
        self.by_parent.is_empty()
    }
}

/// Build and render a standalone widget tree
pub fn render_tree(widget: &dyn Widget, ctx: &mut Context) -> ViewNode {
    BuiltChildren::build(widget, ctx).render(widget)
}

/// Call `f` on `widget` and its static descendants, parents first
pub fn for_each_static_mut(widget: &mut (dyn Widget + 'static), f: &mut dyn FnMut(&mut (dyn Widget + 'static))) {
    f(widget);
    for child in widget.children_mut() {
        for_each_static_mut(child.as_mut(), f);
    }
}

/// Helper to generate unique widget IDs
pub fn next_widget_id() -> WidgetId {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NodeKind;
    use crate::widgets::{Column, Text};

    /// Composite that builds a labelled text, and nests another composite
    /// when `inner` is set
    struct Labelled {
        id: WidgetId,
        style: Style,
        label: &'static str,
        inner: bool,
    }

    impl Labelled {
        fn new(label: &'static str, inner: bool) -> Self {
            Self { id: next_widget_id(), style: Style::new(), label, inner }
        }
    }

    impl Widget for Labelled {
        fn id(&self) -> WidgetId { self.id }
        fn style(&self) -> &Style { &self.style }

        fn view(&self) -> ViewNode {
            ViewNode::new(self.id, NodeKind::Component)
        }

        fn build(&self, _ctx: &mut Context) -> Vec<BoxedWidget> {
            let mut children: Vec<BoxedWidget> = vec![Box::new(Text::new(self.label).test_id(self.label))];
            if self.inner {
                children.push(Box::new(Labelled::new("inner", false)));
            }
            children
        }
    }

    #[test]
    fn test_composites_below_the_root_are_built() {
        let tree = Column::new()
            .test_id("outer")
            .child(Text::new("static"))
            .child(Labelled::new("nested", true));
        let mut ctx = Context::new(100.0, 100.0);
        let view = render_tree(&tree, &mut ctx);

        assert_eq!(
            view.to_markup(),
            "<div data-test=\"outer\"><p>static</p><p data-test=\"nested\">nested</p><p data-test=\"inner\">inner</p></div>"
        );
    }

    #[test]
    fn test_walk_reaches_built_widgets_in_tree_order() {
        let mut root: BoxedWidget = Box::new(Column::new().child(Labelled::new("nested", true)));
        let mut ctx = Context::new(100.0, 100.0);
        let mut built = BuiltChildren::build(root.as_ref(), &mut ctx);

        let mut seen = Vec::new();
        let found = built.walk_mut(root.as_mut(), &mut |w| {
            seen.push(w.view().kind);
            w.test_id() == Some("inner")
        });
        assert!(found);
        assert_eq!(
            seen,
            vec![
                NodeKind::Container,
                NodeKind::Component,
                NodeKind::Text,
                NodeKind::Component,
                NodeKind::Text,
            ]
        );
        // the walk puts every built subtree back
        assert_eq!(built.render(root.as_ref()).find_by_test_attr("inner").len(), 1);
    }

    #[test]
    fn test_leaf_widgets_build_nothing() {
        let mut ctx = Context::new(100.0, 100.0);
        assert!(BuiltChildren::build(&Text::new("x"), &mut ctx).is_empty());
    }
}
