//! Container widgets (Column, Row)

use crate::core::{Widget, WidgetId, next_widget_id, BoxedWidget};
use crate::render::{NodeKind, ViewNode};
use crate::style::{Style, FlexDirection, AlignItems};

/// Vertical layout container (like Flutter's Column)
pub struct Column {
    id: WidgetId,
    style: Style,
    test_id: Option<String>,
    children: Vec<BoxedWidget>,
}

impl Column {
    pub fn new() -> Self {
        Self {
            id: next_widget_id(),
            style: Style::new().flex_direction(FlexDirection::Column),
            test_id: None,
            children: Vec::new(),
        }
    }
    
    pub fn child(mut self, child: impl Widget + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }
    
    /// Add a child only when `cond` holds
    pub fn child_if(mut self, cond: bool, child: impl FnOnce() -> BoxedWidget) -> Self {
        if cond {
            self.children.push(child());
        }
        self
    }
    
    pub fn test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }
    
    pub fn gap(mut self, gap: f32) -> Self {
        self.style.gap = gap;
        self
    }
    
    pub fn padding(mut self, padding: f32) -> Self {
        self.style.padding = crate::style::EdgeInsets::all(padding);
        self
    }
    
    pub fn align(mut self, align: AlignItems) -> Self {
        self.style.align_items = align;
        self
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Column {
    fn id(&self) -> WidgetId { self.id }
    fn style(&self) -> &Style { &self.style }
    fn test_id(&self) -> Option<&str> { self.test_id.as_deref() }
    
    fn view(&self) -> ViewNode {
        ViewNode::new(self.id, NodeKind::Container)
            .with_test_id(self.test_id())
            .with_style(&self.style)
    }
    
    fn children(&self) -> &[BoxedWidget] { &self.children }
    fn children_mut(&mut self) -> &mut [BoxedWidget] { &mut self.children }
}

/// Horizontal layout container (like Flutter's Row)
pub struct Row {
    id: WidgetId,
    style: Style,
    test_id: Option<String>,
    children: Vec<BoxedWidget>,
}

impl Row {
    pub fn new() -> Self {
        Self {
            id: next_widget_id(),
            style: Style::new().flex_direction(FlexDirection::Row),
            test_id: None,
            children: Vec::new(),
        }
    }
    
    pub fn child(mut self, child: impl Widget + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }
    
    pub fn test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }
    
    pub fn gap(mut self, gap: f32) -> Self {
        self.style.gap = gap;
        self
    }
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Row {
    fn id(&self) -> WidgetId { self.id }
    fn style(&self) -> &Style { &self.style }
    fn test_id(&self) -> Option<&str> { self.test_id.as_deref() }
    
    fn view(&self) -> ViewNode {
        ViewNode::new(self.id, NodeKind::Container)
            .with_test_id(self.test_id())
            .with_style(&self.style)
    }
    
    fn children(&self) -> &[BoxedWidget] { &self.children }
    fn children_mut(&mut self) -> &mut [BoxedWidget] { &mut self.children }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{render_tree, Context};
    use crate::widgets::Text;

    #[test]
    fn test_children_render_in_order() {
        let column = Column::new()
            .test_id("list")
            .child(Text::new("a"))
            .child(Row::new().child(Text::new("b")).child(Text::new("c")));
        let view = render_tree(&column, &mut Context::new(100.0, 100.0));
        assert_eq!(view.to_markup(), "<div data-test=\"list\"><p>a</p><div><p>b</p><p>c</p></div></div>");
    }

    #[test]
    fn test_child_if() {
        let shown = Column::new().child_if(true, || Box::new(Text::new("x")));
        let hidden = Column::new().child_if(false, || Box::new(Text::new("x")));
        assert_eq!(shown.children().len(), 1);
        assert!(hidden.children().is_empty());
    }
}
