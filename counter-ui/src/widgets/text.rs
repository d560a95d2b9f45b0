//! Text widgets

use crate::core::{Widget, WidgetId, next_widget_id};
use crate::core::context::Color;
use crate::render::{NodeKind, ViewNode};
use crate::style::{Style, FontWeight};

/// Text display widget
pub struct Text {
    id: WidgetId,
    style: Style,
    test_id: Option<String>,
    content: String,
    kind: NodeKind,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: next_widget_id(),
            style: Style::new(),
            test_id: None,
            content: content.into(),
            kind: NodeKind::Text,
        }
    }
    
    pub fn test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }
    
    /// Render as a block container (`div`) rather than a paragraph
    pub fn block(mut self) -> Self {
        self.kind = NodeKind::Container;
        self
    }
    
    pub fn size(mut self, size: f32) -> Self {
        self.style.font_size = size;
        self
    }
    
    pub fn color(mut self, color: Color) -> Self {
        self.style.text_color = Some(color);
        self
    }
    
    pub fn bold(mut self) -> Self {
        self.style.font_weight = FontWeight::Bold;
        self
    }
    
    fn node(&self, kind: NodeKind) -> ViewNode {
        ViewNode::new(self.id, kind)
            .with_test_id(self.test_id.as_deref())
            .with_text(self.content.clone())
            .with_style(&self.style)
    }
}

impl Widget for Text {
    fn id(&self) -> WidgetId { self.id }
    fn style(&self) -> &Style { &self.style }
    fn test_id(&self) -> Option<&str> { self.test_id.as_deref() }
    
    fn view(&self) -> ViewNode {
        self.node(self.kind)
    }
}

/// Top-level heading
pub struct Heading(Text);

impl Heading {
    pub fn new(content: impl Into<String>) -> Self {
        Self(Text::new(content).size(28.0).bold())
    }
    
    pub fn test_id(self, test_id: impl Into<String>) -> Self {
        Self(self.0.test_id(test_id))
    }
    
    pub fn color(self, color: Color) -> Self {
        Self(self.0.color(color))
    }
}

impl Widget for Heading {
    fn id(&self) -> WidgetId { self.0.id }
    fn style(&self) -> &Style { &self.0.style }
    fn test_id(&self) -> Option<&str> { self.0.test_id.as_deref() }
    
    fn view(&self) -> ViewNode {
        self.0.node(NodeKind::Heading)
    }
}
