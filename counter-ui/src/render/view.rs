//! Structural render tree
//!
//! Widgets describe themselves as [`ViewNode`]s. The tree is what layout,
//! drawing, markup output and tests all consume, so a widget's observable
//! surface is exactly what it puts here.

use crate::core::WidgetId;
use crate::style::Style;
use serde::Serialize;

/// What sort of element a node is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A composite widget. Transparent in markup.
    Component,
    Container,
    Heading,
    Text,
    Button,
}

impl NodeKind {
    /// Markup tag for this kind, `None` for transparent nodes
    pub fn tag(self) -> Option<&'static str> {
        match self {
            NodeKind::Component => None,
            NodeKind::Container => Some("div"),
            NodeKind::Heading => Some("h1"),
            NodeKind::Text => Some("p"),
            NodeKind::Button => Some("button"),
        }
    }
}

/// One element of the render tree
#[derive(Debug, Clone, Serialize)]
pub struct ViewNode {
    pub id: WidgetId,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip)]
    pub style: Style,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(id: WidgetId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            test_id: None,
            text: String::new(),
            style: Style::default(),
            children: Vec::new(),
        }
    }
    
    pub fn with_test_id(mut self, test_id: Option<&str>) -> Self {
        self.test_id = test_id.map(str::to_string);
        self
    }
    
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
    
    pub fn with_style(mut self, style: &Style) -> Self {
        self.style = style.clone();
        self
    }
    
    /// Pre-order walk over this node and all descendants
    pub fn iter(&self) -> impl Iterator<Item = &ViewNode> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
    
    /// All nodes tagged with `test_id`, in document order
    pub fn find_by_test_attr(&self, test_id: &str) -> Vec<&ViewNode> {
        self.iter()
            .filter(|node| node.test_id.as_deref() == Some(test_id))
            .collect()
    }
    
    pub fn find(&self, id: WidgetId) -> Option<&ViewNode> {
        self.iter().find(|node| node.id == id)
    }
    
    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        self.iter().map(|node| node.text.as_str()).collect()
    }
    
    /// Render as HTML-like markup with `data-test` attributes
    pub fn to_markup(&self) -> String {
        let mut html = String::new();
        self.write_markup(&mut html);
        html
    }
    
    fn write_markup(&self, html: &mut String) {
        let Some(tag) = self.kind.tag() else {
            for child in &self.children {
                child.write_markup(html);
            }
            return;
        };
        
        html.push('<');
        html.push_str(tag);
        if let Some(test_id) = &self.test_id {
            html.push_str(" data-test=\"");
            html.push_str(&escape_html(test_id));
            html.push('"');
        }
        html.push('>');
        
        html.push_str(&escape_html(&self.text));
        for child in &self.children {
            child.write_markup(html);
        }
        
        html.push_str("</");
        html.push_str(tag);
        html.push('>');
    }
}

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
