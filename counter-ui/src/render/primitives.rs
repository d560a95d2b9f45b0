//! Render primitives

use crate::core::context::{Color, Theme};
use crate::layout::LayoutNode;
use crate::render::{NodeKind, ViewNode};

/// A drawable primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
        border_radius: f32,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        color: Color,
    },
}

/// Render command list
#[derive(Debug, Default)]
pub struct RenderList {
    pub primitives: Vec<Primitive>,
}

impl RenderList {
    pub fn new() -> Self {
        Self { primitives: Vec::new() }
    }
    
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color, radius: f32) {
        self.primitives.push(Primitive::Rect {
            x, y, width: w, height: h, color, border_radius: radius
        });
    }
    
    pub fn text(&mut self, x: f32, y: f32, text: String, size: f32, color: Color) {
        self.primitives.push(Primitive::Text { x, y, text, size, color });
    }
    
    pub fn clear(&mut self) {
        self.primitives.clear();
    }
    
    /// Rebuild the list from a render tree and its layout, back to front
    pub fn paint(&mut self, view: &ViewNode, layout: &LayoutNode, theme: &Theme) {
        self.clear();
        self.rect(layout.x, layout.y, layout.width, layout.height, theme.background, 0.0);
        self.paint_node(view, layout, theme);
    }
    
    fn paint_node(&mut self, view: &ViewNode, layout: &LayoutNode, theme: &Theme) {
        let style = &view.style;
        if let Some(background) = style.background {
            self.rect(layout.x, layout.y, layout.width, layout.height, background, style.border_radius);
        }
        
        if !view.text.is_empty() {
            let color = style.text_color.unwrap_or(match view.kind {
                NodeKind::Button => theme.text,
                _ => theme.text_secondary,
            });
            self.text(
                layout.x + style.padding.left,
                layout.y + style.padding.top,
                view.text.clone(),
                style.font_size,
                color,
            );
        }
        
        // layout was computed from this same tree, so children line up
        for (child_view, child_layout) in view.children.iter().zip(&layout.children) {
            self.paint_node(child_view, child_layout, theme);
        }
    }
}
