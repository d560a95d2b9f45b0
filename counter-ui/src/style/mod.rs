//! Widget styling
//!
//! A [`Style`] carries the few properties the layout pass and the painter
//! read. Everything defaults to "size to content".

use crate::core::context::Color;

/// Style of one widget
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub width: Dimension,
    pub height: Dimension,
    pub flex_direction: FlexDirection,
    pub align_items: AlignItems,
    pub gap: f32,
    pub padding: EdgeInsets,
    
    pub background: Option<Color>,
    pub border_radius: f32,
    
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub text_color: Option<Color>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            width: Dimension::Auto,
            height: Dimension::Auto,
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Stretch,
            gap: 0.0,
            padding: EdgeInsets::default(),
            background: None,
            border_radius: 0.0,
            font_size: 16.0,
            font_weight: FontWeight::Normal,
            text_color: None,
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }
    
    pub fn size(mut self, width: impl Into<Dimension>, height: impl Into<Dimension>) -> Self {
        self.width = width.into();
        self.height = height.into();
        self
    }
    
    pub fn flex_direction(mut self, direction: FlexDirection) -> Self {
        self.flex_direction = direction;
        self
    }
    
    pub fn align_items(mut self, align: AlignItems) -> Self {
        self.align_items = align;
        self
    }
    
    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }
    
    pub fn padding(mut self, padding: impl Into<EdgeInsets>) -> Self {
        self.padding = padding.into();
        self
    }
    
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
    
    pub fn border_radius(mut self, radius: f32) -> Self {
        self.border_radius = radius;
        self
    }
    
    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }
}

/// A length along one axis. `Percent` is out of 100 of the parent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    #[default]
    Auto,
    Px(f32),
    Percent(f32),
}

impl From<f32> for Dimension {
    fn from(px: f32) -> Self {
        Dimension::Px(px)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    Row,
    Column,
}

/// Cross-axis alignment of children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignItems {
    Start,
    End,
    Center,
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl EdgeInsets {
    pub fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }
    
    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self { top: vertical, right: horizontal, bottom: vertical, left: horizontal }
    }
    
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }
    
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl From<f32> for EdgeInsets {
    fn from(v: f32) -> Self {
        Self::all(v)
    }
}

/// `(horizontal, vertical)`
impl From<(f32, f32)> for EdgeInsets {
    fn from((h, v): (f32, f32)) -> Self {
        Self::symmetric(h, v)
    }
}
