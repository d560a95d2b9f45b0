//! Layout engine using Taffy (Flexbox)

use crate::core::WidgetId;
use crate::error::UiError;
use crate::render::ViewNode;
use crate::style::{self, Style};
use taffy::prelude::{AvailableSpace, NodeId, Size, TaffyTree};

/// Average glyph advance as a fraction of font size, used to size text leaves
const GLYPH_WIDTH: f32 = 0.6;
const LINE_HEIGHT: f32 = 1.3;

/// Layout node with computed absolute position and size
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub id: WidgetId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    pub fn new(id: WidgetId, width: f32, height: f32) -> Self {
        Self {
            id,
            x: 0.0,
            y: 0.0,
            width,
            height,
            children: Vec::new(),
        }
    }
    
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width &&
        y >= self.y && y <= self.y + self.height
    }
    
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
    
    pub fn find(&self, id: WidgetId) -> Option<&LayoutNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
    
    /// Ids from this node down to the deepest node under the point.
    /// Empty when the point is outside.
    pub fn hit_path(&self, x: f32, y: f32) -> Vec<WidgetId> {
        let mut path = Vec::new();
        let mut node = self;
        if !node.contains_point(x, y) {
            return path;
        }
        loop {
            path.push(node.id);
            // later siblings paint on top
            match node.children.iter().rev().find(|child| child.contains_point(x, y)) {
                Some(child) => node = child,
                None => return path,
            }
        }
    }
}

/// Layout engine wrapper around Taffy.
///
/// The Taffy tree is kept between passes so its node storage is reused;
/// each [`compute`](Self::compute) starts from an empty tree.
pub struct LayoutEngine {
    tree: TaffyTree<WidgetId>,
}

impl LayoutEngine {
    pub fn new() -> Self {
        let mut tree = TaffyTree::new();
        tree.disable_rounding();
        Self { tree }
    }
    
    /// Lay out a render tree inside a `width` x `height` viewport
    pub fn compute(&mut self, root: &ViewNode, width: f32, height: f32) -> Result<LayoutNode, UiError> {
        let tree = &mut self.tree;
        tree.clear();
        let root_node = insert(tree, root, true)?;
        tree.compute_layout(
            root_node,
            Size {
                width: AvailableSpace::Definite(width),
                height: AvailableSpace::Definite(height),
            },
        )?;
        collect(tree, root_node, 0.0, 0.0)
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn insert(tree: &mut TaffyTree<WidgetId>, node: &ViewNode, is_root: bool) -> Result<NodeId, UiError> {
    let mut style = to_taffy(&node.style);
    if is_root {
        style.size = Size {
            width: taffy::style::Dimension::Percent(1.0),
            height: taffy::style::Dimension::Percent(1.0),
        };
    }
    
    if node.children.is_empty() {
        if !node.text.is_empty() {
            let (w, h) = measure_text(&node.text, &node.style);
            if matches!(node.style.width, style::Dimension::Auto) {
                style.size.width = taffy::style::Dimension::Length(w);
            }
            if matches!(node.style.height, style::Dimension::Auto) {
                style.size.height = taffy::style::Dimension::Length(h);
            }
        }
        return Ok(tree.new_leaf_with_context(style, node.id)?);
    }
    
    let children = node
        .children
        .iter()
        .map(|child| insert(tree, child, false))
        .collect::<Result<Vec<_>, _>>()?;
    let id = tree.new_with_children(style, &children)?;
    tree.set_node_context(id, Some(node.id))?;
    Ok(id)
}

fn collect(tree: &TaffyTree<WidgetId>, node: NodeId, offset_x: f32, offset_y: f32) -> Result<LayoutNode, UiError> {
    let layout = tree.layout(node)?;
    let x = offset_x + layout.location.x;
    let y = offset_y + layout.location.y;
    let id = tree.get_node_context(node).copied().unwrap_or_default();
    
    let mut out = LayoutNode::new(id, layout.size.width, layout.size.height);
    out.x = x;
    out.y = y;
    for child in tree.children(node)? {
        out.children.push(collect(tree, child, x, y)?);
    }
    Ok(out)
}

/// Size of a single line of text, padding included
fn measure_text(text: &str, style: &Style) -> (f32, f32) {
    let chars = text.chars().count() as f32;
    let width = chars * style.font_size * GLYPH_WIDTH + style.padding.horizontal();
    let height = style.font_size * LINE_HEIGHT + style.padding.vertical();
    (width, height)
}

fn to_taffy(style: &Style) -> taffy::style::Style {
    use taffy::geometry::Rect;
    use taffy::style::LengthPercentage;
    
    let dimension = |d: style::Dimension| match d {
        style::Dimension::Auto => taffy::style::Dimension::Auto,
        style::Dimension::Px(v) => taffy::style::Dimension::Length(v),
        style::Dimension::Percent(v) => taffy::style::Dimension::Percent(v / 100.0),
    };
    
    taffy::style::Style {
        size: Size {
            width: dimension(style.width),
            height: dimension(style.height),
        },
        flex_direction: match style.flex_direction {
            style::FlexDirection::Row => taffy::style::FlexDirection::Row,
            style::FlexDirection::Column => taffy::style::FlexDirection::Column,
        },
        align_items: Some(match style.align_items {
            style::AlignItems::Start => taffy::style::AlignItems::Start,
            style::AlignItems::End => taffy::style::AlignItems::End,
            style::AlignItems::Center => taffy::style::AlignItems::Center,
            style::AlignItems::Stretch => taffy::style::AlignItems::Stretch,
        }),
        gap: Size {
            width: LengthPercentage::Length(style.gap),
            height: LengthPercentage::Length(style.gap),
        },
        padding: Rect {
            left: LengthPercentage::Length(style.padding.left),
            right: LengthPercentage::Length(style.padding.right),
            top: LengthPercentage::Length(style.padding.top),
            bottom: LengthPercentage::Length(style.padding.bottom),
        },
        flex_shrink: 0.0,
        ..Default::default()
    }
}
