//! Button widget

use crate::core::{Widget, WidgetId, Context, Event, MouseButton, next_widget_id};
use crate::core::context::Color;
use crate::render::{NodeKind, ViewNode};
use crate::style::Style;
use std::sync::Arc;

/// Callback type for button clicks
pub type OnClick = Arc<dyn Fn() + Send + Sync>;

/// Standard button widget
pub struct Button {
    id: WidgetId,
    style: Style,
    test_id: Option<String>,
    label: String,
    on_click: Option<OnClick>,
    disabled: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: next_widget_id(),
            style: Style::new()
                .padding((16.0, 10.0))
                .border_radius(8.0)
                .background(Color::rgb(0, 122, 255))
                .text_color(Color::rgb(255, 255, 255)),
            test_id: None,
            label: label.into(),
            on_click: None,
            disabled: false,
        }
    }
    
    pub fn on_click<F: Fn() + Send + Sync + 'static>(mut self, handler: F) -> Self {
        self.on_click = Some(Arc::new(handler));
        self
    }
    
    pub fn test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }
    
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
    
    pub fn primary(mut self) -> Self {
        self.style.background = Some(Color::rgb(0, 122, 255));
        self.style.text_color = Some(Color::rgb(255, 255, 255));
        self
    }
    
    pub fn secondary(mut self) -> Self {
        self.style.background = Some(Color::rgb(88, 86, 214));
        self.style.text_color = Some(Color::rgb(255, 255, 255));
        self
    }
}

impl Widget for Button {
    fn id(&self) -> WidgetId { self.id }
    fn style(&self) -> &Style { &self.style }
    fn test_id(&self) -> Option<&str> { self.test_id.as_deref() }
    
    fn view(&self) -> ViewNode {
        ViewNode::new(self.id, NodeKind::Button)
            .with_test_id(self.test_id())
            .with_text(self.label.clone())
            .with_style(&self.style)
    }
    
    fn on_event(&mut self, event: &Event, _ctx: &mut Context) -> bool {
        if self.disabled {
            return false;
        }
        
        if let Event::MouseUp { button: MouseButton::Left, .. } = event {
            if let Some(ref handler) = self.on_click {
                handler();
                return true;
            }
        }
        false
    }
}
