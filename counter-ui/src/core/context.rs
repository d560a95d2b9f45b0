//! Build context for widgets

use crate::core::WidgetId;
use serde::Deserialize;
use std::sync::{Arc, Mutex, PoisonError};

/// Context passed to widgets during build and event handling
pub struct Context {
    /// Widgets that need rebuild. Shared so state listeners can mark from callbacks.
    dirty_widgets: Arc<Mutex<Vec<WidgetId>>>,
    /// Current theme
    pub theme: Theme,
    /// Screen dimensions
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Context {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            dirty_widgets: Arc::new(Mutex::new(Vec::new())),
            theme: Theme::dark(),
            screen_width: width,
            screen_height: height,
        }
    }
    
    /// Mark a widget as needing rebuild
    pub fn mark_dirty(&self, id: WidgetId) {
        mark(&self.dirty_widgets, id);
    }
    
    /// Callback that marks `id` dirty, suitable for [`State::subscribe`](crate::core::State::subscribe)
    pub fn dirty_notifier(&self, id: WidgetId) -> impl Fn() + Send + Sync + 'static {
        let dirty = Arc::clone(&self.dirty_widgets);
        move || mark(&dirty, id)
    }
    
    /// Get dirty widgets and clear the list
    pub fn take_dirty(&mut self) -> Vec<WidgetId> {
        let mut dirty = self.dirty_widgets.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *dirty)
    }
}

fn mark(dirty: &Mutex<Vec<WidgetId>>, id: WidgetId) {
    let mut dirty = dirty.lock().unwrap_or_else(PoisonError::into_inner);
    if !dirty.contains(&id) {
        dirty.push(id);
    }
}

/// Which built-in palette to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// Theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub error: Color,
    pub border_radius: f32,
    pub spacing: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }
    
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }
    
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Theme {
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }
    
    pub fn dark() -> Self {
        Self {
            primary: Color::rgb(0, 122, 255),      // Blue
            secondary: Color::rgb(88, 86, 214),    // Purple
            background: Color::rgb(18, 18, 18),    // Dark gray
            surface: Color::rgb(30, 30, 30),       // Lighter gray
            text: Color::rgb(255, 255, 255),       // White
            text_secondary: Color::rgb(160, 160, 160),
            error: Color::rgb(255, 69, 58),        // Red
            border_radius: 8.0,
            spacing: 8.0,
        }
    }
    
    pub fn light() -> Self {
        Self {
            primary: Color::rgb(0, 122, 255),
            secondary: Color::rgb(88, 86, 214),
            background: Color::rgb(255, 255, 255),
            surface: Color::rgb(242, 242, 247),
            text: Color::rgb(0, 0, 0),
            text_secondary: Color::rgb(100, 100, 100),
            error: Color::rgb(255, 59, 48),
            border_radius: 8.0,
            spacing: 8.0,
        }
    }
}
