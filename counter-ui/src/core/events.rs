//! Event system

/// All UI events the toolkit routes to widgets
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Mouse events
    MouseDown { x: f32, y: f32, button: MouseButton },
    MouseUp { x: f32, y: f32, button: MouseButton },
    MouseMove { x: f32, y: f32 },
    
    // Keyboard events
    KeyDown { key: Key, modifiers: Modifiers },
    KeyUp { key: Key, modifiers: Modifiers },
    
    // Window events
    Resize { width: f32, height: f32 },
}

impl Event {
    /// Left click release at a point, which is what activates a button
    pub fn click(x: f32, y: f32) -> Self {
        Event::MouseUp { x, y, button: MouseButton::Left }
    }
    
    pub fn key(key: Key) -> Self {
        Event::KeyDown { key, modifiers: Modifiers::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,  // Cmd on Mac, Win on Windows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Plus,
    Minus,
    Up,
    Down,
    Enter,
    Space,
    Escape,
    Tab,
    Unknown,
}
