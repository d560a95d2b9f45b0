//! Window management and event loop

use std::sync::Arc;

use tracing::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton as WinitMouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key as WinitKey, NamedKey},
    window::{Window, WindowAttributes, WindowId},
};

use super::App;
use crate::core::{Event, Key, Modifiers, MouseButton};
use crate::error::UiError;
use crate::render::{GpuRenderer, NodeKind, RenderList};

/// Per-window resources, created once the event loop resumes
struct WindowState {
    window: Arc<Window>,
    renderer: GpuRenderer,
    render_list: RenderList,
}

struct Shell {
    app: App,
    state: Option<WindowState>,
    /// Last pointer position in logical units
    cursor: (f32, f32),
    modifiers: Modifiers,
    error: Option<UiError>,
}

/// Run `app` in a desktop window until it is closed
pub(super) fn run(app: App) -> Result<(), UiError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    
    let mut shell = Shell {
        app,
        state: None,
        cursor: (0.0, 0.0),
        modifiers: Modifiers::default(),
        error: None,
    };
    event_loop.run_app(&mut shell)?;
    
    match shell.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

impl Shell {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: UiError) {
        error!(%err, "closing window");
        self.error = Some(err);
        event_loop.exit();
    }
    
    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), UiError> {
        let config = self.app.window_config();
        let window_attrs = WindowAttributes::default()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width.max(1), config.height.max(1)))
            .with_resizable(config.resizable)
            .with_decorations(config.decorations);
        
        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let mut renderer = pollster::block_on(GpuRenderer::new(window.clone()))?;
        renderer.clear_color = self.app.current_theme().background;
        
        let logical = window.inner_size().to_logical::<f32>(window.scale_factor());
        self.app.dispatch(&Event::Resize { width: logical.width, height: logical.height })?;
        
        info!(width = logical.width, height = logical.height, "window opened");
        self.state = Some(WindowState {
            window,
            renderer,
            render_list: RenderList::new(),
        });
        self.refresh();
        Ok(())
    }
    
    /// Title shows the first heading, since the GPU path draws no glyphs
    fn refresh(&self) {
        let Some(state) = &self.state else { return };
        let view = self.app.view();
        let heading = view.iter().find(|node| node.kind == NodeKind::Heading);
        let title = &self.app.window_config().title;
        match heading {
            Some(node) => state.window.set_title(&format!("{title} | {}", node.text)),
            None => state.window.set_title(title),
        }
        state.window.request_redraw();
    }
    
    fn redraw(&mut self) -> Result<(), UiError> {
        let Some(state) = self.state.as_mut() else { return Ok(()) };
        
        let view = self.app.view();
        let layout = self.app.layout()?.clone();
        state.render_list.paint(&view, &layout, self.app.current_theme());
        
        match state.renderer.render(&state.render_list, (layout.width, layout.height)) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = state.renderer.size;
                state.renderer.resize(size);
                state.window.request_redraw();
            }
            Err(err) => warn!(%err, "frame dropped"),
        }
        Ok(())
    }
    
    fn send(&mut self, event: Event) -> Result<(), UiError> {
        if self.app.dispatch(&event)? {
            self.refresh();
        }
        Ok(())
    }
    
    fn handle_window_event(&mut self, event_loop: &ActiveEventLoop, event: WindowEvent) -> Result<(), UiError> {
        let scale = match &self.state {
            Some(state) => state.window.scale_factor(),
            None => return Ok(()),
        };
        
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(physical_size) => {
                if let Some(state) = self.state.as_mut() {
                    state.renderer.resize((physical_size.width, physical_size.height));
                }
                let logical = physical_size.to_logical::<f32>(scale);
                self.send(Event::Resize { width: logical.width, height: logical.height })?;
            }
            WindowEvent::RedrawRequested => self.redraw()?,
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(scale);
                self.cursor = (logical.x, logical.y);
            }
            WindowEvent::MouseInput { state: button_state, button, .. } => {
                let Some(button) = map_button(button) else { return Ok(()) };
                let (x, y) = self.cursor;
                let event = match button_state {
                    ElementState::Pressed => Event::MouseDown { x, y, button },
                    ElementState::Released => Event::MouseUp { x, y, button },
                };
                self.send(event)?;
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                self.modifiers = Modifiers {
                    shift: state.shift_key(),
                    ctrl: state.control_key(),
                    alt: state.alt_key(),
                    meta: state.super_key(),
                };
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let key = map_key(&event.logical_key);
                if key == Key::Escape {
                    event_loop.exit();
                } else {
                    self.send(Event::KeyDown { key, modifiers: self.modifiers })?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl ApplicationHandler for Shell {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        if let Err(err) = self.open_window(event_loop) {
            self.fail(event_loop, err);
        }
    }
    
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Err(err) = self.handle_window_event(event_loop, event) {
            self.fail(event_loop, err);
        }
    }
}

fn map_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

fn map_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(NamedKey::ArrowUp) => Key::Up,
        WinitKey::Named(NamedKey::ArrowDown) => Key::Down,
        WinitKey::Named(NamedKey::Enter) => Key::Enter,
        WinitKey::Named(NamedKey::Space) => Key::Space,
        WinitKey::Named(NamedKey::Escape) => Key::Escape,
        WinitKey::Named(NamedKey::Tab) => Key::Tab,
        WinitKey::Character(c) => match c.as_str() {
            "+" | "=" => Key::Plus,
            "-" => Key::Minus,
            _ => Key::Unknown,
        },
        _ => Key::Unknown,
    }
}

#[cfg(all(test, feature = "desktop"))]
mod tests {
    use super::*;
    use winit::keyboard::SmolStr;

    fn character(c: &str) -> WinitKey {
        WinitKey::Character(SmolStr::new(c))
    }

    #[test]
    fn test_counter_keys_map_to_commands() {
        assert_eq!(map_key(&character("+")), Key::Plus);
        assert_eq!(map_key(&character("=")), Key::Plus);
        assert_eq!(map_key(&character("-")), Key::Minus);
        assert_eq!(map_key(&WinitKey::Named(NamedKey::ArrowUp)), Key::Up);
        assert_eq!(map_key(&WinitKey::Named(NamedKey::ArrowDown)), Key::Down);
    }

    #[test]
    fn test_other_keys() {
        assert_eq!(map_key(&WinitKey::Named(NamedKey::Escape)), Key::Escape);
        assert_eq!(map_key(&WinitKey::Named(NamedKey::Enter)), Key::Enter);
        assert_eq!(map_key(&WinitKey::Named(NamedKey::Space)), Key::Space);
        assert_eq!(map_key(&WinitKey::Named(NamedKey::Tab)), Key::Tab);
        assert_eq!(map_key(&character("x")), Key::Unknown);
        assert_eq!(map_key(&WinitKey::Named(NamedKey::F1)), Key::Unknown);
    }

    #[test]
    fn test_mouse_buttons() {
        assert_eq!(map_button(WinitMouseButton::Left), Some(MouseButton::Left));
        assert_eq!(map_button(WinitMouseButton::Right), Some(MouseButton::Right));
        assert_eq!(map_button(WinitMouseButton::Middle), Some(MouseButton::Middle));
        assert_eq!(map_button(WinitMouseButton::Back), None);
        assert_eq!(map_button(WinitMouseButton::Other(7)), None);
    }
}
