//! Application entry point
//!
//! [`App`] owns the mounted widget tree and drives it: events go in through
//! [`App::dispatch`] or [`App::activate`], the current picture comes out of
//! [`App::view`] and [`App::layout`]. The desktop window shell is just one
//! source of those events; tests and the headless CLI are others.

mod config;
#[cfg(feature = "desktop")]
mod window;

pub use config::*;

use tracing::debug;

use crate::core::{for_each_static_mut, BoxedWidget, BuiltChildren, Context, Event, Widget, WidgetId};
use crate::core::context::Theme;
use crate::error::UiError;
use crate::layout::{LayoutEngine, LayoutNode};
use crate::render::{NodeKind, ViewNode};

/// Main application struct
pub struct App {
    window: WindowConfig,
    root: Option<BoxedWidget>,
    /// Output of every composite's `build` for the current state
    built: BuiltChildren,
    context: Context,
    layout_engine: LayoutEngine,
    layout: Option<LayoutNode>,
}

impl App {
    pub fn new(title: impl Into<String>) -> Self {
        let window = WindowConfig {
            title: title.into(),
            ..Default::default()
        };
        let context = Context::new(window.width as f32, window.height as f32);
        Self {
            window,
            root: None,
            built: BuiltChildren::default(),
            context,
            layout_engine: LayoutEngine::new(),
            layout: None,
        }
    }
    
    pub fn from_config(config: &AppConfig) -> Self {
        let mut app = Self::new(config.window.title.clone())
            .size(config.window.width, config.window.height)
            .theme(config.theme());
        app.window.resizable = config.window.resizable;
        app.window.decorations = config.window.decorations;
        app
    }
    
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self.context.screen_width = width as f32;
        self.context.screen_height = height as f32;
        self.layout = None;
        self
    }
    
    pub fn theme(mut self, theme: Theme) -> Self {
        self.context.theme = theme;
        self.rebuild();
        self
    }
    
    /// Mount `widget` as the root and build its tree
    pub fn root(mut self, widget: impl Widget + 'static) -> Self {
        let context = &mut self.context;
        self.built.for_each_mut(&mut |w| w.on_unmount(context));
        self.built = BuiltChildren::default();
        if let Some(mut old) = self.root.take() {
            for_each_static_mut(old.as_mut(), &mut |w| w.on_unmount(context));
        }
        
        let mut root: BoxedWidget = Box::new(widget);
        for_each_static_mut(root.as_mut(), &mut |w| w.on_mount(context));
        self.root = Some(root);
        self.rebuild();
        self
    }
    
    pub fn window_config(&self) -> &WindowConfig {
        &self.window
    }
    
    pub fn current_theme(&self) -> &Theme {
        &self.context.theme
    }
    
    /// Render the mounted tree
    pub fn view(&self) -> ViewNode {
        let Some(root) = &self.root else {
            return ViewNode::new(0, NodeKind::Component);
        };
        self.built.render(root.as_ref())
    }
    
    /// Layout of the current view, recomputed only after a rebuild or resize
    pub fn layout(&mut self) -> Result<&LayoutNode, UiError> {
        let layout = match self.layout.take() {
            Some(layout) => layout,
            None => {
                let view = self.view();
                self.layout_engine.compute(&view, self.context.screen_width, self.context.screen_height)?
            }
        };
        Ok(self.layout.insert(layout))
    }
    
    /// Route an event to the widgets it concerns.
    ///
    /// Pointer events go to the deepest widget under the pointer and bubble
    /// up until one handles them; keyboard events are offered to widgets in
    /// tree order, root first.
    pub fn dispatch(&mut self, event: &Event) -> Result<bool, UiError> {
        let handled = match *event {
            Event::MouseDown { x, y, .. } | Event::MouseUp { x, y, .. } => {
                let path = self.layout()?.hit_path(x, y);
                path.iter().rev().any(|&id| self.deliver(id, event))
            }
            Event::KeyDown { .. } | Event::KeyUp { .. } => {
                let Self { root, built, context, .. } = self;
                match root {
                    Some(root) => built.walk_mut(root.as_mut(), &mut |w| w.on_event(event, context)),
                    None => false,
                }
            }
            Event::Resize { width, height } => {
                self.context.screen_width = width;
                self.context.screen_height = height;
                self.layout = None;
                true
            }
            Event::MouseMove { .. } => false,
        };
        self.flush();
        Ok(handled)
    }
    
    /// Click the element tagged `test_id`
    pub fn activate(&mut self, test_id: &str) -> Result<bool, UiError> {
        let id = self
            .view()
            .find_by_test_attr(test_id)
            .first()
            .map(|node| node.id)
            .ok_or_else(|| UiError::UnknownTarget(test_id.to_string()))?;
        let (x, y) = self.layout()?.find(id).map(LayoutNode::center).unwrap_or_default();
        
        let handled = self.deliver(id, &Event::click(x, y));
        self.flush();
        Ok(handled)
    }
    
    fn deliver(&mut self, id: WidgetId, event: &Event) -> bool {
        let Self { root, built, context, .. } = self;
        let Some(root) = root else { return false };
        let mut handled = false;
        built.walk_mut(root.as_mut(), &mut |w| {
            if w.id() != id {
                return false;
            }
            handled = w.on_event(event, context);
            true
        });
        handled
    }
    
    /// Rebuild if any state changed while handling an event
    fn flush(&mut self) {
        let dirty = self.context.take_dirty();
        if !dirty.is_empty() {
            debug!(?dirty, "rebuilding widget tree");
            self.rebuild();
        }
    }
    
    /// Rebuild every composite. Previously built widgets are unmounted
    /// before they are dropped and the new ones mounted.
    fn rebuild(&mut self) {
        let context = &mut self.context;
        context.take_dirty();
        self.built.for_each_mut(&mut |w| w.on_unmount(context));
        self.built = match &self.root {
            Some(root) => BuiltChildren::build(root.as_ref(), context),
            None => BuiltChildren::default(),
        };
        self.built.for_each_mut(&mut |w| w.on_mount(context));
        self.layout = None;
    }
    
    /// Open a desktop window and run the event loop until it closes
    #[cfg(feature = "desktop")]
    pub fn run(self) -> Result<(), UiError> {
        window::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Key;
    use crate::counter::{test_ids, CounterWidget};
    use crate::widgets::{Button, Column, Text};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_empty_app_renders_placeholder() {
        let mut app = App::new("empty");
        assert!(app.view().children.is_empty());
        assert!(!app.dispatch(&Event::key(Key::Plus)).unwrap());
        assert!(matches!(app.activate("nothing"), Err(UiError::UnknownTarget(tag)) if tag == "nothing"));
    }

    #[test]
    fn test_static_root_receives_clicks_through_hit_testing() {
        let clicks = Arc::new(AtomicUsize::new(0));
        let hits = Arc::clone(&clicks);
        let root = Column::new()
            .padding(10.0)
            .child(Text::new("label"))
            .child(Button::new("Press").test_id("press").on_click(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            }));
        let mut app = App::new("static").size(300, 200).root(root);

        let view = app.view();
        let button_id = view.find_by_test_attr("press")[0].id;
        let (x, y) = app.layout().unwrap().find(button_id).unwrap().center();

        assert!(app.dispatch(&Event::click(x, y)).unwrap());
        assert!(!app.dispatch(&Event::click(299.0, 199.0)).unwrap());
        assert!(app.activate("press").unwrap());
        assert_eq!(clicks.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_resize_invalidates_layout() {
        let mut app = App::new("resize").size(100, 100).root(Column::new());
        assert_eq!(app.layout().unwrap().width, 100.0);
        assert!(app.dispatch(&Event::Resize { width: 250.0, height: 80.0 }).unwrap());
        let layout = app.layout().unwrap();
        assert_eq!((layout.width, layout.height), (250.0, 80.0));
    }

    #[test]
    fn test_from_config_applies_window_and_theme() {
        let config = AppConfig::parse("[window]\ntitle = \"T\"\nwidth = 10\nheight = 20\ndecorations = false\n[theme]\nmode = \"light\"").unwrap();
        let app = App::from_config(&config);
        assert_eq!(app.window_config().title, "T");
        assert_eq!((app.window_config().width, app.window_config().height), (10, 20));
        assert!(!app.window_config().decorations);
        assert_eq!(app.current_theme().background, Theme::light().background);
    }

    #[test]
    fn test_replacing_root_unmounts_the_old_one() {
        let first = CounterWidget::new();
        let state = first.handle();
        let app = App::new("swap").root(first);
        assert_eq!(state.listener_count(), 1);

        let _app = app.root(Column::new());
        assert_eq!(state.listener_count(), 0);
    }

    #[test]
    fn test_rebuilds_do_not_pile_up_listeners() {
        let counter = CounterWidget::new();
        let state = counter.handle();
        let mut app = App::new("nested").root(Column::new().test_id("outer").child(counter));
        for _ in 0..3 {
            app.activate(test_ids::INCREMENT).unwrap();
        }
        assert_eq!(state.get().count(), 3);
        assert_eq!(state.listener_count(), 1);
    }
}
