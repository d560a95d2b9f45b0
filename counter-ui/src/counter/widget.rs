//! Counter component

use tracing::{debug, warn};

use super::{test_ids, Command, CounterState, FloorViolation, ERROR_MESSAGE};
use crate::core::{BoxedWidget, Context, Event, Key, State, Subscription, Widget, WidgetId, next_widget_id};
use crate::render::{NodeKind, ViewNode};
use crate::style::{AlignItems, FlexDirection, Style};
use crate::widgets::{Button, Column, Heading, Row, Text};

/// Counter display with increment/decrement buttons.
///
/// The widget owns a [`State`] handle; the buttons it builds capture clones
/// of that handle, so clicking one updates the same state the next build
/// reads from.
pub struct CounterWidget {
    id: WidgetId,
    style: Style,
    state: State<CounterState>,
    /// Dirty notifier registered while mounted
    subscription: Option<Subscription>,
}

impl CounterWidget {
    pub fn new() -> Self {
        Self::with_state(CounterState::new())
    }
    
    pub fn with_state(state: CounterState) -> Self {
        Self {
            id: next_widget_id(),
            style: Style::new().flex_direction(FlexDirection::Column),
            state: State::new(state),
            subscription: None,
        }
    }
    
    /// Snapshot of the current state
    pub fn state(&self) -> CounterState {
        self.state.get()
    }
    
    /// Shared handle to the state
    pub fn handle(&self) -> State<CounterState> {
        self.state.clone()
    }
    
    pub fn dispatch(&self, command: Command) -> Result<u64, FloorViolation> {
        run_command(&self.state, command)
    }
}

impl Default for CounterWidget {
    fn default() -> Self {
        Self::new()
    }
}

fn run_command(state: &State<CounterState>, command: Command) -> Result<u64, FloorViolation> {
    let result = state.update(|s| s.apply(command));
    match &result {
        Ok(count) => debug!(?command, count, "counter updated"),
        Err(err) => warn!(%err, "decrement rejected"),
    }
    result
}

fn command_button(label: &str, test_id: &str, state: &State<CounterState>, command: Command) -> Button {
    let state = state.clone();
    Button::new(label)
        .test_id(test_id)
        .on_click(move || {
            // rejection is recorded in state and logged
            let _ = run_command(&state, command);
        })
}

impl Widget for CounterWidget {
    fn id(&self) -> WidgetId { self.id }
    fn style(&self) -> &Style { &self.style }
    
    fn view(&self) -> ViewNode {
        ViewNode::new(self.id, NodeKind::Component).with_style(&self.style)
    }
    
    fn build(&self, ctx: &mut Context) -> Vec<BoxedWidget> {
        let snapshot = self.state.get();
        let theme = &ctx.theme;
        
        let controls = Row::new()
            .gap(theme.spacing * 1.5)
            .child(command_button("Increment counter", test_ids::INCREMENT, &self.state, Command::Increment).primary())
            .child(command_button("Decrement counter", test_ids::DECREMENT, &self.state, Command::Decrement).secondary());
        
        let error_color = theme.error;
        let root = Column::new()
            .test_id(test_ids::APP)
            .padding(theme.spacing * 3.0)
            .gap(theme.spacing * 2.0)
            .align(AlignItems::Start)
            .child(
                Heading::new(snapshot.display_text())
                    .test_id(test_ids::DISPLAY)
                    .color(theme.text),
            )
            .child(controls)
            .child_if(snapshot.error_active(), || {
                Box::new(Text::new(ERROR_MESSAGE).block().test_id(test_ids::ERROR).color(error_color))
            });
        
        vec![Box::new(root)]
    }
    
    fn on_event(&mut self, event: &Event, _ctx: &mut Context) -> bool {
        let Event::KeyDown { key, .. } = event else {
            return false;
        };
        let command = match key {
            Key::Plus | Key::Up => Command::Increment,
            Key::Minus | Key::Down => Command::Decrement,
            _ => return false,
        };
        let _ = run_command(&self.state, command);
        true
    }
    
    fn on_mount(&mut self, ctx: &mut Context) {
        if self.subscription.is_none() {
            self.subscription = Some(self.state.subscribe(ctx.dirty_notifier(self.id)));
        }
    }
    
    fn on_unmount(&mut self, _ctx: &mut Context) {
        if let Some(subscription) = self.subscription.take() {
            self.state.unsubscribe(subscription);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render_tree;

    #[test]
    fn test_renders_tagged_elements() {
        let widget = CounterWidget::new();
        let mut ctx = Context::new(400.0, 300.0);
        let view = render_tree(&widget, &mut ctx);

        for tag in [test_ids::APP, test_ids::DISPLAY, test_ids::INCREMENT, test_ids::DECREMENT] {
            assert_eq!(view.find_by_test_attr(tag).len(), 1, "missing {tag}");
        }
        assert!(view.find_by_test_attr(test_ids::ERROR).is_empty());
    }

    #[test]
    fn test_keyboard_commands() {
        let mut widget = CounterWidget::new();
        let mut ctx = Context::new(400.0, 300.0);

        assert!(widget.on_event(&Event::key(Key::Plus), &mut ctx));
        assert!(widget.on_event(&Event::key(Key::Up), &mut ctx));
        assert_eq!(widget.state().count(), 2);

        assert!(widget.on_event(&Event::key(Key::Down), &mut ctx));
        assert!(widget.on_event(&Event::key(Key::Minus), &mut ctx));
        assert!(widget.on_event(&Event::key(Key::Minus), &mut ctx));
        assert_eq!(widget.state().count(), 0);
        assert!(widget.state().error_active());

        assert!(!widget.on_event(&Event::key(Key::Enter), &mut ctx));
    }

    #[test]
    fn test_mounted_widget_marks_itself_dirty() {
        let mut widget = CounterWidget::new();
        let mut ctx = Context::new(400.0, 300.0);
        widget.on_mount(&mut ctx);

        assert_eq!(widget.dispatch(Command::Decrement), Err(FloorViolation));
        assert_eq!(ctx.take_dirty(), vec![widget.id()]);
    }

    #[test]
    fn test_unmount_drops_dirty_notifier() {
        let mut widget = CounterWidget::new();
        let mut ctx = Context::new(400.0, 300.0);
        widget.on_mount(&mut ctx);
        widget.on_mount(&mut ctx);
        assert_eq!(widget.handle().listener_count(), 1);

        widget.on_unmount(&mut ctx);
        assert_eq!(widget.handle().listener_count(), 0);
        widget.dispatch(Command::Increment).unwrap();
        assert!(ctx.take_dirty().is_empty());
    }

    #[test]
    fn test_error_message_is_a_div() {
        let widget = CounterWidget::with_state(CounterState::new());
        widget.dispatch(Command::Decrement).unwrap_err();
        let mut ctx = Context::new(400.0, 300.0);
        let markup = render_tree(&widget, &mut ctx).to_markup();
        assert!(
            markup.ends_with("<div data-test=\"error-message\">Error: Counter can&#39;t go below zero</div></div>"),
            "{markup}"
        );
    }
}
