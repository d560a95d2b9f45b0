use counter_ui::counter::ERROR_MESSAGE;
use counter_ui::layout::LayoutNode;
use counter_ui::prelude::*;

fn mount(state: CounterState) -> App {
    App::new("test").size(400, 300).root(CounterWidget::with_state(state))
}

fn display(app: &App) -> String {
    let view = app.view();
    let nodes = view.find_by_test_attr(test_ids::DISPLAY);
    assert_eq!(nodes.len(), 1);
    nodes[0].text_content()
}

fn error_shown(app: &App) -> bool {
    !app.view().find_by_test_attr(test_ids::ERROR).is_empty()
}

#[test]
fn renders_without_error() {
    let app = mount(CounterState::new());
    let view = app.view();
    assert_eq!(view.find_by_test_attr(test_ids::APP).len(), 1);
    assert_eq!(view.find_by_test_attr(test_ids::INCREMENT).len(), 1);
    assert_eq!(view.find_by_test_attr(test_ids::DECREMENT).len(), 1);
    assert_eq!(view.find_by_test_attr(test_ids::DISPLAY).len(), 1);
}

#[test]
fn counter_starts_at_zero() {
    let app = mount(CounterState::new());
    assert_eq!(display(&app), "the counter is currently 0");
    assert!(!error_shown(&app));
}

#[test]
fn clicking_increment_shows_next_count() {
    let mut app = mount(CounterState::with_count(7));
    assert!(app.activate(test_ids::INCREMENT).unwrap());
    assert!(display(&app).contains('8'));
}

#[test]
fn clicking_decrement_shows_previous_count() {
    let mut app = mount(CounterState::with_count(10));
    app.activate(test_ids::DECREMENT).unwrap();
    assert!(display(&app).contains('9'));
    assert!(!error_shown(&app));
}

#[test]
fn decrement_at_zero_shows_error() {
    let mut app = mount(CounterState::new());
    app.activate(test_ids::DECREMENT).unwrap();
    assert_eq!(display(&app), "the counter is currently 0");

    let view = app.view();
    let errors = view.find_by_test_attr(test_ids::ERROR);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].text_content(), ERROR_MESSAGE);
}

#[test]
fn increment_clears_error() {
    let mut app = mount(CounterState::new());
    app.activate(test_ids::DECREMENT).unwrap();
    assert!(error_shown(&app));

    app.activate(test_ids::INCREMENT).unwrap();
    assert!(!error_shown(&app));
    assert_eq!(display(&app), "the counter is currently 1");
}

#[test]
fn error_visibility_tracks_state_flag() {
    let widget = CounterWidget::new();
    let state = widget.handle();
    let mut app = App::new("test").root(widget);

    let script = [
        test_ids::DECREMENT,
        test_ids::DECREMENT,
        test_ids::INCREMENT,
        test_ids::INCREMENT,
        test_ids::DECREMENT,
        test_ids::DECREMENT,
        test_ids::DECREMENT,
    ];
    for tag in script {
        app.activate(tag).unwrap();
        assert_eq!(error_shown(&app), state.get().error_active(), "after {tag}");
    }
    assert_eq!(state.get().count(), 0);
    assert!(error_shown(&app));
}

#[test]
fn keyboard_drives_the_counter() {
    let mut app = mount(CounterState::new());
    assert!(app.dispatch(&Event::key(Key::Minus)).unwrap());
    assert!(error_shown(&app));

    assert!(app.dispatch(&Event::key(Key::Plus)).unwrap());
    assert!(app.dispatch(&Event::key(Key::Up)).unwrap());
    assert_eq!(display(&app), "the counter is currently 2");
    assert!(!error_shown(&app));

    assert!(app.dispatch(&Event::key(Key::Down)).unwrap());
    assert_eq!(display(&app), "the counter is currently 1");
    assert!(!app.dispatch(&Event::key(Key::Tab)).unwrap());
}

#[test]
fn pointer_clicks_hit_the_buttons() {
    let mut app = mount(CounterState::with_count(3));

    let center = |app: &mut App, tag: &str| {
        let id = app.view().find_by_test_attr(tag)[0].id;
        app.layout().unwrap().find(id).map(LayoutNode::center).unwrap()
    };

    let (x, y) = center(&mut app, test_ids::INCREMENT);
    assert!(app.dispatch(&Event::click(x, y)).unwrap());
    assert_eq!(display(&app), "the counter is currently 4");

    let (x, y) = center(&mut app, test_ids::DECREMENT);
    for _ in 0..5 {
        app.dispatch(&Event::click(x, y)).unwrap();
    }
    assert_eq!(display(&app), "the counter is currently 0");
    assert!(error_shown(&app));
}

#[test]
fn buttons_do_not_overlap() {
    let mut app = mount(CounterState::new());
    let view = app.view();
    let inc = view.find_by_test_attr(test_ids::INCREMENT)[0].id;
    let dec = view.find_by_test_attr(test_ids::DECREMENT)[0].id;

    let layout = app.layout().unwrap();
    let inc = layout.find(inc).unwrap();
    let dec = layout.find(dec).unwrap();
    assert!(inc.x + inc.width <= dec.x);
    assert!(inc.width > 0.0 && inc.height > 0.0);
}

#[test]
fn markup_carries_test_attributes() {
    let mut app = mount(CounterState::new());
    app.activate(test_ids::DECREMENT).unwrap();
    let markup = app.view().to_markup();

    assert!(markup.starts_with("<div data-test=\"component-app\">"));
    assert!(markup.contains("<h1 data-test=\"counter-display\">the counter is currently 0</h1>"));
    assert!(markup.contains("<button data-test=\"increment-button\">Increment counter</button>"));
    assert!(markup.contains("<button data-test=\"decrement-button\">Decrement counter</button>"));
    assert!(markup.contains("data-test=\"error-message\""));
}

#[test]
fn unknown_tag_is_an_error() {
    let mut app = mount(CounterState::new());
    let err = app.activate("no-such-button").unwrap_err();
    assert!(err.to_string().contains("no-such-button"));
}

#[test]
fn counter_nested_below_the_root_is_live() {
    let mut app = App::new("nested")
        .size(400, 300)
        .root(Column::new().test_id("outer").padding(8.0).child(CounterWidget::new()));

    let view = app.view();
    assert_eq!(view.find_by_test_attr("outer").len(), 1);
    assert_eq!(view.find_by_test_attr(test_ids::DISPLAY).len(), 1);

    app.activate(test_ids::DECREMENT).unwrap();
    assert!(error_shown(&app));
    app.activate(test_ids::INCREMENT).unwrap();
    assert_eq!(display(&app), "the counter is currently 1");

    // keys reach the nested counter too
    assert!(app.dispatch(&Event::key(Key::Plus)).unwrap());
    assert_eq!(display(&app), "the counter is currently 2");
}

#[test]
fn error_message_renders_as_a_div() {
    let mut app = mount(CounterState::new());
    app.activate(test_ids::DECREMENT).unwrap();
    assert!(app.view().to_markup().contains("<div data-test=\"error-message\">"));
}
