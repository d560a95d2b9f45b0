//! Counter example - clicks the buttons headlessly and prints each frame
//!
//! Run with `--features desktop` and `-- --window` to open a window instead.

use counter_ui::prelude::*;

fn main() -> Result<(), counter_ui::UiError> {
    let mut app = App::new("Counter")
        .size(360, 240)
        .root(CounterWidget::with_state(CounterState::with_count(1)));

    #[cfg(feature = "desktop")]
    if std::env::args().any(|arg| arg == "--window") {
        return app.run();
    }

    println!("{}", app.view().to_markup());
    for tag in [test_ids::DECREMENT, test_ids::DECREMENT, test_ids::INCREMENT] {
        app.activate(tag)?;
        println!("{tag}: {}", app.view().to_markup());
    }
    Ok(())
}
