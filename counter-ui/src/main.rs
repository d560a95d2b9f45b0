//! `counter-ui` binary: run the counter in a window, or headless with
//! scripted clicks.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use counter_ui::app::LogConfig;
use counter_ui::counter::test_ids;
use counter_ui::{App, AppConfig, CounterWidget, UiError};

#[derive(Debug, Parser)]
#[command(name = "counter-ui", version, about = "A counter that refuses to go below zero")]
struct Cli {
    /// Config file (defaults to ./counter-ui.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the render tree instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Click a button before rendering; repeat to click several times
    #[arg(long, value_enum)]
    press: Vec<Press>,

    /// Output format for headless rendering
    #[arg(long, value_enum, default_value_t = Format::Markup)]
    format: Format,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Press {
    Increment,
    Decrement,
}

impl Press {
    fn test_id(self) -> &'static str {
        match self {
            Press::Increment => test_ids::INCREMENT,
            Press::Decrement => test_ids::DECREMENT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Markup,
    Json,
}

impl Cli {
    fn load_config(&self) -> Result<AppConfig, UiError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::discover(&std::env::current_dir().unwrap_or_default())?,
        };
        if let Some(title) = &self.title {
            config.window.title = title.clone();
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        Ok(config)
    }
}

fn init_logging(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&log.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render(app: &App, format: Format) -> Result<String, UiError> {
    let view = app.view();
    Ok(match format {
        Format::Markup => view.to_markup(),
        Format::Json => serde_json::to_string_pretty(&view)?,
    })
}

fn run(cli: Cli) -> Result<(), UiError> {
    let config = cli.load_config()?;
    init_logging(&config.log);
    info!(title = %config.window.title, "starting counter");

    let mut app = App::from_config(&config).root(CounterWidget::new());
    for press in &cli.press {
        app.activate(press.test_id())?;
    }

    #[cfg(feature = "desktop")]
    if !cli.headless {
        return app.run();
    }
    #[cfg(not(feature = "desktop"))]
    if !cli.headless {
        info!("built without the desktop feature, rendering headless");
    }

    println!("{}", render(&app, cli.format)?);
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
