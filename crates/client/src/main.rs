//! Echoes of Asteria, a terminal adventure.
//!
//! The binary is a thin composition root: it wires logging, the save
//! repository, and the game session together, then hands control to the
//! line-oriented REPL in [`app`].

mod app;
mod command;
mod render;

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use app::App;

fn main() -> Result<()> {
    setup_logging();

    let name = std::env::args().nth(1).unwrap_or_else(|| "Adventurer".into());
    App::new(&name)?.run()
}

/// Log to stderr so game text on stdout stays clean. `RUST_LOG` overrides
/// the default `warn` level.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
