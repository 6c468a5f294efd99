use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_web::MakeWebConsoleWriter;

/// Routes `tracing` output to the browser console.
pub fn init() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());

    if let Err(err) = tracing_subscriber::registry()
        .with(console.with_filter(level))
        .try_init()
    {
        tracing::warn!(error = %err, "console logging already initialised");
    }
}
