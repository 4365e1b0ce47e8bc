use raster_edit::config::load_config;
use raster_edit::message::WriterSink;
use raster_edit::Session;
use std::env;
use std::io;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let sink = WriterSink::new(io::stdout());
    let mut session = match config.seed {
        Some(seed) => Session::with_seed(sink, seed),
        None => Session::new(sink),
    };
    session
        .run_batch(&config.steps)
        .map_err(|e| format!("Batch aborted: {e}"))?;

    log::info!(
        "Ran {} steps; stored images: {}",
        config.steps.len(),
        session.store().names().join(", ")
    );
    Ok(())
}

fn usage() -> String {
    "Usage: raster-edit <config.json>".to_string()
}
