use std::fs::OpenOptions;
use std::path::Path;

fn builder(verbose: bool) -> env_logger::Builder {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // reqwest/hyper internals are noisy at debug
    builder.filter_module("hyper_util", log::LevelFilter::Warn);
    builder.filter_module("reqwest", log::LevelFilter::Warn);
    builder
}

/// Log to stderr (CLI commands; stdout carries command output)
pub fn init_stderr(verbose: bool) {
    let _ = builder(verbose)
        .target(env_logger::Target::Stderr)
        .try_init();
}

/// Log to a file (TUI; the terminal belongs to the UI)
pub fn init_file(path: &Path, verbose: bool) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = builder(verbose)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
    Ok(())
}
