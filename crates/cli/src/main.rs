#![forbid(unsafe_code)]

mod commands;
mod config;
mod outline;

#[cfg(test)]
mod tests;

use config::{Parsed, usage};
use tracing_subscriber::EnvFilter;

fn init_logging(filter: &str) {
    let filter =
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cfg = match config::parse_args(&args, |name| std::env::var(name).ok()) {
        Ok(Parsed::Help) => {
            print!("{}", usage());
            std::process::exit(0);
        }
        Ok(Parsed::Run(cfg)) => cfg,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("run `ej --help` for usage");
            std::process::exit(2);
        }
    };
    init_logging(&cfg.log_filter);
    tracing::debug!(command = ?cfg.command, "starting");

    match commands::run(&cfg) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
