use clap::Parser;
use tracing_subscriber::EnvFilter;

use toygen::cli::Cli;
use toygen::{Action, Settings, Toygen, ToygenError};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    let action = cli.action();
    let toygen = match &action {
        // A template needs no settings, and must work even when toygen.toml is broken.
        Action::Template { .. } => Settings::defaults()
            .map(Toygen::with_settings)
            .map_err(ToygenError::from),
        _ => cli.builder().load(),
    }
    .unwrap_or_else(|e| fail("Failed to load settings", &e));

    toygen
        .handle_and_print(&action)
        .unwrap_or_else(|e| fail("Generation failed", &e));
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(context: &str, err: &ToygenError) -> ! {
    eprintln!("{context}:\n{err}");
    if let ToygenError::UnknownSettings(errors) = err {
        for inner in errors {
            eprintln!("  {inner}");
        }
    }
    std::process::exit(1);
}
