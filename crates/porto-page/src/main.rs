#![forbid(unsafe_code)]

//! Porto page binary entry point.

use std::fs::OpenOptions;
use std::io;
use std::process;
use std::sync::Mutex;

use porto_core::terminal_session::SessionOptions;
use porto_page::app::PageModel;
use porto_page::cli;
use porto_render::style::ColorProfile;
use porto_runtime::{Program, ProgramConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    let opts = cli::Opts::parse();
    if let Err(e) = init_tracing(&opts) {
        eprintln!("Failed to open log file: {e}");
        process::exit(2);
    }

    tracing::info!(version = cli::VERSION, "porto loaded successfully");
    tracing::info!("developed with ❤️ for RevoU Assignment");

    let model = PageModel::new(opts.name.as_deref(), opts.fps);
    let config = ProgramConfig {
        session: SessionOptions {
            mouse_capture: true,
            ..SessionOptions::default()
        },
        profile: color_profile(opts.no_color),
        ..ProgramConfig::default()
    };

    if let Err(e) = Program::with_config(model, config).run() {
        tracing::error!(error = %e, "porto exited with an error");
        eprintln!("Runtime error: {e}");
        process::exit(1);
    }
}

/// Install the fmt subscriber. `PORTO_LOG` controls the filter; output goes
/// to the `--log-file` target when given, else to stderr.
fn init_tracing(opts: &cli::Opts) -> io::Result<()> {
    let filter = EnvFilter::try_from_env("PORTO_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    match &opts.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Resolve the output color profile from the environment. `COLORTERM` set to
/// `truecolor`/`24bit` selects the full palette, a 256color `TERM` the
/// indexed one. `no_color` wins over both.
fn color_profile(no_color: bool) -> ColorProfile {
    let colorterm = std::env::var("COLORTERM").unwrap_or_default();
    let term = std::env::var("TERM").unwrap_or_default();
    let true_color = matches!(colorterm.as_str(), "truecolor" | "24bit");
    let colors_256 = true_color || term.contains("256color");
    ColorProfile::from_flags(true_color, colors_256, no_color)
}
