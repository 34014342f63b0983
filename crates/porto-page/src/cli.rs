#![forbid(unsafe_code)]

//! Command-line argument parsing for the porto binary.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Environment overrides are applied before flags, so an explicit flag always
//! wins over its `PORTO_*` counterpart.

use std::env;
use std::path::PathBuf;
use std::process;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_FPS: u64 = 10;

const HELP_TEXT: &str = "\
porto — the Porto Kreatif landing page, rendered in the terminal

USAGE:
    porto [OPTIONS]

OPTIONS:
    --name NAME          Preseed the visitor name (skips the welcome prompt)
    --fps N              Animation ticks per second (default: 10)
    --no-color           Monochrome output
    --log-file PATH      Append tracing output to PATH instead of stderr
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    1-5             Jump to a section
    n / p           Next / previous section
    m               Open the section menu on narrow terminals
    PgUp/PgDn, Home/End, mouse wheel
                    Free scrolling
    q / Ctrl+C      Quit

ENVIRONMENT VARIABLES:
    PORTO_NAME       Override --name
    PORTO_FPS        Override --fps
    PORTO_LOG_FILE   Override --log-file
    PORTO_LOG        Tracing filter directive (default: info)
    NO_COLOR         Same as --no-color";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Visitor name preseed. `None` opens the name prompt at startup.
    pub name: Option<String>,
    /// Animation ticks per second.
    pub fps: u64,
    /// Force monochrome output.
    pub no_color: bool,
    /// Tracing log destination. `None` logs to stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            name: None,
            fps: DEFAULT_FPS,
            no_color: false,
            log_file: None,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags. A malformed flag value exits with
    /// status 2; a malformed environment value is ignored.
    pub fn parse() -> Self {
        let mut opts = Self::default();

        // Environment defaults first
        if let Ok(val) = env::var("PORTO_NAME")
            && !val.is_empty()
        {
            opts.name = Some(val);
        }
        if let Ok(val) = env::var("PORTO_FPS")
            && let Some(n) = parse_fps(&val)
        {
            opts.fps = n;
        }
        if let Ok(val) = env::var("NO_COLOR")
            && !val.is_empty()
        {
            opts.no_color = true;
        }
        if let Ok(val) = env::var("PORTO_LOG_FILE")
            && !val.is_empty()
        {
            opts.log_file = Some(PathBuf::from(val));
        }

        // Command-line flags override env vars
        let args: Vec<String> = env::args().skip(1).collect();
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("porto {VERSION}");
                    process::exit(0);
                }
                "--no-color" => {
                    opts.no_color = true;
                }
                "--name" => {
                    i += 1;
                    opts.name = Some(take_value(&args, i, "--name"));
                }
                "--fps" => {
                    i += 1;
                    opts.fps = fps_value(&take_value(&args, i, "--fps"));
                }
                "--log-file" => {
                    i += 1;
                    opts.log_file = Some(PathBuf::from(take_value(&args, i, "--log-file")));
                }
                other => {
                    if let Some(val) = other.strip_prefix("--name=") {
                        opts.name = Some(val.to_string());
                    } else if let Some(val) = other.strip_prefix("--fps=") {
                        opts.fps = fps_value(val);
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = Some(PathBuf::from(val));
                    } else {
                        eprintln!("Unknown argument: {other}");
                        eprintln!("Run with --help for usage information.");
                        process::exit(2);
                    }
                }
            }
            i += 1;
        }

        opts
    }
}

fn take_value(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i) {
        Some(val) => val.clone(),
        None => {
            eprintln!("{flag} needs a value");
            eprintln!("Run with --help for usage information.");
            process::exit(2);
        }
    }
}

fn fps_value(raw: &str) -> u64 {
    match parse_fps(raw) {
        Some(n) => n,
        None => {
            eprintln!("Invalid --fps value: {raw}");
            process::exit(2);
        }
    }
}

/// `Some` only for a positive integer. The animation timer cannot run with
/// a zero period.
fn parse_fps(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok().filter(|&n| n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.name, None);
        assert_eq!(opts.fps, 10);
        assert!(!opts.no_color);
        assert_eq!(opts.log_file, None);
    }

    #[test]
    fn version_string_nonempty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn parse_fps_accepts_positive_integers() {
        assert_eq!(parse_fps("1"), Some(1));
        assert_eq!(parse_fps("10"), Some(10));
        assert_eq!(parse_fps("120"), Some(120));
    }

    #[test]
    fn parse_fps_rejects_zero_and_garbage() {
        assert_eq!(parse_fps("0"), None);
        assert_eq!(parse_fps(""), None);
        assert_eq!(parse_fps("-3"), None);
        assert_eq!(parse_fps("fast"), None);
        assert_eq!(parse_fps("10.5"), None);
    }

    #[test]
    fn help_text_covers_every_flag() {
        for flag in ["--name", "--fps", "--no-color", "--log-file", "--help", "--version"] {
            assert!(HELP_TEXT.contains(flag), "HELP_TEXT is missing {flag}");
        }
    }

    #[test]
    fn help_text_contains_env_vars() {
        assert!(HELP_TEXT.contains("PORTO_NAME"));
        assert!(HELP_TEXT.contains("PORTO_FPS"));
        assert!(HELP_TEXT.contains("PORTO_LOG_FILE"));
        assert!(HELP_TEXT.contains("PORTO_LOG"));
        assert!(HELP_TEXT.contains("NO_COLOR"));
    }
}
