//! Command-line Interface
//!
//! Four positional arguments naming the two release directories and their
//! tags, kept positional so the invocation matches the release pipeline's
//! existing call sites.

use std::path::PathBuf;

use clap::Parser;

/// Compare two listings releases and gate on regressions
#[derive(Debug, Parser)]
#[command(
    name = "showgate",
    version,
    about = "Compare two listings releases, report regressions, fail on CRITICAL"
)]
pub struct Cli {
    /// Directory holding the latest release's venue files
    pub current_dir: PathBuf,

    /// Directory holding the previous release's venue files
    pub previous_dir: PathBuf,

    /// Tag of the latest release (YYYYMMDD.HHMMSS)
    pub current_tag: String,

    /// Tag of the previous release
    pub previous_tag: String,
}

impl Cli {
    /// Parse arguments. A usage error prints to stderr and exits with
    /// status 1 (not clap's default 2, which the release pipeline would
    /// misread as a comparison failure of a different kind).
    pub fn parse_or_exit() -> Self {
        match Cli::try_parse() {
            Ok(cli) => cli,
            Err(err) => {
                let code = if err.use_stderr() { 1 } else { 0 };
                let _ = err.print();
                std::process::exit(code);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_four_positionals() {
        let cli = Cli::try_parse_from([
            "showgate",
            "releases/current",
            "releases/previous",
            "20250801.063000",
            "20250731.063000",
        ])
        .unwrap();

        assert_eq!(cli.current_dir, PathBuf::from("releases/current"));
        assert_eq!(cli.previous_dir, PathBuf::from("releases/previous"));
        assert_eq!(cli.current_tag, "20250801.063000");
        assert_eq!(cli.previous_tag, "20250731.063000");
    }

    #[test]
    fn test_missing_argument_is_usage_error() {
        let err = Cli::try_parse_from(["showgate", "releases/current"]).unwrap_err();
        assert!(err.use_stderr());
    }
}
