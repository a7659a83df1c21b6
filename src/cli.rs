// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The CLI is deliberately thin: it turns flags into a CheckerConfig, hands
// the file list to the library, and maps the result to an exit code.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "link-warden",
    version,
    about = "Checks internal and external links in generated HTML pages",
    long_about = "link-warden checks that every internal link in the given HTML pages points to an \
                  existing file (and id), and that every external link is reachable (and has the \
                  linked id). Meant to run in CI right after the site is generated."
)]
pub struct Cli {
    /// HTML files to check
    ///
    /// Internal links may only point to files on disk; linking into a file
    /// that isn't listed here still works, but its ids are unknown.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Directory all page paths are reported relative to (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Output results in JSON format instead of plain lines
    #[arg(long)]
    pub json: bool,

    /// Only check internal links (no network requests)
    #[arg(long)]
    pub skip_external: bool,

    /// Redirects to follow before reporting "too many redirects"
    #[arg(long, default_value_t = link_warden::config::DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,

    /// Per-request timeout in seconds (0 disables it)
    #[arg(long, default_value_t = link_warden::config::DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// More logging on stderr (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["link-warden", "a.html", "docs/b.html"]).unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("a.html"), PathBuf::from("docs/b.html")]);
        assert_eq!(cli.root, None);
        assert!(!cli.json);
        assert!(!cli.skip_external);
        assert_eq!(cli.max_redirects, 30);
        assert_eq!(cli.timeout, 30);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "link-warden",
            "--json",
            "--skip-external",
            "--root",
            "/site",
            "--timeout",
            "0",
            "-vv",
            "index.html",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(cli.skip_external);
        assert_eq!(cli.root, Some(PathBuf::from("/site")));
        assert_eq!(cli.timeout, 0);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_files_are_required() {
        assert!(Cli::try_parse_from(["link-warden"]).is_err());
    }
}
