//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;
use memdash_core::constants::{DISPLAY_NAME, VERSION};
use memdash_settings::DashboardSettings;

const AFTER_HELP: &str = "\
Examples:
  memdash                     Start on port 8080
  memdash --port 3000         Start on port 3000 (or the next free port)
  memdash --no-browser        Don't open a browser
  memdash --root site/        Serve another directory

Environment:
  MEMDASH_SETTINGS, MEMDASH_HOST, MEMDASH_PORT, MEMDASH_ROOT,
  MEMDASH_NO_BROWSER, MEMDASH_BROWSER_DELAY_MS, MEMDASH_LOG_LEVEL,
  MEMDASH_LOG_FORMAT";

/// Memory analysis dashboard server.
#[derive(Parser, Debug, Default)]
#[command(
    name = "memdash",
    about = "🦀 Start the Memory Analysis Dashboard web server",
    disable_version_flag = true,
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Port to run the server on; the next free port is used if it is taken (default: 8080).
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// Don't automatically open the browser.
    #[arg(long)]
    pub no_browser: bool,

    /// Directory holding the dashboard pages (default: web_dashboard).
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Interface to bind (default: 127.0.0.1).
    #[arg(long, value_name = "ADDR")]
    pub host: Option<String>,

    /// Print version and exit.
    #[arg(short = 'v', long)]
    pub version: bool,
}

impl Cli {
    /// Apply command-line flags over loaded settings. Flags always win.
    pub fn apply(&self, settings: &mut DashboardSettings) {
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if self.no_browser {
            settings.server.auto_open_browser = false;
        }
        if let Some(ref root) = self.root {
            settings.server.root_dir.clone_from(root);
        }
        if let Some(ref host) = self.host {
            settings.server.host.clone_from(host);
        }
    }
}

/// `Memory Analysis Dashboard Server v2.0.0`.
pub fn version_line() -> String {
    format!("{DISPLAY_NAME} v{VERSION}")
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("memdash").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_leave_settings_untouched() {
        let cli = parse(&[]);
        let mut settings = DashboardSettings::default();
        cli.apply(&mut settings);
        assert_eq!(settings, DashboardSettings::default());
        assert!(!cli.version);
    }

    #[test]
    fn short_and_long_port() {
        assert_eq!(parse(&["-p", "3000"]).port, Some(3000));
        assert_eq!(parse(&["--port", "9090"]).port, Some(9090));
    }

    #[test]
    fn port_zero_and_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["memdash", "--port", "0"]).is_err());
        assert!(Cli::try_parse_from(["memdash", "--port", "70000"]).is_err());
        assert!(Cli::try_parse_from(["memdash", "--port", "http"]).is_err());
    }

    #[test]
    fn flags_override_settings() {
        let cli = parse(&["--port", "3000", "--no-browser", "--root", "site", "--host", "0.0.0.0"]);
        let mut settings = DashboardSettings::default();
        settings.server.port = 9999;
        cli.apply(&mut settings);
        assert_eq!(settings.server.port, 3000);
        assert!(!settings.server.auto_open_browser);
        assert_eq!(settings.server.root_dir, Path::new("site"));
        assert_eq!(settings.server.host, "0.0.0.0");
    }

    #[test]
    fn no_browser_absent_keeps_setting() {
        let mut settings = DashboardSettings::default();
        settings.server.auto_open_browser = false;
        parse(&[]).apply(&mut settings);
        assert!(!settings.server.auto_open_browser);
    }

    #[test]
    fn version_flags() {
        assert!(parse(&["-v"]).version);
        assert!(parse(&["--version"]).version);
        assert_eq!(version_line(), format!("Memory Analysis Dashboard Server v{VERSION}"));
    }
}
