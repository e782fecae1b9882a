use std::io::Write;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use keyentry_tui::{Outcome, RunOptions};
use keyentry_util::{default_log_path, open_log_file, redact_sensitive};
use tracing::{info, warn};

/// Exit status used when the user cancels, matching shells' SIGINT convention.
const EXIT_CANCELLED: u8 = 130;

/// Prompt for a Google Gemini API key in a masked terminal form.
///
/// The submitted key is printed to stdout so it can be captured, e.g.
/// `export GEMINI_API_KEY="$(keyentry)"` or `eval "$(keyentry --export GEMINI_API_KEY)"`.
/// The form itself is drawn on stderr.
#[derive(Parser)]
#[command(name = "keyentry", version)]
struct Cli {
    /// Prefill the key field.
    #[arg(long, value_name = "KEY")]
    initial_key: Option<String>,

    /// Print `export VAR='<key>'` instead of the bare key.
    #[arg(long, value_name = "VAR", value_parser = parse_var_name)]
    export: Option<String>,

    /// Theme override: nord, nord_high_contrast or dracula.
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli).await {
        Ok(code) => code,
        Err(error) => {
            let message = redact_sensitive(&format!("{error:#}"));
            warn!(error = %message, "keyentry failed");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let options = RunOptions {
        initial_key: cli.initial_key.unwrap_or_default(),
        theme: cli.theme,
    };

    let mut submitted: Option<String> = None;
    let outcome = keyentry_tui::run(options, |key| submitted = Some(key)).await?;

    match (outcome, submitted) {
        (Outcome::Submitted, Some(key)) => {
            let mut stdout = std::io::stdout().lock();
            write_key(&mut stdout, &key, cli.export.as_deref()).context("failed to write key to stdout")?;
            Ok(ExitCode::SUCCESS)
        }
        (outcome, _) => {
            info!(submitted = outcome.is_submitted(), "No key captured");
            eprintln!("API key entry cancelled");
            Ok(ExitCode::from(EXIT_CANCELLED))
        }
    }
}

/// Logs go to a file because the terminal belongs to the form.
fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let path = default_log_path();
    let Ok(file) = open_log_file(&path) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

fn write_key(out: &mut impl Write, key: &str, export_var: Option<&str>) -> std::io::Result<()> {
    match export_var {
        Some(var) => writeln!(out, "export {var}={}", shell_quote(key)),
        None => writeln!(out, "{key}"),
    }
}

/// Single-quote `value` for POSIX shells.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

fn parse_var_name(raw: &str) -> Result<String, String> {
    let mut chars = raw.chars();
    let valid_start = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(raw.to_string())
    } else {
        Err(format!("'{raw}' is not a valid environment variable name"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "keyentry",
            "--initial-key",
            "AIzaPREFILL",
            "--export",
            "GEMINI_API_KEY",
            "--theme",
            "dracula",
        ])
        .expect("valid arguments");
        assert_eq!(cli.initial_key.as_deref(), Some("AIzaPREFILL"));
        assert_eq!(cli.export.as_deref(), Some("GEMINI_API_KEY"));
        assert_eq!(cli.theme.as_deref(), Some("dracula"));
    }

    #[test]
    fn rejects_invalid_export_names() {
        assert!(Cli::try_parse_from(["keyentry", "--export", "1BAD"]).is_err());
        assert!(Cli::try_parse_from(["keyentry", "--export", "BAD-NAME"]).is_err());
        assert!(Cli::try_parse_from(["keyentry", "--export", ""]).is_err());
    }

    #[test]
    fn bare_key_is_written_on_its_own_line() {
        let mut out = Vec::new();
        write_key(&mut out, "AIzaXYZ", None).expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "AIzaXYZ\n");
    }

    #[test]
    fn export_form_quotes_the_key() {
        let mut out = Vec::new();
        write_key(&mut out, "it's", Some("GEMINI_API_KEY")).expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "export GEMINI_API_KEY='it'\\''s'\n");
    }
}
