//! Console output: status lines, retention progress and result rendering.

use crate::context::{AppContext, VerbosityLevel};
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;

/// When to emit ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color on a terminal unless NO_COLOR is set
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Parse a NEXUS_COLOR value; anything unrecognized means auto
    pub fn from_env_value(value: &str) -> Self {
        Self::from_str(value, true).unwrap_or(Self::Auto)
    }
}

/// Rendering of command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tables and plain text
    Pretty,
    Json,
    #[value(alias = "yml")]
    Yaml,
}

/// Writes status lines and progress bars, colored or plain.
///
/// Results go to stdout, errors to stderr.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    color: bool,
}

impl Console {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn for_context(ctx: &AppContext) -> Self {
        Self::new(should_color(ctx))
    }

    fn mark(&self, symbol: &str, paint: fn(&str) -> String) -> String {
        if self.color {
            paint(symbol)
        } else {
            symbol.to_string()
        }
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", self.mark("✓", |s| s.green().bold().to_string()), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", self.mark("✗", |s| s.red().bold().to_string()), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", self.mark("⚠", |s| s.yellow().bold().to_string()), message);
    }

    /// Progress bar for a batch of deletions. Hidden when output is plain.
    pub fn progress_bar(&self, len: u64, message: &str) -> ProgressBar {
        if !self.color {
            println!("{} (0/{})", message, len);
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{msg} [{bar:30.cyan/blue}] {pos}/{len}")
        {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb
    }

    pub fn finish_progress(&self, pb: ProgressBar, message: &str) {
        pb.finish_and_clear();
        self.success(message);
    }
}

/// Whether output for this context should carry ANSI colors
pub fn should_color(ctx: &AppContext) -> bool {
    match ctx.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::env::var_os("NO_COLOR").is_none()
                && (std::io::stdout().is_terminal() || std::io::stderr().is_terminal())
        }
    }
}

/// Print a diagnostic line to stderr when running at `level` or above
pub fn print(ctx: &AppContext, level: VerbosityLevel, message: &str) {
    if ctx.verbosity >= level {
        eprintln!("{}", message);
    }
}

pub fn success(ctx: &AppContext, message: &str) {
    Console::for_context(ctx).success(message);
}

pub fn error(ctx: &AppContext, message: &str) {
    Console::for_context(ctx).error(message);
}

pub fn warning(ctx: &AppContext, message: &str) {
    Console::for_context(ctx).warning(message);
}

/// Checkmark prefix for kept tags in a dry run
pub fn checkmark(ctx: &AppContext) -> String {
    Console::for_context(ctx).mark("✓", |s| s.green().to_string())
}

/// Result types with a human-readable rendering
pub trait Formattable: Serialize {
    fn format_pretty(&self) -> String;
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to render JSON: {}", e))
}

fn to_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .map_err(|e| format!("Failed to render YAML: {}", e))
}

/// Render one result in the requested format
pub fn format_output<T: Formattable>(item: &T, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Pretty => Ok(item.format_pretty()),
        OutputFormat::Json => to_json(item),
        OutputFormat::Yaml => to_yaml(item),
    }
}

/// Render rows as a borderless table, or as a JSON/YAML sequence
pub fn format_table<T>(rows: &[T], format: OutputFormat) -> Result<String, String>
where
    T: Serialize + tabled::Tabled,
{
    match format {
        OutputFormat::Pretty => {
            use tabled::{Table, settings::Style};
            Ok(Table::new(rows).with(Style::blank()).to_string())
        }
        OutputFormat::Json => to_json(rows),
        OutputFormat::Yaml => to_yaml(rows),
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
