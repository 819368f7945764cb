//! Human-readable error output.
//!
//! A failed binding call can echo its error to stderr as one line (see
//! [`crate::Binder::show_errors`]). Preflight results carry several errors;
//! [`BindErrors::pretty_print`] renders them grouped by origin:
//!
//! ```text
//! Binding errors (3):
//!
//!   (declaration):
//!     • field 'token': 'key' attribute not found
//!
//!   env:APP_NAME:
//!     • 'name': required but not set
//!
//!   env:APP_PORT:
//!     • 'port': expected int, got "eighty": invalid digit found in string
//!
//! Hints:
//!   • Add #[spec(key = "...")] to field 'token'
//!   • Set APP_NAME or give field 'name' a default
//! ```

use std::io::Write;

use crate::error::{group_by_origin, BindError, BindErrors, BindValidation};
use stillwater::Validation;

/// Options for pretty printing errors.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Enable colored output (auto-detected by default).
    pub color: ColorOption,
    /// Group errors by origin.
    pub group_by_origin: bool,
    /// Show fix suggestions.
    pub show_suggestions: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            color: ColorOption::Auto,
            group_by_origin: true,
            show_suggestions: true,
        }
    }
}

impl ReportOptions {
    /// Create options with colors disabled.
    pub fn no_color() -> Self {
        Self {
            color: ColorOption::Never,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: ColorOption) -> Self {
        self.color = color;
        self
    }

    pub fn with_grouping(mut self, group: bool) -> Self {
        self.group_by_origin = group;
        self
    }

    pub fn with_suggestions(mut self, show: bool) -> Self {
        self.show_suggestions = show;
        self
    }
}

/// Color output option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorOption {
    /// Auto-detect based on terminal capability.
    Auto,
    Always,
    Never,
}

/// ANSI color codes for terminal output.
struct Colors {
    error: &'static str,
    info: &'static str,
    path: &'static str,
    value: &'static str,
    hint: &'static str,
    reset: &'static str,
}

impl Colors {
    fn enabled() -> Self {
        Self {
            error: "\x1b[1;31m", // bold red
            info: "\x1b[1;36m",  // bold cyan
            path: "\x1b[1;37m",  // bold white
            value: "\x1b[33m",   // yellow
            hint: "\x1b[32m",    // green
            reset: "\x1b[0m",
        }
    }

    fn disabled() -> Self {
        Self {
            error: "",
            info: "",
            path: "",
            value: "",
            hint: "",
            reset: "",
        }
    }
}

struct ErrorPrinter<'a> {
    options: &'a ReportOptions,
    colors: Colors,
}

impl<'a> ErrorPrinter<'a> {
    fn new(options: &'a ReportOptions, use_color: bool) -> Self {
        let colors = if use_color {
            Colors::enabled()
        } else {
            Colors::disabled()
        };
        Self { options, colors }
    }

    fn print(&self, errors: &BindErrors, writer: &mut dyn Write) {
        let c = &self.colors;

        writeln!(
            writer,
            "\n{}Binding errors ({}):{}\n",
            c.error,
            errors.len(),
            c.reset
        )
        .ok();

        if self.options.group_by_origin {
            for (origin, errs) in group_by_origin(errors) {
                writeln!(writer, "  {}{}:{}", c.info, origin, c.reset).ok();
                for error in errs {
                    self.print_error(error, writer);
                }
                writeln!(writer).ok();
            }
        } else {
            for error in errors.iter() {
                self.print_error(error, writer);
            }
            writeln!(writer).ok();
        }

        if self.options.show_suggestions {
            self.print_suggestions(errors, writer);
        }
    }

    fn print_error(&self, error: &BindError, writer: &mut dyn Write) {
        let c = &self.colors;

        let line = match error {
            BindError::MissingKey { field } => format!(
                "field '{}{}{}': 'key' attribute not found",
                c.path, field, c.reset
            ),
            BindError::RequiredValueMissing { field, .. } => {
                format!("'{}{}{}': required but not set", c.path, field, c.reset)
            }
            BindError::Coercion {
                field,
                raw,
                expected,
                message,
                ..
            } => format!(
                "'{}{}{}': expected {}, got \"{}{}{}\": {}",
                c.path, field, c.reset, expected, c.value, raw, c.reset, message
            ),
            BindError::Hook { field, message, .. } => {
                format!("'{}{}{}': {}", c.path, field, c.reset, message)
            }
            BindError::UnsupportedKind { field, kind } => format!(
                "'{}{}{}': type {} cannot be a flag",
                c.path, field, c.reset, kind
            ),
            BindError::DuplicateFlag { field, flag } => format!(
                "'{}{}{}': flag --{} is already taken",
                c.path, field, c.reset, flag
            ),
            BindError::Flags { message, .. } => message.clone(),
        };

        writeln!(writer, "    {}•{} {}", c.error, c.reset, line).ok();
    }

    fn print_suggestions(&self, errors: &BindErrors, writer: &mut dyn Write) {
        let c = &self.colors;
        let suggestions: Vec<_> = errors.iter().filter_map(|e| e.suggestion()).collect();

        if !suggestions.is_empty() {
            writeln!(writer, "{}Hints:{}", c.hint, c.reset).ok();
            for suggestion in suggestions {
                writeln!(writer, "  • {}", suggestion).ok();
            }
            writeln!(writer).ok();
        }
    }
}

fn should_use_color(color_option: ColorOption) -> bool {
    match color_option {
        ColorOption::Always => true,
        ColorOption::Never => false,
        ColorOption::Auto => {
            use std::io::IsTerminal;
            std::io::stderr().is_terminal()
        }
    }
}

/// Write `error` to stderr as a single line.
pub fn echo(error: &BindError) {
    echo_to(error, &mut std::io::stderr());
}

fn echo_to(error: &BindError, writer: &mut dyn Write) {
    let line = error.to_string().replace('\n', " ");
    writeln!(writer, "{}", line.trim_end()).ok();
}

impl BindErrors {
    /// Pretty print errors to stderr.
    pub fn pretty_print(&self, options: &ReportOptions) {
        let printer = ErrorPrinter::new(options, should_use_color(options.color));
        printer.print(self, &mut std::io::stderr());
    }

    /// Pretty print to a string. `ColorOption::Auto` means no color here.
    pub fn format(&self, options: &ReportOptions) -> String {
        let use_color = options.color == ColorOption::Always;
        let printer = ErrorPrinter::new(options, use_color);
        let mut buf = Vec::new();
        printer.print(self, &mut buf);
        String::from_utf8(buf).unwrap_or_default()
    }
}

/// Pretty printing shortcuts for preflight results.
pub trait ValidationExt<T> {
    /// Unwrap, or pretty print the errors and exit with code 1.
    fn unwrap_or_exit(self) -> T;

    /// Convert to `Result`, pretty printing on error.
    fn unwrap_or_print(self) -> Result<T, BindErrors>;
}

impl<T> ValidationExt<T> for BindValidation<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Validation::Success(value) => value,
            Validation::Failure(errors) => {
                errors.pretty_print(&ReportOptions::default());
                std::process::exit(1);
            }
        }
    }

    fn unwrap_or_print(self) -> Result<T, BindErrors> {
        match self {
            Validation::Success(value) => Ok(value),
            Validation::Failure(errors) => {
                errors.pretty_print(&ReportOptions::default());
                Err(errors)
            }
        }
    }
}
