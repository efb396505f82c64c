//! Rendering for the formats behind `--output`.
//!
//! Handlers build serializable row and view structs and hand them to a
//! [`Renderer`], which owns the format, color, and quiet decisions for
//! the invocation. Metric columns are right-aligned in table mode so
//! digit groups line up; structured formats serialize the same structs
//! unchanged.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::commands::util::format_metric;

/// Per-invocation output state, derived from the global flags once.
pub struct Renderer {
    format: OutputFormat,
    color: bool,
    quiet: bool,
}

impl Renderer {
    pub fn new(global: &GlobalOpts) -> Self {
        Self {
            format: global.output.clone(),
            color: resolve_color(&global.color),
            quiet: global.quiet,
        }
    }

    /// Emit a list. Table mode renders the rows via their `Tabled`
    /// derive; plain mode emits `id_of` per row, one per line.
    pub fn list<R>(&self, rows: &[R], id_of: impl Fn(&R) -> String)
    where
        R: Serialize + Tabled,
    {
        let text = match self.format {
            OutputFormat::Table => Table::new(rows).with(Style::rounded()).to_string(),
            OutputFormat::Plain => rows.iter().map(id_of).collect::<Vec<_>>().join("\n"),
            _ => self.serialize(rows),
        };
        self.emit(&text);
    }

    /// Like [`list`](Self::list) for rows whose columns after the
    /// first hold metric values; table mode right-aligns those.
    pub fn metric_list<R>(&self, rows: &[R], id_of: impl Fn(&R) -> String)
    where
        R: Serialize + Tabled,
    {
        if matches!(self.format, OutputFormat::Table) {
            let table = Table::new(rows)
                .with(Style::rounded())
                .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
                .to_string();
            self.emit(&table);
        } else {
            self.list(rows, id_of);
        }
    }

    /// Emit a single view. Table mode uses the caller's detail block;
    /// plain mode emits `id_of` alone.
    pub fn single<T: Serialize>(
        &self,
        view: &T,
        detail: impl FnOnce(&T) -> String,
        id_of: impl FnOnce(&T) -> String,
    ) {
        let text = match self.format {
            OutputFormat::Table => detail(view),
            OutputFormat::Plain => id_of(view),
            _ => self.serialize(view),
        };
        self.emit(&text);
    }

    /// Start a key/value detail block in this renderer's palette.
    pub fn details(&self) -> DetailBlock {
        DetailBlock {
            color: self.color,
            lines: Vec::new(),
        }
    }

    /// Table-mode annotation on stderr (page counts, captions).
    /// Suppressed by `--quiet` and by every structured format.
    pub fn note(&self, text: &str) {
        if !self.quiet && matches!(self.format, OutputFormat::Table) {
            eprintln!("{text}");
        }
    }

    fn serialize<T: Serialize + ?Sized>(&self, data: &T) -> String {
        let result = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(data),
            OutputFormat::JsonCompact => serde_json::to_string(data),
            _ => return serde_yaml::to_string(data).unwrap_or_default(),
        };
        result.unwrap_or_default()
    }

    fn emit(&self, text: &str) {
        if self.quiet || text.is_empty() {
            return;
        }
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{text}");
    }
}

/// Accumulates `key: value` lines, keys dimmed when color is on.
pub struct DetailBlock {
    color: bool,
    lines: Vec<String>,
}

impl DetailBlock {
    pub fn field(mut self, key: &str, value: impl AsRef<str>) -> Self {
        let value = value.as_ref();
        self.lines.push(if self.color {
            format!("{}: {value}", key.dimmed())
        } else {
            format!("{key}: {value}")
        });
        self
    }

    /// A metric value with digit grouping.
    pub fn metric(self, key: &str, value: f64) -> Self {
        let rendered = format_metric(value);
        self.field(key, rendered)
    }

    pub fn percent(self, key: &str, value: f64, decimals: usize) -> Self {
        self.field(key, format!("{value:.decimals$}%"))
    }

    pub fn render(self) -> String {
        self.lines.join("\n")
    }
}

fn resolve_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}
