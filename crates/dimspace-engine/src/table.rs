//! Tabular text rendering of combinations.

use std::sync::Arc;

use dimspace_config::{RenderConfig, TableFormat};
use dimspace_core::{Combination, Value};
use owo_colors::OwoColorize;

/// Renders rows as plain, markdown or CSV text.
///
/// Dimension cells use [`Value::literal`], so strings are quoted. Function
/// cells use [`Value::display`], so raw strings are not. Widths are measured
/// in chars on the uncolored text, once, before any row is written.
///
/// ```
/// use std::sync::Arc;
/// use dimspace_config::TableFormat;
/// use dimspace_core::{Combination, Value};
/// use dimspace_engine::TableFormatter;
///
/// let names: Arc<[Arc<str>]> = vec![Arc::from("dim1")].into();
/// let rows = vec![Combination::new(names.clone(), vec![Value::from(1)])];
///
/// let text = TableFormatter::new(TableFormat::Csv).render(&names, &[], &rows);
/// assert_eq!(text, "dim1\n1\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFormatter {
    format: TableFormat,
    align: bool,
    separator: String,
    color: bool,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

struct Cell<'a> {
    text: String,
    value: Option<&'a Value>,
}

impl TableFormatter {
    pub fn new(format: TableFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            format: config.format,
            align: config.align,
            separator: config.separator.clone(),
            color: config.color,
        }
    }

    pub fn with_align(mut self, align: bool) -> Self {
        self.align = align;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn format(&self) -> TableFormat {
        self.format
    }

    /// Renders a header of `dimensions` then `functions`, and one line per row.
    ///
    /// A function with no value in a row renders as an empty cell.
    pub fn render(
        &self,
        dimensions: &[Arc<str>],
        functions: &[Arc<str>],
        rows: &[Combination],
    ) -> String {
        let header: Vec<&str> = dimensions
            .iter()
            .chain(functions)
            .map(|name| name.as_ref())
            .collect();
        let body: Vec<Vec<Cell<'_>>> = rows
            .iter()
            .map(|row| cells(row, dimensions, functions))
            .collect();

        match self.format {
            TableFormat::Plain => {
                let widths = self.align.then(|| column_widths(&header, &body));
                self.plain(&header, &body, widths.as_deref())
            }
            TableFormat::Markdown => markdown(&header, &body, &column_widths(&header, &body)),
            TableFormat::Csv => csv(&header, &body),
        }
    }

    fn plain(&self, header: &[&str], body: &[Vec<Cell<'_>>], widths: Option<&[usize]>) -> String {
        let mut out = String::new();
        let last = header.len().saturating_sub(1);

        let line: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let text = pad_plain(name, widths, i, last);
                if self.color {
                    text.bold().to_string()
                } else {
                    text
                }
            })
            .collect();
        push_line(&mut out, &line.join(&self.separator));

        for row in body {
            let line: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let text = pad_plain(&cell.text, widths, i, last);
                    if self.color {
                        paint(text, cell.value)
                    } else {
                        text
                    }
                })
                .collect();
            push_line(&mut out, &line.join(&self.separator));
        }
        out
    }
}

fn cells<'a>(
    row: &'a Combination,
    dimensions: &[Arc<str>],
    functions: &[Arc<str>],
) -> Vec<Cell<'a>> {
    let base = dimensions.iter().map(|name| {
        let value = row.value(name);
        Cell {
            text: value.map(Value::literal).unwrap_or_default(),
            value,
        }
    });
    let derived = functions.iter().map(|name| {
        let value = row.derived(name);
        Cell {
            text: value.map(|v| v.display().into_owned()).unwrap_or_default(),
            value,
        }
    });
    base.chain(derived).collect()
}

fn column_widths(header: &[&str], body: &[Vec<Cell<'_>>]) -> Vec<usize> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.text.chars().count());
        }
    }
    widths
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let mut padded = String::with_capacity(text.len() + width.saturating_sub(len));
    padded.push_str(text);
    padded.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    padded
}

// The last plain column is never padded.
fn pad_plain(text: &str, widths: Option<&[usize]>, column: usize, last: usize) -> String {
    match widths {
        Some(widths) if column < last => pad(text, widths[column]),
        _ => text.to_string(),
    }
}

fn paint(text: String, value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => text.bright_black().to_string(),
        Some(Value::Bool(_)) => text.yellow().to_string(),
        Some(Value::Int(_)) | Some(Value::Float(_)) => text.cyan().to_string(),
        Some(Value::Str(_)) => text.green().to_string(),
        Some(Value::List(_)) | Some(Value::Map(_)) => text.magenta().to_string(),
    }
}

fn markdown(header: &[&str], body: &[Vec<Cell<'_>>], widths: &[usize]) -> String {
    let mut out = String::new();
    let row_line = |cells: Vec<String>| format!("| {} |", cells.join(" | "));

    push_line(
        &mut out,
        &row_line(header.iter().zip(widths).map(|(h, w)| pad(h, *w)).collect()),
    );
    push_line(
        &mut out,
        &row_line(widths.iter().map(|w| "-".repeat(*w)).collect()),
    );
    for row in body {
        push_line(
            &mut out,
            &row_line(row.iter().zip(widths).map(|(c, w)| pad(&c.text, *w)).collect()),
        );
    }
    out
}

fn csv(header: &[&str], body: &[Vec<Cell<'_>>]) -> String {
    let mut out = String::new();
    push_line(&mut out, &header.join(","));
    for row in body {
        let line: Vec<&str> = row.iter().map(|c| c.text.as_str()).collect();
        push_line(&mut out, &line.join(","));
    }
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
