//! Colorful console output for dimspace runs.
//!
//! Provides a custom `tracing` layer that formats engine events with colors,
//! and a [`ConsoleProgress`] reporter that logs run progress through it.
//! Everything is written to stderr so tables on stdout stay clean.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (run start/end, progress start/end)
//! - **DEBUG**: Registry and condition changes, progress every 10%
//! - **TRACE**: Individual computed rows

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{debug, info, Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use dimspace_engine::ProgressReporter;

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static RUN_START_NANOS: AtomicU64 = AtomicU64::new(0);

const DEFAULT_FILTER: &str = "dimspace_engine=info,dimspace_console=info";

/// Initializes console logging.
///
/// Safe to call multiple times - only the first call has effect.
/// `RUST_LOG` overrides the default filter.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(DimspaceConsoleLayer)
            .try_init();
    });
}

// Marks the start of a run for elapsed time tracking.
fn mark_run_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    RUN_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since run start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = RUN_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

/// A tracing layer that formats dimspace events with colors.
pub struct DimspaceConsoleLayer;

impl<S: Subscriber> Layer<S> for DimspaceConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !target.starts_with("dimspace_engine") && !target.starts_with("dimspace_console") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    name: Option<String>,
    text: Option<String>,
    title: Option<String>,
    position: Option<String>,
    rows: Option<u64>,
    functions: Option<u64>,
    dimensions: Option<u64>,
    raw_size: Option<u64>,
    index: Option<u64>,
    count: Option<u64>,
    steps: Option<u64>,
    total: Option<u64>,
    percent: Option<u64>,
    duration_ms: Option<u64>,
    hidden: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "name" => self.name = Some(s.trim_matches('"').to_string()),
            "text" => self.text = Some(s.trim_matches('"').to_string()),
            "title" => self.title = Some(s.trim_matches('"').to_string()),
            "position" => self.position = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "rows" => self.rows = Some(value),
            "functions" => self.functions = Some(value),
            "dimensions" => self.dimensions = Some(value),
            "raw_size" => self.raw_size = Some(value),
            "index" => self.index = Some(value),
            "count" => self.count = Some(value),
            "steps" => self.steps = Some(value),
            "total" => self.total = Some(value),
            "percent" => self.percent = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "position" => self.position = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "hidden" {
            self.hidden = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "name" => self.name = Some(value.to_string()),
            "text" => self.text = Some(value.to_string()),
            "title" => self.title = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "run_start" => format_run_start(v),
        "run_end" => format_run_end(v),
        "progress_start" => format_progress_start(v),
        "progress" => format_progress(v),
        "progress_end" => format_progress_end(v),
        "function_added" | "function_removed" => format_function(v, event),
        "condition_set" | "condition_unset" | "conditions_cleared" => format_condition(v, event),
        "dimensions_set" => format_dimensions(v),
        "row" => format_row(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_run_start(v: &EventVisitor) -> String {
    mark_run_start();
    format!(
        "{} {} Running │ {} rows │ {} functions │ {} dimensions",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.rows.unwrap_or(0)).bright_yellow(),
        count(v.functions.unwrap_or(0)).bright_yellow(),
        count(v.dimensions.unwrap_or(0)).bright_yellow(),
    )
}

fn format_run_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Run complete │ {} rows │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        count(v.rows.unwrap_or(0)).bright_yellow(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    )
}

fn format_progress_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} │ {} steps",
        format_elapsed(),
        "▶".bright_blue(),
        v.title.as_deref().unwrap_or("Progress").white().bold(),
        count(v.total.unwrap_or(0)).white(),
    )
}

fn format_progress(v: &EventVisitor) -> String {
    format!(
        "{} {} {:>3}% │ {:>10} / {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        v.percent.unwrap_or(0).bright_magenta().bold(),
        count(v.steps.unwrap_or(0)).white(),
        count(v.total.unwrap_or(0)).white(),
    )
}

fn format_progress_end(v: &EventVisitor) -> String {
    format!(
        "{} {} {} done │ {} steps",
        format_elapsed(),
        "◀".bright_blue(),
        v.title.as_deref().unwrap_or("Progress").white().bold(),
        count(v.steps.unwrap_or(0)).white(),
    )
}

fn format_function(v: &EventVisitor, event: &str) -> String {
    let name = v.name.as_deref().unwrap_or("?");
    if event == "function_removed" {
        return format!("{} {} function {}", format_elapsed(), "-".bright_red(), name.bold());
    }

    let mut output = format!(
        "{} {} function {}",
        format_elapsed(),
        "+".bright_green(),
        name.bold()
    );
    match v.position.as_deref() {
        Some("First") => output.push_str(&format!(" │ {}", "first".bright_magenta())),
        Some("Last") => output.push_str(&format!(" │ {}", "last".bright_magenta())),
        _ => {}
    }
    if v.hidden == Some(true) {
        output.push_str(&format!(" │ {}", "hidden".bright_black()));
    }
    output
}

fn format_condition(v: &EventVisitor, event: &str) -> String {
    match event {
        "condition_set" => format!(
            "{} {} condition [{}] {}",
            format_elapsed(),
            "+".bright_green(),
            v.position.as_deref().unwrap_or("?"),
            v.text.as_deref().unwrap_or("").italic()
        ),
        "condition_unset" => format!(
            "{} {} condition [{}] {}",
            format_elapsed(),
            "-".bright_red(),
            v.position.as_deref().unwrap_or("?"),
            v.text.as_deref().unwrap_or("").italic()
        ),
        _ => format!(
            "{} {} {} conditions cleared",
            format_elapsed(),
            "-".bright_red(),
            count(v.count.unwrap_or(0))
        ),
    }
}

fn format_dimensions(v: &EventVisitor) -> String {
    format!(
        "{} {} dimensions │ {} │ {} combinations",
        format_elapsed(),
        "●".bright_cyan(),
        count(v.dimensions.unwrap_or(0)).bright_yellow(),
        count(v.raw_size.unwrap_or(0)).bright_yellow(),
    )
}

fn format_row(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    format!(
        "{} {} Row {:>10}",
        format_elapsed(),
        "✓".bright_green(),
        count(v.index.unwrap_or(0)).bright_black(),
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

/// Progress reporter that logs through the console layer.
///
/// Logs the title and total on start, a debug line each time another 10%
/// of the steps is done, and a completion line.
#[derive(Debug, Clone, Default)]
pub struct ConsoleProgress {
    title: String,
    total: usize,
    steps: usize,
    // Last logged tenth, 0..=10.
    decile: usize,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn total(&self) -> usize {
        self.total
    }

    // Percentage done, 100 for an empty run.
    fn percent(&self) -> usize {
        if self.total == 0 {
            100
        } else {
            (self.steps.min(self.total) * 100) / self.total
        }
    }
}

impl ProgressReporter for ConsoleProgress {
    fn start(&mut self, title: &str, total: usize) {
        self.title = title.to_string();
        self.total = total;
        self.steps = 0;
        self.decile = 0;
        info!(event = "progress_start", title = %title, total = total as u64);
    }

    fn increment(&mut self) {
        self.steps += 1;
        let percent = self.percent();
        if percent / 10 > self.decile {
            self.decile = percent / 10;
            debug!(
                event = "progress",
                percent = percent as u64,
                steps = self.steps as u64,
                total = self.total as u64,
            );
        }
    }

    fn finish(&mut self) {
        info!(
            event = "progress_end",
            title = %self.title,
            steps = self.steps as u64,
        );
    }
}
