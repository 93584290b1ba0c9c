//! Colorful console output for solve events.
//!
//! Provides a custom `tracing` layer that formats solver events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve and stage start/end)
//! - **DEBUG**: Relaxations, procurement binds, shadowed and discarded units
//! - **WARN**: Procurement budget overruns
//! - **ERROR**: Matching failures, including the rendered score matrix

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Event target prefix accepted by the layer.
const SOLVER_TARGET: &str = "loadout_solver";

/// Initializes the solver console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing with `loadout_solver=info` unless
/// `RUST_LOG` says otherwise.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let default_directive = format!("{SOLVER_TARGET}=info")
            .parse::<Directive>()
            .unwrap_or_else(|_| LevelFilter::INFO.into());
        let filter = EnvFilter::builder()
            .with_default_directive(default_directive)
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since solve start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 _                    _             _
| |    ___   __ _  __| | ___  _   _| |_
| |   / _ \ / _` |/ _` |/ _ \| | | | __|
| |__| (_) | (_| | (_| | (_) | |_| | |_
|_____\___/ \__,_|\__,_|\___/ \__,_|\__|
"#;

    let version_line = format!("        v{} - Inventory to Demand Matching\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with(SOLVER_TARGET) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    error: Option<String>,
    matrix: Option<String>,
    item: Option<String>,
    node: Option<String>,
    entry: Option<String>,
    by: Option<String>,
    stage: Option<u64>,
    configuration_count: Option<u64>,
    solvable_count: Option<u64>,
    inventory_count: Option<u64>,
    group_count: Option<u64>,
    candidate_count: Option<u64>,
    assignment_count: Option<u64>,
    matched: Option<u64>,
    relaxed: Option<u64>,
    collected: Option<u64>,
    cleared: Option<u64>,
    binds: Option<u64>,
    requeues: Option<u64>,
    unit: Option<u64>,
    depth: Option<u64>,
    group: Option<u64>,
    from_group: Option<u64>,
    to_group: Option<u64>,
    limit: Option<u64>,
    remaining: Option<u64>,
    duration_ms: Option<u64>,
    score: Option<i64>,
    strict: Option<bool>,
    budget_exceeded: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "stage" => self.stage = Some(value),
            "configuration_count" => self.configuration_count = Some(value),
            "solvable_count" => self.solvable_count = Some(value),
            "inventory_count" => self.inventory_count = Some(value),
            "group_count" => self.group_count = Some(value),
            "candidate_count" => self.candidate_count = Some(value),
            "assignment_count" => self.assignment_count = Some(value),
            "matched" => self.matched = Some(value),
            "relaxed" => self.relaxed = Some(value),
            "collected" => self.collected = Some(value),
            "cleared" => self.cleared = Some(value),
            "binds" => self.binds = Some(value),
            "requeues" => self.requeues = Some(value),
            "unit" => self.unit = Some(value),
            "depth" => self.depth = Some(value),
            "group" => self.group = Some(value),
            "from_group" => self.from_group = Some(value),
            "to_group" => self.to_group = Some(value),
            "limit" => self.limit = Some(value),
            "remaining" => self.remaining = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "score" => self.score = Some(value),
            _ => self.record_u64(field, value.max(0) as u64),
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "strict" => self.strict = Some(value),
            "budget_exceeded" => self.budget_exceeded = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let value = Some(value.to_string());
        match field.name() {
            "event" => self.event = value,
            "message" => self.message = value,
            "error" => self.error = value,
            "matrix" => self.matrix = value,
            "item" => self.item = value,
            "node" => self.node = value,
            "entry" => self.entry = value,
            "by" => self.by = value,
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "stage_start" => format_stage_start(v),
        "stage_end" => format_stage_end(v),
        "relaxation" => format_relaxation(v, level),
        "bind" => format_bind(v, level),
        "shadowed" => format_shadowed(v, level),
        "discard" => format_discard(v, level),
        "budget_exceeded" => format_budget_exceeded(v),
        "matching_failed" => format_matching_failed(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn stage_name(stage: Option<u64>) -> &'static str {
    match stage {
        Some(1) => "Direct matching",
        Some(2) => "Procurement",
        _ => "Unknown stage",
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();

    let mut output = format!(
        "{} {} Solving │ {} configurations │ {} solvable │ {} units",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.configuration_count).bright_yellow(),
        count(v.solvable_count).bright_yellow(),
        count(v.inventory_count).bright_yellow(),
    );
    if v.strict == Some(false) {
        output.push_str(&format!(" │ {}", "relaxed matching".bright_magenta()));
    }
    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let assignments = count(v.assignment_count);
    let collected = count(v.collected);
    let cleared = count(v.cleared);
    let duration = format_duration_ms(v.duration_ms.unwrap_or(0));

    let mut output = format!(
        "{} {} Solving complete │ {} │ {} assignments",
        format_elapsed(),
        "■".bright_cyan().bold(),
        duration.yellow(),
        assignments.white(),
    );

    // Summary box
    let inner_width: usize = 42;
    let rule = "═".repeat(inner_width);
    output.push_str("\n\n");
    output.push_str(&format!("╔{}╗", rule).bright_cyan().to_string());
    output.push('\n');
    for (label, value) in [("Collected:", collected), ("Cleared:", cleared)] {
        output.push_str(&format!(
            "{}  {:<14}{:>24}  {}",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
        output.push('\n');
    }
    output.push_str(&format!("╚{}╝", rule).bright_cyan().to_string());
    output.push('\n');

    output
}

fn format_stage_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} started",
        format_elapsed(),
        "▶".bright_blue(),
        stage_name(v.stage).white().bold()
    )
}

fn format_stage_end(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} {} ended │ {} groups │ {} candidates",
        format_elapsed(),
        "◀".bright_blue(),
        stage_name(v.stage).white().bold(),
        count(v.group_count).white(),
        count(v.candidate_count).white(),
    );

    if let Some(matched) = v.matched {
        output.push_str(&format!(
            " │ {} matched",
            matched
                .to_formatted_string(&Locale::en)
                .bright_magenta()
                .bold()
        ));
    }
    if let Some(relaxed) = v.relaxed.filter(|r| *r > 0) {
        output.push_str(&format!(
            " │ {} relaxed",
            relaxed.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }
    if let Some(binds) = v.binds {
        output.push_str(&format!(
            " │ {} binds",
            binds.to_formatted_string(&Locale::en).bright_magenta().bold()
        ));
    }
    if let Some(requeues) = v.requeues.filter(|r| *r > 0) {
        output.push_str(&format!(
            " │ {} requeued",
            requeues.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }
    if v.budget_exceeded == Some(true) {
        output.push_str(&format!(" │ {}", "budget exceeded".bright_red().bold()));
    }

    output
}

fn format_relaxation(v: &EventVisitor, level: Level) -> String {
    if level < Level::DEBUG {
        return String::new();
    }

    format!(
        "{} {} Entry {} ({}) │ group {} → {} │ score {}",
        format_elapsed(),
        "↪".bright_yellow(),
        v.entry.as_deref().unwrap_or("?").white(),
        v.item.as_deref().unwrap_or("?"),
        v.from_group.unwrap_or(0),
        v.to_group.unwrap_or(0),
        format_score(v.score),
    )
}

fn format_bind(v: &EventVisitor, level: Level) -> String {
    if level < Level::DEBUG {
        return String::new();
    }

    format!(
        "{} {} Unit {:>6} ({}) → node {} │ depth {} │ group {}",
        format_elapsed(),
        "✓".bright_green(),
        count(v.unit).bright_black(),
        v.item.as_deref().unwrap_or("?"),
        v.node.as_deref().unwrap_or("?").white(),
        v.depth.unwrap_or(0),
        v.group.unwrap_or(0),
    )
}

fn format_shadowed(v: &EventVisitor, level: Level) -> String {
    if level < Level::DEBUG {
        return String::new();
    }

    format!(
        "{} {} Unit {:>6} released from node {} │ shadowed by {}",
        format_elapsed(),
        "↺".bright_yellow(),
        count(v.unit).bright_black(),
        v.node.as_deref().unwrap_or("?"),
        v.by.as_deref().unwrap_or("?").white(),
    )
}

fn format_discard(v: &EventVisitor, level: Level) -> String {
    if level < Level::DEBUG {
        return String::new();
    }

    format!(
        "{} {} Unit {:>6} ({}) no longer needed",
        format_elapsed(),
        "✗".bright_black(),
        count(v.unit).bright_black(),
        v.item.as_deref().unwrap_or("?"),
    )
}

fn format_budget_exceeded(v: &EventVisitor) -> String {
    format!(
        "{} {} Procurement budget of {} iterations exhausted │ {} units unprocessed",
        format_elapsed(),
        "⚠".bright_red().bold(),
        count(v.limit).bright_yellow(),
        count(v.remaining).bright_yellow(),
    )
}

fn format_matching_failed(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} Matching failed │ {}",
        format_elapsed(),
        "✗".bright_red().bold(),
        v.error.as_deref().unwrap_or("unknown error").bright_red(),
    );
    if let Some(ref matrix) = v.matrix {
        output.push('\n');
        output.push_str(matrix);
    }
    output
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

fn format_score(score: Option<i64>) -> String {
    match score {
        Some(n) if n < 0 => n.to_string().bright_red().to_string(),
        Some(n) if n > 0 => n.to_formatted_string(&Locale::en).bright_green().to_string(),
        Some(n) => n.to_string().white().to_string(),
        None => "N/A".white().to_string(),
    }
}
