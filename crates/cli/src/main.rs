//! StudyDesk CLI - study tracking dashboard.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDate, Offset, TimeZone, Utc};
use clap::{Parser, Subcommand};
use studydesk_core::{DateFormat, NewWorksheet, Time, TodoId, WorksheetId};
use studydesk_progress::{
    AnalyticsConfig, DashboardSnapshot, Heatmap, Intensity, StreakResult, StudyAnalytics,
    YearlyProgress,
};
use studydesk_storage::{MemoryStore, Snapshot, Store};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "studydesk")]
#[command(about = "Personal study tracking dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Snapshot file holding worksheets, todos, events, timers and settings
    #[arg(short, long, default_value = "studydesk.json", global = true)]
    data: PathBuf,

    /// Analytics config (JSON). Without one, days follow the local UTC offset
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Evaluate as of this instant (RFC 3339) instead of the system clock
    #[arg(long, global = true)]
    now: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show metrics, streak, yearly goals and recent activity
    Dashboard,
    /// Show the current and best streak
    Streak,
    /// Draw the activity heatmap
    Heatmap {
        /// Number of most recent days to draw
        #[arg(long, default_value = "365")]
        days: usize,
    },
    /// Show yearly goal progress
    Goals,
    /// Add a worksheet
    AddWorksheet {
        /// Worksheet title
        title: String,
        /// Subject
        #[arg(long)]
        subject: String,
        /// Tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,
    },
    /// Add a todo
    AddTodo {
        /// Todo title
        title: String,
        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: String,
        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Toggle completion of a worksheet or todo
    Complete {
        /// Worksheet or todo ID
        id: String,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => AnalyticsConfig::load(path).await?,
        None => AnalyticsConfig {
            utc_offset_minutes: Local::now().offset().fix().local_minus_utc() / 60,
            ..Default::default()
        },
    };
    let analytics = StudyAnalytics::new().with_config(config);

    let now = match &cli.now {
        Some(s) => parse_instant(s)?,
        None => Utc::now(),
    };

    let snapshot = Snapshot::load(&cli.data).await?;
    let date_format = snapshot.settings.date_format;
    let mut store = MemoryStore::from_snapshot(snapshot);

    match cli.command {
        Commands::Dashboard => {
            let dashboard = analytics.snapshot_store(&store, now);
            let hour = analytics
                .config()
                .day_convention()
                .map(|c| c.hour_of(&now))
                .unwrap_or(0);
            print_dashboard(&dashboard, date_format);
            println!();
            println!("Theme: {}", store.settings().effective_theme(hour).as_str());
        }
        Commands::Streak => {
            let streak = analytics.streak(store.worksheets(), store.todos(), now);
            print_streak(&streak, date_format);
        }
        Commands::Heatmap { days } => {
            let heatmap = analytics.heatmap(store.worksheets(), store.todos(), now);
            print_heatmap(&heatmap, days, date_format);
        }
        Commands::Goals => {
            let progress = analytics.progress(store.worksheets(), store.todos(), now);
            print_goals(&progress);
        }
        Commands::AddWorksheet { title, subject, tags, due } => {
            let due_date = due.as_deref().map(parse_instant).transpose()?;
            let ws = store.add_worksheet(NewWorksheet {
                title,
                subject,
                tags,
                due_date,
                ..Default::default()
            })?;
            store.snapshot().save(&cli.data).await?;
            info!("Added worksheet {}", ws.id);
            println!("Added worksheet: {} - {}", ws.id, ws.title);
        }
        Commands::AddTodo { title, due, notes } => {
            let todo = store.add_todo(title, parse_instant(&due)?, notes)?;
            store.snapshot().save(&cli.data).await?;
            info!("Added todo {}", todo.id);
            println!(
                "Added todo: {} - {} (due {})",
                todo.id,
                todo.title,
                date_format.format(&todo.due_date, false)
            );
        }
        Commands::Complete { id } => {
            let done = toggle_item(&mut store, &id)?;
            store.snapshot().save(&cli.data).await?;
            println!("{} marked {}", id, if done { "complete" } else { "incomplete" });
        }
    }

    Ok(())
}

/// Toggle whichever worksheet or todo carries `id`.
fn toggle_item(store: &mut MemoryStore, id: &str) -> Result<bool> {
    let ws_id: WorksheetId = id.parse().map_err(|_| anyhow!("Invalid ID: {}", id))?;
    if store.load_worksheet(ws_id).is_some() {
        return Ok(store.toggle_complete(ws_id)?);
    }
    let todo_id: TodoId = id.parse().map_err(|_| anyhow!("Invalid ID: {}", id))?;
    if store.load_todo(todo_id).is_some() {
        return Ok(store.toggle_todo_complete(todo_id)?);
    }
    Err(anyhow!("No worksheet or todo with ID {}", id))
}

/// Accept RFC 3339, or a bare date taken as midnight UTC.
fn parse_instant(s: &str) -> Result<Time> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date '{}': expected YYYY-MM-DD or RFC 3339", s))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("Invalid date '{}'", s))?;
    Ok(Utc.from_utc_datetime(&midnight))
}

fn print_dashboard(dashboard: &DashboardSnapshot, format: DateFormat) {
    let metrics = &dashboard.metrics;
    println!("StudyDesk - {}", format.format_day(dashboard.today));
    println!("  Study Hours:     {}", metrics.study_time_label());
    println!("  Tasks Completed: {}", metrics.tasks_completed);
    println!("  Current Streak:  {} days", metrics.streak.current_streak);
    println!("  Best Streak:     {} days", metrics.streak.best_streak);
    println!();
    print_goals(&dashboard.progress);
    println!();
    print_heatmap(&dashboard.heatmap, 28, format);
}

fn print_streak(streak: &StreakResult, format: DateFormat) {
    println!("Current streak: {} days", streak.current_streak);
    if let Some(start) = streak.streak_start {
        println!("  Started {}", format.format_day(start));
    }
    println!("Best streak: {} days", streak.best_streak);
}

fn print_goals(progress: &YearlyProgress) {
    println!("Yearly Goals");
    for (name, value) in progress.entries() {
        let filled = (value / 5.0).round() as usize;
        println!(
            "  {:<16} [{}{}] {:>5.1}%",
            name,
            "#".repeat(filled),
            "-".repeat(20 - filled.min(20)),
            value
        );
    }
}

fn print_heatmap(heatmap: &Heatmap, days: usize, format: DateFormat) {
    let entries = heatmap.last(days);
    let Some(first) = entries.first() else {
        return;
    };
    println!(
        "Study Activity since {} ({} items)",
        format.format_day(first.date),
        entries.iter().map(|e| e.value as u64).sum::<u64>()
    );
    for week in entries.chunks(7) {
        let row: String = week
            .iter()
            .map(|e| match e.intensity() {
                Intensity::None => '.',
                Intensity::Low => '░',
                Intensity::Medium => '▒',
                Intensity::High => '█',
            })
            .collect();
        println!("  {}", row);
    }
    println!("  Less . ░ ▒ █ More");
}
