//! neuro - Focus filter and pomodoro timer for deep work
//!
//! "Silence everything except the thing you are working on."
//!
//! Usage:
//!   neuro feed                  List incoming notifications
//!   neuro engage TASK...        Engage deep work on a task
//!   neuro engage TASK --quiet   Engage with details hidden
//!   neuro steps GOAL...         Break a goal into micro-steps
//!   neuro timer [MINS]          Run a pomodoro countdown (default: 25 mins)
//!   neuro config [--init]       Show or write configuration

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use neuro_core::{format, Config, Paths};
use tracing_subscriber::EnvFilter;

use neurocleanse::atomizer::StepList;
use neurocleanse::notification::{JsonFileSource, NotificationRecord, NotificationSource, PriorityTag, SeedSource};
use neurocleanse::ticker::{SessionTimer, TimerSnapshot};
use neurocleanse::timer::TimerEvent;
use neurocleanse::workspace::Workspace;
use neurocleanse::FocusFilter;

/// Neuro - focus filter and pomodoro timer for deep work
#[derive(Parser)]
#[command(name = "neuro")]
#[command(about = "Silence notifications unrelated to your task and time your focus")]
#[command(version)]
#[command(after_help = r#"WHEN TO USE:
    When the notification feed is louder than the work. Tell it what
    you are doing and only related notifications stay visible.

HOW FILTERING WORKS:
    The task is split into words; words of 1-2 letters are ignored.
    A notification stays if any word appears in its title, preview
    or summary (case-insensitive).

EXAMPLES:
    neuro feed                          # Everything, unfiltered
    neuro engage Fixing API bug         # Only auth bug + API validation remain
    neuro engage "Fixing API bug" -q    # Same, details hidden
    neuro steps Draft launch email      # Three 5-minute micro-steps
    neuro timer                         # 25-minute pomodoro
    neuro timer 50                      # 50-minute session
    neuro feed --feed inbox.json        # Use your own notifications

CONFIG:
    ~/.config/neurocleanse/config.json (see 'neuro config').
    Set RUST_LOG=debug to trace filtering and timer events.

ALIASES:
    neuro e     # engage
    neuro t     # timer
"#)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List incoming notifications
    #[command(alias = "ls")]
    Feed {
        /// Read notifications from a JSON file instead of the demo feed
        #[arg(long, value_name = "FILE")]
        feed: Option<PathBuf>,
    },

    /// Engage deep work on a task
    #[command(alias = "e")]
    Engage {
        /// What you're working on
        #[arg(required = true, value_name = "TASK")]
        task: Vec<String>,

        /// Hide task text and notification details
        #[arg(short, long)]
        quiet: bool,

        /// Read notifications from a JSON file instead of the demo feed
        #[arg(long, value_name = "FILE")]
        feed: Option<PathBuf>,
    },

    /// Break a goal into micro-steps
    #[command(alias = "atomize")]
    Steps {
        /// The goal to break down
        #[arg(required = true, value_name = "GOAL")]
        goal: Vec<String>,
    },

    /// Run a pomodoro countdown
    #[command(alias = "t")]
    Timer {
        /// Duration in minutes (default: from config, 25)
        #[arg(value_name = "MINS")]
        duration: Option<u32>,
    },

    /// Show configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

// ANSI color codes
const RED: &str = "\x1b[0;31m";
const GREEN: &str = "\x1b[0;32m";
const YELLOW: &str = "\x1b[0;33m";
const CYAN: &str = "\x1b[0;36m";
const MAGENTA: &str = "\x1b[0;35m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const NC: &str = "\x1b[0m";

/// Check if stdout is a TTY and colors should be used
fn use_colors() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stdout())
}

/// Conditionally apply color
fn color(code: &str, text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", code, text, NC)
    } else {
        text.to_string()
    }
}

fn tag_color(tag: PriorityTag) -> &'static str {
    match tag {
        PriorityTag::Urgent => RED,
        PriorityTag::ActionNeeded => YELLOW,
        PriorityTag::InfoOnly | PriorityTag::Fyi => DIM,
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = Paths::new();
    let config = Config::load(&paths.config_file())?;

    match cli.command {
        Some(Commands::Feed { feed }) => cmd_feed(feed),
        Some(Commands::Engage { task, quiet, feed }) => cmd_engage(&config, &task.join(" "), quiet, feed),
        Some(Commands::Steps { goal }) => cmd_steps(&goal.join(" ")),
        Some(Commands::Timer { duration }) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(cmd_timer(&config, duration))
        }
        Some(Commands::Config { init }) => cmd_config(&paths, &config, init),
        None => cmd_feed(None),
    }
}

fn source(feed: Option<PathBuf>) -> Box<dyn NotificationSource> {
    match feed {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(SeedSource),
    }
}

fn print_notification(n: &NotificationRecord) {
    println!(
        "  {} {} {}",
        color(tag_color(n.tag), &format!("[{}]", n.tag.as_str())),
        color(BOLD, &n.app),
        color(DIM, &n.time)
    );
    println!("    {}", n.title);
    println!("    {}", color(DIM, &format::truncate(&n.preview, 72)));
    println!("    {} {}", color(CYAN, "summary:"), n.summary);
    println!();
}

/// List every notification
fn cmd_feed(feed: Option<PathBuf>) -> Result<()> {
    let records = source(feed).load()?;

    println!("{} ({})", color(&format!("{}{}", BOLD, RED), "INCOMING NOISE"), records.len());
    println!();
    for n in &records {
        print_notification(n);
    }
    println!("Run 'neuro engage <task>' to silence everything else");

    Ok(())
}

/// Engage deep work and show what survives the filter
fn cmd_engage(config: &Config, task: &str, quiet: bool, feed: Option<PathBuf>) -> Result<()> {
    let mut workspace = Workspace::load(source(feed).as_ref(), FocusFilter::new(config.min_keyword_len))?;
    workspace.set_task(task);
    workspace.engage()?;
    if quiet {
        workspace.toggle_quiet();
    }

    let view = workspace.view();

    println!("{} {}", color(GREEN, "[ok]"), view.status);
    println!();

    if !view.quiet {
        println!("{}", color(&format!("{}{}", BOLD, MAGENTA), "FOCUS SHIELD ACTIVE"));
        println!(
            "{} distractions suppressed. Only relevant items remain.",
            view.suppressed
        );
        println!(
            "{}",
            color(
                DIM,
                &format!(
                    "{} of {} notifications matched words of {}+ letters",
                    workspace.notifications().len() - view.suppressed,
                    workspace.notifications().len(),
                    workspace.filter().min_keyword_len()
                )
            )
        );
        println!();
    }

    if let Some(task) = view.task {
        println!("  {} {}", color(CYAN, "Active Focus:"), task);
        println!();
    }

    if !view.notifications.is_empty() {
        println!("{}", color(BOLD, "RELEVANT NOTIFICATIONS"));
        println!();
        for n in &view.notifications {
            print_notification(n);
        }
    }

    if !view.quiet {
        print_steps(&StepList::for_goal(task));
    }

    println!("Run 'neuro timer' to start a pomodoro");

    Ok(())
}

fn print_steps(list: &StepList) {
    println!(
        "{} {}/{}",
        color(BOLD, "MICRO-STEPS"),
        list.completed(),
        list.steps.len()
    );
    for step in &list.steps {
        let mark = if step.done { "[x]" } else { "[ ]" };
        println!("  {} {}. {}", mark, step.id, step.text);
    }
    println!();
}

/// Break a goal into micro-steps
fn cmd_steps(goal: &str) -> Result<()> {
    if goal.trim().is_empty() {
        bail!("Nothing to break down. Give a goal, e.g. 'neuro steps fix login bug'");
    }
    print_steps(&StepList::for_goal(goal));
    Ok(())
}

fn render_timer(snapshot: &TimerSnapshot) {
    print!(
        "\r  {}  [{}] {}%   ",
        color(BOLD, &snapshot.clock()),
        format::progress_bar(snapshot.progress_percent, 30),
        snapshot.progress_percent
    );
    let _ = std::io::stdout().flush();
}

/// Wall-clock time a countdown of `total_secs` ticks started at `start` ends
fn session_end(start: DateTime<Local>, tick: Duration, total_secs: u32) -> Result<DateTime<Local>> {
    let length = tick
        .checked_mul(total_secs)
        .context("Timer length overflows; lower tick_millis or the duration")?;
    let length = chrono::Duration::from_std(length)?;
    start
        .checked_add_signed(length)
        .context("Timer would end beyond the representable date range")
}

/// Run a countdown in the terminal; Ctrl-C pauses and exits
async fn cmd_timer(config: &Config, duration: Option<u32>) -> Result<()> {
    let total_secs = match duration {
        Some(mins) => mins.saturating_mul(60),
        None => config.focus_secs(),
    };
    if total_secs == 0 {
        bail!("Timer needs at least one minute");
    }

    let tick = config.tick_interval();
    let (timer, mut events) = SessionTimer::new(total_secs);
    let mut timer = timer.with_tick_interval(tick);

    let end_time = session_end(Local::now(), tick, total_secs)?;

    println!("{}", color(&format!("{}{}", BOLD, MAGENTA), "POMODORO"));
    println!();
    println!("  {}  {}", color(CYAN, "Duration:"), format::duration(total_secs as f64));
    println!("  {}   {}", color(CYAN, "Ends at:"), end_time.format("%H:%M"));
    println!();

    timer.start().await;
    render_timer(&timer.snapshot().await);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(TimerEvent::Tick { .. }) => render_timer(&timer.snapshot().await),
                Some(TimerEvent::Completed) | None => {
                    render_timer(&timer.snapshot().await);
                    println!();
                    println!();
                    println!("{}", color(GREEN, "Session complete! Take a break."));
                    break;
                }
            },
            _ = &mut ctrl_c => {
                let snapshot = timer.pause().await;
                println!();
                println!();
                println!(
                    "{} Paused with {} remaining",
                    color(CYAN, "[info]"),
                    snapshot.clock()
                );
                break;
            }
        }
    }

    Ok(())
}

/// Show (and optionally write) configuration
fn cmd_config(paths: &Paths, config: &Config, init: bool) -> Result<()> {
    let path = paths.config_file();

    if init {
        config.save(&path)?;
        println!("{} Wrote {}", color(GREEN, "[ok]"), path.display());
        println!();
    }

    println!("{}", color(BOLD, "CONFIG"));
    println!();
    println!("  {}           {}", color(CYAN, "File:"), path.display());
    println!("  {}  {} minutes", color(CYAN, "Focus length:"), config.focus_minutes);
    println!("  {}   {} chars", color(CYAN, "Min keyword:"), config.min_keyword_len);
    println!("  {}      {} ms", color(CYAN, "Tick rate:"), config.tick_millis);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_engage_joins_words() {
        let cli = Cli::try_parse_from(["neuro", "engage", "Fixing", "API", "bug", "-q"]).unwrap();
        match cli.command {
            Some(Commands::Engage { task, quiet, feed }) => {
                assert_eq!(task.join(" "), "Fixing API bug");
                assert!(quiet);
                assert!(feed.is_none());
            }
            _ => panic!("expected engage"),
        }
    }

    #[test]
    fn test_engage_needs_task() {
        assert!(Cli::try_parse_from(["neuro", "engage"]).is_err());
    }

    #[test]
    fn test_session_end() {
        let start = Local::now();
        let end = session_end(start, Duration::from_secs(1), 1500).unwrap();
        assert_eq!(end - start, chrono::Duration::seconds(1500));
    }

    #[test]
    fn test_session_end_overflow_is_an_error() {
        let start = Local::now();
        assert!(session_end(start, Duration::from_millis(u64::MAX), 60).is_err());
        assert!(session_end(start, Duration::from_secs(u64::MAX / 1_000_000), u32::MAX).is_err());
    }

    #[test]
    fn test_color_with_tty() {
        let result = color(RED, "test");
        assert!(result.contains("test"));
    }
}
