//! Expedition - Entry Point
//!
//! Generates a course, lets the hero (and any echoes) work through it under
//! the task controller, and prints the run statistics.

use expedition::core::config::RunConfig;
use expedition::core::error::Result;
use expedition::simulation::{run_course, Course};
use expedition::tasks::TaskCatalog;

use clap::Parser;
use std::path::PathBuf;

/// Expedition - simulate a course run and report task statistics
#[derive(Parser, Debug)]
#[command(name = "expedition")]
#[command(about = "Run a simulated course and report per-task statistics")]
struct Args {
    /// Run configuration (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Task data catalog (TOML); built-in tasks are used when omitted
    #[arg(long)]
    tasks: Option<PathBuf>,

    /// Maximum ticks before giving up (overrides the config)
    #[arg(long)]
    ticks: Option<u32>,

    /// Random seed for course generation (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the run statistics as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("expedition=info,task=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let max_ticks = args.ticks.unwrap_or(config.max_ticks);

    let catalog = match &args.tasks {
        Some(path) => TaskCatalog::load_from_toml(path)?,
        None => TaskCatalog::with_defaults(),
    };

    tracing::info!("Expedition starting (seed {})", config.seed);
    let mut course = Course::generate(config, catalog)?;
    let ticks = run_course(&mut course, max_ticks)?;

    if args.json {
        println!("{}", course.stats.to_json()?);
    } else {
        display_summary(&course, ticks);
    }
    Ok(())
}

/// Print the between-run statistics panel
fn display_summary(course: &Course, ticks: u32) {
    let stats = &course.stats;

    println!();
    println!("=== RUN {} ===", stats.run_id);
    println!(
        "{} ticks, {:.1}s, {} tasks completed, {:.1} xp",
        ticks,
        course.controller.now(),
        stats.tasks_completed,
        stats.total_experience
    );
    if !course.controller.is_empty() {
        println!("{} tasks left unfinished", course.controller.len());
    }
    println!();

    println!("{:<16} {:>6} {:>10} {:>8}", "Task", "Count", "Time (s)", "XP");
    for (_, record) in stats.records() {
        println!(
            "{:<16} {:>6} {:>10.1} {:>8.1}",
            record.task_name, record.total_times_completed, record.time_spent, record.experience_gained
        );
    }

    if let Some((task_id, seconds)) = &stats.longest_task {
        println!();
        println!("Longest task: {} ({:.1}s)", task_id, seconds);
    }

    let resources = stats.resources();
    if !resources.is_empty() {
        println!();
        println!("Resources:");
        for (resource, amount) in resources {
            println!("  {}: {}", resource, amount);
        }
    }
}
