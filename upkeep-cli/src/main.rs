use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use upkeep_core::{
    describe, next_occurrence, occurrence_series, FeedbackReport, ScheduleConfig, Task, TaskSource,
};

#[derive(Parser, Debug)]
#[command(name = "upkeep", version, about = "Maintenance due-date projection CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Evaluation date (YYYY-MM-DD); defaults to the local date
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the projected task series for a schedule config
    Series {
        /// Path to a ScheduleConfig JSON file
        config: PathBuf,

        /// Number of tasks to project (default: the config's taskCount)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Print only the next occurrence and its trigger source
    Next {
        config: PathBuf,
    },

    /// Print the configuration explanation text
    Describe {
        config: PathBuf,
    },

    /// Export a feedback report (config + tasks + explanation) as JSON
    Report {
        config: PathBuf,

        /// Why the current task generation looks wrong
        #[arg(long)]
        description: String,

        /// Output path (default: upkeep-report.json)
        #[arg(long, default_value = "upkeep-report.json")]
        out: PathBuf,
    },

    /// Write a starter config JSON to stdout
    Sample,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    match cli.command {
        Command::Series { config, count } => {
            let cfg = load_config(&config)?;
            let count = count.unwrap_or(cfg.display_settings.task_count);
            let tasks = occurrence_series(&cfg, count, today);
            print_series(&tasks);
        }

        Command::Next { config } => {
            let cfg = load_config(&config)?;
            match next_occurrence(&cfg, today) {
                Some(next) => {
                    let days = (next.due_date - today).num_days();
                    println!(
                        "{}  {}  (in {days} days)",
                        next.due_date,
                        source_label(next.source)
                    );
                }
                None => println!("no upcoming occurrence"),
            }
        }

        Command::Describe { config } => {
            let cfg = load_config(&config)?;
            println!("{}", describe(&cfg, today));
        }

        Command::Report {
            config,
            description,
            out,
        } => {
            let cfg = load_config(&config)?;
            let tasks = occurrence_series(&cfg, cfg.display_settings.task_count, today);
            let explanation = describe(&cfg, today);
            let report = FeedbackReport::new(description, today, cfg, tasks, explanation);
            fs::write(&out, report.to_json()?)
                .with_context(|| format!("write {}", out.display()))?;
            println!("wrote {}", out.display());
        }

        Command::Sample => {
            let cfg = ScheduleConfig::sample(today);
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
    }

    Ok(())
}

fn load_config(path: &PathBuf) -> Result<ScheduleConfig> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ScheduleConfig =
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

fn source_label(source: TaskSource) -> &'static str {
    match source {
        TaskSource::Calendar => "calendar",
        TaskSource::Sensor => "sensor",
    }
}

fn print_series(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("no tasks projected");
        return;
    }
    let mut prev: Option<NaiveDate> = None;
    for task in tasks {
        let gap = match prev {
            Some(p) => format!("+{} days", (task.due_date - p).num_days()),
            None => String::new(),
        };
        println!(
            "#{:<3} {}  {:<8} {}",
            task.sequence_number,
            task.due_date,
            source_label(task.source),
            gap
        );
        prev = Some(task.due_date);
    }
}
