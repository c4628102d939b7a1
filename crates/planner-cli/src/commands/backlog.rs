//! Backlog management commands for CLI.

use chrono::Duration;
use clap::Subcommand;
use planner_core::Task;
use uuid::Uuid;

use super::open_store;

#[derive(Subcommand)]
pub enum BacklogAction {
    /// Add a task to the backlog
    Add {
        /// Task name
        name: String,
        /// Reference duration in minutes
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        minutes: Option<u32>,
        /// Minimum acceptable duration in minutes
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        min_minutes: Option<u32>,
    },
    /// List backlog tasks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a task from the backlog
    Remove {
        /// Task ID
        id: Uuid,
    },
    /// Remove every task from the backlog
    Clear,
}

pub fn run(action: BacklogAction) -> Result<(), Box<dyn std::error::Error>> {
    let (_, store, mut data) = open_store()?;

    match action {
        BacklogAction::Add {
            name,
            minutes,
            min_minutes,
        } => {
            let task = Task::with_durations(
                name,
                minutes.map(|m| Duration::minutes(i64::from(m))),
                min_minutes.map(|m| Duration::minutes(i64::from(m))),
            );
            let task = data.add_to_backlog(task);
            store.save(&data)?;
            println!("Task added: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        BacklogAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&data.backlog)?);
            } else if data.backlog.is_empty() {
                println!("backlog is empty");
            } else {
                for task in &data.backlog.tasks {
                    println!(
                        "{}  {}  {}  {}",
                        task.id,
                        task.name,
                        format_minutes(task.reference_duration),
                        format_minutes(task.minimum_duration)
                    );
                }
            }
        }
        BacklogAction::Remove { id } => {
            if data.backlog.get(id).is_none() {
                return Err(format!("Task {id} not in backlog").into());
            }
            data.backlog.remove(id);
            store.save(&data)?;
            println!("Task removed: {id}");
        }
        BacklogAction::Clear => {
            data.backlog.clear();
            store.save(&data)?;
            println!("backlog cleared");
        }
    }
    Ok(())
}

fn format_minutes(duration: Option<Duration>) -> String {
    match duration {
        Some(d) => format!("{}m", d.num_minutes()),
        None => "-".to_string(),
    }
}
