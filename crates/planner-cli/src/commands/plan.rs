//! Planning commands for CLI.

use chrono::{DateTime, Duration, Utc};
use clap::Subcommand;
use planner_core::{timeline_items, Feedback, PlannerData, Task, TimeSlot, TimelineItem};
use uuid::Uuid;

use super::{open_store, parse_when, print_item};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Fill a time range with backlog tasks
    Fill {
        /// Range start (RFC 3339, YYYY-MM-DDTHH:MM or "now")
        #[arg(long, value_parser = parse_when)]
        from: DateTime<Utc>,
        /// Range end
        #[arg(long, value_parser = parse_when)]
        to: DateTime<Utc>,
    },
    /// Place a backlog task exactly where asked
    Add {
        /// Backlog task ID
        task_id: Uuid,
        #[arg(long, value_parser = parse_when)]
        start: DateTime<Utc>,
        /// Duration in minutes (default: the task's reference duration)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        minutes: Option<u32>,
    },
    /// Place a backlog task, moving it around existing schedulings
    Try {
        /// Backlog task ID
        task_id: Uuid,
        #[arg(long, value_parser = parse_when)]
        start: DateTime<Utc>,
        /// Duration in minutes (default: the task's reference duration)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        minutes: Option<u32>,
        /// Fail instead of placing the task at or after this time
        #[arg(long, value_parser = parse_when)]
        within_end: Option<DateTime<Utc>>,
    },
    /// Move a scheduling to a new start, keeping its duration
    Move {
        /// Scheduling ID
        id: Uuid,
        #[arg(long, value_parser = parse_when)]
        start: DateTime<Utc>,
    },
    /// Record how a scheduling went (done or failed)
    Feedback {
        /// Scheduling ID
        id: Uuid,
        feedback: Feedback,
    },
    /// Delete a scheduling
    Delete {
        /// Scheduling ID
        id: Uuid,
    },
    /// Delete every scheduling
    Clear,
    /// Show the agenda
    Show {
        #[arg(long, value_parser = parse_when, requires = "to")]
        from: Option<DateTime<Utc>>,
        #[arg(long, value_parser = parse_when, requires = "from")]
        to: Option<DateTime<Utc>>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Share of schedulings in a range marked done
    Score {
        #[arg(long, value_parser = parse_when)]
        from: DateTime<Utc>,
        #[arg(long, value_parser = parse_when)]
        to: DateTime<Utc>,
    },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    let (config, store, mut data) = open_store()?;
    let default_duration = config.default_task_duration();

    match action {
        PlanAction::Fill { from, to } => {
            let slot = TimeSlot::between(from, to)?;
            let created = data.fill_planning(&slot, default_duration);
            store.save(&data)?;
            println!("{} scheduling(s) created", created.len());
            for scheduling in &created {
                print_item(&TimelineItem::for_scheduling(scheduling));
            }
        }
        PlanAction::Add {
            task_id,
            start,
            minutes,
        } => {
            let task = backlog_task(&data, task_id)?;
            let slot = TimeSlot::new(start, duration_for(&task, minutes, default_duration))?;
            let scheduling = data.planning.schedule(&task, slot);
            store.save(&data)?;
            println!("Scheduled: {}", scheduling.id);
            print_item(&TimelineItem::for_scheduling(&scheduling));
        }
        PlanAction::Try {
            task_id,
            start,
            minutes,
            within_end,
        } => {
            let task = backlog_task(&data, task_id)?;
            let suggested = TimeSlot::new(start, duration_for(&task, minutes, default_duration))?;
            let boundary = within_end
                .map(|end| TimeSlot::between(start, end))
                .transpose()?;
            let scheduling = data
                .planning
                .try_schedule(&task, suggested, boundary.as_ref())?;
            store.save(&data)?;
            println!("Scheduled: {}", scheduling.id);
            print_item(&TimelineItem::for_scheduling(&scheduling));
        }
        PlanAction::Move { id, start } => {
            let scheduling = data.planning.move_scheduling(id, start)?;
            store.save(&data)?;
            println!("Moved: {id}");
            print_item(&TimelineItem::for_scheduling(&scheduling));
        }
        PlanAction::Feedback { id, feedback } => {
            data.planning.set_feedback(feedback, id)?;
            store.save(&data)?;
            println!("Feedback recorded: {feedback}");
        }
        PlanAction::Delete { id } => {
            data.planning.delete(id)?;
            store.save(&data)?;
            println!("Deleted: {id}");
        }
        PlanAction::Clear => {
            data.planning.clear();
            store.save(&data)?;
            println!("planning cleared");
        }
        PlanAction::Show { from, to, json } => {
            let within = match (from, to) {
                (Some(from), Some(to)) => Some(TimeSlot::between(from, to)?),
                _ => None,
            };
            let items = timeline_items(&data.planning.agenda(within.as_ref()));
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if items.is_empty() {
                println!("planning is empty");
            } else {
                items.iter().for_each(print_item);
            }
        }
        PlanAction::Score { from, to } => {
            let slot = TimeSlot::between(from, to)?;
            match data.planning_feedback_score(&slot) {
                Some(score) => println!("{score:.2}"),
                None => println!("no schedulings in {slot}"),
            }
        }
    }
    Ok(())
}

fn backlog_task(data: &PlannerData, task_id: Uuid) -> Result<Task, String> {
    data.backlog
        .get(task_id)
        .cloned()
        .ok_or_else(|| format!("Task {task_id} not in backlog"))
}

fn duration_for(task: &Task, minutes: Option<u32>, default: Duration) -> Duration {
    minutes
        .map(|m| Duration::minutes(i64::from(m)))
        .unwrap_or_else(|| task.duration_or(default))
}
