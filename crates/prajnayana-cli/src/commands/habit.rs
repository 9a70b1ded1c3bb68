//! Habit tracker commands for CLI.

use clap::Subcommand;
use prajnayana_core::{date_key, sync};
use serde_json::json;

use crate::common::{connect, day_or_today, print_json, CliResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List habits with streaks and the last seven days
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Create a habit
    Create {
        /// Habit name
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a habit
    Delete {
        /// Habit ID
        id: i64,
    },
    /// Mark a habit done or not done for a day
    Toggle {
        /// Habit ID
        id: i64,
        /// Day as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the current streak of a habit
    Streak {
        /// Habit ID
        id: i64,
    },
}

pub async fn run(action: HabitAction) -> CliResult {
    let (_, client) = connect()?;
    let today = day_or_today(None)?;
    let mut tracker = sync::load_tracker(&client, today).await?;

    match action {
        HabitAction::List { json: as_json } => {
            let rows: Vec<_> = tracker
                .habits()
                .iter()
                .map(|habit| {
                    let week = habit
                        .id
                        .map(|id| tracker.week_view(id, today))
                        .unwrap_or_default();
                    (habit, week)
                })
                .collect();

            if as_json {
                let out: Vec<_> = rows
                    .iter()
                    .map(|(habit, week)| {
                        json!({
                            "id": habit.id,
                            "name": habit.name,
                            "description": habit.description,
                            "streak": habit.streak,
                            "week": week,
                        })
                    })
                    .collect();
                return print_json(&out);
            }

            if rows.is_empty() {
                println!("No habits yet. Create one with `habit create <NAME>`.");
            }
            for (habit, week) in rows {
                let cells: String = week.iter().map(|d| if d.done { 'x' } else { '.' }).collect();
                let id = habit.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into());
                println!("{id:>5}  [{cells}]  streak {:>3}  {}", habit.streak, habit.name);
            }
        }
        HabitAction::Create { name, description } => {
            let habit = sync::create_habit(&client, &mut tracker, &name, description.as_deref()).await?;
            println!("Habit created: {}", habit.id.unwrap_or_default());
        }
        HabitAction::Delete { id } => {
            let habit = sync::delete_habit(&client, &mut tracker, id).await?;
            println!("Habit deleted: {}", habit.name);
        }
        HabitAction::Toggle { id, date } => {
            let day = day_or_today(date.as_deref())?;
            let done = sync::toggle_habit(&client, &mut tracker, id, day).await?;
            let streak = tracker.habit(id).map_or(0, |h| h.streak);
            let state = if done { "done" } else { "not done" };
            println!("{} {state} on {} (streak {streak})", id, date_key(day));
        }
        HabitAction::Streak { id } => match tracker.habit(id) {
            Some(habit) => println!("{}", habit.streak),
            None => return Err(format!("habit {id} not found").into()),
        },
    }
    Ok(())
}
