//! Habit tracker page state.
//!
//! Holds the habits, their tracking rows and the completion record derived
//! from those rows. Every mutation recomputes the streaks it can affect and
//! reports what has to be sent back to the server.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use tracing::debug;

use super::model::{CompletionRecord, Habit, HabitId, HabitTrackingEntry, NewTrackingEntry};
use super::streak::compute_streak;

/// Server call needed to persist a toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleAction {
    /// No row exists yet for this habit and day.
    Create(NewTrackingEntry),
    /// Patch the existing row.
    Update { entry_id: i64, completed: bool },
}

/// One cell of the weekly view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayStatus {
    pub date: NaiveDate,
    pub done: bool,
}

#[derive(Debug, Clone)]
pub struct HabitTracker {
    habits: Vec<Habit>,
    completions: CompletionRecord,
    entry_ids: HashMap<(HabitId, NaiveDate), i64>,
    today: NaiveDate,
}

impl HabitTracker {
    /// Build tracker state from a full server refresh.
    pub fn from_server(habits: Vec<Habit>, entries: &[HabitTrackingEntry], today: NaiveDate) -> Self {
        let entry_ids = entries
            .iter()
            .map(|e| ((e.habit, e.date), e.id))
            .collect();
        let mut tracker = Self {
            habits,
            completions: CompletionRecord::from_entries(entries),
            entry_ids,
            today,
        };
        tracker.recompute_all();
        debug!(
            habits = tracker.habits.len(),
            entries = entries.len(),
            "habit tracker refreshed"
        );
        tracker
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn habit(&self, id: HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == Some(id))
    }

    pub fn completions(&self) -> &CompletionRecord {
        &self.completions
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Move the reference day forward (e.g. past midnight) and refresh streaks.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
        self.recompute_all();
    }

    /// Flip the done flag for `habit` on `day`.
    ///
    /// Returns `None` when the habit is unknown.
    pub fn toggle(&mut self, habit: HabitId, day: NaiveDate) -> Option<ToggleAction> {
        self.habit(habit)?;
        let completed = self.completions.toggle(habit, day);
        self.recompute(habit);

        let action = match self.entry_ids.get(&(habit, day)) {
            Some(&entry_id) => ToggleAction::Update { entry_id, completed },
            None => ToggleAction::Create(NewTrackingEntry {
                habit,
                date: day,
                completed,
            }),
        };
        debug!(habit, %day, completed, "habit toggled");
        Some(action)
    }

    /// Undo a [`toggle`](Self::toggle) whose request failed.
    pub fn revert_toggle(&mut self, habit: HabitId, day: NaiveDate) {
        if self.habit(habit).is_some() {
            self.completions.toggle(habit, day);
            self.recompute(habit);
        }
    }

    /// Remember the row the server created for a toggle.
    pub fn apply_created_entry(&mut self, entry: &HabitTrackingEntry) {
        self.entry_ids.insert((entry.habit, entry.date), entry.id);
        self.completions.set(entry.habit, entry.date, entry.completed);
        self.recompute(entry.habit);
    }

    pub fn add_habit(&mut self, mut habit: Habit) {
        habit.streak = compute_streak(habit.id, &self.completions, self.today);
        self.habits.push(habit);
    }

    /// Remove a habit along with its flags and rows. Returns the removed habit.
    pub fn remove_habit(&mut self, id: HabitId) -> Option<Habit> {
        let index = self.habits.iter().position(|h| h.id == Some(id))?;
        self.completions.remove_habit(id);
        self.entry_ids.retain(|(habit, _), _| *habit != id);
        Some(self.habits.remove(index))
    }

    /// The seven days ending at `end`, oldest first.
    pub fn week_view(&self, habit: HabitId, end: NaiveDate) -> Vec<DayStatus> {
        (0..7u64)
            .rev()
            .filter_map(|back| end.checked_sub_days(Days::new(back)))
            .map(|date| DayStatus {
                date,
                done: self.completions.is_done(habit, date),
            })
            .collect()
    }

    fn recompute(&mut self, id: HabitId) {
        let streak = compute_streak(Some(id), &self.completions, self.today);
        if let Some(habit) = self.habits.iter_mut().find(|h| h.id == Some(id)) {
            habit.streak = streak;
        }
    }

    fn recompute_all(&mut self) {
        for habit in &mut self.habits {
            habit.streak = compute_streak(habit.id, &self.completions, self.today);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn habit(id: HabitId, name: &str) -> Habit {
        Habit {
            id: Some(id),
            ..Habit::new(name, None)
        }
    }

    fn entry(id: i64, habit: HabitId, d: u32) -> HabitTrackingEntry {
        HabitTrackingEntry {
            id,
            habit,
            date: day(d),
            completed: true,
        }
    }

    fn tracker() -> HabitTracker {
        HabitTracker::from_server(
            vec![habit(1, "Meditate"), habit(2, "Journal")],
            &[entry(10, 1, 1), entry(11, 1, 2), entry(12, 1, 3), entry(13, 2, 1)],
            day(3),
        )
    }

    #[test]
    fn refresh_computes_streaks() {
        let t = tracker();
        assert_eq!(t.habit(1).unwrap().streak, 3);
        assert_eq!(t.habit(2).unwrap().streak, 0);
    }

    #[test]
    fn toggle_existing_row_updates_it() {
        let mut t = tracker();
        let action = t.toggle(1, day(3)).unwrap();
        assert_eq!(
            action,
            ToggleAction::Update {
                entry_id: 12,
                completed: false
            }
        );
        // Yesterday is still done, so the run from day 2 counts.
        assert_eq!(t.habit(1).unwrap().streak, 2);
    }

    #[test]
    fn toggle_new_day_creates_row() {
        let mut t = tracker();
        let action = t.toggle(2, day(3)).unwrap();
        assert_eq!(
            action,
            ToggleAction::Create(NewTrackingEntry {
                habit: 2,
                date: day(3),
                completed: true
            })
        );
        assert_eq!(t.habit(2).unwrap().streak, 1);

        t.apply_created_entry(&HabitTrackingEntry {
            id: 20,
            habit: 2,
            date: day(3),
            completed: true,
        });
        assert_eq!(
            t.toggle(2, day(3)).unwrap(),
            ToggleAction::Update {
                entry_id: 20,
                completed: false
            }
        );
    }

    #[test]
    fn revert_restores_flag_and_streak() {
        let mut t = tracker();
        t.toggle(2, day(3)).unwrap();
        t.revert_toggle(2, day(3));
        assert!(!t.completions().is_done(2, day(3)));
        assert_eq!(t.habit(2).unwrap().streak, 0);
        // Still no row, so the retry creates one marked done.
        assert_eq!(
            t.toggle(2, day(3)).unwrap(),
            ToggleAction::Create(NewTrackingEntry {
                habit: 2,
                date: day(3),
                completed: true
            })
        );
    }

    #[test]
    fn toggle_unknown_habit_is_ignored() {
        let mut t = tracker();
        assert!(t.toggle(42, day(3)).is_none());
        assert!(!t.completions().is_done(42, day(3)));
    }

    #[test]
    fn remove_habit_drops_its_flags() {
        let mut t = tracker();
        let removed = t.remove_habit(1).unwrap();
        assert_eq!(removed.name, "Meditate");
        assert!(t.habit(1).is_none());
        assert!(!t.completions().is_done(1, day(3)));
        assert!(t.remove_habit(1).is_none());
    }

    #[test]
    fn add_habit_gets_streak() {
        let mut t = tracker();
        t.add_habit(habit(3, "Walk"));
        assert_eq!(t.habit(3).unwrap().streak, 0);
        assert_eq!(t.habits().len(), 3);
    }

    #[test]
    fn advancing_today_breaks_stale_streaks() {
        let mut t = tracker();
        t.set_today(day(5));
        assert_eq!(t.habit(1).unwrap().streak, 0);
    }

    #[test]
    fn week_view_ends_at_given_day() {
        let t = tracker();
        let week = t.week_view(1, day(7));
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, day(1));
        assert!(week[0].done);
        assert_eq!(week[6].date, day(7));
        assert!(!week[6].done);
    }
}
