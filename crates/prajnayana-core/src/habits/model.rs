//! Habit types shared by the tracker and the API client.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Server-assigned habit identifier.
pub type HabitId = i64;

/// A user-defined recurring action tracked daily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Absent until the server has stored the habit.
    #[serde(default)]
    pub id: Option<HabitId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Derived from the completion record; never sent to the server.
    #[serde(skip)]
    pub streak: u32,
}

impl Habit {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
            streak: 0,
        }
    }
}

/// Payload for creating a habit.
#[derive(Debug, Clone, Serialize)]
pub struct NewHabit<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

/// One server row of the habit-tracking ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitTrackingEntry {
    pub id: i64,
    pub habit: HabitId,
    pub date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

/// Payload for creating a tracking row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTrackingEntry {
    pub habit: HabitId,
    pub date: NaiveDate,
    pub completed: bool,
}

/// Sparse per-day, per-habit done flags.
///
/// Serialized as `{"2024-01-03": {"1": true}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionRecord {
    days: BTreeMap<NaiveDate, BTreeMap<HabitId, bool>>,
}

impl CompletionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the record from server tracking rows.
    ///
    /// When the server holds duplicate rows for the same habit and day the
    /// last one wins.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a HabitTrackingEntry>) -> Self {
        let mut record = Self::new();
        for entry in entries {
            record.set(entry.habit, entry.date, entry.completed);
        }
        record
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Whether `habit` is marked done on `day`. Missing entries count as not done.
    pub fn is_done(&self, habit: HabitId, day: NaiveDate) -> bool {
        self.days
            .get(&day)
            .and_then(|habits| habits.get(&habit))
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, habit: HabitId, day: NaiveDate, done: bool) {
        self.days.entry(day).or_default().insert(habit, done);
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&mut self, habit: HabitId, day: NaiveDate) -> bool {
        let done = !self.is_done(habit, day);
        self.set(habit, day, done);
        done
    }

    /// Drop every flag belonging to `habit`, and any day left empty.
    pub fn remove_habit(&mut self, habit: HabitId) {
        self.days.retain(|_, habits| {
            habits.remove(&habit);
            !habits.is_empty()
        });
    }

    /// Days on which `habit` is marked done, oldest first.
    pub fn done_days(&self, habit: HabitId) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days
            .iter()
            .filter(move |(_, habits)| habits.get(&habit).copied().unwrap_or(false))
            .map(|(day, _)| *day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn missing_flags_are_not_done() {
        let record = CompletionRecord::new();
        assert!(!record.is_done(1, day(1)));
        assert!(record.is_empty());
    }

    #[test]
    fn toggle_flips_and_reports() {
        let mut record = CompletionRecord::new();
        assert!(record.toggle(7, day(2)));
        assert!(record.is_done(7, day(2)));
        assert!(!record.toggle(7, day(2)));
        assert!(!record.is_done(7, day(2)));
    }

    #[test]
    fn from_entries_last_row_wins() {
        let entries = vec![
            HabitTrackingEntry { id: 1, habit: 3, date: day(5), completed: true },
            HabitTrackingEntry { id: 2, habit: 3, date: day(5), completed: false },
            HabitTrackingEntry { id: 3, habit: 4, date: day(5), completed: true },
        ];
        let record = CompletionRecord::from_entries(&entries);
        assert!(!record.is_done(3, day(5)));
        assert!(record.is_done(4, day(5)));
    }

    #[test]
    fn remove_habit_prunes_empty_days() {
        let mut record = CompletionRecord::new();
        record.set(1, day(1), true);
        record.set(2, day(2), true);
        record.remove_habit(1);
        assert_eq!(record.done_days(2).collect::<Vec<_>>(), vec![day(2)]);
        assert_eq!(record.done_days(1).count(), 0);
        assert_eq!(record, {
            let mut expected = CompletionRecord::new();
            expected.set(2, day(2), true);
            expected
        });
    }

    #[test]
    fn serializes_keyed_by_date_string() {
        let mut record = CompletionRecord::new();
        record.set(1, day(3), true);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({ "2024-01-03": { "1": true } }));

        let parsed: CompletionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn habit_streak_is_not_serialized() {
        let mut habit = Habit::new("Read", None);
        habit.streak = 12;
        let json = serde_json::to_value(&habit).unwrap();
        assert!(json.get("streak").is_none());
    }
}
