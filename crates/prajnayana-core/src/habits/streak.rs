//! Current-streak calculation over a sparse completion record.
//!
//! A streak is alive when the habit is done today, or when it was done
//! yesterday and today is not over yet. Counting starts at the most recent of
//! those two days and walks backward until the first missed day.

use chrono::{Days, NaiveDate};

use super::model::{CompletionRecord, HabitId};
use crate::date_key::today_local;

/// Upper bound on how far back the scan looks.
pub const MAX_LOOKBACK_DAYS: u32 = 100;

/// Consecutive done days for `habit_id` ending at `today` (or yesterday).
///
/// Returns 0 when no habit is given, the record is empty, or neither today
/// nor yesterday is done. Never exceeds [`MAX_LOOKBACK_DAYS`].
pub fn compute_streak(
    habit_id: Option<HabitId>,
    completions: &CompletionRecord,
    today: NaiveDate,
) -> u32 {
    let Some(habit) = habit_id else {
        return 0;
    };
    if completions.is_empty() {
        return 0;
    }

    let start = if completions.is_done(habit, today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if completions.is_done(habit, yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    for offset in 0..MAX_LOOKBACK_DAYS {
        let Some(day) = start.checked_sub_days(Days::new(u64::from(offset))) else {
            break;
        };
        if !completions.is_done(habit, day) {
            break;
        }
        streak += 1;
    }
    streak
}

/// [`compute_streak`] as of the local calendar day.
pub fn compute_streak_today(habit_id: Option<HabitId>, completions: &CompletionRecord) -> u32 {
    compute_streak(habit_id, completions, today_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Mark `habit` done for `len` days ending at `end`.
    fn run_ending(habit: HabitId, end: NaiveDate, len: u32) -> CompletionRecord {
        let mut record = CompletionRecord::new();
        for back in 0..len {
            record.set(habit, end - Days::new(u64::from(back)), true);
        }
        record
    }

    #[test]
    fn three_day_run_ending_today() {
        let mut record = CompletionRecord::new();
        record.set(1, day(2024, 1, 1), true);
        record.set(1, day(2024, 1, 2), true);
        record.set(1, day(2024, 1, 3), true);
        assert_eq!(compute_streak(Some(1), &record, day(2024, 1, 3)), 3);
    }

    #[test]
    fn empty_record_is_zero() {
        assert_eq!(compute_streak(Some(1), &CompletionRecord::new(), day(2024, 1, 3)), 0);
    }

    #[test]
    fn missing_habit_id_is_zero() {
        let record = run_ending(1, day(2024, 1, 3), 3);
        assert_eq!(compute_streak(None, &record, day(2024, 1, 3)), 0);
    }

    #[test]
    fn unknown_habit_is_zero() {
        let record = run_ending(1, day(2024, 1, 3), 3);
        assert_eq!(compute_streak(Some(99), &record, day(2024, 1, 3)), 0);
    }

    #[test]
    fn today_and_yesterday_missed_is_zero() {
        let record = run_ending(1, day(2024, 1, 1), 10);
        assert_eq!(compute_streak(Some(1), &record, day(2024, 1, 3)), 0);
    }

    #[test]
    fn yesterday_keeps_streak_alive() {
        let record = run_ending(1, day(2024, 1, 2), 4);
        assert_eq!(compute_streak(Some(1), &record, day(2024, 1, 3)), 4);
    }

    #[test]
    fn explicit_false_today_uses_yesterday() {
        let mut record = run_ending(1, day(2024, 1, 2), 2);
        record.set(1, day(2024, 1, 3), false);
        assert_eq!(compute_streak(Some(1), &record, day(2024, 1, 3)), 2);
    }

    #[test]
    fn stops_at_first_gap() {
        let mut record = run_ending(1, day(2024, 3, 10), 3);
        record.set(1, day(2024, 3, 6), true);
        record.set(1, day(2024, 3, 5), true);
        assert_eq!(compute_streak(Some(1), &record, day(2024, 3, 10)), 3);
    }

    #[test]
    fn crosses_month_and_year_boundaries() {
        let record = run_ending(1, day(2024, 1, 2), 5);
        assert_eq!(compute_streak(Some(1), &record, day(2024, 1, 2)), 5);
    }

    #[test]
    fn capped_at_lookback() {
        let record = run_ending(1, day(2024, 12, 31), 365);
        assert_eq!(compute_streak(Some(1), &record, day(2024, 12, 31)), MAX_LOOKBACK_DAYS);
    }

    #[test]
    fn other_habits_do_not_count() {
        let mut record = run_ending(2, day(2024, 5, 5), 5);
        record.set(1, day(2024, 5, 5), true);
        assert_eq!(compute_streak(Some(1), &record, day(2024, 5, 5)), 1);
    }

    proptest! {
        #[test]
        fn run_of_n_ending_today_counts_n(n in 1u32..150, offset in 0i64..2000) {
            let today = day(2020, 1, 1) + chrono::Duration::days(offset);
            let record = run_ending(1, today, n);
            prop_assert_eq!(compute_streak(Some(1), &record, today), n.min(MAX_LOOKBACK_DAYS));
        }

        #[test]
        fn never_exceeds_cap(flags in proptest::collection::vec(any::<bool>(), 0..300)) {
            let today = day(2024, 12, 31);
            let mut record = CompletionRecord::new();
            for (back, done) in flags.iter().enumerate() {
                record.set(1, today - Days::new(back as u64), *done);
            }
            prop_assert!(compute_streak(Some(1), &record, today) <= MAX_LOOKBACK_DAYS);
        }
    }
}
