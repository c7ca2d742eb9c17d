use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Where a reminder occurrence sits relative to `today`.
///
/// Exactly one class applies for any `(today, next_due, advance_notice_days)`
/// combination. `DueToday` is a subset of the advance window for display
/// purposes but is kept separate because it disables snoozing and is always
/// notification-eligible regardless of snooze state.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DueStatus {
    NotYet,
    InWindow,
    DueToday,
    PastDue,
}

/// Classifies a reminder occurrence. Both endpoints of the advance window
/// `[next_due - advance_notice_days, next_due]` are inclusive.
///
/// The UI read path and the notification scheduler both call this; keeping a
/// single implementation is what guarantees that what a user sees as
/// "upcoming" matches what they get notified about.
pub fn classify_due_status(
    today: NaiveDate,
    next_due: NaiveDate,
    advance_notice_days: i64,
) -> DueStatus {
    if today > next_due {
        return DueStatus::PastDue;
    }
    if today == next_due {
        return DueStatus::DueToday;
    }
    let window_start = next_due
        .checked_sub_days(Days::new(advance_notice_days.max(0) as u64))
        .unwrap_or(next_due);
    if today >= window_start {
        DueStatus::InWindow
    } else {
        DueStatus::NotYet
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn it_classifies_the_advance_window() {
        let next_due = ymd(2025, 3, 1);

        assert_eq!(
            classify_due_status(ymd(2025, 2, 25), next_due, 7),
            DueStatus::InWindow
        );
        assert_eq!(
            classify_due_status(ymd(2025, 3, 1), next_due, 7),
            DueStatus::DueToday
        );
        assert_eq!(
            classify_due_status(ymd(2025, 3, 2), next_due, 7),
            DueStatus::PastDue
        );
    }

    #[test]
    fn it_treats_both_window_endpoints_as_inclusive() {
        let next_due = ymd(2025, 3, 10);
        assert_eq!(
            classify_due_status(ymd(2025, 3, 3), next_due, 7),
            DueStatus::InWindow
        );
        assert_eq!(
            classify_due_status(ymd(2025, 3, 2), next_due, 7),
            DueStatus::NotYet
        );
    }

    #[test]
    fn it_handles_zero_advance_notice() {
        let next_due = ymd(2025, 3, 10);
        assert_eq!(
            classify_due_status(ymd(2025, 3, 9), next_due, 0),
            DueStatus::NotYet
        );
        assert_eq!(
            classify_due_status(ymd(2025, 3, 10), next_due, 0),
            DueStatus::DueToday
        );
    }

    #[test]
    fn classes_are_mutually_exclusive_and_exhaustive() {
        let next_due = ymd(2025, 6, 15);
        let mut day = ymd(2025, 5, 1);
        let end = ymd(2025, 8, 1);
        while day < end {
            // classify_due_status returns exactly one variant for every day
            let status = classify_due_status(day, next_due, 10);
            match status {
                DueStatus::PastDue => assert!(day > next_due),
                DueStatus::DueToday => assert_eq!(day, next_due),
                DueStatus::InWindow => {
                    assert!(day < next_due);
                    assert!(day >= ymd(2025, 6, 5));
                }
                DueStatus::NotYet => assert!(day < ymd(2025, 6, 5)),
            }
            day = day.succ_opt().unwrap();
        }
    }
}
