use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub last_activity_date: Option<NaiveDate>,
    #[serde(default)]
    pub topics_completed_today: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRequest {
    #[serde(flatten)]
    pub state: StreakState,
    /// Defaults to the current UTC date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

impl StreakRequest {
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Applies one completed activity on `today`.
pub fn record_activity(state: &StreakState, today: NaiveDate) -> StreakState {
    if state.last_activity_date == Some(today) {
        return StreakState {
            topics_completed_today: state.topics_completed_today.saturating_add(1),
            ..state.clone()
        };
    }

    let yesterday = today.checked_sub_days(Days::new(1));
    let continues = state.last_activity_date.is_some() && state.last_activity_date == yesterday;
    let current_streak = if continues {
        state.current_streak.saturating_add(1)
    } else {
        1
    };

    StreakState {
        current_streak,
        longest_streak: current_streak.max(state.longest_streak),
        last_activity_date: Some(today),
        topics_completed_today: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn state(current: u32, longest: u32, last: Option<&str>, topics: u32) -> StreakState {
        StreakState {
            current_streak: current,
            longest_streak: longest,
            last_activity_date: last.map(date),
            topics_completed_today: topics,
        }
    }

    #[test]
    fn first_activity_starts_a_streak() {
        let next = record_activity(&state(0, 0, None, 0), date("2024-03-10"));
        assert_eq!(next, state(1, 1, Some("2024-03-10"), 1));
    }

    #[test]
    fn same_day_only_counts_topics() {
        let next = record_activity(&state(4, 6, Some("2024-03-10"), 2), date("2024-03-10"));
        assert_eq!(next, state(4, 6, Some("2024-03-10"), 3));
    }

    #[test]
    fn consecutive_day_extends_and_updates_longest() {
        let next = record_activity(&state(6, 6, Some("2024-02-29"), 5), date("2024-03-01"));
        assert_eq!(next, state(7, 7, Some("2024-03-01"), 1));
    }

    #[test]
    fn gap_resets_but_keeps_longest() {
        let next = record_activity(&state(9, 12, Some("2024-03-01"), 3), date("2024-03-05"));
        assert_eq!(next, state(1, 12, Some("2024-03-05"), 1));
    }

    #[test]
    fn counters_saturate_instead_of_overflowing() {
        let maxed = state(u32::MAX, u32::MAX, Some("2024-06-30"), 3);
        let next = record_activity(&maxed, date("2024-07-01"));
        assert_eq!(next, state(u32::MAX, u32::MAX, Some("2024-07-01"), 1));

        let next = record_activity(&state(2, 2, Some("2024-07-01"), u32::MAX), date("2024-07-01"));
        assert_eq!(next.topics_completed_today, u32::MAX);
    }

    #[test]
    fn request_parses_iso_dates() {
        let req: StreakRequest = serde_json::from_str(
            r#"{
                "currentStreak": 2,
                "longestStreak": 3,
                "lastActivityDate": "2024-12-31",
                "today": "2025-01-01"
            }"#,
        )
        .unwrap();
        let next = record_activity(&req.state, req.today());
        assert_eq!(next.current_streak, 3);
        assert_eq!(next.longest_streak, 3);
    }
}
