//! Time-of-day distribution of activity.

use chrono::{Local, TimeZone, Timelike};
use serde::Serialize;

use crate::types::ActivityData;

/// One of four fixed windows of the local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    /// 06:00 - 11:59
    Morning,
    /// 12:00 - 17:59
    Afternoon,
    /// 18:00 - 21:59
    Evening,
    /// 22:00 - 05:59
    Night,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
        TimeSlot::Night,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimeSlot::Morning,
            12..=17 => TimeSlot::Afternoon,
            18..=21 => TimeSlot::Evening,
            _ => TimeSlot::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
            TimeSlot::Night => "night",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning",
            TimeSlot::Afternoon => "Afternoon",
            TimeSlot::Evening => "Evening",
            TimeSlot::Night => "Night",
        }
    }
}

/// Activity count per [`TimeSlot`]. All four slots are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeDistribution {
    pub morning: usize,
    pub afternoon: usize,
    pub evening: usize,
    pub night: usize,
}

impl TimeDistribution {
    pub fn get(&self, slot: TimeSlot) -> usize {
        match slot {
            TimeSlot::Morning => self.morning,
            TimeSlot::Afternoon => self.afternoon,
            TimeSlot::Evening => self.evening,
            TimeSlot::Night => self.night,
        }
    }

    fn slot_mut(&mut self, slot: TimeSlot) -> &mut usize {
        match slot {
            TimeSlot::Morning => &mut self.morning,
            TimeSlot::Afternoon => &mut self.afternoon,
            TimeSlot::Evening => &mut self.evening,
            TimeSlot::Night => &mut self.night,
        }
    }

    pub fn record_hour(&mut self, hour: u32) {
        *self.slot_mut(TimeSlot::from_hour(hour)) += 1;
    }

    pub fn total(&self) -> usize {
        self.morning + self.afternoon + self.evening + self.night
    }

    /// Slots paired with their counts, morning first.
    pub fn iter(&self) -> impl Iterator<Item = (TimeSlot, usize)> + '_ {
        TimeSlot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }
}

/// Bucket every commit, pull request and issue by its local hour.
pub fn analyze_time_distribution(data: &ActivityData) -> TimeDistribution {
    analyze_time_distribution_in(data, &Local)
}

/// Bucket every activity by its hour in the given timezone.
pub fn analyze_time_distribution_in<Tz: TimeZone>(
    data: &ActivityData,
    tz: &Tz,
) -> TimeDistribution {
    let mut distribution = TimeDistribution::default();
    for record in data.records() {
        distribution.record_hour(record.timestamp().with_timezone(tz).hour());
    }
    distribution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Commit, Issue, ItemState, PullRequest};
    use chrono::{FixedOffset, NaiveDate, Utc};

    fn commit_at(hour: u32) -> Commit {
        Commit {
            repo: "octo/app".to_string(),
            message: "feat: x".to_string(),
            sha: "abc1234".to_string(),
            url: String::new(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, hour, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_slot_boundaries() {
        assert_eq!(TimeSlot::from_hour(7), TimeSlot::Morning);
        assert_eq!(TimeSlot::from_hour(13), TimeSlot::Afternoon);
        assert_eq!(TimeSlot::from_hour(19), TimeSlot::Evening);
        assert_eq!(TimeSlot::from_hour(23), TimeSlot::Night);

        assert_eq!(TimeSlot::from_hour(5), TimeSlot::Night);
        assert_eq!(TimeSlot::from_hour(6), TimeSlot::Morning);
        assert_eq!(TimeSlot::from_hour(12), TimeSlot::Afternoon);
        assert_eq!(TimeSlot::from_hour(18), TimeSlot::Evening);
        assert_eq!(TimeSlot::from_hour(22), TimeSlot::Night);
        assert_eq!(TimeSlot::from_hour(0), TimeSlot::Night);
    }

    #[test]
    fn test_distribution_covers_all_kinds() {
        let data = ActivityData {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            commits: vec![commit_at(7), commit_at(23)],
            pull_requests: vec![PullRequest {
                repo: "octo/app".to_string(),
                title: "t".to_string(),
                number: 1,
                state: ItemState::Open,
                url: String::new(),
                timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 13, 0, 0).unwrap(),
            }],
            issues: vec![Issue {
                repo: "octo/app".to_string(),
                title: "t".to_string(),
                number: 2,
                state: ItemState::Open,
                url: String::new(),
                timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 19, 0, 0).unwrap(),
            }],
        };

        let dist = analyze_time_distribution_in(&data, &Utc);
        assert_eq!(
            dist,
            TimeDistribution {
                morning: 1,
                afternoon: 1,
                evening: 1,
                night: 1,
            }
        );
        assert_eq!(dist.total(), data.total_activity());
    }

    #[test]
    fn test_hours_are_read_in_given_timezone() {
        let data = ActivityData {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            commits: vec![commit_at(23)],
            pull_requests: vec![],
            issues: vec![],
        };

        // 23:30 UTC is 08:30 at UTC+9
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let dist = analyze_time_distribution_in(&data, &tokyo);
        assert_eq!(dist.morning, 1);
        assert_eq!(dist.night, 0);
    }

    #[test]
    fn test_empty_day_has_all_slots() {
        let data = ActivityData::empty(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let dist = analyze_time_distribution(&data);
        let json = serde_json::to_value(dist).unwrap();
        for slot in TimeSlot::ALL {
            assert_eq!(json[slot.as_str()], 0);
        }
        assert_eq!(dist.iter().count(), 4);
    }
}
