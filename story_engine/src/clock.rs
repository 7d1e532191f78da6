//! Story clock - turns elapsed minutes into an in-fiction time of day.

use serde::{Deserialize, Serialize};

/// A day and wall-clock time inside the story. Days count from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTime {
    pub day: u32,
    pub hour: u8,
    pub minute: u8,
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Day {} {:02}:{:02}", self.day, self.hour, self.minute)
    }
}

/// The time at which a playthrough begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryClock {
    pub start_hour: u8,
    pub start_minute: u8,
}

impl Default for StoryClock {
    fn default() -> Self {
        Self {
            start_hour: 22,
            start_minute: 0,
        }
    }
}

impl StoryClock {
    pub fn new(start_hour: u8, start_minute: u8) -> Self {
        Self {
            start_hour,
            start_minute,
        }
    }

    /// Time of day after `elapsed` minutes. Hours wrap at 24 and roll the day over.
    pub fn time_at(&self, elapsed: u64) -> ClockTime {
        let total_minutes = u64::from(self.start_minute).saturating_add(elapsed);
        let minute = (total_minutes % 60) as u8;

        let total_hours = u64::from(self.start_hour).saturating_add(total_minutes / 60);
        let hour = (total_hours % 24) as u8;

        let days_passed = total_hours / 24;
        let day = u32::try_from(days_passed.saturating_add(1)).unwrap_or(u32::MAX);

        ClockTime { day, hour, minute }
    }
}
