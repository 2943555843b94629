use chrono::{FixedOffset, NaiveDateTime, Utc};

use shared_config::AppConfig;

/// Source of "now" in the studio's local time zone. Injected so validation
/// is deterministic under test.
pub trait Clock: Send + Sync {
    fn now_local(&self) -> NaiveDateTime;
}

/// Wall clock shifted by the configured fixed UTC offset. Brazil dropped DST
/// in 2019, so a fixed offset is enough here.
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset_hours: i32) -> Self {
        let offset = FixedOffset::east_opt(offset_hours * 3600)
            .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
        Self { offset }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.local_utc_offset_hours)
    }
}

impl Clock for SystemClock {
    fn now_local(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.offset).naive_local()
    }
}

/// Frozen clock for tests.
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now_local(&self) -> NaiveDateTime {
        self.0
    }
}
