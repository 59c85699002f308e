use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Wall clock of the deployment time zone. "Today" for entries and reports
/// is always the local calendar date.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Clock {
    tz: Tz,
}

impl Clock {
    pub(crate) fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub(crate) fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Time left until the local moment `at`. Zero when it already passed.
    ///
    /// Local times skipped by a DST jump resolve to a short retry delay.
    pub(crate) fn until(&self, at: NaiveDateTime) -> Duration {
        match self.tz.from_local_datetime(&at).earliest() {
            Some(at) => (at.with_timezone(&Utc) - Utc::now())
                .to_std()
                .unwrap_or(Duration::ZERO),
            None => Duration::from_secs(60),
        }
    }
}
