//! Scheduled report pushes.
//!
//! Two calendar triggers exist: a weekly digest on Monday at 10:00 and a
//! monthly digest on the 1st at 10:00, both in the deployment time zone.
//! Each trigger fires at most once per period; the period is tracked
//! explicitly instead of sleeping past the firing minute.

use std::collections::HashMap;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use teloxide::{Bot, types::ChatId};

use crate::{clock::Clock, handlers::deliver, router::Router};

const FIRE_HOUR: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Trigger {
    /// Trailing week report, Monday 10:00.
    WeeklyDigest,
    /// Previous calendar month report, 1st of the month 10:00.
    MonthlyDigest,
}

/// Identifies the period a trigger fires once in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum PeriodKey {
    IsoWeek { year: i32, week: u32 },
    Month { year: i32, month: u32 },
}

impl Trigger {
    pub(crate) const ALL: [Trigger; 2] = [Trigger::WeeklyDigest, Trigger::MonthlyDigest];

    fn fire_time() -> NaiveTime {
        NaiveTime::from_hms_opt(FIRE_HOUR, 0, 0).unwrap_or(NaiveTime::MIN)
    }

    /// The firing moment of the period that contains `date`.
    pub(crate) fn moment_in_period(self, date: NaiveDate) -> NaiveDateTime {
        let day = match self {
            Trigger::WeeklyDigest => {
                let back = u64::from(date.weekday().num_days_from_monday());
                date.checked_sub_days(Days::new(back)).unwrap_or(date)
            }
            Trigger::MonthlyDigest => date.with_day(1).unwrap_or(date),
        };
        day.and_time(Self::fire_time())
    }

    /// The first firing moment strictly after `after`.
    pub(crate) fn next_fire(self, after: NaiveDateTime) -> NaiveDateTime {
        let current = self.moment_in_period(after.date());
        if current > after {
            return current;
        }
        let next_day = match self {
            Trigger::WeeklyDigest => current.date().checked_add_days(Days::new(7)),
            Trigger::MonthlyDigest => current.date().checked_add_months(Months::new(1)),
        };
        next_day
            .unwrap_or(NaiveDate::MAX)
            .and_time(Self::fire_time())
    }

    /// Whether this period's moment has been reached at `now`.
    pub(crate) fn is_due(self, now: NaiveDateTime) -> bool {
        self.moment_in_period(now.date()) <= now
    }

    pub(crate) fn period_key(self, date: NaiveDate) -> PeriodKey {
        match self {
            Trigger::WeeklyDigest => {
                let week = date.iso_week();
                PeriodKey::IsoWeek {
                    year: week.year(),
                    week: week.week(),
                }
            }
            Trigger::MonthlyDigest => PeriodKey::Month {
                year: date.year(),
                month: date.month(),
            },
        }
    }
}

/// Last period each trigger fired in.
#[derive(Debug, Default)]
pub(crate) struct FiredLog {
    last: HashMap<Trigger, PeriodKey>,
}

impl FiredLog {
    /// Treats moments already passed at `now` as fired, so a restart does not
    /// resend the current period's digest.
    pub(crate) fn starting_at(now: NaiveDateTime) -> Self {
        let mut log = Self::default();
        for trigger in Trigger::ALL {
            if trigger.is_due(now) {
                log.mark_if_new(trigger, trigger.period_key(now.date()));
            }
        }
        log
    }

    /// Records `key` for `trigger`; returns `false` if it was already recorded.
    pub(crate) fn mark_if_new(&mut self, trigger: Trigger, key: PeriodKey) -> bool {
        if self.last.get(&trigger) == Some(&key) {
            return false;
        }
        self.last.insert(trigger, key);
        true
    }

    /// Triggers that should fire at `now`, marked as fired.
    pub(crate) fn take_due(&mut self, now: NaiveDateTime) -> Vec<Trigger> {
        Trigger::ALL
            .into_iter()
            .filter(|t| t.is_due(now) && self.mark_if_new(*t, t.period_key(now.date())))
            .collect()
    }
}

/// Sleeps until each calendar moment and pushes the digest to `chats`.
pub(crate) async fn run(bot: Bot, router: Router, clock: Clock, chats: Vec<ChatId>) {
    tracing::info!("Scheduled digests enabled for {} chat(s)", chats.len());
    let mut fired = FiredLog::starting_at(clock.now());

    loop {
        let now = clock.now();
        let next = Trigger::ALL
            .into_iter()
            .map(|t| t.next_fire(now))
            .min()
            .unwrap_or(now);
        tracing::debug!("next scheduled digest at {next}");
        tokio::time::sleep(clock.until(next)).await;

        let now = clock.now();
        for trigger in fired.take_due(now) {
            push_digest(&bot, &router, trigger, now.date(), &chats).await;
        }
    }
}

async fn push_digest(
    bot: &Bot,
    router: &Router,
    trigger: Trigger,
    today: NaiveDate,
    chats: &[ChatId],
) {
    let reply = match router.digest(trigger, today).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::error!("failed to build {trigger:?} for {today}: {err}");
            return;
        }
    };

    for chat_id in chats {
        if let Err(err) = deliver(bot, *chat_id, vec![reply.clone()]).await {
            tracing::error!("failed to push {trigger:?} to chat {chat_id}: {err}");
        }
    }
}
