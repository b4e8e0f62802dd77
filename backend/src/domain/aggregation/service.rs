//! Gathers one day's records and hands them to the pure aggregators.

use std::sync::Arc;

use mockable::Clock;

use super::{DailyStats, TimelineEntry, build_timeline, summarize_day};
use crate::domain::activity::RECORD_LIST_LIMIT;
use crate::domain::ports::{ActivityRepository, RecordQuery, map_store_error};
use crate::domain::{
    AccessPolicy, BabyId, DayWindow, DiaperRecord, Error, FeedingRecord, SleepRecord, User,
};

/// Timeline and statistics use cases.
#[derive(Clone)]
pub struct AggregationService {
    policy: AccessPolicy,
    records: Arc<dyn ActivityRepository>,
    clock: Arc<dyn Clock>,
}

struct DayRecords {
    window: DayWindow,
    feedings: Vec<FeedingRecord>,
    sleeps: Vec<SleepRecord>,
    diapers: Vec<DiaperRecord>,
}

impl AggregationService {
    /// Build the service.
    pub fn new(
        policy: AccessPolicy,
        records: Arc<dyn ActivityRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            policy,
            records,
            clock,
        }
    }

    /// Timeline of the requested day (today when `date` is absent).
    pub async fn timeline(
        &self,
        caller: &User,
        baby_id: BabyId,
        date: Option<&str>,
    ) -> Result<Vec<TimelineEntry>, Error> {
        let day = self.fetch_day(caller, baby_id, date).await?;
        Ok(build_timeline(day.feedings, day.sleeps, day.diapers))
    }

    /// Totals for the requested day (today when `date` is absent).
    pub async fn daily_stats(
        &self,
        caller: &User,
        baby_id: BabyId,
        date: Option<&str>,
    ) -> Result<DailyStats, Error> {
        let day = self.fetch_day(caller, baby_id, date).await?;
        Ok(summarize_day(
            day.window.start(),
            &day.feedings,
            &day.sleeps,
            &day.diapers,
        ))
    }

    /// Any failing fetch fails the whole request; partial days are never
    /// returned.
    async fn fetch_day(
        &self,
        caller: &User,
        baby_id: BabyId,
        date: Option<&str>,
    ) -> Result<DayRecords, Error> {
        let window = DayWindow::resolve(date, self.clock.utc())?;
        self.policy.require_access(&caller.user_id, &baby_id).await?;
        let query = RecordQuery::for_baby(baby_id, RECORD_LIST_LIMIT).within(window);

        let (feedings, sleeps, diapers) = tokio::try_join!(
            self.records.list_feedings(&query),
            self.records.list_sleeps(&query),
            self.records.list_diapers(&query),
        )
        .map_err(map_store_error)?;

        Ok(DayRecords {
            window,
            feedings,
            sleeps,
            diapers,
        })
    }
}
