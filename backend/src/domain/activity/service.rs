//! Authorization-scoped logging and listing of care records.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tracing::info;

use super::records::RecordStamp;
use super::{
    ActivityKind, DiaperDraft, DiaperRecord, FeedingDraft, FeedingRecord, GrowthDraft,
    GrowthRecord, SleepDraft, SleepPatch, SleepRecord,
};
use crate::domain::ports::{ActivityRepository, RecordQuery, map_store_error};
use crate::domain::{AccessPolicy, BabyId, DayWindow, Error, RecordId, User};

/// Maximum number of records returned by a list.
pub const RECORD_LIST_LIMIT: usize = 100;

/// Logs, lists, and removes care records on behalf of a caller.
#[derive(Clone)]
pub struct ActivityService {
    policy: AccessPolicy,
    records: Arc<dyn ActivityRepository>,
    clock: Arc<dyn Clock>,
}

impl ActivityService {
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

    async fn stamp(&self, caller: &User, baby_id: BabyId) -> Result<RecordStamp, Error> {
        self.policy.require_access(&caller.user_id, &baby_id).await?;
        Ok(RecordStamp {
            record_id: RecordId::generate(),
            baby_id,
            user_id: caller.user_id,
            created_at: self.clock.utc(),
        })
    }

    async fn query(
        &self,
        caller: &User,
        baby_id: BabyId,
        date: Option<&str>,
    ) -> Result<RecordQuery, Error> {
        let query = RecordQuery::for_baby(baby_id, RECORD_LIST_LIMIT);
        let query = match date {
            Some(_) => query.within(DayWindow::resolve(date, self.clock.utc())?),
            None => query,
        };
        self.policy.require_access(&caller.user_id, &baby_id).await?;
        Ok(query)
    }

    /// Log a feeding; `end_time` may not precede `start_time`.
    pub async fn log_feeding(
        &self,
        caller: &User,
        baby_id: BabyId,
        draft: FeedingDraft,
    ) -> Result<FeedingRecord, Error> {
        validate_interval(draft.start_time, draft.end_time)?;
        let record = draft.into_record(self.stamp(caller, baby_id).await?);
        self.records
            .insert_feeding(&record)
            .await
            .map_err(map_store_error)?;
        Ok(record)
    }

    /// Log a sleep; `end_time` may not precede `start_time`.
    pub async fn log_sleep(
        &self,
        caller: &User,
        baby_id: BabyId,
        draft: SleepDraft,
    ) -> Result<SleepRecord, Error> {
        validate_interval(draft.start_time, draft.end_time)?;
        let record = draft.into_record(self.stamp(caller, baby_id).await?);
        self.records
            .insert_sleep(&record)
            .await
            .map_err(map_store_error)?;
        Ok(record)
    }

    /// Log a diaper change.
    pub async fn log_diaper(
        &self,
        caller: &User,
        baby_id: BabyId,
        draft: DiaperDraft,
    ) -> Result<DiaperRecord, Error> {
        let record = draft.into_record(self.stamp(caller, baby_id).await?);
        self.records
            .insert_diaper(&record)
            .await
            .map_err(map_store_error)?;
        Ok(record)
    }

    /// Log a growth measurement; values must be finite and non-negative.
    pub async fn log_growth(
        &self,
        caller: &User,
        baby_id: BabyId,
        draft: GrowthDraft,
    ) -> Result<GrowthRecord, Error> {
        validate_measurement("weight_kg", draft.weight_kg)?;
        validate_measurement("height_cm", draft.height_cm)?;
        validate_measurement("head_circumference_cm", draft.head_circumference_cm)?;
        let record = draft.into_record(self.stamp(caller, baby_id).await?);
        self.records
            .insert_growth(&record)
            .await
            .map_err(map_store_error)?;
        Ok(record)
    }

    /// Feedings for a baby, optionally limited to one day, newest first.
    pub async fn list_feedings(
        &self,
        caller: &User,
        baby_id: BabyId,
        date: Option<&str>,
    ) -> Result<Vec<FeedingRecord>, Error> {
        let query = self.query(caller, baby_id, date).await?;
        self.records
            .list_feedings(&query)
            .await
            .map_err(map_store_error)
    }

    /// Sleeps for a baby, optionally limited to one day, newest first.
    pub async fn list_sleeps(
        &self,
        caller: &User,
        baby_id: BabyId,
        date: Option<&str>,
    ) -> Result<Vec<SleepRecord>, Error> {
        let query = self.query(caller, baby_id, date).await?;
        self.records
            .list_sleeps(&query)
            .await
            .map_err(map_store_error)
    }

    /// Diaper changes for a baby, optionally limited to one day, newest first.
    pub async fn list_diapers(
        &self,
        caller: &User,
        baby_id: BabyId,
        date: Option<&str>,
    ) -> Result<Vec<DiaperRecord>, Error> {
        let query = self.query(caller, baby_id, date).await?;
        self.records
            .list_diapers(&query)
            .await
            .map_err(map_store_error)
    }

    /// Growth measurements for a baby, most recent date first.
    pub async fn list_growth(&self, caller: &User, baby_id: BabyId) -> Result<Vec<GrowthRecord>, Error> {
        let query = self.query(caller, baby_id, None).await?;
        self.records
            .list_growth(&query)
            .await
            .map_err(map_store_error)
    }

    /// Record the end of a sleep, or correct its details.
    ///
    /// `start_time` cannot be patched, so a new `end_time` is checked against
    /// the stored start.
    pub async fn update_sleep(
        &self,
        caller: &User,
        record_id: &RecordId,
        patch: SleepPatch,
    ) -> Result<SleepRecord, Error> {
        let stored = self
            .records
            .find_sleep(record_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| not_found(ActivityKind::Sleep))?;
        self.policy
            .require_access(&caller.user_id, &stored.baby_id)
            .await?;
        validate_interval(stored.start_time, patch.end_time)?;
        self.records
            .update_sleep(record_id, &patch)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| not_found(ActivityKind::Sleep))
    }

    /// Delete a record of `kind` whose baby the caller can access.
    pub async fn delete(
        &self,
        caller: &User,
        kind: ActivityKind,
        record_id: &RecordId,
    ) -> Result<(), Error> {
        self.authorize_record(caller, kind, record_id).await?;
        let removed = self
            .records
            .delete_record(kind, record_id)
            .await
            .map_err(map_store_error)?;
        if !removed {
            return Err(not_found(kind));
        }
        info!(kind = kind.label(), record_id = %record_id, "record deleted");
        Ok(())
    }

    /// Resolve a record to its baby, then gate on access to that baby.
    async fn authorize_record(
        &self,
        caller: &User,
        kind: ActivityKind,
        record_id: &RecordId,
    ) -> Result<BabyId, Error> {
        let baby_id = self
            .records
            .find_owner_baby(kind, record_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| not_found(kind))?;
        self.policy.require_access(&caller.user_id, &baby_id).await?;
        Ok(baby_id)
    }
}

fn not_found(kind: ActivityKind) -> Error {
    Error::not_found(format!("{} record not found", kind.label()))
}

fn validate_interval(
    start: chrono::DateTime<chrono::Utc>,
    end: Option<chrono::DateTime<chrono::Utc>>,
) -> Result<(), Error> {
    match end {
        Some(end) if end < start => Err(Error::invalid_request(
            "end_time must not be before start_time",
        )
        .with_details(json!({ "field": "end_time" }))),
        _ => Ok(()),
    }
}

fn validate_measurement(field: &str, value: Option<f64>) -> Result<(), Error> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(Error::invalid_request(format!(
            "{field} must be a non-negative number"
        ))
        .with_details(json!({ "field": field }))),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
