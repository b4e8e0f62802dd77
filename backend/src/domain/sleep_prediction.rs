//! Rule-based estimate of a baby's next nap.
//!
//! The estimate depends only on the baby's age and the most recent sleep in
//! the last seven days. Age bands use 30-day months.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::activity::RECORD_LIST_LIMIT;
use super::ports::{ActivityRepository, RecordQuery, map_store_error};
use super::{AccessPolicy, BabyId, Error, SleepRecord, User};

/// How far back recent sleeps are considered.
pub const LOOKBACK_DAYS: i64 = 7;

/// Fallback offset when the computed nap time already passed.
pub const OVERDUE_NAP_MINUTES: i64 = 30;

/// Wake window and typical nap length for one age band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBand {
    /// Upper bound (exclusive) in 30-day months; `None` for the last band.
    pub below_months: Option<i64>,
    pub wake_window_minutes: i64,
    pub recommended_nap_minutes: i64,
}

/// Band for a year and older.
pub const OLDEST_BAND: AgeBand = AgeBand {
    below_months: None,
    wake_window_minutes: 180,
    recommended_nap_minutes: 90,
};

/// Bands ordered by age; the last one is open-ended.
pub const AGE_BANDS: [AgeBand; 5] = [
    AgeBand { below_months: Some(3), wake_window_minutes: 60, recommended_nap_minutes: 45 },
    AgeBand { below_months: Some(6), wake_window_minutes: 90, recommended_nap_minutes: 60 },
    AgeBand { below_months: Some(9), wake_window_minutes: 120, recommended_nap_minutes: 75 },
    AgeBand { below_months: Some(12), wake_window_minutes: 150, recommended_nap_minutes: 90 },
    OLDEST_BAND,
];

/// Band for an age in whole days.
pub fn age_band(age_days: i64) -> AgeBand {
    AGE_BANDS
        .iter()
        .copied()
        .find(|band| band.below_months.is_none_or(|months| age_days < months * 30))
        .unwrap_or(OLDEST_BAND)
}

/// Estimated next nap for a baby.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SleepPrediction {
    pub next_nap_time: DateTime<Utc>,
    pub wake_window_minutes: i64,
    pub recommended_duration_minutes: i64,
    /// Heuristic certainty in `[0, 1]`.
    pub confidence: f64,
    /// Age in 30-day months, truncated.
    pub age_months: i64,
}

/// Predict the next nap.
///
/// `recent` must be ordered by `start_time` descending. The first record with
/// an end time anchors the estimate: next nap = end + wake window, moved to
/// `now + 30 min` when that is already in the past. Without a finished sleep
/// the estimate falls back to half a window (some records) or a full window
/// (no records) from `now`.
pub fn predict_next_nap(
    birth_date: NaiveDate,
    recent: &[SleepRecord],
    now: DateTime<Utc>,
) -> SleepPrediction {
    let age_days = (now.date_naive() - birth_date).num_days();
    let band = age_band(age_days);
    let window = Duration::minutes(band.wake_window_minutes);

    let (next_nap_time, confidence) = match recent.iter().find_map(|s| s.end_time) {
        Some(last_wake) => {
            let candidate = last_wake + window;
            if candidate < now {
                (now + Duration::minutes(OVERDUE_NAP_MINUTES), 0.75)
            } else {
                (candidate, 0.75)
            }
        }
        None if !recent.is_empty() => (now + Duration::minutes(band.wake_window_minutes / 2), 0.5),
        None => (now + window, 0.4),
    };

    SleepPrediction {
        next_nap_time,
        wake_window_minutes: band.wake_window_minutes,
        recommended_duration_minutes: band.recommended_nap_minutes,
        confidence,
        age_months: age_days.div_euclid(30),
    }
}

/// Gates prediction on access and loads recent sleeps.
#[derive(Clone)]
pub struct SleepPredictionService {
    policy: AccessPolicy,
    records: Arc<dyn ActivityRepository>,
    clock: Arc<dyn Clock>,
}

impl SleepPredictionService {
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

    /// Predict the next nap for a baby the caller can access.
    pub async fn predict(&self, caller: &User, baby_id: BabyId) -> Result<SleepPrediction, Error> {
        let baby = self.policy.require_access(&caller.user_id, &baby_id).await?;
        let now = self.clock.utc();
        let query = RecordQuery::for_baby(baby_id, RECORD_LIST_LIMIT)
            .since(now - Duration::days(LOOKBACK_DAYS));
        let recent = self
            .records
            .list_sleeps(&query)
            .await
            .map_err(map_store_error)?;
        Ok(predict_next_nap(baby.birth_date, &recent, now))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockActivityRepository, MockBabyRepository};
    use crate::domain::{ErrorCode, RecordId, SleepType, UserId};
    use crate::test_support::{MutableClock, baby_owned_by, date, instant, user};
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        instant(2024, 10, 1, 12, 0)
    }

    fn sleep(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> SleepRecord {
        SleepRecord {
            record_id: RecordId::generate(),
            baby_id: BabyId::generate(),
            user_id: UserId::generate(),
            sleep_type: SleepType::Nap,
            start_time: start,
            end_time: end,
            duration_minutes: None,
            quality: None,
            notes: None,
            created_at: start,
        }
    }

    #[rstest]
    #[case(0, 60, 45)]
    #[case(89, 60, 45)]
    #[case(90, 90, 60)]
    #[case(179, 90, 60)]
    #[case(180, 120, 75)]
    #[case(270, 150, 90)]
    #[case(359, 150, 90)]
    #[case(360, 180, 90)]
    #[case(2000, 180, 90)]
    fn bands_switch_on_thirty_day_months(
        #[case] age_days: i64,
        #[case] window: i64,
        #[case] nap: i64,
    ) {
        let band = age_band(age_days);
        assert_eq!(band.wake_window_minutes, window);
        assert_eq!(band.recommended_nap_minutes, nap);
    }

    #[rstest]
    fn finished_sleep_anchors_the_prediction(now: DateTime<Utc>) {
        // 104 days old: 90-minute window.
        let birth = date(2024, 6, 19);
        let woke = now - Duration::minutes(30);
        let recent = [sleep(now - Duration::hours(2), Some(woke))];

        let prediction = predict_next_nap(birth, &recent, now);

        assert_eq!(prediction.next_nap_time, woke + Duration::minutes(90));
        assert!((prediction.confidence - 0.75).abs() < f64::EPSILON);
        assert_eq!(prediction.wake_window_minutes, 90);
        assert_eq!(prediction.recommended_duration_minutes, 60);
        assert_eq!(prediction.age_months, 3);
    }

    #[rstest]
    fn overdue_naps_are_pushed_half_an_hour_ahead(now: DateTime<Utc>) {
        let birth = date(2024, 9, 1);
        let recent = [sleep(now - Duration::hours(6), Some(now - Duration::hours(5)))];

        let prediction = predict_next_nap(birth, &recent, now);

        assert_eq!(prediction.next_nap_time, now + Duration::minutes(30));
        assert!((prediction.confidence - 0.75).abs() < f64::EPSILON);
    }

    #[rstest]
    fn most_recent_finished_sleep_wins(now: DateTime<Utc>) {
        let birth = date(2024, 9, 1);
        let ongoing = sleep(now - Duration::minutes(10), None);
        let latest_finished = sleep(now - Duration::minutes(50), Some(now - Duration::minutes(20)));
        let older = sleep(now - Duration::hours(5), Some(now - Duration::hours(4)));

        let prediction = predict_next_nap(birth, &[ongoing, latest_finished, older], now);

        assert_eq!(prediction.next_nap_time, now + Duration::minutes(40));
    }

    #[rstest]
    fn unfinished_sleeps_use_half_a_window(now: DateTime<Utc>) {
        let birth = date(2024, 9, 1);
        let recent = [sleep(now - Duration::minutes(10), None)];

        let prediction = predict_next_nap(birth, &recent, now);

        assert_eq!(prediction.next_nap_time, now + Duration::minutes(30));
        assert!((prediction.confidence - 0.5).abs() < f64::EPSILON);
    }

    #[rstest]
    fn no_history_uses_a_full_window(now: DateTime<Utc>) {
        let birth = date(2023, 1, 1);

        let prediction = predict_next_nap(birth, &[], now);

        assert_eq!(prediction.next_nap_time, now + Duration::minutes(180));
        assert!((prediction.confidence - 0.4).abs() < f64::EPSILON);
    }

    #[rstest]
    #[tokio::test]
    async fn service_looks_back_seven_days(now: DateTime<Utc>) {
        let caller = user("parent@example.com", now);
        let baby = baby_owned_by(caller.user_id, date(2024, 9, 1), now);
        let baby_id = baby.baby_id;
        let mut babies = MockBabyRepository::new();
        babies
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(baby)));
        let mut records = MockActivityRepository::new();
        records
            .expect_list_sleeps()
            .withf(move |query| query.from == Some(now - Duration::days(7)) && query.until.is_none())
            .return_once(|_| Ok(Vec::new()));
        let service = SleepPredictionService::new(
            AccessPolicy::new(Arc::new(babies)),
            Arc::new(records),
            Arc::new(MutableClock::new(now)),
        );

        let prediction = service.predict(&caller, baby_id).await.expect("prediction");

        assert_eq!(prediction.wake_window_minutes, 60);
    }

    #[rstest]
    #[tokio::test]
    async fn service_requires_access(now: DateTime<Utc>) {
        let caller = user("stranger@example.com", now);
        let mut babies = MockBabyRepository::new();
        babies.expect_find_by_id().return_once(|_| Ok(None));
        let service = SleepPredictionService::new(
            AccessPolicy::new(Arc::new(babies)),
            Arc::new(MockActivityRepository::new()),
            Arc::new(MutableClock::new(now)),
        );

        let err = service
            .predict(&caller, BabyId::generate())
            .await
            .expect_err("denied");

        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
