//! Domain model and use-cases for the baby care log.
//!
//! Everything here is transport agnostic. Storage and the identity provider
//! are reached only through the traits in [`ports`]; inbound adapters call
//! the services exported below.

pub mod access;
pub mod activity;
pub mod aggregation;
pub mod authentication;
pub mod baby;
pub mod baby_profile_service;
pub mod error;
pub mod ids;
pub mod login;
pub mod ports;
pub mod reminder;
pub mod session;
pub mod sharing;
pub mod sleep_prediction;
pub mod timestamp;
pub mod trace_id;
pub mod user;

pub use self::access::AccessPolicy;
pub use self::activity::{
    ActivityKind, ActivityService, DiaperDraft, DiaperRecord, DiaperType, FeedingDraft,
    FeedingRecord, FeedingType, GrowthDraft, GrowthRecord, RECORD_LIST_LIMIT, SleepDraft,
    SleepPatch, SleepQuality, SleepRecord, SleepType,
};
pub use self::aggregation::{
    AggregationService, DailyStats, DiaperStats, FeedingStats, SleepStats, TimelineData,
    TimelineEntry, TimelineEntryType, build_timeline, summarize_day,
};
pub use self::authentication::SessionAuthenticator;
pub use self::baby::{AccessTier, Baby, BabyDraft, BabyPatch, Gender};
pub use self::baby_profile_service::{BABY_LIST_LIMIT, BabyProfileService};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ids::{BabyId, IdValidationError, InviteId, RecordId, ReminderId, UserId};
pub use self::login::{IssuedSession, LoginService};
pub use self::reminder::{Reminder, ReminderDraft, ReminderService, ReminderType};
pub use self::session::{
    DEFAULT_SESSION_TTL_DAYS, ExternalIdentity, ExternalSessionId, Session, SessionToken,
};
pub use self::sharing::{InviteStatus, PendingInvite, ShareInvite, SharingService};
pub use self::sleep_prediction::{
    SleepPrediction, SleepPredictionService, age_band, predict_next_nap,
};
pub use self::timestamp::{
    DayWindow, TimestampError, parse_date, parse_date_field, parse_timestamp,
    parse_timestamp_field,
};
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, EmailValidationError, User};
