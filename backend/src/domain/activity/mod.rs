//! Care records (feeding, sleep, diaper, growth) and the service logging them.

mod records;
mod service;

pub(crate) use records::RecordStamp;
pub use records::{
    ActivityKind, DiaperDraft, DiaperRecord, DiaperType, FeedingDraft, FeedingRecord,
    FeedingType, GrowthDraft, GrowthRecord, SleepDraft, SleepPatch, SleepQuality, SleepRecord,
    SleepType,
};
pub use service::{ActivityService, RECORD_LIST_LIMIT};
