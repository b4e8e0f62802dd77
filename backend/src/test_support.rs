//! Shared doubles and builders for unit tests.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{Baby, BabyDraft, EmailAddress, User, UserId};

/// Clock whose reading only changes when a test moves it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: Duration) {
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

pub fn instant(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(y, m, d, h, min, 0).single() {
        Some(value) => value,
        None => panic!("invalid instant {y}-{m}-{d} {h}:{min}"),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(y, m, d) {
        Some(value) => value,
        None => panic!("invalid date {y}-{m}-{d}"),
    }
}

pub fn user(email: &str, now: DateTime<Utc>) -> User {
    let email = match EmailAddress::new(email) {
        Ok(value) => value,
        Err(err) => panic!("invalid fixture email {email}: {err}"),
    };
    let name = email.as_str().split('@').next().unwrap_or("user").to_owned();
    User::register(email, name, None, now)
}

pub fn baby_owned_by(owner: UserId, birth_date: NaiveDate, now: DateTime<Utc>) -> Baby {
    Baby::create(
        owner,
        BabyDraft {
            name: "Robin".into(),
            birth_date,
            gender: None,
            photo: None,
        },
        now,
    )
}
