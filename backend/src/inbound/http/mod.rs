//! HTTP inbound adapter exposing REST endpoints.

pub mod activities;
pub mod activities_dto;
pub mod aggregation;
pub mod auth;
pub mod babies;
pub mod error;
pub mod health;
pub mod messages;
pub mod reminders;
pub mod routes;
pub mod session;
pub mod sharing;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
