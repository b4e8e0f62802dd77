//! Driven ports: storage collections and the identity provider.

mod macros;
pub(crate) use macros::define_port_error;

mod activity_repository;
mod baby_repository;
mod identity_provider;
mod reminder_repository;
mod session_repository;
mod sharing_repository;
mod store_error;
mod user_repository;

#[cfg(test)]
pub use activity_repository::MockActivityRepository;
pub use activity_repository::{ActivityRepository, RecordQuery, growth_anchor};
#[cfg(test)]
pub use baby_repository::MockBabyRepository;
pub use baby_repository::{BabyRepository, CascadeReport};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use reminder_repository::MockReminderRepository;
pub use reminder_repository::ReminderRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::SessionRepository;
#[cfg(test)]
pub use sharing_repository::MockSharingRepository;
pub use sharing_repository::{InviteTransition, SharingRepository};
pub use store_error::{StoreError, map_store_error};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
