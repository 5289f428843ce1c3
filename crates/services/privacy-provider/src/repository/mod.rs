//! Repository layer for data access.

pub mod entities;
mod privacy_repository;

#[cfg(any(test, feature = "test-utils"))]
pub use privacy_repository::MockPrivacyRepository;
pub use privacy_repository::{PrivacyRepository, PrivacyStore};
