//! Domain layer - Core privacy entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! host contexts, the records the plagiarism plugin stores, and the
//! accumulators exchanged with the host privacy subsystem.

pub mod constants;
pub mod context;
pub mod error;
pub mod metadata;
pub mod request;
pub mod submission;

pub use constants::*;
pub use context::{Context, ContextLevel};
pub use error::DomainError;
pub use metadata::{MetadataCollection, MetadataField, MetadataItem};
pub use request::{ApprovedUserList, ContextList, UserList};
pub use submission::{format_timestamp, Activity, PrivacyUser, Submission};
