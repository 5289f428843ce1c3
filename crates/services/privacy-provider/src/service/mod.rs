//! Service layer - privacy request handling.

mod provider;

pub use provider::{declare_metadata, PlagiarismPrivacyProvider, PrivacyProvider};
