//! SeaORM entities.
//!
//! `submission` and `user_consent` are owned by the plugin. The others are
//! host tables the provider only reads and joins against.

pub mod assign;
pub mod context;
pub mod course_module;
pub mod module;
pub mod submission;
pub mod user;
pub mod user_consent;
