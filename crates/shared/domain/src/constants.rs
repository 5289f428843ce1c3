//! Domain-level constants.
//!
//! Table names, module names and context levels shared by the store
//! and the privacy provider.

// =============================================================================
// Plugin
// =============================================================================

/// Frankenstyle component name of the plagiarism plugin
pub const PLUGIN_COMPONENT: &str = "plagiarism_turnitinsim";

/// Module type name that owns submissions checked by the plugin
pub const ACTIVITY_MODULE_NAME: &str = "assign";

// =============================================================================
// Tables
// =============================================================================

/// Plugin table holding one row per plagiarism-check submission
pub const SUBMISSION_TABLE: &str = "plagiarism_turnitinsim_sub";

/// Plugin table holding EULA acceptance per user
pub const USER_CONSENT_TABLE: &str = "plagiarism_turnitinsim_users";

/// External location name for data held by the remote service
pub const REMOTE_CLIENT_LOCATION: &str = "plagiarism_turnitinsim_client";

// =============================================================================
// Context levels
// =============================================================================

pub const CONTEXT_SYSTEM: i32 = 10;
pub const CONTEXT_USER: i32 = 30;
pub const CONTEXT_COURSECAT: i32 = 40;
pub const CONTEXT_COURSE: i32 = 50;
pub const CONTEXT_MODULE: i32 = 70;
pub const CONTEXT_BLOCK: i32 = 80;

// =============================================================================
// Export
// =============================================================================

/// File name for structured data written by the directory writer
pub const EXPORT_DATA_FILE: &str = "data.json";

/// File name used for exported activity intro content
pub const EXPORT_INTRO_FILE: &str = "intro.html";
