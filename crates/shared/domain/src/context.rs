//! Host contexts: nodes of the host's permission hierarchy.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::DomainError;

/// Context levels enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextLevel {
    System,
    User,
    CourseCategory,
    Course,
    Module,
    Block,
}

/// Parse a numeric level as stored by the host.
impl TryFrom<i32> for ContextLevel {
    type Error = DomainError;

    fn try_from(level: i32) -> Result<Self, Self::Error> {
        match level {
            constants::CONTEXT_SYSTEM => Ok(ContextLevel::System),
            constants::CONTEXT_USER => Ok(ContextLevel::User),
            constants::CONTEXT_COURSECAT => Ok(ContextLevel::CourseCategory),
            constants::CONTEXT_COURSE => Ok(ContextLevel::Course),
            constants::CONTEXT_MODULE => Ok(ContextLevel::Module),
            constants::CONTEXT_BLOCK => Ok(ContextLevel::Block),
            other => {
                let msg = format!("Unknown context level {}", other);
                Err(DomainError::validation(msg))
            }
        }
    }
}

impl std::fmt::Display for ContextLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ContextLevel::System => "system",
            ContextLevel::User => "user",
            ContextLevel::CourseCategory => "coursecat",
            ContextLevel::Course => "course",
            ContextLevel::Module => "module",
            ContextLevel::Block => "block",
        };
        write!(f, "{}", name)
    }
}

/// A node in the host's context hierarchy.
///
/// For module-level contexts `instance_id` is the course-module id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Context {
    pub id: i64,
    pub level: ContextLevel,
    pub instance_id: i64,
}

impl Context {
    pub fn new(id: i64, level: ContextLevel, instance_id: i64) -> Self {
        Self {
            id,
            level,
            instance_id,
        }
    }

    /// Module-level context for a course module
    pub fn module(id: i64, cmid: i64) -> Self {
        Self::new(id, ContextLevel::Module, cmid)
    }

    /// Check if this context belongs to a single activity instance
    pub fn is_module(&self) -> bool {
        self.level == ContextLevel::Module
    }

    /// Course-module id for module-level contexts
    pub fn course_module_id(&self) -> Option<i64> {
        self.is_module().then_some(self.instance_id)
    }
}
