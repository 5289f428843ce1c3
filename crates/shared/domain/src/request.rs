//! Accumulators exchanged with the host privacy subsystem.

use std::collections::HashSet;

use serde::Serialize;

use crate::context::Context;

/// Contexts holding data for one user, deduplicated by context id
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContextList {
    contexts: Vec<Context>,
    #[serde(skip)]
    seen: HashSet<i64>,
}

impl ContextList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a context unless one with the same id is already present
    pub fn add_context(&mut self, context: Context) -> bool {
        if self.contains(context.id) {
            return false;
        }
        self.seen.insert(context.id);
        self.contexts.push(context);
        true
    }

    pub fn add_contexts(&mut self, contexts: impl IntoIterator<Item = Context>) {
        for context in contexts {
            self.add_context(context);
        }
    }

    pub fn context_ids(&self) -> Vec<i64> {
        self.contexts.iter().map(|c| c.id).collect()
    }

    pub fn contains(&self, context_id: i64) -> bool {
        self.seen.contains(&context_id)
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

/// Users holding data in one context
#[derive(Debug, Clone, Serialize)]
pub struct UserList {
    context: Context,
    component: String,
    userids: Vec<i64>,
}

impl UserList {
    pub fn new(context: Context, component: impl Into<String>) -> Self {
        Self {
            context,
            component: component.into(),
            userids: Vec::new(),
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    /// Add user ids, ignoring ones already present
    pub fn add_users(&mut self, userids: impl IntoIterator<Item = i64>) {
        for userid in userids {
            if !self.userids.contains(&userid) {
                self.userids.push(userid);
            }
        }
    }

    pub fn userids(&self) -> &[i64] {
        &self.userids
    }

    pub fn len(&self) -> usize {
        self.userids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.userids.is_empty()
    }
}

/// Context plus the user ids whose deletion the caller already approved
#[derive(Debug, Clone, Serialize)]
pub struct ApprovedUserList {
    context: Context,
    component: String,
    userids: Vec<i64>,
}

impl ApprovedUserList {
    pub fn new(context: Context, component: impl Into<String>, userids: Vec<i64>) -> Self {
        Self {
            context,
            component: component.into(),
            userids,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn userids(&self) -> &[i64] {
        &self.userids
    }
}
