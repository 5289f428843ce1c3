//! Privacy Provider Library
//!
//! This crate reports, exports and deletes the personal data stored by the
//! plagiarism plugin on behalf of the host's privacy subsystem.
//! It can be embedded in a host process or driven by the bundled CLI.

pub mod config;
pub mod export;
pub mod infra;
pub mod repository;
pub mod service;

use std::path::PathBuf;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tracing::info;

use common::AppResult;
use domain::{
    ApprovedUserList, Context, ContextLevel, MetadataCollection, UserList, PLUGIN_COMPONENT,
};

use crate::config::{PrivacyServiceConfig, ProviderSettings};
use crate::export::{ActivityContextHelper, DirectoryWriter, MemoryWriter};
use crate::infra::Database;
use crate::repository::{PrivacyRepository, PrivacyStore};
use crate::service::{declare_metadata, PlagiarismPrivacyProvider, PrivacyProvider};

/// Wire the provider over a database connection.
pub fn build_provider(
    db: DatabaseConnection,
    settings: ProviderSettings,
) -> PlagiarismPrivacyProvider {
    let repo: Arc<dyn PrivacyRepository> = Arc::new(PrivacyStore::new(db));
    let module = settings.activity_module.clone();
    let helper = Arc::new(ActivityContextHelper::new(repo.clone(), module));
    PlagiarismPrivacyProvider::new(repo, helper, settings)
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Refresh,
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &PrivacyServiceConfig,
    migration: MigrateAction,
) -> AppResult<()> {
    let db = Database::connect(&config.database).await?;

    match migration {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Refresh => {
            db.refresh_migrations().await?;
            info!("Plugin tables reset and migrations applied");
        }
    }

    Ok(())
}

/// Privacy request issued from the command line.
#[derive(Debug, Clone)]
pub enum PrivacyRequest {
    Metadata,
    Contexts { userid: i64 },
    Export {
        userid: i64,
        out: Option<PathBuf>,
        stdout: bool,
    },
    DeleteContext { cmid: i64 },
    DeleteUser { userid: i64 },
    Users { cmid: i64 },
    DeleteUsers { cmid: i64, userids: Vec<i64> },
}

/// Answer one privacy request and return its JSON output.
///
/// Deletions have no output and return `Value::Null`.
pub async fn execute_request(
    config: &PrivacyServiceConfig,
    request: PrivacyRequest,
) -> AppResult<Value> {
    if let PrivacyRequest::Metadata = request {
        let mut collection = MetadataCollection::new(PLUGIN_COMPONENT);
        declare_metadata(&mut collection);
        info!(items = collection.len(), "Declared personal data");
        return Ok(serde_json::to_value(&collection)?);
    }

    let db = Database::connect(&config.database).await?;
    db.ping().await?;

    let repo = PrivacyStore::new(db.get_connection());
    let provider = build_provider(db.get_connection(), config.provider.clone());

    let output = match request {
        // Answered before connecting
        PrivacyRequest::Metadata => Value::Null,
        PrivacyRequest::Contexts { userid } => {
            let contexts = provider.find_contexts_for_user(userid).await?;
            serde_json::to_value(&contexts)?
        }
        PrivacyRequest::Export { userid, out, stdout } => {
            let system = Context::new(1, ContextLevel::System, 0);
            if stdout {
                let mut writer = MemoryWriter::new();
                provider
                    .export_user_data(userid, &system, &[], &Value::Null, &mut writer)
                    .await?;
                serde_json::to_value(&writer)?
            } else {
                let default_dir = config.export_dir.join(format!("user_{}", userid));
                let mut writer = DirectoryWriter::new(out.unwrap_or(default_dir));
                provider
                    .export_user_data(userid, &system, &[], &Value::Null, &mut writer)
                    .await?;
                let root = writer.finalise()?;
                json!({ "export": root.display().to_string() })
            }
        }
        PrivacyRequest::DeleteContext { cmid } => {
            let context = repo.module_context(cmid).await?;
            provider.delete_for_context(Some(&context)).await?;
            Value::Null
        }
        PrivacyRequest::DeleteUser { userid } => {
            let system = Context::new(1, ContextLevel::System, 0);
            provider.delete_for_user(userid, &system).await?;
            Value::Null
        }
        PrivacyRequest::Users { cmid } => {
            let context = repo.module_context(cmid).await?;
            let mut userlist = UserList::new(context, PLUGIN_COMPONENT);
            provider.list_users_in_context(&mut userlist).await?;
            serde_json::to_value(&userlist)?
        }
        PrivacyRequest::DeleteUsers { cmid, userids } => {
            let context = repo.module_context(cmid).await?;
            let approved = ApprovedUserList::new(context, PLUGIN_COMPONENT, userids);
            provider.delete_for_approved_users(&approved).await?;
            Value::Null
        }
    };

    Ok(output)
}

/// Run one privacy request and print its result as JSON.
pub async fn run_request(config: &PrivacyServiceConfig, request: PrivacyRequest) -> AppResult<()> {
    let output = execute_request(config, request).await?;
    if !output.is_null() {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}
