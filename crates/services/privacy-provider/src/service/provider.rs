//! Privacy provider - answers the host privacy subsystem's requests for the
//! plagiarism plugin.
//!
//! Every operation is a handful of store statements. Store errors are
//! propagated unchanged; absent or out-of-scope inputs are no-ops.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use common::AppResult;
use domain::{
    ApprovedUserList, Context, ContextList, MetadataCollection, UserList, REMOTE_CLIENT_LOCATION,
    SUBMISSION_TABLE, USER_CONSENT_TABLE,
};

use crate::config::ProviderSettings;
use crate::export::{ContextHelper, ExportWriter};
use crate::repository::PrivacyRepository;

/// Privacy provider trait for dependency injection.
#[async_trait]
pub trait PrivacyProvider: Send + Sync {
    /// Declare the personal data the plugin stores and sends elsewhere
    fn declare_metadata(&self, collection: &mut MetadataCollection);

    /// Contexts holding data for the user
    async fn find_contexts_for_user(&self, userid: i64) -> AppResult<ContextList>;

    /// Export all of the user's submissions.
    ///
    /// Each submission is written under its own module context; `context`,
    /// `subcontext` and `link_metadata` do not affect placement.
    async fn export_user_data(
        &self,
        userid: i64,
        context: &Context,
        subcontext: &[String],
        link_metadata: &Value,
        writer: &mut dyn ExportWriter,
    ) -> AppResult<()>;

    /// Delete all submissions in a module context
    async fn delete_for_context(&self, context: Option<&Context>) -> AppResult<()>;

    /// Delete all of the user's submissions and EULA records, in every context
    async fn delete_for_user(&self, userid: i64, context: &Context) -> AppResult<()>;

    /// Add the users holding data in the list's context
    async fn list_users_in_context(&self, userlist: &mut UserList) -> AppResult<()>;

    /// Delete the approved users' submissions in the list's context
    async fn delete_for_approved_users(&self, userlist: &ApprovedUserList) -> AppResult<()>;
}

/// Declare the plugin's local tables and the data sent to the remote service.
pub fn declare_metadata(collection: &mut MetadataCollection) {
    collection.add_database_table(
        SUBMISSION_TABLE,
        &[
            ("userid", "The ID of the user who made the submission."),
            ("turnitinid", "The ID of the submission on the plagiarism service."),
            ("identifier", "A hash identifying the submitted file or text."),
            ("itemid", "The ID of the submitted item within the activity."),
            ("submittedtime", "The time the submission was sent for checking."),
            ("overallscore", "The overall similarity score of the submission."),
        ],
        "Information about submissions sent to the plagiarism service.",
    );

    collection.add_database_table(
        USER_CONSENT_TABLE,
        &[
            ("userid", "The ID of the user."),
            ("turnitinid", "The ID of the user's account on the plagiarism service."),
            ("lasteulaaccepted", "The last EULA version the user accepted."),
            ("lasteulaacceptedtime", "The time the user last accepted the EULA."),
            ("lasteulaacceptedlang", "The language of the EULA the user last accepted."),
        ],
        "EULA acceptance recorded for each user.",
    );

    collection.link_external_location(
        REMOTE_CLIENT_LOCATION,
        &[
            ("firstname", "The user's first name is sent to identify the submitter."),
            ("lastname", "The user's last name is sent to identify the submitter."),
            ("submission_title", "The title of the submission."),
            ("submission_filename", "The file name of the submission."),
            ("submission_content", "The content of the submission."),
        ],
        "Submission data is sent to the plagiarism service for similarity checking.",
    );
}

/// Privacy provider for the plagiarism plugin's tables.
pub struct PlagiarismPrivacyProvider {
    repo: Arc<dyn PrivacyRepository>,
    helper: Arc<dyn ContextHelper>,
    settings: ProviderSettings,
}

impl PlagiarismPrivacyProvider {
    pub fn new(
        repo: Arc<dyn PrivacyRepository>,
        helper: Arc<dyn ContextHelper>,
        settings: ProviderSettings,
    ) -> Self {
        Self {
            repo,
            helper,
            settings,
        }
    }
}

#[async_trait]
impl PrivacyProvider for PlagiarismPrivacyProvider {
    fn declare_metadata(&self, collection: &mut MetadataCollection) {
        declare_metadata(collection);
    }

    async fn find_contexts_for_user(&self, userid: i64) -> AppResult<ContextList> {
        let contexts = self
            .repo
            .module_contexts_for_user(userid, &self.settings.activity_module)
            .await?;

        let mut contextlist = ContextList::new();
        contextlist.add_contexts(contexts);

        let ids = contextlist.context_ids();
        debug!(userid, contexts = ?ids, "Found contexts for user");
        Ok(contextlist)
    }

    async fn export_user_data(
        &self,
        userid: i64,
        _context: &Context,
        _subcontext: &[String],
        _link_metadata: &Value,
        writer: &mut dyn ExportWriter,
    ) -> AppResult<()> {
        if userid <= 0 {
            return Ok(());
        }

        let Some(user) = self.repo.find_user(userid).await? else {
            debug!(userid, "No user record, nothing to export");
            return Ok(());
        };
        let submissions = self.repo.submissions_for_user(user.id).await?;

        for submission in &submissions {
            let context = self.repo.module_context(submission.cm).await?;

            let mut data = self.helper.context_data(&context, &user).await?;
            data.extend(submission.export_fields());
            writer.export_data(&context, &[], Value::Object(data))?;

            self.helper
                .export_context_files(&context, &user, writer)
                .await?;
        }

        let count = submissions.len();
        info!(userid, count, "Exported plagiarism data for user");
        Ok(())
    }

    async fn delete_for_context(&self, context: Option<&Context>) -> AppResult<()> {
        let Some(cmid) = context.and_then(Context::course_module_id) else {
            return Ok(());
        };

        let deleted = self.repo.delete_submissions_for_course_module(cmid).await?;

        info!(cmid, deleted, "Deleted submissions for context");
        Ok(())
    }

    async fn delete_for_user(&self, userid: i64, _context: &Context) -> AppResult<()> {
        let submissions = self.repo.delete_submissions_for_user(userid).await?;
        let consents = self.repo.delete_consents_for_user(userid).await?;

        info!(userid, submissions, consents, "Deleted user data");
        Ok(())
    }

    async fn list_users_in_context(&self, userlist: &mut UserList) -> AppResult<()> {
        let Some(cmid) = userlist.context().course_module_id() else {
            return Ok(());
        };

        let userids = self
            .repo
            .user_ids_in_course_module(cmid, &self.settings.plugin_module)
            .await?;
        userlist.add_users(userids);

        let component = userlist.component();
        debug!(cmid, component, count = userlist.len(), "Listed users");
        Ok(())
    }

    async fn delete_for_approved_users(&self, userlist: &ApprovedUserList) -> AppResult<()> {
        let Some(cmid) = userlist.context().course_module_id() else {
            return Ok(());
        };

        // Deletes cannot join, so collect the row ids first.
        let ids = self
            .repo
            .submission_ids_in_course_module(
                cmid,
                &self.settings.plugin_module,
                userlist.userids().to_vec(),
            )
            .await?;
        let deleted = self.repo.delete_submissions_by_ids(ids).await?;

        let component = userlist.component();
        info!(cmid, component, deleted, "Deleted approved users' data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{ActivityContextHelper, MemoryWriter};
    use crate::repository::MockPrivacyRepository;
    use common::AppError;
    use domain::{ContextLevel, PrivacyUser, Submission};
    use mockall::predicate::eq;
    use serde_json::json;

    const PLUGIN: &str = "plagiarism_turnitinsim";

    fn provider(repo: MockPrivacyRepository) -> PlagiarismPrivacyProvider {
        let repo: Arc<dyn PrivacyRepository> = Arc::new(repo);
        let helper = Arc::new(ActivityContextHelper::new(repo.clone(), "assign"));
        PlagiarismPrivacyProvider::new(repo, helper, ProviderSettings::default())
    }

    fn submission(id: i64, cm: i64, userid: i64) -> Submission {
        Submission {
            id,
            cm,
            userid,
            turnitinid: Some(format!("remote-{}", id)),
            identifier: None,
            itemid: Some(id),
            submittedtime: None,
            overallscore: Some(25),
        }
    }

    #[test]
    fn test_declare_metadata_shape() {
        let provider = provider(MockPrivacyRepository::new());
        let mut collection = MetadataCollection::new(PLUGIN);

        provider.declare_metadata(&mut collection);

        assert_eq!(collection.database_tables().count(), 2);
        assert_eq!(collection.external_locations().count(), 1);
        let names: Vec<_> = collection.items().iter().map(|i| i.name()).collect();
        assert_eq!(
            names,
            vec![
                "plagiarism_turnitinsim_sub",
                "plagiarism_turnitinsim_users",
                "plagiarism_turnitinsim_client"
            ]
        );
    }

    #[tokio::test]
    async fn test_find_contexts_uses_activity_module() {
        let duplicated = vec![Context::module(20, 5), Context::module(20, 5)];
        let mut repo = MockPrivacyRepository::new();
        repo.expect_module_contexts_for_user()
            .withf(|id, module| *id == 7 && module.to_string() == "assign")
            .returning(move |_, _| Ok(duplicated.clone()));

        let contexts = provider(repo).find_contexts_for_user(7).await.unwrap();

        assert_eq!(contexts.context_ids(), vec![20]);
    }

    #[tokio::test]
    async fn test_export_skips_absent_user() {
        let repo = MockPrivacyRepository::new();
        let context = Context::module(1, 1);
        let mut writer = MemoryWriter::new();

        let result = provider(repo)
            .export_user_data(0, &context, &[], &Value::Null, &mut writer)
            .await;

        assert!(result.is_ok());
        assert!(writer.records().is_empty());
    }

    #[tokio::test]
    async fn test_export_missing_user_record() {
        let mut repo = MockPrivacyRepository::new();
        repo.expect_find_user().with(eq(7)).returning(|_| Ok(None));
        repo.expect_submissions_for_user().never();
        let context = Context::module(1, 1);
        let mut writer = MemoryWriter::new();

        let result = provider(repo)
            .export_user_data(7, &context, &[], &Value::Null, &mut writer)
            .await;

        assert!(result.is_ok());
        assert!(writer.records().is_empty());
        assert!(writer.files().is_empty());
    }

    #[tokio::test]
    async fn test_export_merges_submission_over_context_data() {
        let mut repo = MockPrivacyRepository::new();
        repo.expect_find_user().returning(|id| {
            Ok(Some(PrivacyUser {
                id,
                username: "u7".to_string(),
                firstname: "Sam".to_string(),
                lastname: "Student".to_string(),
            }))
        });
        repo.expect_submissions_for_user()
            .with(eq(7))
            .returning(|_| Ok(vec![submission(1, 5, 7)]));
        repo.expect_module_context()
            .with(eq(5))
            .returning(|cm| Ok(Context::module(50, cm)));
        repo.expect_activity_for_course_module()
            .returning(|_, _| Ok(None));
        let mut writer = MemoryWriter::new();

        provider(repo)
            .export_user_data(7, &Context::module(99, 99), &[], &json!({}), &mut writer)
            .await
            .unwrap();

        assert_eq!(writer.records().len(), 1);
        let record = &writer.records()[0];
        assert_eq!(record.context.id, 50);
        assert_eq!(record.data["turnitinid"], json!("remote-1"));
        assert_eq!(record.data["overallscore"], json!(25));
    }

    #[tokio::test]
    async fn test_delete_for_context_ignores_non_module() {
        let repo = MockPrivacyRepository::new();
        let provider = provider(repo);

        provider.delete_for_context(None).await.unwrap();
        provider
            .delete_for_context(Some(&Context::new(3, ContextLevel::Course, 5)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_for_context_uses_instance_id() {
        let mut repo = MockPrivacyRepository::new();
        repo.expect_delete_submissions_for_course_module()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(2));

        provider(repo)
            .delete_for_context(Some(&Context::module(20, 5)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_for_user_removes_submissions_and_consent() {
        let mut repo = MockPrivacyRepository::new();
        repo.expect_delete_submissions_for_user()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(3));
        repo.expect_delete_consents_for_user()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(1));

        provider(repo)
            .delete_for_user(7, &Context::new(1, ContextLevel::System, 0))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_for_user_propagates_store_error() {
        let mut repo = MockPrivacyRepository::new();
        repo.expect_delete_submissions_for_user()
            .returning(|_| Err(AppError::internal("connection lost")));

        let result = provider(repo)
            .delete_for_user(7, &Context::module(20, 5))
            .await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_list_users_uses_plugin_module() {
        let mut repo = MockPrivacyRepository::new();
        repo.expect_user_ids_in_course_module()
            .withf(|cmid, module| *cmid == 5 && module.to_string() == PLUGIN)
            .returning(|_, _| Ok(vec![7, 8]));
        let mut userlist = UserList::new(Context::module(20, 5), PLUGIN);

        provider(repo)
            .list_users_in_context(&mut userlist)
            .await
            .unwrap();

        assert_eq!(userlist.userids(), &[7, 8]);
    }

    #[tokio::test]
    async fn test_delete_for_approved_users_deletes_selected_ids() {
        let mut repo = MockPrivacyRepository::new();
        repo.expect_submission_ids_in_course_module()
            .withf(|cmid, _, userids| *cmid == 5 && userids == &vec![7])
            .returning(|_, _, _| Ok(vec![11, 12]));
        repo.expect_delete_submissions_by_ids()
            .with(eq(vec![11, 12]))
            .times(1)
            .returning(|ids| Ok(ids.len() as u64));
        let approved = ApprovedUserList::new(Context::module(20, 5), PLUGIN, vec![7]);

        provider(repo)
            .delete_for_approved_users(&approved)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_for_approved_users_ignores_non_module() {
        let repo = MockPrivacyRepository::new();
        let course = Context::new(3, ContextLevel::Course, 5);
        let approved = ApprovedUserList::new(course, PLUGIN, vec![7]);

        provider(repo)
            .delete_for_approved_users(&approved)
            .await
            .unwrap();
    }
}
