//! Generic per-context export data.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use common::AppResult;
use domain::{Activity, Context, PrivacyUser, EXPORT_INTRO_FILE};

use super::writer::ExportWriter;
use crate::repository::PrivacyRepository;

/// Boilerplate data and files describing a context, independent of any plugin.
#[async_trait]
pub trait ContextHelper: Send + Sync {
    /// Descriptive record for a context; plugin fields are merged over it
    async fn context_data(
        &self,
        context: &Context,
        user: &PrivacyUser,
    ) -> AppResult<Map<String, Value>>;

    /// Export the files that belong to a context itself
    async fn export_context_files(
        &self,
        context: &Context,
        user: &PrivacyUser,
        writer: &mut dyn ExportWriter,
    ) -> AppResult<()>;
}

/// Context helper that describes the activity behind a module context.
pub struct ActivityContextHelper {
    repo: Arc<dyn PrivacyRepository>,
    module_name: String,
}

impl ActivityContextHelper {
    pub fn new(repo: Arc<dyn PrivacyRepository>, module_name: impl Into<String>) -> Self {
        Self {
            repo,
            module_name: module_name.into(),
        }
    }

    async fn activity(&self, context: &Context) -> AppResult<Option<Activity>> {
        let Some(cmid) = context.course_module_id() else {
            return Ok(None);
        };
        let module = self.module_name.as_str();
        self.repo.activity_for_course_module(cmid, module).await
    }
}

#[async_trait]
impl ContextHelper for ActivityContextHelper {
    async fn context_data(
        &self,
        context: &Context,
        _user: &PrivacyUser,
    ) -> AppResult<Map<String, Value>> {
        let mut data = Map::new();
        if let Some(activity) = self.activity(context).await? {
            data.insert("name".into(), Value::from(activity.name));
            data.insert("intro".into(), Value::from(activity.intro));
        }
        Ok(data)
    }

    async fn export_context_files(
        &self,
        context: &Context,
        _user: &PrivacyUser,
        writer: &mut dyn ExportWriter,
    ) -> AppResult<()> {
        let Some(activity) = self.activity(context).await? else {
            return Ok(());
        };
        if activity.intro.trim().is_empty() {
            return Ok(());
        }
        let intro = activity.intro.as_str();
        writer.export_file(context, &[], EXPORT_INTRO_FILE, intro)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::MemoryWriter;
    use crate::repository::MockPrivacyRepository;
    use domain::ContextLevel;

    fn user() -> PrivacyUser {
        PrivacyUser {
            id: 7,
            username: "student7".to_string(),
            firstname: "Sam".to_string(),
            lastname: "Student".to_string(),
        }
    }

    fn helper_with_intro(intro: &'static str) -> ActivityContextHelper {
        let mut repo = MockPrivacyRepository::new();
        repo.expect_activity_for_course_module()
            .withf(|cmid, module| *cmid == 5 && module.to_string() == "assign")
            .returning(move |_, _| {
                Ok(Some(Activity {
                    id: 3,
                    name: "Essay".to_string(),
                    intro: intro.to_string(),
                }))
            });
        ActivityContextHelper::new(Arc::new(repo), "assign")
    }

    #[test]
    fn test_context_data_describes_activity() {
        let helper = helper_with_intro("<p>Write</p>");
        let (context, user) = (Context::module(20, 5), user());

        let future = helper.context_data(&context, &user);
        let data = tokio_test::block_on(future).unwrap();

        assert_eq!(data["name"], Value::from("Essay"));
        assert_eq!(data["intro"], Value::from("<p>Write</p>"));
    }

    #[test]
    fn test_context_data_empty_outside_modules() {
        let repo = MockPrivacyRepository::new();
        let helper = ActivityContextHelper::new(Arc::new(repo), "assign");
        let (course, user) = (Context::new(2, ContextLevel::Course, 4), user());

        let future = helper.context_data(&course, &user);
        let data = tokio_test::block_on(future).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_intro_exported_as_file() {
        let helper = helper_with_intro("<p>Write</p>");
        let (context, user) = (Context::module(20, 5), user());
        let mut writer = MemoryWriter::new();

        let export = helper.export_context_files(&context, &user, &mut writer);
        tokio_test::block_on(export).unwrap();

        assert_eq!(writer.files().len(), 1);
        assert_eq!(writer.files()[0].filename, "intro.html");
    }

    #[test]
    fn test_blank_intro_not_exported() {
        let helper = helper_with_intro("  ");
        let (context, user) = (Context::module(20, 5), user());
        let mut writer = MemoryWriter::new();

        let export = helper.export_context_files(&context, &user, &mut writer);
        tokio_test::block_on(export).unwrap();

        assert!(writer.files().is_empty());
    }
}
