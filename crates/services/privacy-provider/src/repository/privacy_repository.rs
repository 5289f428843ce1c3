//! Store accessor for the privacy provider.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};

use super::entities::{assign, context, course_module, module, submission, user, user_consent};
use common::{AppResult, OptionExt};
use domain::{Activity, Context, PrivacyUser, Submission, CONTEXT_MODULE};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Store accessor trait for dependency injection.
///
/// Every delete returns the number of rows it removed. Filters over an
/// empty id set match nothing.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PrivacyRepository: Send + Sync {
    /// Find a host user record
    async fn find_user(&self, userid: i64) -> AppResult<Option<PrivacyUser>>;

    /// Module contexts of activities of `module_name` where the user has a submission
    async fn module_contexts_for_user(
        &self,
        userid: i64,
        module_name: &str,
    ) -> AppResult<Vec<Context>>;

    /// All submissions of a user, across every course module
    async fn submissions_for_user(&self, userid: i64) -> AppResult<Vec<Submission>>;

    /// Module-level context of a course module
    async fn module_context(&self, cmid: i64) -> AppResult<Context>;

    /// Activity instance behind a course module of type `module_name`
    async fn activity_for_course_module(
        &self,
        cmid: i64,
        module_name: &str,
    ) -> AppResult<Option<Activity>>;

    /// Delete every submission of a course module
    async fn delete_submissions_for_course_module(&self, cmid: i64) -> AppResult<u64>;

    /// Delete every submission of a user
    async fn delete_submissions_for_user(&self, userid: i64) -> AppResult<u64>;

    /// Delete every EULA acceptance record of a user
    async fn delete_consents_for_user(&self, userid: i64) -> AppResult<u64>;

    /// Distinct submitting users of a course module whose module is `module_name`
    async fn user_ids_in_course_module(&self, cmid: i64, module_name: &str) -> AppResult<Vec<i64>>;

    /// Submission ids in a course module whose module is `module_name`, limited to `userids`
    async fn submission_ids_in_course_module(
        &self,
        cmid: i64,
        module_name: &str,
        userids: Vec<i64>,
    ) -> AppResult<Vec<i64>>;

    /// Delete submissions by primary key
    async fn delete_submissions_by_ids(&self, ids: Vec<i64>) -> AppResult<u64>;
}

/// Concrete implementation of PrivacyRepository over SeaORM
pub struct PrivacyStore {
    db: DatabaseConnection,
}

impl PrivacyStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PrivacyRepository for PrivacyStore {
    async fn find_user(&self, userid: i64) -> AppResult<Option<PrivacyUser>> {
        let result = user::Entity::find_by_id(userid).one(&self.db).await?;
        Ok(result.map(PrivacyUser::from))
    }

    async fn module_contexts_for_user(
        &self,
        userid: i64,
        module_name: &str,
    ) -> AppResult<Vec<Context>> {
        let cmids: Vec<i64> = submission::Entity::find()
            .select_only()
            .column(course_module::Column::Id)
            .inner_join(course_module::Entity)
            .join(JoinType::InnerJoin, course_module::Relation::Module.def())
            .join(JoinType::InnerJoin, course_module::Relation::Assign.def())
            .filter(module::Column::Name.eq(module_name))
            .filter(submission::Column::Userid.eq(userid))
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await?;

        if cmids.is_empty() {
            return Ok(Vec::new());
        }

        let models = context::Entity::find()
            .filter(context::Column::Contextlevel.eq(CONTEXT_MODULE))
            .filter(context::Column::Instanceid.is_in(cmids))
            .order_by_asc(context::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(Context::try_from).collect()
    }

    async fn submissions_for_user(&self, userid: i64) -> AppResult<Vec<Submission>> {
        let models = submission::Entity::find()
            .filter(submission::Column::Userid.eq(userid))
            .order_by_asc(submission::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Submission::from).collect())
    }

    async fn module_context(&self, cmid: i64) -> AppResult<Context> {
        let model = context::Entity::find()
            .filter(context::Column::Contextlevel.eq(CONTEXT_MODULE))
            .filter(context::Column::Instanceid.eq(cmid))
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        Context::try_from(model)
    }

    async fn activity_for_course_module(
        &self,
        cmid: i64,
        module_name: &str,
    ) -> AppResult<Option<Activity>> {
        let result = assign::Entity::find()
            .join(JoinType::InnerJoin, assign::Relation::CourseModule.def())
            .join(JoinType::InnerJoin, course_module::Relation::Module.def())
            .filter(course_module::Column::Id.eq(cmid))
            .filter(module::Column::Name.eq(module_name))
            .one(&self.db)
            .await?;

        Ok(result.map(Activity::from))
    }

    async fn delete_submissions_for_course_module(&self, cmid: i64) -> AppResult<u64> {
        let result = submission::Entity::delete_many()
            .filter(submission::Column::Cm.eq(cmid))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete_submissions_for_user(&self, userid: i64) -> AppResult<u64> {
        let result = submission::Entity::delete_many()
            .filter(submission::Column::Userid.eq(userid))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete_consents_for_user(&self, userid: i64) -> AppResult<u64> {
        let result = user_consent::Entity::delete_many()
            .filter(user_consent::Column::Userid.eq(userid))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn user_ids_in_course_module(&self, cmid: i64, module_name: &str) -> AppResult<Vec<i64>> {
        let userids: Vec<i64> = submission::Entity::find()
            .select_only()
            .column(submission::Column::Userid)
            .inner_join(course_module::Entity)
            .join(JoinType::InnerJoin, course_module::Relation::Module.def())
            .filter(module::Column::Name.eq(module_name))
            .filter(course_module::Column::Id.eq(cmid))
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(userids)
    }

    async fn submission_ids_in_course_module(
        &self,
        cmid: i64,
        module_name: &str,
        userids: Vec<i64>,
    ) -> AppResult<Vec<i64>> {
        if userids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = submission::Entity::find()
            .select_only()
            .column(submission::Column::Id)
            .inner_join(course_module::Entity)
            .join(JoinType::InnerJoin, course_module::Relation::Module.def())
            .filter(module::Column::Name.eq(module_name))
            .filter(submission::Column::Userid.is_in(userids))
            .filter(course_module::Column::Id.eq(cmid))
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(ids)
    }

    async fn delete_submissions_by_ids(&self, ids: Vec<i64>) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = submission::Entity::delete_many()
            .filter(submission::Column::Id.is_in(ids))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
