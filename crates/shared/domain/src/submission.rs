//! Records stored by the plagiarism plugin and the host records it reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One plagiarism-check submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    /// Course-module the submission belongs to
    pub cm: i64,
    pub userid: i64,
    /// Submission id on the remote service
    pub turnitinid: Option<String>,
    /// Content identifier (file hash or text hash)
    pub identifier: Option<String>,
    pub itemid: Option<i64>,
    /// Unix seconds
    pub submittedtime: Option<i64>,
    /// Overall similarity score as a percentage
    pub overallscore: Option<i32>,
}

impl Submission {
    /// Fields written into a privacy export.
    ///
    /// The internal row id is not part of the export.
    pub fn export_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("cm".into(), Value::from(self.cm));
        fields.insert("userid".into(), Value::from(self.userid));
        fields.insert("turnitinid".into(), Value::from(self.turnitinid.clone()));
        fields.insert("identifier".into(), Value::from(self.identifier.clone()));
        fields.insert("itemid".into(), Value::from(self.itemid));
        fields.insert("submittedtime".into(), Value::from(self.submittedtime));
        fields.insert("overallscore".into(), Value::from(self.overallscore));

        if let Some(formatted) = self.submittedtime.and_then(format_timestamp) {
            fields.insert("submittedtime_formatted".into(), Value::from(formatted));
        }

        fields
    }
}

/// Host user record as needed for exports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyUser {
    pub id: i64,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
}

/// Activity instance behind a course module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub intro: String,
}

/// Render unix seconds as RFC 3339 in UTC.
pub fn format_timestamp(seconds: i64) -> Option<String> {
    let dt = DateTime::<Utc>::from_timestamp(seconds, 0)?;
    Some(dt.to_rfc3339())
}
