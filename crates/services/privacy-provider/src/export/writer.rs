//! Export package writers.
//!
//! A writer receives structured records and related files, each placed
//! under a context and a subcontext path.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use common::{AppError, AppResult};
use domain::{Context, EXPORT_DATA_FILE};

/// Sink for exported personal data.
pub trait ExportWriter: Send {
    /// Write one structured record for a context
    fn export_data(
        &mut self,
        context: &Context,
        subcontext: &[String],
        data: Value,
    ) -> AppResult<()>;

    /// Write a related file for a context
    fn export_file(
        &mut self,
        context: &Context,
        subcontext: &[String],
        filename: &str,
        contents: &str,
    ) -> AppResult<()>;
}

/// Record captured by [`MemoryWriter`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedRecord {
    pub context: Context,
    pub subcontext: Vec<String>,
    pub data: Value,
}

/// File captured by [`MemoryWriter`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedFile {
    pub context: Context,
    pub subcontext: Vec<String>,
    pub filename: String,
    pub contents: String,
}

/// Writer that keeps everything in memory, in write order.
#[derive(Debug, Default, Serialize)]
pub struct MemoryWriter {
    records: Vec<ExportedRecord>,
    files: Vec<ExportedFile>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ExportedRecord] {
        &self.records
    }

    pub fn files(&self) -> &[ExportedFile] {
        &self.files
    }

    /// Records written under the given context id
    pub fn records_for(&self, context_id: i64) -> Vec<&ExportedRecord> {
        self.records
            .iter()
            .filter(|r| r.context.id == context_id)
            .collect()
    }
}

impl ExportWriter for MemoryWriter {
    fn export_data(
        &mut self,
        context: &Context,
        subcontext: &[String],
        data: Value,
    ) -> AppResult<()> {
        self.records.push(ExportedRecord {
            context: context.clone(),
            subcontext: subcontext.to_vec(),
            data,
        });
        Ok(())
    }

    fn export_file(
        &mut self,
        context: &Context,
        subcontext: &[String],
        filename: &str,
        contents: &str,
    ) -> AppResult<()> {
        self.files.push(ExportedFile {
            context: context.clone(),
            subcontext: subcontext.to_vec(),
            filename: filename.to_string(),
            contents: contents.to_string(),
        });
        Ok(())
    }
}

/// Writer laying the export out as a directory tree.
///
/// Layout: `<root>/<level>_<context id>/<subcontext...>/data.json`.
/// Several records written to one location are stored as a JSON array.
/// Nothing touches the disk until [`DirectoryWriter::finalise`].
#[derive(Debug)]
pub struct DirectoryWriter {
    root: PathBuf,
    data: BTreeMap<PathBuf, Vec<Value>>,
    files: BTreeMap<PathBuf, String>,
}

impl DirectoryWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            data: BTreeMap::new(),
            files: BTreeMap::new(),
        }
    }

    fn location(&self, context: &Context, subcontext: &[String]) -> AppResult<PathBuf> {
        let dir = format!("{}_{}", context.level, context.id);
        let mut path = self.root.join(dir);
        for part in subcontext {
            path.push(safe_component(part)?);
        }
        Ok(path)
    }

    /// Write everything to disk and return the export root.
    pub fn finalise(self) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.root)?;

        for (dir, mut records) in self.data {
            fs::create_dir_all(&dir)?;
            let body = if records.len() == 1 {
                records.remove(0)
            } else {
                Value::Array(records)
            };
            let json = serde_json::to_vec_pretty(&body)?;
            fs::write(dir.join(EXPORT_DATA_FILE), json)?;
        }

        for (path, contents) in self.files {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, contents)?;
        }

        tracing::debug!(root = %self.root.display(), "Export package written");
        Ok(self.root)
    }
}

impl ExportWriter for DirectoryWriter {
    fn export_data(
        &mut self,
        context: &Context,
        subcontext: &[String],
        data: Value,
    ) -> AppResult<()> {
        let dir = self.location(context, subcontext)?;
        self.data.entry(dir).or_default().push(data);
        Ok(())
    }

    fn export_file(
        &mut self,
        context: &Context,
        subcontext: &[String],
        filename: &str,
        contents: &str,
    ) -> AppResult<()> {
        let dir = self.location(context, subcontext)?;
        let path = dir.join(safe_component(filename)?);
        self.files.insert(path, contents.to_string());
        Ok(())
    }
}

fn safe_component(part: &str) -> AppResult<&str> {
    if part.is_empty() || part == "." || part == ".." || part.contains(['/', '\\']) {
        let msg = format!("Invalid export path component: {:?}", part);
        return Err(AppError::validation(msg));
    }
    Ok(part)
}
