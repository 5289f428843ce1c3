//! Personal data declarations.

use serde::Serialize;

/// One personal data field and what it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataField {
    pub name: String,
    pub description: String,
}

/// A declared location of personal data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MetadataItem {
    /// Table in the local store
    DatabaseTable {
        name: String,
        fields: Vec<MetadataField>,
        summary: String,
    },
    /// Data sent to a system outside the local store
    ExternalLocation {
        name: String,
        fields: Vec<MetadataField>,
        summary: String,
    },
}

impl MetadataItem {
    pub fn name(&self) -> &str {
        match self {
            MetadataItem::DatabaseTable { name, .. }
            | MetadataItem::ExternalLocation { name, .. } => name,
        }
    }

    pub fn fields(&self) -> &[MetadataField] {
        match self {
            MetadataItem::DatabaseTable { fields, .. }
            | MetadataItem::ExternalLocation { fields, .. } => fields,
        }
    }
}

/// Append-only collection of personal data declarations for one component
#[derive(Debug, Clone, Serialize)]
pub struct MetadataCollection {
    component: String,
    items: Vec<MetadataItem>,
}

impl MetadataCollection {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            items: Vec::new(),
        }
    }

    /// Declare a local table and its personal data fields
    pub fn add_database_table(&mut self, name: &str, fields: &[(&str, &str)], summary: &str) {
        self.items.push(MetadataItem::DatabaseTable {
            name: name.to_string(),
            fields: to_fields(fields),
            summary: summary.to_string(),
        });
    }

    /// Declare data exported to an external system
    pub fn link_external_location(&mut self, name: &str, fields: &[(&str, &str)], summary: &str) {
        self.items.push(MetadataItem::ExternalLocation {
            name: name.to_string(),
            fields: to_fields(fields),
            summary: summary.to_string(),
        });
    }

    pub fn items(&self) -> &[MetadataItem] {
        &self.items
    }

    pub fn database_tables(&self) -> impl Iterator<Item = &MetadataItem> {
        self.items
            .iter()
            .filter(|item| matches!(item, MetadataItem::DatabaseTable { .. }))
    }

    pub fn external_locations(&self) -> impl Iterator<Item = &MetadataItem> {
        self.items
            .iter()
            .filter(|item| matches!(item, MetadataItem::ExternalLocation { .. }))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn to_fields(fields: &[(&str, &str)]) -> Vec<MetadataField> {
    fields
        .iter()
        .map(|(name, description)| MetadataField {
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect()
}
