//! Dataset document model: wire shape, row mapping and validation rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use uuid::Uuid;

use super::user::OwnerRef;

/// Upper bound accepted for `size`.
pub const MAX_SIZE: f64 = 1_000_000.0;

/// A persisted dataset with its owner resolved to a display-name projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    pub created: DateTime<Utc>,
    #[serde(rename = "user", alias = "owner")]
    pub owner: OwnerRef,
}

/// Row shape produced by the dataset queries (datasets joined with users).
#[derive(Debug, FromRow)]
pub struct DatasetRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub size: Option<f64>,
    pub created: DateTime<Utc>,
    pub user_id: Uuid,
    pub user_display_name: Option<String>,
}

impl From<DatasetRow> for Dataset {
    fn from(row: DatasetRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            size: row.size,
            created: row.created,
            owner: OwnerRef {
                id: row.user_id,
                display_name: row.user_display_name,
            },
        }
    }
}

/// Create payload. Any owner or timestamp sent by the caller is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

/// Update payload restricted to the mutable fields.
///
/// `size` distinguishes "absent" (keep) from `null` (clear).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub size: Option<Option<f64>>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

/// Normalized field values that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDataset {
    pub name: String,
    pub description: String,
    pub size: Option<f64>,
}

/// Field-level validation failures, kept in schema field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<(&'static str, String)>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message of the first violated field.
    pub fn message(&self) -> &str {
        self.errors
            .first()
            .map(|(_, message)| message.as_str())
            .unwrap_or("Validation failed")
    }

    pub fn field_errors(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|(field, message)| (field.to_string(), message.clone()))
            .collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationErrors {}

/// Trim and validate candidate values against the dataset schema.
pub fn validate(
    name: Option<&str>,
    description: Option<&str>,
    size: Option<f64>,
) -> Result<ValidDataset, ValidationErrors> {
    let name = name.map(str::trim).unwrap_or_default();
    let description = description.map(str::trim).unwrap_or_default();
    let mut errors = ValidationErrors::default();

    if name.is_empty() {
        errors.push("name", "Please fill Dataset name");
    }
    if description.is_empty() {
        errors.push("description", "Please fill Dataset description");
    }
    if let Some(value) = size {
        if !value.is_finite() || value > MAX_SIZE {
            errors.push(
                "size",
                format!(
                    "The value of `size` ({}) exceeds the limit ({}).",
                    value, MAX_SIZE
                ),
            );
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidDataset {
        name: name.to_string(),
        description: description.to_string(),
        size,
    })
}

impl DatasetInput {
    pub fn validate(&self) -> Result<ValidDataset, ValidationErrors> {
        validate(self.name.as_deref(), self.description.as_deref(), self.size)
    }
}

impl Dataset {
    /// Shallow-merge the allow-listed fields of `patch` and validate the result.
    pub fn merge(&self, patch: &DatasetPatch) -> Result<ValidDataset, ValidationErrors> {
        let name = patch.name.as_deref().unwrap_or(&self.name);
        let description = patch.description.as_deref().unwrap_or(&self.description);
        let size = match patch.size {
            Some(size) => size,
            None => self.size,
        };
        validate(Some(name), Some(description), size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Dataset {
        Dataset {
            id: Uuid::new_v4(),
            name: "Dataset Name".to_string(),
            description: "Dataset description".to_string(),
            size: Some(10.0),
            created: Utc::now(),
            owner: OwnerRef {
                id: Uuid::new_v4(),
                display_name: Some("Full Name".to_string()),
            },
        }
    }

    #[test]
    fn trims_name_and_description() {
        let valid = validate(Some("  Dataset Name  "), Some("\tdesc\n"), None).unwrap();
        assert_eq!(valid.name, "Dataset Name");
        assert_eq!(valid.description, "desc");
    }

    #[test]
    fn rejects_missing_and_blank_name() {
        let err = validate(None, Some("desc"), None).unwrap_err();
        assert_eq!(err.message(), "Please fill Dataset name");

        let err = validate(Some("   "), Some("desc"), None).unwrap_err();
        assert_eq!(err.message(), "Please fill Dataset name");
    }

    #[test]
    fn reports_every_violated_field() {
        let err = validate(Some(""), Some(""), Some(1_000_001.0)).unwrap_err();
        let fields = err.field_errors();
        assert_eq!(err.message(), "Please fill Dataset name");
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["description"], "Please fill Dataset description");
        assert!(fields["size"].contains("exceeds the limit (1000000)"));
    }

    #[test]
    fn size_upper_bound_is_inclusive() {
        assert!(validate(Some("n"), Some("d"), Some(MAX_SIZE)).is_ok());
        assert!(validate(Some("n"), Some("d"), Some(MAX_SIZE + 1.0)).is_err());
    }

    #[test]
    fn merge_preserves_absent_fields() {
        let existing = sample();
        let patch: DatasetPatch = serde_json::from_value(json!({ "name": "New Name" })).unwrap();
        let merged = existing.merge(&patch).unwrap();
        assert_eq!(merged.name, "New Name");
        assert_eq!(merged.description, existing.description);
        assert_eq!(merged.size, Some(10.0));
    }

    #[test]
    fn merge_clears_size_on_explicit_null() {
        let patch: DatasetPatch = serde_json::from_value(json!({ "size": null })).unwrap();
        assert_eq!(patch.size, Some(None));
        assert_eq!(sample().merge(&patch).unwrap().size, None);
    }

    #[test]
    fn patch_ignores_owner_and_created() {
        let patch: DatasetPatch = serde_json::from_value(json!({
            "user": { "_id": Uuid::new_v4() },
            "created": "2001-01-01T00:00:00Z",
        }))
        .unwrap();
        let existing = sample();
        let merged = existing.merge(&patch).unwrap();
        assert_eq!(merged.name, existing.name);
    }

    #[test]
    fn serializes_with_mean_field_names() {
        let mut dataset = sample();
        dataset.size = None;
        let value = serde_json::to_value(&dataset).unwrap();
        assert!(value.get("_id").is_some());
        assert!(value.get("size").is_none());
        assert_eq!(value["user"]["displayName"], "Full Name");
    }
}
