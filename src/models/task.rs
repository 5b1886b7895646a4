use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::error::AppError;

const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Importance of a task.
///
/// Persisted as an integer in the `importance` column and exchanged on the wire
/// as one of `"notset"`, `"low"`, `"normal"` or `"high"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::Type)]
#[repr(i32)]
pub enum Priority {
    #[default]
    NotSet = 0,
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Priority {
    /// The wire name of this priority.
    pub fn as_wire(self) -> &'static str {
        match self {
            Priority::NotSet => "notset",
            Priority::Low => "low",
            Priority::Medium => "normal",
            Priority::High => "high",
        }
    }

    /// Parses a wire name, case-insensitively.
    ///
    /// `"medium"` is accepted as an alias of `"normal"` and the empty string means
    /// [`Priority::NotSet`]. Anything else is rejected.
    pub fn from_wire(value: &str) -> Result<Self, AppError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "notset" => Ok(Priority::NotSet),
            "low" => Ok(Priority::Low),
            "normal" | "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(AppError::Validation(format!(
                "invalid priority value: {}",
                value
            ))),
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Priority::from_wire(&raw).map_err(|e| match e {
            AppError::Validation(msg) => serde::de::Error::custom(msg),
            other => serde::de::Error::custom(other),
        })
    }
}

/// Payload for creating a task.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(custom = "validate_description")]
    #[serde(default)]
    pub description: String,

    /// Missing or `null` means [`Priority::NotSet`].
    #[serde(default)]
    pub priority: Option<Priority>,
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    let message = if description.is_empty() {
        "Description is required"
    } else if description.chars().count() > MAX_DESCRIPTION_CHARS {
        "Description must be at most 1000 characters"
    } else {
        return Ok(());
    };

    let mut error = ValidationError::new("description");
    error.message = Some(Cow::from(message));
    Err(error)
}

/// Values the task store needs to insert a row.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub user_id: i64,
    pub description: String,
    pub priority: Priority,
}

/// A task as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    #[sqlx(rename = "importance")]
    pub priority: Priority,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
