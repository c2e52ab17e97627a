use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::services::palette_service::{NewPalette, PaletteChanges};
use crate::web::error::AppError;

pub const PROJECT_FORMAT_ERROR: &str = "Expected format { name: <string> }, missing name!";

const PALETTE_FORMAT: &str = "Expected { project_id: <int>, palette_name: <string>, color_1: <string>, color_2: <string> color_3: <string>, color_4: <string>, color_5: <string> } \n        Missing";

pub const EMPTY_PALETTE_UPDATE_ERROR: &str = "Expected at least one of { palette_name, project_id, color_1, color_2, color_3, color_4, color_5 }";

/// Plain `{ "message": ... }` acknowledgement body.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// Payload fields stay untyped until presence has been checked, so a value of
// the wrong type never masks a missing key. A JSON `null` decodes to `None`.

/// Body of `POST /api/v1/projects` and `PATCH /api/v1/projects/{name}`.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectPayload {
    pub name: Option<Value>,
}

impl ProjectPayload {
    pub fn into_name(self) -> Result<String, AppError> {
        let name = self
            .name
            .ok_or_else(|| AppError::Validation(PROJECT_FORMAT_ERROR.to_string()))?;
        as_text(name, "name")
    }
}

/// Body of `POST /api/v1/palettes` and `PATCH /api/v1/palettes/{palette_name}`.
/// Every field is optional at this level; which ones are required depends on
/// the operation.
#[derive(Debug, Default, Deserialize)]
pub struct PalettePayload {
    pub palette_name: Option<Value>,
    pub project_id: Option<Value>,
    pub color_1: Option<Value>,
    pub color_2: Option<Value>,
    pub color_3: Option<Value>,
    pub color_4: Option<Value>,
    pub color_5: Option<Value>,
}

fn required(value: Option<Value>, field: &str) -> Result<Value, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{PALETTE_FORMAT} {field}!")))
}

fn as_text(value: Value, field: &str) -> Result<String, AppError> {
    match value {
        Value::String(text) => Ok(text),
        other => Err(AppError::Validation(format!(
            "Expected {field} to be a string, got {other}"
        ))),
    }
}

/// Accepts a JSON integer or a string holding one, e.g. `1` or `"1"`.
fn as_project_id(value: Value) -> Result<i32, AppError> {
    let parsed = match &value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        AppError::Validation(format!(
            "Expected project_id to be an integer, got {value}"
        ))
    })
}

fn optional_text(value: Option<Value>, field: &str) -> Result<Option<String>, AppError> {
    value.map(|v| as_text(v, field)).transpose()
}

impl PalettePayload {
    /// Presence is checked for every field, in declaration order, before any
    /// value is converted; the first absent one names the error.
    pub fn into_new_palette(self) -> Result<NewPalette, AppError> {
        let palette_name = required(self.palette_name, "palette_name")?;
        let project_id = required(self.project_id, "project_id")?;
        let color_1 = required(self.color_1, "color_1")?;
        let color_2 = required(self.color_2, "color_2")?;
        let color_3 = required(self.color_3, "color_3")?;
        let color_4 = required(self.color_4, "color_4")?;
        let color_5 = required(self.color_5, "color_5")?;

        Ok(NewPalette {
            palette_name: as_text(palette_name, "palette_name")?,
            project_id: as_project_id(project_id)?,
            color_1: as_text(color_1, "color_1")?,
            color_2: as_text(color_2, "color_2")?,
            color_3: as_text(color_3, "color_3")?,
            color_4: as_text(color_4, "color_4")?,
            color_5: as_text(color_5, "color_5")?,
        })
    }

    pub fn into_changes(self) -> Result<PaletteChanges, AppError> {
        let changes = PaletteChanges {
            palette_name: optional_text(self.palette_name, "palette_name")?,
            project_id: self.project_id.map(as_project_id).transpose()?,
            color_1: optional_text(self.color_1, "color_1")?,
            color_2: optional_text(self.color_2, "color_2")?,
            color_3: optional_text(self.color_3, "color_3")?,
            color_4: optional_text(self.color_4, "color_4")?,
            color_5: optional_text(self.color_5, "color_5")?,
        };
        if changes.is_empty() {
            return Err(AppError::Validation(EMPTY_PALETTE_UPDATE_ERROR.to_string()));
        }
        Ok(changes)
    }
}
