use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;

use crate::errors::AppError;

// ───── Constants ──────────────────────────────────────────────────────

/// Canonical page size. Shared with the browser client, which assumes it
/// when a response carries no pagination metadata.
pub const DEFAULT_PAGE_SIZE: u32 = 6;

// Same unanchored shape check the browser form applies: something, an "@",
// something, a ".", something.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\S+@\S+\.\S+").expect("email regex must compile")
});

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, sqlx::FromRow)]
pub struct ProfileRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub location: Option<String>,
    pub skills: Json<Vec<String>>,
    pub experience_years: i32,
    pub available_for_work: bool,
    pub hourly_rate: f64,
}

/// A profile as it appears on the wire. `skills` is a first-class ordered
/// sequence here; the JSONB encoding is confined to the repository edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: i32,
    pub available_for_work: bool,
    pub hourly_rate: f64,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            name: row.name,
            email: row.email,
            location: row.location,
            skills: row.skills.0,
            experience_years: row.experience_years,
            available_for_work: row.available_for_work,
            hourly_rate: row.hourly_rate,
        }
    }
}

// ───── Request Models ────────────────────────────────────────────────

/// Raw create/update payload. Every field is optional at this stage so the
/// validation gate can report all problems in one pass instead of bouncing
/// on the first missing field. `skills` stays an untyped `Value` until the
/// gate has confirmed it is an array of strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Value>,
    pub experience_years: Option<i64>,
    pub available_for_work: Option<bool>,
    pub hourly_rate: Option<f64>,
}

impl ProfilePayload {
    /// The validation gate. Evaluates every rule independently and returns
    /// the messages in field order; an empty vec means the payload is
    /// acceptable. Pure: no store access, no side effects.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            errors.push("Name is required".to_string());
        }

        if self.email.as_deref().is_none_or(|e| !EMAIL_RE.is_match(e)) {
            errors.push("Valid email is required".to_string());
        }

        if !matches!(
            self.skills,
            Some(Value::Array(ref items)) if items.iter().all(Value::is_string)
        ) {
            errors.push("Skills must be an array".to_string());
        }

        if self.experience_years.is_some_and(|y| y < 0) {
            errors.push("Experience cannot be negative".to_string());
        } else if self.experience_years.is_some_and(|y| y > i64::from(i32::MAX)) {
            // the stored column is a 32-bit integer
            errors.push("Experience is out of range".to_string());
        }

        if self.hourly_rate.is_some_and(|r| r < 0.0) {
            errors.push("Hourly rate cannot be negative".to_string());
        }

        errors
    }
}

/// A payload that has passed the gate, with defaults applied. This is what
/// the repository persists.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileInsert {
    pub name: String,
    pub email: String,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: i32,
    pub available_for_work: bool,
    pub hourly_rate: f64,
}

impl TryFrom<ProfilePayload> for ProfileInsert {
    type Error = AppError;

    fn try_from(payload: ProfilePayload) -> Result<Self, Self::Error> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(AppError::ValidationError(errors));
        }

        // The gate guarantees skills is an array of strings, so this
        // conversion cannot fail in practice.
        let skills: Vec<String> = payload
            .skills
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| AppError::InternalError(format!("skills conversion failed: {}", e)))?
            .unwrap_or_default();

        // The gate guarantees 0 ≤ experience_years ≤ i32::MAX; no silent
        // wrap on the narrowing conversion.
        let experience_years = i32::try_from(payload.experience_years.unwrap_or(0))
            .map_err(|_| AppError::InternalError("experience years out of range".to_string()))?;

        Ok(ProfileInsert {
            name: payload.name.unwrap_or_default().trim().to_string(),
            email: payload.email.unwrap_or_default(),
            location: payload.location,
            skills,
            experience_years,
            available_for_work: payload.available_for_work.unwrap_or(true),
            hourly_rate: payload.hourly_rate.unwrap_or(0.0),
        })
    }
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProfileCreatedResponse {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdatedResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_profiles: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// The listing envelope: items plus pagination metadata.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileListResponse {
    pub data: Vec<Profile>,
    pub pagination: Pagination,
}
