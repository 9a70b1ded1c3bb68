//! Profile editor state.
//!
//! The form keeps every field as the user typed it. Conversion to the update
//! payload happens on save, and the saved values are mirrored onto the local
//! user because the server only answers with a status message.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const GENDER_OPTIONS: [&str; 4] = ["Male", "Female", "Other", "Prefer not to say"];
const DEFAULT_GENDER: &str = "Male";
const LAST_LOGIN_FORMAT: &str = "%B %-d, %Y %-I:%M %p";

/// The user record as served by `auth/users/{id}/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Combined display name some accounts carry instead of first/last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub year_of_birth: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

/// Body of the profile update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub year_of_birth: Option<i32>,
}

/// Editable text fields of the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub year_of_birth: String,
    pub country: String,
    /// Display only.
    pub last_login: String,
}

impl ProfileForm {
    pub fn from_user(user: &UserProfile) -> Self {
        let (fallback_first, fallback_last) = split_display_name(user.name.as_deref());
        Self {
            first_name: non_empty_or(&user.first_name, fallback_first),
            last_name: non_empty_or(&user.last_name, fallback_last),
            email: user.email.clone(),
            gender: user
                .gender
                .clone()
                .filter(|g| !g.is_empty())
                .unwrap_or_else(|| DEFAULT_GENDER.to_string()),
            year_of_birth: user.year_of_birth.map(|y| y.to_string()).unwrap_or_default(),
            country: user.country.clone().unwrap_or_default(),
            last_login: user
                .last_login
                .map(|t| t.with_timezone(&Local))
                .unwrap_or_else(Local::now)
                .format(LAST_LOGIN_FORMAT)
                .to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "email".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if !GENDER_OPTIONS.contains(&self.gender.as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "gender".to_string(),
                message: format!("expected one of: {}", GENDER_OPTIONS.join(", ")),
            });
        }
        Ok(())
    }

    /// Year of birth that does not parse as a number is sent as `null`.
    pub fn parsed_year_of_birth(&self) -> Option<i32> {
        self.year_of_birth.trim().parse().ok()
    }

    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            gender: self.gender.clone(),
            year_of_birth: self.parsed_year_of_birth(),
        }
    }

    /// Mirror saved values onto the local user record.
    pub fn apply_to(&self, user: &mut UserProfile) {
        user.first_name = self.first_name.clone();
        user.last_name = self.last_name.clone();
        user.email = self.email.clone();
        user.gender = Some(self.gender.clone());
        user.year_of_birth = self.parsed_year_of_birth();
    }
}

fn split_display_name(name: Option<&str>) -> (String, String) {
    let mut parts = name.unwrap_or_default().split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let rest = parts.collect::<Vec<_>>().join(" ");
    (first, rest)
}

fn non_empty_or(value: &str, fallback: String) -> String {
    if value.is_empty() {
        fallback
    } else {
        value.to_string()
    }
}
