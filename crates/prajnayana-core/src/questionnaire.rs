//! Self-discovery questionnaire: Likert answers and session scoring.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

const DATE_TAKEN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Five-point agreement scale. Wire value is the digit `"1"`..`"5"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LikertChoice {
    Disagree,
    SomewhatDisagree,
    Neutral,
    SomewhatAgree,
    Agree,
}

impl LikertChoice {
    pub const ALL: [LikertChoice; 5] = [
        LikertChoice::Disagree,
        LikertChoice::SomewhatDisagree,
        LikertChoice::Neutral,
        LikertChoice::SomewhatAgree,
        LikertChoice::Agree,
    ];

    pub fn score(&self) -> u32 {
        match self {
            LikertChoice::Disagree => 1,
            LikertChoice::SomewhatDisagree => 2,
            LikertChoice::Neutral => 3,
            LikertChoice::SomewhatAgree => 4,
            LikertChoice::Agree => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LikertChoice::Disagree => "Disagree",
            LikertChoice::SomewhatDisagree => "Somewhat Disagree",
            LikertChoice::Neutral => "Neither Agree nor Disagree",
            LikertChoice::SomewhatAgree => "Somewhat Agree",
            LikertChoice::Agree => "Agree",
        }
    }

    /// Accepts the digit or the label (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.score().to_string() == s || c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "selected_option".to_string(),
                message: format!("'{s}' is not 1-5 or a scale label"),
            })
    }
}

impl fmt::Display for LikertChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for LikertChoice {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LikertChoice> for String {
    fn from(choice: LikertChoice) -> Self {
        choice.score().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryQuestion {
    pub id: i64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSession {
    pub id: i64,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_date_taken")]
    pub date_taken: Option<NaiveDateTime>,
}

impl TestSession {
    pub fn taken_on(&self, day: NaiveDate) -> bool {
        self.date_taken.is_some_and(|t| t.date() == day)
    }
}

/// The server allows one session per day.
pub fn has_session_on(sessions: &[TestSession], day: NaiveDate) -> bool {
    sessions.iter().any(|s| s.taken_on(day))
}

/// A stored answer. `selected_option` comes back as the scale label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireResponse {
    pub id: i64,
    pub test_session: i64,
    #[serde(default)]
    pub question: Option<DiscoveryQuestion>,
    pub selected_option: String,
}

impl QuestionnaireResponse {
    /// Score of this answer; anything off the scale counts 0.
    pub fn score(&self) -> u32 {
        LikertChoice::parse(&self.selected_option).map_or(0, |c| c.score())
    }
}

/// Body for submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewResponse {
    pub test_session: i64,
    pub question_id: String,
    pub selected_option: LikertChoice,
}

impl NewResponse {
    pub fn new(test_session: i64, question_id: i64, choice: LikertChoice) -> Self {
        Self {
            test_session,
            question_id: question_id.to_string(),
            selected_option: choice,
        }
    }
}

/// Sum of answer scores for one session.
pub fn total_score<'a>(responses: impl IntoIterator<Item = &'a QuestionnaireResponse>) -> u32 {
    responses.into_iter().map(QuestionnaireResponse::score).sum()
}

fn deserialize_date_taken<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| NaiveDateTime::parse_from_str(&s, DATE_TAKEN_FORMAT).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(option: &str) -> QuestionnaireResponse {
        QuestionnaireResponse {
            id: 1,
            test_session: 1,
            question: None,
            selected_option: option.to_string(),
        }
    }

    #[test]
    fn parse_accepts_digit_or_label() {
        assert_eq!(LikertChoice::parse("4").unwrap(), LikertChoice::SomewhatAgree);
        assert_eq!(LikertChoice::parse("agree").unwrap(), LikertChoice::Agree);
        assert_eq!(
            LikertChoice::parse("Neither Agree nor Disagree").unwrap(),
            LikertChoice::Neutral
        );
        assert!(LikertChoice::parse("6").is_err());
    }

    #[test]
    fn total_score_sums_and_ignores_unknown() {
        let responses = vec![response("Agree"), response("Somewhat Disagree"), response("maybe")];
        assert_eq!(total_score(&responses), 5 + 2);
    }

    #[test]
    fn new_response_sends_digit() {
        let body = serde_json::to_value(NewResponse::new(3, 9, LikertChoice::Neutral)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "test_session": 3, "question_id": "9", "selected_option": "3" })
        );
    }

    #[test]
    fn session_date_taken_parses_server_format() {
        let session: TestSession = serde_json::from_value(serde_json::json!({
            "id": 2,
            "user": "sienna",
            "score": null,
            "date_taken": "2024-05-01 08:30:00",
        }))
        .unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(session.taken_on(day));
        assert!(has_session_on(&[session], day));
        assert!(!has_session_on(&[], day));
    }
}
