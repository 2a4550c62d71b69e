//! Backer surveys.

use serde::{Deserialize, Serialize};

use super::Project;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answered_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
}

impl SurveyResponse {
    #[must_use]
    pub const fn is_answered(&self) -> bool {
        self.answered_at.is_some()
    }
}
