use serde::{Deserialize, Serialize};
use validator::Validate;
use vcb_srs::{ProgressRecord, ReviewRequest, ReviewResult};

/// Review submission body.
///
/// Accepts both snake_case and the camelCase keys older clients send.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct ProgressSubmission {
    #[serde(default, alias = "vocabId")]
    #[validate(range(min = 1))]
    pub vocab_id: Option<i32>,
    #[serde(default, alias = "verbId")]
    #[validate(range(min = 1))]
    pub verb_id: Option<i32>,
    #[serde(default, alias = "wasCorrect")]
    pub was_correct: Option<bool>,
    #[serde(default, alias = "isKnown")]
    pub is_known: Option<bool>,
}

impl From<ProgressSubmission> for ReviewRequest {
    fn from(submission: ProgressSubmission) -> Self {
        Self {
            vocab_id: submission.vocab_id,
            verb_id: submission.verb_id,
            was_correct: submission.was_correct,
            is_known: submission.is_known,
        }
    }
}

/// Query string for a single progress lookup.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProgressQuery {
    #[serde(default, alias = "vocabId")]
    #[validate(range(min = 1))]
    pub vocab_id: Option<i32>,
    #[serde(default, alias = "verbId")]
    #[validate(range(min = 1))]
    pub verb_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DueQuery {
    pub limit: Option<i64>,
}

const fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub created: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub updated: bool,
    pub progress: ProgressRecord,
}

impl From<ReviewResult> for ReviewResponse {
    fn from(result: ReviewResult) -> Self {
        Self {
            success: true,
            created: result.created,
            updated: !result.created,
            progress: result.record,
        }
    }
}

/// `progress` is `null` for items the user never reviewed.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressLookup {
    pub progress: Option<ProgressRecord>,
}
