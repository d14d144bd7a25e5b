//! Query parameters accepted on result links.

use serde::Deserialize;

/// Query string of `/result/{id}` and `/api/v1/results/{id}`.
///
/// Persona ids arrive as raw strings so that a non-numeric value counts as
/// absent instead of rejecting the whole request.
#[derive(Debug, Default, Deserialize)]
pub struct ResultLinkParams {
    pub lang: Option<String>,
    #[serde(rename = "quizUserId")]
    pub quiz_user_id: Option<String>,
    #[serde(rename = "replyUserId")]
    pub reply_user_id: Option<String>,
    pub answer: Option<String>,
    pub direct: Option<String>,
    /// Compressed share parameters; see `grokmind_core::share`.
    pub c: Option<String>,
}
