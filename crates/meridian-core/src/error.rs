use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("response {index} has an empty question id")]
    EmptyQuestionId { index: usize },

    #[error("duplicate question id '{question_id}' in scale '{scale}'")]
    DuplicateQuestion { scale: String, question_id: String },
}
