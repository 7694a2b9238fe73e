use thiserror::Error;

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Dataset `{dataset}` is missing required column `{column}`")]
    MissingColumn {
        dataset: &'static str,
        column: &'static str,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
