//! Report Generator Port - Interface for turning a conversation into a report.

use async_trait::async_trait;

use super::text_generator::GenerationError;
use crate::domain::foundation::SessionKey;
use crate::domain::intake::{Role, Style, TurnRecord};

/// Port for consultative report generation.
///
/// The trigger hands over the accumulated history as is; composing the
/// report is entirely the implementation's business.
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    async fn generate(&self, request: ReportRequest) -> Result<String, ReportError>;
}

/// Everything a report writer gets to see.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub session_key: SessionKey,
    pub role: Role,
    pub style: Style,
    /// Full retained history, oldest first.
    pub history: Vec<TurnRecord>,
}

/// Report generation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReportError {
    /// The history holds no informational turns.
    #[error("nothing to report")]
    NothingToReport,

    /// The underlying generation call failed.
    #[error("report generation failed: {0}")]
    Generation(#[from] GenerationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_errors_convert() {
        let err: ReportError = GenerationError::connectivity("refused").into();
        assert!(matches!(err, ReportError::Generation(GenerationError::Connectivity(_))));
        assert_eq!(
            err.to_string(),
            "report generation failed: connection failed: refused"
        );
    }
}
