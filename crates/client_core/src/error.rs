//! Failure taxonomy of one evaluation round-trip.

use thiserror::Error;

/// Notice shown when a failure carries no user-facing message of its own,
/// word for word what the page alerted.
pub const GENERIC_FAILURE_NOTICE: &str =
    "Erro ao processar períodos. Verifique o console para mais detalhes.";

#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The service answered with its `error` envelope. The message is
    /// written by the service for the user and is surfaced as-is.
    #[error("evaluation rejected by the service: {message}")]
    Rejected { message: String },

    #[error("transport failure calling {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body was not reply JSON at all, or parsed without carrying
    /// either `error` or `resultados`.
    #[error("malformed reply from the service: {detail}")]
    MalformedReply { detail: String },

    #[error("invalid evaluation service url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl EvaluationError {
    /// Text for the failure banner: the service's own message when the
    /// submission was rejected, the generic page notice otherwise.
    pub fn user_notice(&self) -> String {
        match self {
            EvaluationError::Rejected { message } => message.clone(),
            _ => GENERIC_FAILURE_NOTICE.to_string(),
        }
    }
}
