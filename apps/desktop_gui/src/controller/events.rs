//! UI/backend events and error modeling for the desktop GUI controller.

use client_core::error::EvaluationError;
use client_core::Evaluation;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    EvaluationFinished(Result<Evaluation, EvaluationError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Submit,
    General,
}

/// Actionable banner text for a backend failure. Startup and connectivity
/// problems get a concrete suggestion; anything else passes through.
pub fn classify_backend_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("backend worker startup failure")
        || lower.contains("failed to build runtime")
        || lower.contains("invalid evaluation service url")
    {
        "Falha ao iniciar o processador de requisições; reinicie o aplicativo.".to_string()
    } else if lower.contains("connection refused")
        || lower.contains("transport failure")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        "Serviço de avaliação inacessível. Verifique a URL do serviço e a conexão.".to_string()
    } else {
        message.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("inválid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("unreachable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
