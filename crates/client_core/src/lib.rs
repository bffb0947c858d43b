//! Client core for the special-activity evaluation form: period-row state,
//! submission to the evaluation service, and the seams hosts plug into
//! (backend, rendering surface, clipboard).

pub mod error;
pub mod form;
pub mod render;

use async_trait::async_trait;
use shared::domain::FormProfile;
use shared::protocol::{EvaluateReply, EvaluateRequest, EvaluationResult, PeriodPayload};
use url::Url;

use crate::error::EvaluationError;
use crate::form::{FormError, PeriodForm};
use crate::render::ResultBlock;

/// Interpreted successful reply, what the page rendered from.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub resultados: Vec<EvaluationResult>,
    pub minuta: String,
}

/// Anything that can run one evaluation round-trip.
#[async_trait]
pub trait EvaluationBackend: Send + Sync {
    async fn evaluate(&self, periodos: Vec<PeriodPayload>) -> Result<Evaluation, EvaluationError>;
}

/// HTTP client for the evaluation service.
#[derive(Debug, Clone)]
pub struct EvaluationClient {
    http: reqwest::Client,
    server_url: String,
}

impl EvaluationClient {
    /// Validates the configured base URL once, up front.
    pub fn new(server_url: &str) -> Result<Self, EvaluationError> {
        let trimmed = server_url.trim().trim_end_matches('/');
        Url::parse(trimmed).map_err(|source| EvaluationError::InvalidServerUrl {
            url: server_url.to_string(),
            source,
        })?;
        Ok(Self {
            http: reqwest::Client::new(),
            server_url: trimmed.to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// POST the periods and interpret the reply the way the page did: the
    /// body is parsed first, and a non-empty `error` field wins over any
    /// HTTP status.
    pub async fn evaluate(
        &self,
        periodos: Vec<PeriodPayload>,
    ) -> Result<Evaluation, EvaluationError> {
        let url = format!("{}/avaliar", self.server_url);
        tracing::debug!(url = %url, periods = periodos.len(), "submitting evaluation request");
        let response = self
            .http
            .post(&url)
            .json(&EvaluateRequest { periodos })
            .send()
            .await
            .map_err(|source| EvaluationError::Transport {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        let reply: EvaluateReply =
            response
                .json()
                .await
                .map_err(|source| EvaluationError::MalformedReply {
                    detail: format!("body is not reply JSON (HTTP {status}): {source}"),
                })?;
        interpret_reply(reply, status.as_u16())
    }
}

#[async_trait]
impl EvaluationBackend for EvaluationClient {
    async fn evaluate(&self, periodos: Vec<PeriodPayload>) -> Result<Evaluation, EvaluationError> {
        EvaluationClient::evaluate(self, periodos).await
    }
}

fn interpret_reply(reply: EvaluateReply, status: u16) -> Result<Evaluation, EvaluationError> {
    if let Some(message) = reply.error.filter(|message| !message.is_empty()) {
        return Err(EvaluationError::Rejected { message });
    }
    match reply.resultados {
        Some(resultados) => Ok(Evaluation {
            resultados,
            minuta: reply.minuta.unwrap_or_default(),
        }),
        None => Err(EvaluationError::MalformedReply {
            detail: format!("reply carries neither 'error' nor 'resultados' (HTTP {status})"),
        }),
    }
}

/// Rendering target driven by the controller: the page's results card,
/// minuta card, and alert rolled into one seam.
pub trait EvaluationSurface {
    /// Reveal both panels, render one block per evaluation, and set the
    /// minuta text.
    fn show_evaluation(&mut self, blocks: Vec<ResultBlock>, minuta: &str);
    /// Surface a failure. Result panels are left untouched.
    fn show_failure(&mut self, notice: &str);
    /// Lightweight notification (the page used `alert`).
    fn notify(&mut self, notice: &str);
}

/// Destination of the minuta copy operation.
pub trait ClipboardText {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// The form controller: owns the row collection, guards submission against
/// re-entry, and routes outcomes to the injected surface.
pub struct FormController<S: EvaluationSurface> {
    form: PeriodForm,
    surface: S,
    pending: bool,
    minuta: Option<String>,
}

impl<S: EvaluationSurface> FormController<S> {
    pub fn new(profile: FormProfile, surface: S) -> Self {
        Self {
            form: PeriodForm::new(profile),
            surface,
            pending: false,
            minuta: None,
        }
    }

    pub fn form(&self) -> &PeriodForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PeriodForm {
        &mut self.form
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Whether a submission is in flight.
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Minuta currently on display, if any.
    pub fn minuta(&self) -> Option<&str> {
        self.minuta.as_deref()
    }

    /// First half of a submission: collect the payloads and mark the
    /// controller pending. Returns `None`, after surfacing the reason, when
    /// a submission is already in flight or the form is incomplete.
    pub fn begin_submit(&mut self) -> Option<Vec<PeriodPayload>> {
        if self.pending {
            tracing::debug!("submit ignored: evaluation already in flight");
            return None;
        }
        match self.form.collect_payloads() {
            Ok(payloads) => {
                self.pending = true;
                Some(payloads)
            }
            Err(FormError::AgentMissing { id }) => {
                tracing::warn!(id = id.0, "submit refused: period without hazard agent");
                self.surface
                    .show_failure(&format!("Selecione o agente nocivo do período {}.", id.0));
                None
            }
        }
    }

    /// Unwind `begin_submit` when the host never started the round-trip,
    /// e.g. because its worker queue refused the command.
    pub fn cancel_submit(&mut self) {
        self.pending = false;
    }

    /// Second half: deliver the round-trip outcome and clear the pending
    /// flag. Failures leave the result panels untouched.
    pub fn finish_submit(&mut self, outcome: Result<Evaluation, EvaluationError>) {
        self.pending = false;
        match outcome {
            Ok(evaluation) => {
                let blocks = render::result_blocks(&evaluation.resultados);
                self.minuta = Some(evaluation.minuta.clone());
                self.surface.show_evaluation(blocks, &evaluation.minuta);
            }
            Err(err) => {
                tracing::error!(error = %err, "evaluation request failed");
                self.surface.show_failure(&err.user_notice());
            }
        }
    }

    /// Whole round-trip, for hosts that can await in place (CLI, tests).
    pub async fn submit<B: EvaluationBackend>(&mut self, backend: &B) {
        let Some(payloads) = self.begin_submit() else {
            return;
        };
        let outcome = backend.evaluate(payloads).await;
        self.finish_submit(outcome);
    }

    /// Copy the displayed minuta, notifying the outcome like the page's
    /// alert did.
    pub fn copy_minuta<C: ClipboardText>(&mut self, clipboard: &mut C) {
        let Some(minuta) = self.minuta.clone() else {
            self.surface.notify("Nenhuma minuta para copiar.");
            return;
        };
        match clipboard.set_text(&minuta) {
            Ok(()) => self
                .surface
                .notify("Minuta copiada para a área de transferência!"),
            Err(err) => {
                tracing::error!(error = %err, "clipboard copy failed");
                self.surface.notify("Não foi possível copiar a minuta.");
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
