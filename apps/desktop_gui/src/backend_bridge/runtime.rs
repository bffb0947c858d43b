//! Backend worker: a dedicated thread with its own tokio runtime serving
//! evaluation requests from the UI command queue.

use std::thread;

use client_core::{EvaluationBackend, EvaluationClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, server_url: String) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!(error = %err, "failed to build backend runtime");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let client = match EvaluationClient::new(&server_url) {
                Ok(client) => client,
                Err(err) => {
                    tracing::error!(error = %err, "refusing to start backend worker");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: {err}"),
                    )));
                    return;
                }
            };
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Evaluate { periodos } => {
                        tracing::info!(periods = periodos.len(), "evaluating periods");
                        let outcome = client.evaluate(periodos).await;
                        let _ = ui_tx.try_send(UiEvent::EvaluationFinished(outcome));
                    }
                }
            }
            tracing::info!("ui command channel closed; backend worker exiting");
        });
    });
}
