//! Headless submission client: reads periods from a JSON file, submits them
//! to the evaluation service, and prints the result blocks and the minuta.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::render::ResultBlock;
use client_core::{EvaluationClient, EvaluationSurface, FormController};
use serde::Deserialize;
use shared::domain::{FormProfile, HazardAgent, VibrationUnit};

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the evaluation service.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
    /// Page variant to emulate: "full" or "reduced".
    #[arg(long, default_value = "full")]
    profile: String,
    /// JSON file with the periods to submit.
    #[arg(long)]
    input: PathBuf,
}

/// One period as written in the input file. Dates are accepted in either
/// YYYY-MM-DD or DD/MM/YYYY form; intensity may be a string or a number.
#[derive(Debug, Deserialize)]
struct InputPeriod {
    data_inicio: String,
    data_fim: String,
    agente: HazardAgent,
    intensidade: IntensityInput,
    #[serde(default)]
    unidade_medida: Option<VibrationUnit>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IntensityInput {
    Text(String),
    Number(f64),
}

impl IntensityInput {
    fn into_text(self) -> String {
        match self {
            IntensityInput::Text(text) => text,
            IntensityInput::Number(value) => value.to_string(),
        }
    }
}

struct TerminalSurface;

impl EvaluationSurface for TerminalSurface {
    fn show_evaluation(&mut self, blocks: Vec<ResultBlock>, minuta: &str) {
        for block in &blocks {
            print_block(block);
        }
        println!("--- Minuta ---");
        println!("{minuta}");
    }

    fn show_failure(&mut self, notice: &str) {
        eprintln!("Falha: {notice}");
    }

    fn notify(&mut self, notice: &str) {
        println!("{notice}");
    }
}

fn print_block(block: &ResultBlock) {
    println!("Período: {}", block.periodo);
    println!("Agente: {}", block.agente);
    if let Some(limite) = &block.limite {
        println!("Limite no período: {limite}");
    }
    println!("Intensidade informada: {}", block.intensidade);
    if let Some(fundamento) = &block.fundamento {
        println!("Fundamento: {fundamento}");
    }
    println!("Resultado: {}", block.resultado);
    for detail in &block.detalhes {
        println!("{}: {}", detail.label, detail.value);
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let Some(profile) = FormProfile::parse(&args.profile) else {
        bail!(
            "unknown profile '{}'; expected 'full' or 'reduced'",
            args.profile
        );
    };

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read periods file '{}'", args.input.display()))?;
    let periods: Vec<InputPeriod> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse periods file '{}'", args.input.display()))?;
    if periods.is_empty() {
        bail!("periods file '{}' holds no periods", args.input.display());
    }

    let client = EvaluationClient::new(&args.server_url)?;
    let mut controller = FormController::new(profile, TerminalSurface);

    for (index, period) in periods.into_iter().enumerate() {
        if !profile.agents().contains(&period.agente) {
            bail!(
                "agent '{}' is not available in the '{}' variant",
                period.agente.wire_name(),
                profile.name()
            );
        }

        let id = if index == 0 {
            controller.form().rows()[0].id()
        } else {
            controller.form_mut().add_period()
        };
        controller.form_mut().set_agent(id, Some(period.agente));

        let row = controller
            .form_mut()
            .row_mut(id)
            .context("period row vanished while filling the form")?;
        row.set_data_inicio(&period.data_inicio);
        row.set_data_fim(&period.data_fim);
        row.intensidade = period.intensidade.into_text();
        if profile.unit_selector_visible(Some(period.agente)) {
            if let Some(unit) = period.unidade_medida {
                row.unidade_medida = Some(unit);
            }
        }
    }

    controller.submit(&client).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::InputPeriod;
    use shared::domain::{HazardAgent, VibrationUnit};

    #[test]
    fn accepts_intensity_as_text_or_number() {
        let mut periods: Vec<InputPeriod> = serde_json::from_str(
            r#"[
                {"data_inicio": "2020-01-01", "data_fim": "2020-06-30",
                 "agente": "ruido", "intensidade": "90,5"},
                {"data_inicio": "01/07/2020", "data_fim": "31/12/2020",
                 "agente": "vibracao", "intensidade": 1.2, "unidade_medida": "ms175"}
            ]"#,
        )
        .expect("parse periods");

        let second = periods.pop().expect("second period");
        let first = periods.pop().expect("first period");

        assert_eq!(first.agente, HazardAgent::Ruido);
        assert_eq!(first.intensidade.into_text(), "90,5");
        assert!(first.unidade_medida.is_none());

        assert_eq!(second.intensidade.into_text(), "1.2");
        assert_eq!(second.unidade_medida, Some(VibrationUnit::Ms175));
    }

    #[test]
    fn rejects_an_unknown_agent() {
        let outcome = serde_json::from_str::<Vec<InputPeriod>>(
            r#"[{"data_inicio": "2020-01-01", "data_fim": "2020-06-30",
                 "agente": "frio", "intensidade": "1"}]"#,
        );
        assert!(outcome.is_err());
    }
}
