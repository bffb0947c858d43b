//! Wire contract of the evaluation service (`POST /avaliar`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{HazardAgent, VibrationUnit};

/// One period as submitted. Dates travel in the `DD/MM/YYYY` display form;
/// `intensidade` carries the user's text verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodPayload {
    pub data_inicio: String,
    pub data_fim: String,
    pub agente: HazardAgent,
    pub intensidade: String,
    /// Explicitly `null` for non-vibration periods.
    pub unidade_medida: Option<VibrationUnit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub periodos: Vec<PeriodPayload>,
}

/// Assessment of one evaluated slice. The service may split a submitted
/// period at regulatory cut dates, answering one entry per slice with the
/// originating period echoed alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubperiodAssessment {
    pub data_inicio: String,
    pub data_fim: String,
    pub intensidade: f64,
    pub eh_especial: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unidade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unidade_limite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limite: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fundamento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detalhes: Option<BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub periodo_original: PeriodPayload,
    pub subperiodo: SubperiodAssessment,
}

/// Raw reply envelope. Every field is optional so the `error` field can be
/// inspected before anything else is trusted; interpretation lives in
/// `client_core`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluateReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resultados: Option<Vec<EvaluationResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minuta: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_and_unit_wire_names_are_snake_case() {
        assert_eq!(
            serde_json::to_string(&HazardAgent::AgentesQuimicos).expect("serialize"),
            "\"agentes_quimicos\""
        );
        assert_eq!(
            serde_json::to_string(&VibrationUnit::Ms175).expect("serialize"),
            "\"ms175\""
        );
    }

    #[test]
    fn non_vibration_periods_serialize_an_explicit_null_unit() {
        let payload = PeriodPayload {
            data_inicio: "01/01/2020".into(),
            data_fim: "30/06/2020".into(),
            agente: HazardAgent::Ruido,
            intensidade: "85.5".into(),
            unidade_medida: None,
        };
        let json = serde_json::to_string(&payload).expect("serialize");
        assert!(json.contains("\"unidade_medida\":null"), "json was {json}");
    }

    #[test]
    fn success_reply_parses_with_optional_fields_absent() {
        let raw = r#"{
            "resultados": [{
                "periodo_original": {
                    "data_inicio": "01/01/2020",
                    "data_fim": "30/06/2020",
                    "agente": "calor",
                    "intensidade": "26.0",
                    "unidade_medida": null
                },
                "subperiodo": {
                    "data_inicio": "01/01/2020",
                    "data_fim": "30/06/2020",
                    "intensidade": 26.0,
                    "eh_especial": false,
                    "unidade": "IBUTG"
                }
            }],
            "minuta": "Dessa forma, nada a reconhecer."
        }"#;
        let reply: EvaluateReply = serde_json::from_str(raw).expect("parse");
        assert!(reply.error.is_none());
        let resultados = reply.resultados.expect("resultados");
        assert_eq!(resultados.len(), 1);
        let sub = &resultados[0].subperiodo;
        assert_eq!(sub.unidade.as_deref(), Some("IBUTG"));
        assert!(sub.limite.is_none());
        assert!(sub.fundamento.is_none());
        assert!(sub.detalhes.is_none());
    }

    #[test]
    fn error_reply_parses_without_result_fields() {
        let reply: EvaluateReply =
            serde_json::from_str(r#"{"error": "Nenhum período fornecido"}"#).expect("parse");
        assert_eq!(reply.error.as_deref(), Some("Nenhum período fornecido"));
        assert!(reply.resultados.is_none());
        assert!(reply.minuta.is_none());
    }
}
