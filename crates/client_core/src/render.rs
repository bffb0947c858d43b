//! View models for the result blocks shown after an evaluation, line for
//! line what the page template put inside each alert box.

use shared::protocol::EvaluationResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub label: String,
    pub value: String,
}

/// One rendered evaluation block.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultBlock {
    /// "Período:" line, `{data_inicio} a {data_fim}` of the subperiod.
    pub periodo: String,
    /// "Agente:" line, display form of the echoed wire name.
    pub agente: String,
    /// "Limite no período:" line, absent when the service sent no limit.
    pub limite: Option<String>,
    /// "Intensidade informada:" line.
    pub intensidade: String,
    /// "Fundamento:" line, variant-dependent.
    pub fundamento: Option<String>,
    pub eh_especial: bool,
    /// "Resultado:" line.
    pub resultado: &'static str,
    pub detalhes: Vec<DetailLine>,
}

pub fn result_blocks(resultados: &[EvaluationResult]) -> Vec<ResultBlock> {
    resultados.iter().map(result_block).collect()
}

fn result_block(result: &EvaluationResult) -> ResultBlock {
    let sub = &result.subperiodo;
    let limit_unit = sub
        .unidade_limite
        .as_deref()
        .or(sub.unidade.as_deref())
        .unwrap_or_default();
    ResultBlock {
        periodo: format!("{} a {}", sub.data_inicio, sub.data_fim),
        agente: agent_display_name(result.periodo_original.agente.wire_name()),
        limite: sub
            .limite
            .map(|limite| format!(">{limite} {limit_unit}").trim_end().to_string()),
        intensidade: format!(
            "{} {}",
            sub.intensidade,
            sub.unidade.as_deref().unwrap_or_default()
        )
        .trim_end()
        .to_string(),
        fundamento: sub.fundamento.clone(),
        eh_especial: sub.eh_especial,
        resultado: if sub.eh_especial {
            "Período Especial"
        } else {
            "Período Não Especial"
        },
        detalhes: sub
            .detalhes
            .iter()
            .flatten()
            .map(|(label, value)| DetailLine {
                label: label.clone(),
                value: detail_value_text(value),
            })
            .collect(),
    }
}

/// Display form of an agent wire name: first letter capitalized, underscores
/// as spaces ("agentes_quimicos" -> "Agentes quimicos").
pub fn agent_display_name(wire_name: &str) -> String {
    let spaced = wire_name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn detail_value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
