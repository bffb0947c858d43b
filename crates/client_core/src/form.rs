//! Period-row state: id allocation, agent-dependent field toggling, the
//! formatted-date cache, and payload collection.

use shared::dates::{display_from_iso, iso_from_display};
use shared::domain::{FormProfile, HazardAgent, PeriodId, VibrationUnit};
use shared::protocol::PeriodPayload;
use thiserror::Error;

/// Why payload collection refused to produce a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    /// A row cannot be serialized until its agent selector has a value.
    #[error("period {} has no hazard agent selected", .id.0)]
    AgentMissing { id: PeriodId },
}

/// One editable period row.
///
/// Dates are stored in the canonical `YYYY-MM-DD` form next to an optional
/// cache of their `DD/MM/YYYY` display form; collection falls back to
/// recomputation whenever the cache is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodRow {
    id: PeriodId,
    pub data_inicio: String,
    pub data_fim: String,
    pub inicio_formatado: Option<String>,
    pub fim_formatado: Option<String>,
    pub agente: Option<HazardAgent>,
    pub intensidade: String,
    pub unidade_medida: Option<VibrationUnit>,
}

impl PeriodRow {
    fn new(id: PeriodId) -> Self {
        Self {
            id,
            data_inicio: String::new(),
            data_fim: String::new(),
            inicio_formatado: None,
            fim_formatado: None,
            agente: None,
            intensidade: String::new(),
            unidade_medida: None,
        }
    }

    pub fn id(&self) -> PeriodId {
        self.id
    }

    /// Store a start date, accepting either the canonical form or the
    /// display form (normalized on the way in), and refresh the cache.
    pub fn set_data_inicio(&mut self, value: &str) {
        self.data_inicio = normalize_date_input(value);
        self.inicio_formatado = Some(display_from_iso(&self.data_inicio));
    }

    pub fn set_data_fim(&mut self, value: &str) {
        self.data_fim = normalize_date_input(value);
        self.fim_formatado = Some(display_from_iso(&self.data_fim));
    }

    /// Recompute both display-form caches from the canonical values.
    pub fn refresh_formatted_dates(&mut self) {
        self.inicio_formatado = Some(display_from_iso(&self.data_inicio));
        self.fim_formatado = Some(display_from_iso(&self.data_fim));
    }

    fn payload(&self, profile: FormProfile) -> Result<PeriodPayload, FormError> {
        let agente = self.agente.ok_or(FormError::AgentMissing { id: self.id })?;
        let unidade_medida = if profile.unit_selector_visible(Some(agente)) {
            self.unidade_medida
        } else {
            None
        };
        Ok(PeriodPayload {
            data_inicio: self
                .inicio_formatado
                .clone()
                .unwrap_or_else(|| display_from_iso(&self.data_inicio)),
            data_fim: self
                .fim_formatado
                .clone()
                .unwrap_or_else(|| display_from_iso(&self.data_fim)),
            agente,
            intensidade: self.intensidade.clone(),
            unidade_medida,
        })
    }
}

fn normalize_date_input(value: &str) -> String {
    let value = value.trim();
    if value.contains('/') {
        iso_from_display(value)
    } else {
        value.to_string()
    }
}

/// The dynamic list of period rows. The id counter is pre-incremented, so
/// the first row gets 1 and removed ids never come back.
#[derive(Debug, Clone)]
pub struct PeriodForm {
    profile: FormProfile,
    rows: Vec<PeriodRow>,
    next_id: u64,
}

impl PeriodForm {
    /// A fresh form already holding its first row, like the page on load.
    pub fn new(profile: FormProfile) -> Self {
        let mut form = Self {
            profile,
            rows: Vec::new(),
            next_id: 0,
        };
        form.add_period();
        form
    }

    pub fn profile(&self) -> FormProfile {
        self.profile
    }

    pub fn rows(&self) -> &[PeriodRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [PeriodRow] {
        &mut self.rows
    }

    pub fn row_mut(&mut self, id: PeriodId) -> Option<&mut PeriodRow> {
        self.rows.iter_mut().find(|row| row.id() == id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn add_period(&mut self) -> PeriodId {
        self.next_id += 1;
        let id = PeriodId(self.next_id);
        self.rows.push(PeriodRow::new(id));
        id
    }

    /// Remove the row with the given id. Removing an id that is not present
    /// is a silent no-op.
    pub fn remove_period(&mut self, id: PeriodId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id() != id);
        let removed = self.rows.len() != before;
        if !removed {
            tracing::debug!(id = id.0, "remove ignored: period row not present");
        }
        removed
    }

    /// Change a row's agent, mirroring the page's toggling: vibration (with
    /// units enabled) reveals the unit selector with its first option
    /// selected; any other agent hides the selector and clears the unit.
    /// Unknown ids are ignored.
    pub fn set_agent(&mut self, id: PeriodId, agente: Option<HazardAgent>) {
        let profile = self.profile;
        let Some(row) = self.row_mut(id) else { return };
        row.agente = agente;
        if profile.unit_selector_visible(agente) {
            row.unidade_medida.get_or_insert(VibrationUnit::Ms2);
        } else {
            row.unidade_medida = None;
        }
    }

    pub fn unit_selector_visible(&self, row: &PeriodRow) -> bool {
        self.profile.unit_selector_visible(row.agente)
    }

    pub fn intensity_step(&self, row: &PeriodRow) -> f64 {
        self.profile.intensity_step(row.agente)
    }

    /// Collect every row, in insertion order, into submission payloads.
    pub fn collect_payloads(&self) -> Result<Vec<PeriodPayload>, FormError> {
        self.rows.iter().map(|row| row.payload(self.profile)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_row_is_created_on_load_with_id_one() {
        let form = PeriodForm::new(FormProfile::Full);
        assert_eq!(form.len(), 1);
        assert_eq!(form.rows()[0].id(), PeriodId(1));
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut form = PeriodForm::new(FormProfile::Full);
        let second = form.add_period();
        let third = form.add_period();
        assert_eq!((second, third), (PeriodId(2), PeriodId(3)));

        form.remove_period(second);
        let fourth = form.add_period();
        assert_eq!(fourth, PeriodId(4));
        let ids: Vec<_> = form.rows().iter().map(|row| row.id()).collect();
        assert_eq!(ids, vec![PeriodId(1), PeriodId(3), PeriodId(4)]);
    }

    #[test]
    fn removal_leaves_n_minus_one_rows_and_is_idempotent() {
        let mut form = PeriodForm::new(FormProfile::Full);
        form.add_period();
        let target = form.add_period();
        form.add_period();
        assert_eq!(form.len(), 4);

        assert!(form.remove_period(target));
        assert_eq!(form.len(), 3);
        assert!(!form.remove_period(target));
        assert_eq!(form.len(), 3);
    }

    #[test]
    fn vibration_toggle_reveals_units_and_restores_on_leave() {
        let mut form = PeriodForm::new(FormProfile::Full);
        let id = form.rows()[0].id();
        assert_eq!(form.intensity_step(&form.rows()[0]), 0.1);

        form.set_agent(id, Some(HazardAgent::Vibracao));
        let row = &form.rows()[0];
        assert!(form.unit_selector_visible(row));
        assert_eq!(form.intensity_step(row), 0.01);
        assert_eq!(row.unidade_medida, Some(VibrationUnit::Ms2));

        form.set_agent(id, Some(HazardAgent::Calor));
        let row = &form.rows()[0];
        assert!(!form.unit_selector_visible(row));
        assert_eq!(form.intensity_step(row), 0.1);
        assert_eq!(row.unidade_medida, None);
    }

    #[test]
    fn reselecting_vibration_keeps_a_chosen_unit() {
        let mut form = PeriodForm::new(FormProfile::Full);
        let id = form.rows()[0].id();
        form.set_agent(id, Some(HazardAgent::Vibracao));
        form.row_mut(id).expect("row").unidade_medida = Some(VibrationUnit::Gpm);
        form.set_agent(id, Some(HazardAgent::Vibracao));
        assert_eq!(form.rows()[0].unidade_medida, Some(VibrationUnit::Gpm));
    }

    #[test]
    fn reduced_profile_never_exposes_units() {
        let mut form = PeriodForm::new(FormProfile::Reduced);
        let id = form.rows()[0].id();
        form.set_agent(id, Some(HazardAgent::Vibracao));
        let row = &form.rows()[0];
        assert!(!form.unit_selector_visible(row));
        assert_eq!(form.intensity_step(row), 0.1);
        assert_eq!(row.unidade_medida, None);

        form.row_mut(id).expect("row").intensidade = "0.9".into();
        let payloads = form.collect_payloads().expect("collect");
        assert_eq!(payloads[0].unidade_medida, None);
    }

    #[test]
    fn collects_cached_display_dates() {
        let mut form = PeriodForm::new(FormProfile::Full);
        let id = form.rows()[0].id();
        let row = form.row_mut(id).expect("row");
        row.set_data_inicio("2020-01-01");
        row.set_data_fim("2020-06-30");
        row.intensidade = "85.5".into();
        form.set_agent(id, Some(HazardAgent::Ruido));

        let payloads = form.collect_payloads().expect("collect");
        assert_eq!(payloads[0].data_inicio, "01/01/2020");
        assert_eq!(payloads[0].data_fim, "30/06/2020");
        assert_eq!(payloads[0].intensidade, "85.5");
    }

    #[test]
    fn falls_back_to_recomputation_when_the_cache_is_absent() {
        let mut form = PeriodForm::new(FormProfile::Full);
        let id = form.rows()[0].id();
        let row = form.row_mut(id).expect("row");
        row.data_inicio = "2020-01-01".into();
        row.data_fim = "2020-06-30".into();
        assert_eq!(row.inicio_formatado, None);
        form.set_agent(id, Some(HazardAgent::Ruido));

        let payloads = form.collect_payloads().expect("collect");
        assert_eq!(payloads[0].data_inicio, "01/01/2020");
        assert_eq!(payloads[0].data_fim, "30/06/2020");
    }

    #[test]
    fn display_form_date_input_is_normalized_to_canonical() {
        let mut form = PeriodForm::new(FormProfile::Full);
        let id = form.rows()[0].id();
        let row = form.row_mut(id).expect("row");
        row.set_data_inicio("01/01/2020");
        assert_eq!(row.data_inicio, "2020-01-01");
        assert_eq!(row.inicio_formatado.as_deref(), Some("01/01/2020"));
    }

    #[test]
    fn payloads_preserve_row_order() {
        let mut form = PeriodForm::new(FormProfile::Full);
        let first = form.rows()[0].id();
        let second = form.add_period();
        form.set_agent(first, Some(HazardAgent::Ruido));
        form.set_agent(second, Some(HazardAgent::Calor));

        let payloads = form.collect_payloads().expect("collect");
        assert_eq!(payloads[0].agente, HazardAgent::Ruido);
        assert_eq!(payloads[1].agente, HazardAgent::Calor);
    }

    #[test]
    fn refuses_to_collect_while_an_agent_is_missing() {
        let mut form = PeriodForm::new(FormProfile::Full);
        let second = form.add_period();
        form.set_agent(form.rows()[0].id(), Some(HazardAgent::Ruido));

        assert_eq!(
            form.collect_payloads(),
            Err(FormError::AgentMissing { id: second })
        );
    }
}
