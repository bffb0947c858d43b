use serde::{Deserialize, Serialize};

/// Identifier of one period row. Ids come from a per-form counter that only
/// moves forward; an id is never reused, even after its row is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeriodId(pub u64);

/// Hazard-agent categories accepted by the evaluation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardAgent {
    Ruido,
    Vibracao,
    AgentesQuimicos,
    Calor,
    Radiacao,
    Eletricidade,
}

impl HazardAgent {
    pub const ALL: [HazardAgent; 6] = [
        HazardAgent::Ruido,
        HazardAgent::Vibracao,
        HazardAgent::AgentesQuimicos,
        HazardAgent::Calor,
        HazardAgent::Radiacao,
        HazardAgent::Eletricidade,
    ];

    /// Name used on the wire and echoed back inside `periodo_original`.
    pub fn wire_name(self) -> &'static str {
        match self {
            HazardAgent::Ruido => "ruido",
            HazardAgent::Vibracao => "vibracao",
            HazardAgent::AgentesQuimicos => "agentes_quimicos",
            HazardAgent::Calor => "calor",
            HazardAgent::Radiacao => "radiacao",
            HazardAgent::Eletricidade => "eletricidade",
        }
    }

    /// Label shown in the agent selector.
    pub fn label(self) -> &'static str {
        match self {
            HazardAgent::Ruido => "Ruído",
            HazardAgent::Vibracao => "Vibração de Corpo Inteiro",
            HazardAgent::AgentesQuimicos => "Agentes Químicos",
            HazardAgent::Calor => "Calor",
            HazardAgent::Radiacao => "Radiação",
            HazardAgent::Eletricidade => "Eletricidade",
        }
    }
}

/// Vibration measurement units. Only meaningful while the row's agent is
/// [`HazardAgent::Vibracao`] and the profile exposes the unit selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VibrationUnit {
    Ms2,
    Ms175,
    Gpm,
}

impl VibrationUnit {
    pub const ALL: [VibrationUnit; 3] = [
        VibrationUnit::Ms2,
        VibrationUnit::Ms175,
        VibrationUnit::Gpm,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VibrationUnit::Ms2 => "m/s² (aren)",
            VibrationUnit::Ms175 => "m/s1,75 (VDVR)",
            VibrationUnit::Gpm => "golpes/min",
        }
    }
}

/// Page variant, selected by configuration. `Full` carries every agent plus
/// the vibration unit selector; `Reduced` is the narrower variant with no
/// unit distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormProfile {
    #[default]
    Full,
    Reduced,
}

impl FormProfile {
    const REDUCED_AGENTS: [HazardAgent; 3] = [
        HazardAgent::Ruido,
        HazardAgent::Vibracao,
        HazardAgent::Calor,
    ];

    /// Agents offered by this variant's selector, in menu order.
    pub fn agents(self) -> &'static [HazardAgent] {
        match self {
            FormProfile::Full => &HazardAgent::ALL,
            FormProfile::Reduced => &Self::REDUCED_AGENTS,
        }
    }

    /// Whether the unit selector exists at all in this variant.
    pub fn has_vibration_units(self) -> bool {
        matches!(self, FormProfile::Full)
    }

    /// Whether the unit selector is shown for a row with this agent.
    pub fn unit_selector_visible(self, agente: Option<HazardAgent>) -> bool {
        self.has_vibration_units() && agente == Some(HazardAgent::Vibracao)
    }

    /// Intensity input step for a row with the given agent selected: finer
    /// for vibration when units are in play, 0.1 otherwise.
    pub fn intensity_step(self, agente: Option<HazardAgent>) -> f64 {
        if self.unit_selector_visible(agente) {
            0.01
        } else {
            0.1
        }
    }

    /// Parse a configuration value ("full" / "reduced").
    pub fn parse(value: &str) -> Option<FormProfile> {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" => Some(FormProfile::Full),
            "reduced" => Some(FormProfile::Reduced),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FormProfile::Full => "full",
            FormProfile::Reduced => "reduced",
        }
    }
}
