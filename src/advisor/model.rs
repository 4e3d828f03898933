use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw-material grade declared by the manufacturer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawMaterial {
    Good,
    Better,
    Best,
    Average,
    Worst,
}

impl RawMaterial {
    /// Unknown grades yield `None` and attach no note.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "good" => Some(Self::Good),
            "better" => Some(Self::Better),
            "best" => Some(Self::Best),
            "average" => Some(Self::Average),
            "worst" => Some(Self::Worst),
            _ => None,
        }
    }

    pub fn is_low_grade(self) -> bool {
        matches!(self, Self::Average | Self::Worst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleUse {
    Yes,
    No,
}

impl SingleUse {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(Self::Yes),
            "no" => Some(Self::No),
            _ => None,
        }
    }
}

/// Body of `POST /predict`.
///
/// `quantity` stays raw until the engine validates it, so that an unloaded
/// catalog is reported before a malformed quantity.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AdvisoryRequest {
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub raw_material: Option<String>,
    #[serde(default)]
    pub single_use: Option<String>,
}

impl AdvisoryRequest {
    pub fn new(product: impl Into<String>, quantity: impl Into<Value>) -> Self {
        Self {
            product: Some(product.into()),
            quantity: Some(quantity.into()),
            ..Default::default()
        }
    }

    pub fn with_raw_material(mut self, raw_material: impl Into<String>) -> Self {
        self.raw_material = Some(raw_material.into());
        self
    }

    pub fn with_single_use(mut self, single_use: impl Into<String>) -> Self {
        self.single_use = Some(single_use.into());
        self
    }
}

/// Severity bands for the total waste of a production run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Above 400.
    NotRecommended,
    /// Above 150 up to 400.
    SafeLimits,
    /// Above 50 up to 150.
    Caution,
    /// 50 or less.
    HighlyProfitable,
}

/// Recommendation lists keyed by category; empty categories are omitted.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Suggestions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub immediate_actions: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_reduction: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_suggestions: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operational_efficiency: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sustainability: Option<&'static [&'static str]>,
}

/// Outcome of classifying a production run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub tier: Tier,
    pub status: &'static str,
    pub message: &'static str,
    pub suggestions: Suggestions,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelPrediction {
    pub production_allowed: bool,
}

/// Advisory payload. Every field is optional and only set by the rule that
/// triggers it.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct AdvisoryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_material_warning: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_material_suggestion: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_use_warning: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Suggestions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_prediction: Option<ModelPrediction>,
    #[serde(skip)]
    pub tier: Option<Tier>,
}

impl AdvisoryResponse {
    pub fn apply(&mut self, verdict: Verdict) {
        self.tier = Some(verdict.tier);
        self.status = Some(verdict.status);
        self.message = Some(verdict.message);
        self.suggestions = Some(verdict.suggestions);
    }
}
