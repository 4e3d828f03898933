use crate::advisor::model::{
    AdvisoryRequest, AdvisoryResponse, ModelPrediction, RawMaterial, SingleUse,
};
use crate::advisor::rules::{self, MaterialNote};
use crate::catalog::Catalog;
use crate::classifier::{Predictor, RandomForest};
use crate::error::AdvisoryError;
use crate::utils::funcs::normalize_product;
use serde_json::Value;

/// Produces advisories from a catalog and, when asked to, a production
/// classifier.
pub struct Advisor<C: Catalog, P: Predictor = RandomForest> {
    catalog: C,
    predictor: Option<P>,
    consult_model: bool,
}

impl<C: Catalog> Advisor<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            predictor: None,
            consult_model: false,
        }
    }
}

impl<C: Catalog, P: Predictor> Advisor<C, P> {
    /// Attaches a classifier. With `consult_model` off it is kept but never
    /// called; with it on every tiered advisory carries its prediction and a
    /// missing classifier fails every request.
    pub fn with_predictor<Q: Predictor>(self, predictor: Option<Q>, consult_model: bool) -> Advisor<C, Q> {
        Advisor {
            catalog: self.catalog,
            predictor,
            consult_model,
        }
    }

    pub fn has_predictor(&self) -> bool {
        self.predictor.is_some()
    }

    pub fn consults_model(&self) -> bool {
        self.consult_model
    }

    pub fn advise(&self, request: &AdvisoryRequest) -> Result<AdvisoryResponse, AdvisoryError> {
        if !self.catalog.is_available() {
            return Err(AdvisoryError::CatalogUnavailable);
        }
        let predictor = match (&self.predictor, self.consult_model) {
            (Some(p), true) => Some(p),
            (None, true) => return Err(AdvisoryError::ModelUnavailable),
            (_, false) => None,
        };

        let quantity = parse_quantity(request.quantity.as_ref())?;
        let product = normalize_product(request.product.as_deref().unwrap_or_default());
        let raw_material = request.raw_material.as_deref().and_then(RawMaterial::parse);
        let single_use = request.single_use.as_deref().and_then(SingleUse::parse);

        tracing::debug!(%product, quantity, ?raw_material, ?single_use, "advisory request");

        let mut response = AdvisoryResponse::default();

        match raw_material.and_then(rules::raw_material_note) {
            Some(MaterialNote::Warning(note)) => response.raw_material_warning = Some(note),
            Some(MaterialNote::Suggestion(note)) => response.raw_material_suggestion = Some(note),
            None => {}
        }

        if let Some(single_use) = single_use {
            response.single_use_warning = Some(rules::single_use_note(single_use));
        }

        if product.is_empty() {
            return Ok(response);
        }

        let per_unit = self.catalog.lookup(&product)?;
        if quantity == 0 {
            return Ok(response);
        }

        let total_waste = rules::total_waste(per_unit, quantity);
        if !total_waste.is_finite() {
            return Err(AdvisoryError::Internal(format!(
                "total plastic waste for {quantity} x '{product}' is not a finite number"
            )));
        }

        response.apply(rules::assess(total_waste, raw_material));

        if let Some(predictor) = predictor {
            let production_allowed = predictor
                .production_allowed(&product, quantity, per_unit)
                .map_err(|e| AdvisoryError::Internal(format!("{e:#}")))?;
            response.model_prediction = Some(ModelPrediction { production_allowed });
        }

        Ok(response)
    }
}

/// Accepts integers, integer strings and non-negative floats, which are
/// truncated toward zero. Absent or null means zero.
pub fn parse_quantity(raw: Option<&Value>) -> Result<u64, AdvisoryError> {
    let invalid = |detail: String| Err(AdvisoryError::InvalidQuantity(detail));

    match raw {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => {
            if let Some(q) = n.as_u64() {
                return Ok(q);
            }
            match n.as_f64() {
                Some(f) if f < 0.0 => invalid(format!("{n} is negative")),
                Some(f) if f.is_finite() && f <= u64::MAX as f64 => Ok(f.trunc() as u64),
                _ => invalid(format!("{n} is out of range")),
            }
        }
        Some(Value::String(s)) => {
            let s = s.trim();
            match s.parse::<u64>() {
                Ok(q) => Ok(q),
                Err(_) if s.parse::<i64>().is_ok() => invalid(format!("{s} is negative")),
                Err(_) => invalid(format!("'{s}' is not an integer")),
            }
        }
        Some(other) => invalid(format!("{other} is not an integer")),
    }
}
