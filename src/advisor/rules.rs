//! Static business rules: notes for raw material and single-use plastic,
//! waste tiers and the low-grade material override.

use crate::advisor::model::{RawMaterial, SingleUse, Suggestions, Tier, Verdict};

pub const HIGH_WASTE_LIMIT: f64 = 400.0;
pub const SAFE_WASTE_LIMIT: f64 = 150.0;
pub const LOW_WASTE_LIMIT: f64 = 50.0;

pub const LOW_GRADE_WARNING: &str = "Not recommended to use 'average' or 'worst' raw materials. Consider using 'good', 'better', or 'best' raw materials for better results.";
pub const BEST_GRADE_NOTE: &str =
    "Best quality material used, continue with current strategy.";
pub const GOOD_GRADE_NOTE: &str =
    "Good quality materials, consider upgrading to 'best' for better sustainability.";

pub const SINGLE_USE_YES: &str = "Single-use plastic is recommended for manufacturing. Please ensure proper disposal and recycling processes. However, consider alternatives as single-use plastic usage is increasingly restricted globally under laws such as the EU Plastics Strategy.";
pub const SINGLE_USE_NO: &str = "Single-use plastic is not recommended. It cannot be reused and poses environmental challenges. Consider alternatives as many countries have banned or restricted single-use plastic under laws such as the Plastic Waste Management Rules in India or the EU Directive on Single-Use Plastics.";

pub const LOW_GRADE_STATUS: &str = "Not recommended for manufacturing";
pub const LOW_GRADE_MESSAGE: &str = "The raw material is of low quality ('average' or 'worst'). It's advised to improve material quality before manufacturing in compliance with sustainability practices and regulations.";

const NOT_RECOMMENDED: Verdict = Verdict {
    tier: Tier::NotRecommended,
    status: "Manufacturing not recommended",
    message: "Plastic waste exceeds the threshold as per environmental regulations like the EU Waste Framework Directive!",
    suggestions: Suggestions {
        immediate_actions: Some(&[
            "Consider using biodegradable or recyclable materials in compliance with the EU Plastics Strategy.",
            "Reduce production volume to minimize waste, as per the Plastic Waste Management Rules 2016 in India.",
            "Switch to more sustainable raw materials to adhere to environmental guidelines.",
        ]),
        cost_reduction: Some(&[
            "Optimize production processes to reduce waste and energy consumption, in line with Sustainability Standards.",
            "Review machinery for potential energy savings and process efficiency improvements.",
        ]),
        profit_suggestions: None,
        operational_efficiency: None,
        sustainability: None,
    },
};

const SAFE_LIMITS: Verdict = Verdict {
    tier: Tier::SafeLimits,
    status: "Manufacturing allowed within safe limits",
    message: "Plastic waste within safe limits according to National/Local Waste Management Regulations.",
    suggestions: Suggestions {
        immediate_actions: None,
        cost_reduction: None,
        profit_suggestions: Some(&[
            "Focus on increasing sales and marketing to expand reach.",
            "Negotiate for better pricing with raw material suppliers.",
        ]),
        operational_efficiency: Some(&[
            "Review production processes for optimization opportunities.",
            "Invest in machinery upgrades to improve efficiency and reduce emissions.",
        ]),
        sustainability: None,
    },
};

const CAUTION: Verdict = Verdict {
    tier: Tier::Caution,
    status: "Manufacturing approved with caution",
    message: "Plastic waste is moderate. Caution required as per environmental guidelines.",
    suggestions: Suggestions {
        immediate_actions: Some(&[
            "Monitor waste closely to avoid exceeding the limits set by Environmental Standards.",
            "Investigate alternative materials to reduce plastic dependency.",
        ]),
        cost_reduction: Some(&[
            "Review operational efficiency to minimize waste and adhere to sustainable practices.",
            "Consider using more sustainable raw materials to comply with Government Sustainability Goals.",
        ]),
        profit_suggestions: None,
        operational_efficiency: None,
        sustainability: None,
    },
};

const HIGHLY_PROFITABLE: Verdict = Verdict {
    tier: Tier::HighlyProfitable,
    status: "Highly profitable manufacturing",
    message: "Plastic waste is minimal, highly profitable manufacturing with minimal environmental impact.",
    suggestions: Suggestions {
        immediate_actions: None,
        cost_reduction: None,
        profit_suggestions: Some(&[
            "Increase production volume to maximize profits while keeping environmental impact low.",
            "Consider entering new markets for your product.",
        ]),
        operational_efficiency: None,
        sustainability: Some(&[
            "Promote your product's eco-friendly manufacturing process in line with Global Sustainability Goals.",
            "Use best quality materials to maintain environmental benefits and avoid future regulatory penalties.",
        ]),
    },
};

/// Note attached for a declared raw-material grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialNote {
    Warning(&'static str),
    Suggestion(&'static str),
}

/// `Better` is the only grade that yields no note.
pub fn raw_material_note(grade: RawMaterial) -> Option<MaterialNote> {
    match grade {
        RawMaterial::Average | RawMaterial::Worst => Some(MaterialNote::Warning(LOW_GRADE_WARNING)),
        RawMaterial::Best => Some(MaterialNote::Suggestion(BEST_GRADE_NOTE)),
        RawMaterial::Good => Some(MaterialNote::Suggestion(GOOD_GRADE_NOTE)),
        RawMaterial::Better => None,
    }
}

pub fn single_use_note(single_use: SingleUse) -> &'static str {
    match single_use {
        SingleUse::Yes => SINGLE_USE_YES,
        SingleUse::No => SINGLE_USE_NO,
    }
}

pub fn total_waste(per_unit: f64, quantity: u64) -> f64 {
    per_unit * quantity as f64
}

/// Upper bounds are inclusive: 400 is still within safe limits.
pub fn classify(total_waste: f64) -> Tier {
    if total_waste > HIGH_WASTE_LIMIT {
        Tier::NotRecommended
    } else if total_waste > SAFE_WASTE_LIMIT {
        Tier::SafeLimits
    } else if total_waste > LOW_WASTE_LIMIT {
        Tier::Caution
    } else {
        Tier::HighlyProfitable
    }
}

pub fn verdict(tier: Tier) -> Verdict {
    match tier {
        Tier::NotRecommended => NOT_RECOMMENDED,
        Tier::SafeLimits => SAFE_LIMITS,
        Tier::Caution => CAUTION,
        Tier::HighlyProfitable => HIGHLY_PROFITABLE,
    }
}

/// Tier verdict for `total_waste`, with status and message replaced when the
/// raw material is low grade. The tier's suggestions are kept.
pub fn assess(total_waste: f64, raw_material: Option<RawMaterial>) -> Verdict {
    let mut verdict = verdict(classify(total_waste));
    if raw_material.is_some_and(RawMaterial::is_low_grade) {
        verdict.status = LOW_GRADE_STATUS;
        verdict.message = LOW_GRADE_MESSAGE;
    }
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(classify(400.5), Tier::NotRecommended);
        assert_eq!(classify(400.0), Tier::SafeLimits);
        assert_eq!(classify(150.01), Tier::SafeLimits);
        assert_eq!(classify(150.0), Tier::Caution);
        assert_eq!(classify(50.5), Tier::Caution);
        assert_eq!(classify(50.0), Tier::HighlyProfitable);
        assert_eq!(classify(0.0), Tier::HighlyProfitable);
    }

    #[test]
    fn total_is_per_unit_times_quantity() {
        assert_eq!(total_waste(100.0, 5), 500.0);
        assert_eq!(total_waste(0.25, 8), 2.0);
    }

    #[test]
    fn low_grade_overrides_every_tier() {
        for waste in [1000.0, 300.0, 100.0, 10.0] {
            for grade in [RawMaterial::Average, RawMaterial::Worst] {
                let v = assess(waste, Some(grade));
                assert_eq!(v.status, LOW_GRADE_STATUS);
                assert_eq!(v.message, LOW_GRADE_MESSAGE);
                assert_eq!(v.tier, classify(waste));
                assert_eq!(v.suggestions, verdict(classify(waste)).suggestions);
            }
        }
    }

    #[test]
    fn other_grades_keep_tier_texts() {
        for grade in [None, Some(RawMaterial::Good), Some(RawMaterial::Better), Some(RawMaterial::Best)] {
            assert_eq!(assess(500.0, grade), NOT_RECOMMENDED);
        }
    }

    #[test]
    fn better_grade_is_silent() {
        assert_eq!(raw_material_note(RawMaterial::Better), None);
        assert_eq!(
            raw_material_note(RawMaterial::Worst),
            Some(MaterialNote::Warning(LOW_GRADE_WARNING))
        );
        assert_eq!(
            raw_material_note(RawMaterial::Good),
            Some(MaterialNote::Suggestion(GOOD_GRADE_NOTE))
        );
    }

    #[test]
    fn tiers_use_their_own_categories() {
        let safe = verdict(Tier::SafeLimits).suggestions;
        assert!(safe.immediate_actions.is_none());
        assert_eq!(safe.profit_suggestions.map(<[_]>::len), Some(2));

        let high = verdict(Tier::NotRecommended).suggestions;
        assert_eq!(high.immediate_actions.map(<[_]>::len), Some(3));
    }
}
