pub mod engine;
pub mod model;
pub mod rules;

pub use engine::{Advisor, parse_quantity};
pub use model::{AdvisoryRequest, AdvisoryResponse, RawMaterial, SingleUse, Tier, Verdict};
