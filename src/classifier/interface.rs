pub trait Predictor {
    /// Whether a run of `quantity` units of `product` should be allowed.
    ///
    /// `waste_per_unit` is the catalog value, the same column the model was
    /// trained on.
    fn production_allowed(
        &self,
        product: &str,
        quantity: u64,
        waste_per_unit: f64,
    ) -> Result<bool, anyhow::Error>;
}
