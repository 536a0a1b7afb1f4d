use thiserror::Error;

#[derive(Error, Debug)]
pub enum BondError {
    /// Inputs that would produce a degenerate valuation: a vanishing
    /// discount denominator, an unrepresentable period count, or a
    /// non-positive face value in a rate back-calculation.
    #[error("Invalid bond parameters: {0}")]
    InvalidParameters(String),
}
