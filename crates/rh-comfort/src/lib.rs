//! rh-comfort: predicted-mean-vote thermal comfort estimation.
//!
//! A [`Fanger`] model derives a comfort vote from fused air/radiant
//! temperature, humidity, clothing insulation, and metabolic rate. Model
//! failure is an ordinary error; callers degrade to
//! [`ComfortEstimate::unknown`] rather than aborting their tick.

pub mod estimate;
pub mod fanger;
pub mod scales;

pub use estimate::ComfortEstimate;
pub use fanger::{feels, Fanger};
pub use scales::{clothing, clothing_amount, metabolism, metabolism_rate, ResolvedFigure};

pub type ComfortResult<T> = Result<T, ComfortError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ComfortError {
    #[error("Implausible input: {what} = {value}")]
    ImplausibleInput { what: &'static str, value: f64 },

    #[error("Clothing surface balance failed to converge")]
    NonConvergence,
}
