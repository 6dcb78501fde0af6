use thiserror::Error;

pub type KfResult<T> = Result<T, KfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },

    #[error("{layer} error: {message}")]
    Layer {
        layer: &'static str,
        message: String,
    },
}
