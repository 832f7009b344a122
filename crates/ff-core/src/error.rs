use thiserror::Error;

pub type FfResult<T> = Result<T, FfError>;

#[derive(Error, Debug)]
pub enum FfError {
    #[error("Invalid field value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
