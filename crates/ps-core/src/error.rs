use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Time grid is not ordered: t[{index}]={value} < t[{prev_index}]={prev}")]
    Unordered {
        index: usize,
        value: f64,
        prev_index: usize,
        prev: f64,
    },
}
