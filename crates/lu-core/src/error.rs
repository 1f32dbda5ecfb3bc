use thiserror::Error;

pub type LuResult<T> = Result<T, LuError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LuError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Length mismatch for {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported integration order {order} (expected 1 or 2)")]
    UnsupportedOrder { order: u8 },
}
