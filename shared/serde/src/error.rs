use thiserror::Error;

/// Errors that can occur while reading a serialized value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The reader ran out of bits before the value was complete
    #[error("Unexpected end of buffer after {bits_read} bits")]
    UnexpectedEnd { bits_read: usize },

    /// A variable-length integer did not terminate within 128 bits
    #[error("Variable-length integer exceeds 128 bits")]
    IntegerOverflow,

    /// A decoded integer does not fit into the requested type
    #[error("Value {value} is out of range for {target}")]
    OutOfRange { value: i128, target: &'static str },

    /// A string field did not contain valid UTF-8
    #[error("String field is not valid UTF-8")]
    InvalidUtf8,

    /// A map contained the same key twice
    #[error("Duplicate key in serialized map")]
    DuplicateKey,

    /// An enum discriminant is not known to this version
    #[error("Unknown {kind} discriminant {value}")]
    InvalidVariant { kind: &'static str, value: u64 },
}
