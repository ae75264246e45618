use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Size specification is empty")]
    Empty,

    #[error("Size specification '{spec}' must start with a digit")]
    MissingDigits { spec: String },

    #[error("Size specification '{spec}' has invalid character {found:?} at position {position}")]
    InvalidCharacter {
        spec: String,
        position: usize,
        found: char,
    },

    #[error("Size specification '{spec}' has trailing characters after the unit")]
    TrailingCharacters { spec: String },

    #[error("Size specification '{spec}' does not fit in 64 bits")]
    Overflow { spec: String },

    #[error("Size specification '{spec}' must be greater than zero")]
    Zero { spec: String },
}
