use thiserror::Error;

pub const MIN_CAR_YEAR: i32 = 1980;
pub const MIN_TEXT_LEN: usize = 3;
pub const MAX_TEXT_LEN: usize = 20;
pub const TAX_ID_DIGITS: usize = 11;
pub const MIN_PHONE_DIGITS: usize = 10;

/// A draft rejected before any request is sent. The message is shown as is.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Fill in all the form fields")]
    MissingFields,
    #[error("The car year must be a number")]
    YearNotNumeric,
    #[error("The car year must be between 1980 and {max}")]
    YearOutOfRange { max: i32 },
    #[error("Car color, brand and model must have between 3 and 20 characters")]
    TextLength,
    #[error("Invalid CPF!")]
    InvalidTaxId,
    #[error("Invalid phone number!")]
    InvalidPhone,
    #[error("The order amount must be a number")]
    AmountNotNumeric,
}
