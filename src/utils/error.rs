use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("DNS lookup failed: {0}")]
    DnsError(#[from] hickory_resolver::ResolveError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Not an object")]
    NotAnObject,

    #[error("Not an array")]
    NotAnArray,

    #[error("NaN: '{value}' is not a number")]
    NotANumber { value: String },

    #[error("'{value}' is out of range, only numbers between -{max} and {max} are accepted", max = i64::MAX)]
    NumberOutOfRange { value: String },

    #[error("Invalid hex color: '{value}'")]
    InvalidColor { value: String },

    #[error("Decode error: {message}")]
    DecodeError { message: String },
}

impl RecipeError {
    pub fn is_network(&self) -> bool {
        matches!(self, RecipeError::HttpError(_) | RecipeError::DnsError(_))
    }

    pub fn is_input(&self) -> bool {
        matches!(
            self,
            RecipeError::NotAnObject
                | RecipeError::NotAnArray
                | RecipeError::NotANumber { .. }
                | RecipeError::NumberOutOfRange { .. }
                | RecipeError::InvalidColor { .. }
                | RecipeError::DecodeError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RecipeError>;
