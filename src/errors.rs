use thiserror::Error;

/// Error type for edit-cost configuration and method execution.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GedError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid metric name `{name}` (available: {available})")]
    InvalidMetricName { name: String, available: String },
    #[error("type mismatch for `{key}`: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: String,
    },
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
    #[error("missing attribute `{0}`")]
    MissingAttribute(String),
    #[error("unknown option `{option}`; valid options are: {valid_options}")]
    UnknownOption {
        option: String,
        valid_options: String,
    },
    #[error("malformed option string: {0}")]
    MalformedOptionString(String),
    #[error("invalid value `{value}` for option `{option}`: {reason}")]
    InvalidOptionValue {
        option: String,
        value: String,
        reason: String,
    },
    #[error("graph not found: {0}")]
    GraphNotFound(usize),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl GedError {
    pub fn configuration<T: Into<String>>(msg: T) -> Self {
        GedError::Configuration(msg.into())
    }

    pub fn type_mismatch<K: Into<String>, F: Into<String>>(
        key: K,
        expected: &'static str,
        found: F,
    ) -> Self {
        GedError::TypeMismatch {
            key: key.into(),
            expected,
            found: found.into(),
        }
    }

    pub fn degenerate<T: Into<String>>(msg: T) -> Self {
        GedError::DegenerateInput(msg.into())
    }

    pub fn missing_attribute<T: Into<String>>(key: T) -> Self {
        GedError::MissingAttribute(key.into())
    }

    pub fn malformed_options<T: Into<String>>(msg: T) -> Self {
        GedError::MalformedOptionString(msg.into())
    }

    pub fn invalid_option_value<O, V, R>(option: O, value: V, reason: R) -> Self
    where
        O: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        GedError::InvalidOptionValue {
            option: option.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        GedError::InvalidInput(msg.into())
    }

    /// True for errors raised while configuring a cost model or a method.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            GedError::Configuration(_)
                | GedError::InvalidMetricName { .. }
                | GedError::TypeMismatch { .. }
                | GedError::UnknownOption { .. }
                | GedError::MalformedOptionString(_)
                | GedError::InvalidOptionValue { .. }
        )
    }
}
