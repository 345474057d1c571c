use thiserror::Error;

use common::DataError;
use models::errors::ModelError;

/// User-facing outcome of a failed form operation. The first three variants
/// are the fixed three-way taxonomy over the remote failure markers; the
/// rendered strings are what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Could not connect to REST server. Please check your configuration details")]
    Connection,
    #[error("404 - Could not find API route. Please check your available APIs.")]
    ApiRoute,
    #[error("{0}")]
    Remote(String),
    #[error("validation error: {0}")]
    Validation(String),
}

impl From<DataError> for FormError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Server => FormError::Connection,
            DataError::NotFound => FormError::ApiRoute,
            DataError::Other(message) => FormError::Remote(message),
        }
    }
}

impl From<ModelError> for FormError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(message) => FormError::Validation(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_remote_markers_to_user_messages() {
        assert_eq!(
            FormError::from(DataError::Server).to_string(),
            "Could not connect to REST server. Please check your configuration details"
        );
        assert_eq!(
            FormError::from(DataError::NotFound).to_string(),
            "404 - Could not find API route. Please check your available APIs."
        );
        assert_eq!(
            FormError::from(DataError::Other("boom".into())).to_string(),
            "boom"
        );
    }
}
