use thiserror::Error;

pub mod data;
pub mod resource;
pub mod utils;

/// Failure signal of the remote data-access layer.
///
/// The REST server is reached over plain HTTP; every failure collapses into
/// one of three markers that the form layer maps to user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("Server error")]
    Server,
    #[error("404 - Not Found")]
    NotFound,
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_markers_render_exactly() {
        assert_eq!(DataError::Server.to_string(), "Server error");
        assert_eq!(DataError::NotFound.to_string(), "404 - Not Found");
        assert_eq!(
            DataError::Other("422 - Unprocessable".into()).to_string(),
            "422 - Unprocessable"
        );
    }
}
