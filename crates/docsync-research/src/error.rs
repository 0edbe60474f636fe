//! Error types for external calls

use std::path::PathBuf;

/// Failure of one external call
///
/// Callers log these and carry on with partial data.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure, timeout or undecodable body
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status code
    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Success status but no usable content
    #[error("{0} returned an empty response")]
    EmptyResponse(&'static str),

    /// Local persistence of a response failed
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization failure
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convert a response into an error unless its status is a success
pub(crate) fn check_status(
    service: &'static str,
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ClientError::Status {
        service,
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        let err = ClientError::Status {
            service: "GitHub",
            status: 403,
            body: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "GitHub returned 403: rate limited");
        assert_eq!(
            ClientError::EmptyResponse("Anthropic").to_string(),
            "Anthropic returned an empty response"
        );
    }
}
