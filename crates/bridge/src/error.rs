use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    Status(reqwest::StatusCode),

    #[error("{0}")]
    Application(String),

    #[error("No device with index {0}")]
    NotFound(u32),
}

impl ApiError {
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Transport(_) => {
                "Network error. Check that the bridge server is running.".to_string()
            }
            ApiError::Status(status) => format!("HTTP error! status: {status}"),
            ApiError::Application(msg) => msg.clone(),
            ApiError::NotFound(index) => format!("No device with index {index}"),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_errors_surface_the_backend_message() {
        let err = ApiError::Application("Failed to connect to device server".to_string());
        assert_eq!(err.user_message(), "Failed to connect to device server");
    }

    #[test]
    fn status_errors_fall_back_to_a_generic_message() {
        let err = ApiError::Status(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(err.user_message(), "HTTP error! status: 502 Bad Gateway");
    }
}
