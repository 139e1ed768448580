use std::fmt;

/// Classification of a failed request, keyed by the server's status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStatus {
    /// 401 - the download key does not match
    Unauthorized,
    /// 404 - unknown or expired file
    NotFound,
    /// 412 - body larger than the server accepts
    PayloadTooLarge,
    /// 429 - daily upload limit reached
    RateLimited,
    /// 431 - file name or MIME type too long
    HeaderFieldsTooLarge,
    /// 5xx
    ServerError(u16),
    /// Any other non-success status
    Other(u16),
    /// No response was received
    Transport,
    /// A response arrived but could not be understood
    MalformedResponse,
    /// The local file could not be read before sending
    FileUnreadable,
}

impl FailureStatus {
    pub fn from_code(code: u16) -> Self {
        match code {
            401 => FailureStatus::Unauthorized,
            404 => FailureStatus::NotFound,
            412 => FailureStatus::PayloadTooLarge,
            429 => FailureStatus::RateLimited,
            431 => FailureStatus::HeaderFieldsTooLarge,
            500..=599 => FailureStatus::ServerError(code),
            _ => FailureStatus::Other(code),
        }
    }

    /// HTTP status code, if the failure came with one
    pub fn code(&self) -> Option<u16> {
        match self {
            FailureStatus::Unauthorized => Some(401),
            FailureStatus::NotFound => Some(404),
            FailureStatus::PayloadTooLarge => Some(412),
            FailureStatus::RateLimited => Some(429),
            FailureStatus::HeaderFieldsTooLarge => Some(431),
            FailureStatus::ServerError(code) | FailureStatus::Other(code) => Some(*code),
            FailureStatus::Transport
            | FailureStatus::MalformedResponse
            | FailureStatus::FileUnreadable => None,
        }
    }

    /// Text shown to the user instead of raw technical detail
    pub fn description(&self) -> String {
        match self {
            FailureStatus::Unauthorized => "Unauthorized (Key wrong)".to_string(),
            FailureStatus::NotFound => "Resource not found".to_string(),
            FailureStatus::PayloadTooLarge => "Payload too large (File too large)".to_string(),
            FailureStatus::RateLimited => "Too many requests (Reached daily limit)".to_string(),
            FailureStatus::HeaderFieldsTooLarge => {
                "Request Header Fields Too Large (File name or MIME type too long)".to_string()
            }
            FailureStatus::ServerError(500) | FailureStatus::ServerError(502) => {
                "Internal server error".to_string()
            }
            FailureStatus::ServerError(code) | FailureStatus::Other(code) => {
                format!("An error occurred ({})", code)
            }
            FailureStatus::Transport => "Server not reachable".to_string(),
            FailureStatus::MalformedResponse => "Unexpected response from server".to_string(),
            FailureStatus::FileUnreadable => "Selected file could not be read".to_string(),
        }
    }
}

impl fmt::Display for FailureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Describe an error code taken from a route parameter.
///
/// Codes that are not numeric are echoed back verbatim.
pub fn describe_code(code: &str) -> String {
    match code.trim().parse::<u16>() {
        Ok(code) => FailureStatus::from_code(code).description(),
        Err(_) => format!("An error occurred ({})", code),
    }
}
