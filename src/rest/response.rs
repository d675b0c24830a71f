use serde::Deserialize;

/// Content format of a response body, inferred from its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    JsonObject,
    JsonArray,
    Xml,
    Unknown,
}

impl BodyFormat {
    pub fn detect(body: &str) -> Self {
        match body.as_bytes().first() {
            Some(b'{') => BodyFormat::JsonObject,
            Some(b'[') => BodyFormat::JsonArray,
            Some(b'<') => BodyFormat::Xml,
            _ => BodyFormat::Unknown,
        }
    }
}

/// OAuth style error body returned by authorization servers on failure.
///
/// A body without an `error` code is not a recognized OAuth error, even
/// when it is a well formed JSON object.
#[derive(Debug, Deserialize, PartialEq)]
pub struct OAuthErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Failure raised for any response status outside {200, 201}.
#[derive(Debug, PartialEq)]
pub enum AuthenticationError {
    OAuth {
        status: u16,
        error: String,
        error_description: Option<String>,
    },
    Raw {
        status: u16,
        body: String,
    },
}

impl AuthenticationError {
    pub(super) fn from_body(status: u16, body: &str) -> Self {
        if let BodyFormat::JsonObject = BodyFormat::detect(body) {
            if let Ok(OAuthErrorResponse {
                error: Some(error),
                error_description,
            }) = serde_json::from_str(body)
            {
                return AuthenticationError::OAuth {
                    status,
                    error,
                    error_description,
                };
            }
        }
        AuthenticationError::Raw {
            status,
            body: body.to_owned(),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            AuthenticationError::OAuth { status, .. } => *status,
            AuthenticationError::Raw { status, .. } => *status,
        }
    }

    pub fn error_code(&self) -> Option<&str> {
        match self {
            AuthenticationError::OAuth { error, .. } => Some(error.as_str()),
            AuthenticationError::Raw { .. } => None,
        }
    }
}
