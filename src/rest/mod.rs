pub mod executor;
pub mod request;
pub mod response;

pub struct Client {
    pub(self) client: reqwest::Client,
}

impl Default for Client {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl From<reqwest::Client> for Client {
    fn from(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[derive(Debug)]
pub enum Error {
    Authentication(response::AuthenticationError),
    HttpError(reqwest::Error),
    DeserializationError {
        expected_type: String,
        error: serde_json::Error,
    },
    EmptyBody,
}

impl Error {
    pub fn deserialization_error<T>(error: serde_json::Error) -> Error {
        let expected_type = std::any::type_name::<T>().to_owned();
        Error::DeserializationError {
            expected_type,
            error,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
impl std::error::Error for Error {}

pub type ApiResult<T> = std::result::Result<T, Error>;
