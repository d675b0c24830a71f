use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tracing::{debug, error, info, trace};

use super::request::ApiRequest;
use super::response::{AuthenticationError, BodyFormat};
use super::{ApiResult, Client, Error};

/// Executes REST calls against a bearer token protected API and unmarshals
/// the JSON response body into `T`, with a fallback to flat XML bodies.
///
/// The raw body and status code of the last call are kept on the executor
/// for post call inspection. `execute` takes `&mut self`, so one executor
/// serves one logical call sequence at a time.
pub struct ApiExecutor<T> {
    auth_token: String,
    last_response_body: String,
    http_result_code: u16,
    response_type: PhantomData<T>,
}

impl<T> ApiExecutor<T>
where
    T: DeserializeOwned,
{
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            last_response_body: String::new(),
            http_result_code: 0,
            response_type: PhantomData,
        }
    }

    /// Sends the request with an `Authorization: Bearer <token>` header and
    /// decodes the response.
    ///
    /// Returns `Ok(None)` for a 201 acknowledgement without a body, or when
    /// a 2xx body parses as neither JSON nor XML. Any status outside
    /// {200, 201} fails with [`Error::Authentication`]; transport failures
    /// surface as [`Error::HttpError`].
    pub async fn execute(&mut self, client: &Client, request: ApiRequest) -> ApiResult<Option<T>> {
        let url = request.url().to_owned();
        let response = request
            .into_builder(client)
            .bearer_auth(&self.auth_token)
            .send()
            .await
            .map_err(Error::HttpError)?;

        let status = response.status();
        info!("{}", status);

        let code = status.as_u16();
        let body = response.text().await.map_err(Error::HttpError)?;

        self.http_result_code = code;
        self.last_response_body = body.clone();

        match code {
            200 => Ok(self.decode_success(&body)),
            201 if !body.is_empty() => Ok(self.decode_success(&body)),
            // Upload acknowledged without a body
            201 => Ok(None),
            _ => {
                info!("{}", url);
                Err(Error::Authentication(AuthenticationError::from_body(
                    code, &body,
                )))
            }
        }
    }

    fn decode_success(&self, body: &str) -> Option<T> {
        match serde_json::from_str(body) {
            Ok(value) => Some(value),
            Err(err) => {
                if let BodyFormat::Xml = BodyFormat::detect(body) {
                    match quick_xml::de::from_str(body) {
                        Ok(value) => Some(value),
                        Err(xml_err) => {
                            error!("unable to parse XML: {}", xml_err);
                            None
                        }
                    }
                } else {
                    log_decode_failure(body, &err);
                    None
                }
            }
        }
    }

    /// Re-decodes a previously fetched body as JSON without a new call.
    pub fn parse_body(&self, body: &str) -> ApiResult<T> {
        if body.is_empty() {
            return Err(Error::EmptyBody);
        }
        serde_json::from_str(body).map_err(Error::deserialization_error::<T>)
    }

    pub fn last_response_body(&self) -> &str {
        self.last_response_body.as_str()
    }

    pub fn http_result_code(&self) -> u16 {
        self.http_result_code
    }
}

/// Emits decode diagnostics at three levels of detail: the error itself,
/// the body from just before the failure offset, and the full body.
/// Advisory only.
fn log_decode_failure(body: &str, err: &serde_json::Error) {
    if err.line() > 0 && err.column() > 0 {
        let offset = failure_offset(body, err.line(), err.column());
        let start = context_start(body, offset);
        error!("{}", err);
        debug!("{}", &body[start..]);
        trace!("{}", body);
    } else {
        trace!("{}", body);
        error!("{}", err);
    }
}

/// Byte offset in `body` of the 1-based line/column position reported by
/// the JSON decoder, capped at the end of the line.
fn failure_offset(body: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (number, content) in body.split('\n').enumerate() {
        if number + 1 == line {
            return offset + column.saturating_sub(1).min(content.len());
        }
        offset += content.len() + 1;
    }
    body.len()
}

/// Backs the failure offset up by 50 characters of context, clamped at
/// zero and snapped to a char boundary.
fn context_start(body: &str, offset: usize) -> usize {
    let mut start = offset.saturating_sub(50);
    while !body.is_char_boundary(start) {
        start -= 1;
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct JobStatus {
        id: u64,
        state: String,
    }

    #[test]
    fn test_parse_body() {
        let executor = ApiExecutor::<JobStatus>::new("token");
        let actual = executor
            .parse_body(r#"{"id":7,"state":"Closed"}"#)
            .unwrap();

        assert_eq!(
            JobStatus {
                id: 7,
                state: "Closed".to_owned()
            },
            actual
        );
    }

    #[test]
    fn test_parse_body_empty() {
        let executor = ApiExecutor::<JobStatus>::new("token");

        assert!(matches!(executor.parse_body(""), Err(Error::EmptyBody)));
    }

    #[test]
    fn test_parse_body_malformed() {
        let executor = ApiExecutor::<JobStatus>::new("token");

        assert!(matches!(
            executor.parse_body("{not json"),
            Err(Error::DeserializationError { .. })
        ));
    }

    #[test]
    fn test_decode_success_json() {
        let executor = ApiExecutor::<JobStatus>::new("token");
        let actual = executor.decode_success(r#"{"id":1,"state":"Open"}"#);

        assert_eq!(
            Some(JobStatus {
                id: 1,
                state: "Open".to_owned()
            }),
            actual
        );
    }

    #[test]
    fn test_decode_success_xml_fallback() {
        let executor = ApiExecutor::<JobStatus>::new("token");
        let actual =
            executor.decode_success("<response><id>1</id><state>Open</state></response>");

        assert_eq!(
            Some(JobStatus {
                id: 1,
                state: "Open".to_owned()
            }),
            actual
        );
    }

    #[test]
    fn test_decode_success_unparseable_is_swallowed() {
        let executor = ApiExecutor::<JobStatus>::new("token");

        assert_eq!(None, executor.decode_success("plain text, not a document"));
    }

    #[test]
    fn test_decode_success_broken_xml_is_swallowed() {
        let executor = ApiExecutor::<JobStatus>::new("token");

        assert_eq!(None, executor.decode_success("<response><id>oops</id>"));
    }

    #[test]
    fn test_failure_offset_first_line() {
        assert_eq!(0, failure_offset(r#"{"id":1}"#, 1, 1));
        assert_eq!(6, failure_offset(r#"{"id":x}"#, 1, 7));
    }

    #[test]
    fn test_failure_offset_later_line() {
        let body = "{\n  \"id\": x\n}";

        assert_eq!(2 + 9, failure_offset(body, 2, 10));
    }

    #[test]
    fn test_failure_offset_out_of_range() {
        let body = r#"{"id":1}"#;

        assert_eq!(body.len(), failure_offset(body, 9, 1));
        assert_eq!(body.len(), failure_offset(body, 1, 99));
    }

    #[test]
    fn test_context_start_clamped_at_zero() {
        assert_eq!(0, context_start("short", 3));
    }

    #[test]
    fn test_context_start_backs_up_fifty() {
        let body = "x".repeat(100);

        assert_eq!(30, context_start(&body, 80));
    }

    #[test]
    fn test_context_start_snaps_to_char_boundary() {
        let body = "é".repeat(40);
        let start = context_start(&body, 61);

        assert!(body.is_char_boundary(start));
        assert_eq!(10, start);
    }
}
