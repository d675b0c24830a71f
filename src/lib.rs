//! Bearer token REST execution with typed response decoding
//!
//! - executes GET/POST/PUT/PATCH calls against an OAuth protected API
//! - decodes JSON response bodies into a caller chosen type, with a fallback to flat XML bodies
//! - surfaces OAuth style error bodies (`error`/`error_description`) as structured authentication errors
//! - keeps the last raw body and status code for post call inspection
//!
//! Timeouts, retries, pooling and TLS all belong to the caller supplied client.
//!
//! # Quick Start
//! ```rust,no_run
//! use api_executor::{ApiExecutor, ApiRequest, Client};
//!
//! #[derive(Debug, serde::Deserialize)]
//! struct UserInfo {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::default();
//!     let mut executor = ApiExecutor::<UserInfo>::new("access_token");
//!
//!     let user = executor
//!         .execute(&client, ApiRequest::get("https://api.example.com/users/1"))
//!         .await
//!         .unwrap();
//!
//!     println!("{:?}", user);
//! }
//! ```
mod rest;

pub use rest::executor::ApiExecutor;
pub use rest::request::{ApiRequest, Verb};
pub use rest::response::{AuthenticationError, BodyFormat, OAuthErrorResponse};
pub use rest::{ApiResult, Client, Error};
