use super::Client;

/// HTTP verbs supported by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
        };
        write!(f, "{}", name)
    }
}

/// A pre-built REST call: verb, target url and an optional body.
///
/// The verb is carried explicitly so that dispatch is a single match,
/// never an inspection of the request value itself.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    verb: Verb,
    url: String,
    body: Option<String>,
    content_type: Option<String>,
}

impl ApiRequest {
    fn new(verb: Verb, url: impl Into<String>) -> Self {
        Self {
            verb,
            url: url.into(),
            body: None,
            content_type: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Verb::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Verb::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Verb::Put, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Verb::Patch, url)
    }

    pub fn with_body(mut self, body: impl Into<String>, content_type: &str) -> Self {
        self.body = Some(body.into());
        self.content_type = Some(content_type.to_owned());
        self
    }

    pub fn with_json_body(self, body: impl Into<String>) -> Self {
        self.with_body(body, "application/json")
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub(super) fn into_builder(self, client: &Client) -> reqwest::RequestBuilder {
        let builder = match self.verb {
            Verb::Get => client.client.get(&self.url),
            Verb::Post => client.client.post(&self.url),
            Verb::Put => client.client.put(&self.url),
            Verb::Patch => client.client.patch(&self.url),
        };
        let builder = match self.content_type {
            Some(content_type) => builder.header("Content-Type", content_type),
            None => builder,
        };
        match self.body {
            Some(body) => builder.body(body),
            None => builder,
        }
    }
}
