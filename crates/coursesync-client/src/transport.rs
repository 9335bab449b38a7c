//! Transport seam between the lesson view and the course service
//!
//! The app layer only sees the [`Transport`] trait. [`HttpTransport`] is the
//! production implementation on top of `reqwest`; tests use the scripted
//! transport from `test_utils`.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use url::Url;

use coursesync_core::prelude::*;
use coursesync_core::RemotePayload;

use crate::cancel::CancelHandle;
use crate::request::{ApiRequest, Method, RequestBody};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("coursesync/", env!("CARGO_PKG_VERSION"));

/// Issues remote requests on behalf of the lesson view.
///
/// Implementations should stop waiting once `cancel` is cancelled and return
/// [`Error::Cancelled`], but callers never rely on it: a result that arrives
/// for a cancelled handle is discarded upstream anyway.
#[trait_variant::make(Transport: Send)]
pub trait LocalTransport {
    /// Send one request and validate its response body.
    async fn request(&self, request: &ApiRequest, cancel: &CancelHandle) -> Result<RemotePayload>;
}

/// HTTP transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport for the service rooted at `base_url`.
    ///
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| Error::config(format!("invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "base URL '{base_url}' cannot carry a path"
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT_VALUE);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a request path against the base URL.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        self.base_url
            .join(&request.path())
            .map_err(|e| Error::transport(format!("invalid request path: {e}")))
    }

    async fn send(&self, request: &ApiRequest) -> Result<RemotePayload> {
        let url = self.url_for(request)?;
        let method = match request.method() {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        debug!("{} {} ({})", request.method(), url, request.description());

        let mut builder = self.client.request(method, url);
        builder = match request.body()? {
            Some(RequestBody::Json(value)) => builder.json(&value),
            Some(RequestBody::Multipart(upload)) => {
                let part = Part::bytes(upload.content).file_name(upload.file_name);
                builder.multipart(Form::new().text("name", upload.name).part("file", part))
            }
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(Error::http(
                status.as_u16(),
                String::from_utf8_lossy(&body).into_owned(),
            ));
        }

        RemotePayload::decode(request.expects(), &body)
    }
}

impl Transport for HttpTransport {
    async fn request(&self, request: &ApiRequest, cancel: &CancelHandle) -> Result<RemotePayload> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("{} {} dropped by cancellation", request.description(), cancel.id());
                Err(Error::Cancelled)
            }
            result = self.send(request) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursesync_core::{CourseId, LessonId};

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let transport = HttpTransport::new("http://localhost:8000/school", None).unwrap();
        assert_eq!(transport.base_url().as_str(), "http://localhost:8000/school/");
    }

    #[test]
    fn test_url_for_joins_relative_path() {
        let transport = HttpTransport::new("http://localhost:8000/", None).unwrap();
        let url = transport
            .url_for(&ApiRequest::DeleteLesson {
                course_id: CourseId(2),
                lesson_id: LessonId(5),
            })
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/courses/2/lessons/5/");
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = HttpTransport::new("not a url", None).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));

        let err = HttpTransport::new("mailto:someone@example.com", None).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[tokio::test]
    async fn test_cancelled_handle_short_circuits() {
        // Port 9 (discard) is not expected to answer; cancellation wins first.
        let transport = HttpTransport::new("http://127.0.0.1:9/", None).unwrap();
        let handle = CancelHandle::new();
        handle.cancel();

        let request = ApiRequest::FetchLessons {
            course_id: CourseId(1),
        };
        let result = Transport::request(&transport, &request, &handle).await;

        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
