use async_trait::async_trait;
use educore::{
    api::ResourceApi,
    error::FetchError,
    session::Session,
};
use reqwest::{
    Client,
    RequestBuilder,
    Response,
};
use serde_json::Value;
use std::time::Duration;

/// The shared HTTP client.
///
/// Only carries the base URL and the session used to authorize requests;
/// responses are never cached, so one instance may serve any number of
/// browsers concurrently.
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: Client,
    base_url: String,
    session: Session,
}

fn transport_error(e: reqwest::Error) -> FetchError {
    if e.is_decode() {
        FetchError::Decode(e.to_string())
    } else {
        FetchError::Network(e.to_string())
    }
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self::with_client(Client::new(), base_url, session)
    }

    pub fn with_client(inner: Client, base_url: impl Into<String>, session: Session) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { inner, base_url, session }
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        session: Session,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let inner = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;
        Ok(Self::with_client(inner, base_url, session))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Where uploaded files (images, exam papers) are served from.
    pub fn storage_url(&self) -> String {
        format!("{}/storage", self.base_url)
    }

    pub fn endpoint(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<String, FetchError> {
        let mut url = format!("{}/api/{}", self.base_url, path.trim_matches('/'));
        if !params.is_empty() {
            let query = serde_urlencoded::to_string(params)
                .map_err(|e| FetchError::Decode(e.to_string()))?;
            url.push('?');
            url.push_str(&query);
        }
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.bearer() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let response = self.authorize(request)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            log::warn!("{} responded with {status}", response.url());
            Err(FetchError::Server { status: status.as_u16() })
        }
    }

    async fn json(&self, request: RequestBuilder) -> Result<Value, FetchError> {
        let body = self.send(request)
            .await?
            .text()
            .await
            .map_err(transport_error)?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ResourceApi for HttpClient {
    async fn list(
        &self,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<Value, FetchError> {
        let url = self.endpoint(path, &params)?;
        log::trace!("GET {url}");
        self.json(self.inner.get(url)).await
    }

    async fn get(
        &self,
        path: &str,
        id: i64,
    ) -> Result<Value, FetchError> {
        let url = self.endpoint(&format!("{}/{id}", path.trim_matches('/')), &[])?;
        log::trace!("GET {url}");
        self.json(self.inner.get(url)).await
    }

    async fn create(
        &self,
        path: &str,
        payload: Value,
    ) -> Result<Value, FetchError> {
        let url = self.endpoint(path, &[])?;
        log::trace!("POST {url}");
        self.json(self.inner.post(url).json(&payload)).await
    }

    async fn update(
        &self,
        path: &str,
        id: i64,
        payload: Value,
    ) -> Result<Value, FetchError> {
        let url = self.endpoint(&format!("{}/{id}", path.trim_matches('/')), &[])?;
        log::trace!("PUT {url}");
        self.json(self.inner.put(url).json(&payload)).await
    }

    async fn remove(
        &self,
        path: &str,
        id: i64,
    ) -> Result<(), FetchError> {
        let url = self.endpoint(&format!("{}/{id}", path.trim_matches('/')), &[])?;
        log::trace!("DELETE {url}");
        self.send(self.inner.delete(url)).await?;
        Ok(())
    }

    async fn act(
        &self,
        path: &str,
        id: i64,
        action: &str,
    ) -> Result<Value, FetchError> {
        let url = self.endpoint(
            &format!("{}/{id}/{}", path.trim_matches('/'), action.trim_matches('/')),
            &[],
        )?;
        log::trace!("POST {url}");
        self.json(self.inner.post(url)).await
    }

    async fn translations(
        &self,
        locale: &str,
    ) -> Result<Value, FetchError> {
        let url = self.endpoint(&format!("translations/{locale}"), &[])?;
        log::trace!("GET {url}");
        self.json(self.inner.get(url)).await
    }
}
