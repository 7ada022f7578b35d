use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

/// The call contract of the remote HTTP API.
///
/// `path` is the resource path below `/api/`, e.g. `modules` or
/// `exams/type/EFM`.  Implementations are expected to be stateless with
/// respect to callers so that a single instance may be shared by every
/// browser.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    /// `GET /api/<path>?<params>`
    async fn list(
        &self,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<Value, FetchError>;

    /// `GET /api/<path>/<id>`
    async fn get(
        &self,
        path: &str,
        id: i64,
    ) -> Result<Value, FetchError>;

    /// `POST /api/<path>`
    async fn create(
        &self,
        path: &str,
        payload: Value,
    ) -> Result<Value, FetchError>;

    /// `PUT /api/<path>/<id>`
    async fn update(
        &self,
        path: &str,
        id: i64,
        payload: Value,
    ) -> Result<Value, FetchError>;

    /// `DELETE /api/<path>/<id>`
    async fn remove(
        &self,
        path: &str,
        id: i64,
    ) -> Result<(), FetchError>;

    /// `POST /api/<path>/<id>/<action>` without a body, for toggles such
    /// as `documents/7/like`.
    async fn act(
        &self,
        path: &str,
        id: i64,
        action: &str,
    ) -> Result<Value, FetchError>;

    /// `GET /api/translations/<locale>`
    async fn translations(
        &self,
        locale: &str,
    ) -> Result<Value, FetchError>;
}
