use async_trait::async_trait;
use educore::{
    api::ResourceApi,
    error::FetchError,
};
use mockall::mock;
use serde_json::Value;

mock! {
    pub ApiClient {}

    #[async_trait]
    impl ResourceApi for ApiClient {
        async fn list(
            &self,
            path: &str,
            params: Vec<(String, String)>,
        ) -> Result<Value, FetchError>;
        async fn get(
            &self,
            path: &str,
            id: i64,
        ) -> Result<Value, FetchError>;
        async fn create(
            &self,
            path: &str,
            payload: Value,
        ) -> Result<Value, FetchError>;
        async fn update(
            &self,
            path: &str,
            id: i64,
            payload: Value,
        ) -> Result<Value, FetchError>;
        async fn remove(
            &self,
            path: &str,
            id: i64,
        ) -> Result<(), FetchError>;
        async fn act(
            &self,
            path: &str,
            id: i64,
            action: &str,
        ) -> Result<Value, FetchError>;
        async fn translations(
            &self,
            locale: &str,
        ) -> Result<Value, FetchError>;
    }
}
