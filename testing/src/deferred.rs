use async_trait::async_trait;
use educore::{
    api::ResourceApi,
    error::FetchError,
};
use futures::channel::oneshot;
use parking_lot::Mutex;
use serde_json::Value;

type Reply = Result<Value, FetchError>;

struct Pending {
    path: String,
    params: Vec<(String, String)>,
    sender: Option<oneshot::Sender<Reply>>,
}

/// An API whose list responses are released by the test, in whatever
/// order the test chooses.
#[derive(Default)]
pub struct DeferredApi {
    pending: Mutex<Vec<Pending>>,
}

impl DeferredApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of list requests received so far.
    pub fn requests(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn path(&self, index: usize) -> Option<String> {
        self.pending.lock().get(index).map(|p| p.path.clone())
    }

    pub fn params(&self, index: usize) -> Option<Vec<(String, String)>> {
        self.pending.lock().get(index).map(|p| p.params.clone())
    }

    /// Release the response for the `index`-th request.  Returns false if
    /// there is no such request, it was already answered, or the caller
    /// has gone away.
    pub fn respond(&self, index: usize, reply: Reply) -> bool {
        let sender = self.pending.lock()
            .get_mut(index)
            .and_then(|p| p.sender.take());
        match sender {
            Some(sender) => sender.send(reply).is_ok(),
            None => false,
        }
    }
}

fn unsupported() -> FetchError {
    FetchError::Server { status: 501 }
}

#[async_trait]
impl ResourceApi for DeferredApi {
    async fn list(
        &self,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<Value, FetchError> {
        let (sender, receiver) = oneshot::channel();
        self.pending.lock().push(Pending {
            path: path.to_string(),
            params,
            sender: Some(sender),
        });
        receiver.await
            .unwrap_or_else(|_| Err(FetchError::Network("request abandoned".to_string())))
    }

    async fn get(&self, _: &str, _: i64) -> Result<Value, FetchError> {
        Err(unsupported())
    }

    async fn create(&self, _: &str, _: Value) -> Result<Value, FetchError> {
        Err(unsupported())
    }

    async fn update(&self, _: &str, _: i64, _: Value) -> Result<Value, FetchError> {
        Err(unsupported())
    }

    async fn remove(&self, _: &str, _: i64) -> Result<(), FetchError> {
        Err(unsupported())
    }

    async fn act(&self, _: &str, _: i64, _: &str) -> Result<Value, FetchError> {
        Err(unsupported())
    }

    async fn translations(&self, _: &str) -> Result<Value, FetchError> {
        Err(unsupported())
    }
}
