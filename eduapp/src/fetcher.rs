use educore::{
    api::ResourceApi,
    error::FetchError,
    listing::{Listing, RawListing},
    query::QueryState,
    resource::{
        Comment,
        Document,
        Exercise,
        LikeReply,
        LikeStatus,
        Resource,
        Solution,
    },
    translation::Translations,
};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    marker::PhantomData,
    sync::Arc,
};

/// Whether the endpoint returns the full collection or pages of it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchMode {
    #[default]
    Full,
    Paged,
}

/// Issues requests for one kind of resource and normalizes the responses.
pub struct Fetcher<T, A> {
    api: Arc<A>,
    path: String,
    mode: FetchMode,
    _resource: PhantomData<fn() -> T>,
}

impl<T, A> Clone for Fetcher<T, A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            path: self.path.clone(),
            mode: self.mode,
            _resource: PhantomData,
        }
    }
}

impl<T: Resource, A: ResourceApi> Fetcher<T, A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            path: T::KIND.to_string(),
            mode: FetchMode::default(),
            _resource: PhantomData,
        }
    }

    /// List from an alternative path, e.g. `exams/type/EFM`.
    pub fn path(mut self, value: impl Into<String>) -> Self {
        self.path = value.into();
        self
    }

    pub fn mode(mut self, value: FetchMode) -> Self {
        self.mode = value;
        self
    }

    pub fn paged(self) -> Self {
        self.mode(FetchMode::Paged)
    }

    pub fn fetch_mode(&self) -> FetchMode {
        self.mode
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Request parameters for `query`.
    ///
    /// A full-collection endpoint is always asked for everything: the
    /// query is applied locally, so a narrowed response would be kept as
    /// the collection after the query is relaxed.
    pub fn params(&self, query: &QueryState) -> Vec<(String, String)> {
        match self.mode {
            FetchMode::Full => Vec::new(),
            FetchMode::Paged => query.to_params_paged(),
        }
    }

    pub async fn fetch(&self, query: &QueryState) -> Result<Listing<T>, FetchError> {
        let value = self.api.list(&self.path, self.params(query)).await?;
        let raw: RawListing<T> = serde_json::from_value(value)?;
        let listing = raw.into_listing(query.page.get());
        log::trace!("fetched {} {} entries", listing.items.len(), self.path);
        Ok(listing)
    }

    pub async fn detail(&self, id: i64) -> Result<T, FetchError> {
        let value = self.api.get(T::KIND, id).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Items related to `id`, excluding the item itself.
    pub async fn similar(&self, id: i64) -> Result<Listing<T>, FetchError> {
        let path = format!("{}/{id}/similar", T::KIND);
        let params = vec![("excludeId".to_string(), id.to_string())];
        let value = self.api.list(&path, params).await?;
        let raw: RawListing<T> = serde_json::from_value(value)?;
        Ok(Listing::from(raw))
    }

    /// The `C` entries nested under item `id`, e.g. `documents/7/comments`.
    pub async fn sub_listing<C: Resource>(&self, id: i64) -> Result<Listing<C>, FetchError> {
        let path = format!("{}/{id}/{}", T::KIND, C::KIND);
        let value = self.api.list(&path, Vec::new()).await?;
        let raw: RawListing<C> = serde_json::from_value(value)?;
        Ok(Listing::from(raw))
    }

    pub async fn create(&self, payload: &impl Serialize) -> Result<(), FetchError> {
        let payload = serde_json::to_value(payload)?;
        self.api.create(T::KIND, payload).await?;
        Ok(())
    }

    pub async fn update(&self, id: i64, payload: &impl Serialize) -> Result<(), FetchError> {
        let payload = serde_json::to_value(payload)?;
        self.api.update(T::KIND, id, payload).await?;
        Ok(())
    }

    pub async fn remove(&self, id: i64) -> Result<(), FetchError> {
        self.api.remove(T::KIND, id).await
    }
}

impl<A: ResourceApi> Fetcher<Document, A> {
    pub async fn comments(&self, id: i64) -> Result<Listing<Comment>, FetchError> {
        self.sub_listing(id).await
    }

    /// Like the document, or take the like back if already given.
    pub async fn toggle_like(&self, id: i64) -> Result<LikeStatus, FetchError> {
        let value = self.api.act(Document::KIND, id, "like").await?;
        let reply: LikeReply = serde_json::from_value(value)?;
        log::trace!("like on document {id}: {:?}", reply.status);
        Ok(reply.status)
    }
}

impl<A: ResourceApi> Fetcher<Exercise, A> {
    pub async fn solutions(&self, id: i64) -> Result<Listing<Solution>, FetchError> {
        self.sub_listing(id).await
    }
}

/// Load the UI strings for `locale`.
///
/// A failure yields an empty table alongside the error so callers can
/// keep rendering with the keys themselves.
pub async fn load_translations<A: ResourceApi>(
    api: &A,
    locale: &str,
) -> (Translations, Option<FetchError>) {
    let result = api.translations(locale)
        .await
        .and_then(|value| match value {
            serde_json::Value::Null => Ok(BTreeMap::new()),
            value => Ok(serde_json::from_value::<BTreeMap<String, String>>(value)?),
        });
    match result {
        Ok(entries) => (Translations::new(locale, entries), None),
        Err(e) => {
            log::warn!("failed to load translations for {locale}: {e}");
            (Translations::empty(locale), Some(e))
        }
    }
}
