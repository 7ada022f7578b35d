//! The resource browser: query state, the last fetched collection and the
//! fetch lifecycle of one browsing screen.
//!
//! Every fetch is tagged with a sequence number when it is issued, and a
//! response is only applied if its sequence number is higher than that of
//! the last applied response.  A fast typist may therefore issue several
//! overlapping requests; whichever order the responses arrive in, the
//! collection ends up reflecting the most recently issued one.
use educore::{
    api::ResourceApi,
    error::FetchError,
    filter::{self, BrowserSpec},
    listing::{Listing, Pagination},
    notice::{LogNotifier, Notice, Notifier},
    query::{QueryState, Selection},
    resource::{Document, LikeStatus, Resource},
    session::Session,
};
use futures::future::{AbortHandle, AbortRegistration, Abortable};
use parking_lot::Mutex;
use rand::Rng;
use serde::Serialize;
use std::{
    collections::BTreeMap,
    future::Future,
    sync::Arc,
};

use crate::{
    error::AppError,
    fetcher::{FetchMode, Fetcher},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Loading,
    Loaded,
    Failed,
}

struct State<T> {
    query: QueryState,
    collection: Arc<Vec<T>>,
    pagination: Option<Pagination>,
    // the outcome of the last applied fetch; Loading is derived from
    // `in_flight` instead.
    settled: Status,
    error: Option<FetchError>,
    issued: u64,
    applied: u64,
    in_flight: BTreeMap<u64, AbortHandle>,
    torn_down: bool,
}

impl<T> State<T> {
    fn new(query: QueryState) -> Self {
        Self {
            query,
            collection: Arc::new(Vec::new()),
            pagination: None,
            settled: Status::Idle,
            error: None,
            issued: 0,
            applied: 0,
            in_flight: BTreeMap::new(),
            torn_down: false,
        }
    }
}

// Removes the request from the in-flight set however the fetch future
// ends: completion, abort, or being dropped, polled or not.
struct InFlight<T> {
    state: Arc<Mutex<State<T>>>,
    seq: u64,
}

impl<T> Drop for InFlight<T> {
    fn drop(&mut self) {
        self.state.lock().in_flight.remove(&self.seq);
    }
}

struct Ticket<T> {
    seq: u64,
    query: QueryState,
    registration: AbortRegistration,
    _in_flight: InFlight<T>,
}

fn complete<T>(
    state: &Mutex<State<T>>,
    notifier: &dyn Notifier,
    seq: u64,
    result: Result<Listing<T>, FetchError>,
) {
    let notice = {
        let mut state = state.lock();
        if state.torn_down {
            log::debug!("dropping response {seq} for torn down browser");
            return;
        }
        if seq < state.applied {
            match &result {
                Ok(_) => log::debug!(
                    "discarding stale response {seq}; response {} already applied",
                    state.applied,
                ),
                Err(e) => log::debug!(
                    "discarding stale failure {seq} ({e}); response {} already applied",
                    state.applied,
                ),
            }
            return;
        }
        state.applied = seq;
        match result {
            Ok(listing) => {
                state.collection = Arc::new(listing.items);
                state.pagination = listing.pagination;
                state.error = None;
                state.settled = Status::Loaded;
                None
            }
            Err(e) => {
                log::warn!("request {seq} failed: {e}");
                // collection and pagination are left as they were
                state.error = Some(e);
                state.settled = Status::Failed;
                Some(Notice::CouldNotLoad)
            }
        }
    };
    if let Some(notice) = notice {
        notifier.notify(notice);
    }
}

/// One browsing screen over a resource collection.
///
/// Clones are handles to the same browser.
pub struct ResourceBrowser<T, A> {
    fetcher: Fetcher<T, A>,
    spec: Arc<BrowserSpec>,
    session: Session,
    notifier: Arc<dyn Notifier>,
    require_login: bool,
    state: Arc<Mutex<State<T>>>,
}

impl<T, A> Clone for ResourceBrowser<T, A> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            spec: self.spec.clone(),
            session: self.session.clone(),
            notifier: self.notifier.clone(),
            require_login: self.require_login,
            state: self.state.clone(),
        }
    }
}

impl<T: Resource, A: ResourceApi + 'static> ResourceBrowser<T, A> {
    pub fn new(fetcher: Fetcher<T, A>, spec: BrowserSpec, session: Session) -> Self {
        Self {
            fetcher,
            spec: Arc::new(spec),
            session,
            notifier: Arc::new(LogNotifier),
            require_login: false,
            state: Arc::new(Mutex::new(State::new(QueryState::default()))),
        }
    }

    pub fn notifier(mut self, value: Arc<dyn Notifier>) -> Self {
        self.notifier = value;
        self
    }

    /// Refuse to fetch unless the session is authenticated.
    pub fn require_login(mut self, value: bool) -> Self {
        self.require_login = value;
        self
    }

    /// The query state the browser starts out with.
    pub fn initial_query(self, query: QueryState) -> Self {
        self.state.lock().query = query;
        self
    }

    pub fn spec(&self) -> &BrowserSpec {
        &self.spec
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn fetch_mode(&self) -> FetchMode {
        self.fetcher.fetch_mode()
    }

    pub fn status(&self) -> Status {
        let state = self.state.lock();
        if state.in_flight.is_empty() {
            state.settled
        } else {
            Status::Loading
        }
    }

    pub fn loading(&self) -> bool {
        !self.state.lock().in_flight.is_empty()
    }

    /// Whether the last applied fetch failed.
    pub fn failed(&self) -> bool {
        self.state.lock().settled == Status::Failed
    }

    pub fn error(&self) -> Option<FetchError> {
        self.state.lock().error.clone()
    }

    pub fn query(&self) -> QueryState {
        self.state.lock().query.clone()
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.state.lock().pagination
    }

    /// The last successfully fetched collection, in fetch order.
    pub fn collection(&self) -> Arc<Vec<T>> {
        self.state.lock().collection.clone()
    }

    /// The collection view for the current query.
    ///
    /// Derived afresh on every call.  Paged endpoints have already
    /// applied the query server side, so their page is shown as received.
    pub fn view(&self) -> Vec<T> {
        let (collection, query) = {
            let state = self.state.lock();
            (state.collection.clone(), state.query.clone())
        };
        match self.fetcher.fetch_mode() {
            FetchMode::Paged => collection.as_ref().clone(),
            FetchMode::Full => filter::apply(&collection, &query, &self.spec)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// A random selection from the collection, shown before any query.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<T> {
        let collection = self.collection();
        filter::sample(&collection, count, rng)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn is_torn_down(&self) -> bool {
        self.state.lock().torn_down
    }

    /// Detach the browser from its view.  In-flight requests are aborted
    /// and any response arriving afterwards is ignored.
    pub fn teardown(&self) {
        let mut state = self.state.lock();
        state.torn_down = true;
        for (seq, handle) in std::mem::take(&mut state.in_flight) {
            log::debug!("aborting request {seq}");
            handle.abort();
        }
    }

    fn begin(&self) -> Option<Ticket<T>> {
        if self.require_login && !self.session.is_logged_in() {
            let gated = {
                let mut state = self.state.lock();
                if !state.torn_down {
                    state.settled = Status::Failed;
                }
                !state.torn_down
            };
            if gated {
                self.notifier.notify(Notice::LoginRequired);
            }
            return None;
        }
        let mut state = self.state.lock();
        if state.torn_down {
            return None;
        }
        state.issued += 1;
        let seq = state.issued;
        let (handle, registration) = AbortHandle::new_pair();
        state.in_flight.insert(seq, handle);
        Some(Ticket {
            seq,
            query: state.query.clone(),
            registration,
            _in_flight: InFlight { state: self.state.clone(), seq },
        })
    }

    /// Fetch the collection for the current query.
    ///
    /// The request is issued, and the browser enters the loading state,
    /// when this is called; the returned future performs the request and
    /// applies its outcome.
    pub fn refresh(&self) -> impl Future<Output = ()> + 'static {
        let ticket = self.begin();
        let fetcher = self.fetcher.clone();
        let notifier = self.notifier.clone();
        let state = self.state.clone();
        async move {
            let Some(Ticket { seq, query, registration, _in_flight }) = ticket else {
                return;
            };
            match Abortable::new(fetcher.fetch(&query), registration).await {
                Ok(result) => complete(&state, notifier.as_ref(), seq, result),
                Err(_) => log::debug!("request {seq} aborted"),
            }
        }
    }

    pub fn retry(&self) -> impl Future<Output = ()> + 'static {
        self.refresh()
    }

    // Returns the refetch to perform when the change has to go through
    // the server.
    fn update_query(
        &self,
        server_side: bool,
        f: impl FnOnce(&mut QueryState),
    ) -> Option<impl Future<Output = ()> + 'static> {
        {
            let mut state = self.state.lock();
            if state.torn_down {
                return None;
            }
            f(&mut state.query);
        }
        (server_side && self.fetcher.fetch_mode() == FetchMode::Paged)
            .then(|| self.refresh())
    }

    pub fn set_search(
        &self,
        value: impl Into<String>,
    ) -> Option<impl Future<Output = ()> + 'static> {
        let value = value.into();
        self.update_query(true, move |query| {
            query.set_search(value);
            query.set_page(1);
        })
    }

    pub fn set_filter(
        &self,
        key: impl Into<String>,
        value: impl Into<Selection>,
    ) -> Option<impl Future<Output = ()> + 'static> {
        let (key, value) = (key.into(), value.into());
        self.update_query(true, move |query| {
            query.set_filter(key, value);
            query.set_page(1);
        })
    }

    pub fn set_sort(
        &self,
        value: Option<String>,
    ) -> Option<impl Future<Output = ()> + 'static> {
        self.update_query(true, move |query| {
            query.set_sort(value);
            query.set_page(1);
        })
    }

    pub fn set_page(
        &self,
        value: u32,
    ) -> Option<impl Future<Output = ()> + 'static> {
        self.update_query(true, move |query| query.set_page(value))
    }

    pub async fn detail(&self, id: i64) -> Result<T, AppError> {
        Ok(self.fetcher.detail(id).await?)
    }

    // Mutations leave the displayed collection alone; callers refresh
    // explicitly once they are done.

    pub async fn create(&self, payload: &impl Serialize) -> Result<(), AppError> {
        self.session.require()?;
        Ok(self.fetcher.create(payload).await?)
    }

    pub async fn update(&self, id: i64, payload: &impl Serialize) -> Result<(), AppError> {
        self.session.require()?;
        Ok(self.fetcher.update(id, payload).await?)
    }

    pub async fn remove(&self, id: i64) -> Result<(), AppError> {
        self.session.require()?;
        Ok(self.fetcher.remove(id).await?)
    }
}

impl<A: ResourceApi + 'static> ResourceBrowser<Document, A> {
    /// Toggle the session user's like on a document.
    ///
    /// The collection is left as fetched; callers adjust the shown count
    /// with [`LikeStatus::apply`].
    pub async fn toggle_like(&self, id: i64) -> Result<LikeStatus, AppError> {
        self.session.require()?;
        Ok(self.fetcher.toggle_like(id).await?)
    }
}
