//! The generic collection store.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bookstall_client::{
    CredentialStore, Gateway, HttpClient, MultipartForm, Notification, Notifier, SessionManager,
};
use bookstall_protocol::{AdminResource, ApiError, ApiResult, Envelope, PageData, PageQuery};
use parking_lot::RwLock;

use crate::debounce::normalize_keyword;
use crate::error::{StoreError, StoreResult};
use crate::state::{CollectionAction, CollectionState, RequestStatus, StoreStats};

/// Manages one paginated, searchable collection and its CRUD operations.
///
/// One instance exists per admin resource; all of them share the gateway,
/// the session manager and the notification sink. The store exclusively
/// owns its [`CollectionState`]; views read snapshots and feed the page
/// index and keyword they want back into the operations.
pub struct CollectionStore<R: AdminResource, C: HttpClient, S: CredentialStore> {
    gateway: Arc<Gateway<C, S>>,
    session: Arc<SessionManager<C, S>>,
    notifier: Arc<Notifier>,
    state: RwLock<CollectionState<R::Item>>,
    stats: RwLock<StoreStats>,
    fetch_seq: AtomicU64,
    _resource: PhantomData<R>,
}

impl<R: AdminResource, C: HttpClient, S: CredentialStore> CollectionStore<R, C, S> {
    /// Creates a store for resource `R`.
    pub fn new(
        gateway: Arc<Gateway<C, S>>,
        session: Arc<SessionManager<C, S>>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            gateway,
            session,
            notifier,
            state: RwLock::new(CollectionState::default()),
            stats: RwLock::new(StoreStats::default()),
            fetch_seq: AtomicU64::new(0),
            _resource: PhantomData,
        }
    }

    /// Returns a snapshot of the collection state.
    pub fn state(&self) -> CollectionState<R::Item> {
        self.state.read().clone()
    }

    /// Returns a snapshot of the activity counters.
    pub fn stats(&self) -> StoreStats {
        *self.stats.read()
    }

    fn collection_path(&self) -> String {
        format!("/admin/{}", R::PATH)
    }

    fn item_path(&self, id: u64) -> String {
        format!("/admin/{}/{}", R::PATH, id)
    }

    /// Fetches one page, replacing the held page wholesale on success.
    ///
    /// Responses are sequence-guarded: if a later fetch was issued while
    /// this one was in flight, this response is discarded so the last
    /// request wins. On failure the held page keeps its last good value;
    /// the screen shows stale data under an error banner.
    pub async fn fetch(&self, query: PageQuery) -> StoreResult<()> {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write();
            state.status = RequestStatus::Loading;
            state.last_action = Some(CollectionAction::Fetch);
            state.keyword = query.keyword.clone();
            state.page_index = query.index;
        }
        self.stats.write().fetches += 1;

        let outcome = self
            .gateway
            .get::<PageData<R::Item>>(&self.collection_path(), query.to_pairs())
            .await;

        match outcome {
            Ok(envelope) => {
                if !self.is_latest(seq) {
                    self.discard_stale(seq);
                    return Ok(());
                }
                let Envelope {
                    message, result, ..
                } = envelope;
                {
                    let mut state = self.state.write();
                    state.page = result.unwrap_or_default();
                    state.status = RequestStatus::Succeeded;
                    state.last_error = None;
                }
                self.notifier.publish(Notification::success(message_or(
                    message,
                    format!("Loaded {}", R::PATH),
                )));
                Ok(())
            }
            Err(err) => {
                // A 401 tears the session down even when the response is
                // stale; the session state must not depend on ordering.
                if err.is_unauthorized() {
                    return Err(self.operation_failed(err).await);
                }
                if !self.is_latest(seq) {
                    self.discard_stale(seq);
                    return Ok(());
                }
                Err(self.operation_failed(err).await)
            }
        }
    }

    /// Creates an item and appends the server's copy to the held page.
    ///
    /// This is an optimistic tail insert: no re-fetch is issued, so the
    /// item's displayed position may disagree with the server's sort order
    /// until the next fetch.
    pub async fn create(&self, draft: &R::Draft) -> StoreResult<R::Item> {
        self.begin(CollectionAction::Create);
        self.stats.write().creates += 1;
        let outcome = self
            .gateway
            .post::<R::Item, _>(&self.collection_path(), Vec::new(), draft)
            .await;
        self.apply_created(outcome).await
    }

    /// Multipart variant of [`create`](Self::create), for resources whose
    /// create form carries a file upload.
    pub async fn create_with_form(&self, form: MultipartForm) -> StoreResult<R::Item> {
        self.begin(CollectionAction::Create);
        self.stats.write().creates += 1;
        let outcome = self
            .gateway
            .post_form::<R::Item>(&self.collection_path(), form)
            .await;
        self.apply_created(outcome).await
    }

    /// Updates an item, replacing the matching entry in the held page.
    ///
    /// If the page no longer contains the item (stale page), the update is
    /// not reflected locally; callers re-fetch to observe it.
    pub async fn update(&self, id: u64, draft: &R::Draft) -> StoreResult<R::Item> {
        self.begin(CollectionAction::Update);
        self.stats.write().updates += 1;
        let outcome = self.gateway.put::<R::Item, _>(&self.item_path(id), draft).await;
        match outcome.and_then(Self::require_item) {
            Ok((message, item)) => {
                {
                    let mut state = self.state.write();
                    match state
                        .page
                        .content
                        .iter_mut()
                        .find(|existing| R::id(existing) == id)
                    {
                        Some(slot) => *slot = item.clone(),
                        None => tracing::debug!(
                            resource = R::PATH,
                            id,
                            "updated item not on the current page"
                        ),
                    }
                    state.status = RequestStatus::Succeeded;
                    state.last_error = None;
                }
                self.notifier.publish(Notification::success(message_or(
                    message,
                    format!("Updated {}", R::LABEL),
                )));
                Ok(item)
            }
            Err(err) => Err(self.operation_failed(err).await),
        }
    }

    /// Deletes an item, removing it from the held page.
    pub async fn delete(&self, id: u64) -> StoreResult<()> {
        self.begin(CollectionAction::Delete);
        self.stats.write().deletes += 1;
        match self
            .gateway
            .delete::<serde_json::Value>(&self.item_path(id))
            .await
        {
            Ok(envelope) => {
                {
                    let mut state = self.state.write();
                    state.page.content.retain(|existing| R::id(existing) != id);
                    state.page.total_elements = state.page.total_elements.saturating_sub(1);
                    state.status = RequestStatus::Succeeded;
                    state.last_error = None;
                }
                self.notifier.publish(Notification::success(message_or(
                    envelope.message,
                    format!("Deleted {}", R::LABEL),
                )));
                Ok(())
            }
            Err(err) => Err(self.operation_failed(err).await),
        }
    }

    /// Applies a new search keyword and restarts pagination at page 1.
    ///
    /// A keyword-filtered result set may have fewer pages than the index
    /// the user was on, so keyword changes always reset the page index.
    pub async fn reset_search(
        &self,
        raw_keyword: Option<&str>,
        size: u32,
        filters: Vec<(String, String)>,
    ) -> StoreResult<()> {
        let keyword = normalize_keyword(raw_keyword);
        let mut query = PageQuery::new(1, size).with_keyword(keyword);
        query.filters = filters;
        self.fetch(query).await
    }

    /// Clears transient error state and the shared notification.
    ///
    /// Called when a view unmounts so a dismissed modal's errors do not
    /// leak into the next screen. The held page is untouched.
    pub fn reset_state(&self) {
        {
            let mut state = self.state.write();
            state.last_error = None;
            state.last_action = None;
        }
        self.notifier.clear();
    }

    fn begin(&self, action: CollectionAction) {
        let mut state = self.state.write();
        state.status = RequestStatus::Loading;
        state.last_action = Some(action);
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.fetch_seq.load(Ordering::SeqCst) == seq
    }

    fn discard_stale(&self, seq: u64) {
        self.stats.write().stale_discarded += 1;
        tracing::debug!(resource = R::PATH, seq, "discarding stale fetch response");
    }

    fn require_item(envelope: Envelope<R::Item>) -> ApiResult<(String, R::Item)> {
        let Envelope {
            message, result, ..
        } = envelope;
        result
            .map(|item| (message, item))
            .ok_or_else(|| ApiError::Decode("response missing the expected item".into()))
    }

    async fn apply_created(&self, outcome: ApiResult<Envelope<R::Item>>) -> StoreResult<R::Item> {
        match outcome.and_then(Self::require_item) {
            Ok((message, item)) => {
                {
                    let mut state = self.state.write();
                    state.page.content.push(item.clone());
                    state.page.total_elements += 1;
                    state.status = RequestStatus::Succeeded;
                    state.last_error = None;
                }
                self.notifier.publish(Notification::success(message_or(
                    message,
                    format!("Created {}", R::LABEL),
                )));
                Ok(item)
            }
            Err(err) => Err(self.operation_failed(err).await),
        }
    }

    /// Records a failure and, for a 401, force-closes the session before
    /// the error surfaces to the caller.
    async fn operation_failed(&self, err: ApiError) -> StoreError {
        self.stats.write().failures += 1;

        if err.is_unauthorized() {
            if let Err(session_err) = self.session.expire().await {
                tracing::warn!("session teardown after 401 failed: {session_err}");
            }
            let message = StoreError::SessionExpired.to_string();
            let mut state = self.state.write();
            state.status = RequestStatus::Failed;
            state.last_error = Some(message);
            // expire() already published the session-expired notification.
            return StoreError::SessionExpired;
        }

        let message = err.to_string();
        {
            let mut state = self.state.write();
            state.status = RequestStatus::Failed;
            state.last_error = Some(message.clone());
        }
        self.notifier.publish(Notification::error(message.clone()));
        StoreError::Rejected {
            message,
            source: err,
        }
    }
}

fn message_or(message: String, fallback: String) -> String {
    if message.is_empty() {
        fallback
    } else {
        message
    }
}
