//! Pagination controller.
//!
//! Owns the page counter and the sentinel, and drives
//! query → search → render → notify for both a new search and each
//! scroll-triggered page.
//!
//! Every fetch is described by a [`PageRequest`]. Drivers that fetch on
//! another thread call [`Controller::begin_submit`] / [`Controller::begin_next_page`],
//! run the request, and hand the result back through [`Controller::complete`].
//! Only the request currently loading is accepted there; anything superseded
//! by a newer search is dropped.

use crate::lightbox::{Lightbox, LightboxOptions};
use crate::notify::Notifier;
use crate::render::Gallery;
use crate::sentinel::Sentinel;
use pixgal_api::{build_query, ImageSearch, SearchError, SearchQuery, SearchResult, PER_PAGE};

pub const MSG_NO_RESULTS: &str =
    "Sorry, there are no images matching your search query. Please try again.";
pub const MSG_END_OF_RESULTS: &str =
    "We're sorry, but you've reached the end of search results.";

pub fn found_message(total_hits: u64) -> String {
    format!("Hooray! We found {} images.", total_hits)
}

/// Ticket for one in-flight page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub id: u64,
    pub session: u64,
    pub query: SearchQuery,
}

impl PageRequest {
    pub fn page(&self) -> u32 {
        self.query.page()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Idle,
    Loading(PageRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: u32,
    pub per_page: u32,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            per_page: PER_PAGE,
        }
    }
}

/// What a transition did, for drivers that want to react beyond notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The query text failed validation; nothing was fetched
    Rejected,
    /// No request was started (already loading, sentinel disarmed, no search yet)
    Ignored,
    /// The response belonged to a superseded request
    Stale,
    Failed,
    NoResults,
    Rendered {
        added: usize,
        total_hits: u64,
        /// The sentinel was left disarmed because no pages remain
        exhausted: bool,
    },
}

pub struct Controller<C, N> {
    client: C,
    notifier: N,
    gallery: Gallery,
    lightbox: Lightbox,
    sentinel: Sentinel,
    pagination: PaginationState,
    state: State,
    /// First-page query of the active search
    query: Option<SearchQuery>,
    session: u64,
    request_counter: u64,
}

impl<C: ImageSearch, N: Notifier> Controller<C, N> {
    pub fn new(client: C, notifier: N, scroll_margin: u32) -> Self {
        Self {
            client,
            notifier,
            gallery: Gallery::new(),
            lightbox: Lightbox::new(LightboxOptions::default()),
            sentinel: Sentinel::new(scroll_margin),
            pagination: PaginationState::default(),
            state: State::Idle,
            query: None,
            session: 0,
            request_counter: 0,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn lightbox_mut(&mut self) -> &mut Lightbox {
        &mut self.lightbox
    }

    pub fn sentinel(&self) -> &Sentinel {
        &self.sentinel
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, State::Loading(_))
    }

    /// Text of the active search, if any
    pub fn query_text(&self) -> Option<&str> {
        self.query.as_ref().map(|q| q.text())
    }

    /// Start a new search. Clears the gallery and resets pagination first;
    /// any request still in flight is superseded.
    ///
    /// Returns `None` when the text fails validation (an error notification
    /// has been emitted and nothing needs fetching).
    pub fn begin_submit(&mut self, raw_text: &str) -> Option<PageRequest> {
        if let State::Loading(previous) = &self.state {
            log::debug!("search superseded request #{}", previous.id);
        }

        self.sentinel.disarm();
        self.gallery.clear();
        self.lightbox.reset();
        self.pagination = PaginationState::default();
        self.state = State::Idle;
        self.query = None;
        self.session += 1;

        let query = match build_query(raw_text, 1) {
            Ok(query) => query,
            Err(e) => {
                log::debug!("rejected query {:?}: {}", raw_text, e);
                self.notifier.error(&e.to_string());
                return None;
            }
        };

        self.query = Some(query.clone());
        Some(self.start(query))
    }

    /// Start loading the page after the current one, if the sentinel is armed
    /// and nothing is loading.
    pub fn begin_next_page(&mut self) -> Option<PageRequest> {
        if let State::Loading(request) = &self.state {
            log::debug!("next page ignored, request #{} still loading", request.id);
            return None;
        }
        if !self.sentinel.is_armed() {
            return None;
        }

        let next_page = self.pagination.current_page + 1;
        let query = self.query.as_ref()?.with_page(next_page).ok()?;
        Some(self.start(query))
    }

    fn start(&mut self, query: SearchQuery) -> PageRequest {
        self.request_counter += 1;
        let request = PageRequest {
            id: self.request_counter,
            session: self.session,
            query,
        };
        log::debug!(
            "request #{}: {:?} page {}",
            request.id,
            request.query.text(),
            request.page()
        );
        self.state = State::Loading(request.clone());
        request
    }

    /// Apply the result of `request`. Results for anything but the request
    /// currently loading are discarded.
    pub fn complete(
        &mut self,
        request: &PageRequest,
        result: Result<SearchResult, SearchError>,
    ) -> Outcome {
        match &self.state {
            State::Loading(current) if current.id == request.id => {}
            _ => {
                log::debug!("discarding stale response for request #{}", request.id);
                return Outcome::Stale;
            }
        }
        self.state = State::Idle;

        let result = match result {
            Ok(result) => result,
            Err(e) => {
                log::warn!("page {} failed: {}", request.page(), e);
                self.notifier.error(&e.to_string());
                return Outcome::Failed;
            }
        };

        if request.page() == 1 {
            self.complete_first_page(result)
        } else {
            self.complete_next_page(request.page(), result)
        }
    }

    fn complete_first_page(&mut self, result: SearchResult) -> Outcome {
        if result.total_hits == 0 {
            self.notifier.info(MSG_NO_RESULTS);
            return Outcome::NoResults;
        }

        let added = self.render(&result);
        self.notifier.success(&found_message(result.total_hits));

        let exhausted = result.total_hits <= u64::from(self.pagination.per_page);
        if exhausted {
            self.notifier.info(MSG_END_OF_RESULTS);
        } else {
            self.sentinel.arm();
        }

        Outcome::Rendered {
            added,
            total_hits: result.total_hits,
            exhausted,
        }
    }

    fn complete_next_page(&mut self, page: u32, result: SearchResult) -> Outcome {
        self.pagination.current_page = page;
        let added = self.render(&result);

        // Assumes totalHits stays stable across pages of the same query
        let loaded = u64::from(page) * u64::from(self.pagination.per_page);
        let exhausted = result.total_hits <= loaded;
        if exhausted {
            self.sentinel.disarm();
            self.notifier.info(MSG_END_OF_RESULTS);
        }

        Outcome::Rendered {
            added,
            total_hits: result.total_hits,
            exhausted,
        }
    }

    fn render(&mut self, result: &SearchResult) -> usize {
        let added = self.gallery.append(&result.items);
        self.lightbox.refresh(&self.gallery);
        added
    }

    /// Submit a search and fetch its first page on the calling thread
    pub fn submit(&mut self, raw_text: &str) -> Outcome {
        let Some(request) = self.begin_submit(raw_text) else {
            return Outcome::Rejected;
        };
        let result = self.client.search(&request.query);
        self.complete(&request, result)
    }

    /// The sentinel came into view: fetch the next page on the calling thread
    pub fn on_intersect(&mut self) -> Outcome {
        let Some(request) = self.begin_next_page() else {
            return Outcome::Ignored;
        };
        let result = self.client.search(&request.query);
        self.complete(&request, result)
    }

    /// Scroll position changed; `remaining` is the distance left to the sentinel
    pub fn on_scroll(&mut self, remaining: u32) -> Outcome {
        if self.sentinel.intersects(remaining) {
            self.on_intersect()
        } else {
            Outcome::Ignored
        }
    }
}
