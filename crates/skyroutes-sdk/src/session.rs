//! Query session engines for the two listing views.
//!
//! A browser owns one query lifecycle: filter classification, the fetch,
//! the client-side filter stage and the pagination window. Direct
//! queries delegate paging to the listing API; aggregate and fetch-all
//! queries materialize the full result set and page it locally.
//!
//! The begin/run/finish split mirrors the event loop of the front end:
//! `begin` marks the query in flight and hands out a generation ticket,
//! `run` performs the fetch without touching browser state, and `finish`
//! applies the completion - discarding it when a newer query has started
//! since (deliberate last-write-wins; network completion order does not
//! match issue order).

use thiserror::Error;

use skyroutes_core::filter_stage;
use skyroutes_core::{
    AggregateKey, CircularFilterState, CircularRouteRecord, DurationRange, FilterState,
    MaterializedPage, PageWindow, QueryError, RouteRecord, ServerPage, DEFAULT_PAGE_LIMIT,
};

use crate::aggregator;
use crate::source::{CircularRouteQuery, RouteQuery, RouteSource};

/// Where a browser is in its query lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    /// The last query completed; an empty result set is still `Ready`
    /// (the "no results" rendering), never a failure.
    Ready,
    /// The last query failed; previously loaded results stay on screen
    /// until a retry succeeds.
    Failed(String),
}

/// Local submission failures. Collaborator failures do not surface here;
/// they land in [`QueryStatus::Failed`] with the prior results retained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The same logical query is already in flight.
    #[error("query already in flight")]
    Busy,
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// What one route-query ticket will fetch.
#[derive(Debug, Clone, PartialEq)]
enum QueryPlan {
    Direct(RouteQuery),
    Aggregate {
        key: AggregateKey,
        airline_name: Option<String>,
        duration: Option<DurationRange>,
    },
}

/// Handle for one outstanding route fetch; pairs the request plan with
/// the generation it belongs to.
#[derive(Debug, Clone)]
pub struct QueryTicket {
    generation: u64,
    plan: QueryPlan,
}

/// Completion payload produced by [`RouteBrowser::run`].
#[derive(Debug)]
pub enum QueryOutcome {
    Direct {
        routes: Vec<RouteRecord>,
        offset: usize,
        limit: usize,
        total: usize,
    },
    Aggregate {
        routes: Vec<RouteRecord>,
        truncated: bool,
    },
    Failed(String),
}

/// Session engine for the plain route-search view.
pub struct RouteBrowser<S> {
    source: S,
    generation: u64,
    status: QueryStatus,
    pending_filters: Option<FilterState>,
    /// Current server-delegated page of records; materialized results
    /// live inside the window instead.
    routes: Vec<RouteRecord>,
    window: PageWindow<RouteRecord>,
    /// The exact request behind the current server page. Next/Previous
    /// re-issue it with a new offset only - filters are never re-derived
    /// from form state for a page move.
    last_query: Option<RouteQuery>,
    truncated: bool,
    page_size: usize,
}

impl<S: RouteSource> RouteBrowser<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            generation: 0,
            status: QueryStatus::Idle,
            pending_filters: None,
            routes: Vec::new(),
            window: PageWindow::Server(ServerPage::new(DEFAULT_PAGE_LIMIT)),
            last_query: None,
            truncated: false,
            page_size: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Begin a query. Classifies the filters and marks the browser
    /// loading; the returned ticket must be passed to [`Self::run`] and
    /// then [`Self::finish`]. Re-submitting the filters already in
    /// flight is refused; submitting different filters supersedes the
    /// outstanding query, whose completion will be discarded as stale.
    pub fn begin(&mut self, filters: FilterState) -> Result<QueryTicket, SubmitError> {
        if self.status == QueryStatus::Loading && self.pending_filters.as_ref() == Some(&filters) {
            return Err(SubmitError::Busy);
        }
        let plan = self.plan_for(&filters)?;
        self.generation += 1;
        self.status = QueryStatus::Loading;
        self.pending_filters = Some(filters);
        Ok(QueryTicket {
            generation: self.generation,
            plan,
        })
    }

    fn plan_for(&self, filters: &FilterState) -> Result<QueryPlan, QueryError> {
        if let Some(range) = filters.duration {
            // Re-validate here so a hand-built state cannot smuggle an
            // inverted range past the form layer.
            DurationRange::new(range.min, range.max)?;
        }
        Ok(match &filters.aggregate {
            Some(key) => QueryPlan::Aggregate {
                key: key.clone(),
                airline_name: filters.airline_name.clone(),
                duration: filters.duration,
            },
            None => QueryPlan::Direct(RouteQuery::from_filters(filters, 0, self.page_size as u32)),
        })
    }

    /// Execute the fetch for a ticket. Does not mutate the browser, so a
    /// driver may race several tickets and let [`Self::finish`] pick the
    /// winner.
    pub async fn run(&self, ticket: &QueryTicket) -> QueryOutcome {
        match &ticket.plan {
            QueryPlan::Direct(query) => match self.source.fetch_routes(query).await {
                Ok(response) => QueryOutcome::Direct {
                    offset: query.offset.unwrap_or(0) as usize,
                    limit: query.limit.unwrap_or(DEFAULT_PAGE_LIMIT as u32) as usize,
                    total: response.pagination.total as usize,
                    routes: response.routes,
                },
                Err(err) => QueryOutcome::Failed(err.to_string()),
            },
            QueryPlan::Aggregate {
                key,
                airline_name,
                duration,
            } => match aggregator::fetch_bidirectional(&self.source, key).await {
                Ok(set) => QueryOutcome::Aggregate {
                    routes: filter_stage::apply(set.routes, airline_name.as_deref(), *duration),
                    truncated: set.truncated,
                },
                Err(err) => QueryOutcome::Failed(err.to_string()),
            },
        }
    }

    /// Apply a completed fetch. Returns `false` when the ticket is stale
    /// (a newer query started after it) and the completion was dropped.
    pub fn finish(&mut self, ticket: QueryTicket, outcome: QueryOutcome) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale query completion"
            );
            return false;
        }
        self.pending_filters = None;
        match outcome {
            QueryOutcome::Direct {
                routes,
                offset,
                limit,
                total,
            } => {
                self.routes = routes;
                self.window = PageWindow::Server(ServerPage {
                    offset,
                    limit: limit.max(1),
                    total,
                });
                self.last_query = match ticket.plan {
                    QueryPlan::Direct(query) => Some(query),
                    QueryPlan::Aggregate { .. } => None,
                };
                self.truncated = false;
                self.status = QueryStatus::Ready;
            }
            QueryOutcome::Aggregate { routes, truncated } => {
                self.routes.clear();
                self.window =
                    PageWindow::Materialized(MaterializedPage::new(routes, self.page_size));
                self.last_query = None;
                self.truncated = truncated;
                self.status = QueryStatus::Ready;
            }
            QueryOutcome::Failed(message) => {
                self.status = QueryStatus::Failed(message);
            }
        }
        true
    }

    /// Begin, run and finish in one call.
    pub async fn submit(&mut self, filters: FilterState) -> Result<&QueryStatus, SubmitError> {
        let ticket = self.begin(filters)?;
        let outcome = self.run(&ticket).await;
        self.finish(ticket, outcome);
        Ok(&self.status)
    }

    /// Move to the next page. Materialized pages re-slice locally;
    /// server pages re-issue the stored request with a new offset.
    pub async fn next_page(&mut self) -> bool {
        let offset = match &mut self.window {
            PageWindow::Materialized(page) => return page.next(),
            PageWindow::Server(page) => page.next_offset(),
        };
        match offset {
            Some(offset) => self.refetch_at(offset).await,
            None => false,
        }
    }

    pub async fn prev_page(&mut self) -> bool {
        let offset = match &mut self.window {
            PageWindow::Materialized(page) => return page.prev(),
            PageWindow::Server(page) => page.prev_offset(),
        };
        match offset {
            Some(offset) => self.refetch_at(offset).await,
            None => false,
        }
    }

    /// Jump to an arbitrary page in either discipline, clamped to the
    /// valid range.
    pub async fn go_to_page(&mut self, page_number: usize) -> bool {
        let offset = match &mut self.window {
            PageWindow::Materialized(page) => {
                page.go_to(page_number);
                return true;
            }
            PageWindow::Server(page) => page.clamp_offset((page_number.max(1) - 1) * page.limit),
        };
        self.refetch_at(offset).await
    }

    async fn refetch_at(&mut self, offset: usize) -> bool {
        let Some(mut query) = self.last_query.clone() else {
            return false;
        };
        query.offset = Some(offset as u32);
        self.generation += 1;
        self.status = QueryStatus::Loading;
        let ticket = QueryTicket {
            generation: self.generation,
            plan: QueryPlan::Direct(query),
        };
        let outcome = self.run(&ticket).await;
        self.finish(ticket, outcome)
    }

    /// Page length for subsequent queries; an active materialized window
    /// is re-sliced from its first page immediately.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        if let PageWindow::Materialized(page) = &mut self.window {
            page.set_page_size(self.page_size);
        }
    }

    /// Records visible on the current page.
    pub fn visible(&self) -> &[RouteRecord] {
        match &self.window {
            PageWindow::Server(_) => &self.routes,
            PageWindow::Materialized(page) => page.slice(),
        }
    }

    pub fn total(&self) -> usize {
        self.window.total()
    }

    pub fn status(&self) -> &QueryStatus {
        &self.status
    }

    pub fn window(&self) -> &PageWindow<RouteRecord> {
        &self.window
    }

    /// True when the last aggregate fetch hit the directional page cap
    /// and the merged set is incomplete.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Handle for one outstanding circular-route fetch.
#[derive(Debug, Clone)]
pub struct CircularTicket {
    generation: u64,
    query: CircularRouteQuery,
    duration: Option<DurationRange>,
}

/// Completion payload produced by [`CircularBrowser::run`].
#[derive(Debug)]
pub enum CircularOutcome {
    Loaded(Vec<CircularRouteRecord>),
    Failed(String),
}

/// Session engine for the circular-route view. The endpoint returns no
/// pagination metadata, so results are always materialized and paged
/// locally.
pub struct CircularBrowser<S> {
    source: S,
    generation: u64,
    status: QueryStatus,
    pending_filters: Option<CircularFilterState>,
    window: MaterializedPage<CircularRouteRecord>,
    page_size: usize,
}

impl<S: RouteSource> CircularBrowser<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            generation: 0,
            status: QueryStatus::Idle,
            pending_filters: None,
            window: MaterializedPage::new(Vec::new(), DEFAULT_PAGE_LIMIT),
            page_size: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Begin a circular-route query. The airline precondition is checked
    /// here, locally; a missing airline never reaches the network.
    pub fn begin(&mut self, filters: CircularFilterState) -> Result<CircularTicket, SubmitError> {
        if self.status == QueryStatus::Loading && self.pending_filters.as_ref() == Some(&filters) {
            return Err(SubmitError::Busy);
        }
        if let Some(range) = filters.duration {
            DurationRange::new(range.min, range.max).map_err(SubmitError::Query)?;
        }
        let query = CircularRouteQuery::from_filters(&filters)?;
        self.generation += 1;
        self.status = QueryStatus::Loading;
        let duration = filters.duration;
        self.pending_filters = Some(filters);
        Ok(CircularTicket {
            generation: self.generation,
            query,
            duration,
        })
    }

    pub async fn run(&self, ticket: &CircularTicket) -> CircularOutcome {
        match self.source.fetch_circular_routes(&ticket.query).await {
            Ok(response) => {
                // The duration bounds also went to the server, but the
                // stage runs here regardless so results behave the same
                // whether or not the collaborator applied them.
                let results = filter_stage::apply(response.results, None, ticket.duration);
                CircularOutcome::Loaded(results)
            }
            Err(err) => CircularOutcome::Failed(err.to_string()),
        }
    }

    /// Apply a completed fetch; stale tickets are discarded.
    pub fn finish(&mut self, ticket: CircularTicket, outcome: CircularOutcome) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale circular-route completion"
            );
            return false;
        }
        self.pending_filters = None;
        match outcome {
            CircularOutcome::Loaded(results) => {
                self.window = MaterializedPage::new(results, self.page_size);
                self.status = QueryStatus::Ready;
            }
            CircularOutcome::Failed(message) => {
                self.status = QueryStatus::Failed(message);
            }
        }
        true
    }

    pub async fn submit(
        &mut self,
        filters: CircularFilterState,
    ) -> Result<&QueryStatus, SubmitError> {
        let ticket = self.begin(filters)?;
        let outcome = self.run(&ticket).await;
        self.finish(ticket, outcome);
        Ok(&self.status)
    }

    /// Local page navigation; no network involved.
    pub fn page(&mut self) -> &mut MaterializedPage<CircularRouteRecord> {
        &mut self.window
    }

    pub fn window(&self) -> &MaterializedPage<CircularRouteRecord> {
        &self.window
    }

    pub fn visible(&self) -> &[CircularRouteRecord] {
        self.window.slice()
    }

    pub fn total(&self) -> usize {
        self.window.total_items()
    }

    pub fn status(&self) -> &QueryStatus {
        &self.status
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.window.set_page_size(self.page_size);
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
