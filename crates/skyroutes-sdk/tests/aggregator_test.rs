//! Directional aggregation tests against in-memory sources.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use skyroutes_core::{AggregateKey, CircularRoutesResponse, RoutesResponse};
use skyroutes_sdk::aggregator::fetch_bidirectional;
use skyroutes_sdk::{ApiError, CircularRouteQuery, RouteQuery, RouteSource};

use common::{route, routes_response, unavailable, FakeSource};

fn lhr_key() -> AggregateKey {
    AggregateKey::Airport("LHR".to_string())
}

#[tokio::test]
async fn merges_and_dedups_both_directions() {
    let source = FakeSource::new(|query| {
        if query.departure_iata.is_some() {
            Ok(routes_response(
                vec![
                    route(1, "LHR", "AMS"),
                    route(2, "LHR", "CDG"),
                    route(3, "LHR", "JFK"),
                ],
                3,
            ))
        } else {
            Ok(routes_response(
                vec![route(3, "LHR", "JFK"), route(4, "JFK", "LHR")],
                2,
            ))
        }
    });

    let set = fetch_bidirectional(&source, &lhr_key()).await.unwrap();
    let ids: Vec<i64> = set.routes.iter().map(|r| r.route_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert!(!set.truncated);

    // One call per direction, each with the key bound to a single role.
    let calls = source.recorded_route_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls
        .iter()
        .any(|c| c.departure_iata.as_deref() == Some("LHR") && c.arrival_iata.is_none()));
    assert!(calls
        .iter()
        .any(|c| c.arrival_iata.as_deref() == Some("LHR") && c.departure_iata.is_none()));
}

#[tokio::test]
async fn truncation_is_observable_when_a_side_exceeds_the_cap() {
    let source = FakeSource::new(|query| {
        if query.departure_iata.is_some() {
            Ok(routes_response(vec![route(1, "LHR", "AMS")], 250))
        } else {
            Ok(routes_response(vec![route(2, "AMS", "LHR")], 40))
        }
    });

    let set = fetch_bidirectional(&source, &lhr_key()).await.unwrap();
    assert!(set.truncated);
}

#[tokio::test]
async fn either_failure_fails_the_whole_query() {
    let source = FakeSource::new(|query| {
        if query.departure_iata.is_some() {
            Ok(routes_response(vec![route(1, "LHR", "AMS")], 1))
        } else {
            Err(unavailable())
        }
    });

    let err = fetch_bidirectional(&source, &lhr_key()).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
}

/// Both directional requests must be in flight at the same time: each
/// handler waits for the other before answering, so a sequential
/// implementation would deadlock here.
#[tokio::test]
async fn directional_calls_run_concurrently() {
    struct BarrierSource {
        barrier: tokio::sync::Barrier,
    }

    impl RouteSource for BarrierSource {
        async fn fetch_routes(&self, query: &RouteQuery) -> Result<RoutesResponse, ApiError> {
            self.barrier.wait().await;
            let id = if query.departure_iata.is_some() { 1 } else { 2 };
            Ok(routes_response(vec![route(id, "LHR", "AMS")], 1))
        }

        async fn fetch_circular_routes(
            &self,
            _query: &CircularRouteQuery,
        ) -> Result<CircularRoutesResponse, ApiError> {
            Ok(CircularRoutesResponse {
                results: Vec::new(),
            })
        }
    }

    let source = BarrierSource {
        barrier: tokio::sync::Barrier::new(2),
    };

    let set = tokio::time::timeout(
        Duration::from_secs(5),
        fetch_bidirectional(&source, &lhr_key()),
    )
    .await
    .expect("directional calls were issued sequentially")
    .unwrap();
    assert_eq!(set.routes.len(), 2);
}

/// When one direction fails, the still-pending call is dropped rather
/// than awaited: fail-fast with cancellation.
#[tokio::test(start_paused = true)]
async fn pending_call_is_cancelled_when_the_other_fails() {
    struct FailFastSource {
        arrival_started: Arc<AtomicBool>,
        arrival_completed: Arc<AtomicBool>,
    }

    impl RouteSource for FailFastSource {
        async fn fetch_routes(&self, query: &RouteQuery) -> Result<RoutesResponse, ApiError> {
            if query.departure_iata.is_some() {
                // Fail after a yield so the arrival call is in flight
                // by the time the error lands.
                tokio::time::sleep(Duration::from_secs(1)).await;
                return Err(unavailable());
            }
            self.arrival_started.store(true, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_secs(30)).await;
            self.arrival_completed.store(true, Ordering::SeqCst);
            Ok(routes_response(vec![route(1, "AMS", "LHR")], 1))
        }

        async fn fetch_circular_routes(
            &self,
            _query: &CircularRouteQuery,
        ) -> Result<CircularRoutesResponse, ApiError> {
            Ok(CircularRoutesResponse {
                results: Vec::new(),
            })
        }
    }

    let arrival_started = Arc::new(AtomicBool::new(false));
    let arrival_completed = Arc::new(AtomicBool::new(false));
    let source = FailFastSource {
        arrival_started: arrival_started.clone(),
        arrival_completed: arrival_completed.clone(),
    };

    let result = fetch_bidirectional(&source, &lhr_key()).await;
    assert!(result.is_err());
    assert!(arrival_started.load(Ordering::SeqCst));

    // Give the cancelled future's timer every chance to fire; it cannot,
    // because the future was dropped with the failed join.
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(!arrival_completed.load(Ordering::SeqCst));
}
