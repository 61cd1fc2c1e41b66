//! Client-side filters over an already-fetched result set.
//!
//! In aggregate mode the listing API cannot apply the airline or
//! duration predicates to the merged set, so they run here. The
//! circular-route view reuses the same stage for its duration bounds.
//! The stage is pure and order-preserving; it never touches the network.

use crate::filters::DurationRange;
use crate::models::{CircularRouteRecord, RouteRecord};

/// Anything the client-side stage can filter.
pub trait Filterable {
    fn duration_min(&self) -> u32;
    /// Airline name for substring matching; `None` for record types that
    /// are already scoped to one airline.
    fn airline_name(&self) -> Option<&str>;
}

impl Filterable for RouteRecord {
    fn duration_min(&self) -> u32 {
        self.duration_min
    }

    fn airline_name(&self) -> Option<&str> {
        Some(&self.airline_name)
    }
}

impl Filterable for CircularRouteRecord {
    fn duration_min(&self) -> u32 {
        self.total_duration_min
    }

    fn airline_name(&self) -> Option<&str> {
        None
    }
}

/// Apply the airline-name and duration filters in one pass.
///
/// An inverted duration range never reaches this stage; the form layer
/// rejects it first.
pub fn apply<T: Filterable>(
    mut records: Vec<T>,
    airline_name: Option<&str>,
    duration: Option<DurationRange>,
) -> Vec<T> {
    if let Some(needle) = airline_name.filter(|n| !n.is_empty()) {
        let needle = needle.to_lowercase();
        records.retain(|r| {
            r.airline_name()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        });
    }
    if let Some(range) = duration {
        records.retain(|r| range.contains(r.duration_min()));
    }
    records
}
