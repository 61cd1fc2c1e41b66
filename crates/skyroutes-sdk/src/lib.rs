//! Skyroutes SDK - client library for the route listing and schedule
//! services.
//!
//! Provides the HTTP collaborator clients plus the query aggregation and
//! session engine used by the browsing front ends.

pub mod aggregator;
pub mod client;
pub mod error;
pub mod schedule;
pub mod session;
pub mod source;

pub use aggregator::{AggregateSet, DIRECTIONAL_PAGE_CAP};
pub use client::ListingClient;
pub use error::ApiError;
pub use schedule::{GeneratedSchedule, ScheduleClient, ScheduleConfig};
pub use session::{CircularBrowser, QueryStatus, RouteBrowser, SubmitError};
pub use source::{CircularRouteQuery, RouteQuery, RouteSource};
