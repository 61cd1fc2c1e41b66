//! Skyroutes CLI - command line front end for the route browser.
//!
//! Binaries:
//! - search_routes: direct and bi-directional route search
//! - search_circular: circular-route search with local paging
//! - generate_schedule: forward a config to the schedule service

pub mod config;
pub mod output;
