//! Terminal rendering for search results and schedules.

use skyroutes_core::{CircularRouteRecord, PageWindow, RouteRecord};
use skyroutes_sdk::GeneratedSchedule;

/// Format a duration in minutes as "3h 25m".
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

pub fn format_distance(km: f64) -> String {
    format!("{km:.0} km")
}

pub fn print_routes(routes: &[RouteRecord]) {
    for route in routes {
        println!(
            "{:<24} {} ({}, {}) -> {} ({}, {})  {}",
            route.airline_name,
            route.departure_iata,
            route.departure_city,
            route.departure_country,
            route.arrival_iata,
            route.arrival_city,
            route.arrival_country,
            format_duration(route.duration_min),
        );
    }
}

/// "Showing 21 - 40 of 47 routes" for the current window.
pub fn page_summary<T>(window: &PageWindow<T>, visible: usize) -> String {
    match window {
        PageWindow::Server(page) => format!(
            "Showing {} - {} of {} routes",
            page.offset + 1,
            (page.offset + visible).min(page.total),
            page.total
        ),
        PageWindow::Materialized(page) => format!(
            "Page {} of {} ({} routes)",
            page.page(),
            page.total_pages(),
            page.total_items()
        ),
    }
}

pub fn print_circular_routes(routes: &[CircularRouteRecord]) {
    for route in routes {
        println!(
            "{:<9} {}  start {}  {}  {}  {} stops",
            format!("{:?}", route.pattern_type).to_lowercase(),
            route.route_pattern,
            route.start_airport,
            format_duration(route.total_duration_min),
            format_distance(route.total_distance_km),
            route.stops_count,
        );
    }
}

pub fn print_schedule(schedule: &GeneratedSchedule) {
    println!(
        "{} ({} days, generated {})",
        schedule.name,
        schedule.days.len(),
        schedule.created_at.format("%Y-%m-%d %H:%M UTC"),
    );
    for day in &schedule.days {
        println!("Day {} ({}): {} legs, overnight {}", day.day, day.date, day.legs.len(), day.overnight_location);
        for leg in &day.legs {
            println!(
                "  {} {} -> {} {}  ({})",
                leg.departure_time,
                leg.departure_airport,
                leg.arrival_airport,
                leg.arrival_time,
                format_duration(leg.duration_min),
            );
        }
        for note in &day.notes {
            println!("  note: {note}");
        }
    }
}
