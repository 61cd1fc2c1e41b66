//! URL query-string codec for filter state.
//!
//! The browser address bar is the durable snapshot of a query, so the
//! codec is the boundary between `FilterState` and the outside world.
//! Decoding ignores unknown keys for forward compatibility; encoding
//! writes only non-empty, non-default fields so a cleared filter drops
//! its key instead of writing an empty string.

use url::form_urlencoded;

use crate::filters::{
    AggregateKey, CircularFilterState, DurationRange, FilterState, PatternFilter,
    DEFAULT_CIRCULAR_LIMIT, MAX_CIRCULAR_DURATION, MAX_DURATION, MIN_DURATION,
};

// Reserved keys: the omni filters and the one-shot auto-apply marker.
const KEY_AIRPORT: &str = "airport_iata";
const KEY_COUNTRY: &str = "country";
const KEY_AUTO_APPLY: &str = "auto_apply";

/// Decode a route-search query string (with or without a leading `?`).
///
/// If an omni key is present the state is aggregate-mode; the airport key
/// wins when both appear. The `auto_apply` marker is consumed here and is
/// never re-encoded, so it fires at most once per navigation.
pub fn decode(query: &str) -> FilterState {
    let mut state = FilterState::default();
    let mut airport = None;
    let mut country = None;
    let mut min_duration = None;
    let mut max_duration = None;

    for (key, value) in form_urlencoded::parse(strip_leading(query).as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            KEY_AIRPORT => airport = Some(value.into_owned()),
            KEY_COUNTRY => country = Some(value.into_owned()),
            KEY_AUTO_APPLY => state.auto_apply = value == "true",
            "airline_name" => state.airline_name = Some(value.into_owned()),
            "departure_iata" => state.endpoints.departure_iata = Some(value.into_owned()),
            "arrival_iata" => state.endpoints.arrival_iata = Some(value.into_owned()),
            "departure_country" => state.endpoints.departure_country = Some(value.into_owned()),
            "arrival_country" => state.endpoints.arrival_country = Some(value.into_owned()),
            "min_duration" => min_duration = value.parse().ok(),
            "max_duration" => max_duration = value.parse().ok(),
            _ => {} // unknown keys are ignored
        }
    }

    state.aggregate = match (airport, country) {
        (Some(iata), _) => Some(AggregateKey::Airport(iata)),
        (None, Some(name)) => Some(AggregateKey::Country(name)),
        (None, None) => None,
    };
    state.duration = duration_from_parts(min_duration, max_duration, MAX_DURATION);
    state
}

/// Encode a route-search state. The inverse of [`decode`] for every field
/// the form can set; `auto_apply` is intentionally dropped.
pub fn encode(state: &FilterState) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    push_opt(&mut out, "airline_name", state.airline_name.as_deref());
    push_opt(
        &mut out,
        "departure_iata",
        state.endpoints.departure_iata.as_deref(),
    );
    push_opt(
        &mut out,
        "arrival_iata",
        state.endpoints.arrival_iata.as_deref(),
    );
    push_opt(
        &mut out,
        "departure_country",
        state.endpoints.departure_country.as_deref(),
    );
    push_opt(
        &mut out,
        "arrival_country",
        state.endpoints.arrival_country.as_deref(),
    );
    if let Some(range) = state.duration {
        // Once the range control has been touched, both bounds travel
        // together to avoid an asymmetric partial state after a reload.
        out.append_pair("min_duration", &range.min.to_string());
        out.append_pair("max_duration", &range.max.to_string());
    }
    match &state.aggregate {
        Some(AggregateKey::Airport(iata)) => {
            out.append_pair(KEY_AIRPORT, iata);
        }
        Some(AggregateKey::Country(name)) => {
            out.append_pair(KEY_COUNTRY, name);
        }
        None => {}
    }
    out.finish()
}

/// Remove the one-shot `auto_apply` marker from a query string, keeping
/// everything else intact. Used for the address-bar rewrite right after
/// the marker has been consumed.
pub fn strip_auto_apply(query: &str) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    for (key, value) in form_urlencoded::parse(strip_leading(query).as_bytes()) {
        if key != KEY_AUTO_APPLY {
            out.append_pair(&key, &value);
        }
    }
    out.finish()
}

/// Decode a circular-route query string.
pub fn decode_circular(query: &str) -> CircularFilterState {
    let mut state = CircularFilterState::default();
    let mut min_duration = None;
    let mut max_duration = None;

    for (key, value) in form_urlencoded::parse(strip_leading(query).as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "airline_name" => state.airline_name = Some(value.into_owned()),
            "airline_id" => state.airline_id = value.parse().ok(),
            "start_airport" => state.start_airport = Some(value.into_owned()),
            "contains_airport" => state.contains_airport = Some(value.into_owned()),
            "pattern_type" => {
                state.pattern = match value.as_ref() {
                    "triangle" => PatternFilter::Triangle,
                    "arrow" => PatternFilter::Arrow,
                    _ => PatternFilter::Both,
                }
            }
            "min_duration" => min_duration = value.parse().ok(),
            "max_duration" => max_duration = value.parse().ok(),
            "limit" => {
                if let Ok(limit) = value.parse() {
                    state.limit = limit;
                }
            }
            "all" => state.fetch_all = value == "true",
            _ => {}
        }
    }

    state.duration = duration_from_parts(min_duration, max_duration, MAX_CIRCULAR_DURATION);
    state
}

/// Encode a circular-route state; defaults (`pattern=both`, `limit=20`,
/// `all=false`) are left out of the URL.
pub fn encode_circular(state: &CircularFilterState) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    push_opt(&mut out, "airline_name", state.airline_name.as_deref());
    if let Some(id) = state.airline_id {
        out.append_pair("airline_id", &id.to_string());
    }
    push_opt(&mut out, "start_airport", state.start_airport.as_deref());
    push_opt(
        &mut out,
        "contains_airport",
        state.contains_airport.as_deref(),
    );
    match state.pattern {
        PatternFilter::Both => {}
        PatternFilter::Triangle => {
            out.append_pair("pattern_type", "triangle");
        }
        PatternFilter::Arrow => {
            out.append_pair("pattern_type", "arrow");
        }
    }
    if let Some(range) = state.duration {
        out.append_pair("min_duration", &range.min.to_string());
        out.append_pair("max_duration", &range.max.to_string());
    }
    if state.limit != DEFAULT_CIRCULAR_LIMIT {
        out.append_pair("limit", &state.limit.to_string());
    }
    if state.fetch_all {
        out.append_pair("all", "true");
    }
    out.finish()
}

fn duration_from_parts(min: Option<u32>, max: Option<u32>, default_max: u32) -> Option<DurationRange> {
    if min.is_none() && max.is_none() {
        return None;
    }
    Some(DurationRange {
        min: min.unwrap_or(MIN_DURATION),
        max: max.unwrap_or(default_max),
    })
}

fn push_opt(out: &mut form_urlencoded::Serializer<'_, String>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() {
            out.append_pair(key, value);
        }
    }
}

fn strip_leading(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}
