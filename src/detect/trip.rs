//! Subway trip summary detection
//!
//! The trip-planning tool's result reaches the chat as a short summary
//! (`Travel time: 23 minutes`, `Departure time: ...`, `Arrival time: ...`).
//! Pulling those fields out lets the UI show a trip card beside the map.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static TRAVEL_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^\s*Travel time:\s*(\d+(?:\.\d+)?)\s*minutes?")
        .expect("travel time pattern is valid")
});
static DEPARTURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^\s*Departure time:[ \t]*(.*?)\s*$").expect("departure pattern is valid")
});
static ARRIVAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^\s*Arrival time:[ \t]*(.*?)\s*$").expect("arrival pattern is valid")
});

/// Timing fields of a planned subway trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_time_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
}

/// Extract trip timing fields; `None` unless at least one is present
pub fn detect_trip_summary(text: &str) -> Option<TripSummary> {
    let summary = TripSummary {
        travel_time_minutes: TRAVEL_TIME
            .captures(text)
            .and_then(|caps| caps[1].parse().ok()),
        departure_time: field(&DEPARTURE, text),
        arrival_time: field(&ARRIVAL, text),
    };

    let any = summary.travel_time_minutes.is_some()
        || summary.departure_time.is_some()
        || summary.arrival_time.is_some();
    any.then_some(summary)
}

fn field(pattern: &Regex, text: &str) -> Option<String> {
    let value = pattern.captures(text)?.get(1)?.as_str();
    // The tool renders missing values as "None"
    (!value.is_empty() && value != "None").then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_summary() {
        let text = "Subway trip plan:\n\
                    Origin: (40.75, -73.99)\n\
                    Destination: (40.71, -74.0)\n\
                    Travel time: 23 minutes\n\
                    Departure time: 08:15\n\
                    Arrival time: 08:38";

        let trip = detect_trip_summary(text).unwrap();
        assert_eq!(trip.travel_time_minutes, Some(23.0));
        assert_eq!(trip.departure_time.as_deref(), Some("08:15"));
        assert_eq!(trip.arrival_time.as_deref(), Some("08:38"));
    }

    #[test]
    fn test_none_values_are_absent() {
        let text = "Travel time: 12.5 minutes\nDeparture time: None\nArrival time: None";
        let trip = detect_trip_summary(text).unwrap();
        assert_eq!(trip.travel_time_minutes, Some(12.5));
        assert_eq!(trip.departure_time, None);
        assert_eq!(trip.arrival_time, None);
    }

    #[test]
    fn test_all_missing_is_absent() {
        let text = "Travel time: None minutes\nDeparture time: None\nArrival time: None";
        assert_eq!(detect_trip_summary(text), None);
        assert_eq!(detect_trip_summary("Just chatting."), None);
    }

    #[test]
    fn test_serialization_skips_missing_fields() {
        let trip = detect_trip_summary("Arrival time: 09:00").unwrap();
        let value = serde_json::to_value(&trip).unwrap();
        assert_eq!(value, serde_json::json!({"arrival_time": "09:00"}));
    }
}
