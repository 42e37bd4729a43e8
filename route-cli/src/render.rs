//! Textual rendering of the screen state: the CLI's stand-in for the map view.

use std::fmt::Write as _;

use route_core::{ScreenState, Suggestion};

/// Markers plus route line, as text.
pub fn summary(state: &ScreenState) -> String {
    let mut out = String::new();

    if let Some(start) = state.start {
        let _ = writeln!(out, "Start  {start}  ({})", state.start_text.trim());
    }
    if let Some(end) = state.end {
        let _ = writeln!(out, "End    {end}  ({})", state.end_text.trim());
    }

    match &state.route {
        Some(route) => {
            let _ = writeln!(
                out,
                "Route  {} points, {}, about {}",
                route.points.len(),
                format_distance(route.distance_m),
                format_duration(route.duration_s),
            );
        }
        None => {
            let _ = writeln!(out, "Route  (none)");
        }
    }

    out
}

pub fn suggestion_line(suggestion: &Suggestion) -> String {
    format!("{}  ({})", suggestion.name, suggestion.display_name)
}

fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m", meters.round() as i64)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

fn format_duration(seconds: f64) -> String {
    let total_minutes = (seconds / 60.0).round() as i64;
    if total_minutes < 60 {
        format!("{total_minutes} min")
    } else {
        format!("{} h {} min", total_minutes / 60, total_minutes % 60)
    }
}
