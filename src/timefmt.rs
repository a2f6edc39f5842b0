//! Humanized relative-age formatting for remote timestamps.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Bucket a non-negative age in seconds into a human label.
///
/// Divisions floor toward zero; each bucket is inclusive on its lower bound.
pub fn time_ago(delta_secs: i64) -> String {
    if delta_secs < 60 {
        return "just now".to_string();
    }

    let mins = delta_secs / 60;
    if mins < 60 {
        return plural(mins, "minute");
    }

    let hours = mins / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    plural(hours / 24, "day")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Age of an RFC3339 timestamp relative to `now`. `None` when it does not
/// parse; future timestamps clamp to zero age.
pub fn time_ago_str(ts: &str, now: OffsetDateTime) -> Option<String> {
    let dt = OffsetDateTime::parse(ts, &Rfc3339).ok()?;
    let delta = (now - dt).whole_seconds().max(0);
    Some(time_ago(delta))
}

/// Epoch seconds for an RFC3339 timestamp, 0 when unparseable. Used for
/// sorting only; the raw string stays the display value.
pub fn parse_epoch(ts: &str) -> i64 {
    OffsetDateTime::parse(ts, &Rfc3339)
        .map(|dt| dt.unix_timestamp())
        .unwrap_or(0)
}

pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}

#[cfg(test)]
#[path = "tests/timefmt/buckets_tests.rs"]
mod tests;
