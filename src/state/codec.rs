//! Role: The state codec between the query form and the URL fragment.
//!
//! The fragment is the single durable representation of a query; the form is
//! a derived view. `encode` and `decode` are pure transforms over those two
//! shapes. Timestamps live as epoch seconds in the fragment and as local
//! `YYYY-MM-DDTHH:MM` strings in the form, so the round trip is lossy below
//! minute granularity.

use chrono::{Local, NaiveDateTime, TimeZone};
use tracing::{debug, warn};

use crate::catalog::AgentCatalog;
use crate::state::fields::{is_timestamp_key, FieldKey};
use crate::state::form::QueryForm;

pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Serialize the filled form fields into a URL fragment.
///
/// Empty fields are omitted, timestamp displays become epoch seconds, and
/// checked breakdown checkboxes join into one comma-separated `Breakdown`
/// value in checkbox order.
pub fn encode(form: &QueryForm) -> String {
    let mut pairs: Vec<String> = Vec::new();

    for field in FieldKey::ALL {
        let Some(value) = form.value(field) else {
            continue;
        };

        let value = if field.is_timestamp() {
            match epoch_from_display(value) {
                Some(epoch) => epoch.to_string(),
                None => {
                    warn!(field = field.key(), value, "unparseable timestamp, skipping");
                    continue;
                }
            }
        } else {
            value.to_string()
        };

        pairs.push(format!("{}={}", field.key(), urlencoding::encode(&value)));
    }

    let breakdown = form.checked_breakdowns();
    if !breakdown.is_empty() {
        pairs.push(format!(
            "Breakdown={}",
            urlencoding::encode(&breakdown.join(","))
        ));
    }

    pairs.join("&")
}

/// Populate the form from a URL fragment and re-derive the
/// interface-autocomplete candidates.
///
/// An empty fragment is the initial idle state and leaves the form alone.
/// Malformed pairs (missing value half, undecodable text, bad epoch, unknown
/// key) are skipped rather than aborting the decode.
pub fn decode(fragment: &str, catalog: &AgentCatalog, form: &mut QueryForm) {
    if fragment.is_empty() {
        return;
    }

    for pair in fragment.split('&') {
        let Some((raw_key, raw_value)) = pair.split_once('=') else {
            debug!(pair, "fragment pair without value, skipping");
            continue;
        };
        let (Some(key), Some(value)) = (decode_component(raw_key), decode_component(raw_value))
        else {
            debug!(pair, "undecodable fragment pair, skipping");
            continue;
        };

        if is_timestamp_key(&key) {
            apply_timestamp(&key, &value, form);
        } else if key == "Breakdown" {
            for dimension in value.split(',') {
                form.set_checked(dimension, true);
            }
        } else if let Some(field) = FieldKey::from_key(&key) {
            form.set_value(field, value);
        } else {
            debug!(%key, "unknown fragment key, skipping");
        }
    }

    form.refresh_interface_candidates(catalog);
}

fn apply_timestamp(key: &str, value: &str, form: &mut QueryForm) {
    let Some(field) = FieldKey::from_key(key) else {
        debug!(key, "unknown timestamp key, skipping");
        return;
    };
    match value.parse::<i64>().ok().and_then(display_from_epoch) {
        Some(display) => form.set_value(field, display),
        None => warn!(key, value, "bad epoch seconds, skipping"),
    }
}

/// Decode one key or value half of a fragment pair.
///
/// Legacy quirk, kept for round-trip compatibility with existing shared
/// links: only the FIRST literal `+` becomes a space, then the half is
/// percent-decoded. Our own encoder emits `%2B` for `+`, so the quirk only
/// affects foreign links.
fn decode_component(half: &str) -> Option<String> {
    let half = half.replacen('+', " ", 1);
    urlencoding::decode(&half).ok().map(|c| c.into_owned())
}

/// Render epoch seconds as the minute-granular local display string.
pub fn display_from_epoch(epoch: i64) -> Option<String> {
    Local
        .timestamp_opt(epoch, 0)
        .single()
        .map(|dt| dt.format(TIMESTAMP_DISPLAY_FORMAT).to_string())
}

/// Parse a local display string back into epoch seconds.
pub fn epoch_from_display(display: &str) -> Option<i64> {
    let naive = NaiveDateTime::parse_from_str(display, TIMESTAMP_DISPLAY_FORMAT).ok()?;
    Local
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.timestamp())
}
