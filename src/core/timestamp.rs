//! Timestamp sources and rendering
//!
//! Timestamps are written digit by digit straight into the record buffer:
//! - text records: `2025-01-08T10:30:45.123Z`, always UTC
//! - JSON records: `2025-01-08T10:30:45.123456789Z` in UTC, or with a
//!   `+HH:MM` / `-HH:MM` offset when local time is selected

use super::encoder::{append_int, append_padded};
use chrono::{DateTime, Datelike, Local, Offset, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Source of "now" for record timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant, for reproducible output
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Time zone used for JSON timestamps
///
/// Text records always use UTC regardless of this setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeZoneMode {
    Utc,
    #[default]
    Local,
}

impl TimeZoneMode {
    /// `true`/`1` (any case) selects UTC, anything else local time
    pub fn from_env_value(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("true") || value == "1" {
            TimeZoneMode::Utc
        } else {
            TimeZoneMode::Local
        }
    }
}

fn append_date_time<Tz: TimeZone>(buf: &mut Vec<u8>, dt: &DateTime<Tz>) {
    let year = dt.year();
    if (0..=9999).contains(&year) {
        append_padded(buf, year as u32, 4);
    } else {
        append_int(buf, i64::from(year));
    }
    buf.push(b'-');
    append_padded(buf, dt.month(), 2);
    buf.push(b'-');
    append_padded(buf, dt.day(), 2);
    buf.push(b'T');
    append_padded(buf, dt.hour(), 2);
    buf.push(b':');
    append_padded(buf, dt.minute(), 2);
    buf.push(b':');
    append_padded(buf, dt.second(), 2);
}

// Leap seconds are reported as nanos >= 1e9; fold them into the last
// representable instant of the second.
fn subsec_nanos<Tz: TimeZone>(dt: &DateTime<Tz>) -> u32 {
    dt.nanosecond().min(999_999_999)
}

fn append_offset(buf: &mut Vec<u8>, offset_secs: i32) {
    if offset_secs == 0 {
        buf.push(b'Z');
        return;
    }
    buf.push(if offset_secs < 0 { b'-' } else { b'+' });
    let minutes = offset_secs.unsigned_abs() / 60;
    append_padded(buf, minutes / 60, 2);
    buf.push(b':');
    append_padded(buf, minutes % 60, 2);
}

/// Millisecond-precision UTC timestamp with a literal `Z`
pub fn append_text_timestamp(buf: &mut Vec<u8>, now: &DateTime<Utc>) {
    append_date_time(buf, now);
    buf.push(b'.');
    append_padded(buf, subsec_nanos(now) / 1_000_000, 3);
    buf.push(b'Z');
}

/// Nanosecond-precision timestamp in the requested zone
pub fn append_json_timestamp(buf: &mut Vec<u8>, now: &DateTime<Utc>, zone: TimeZoneMode) {
    match zone {
        TimeZoneMode::Utc => {
            append_date_time(buf, now);
            buf.push(b'.');
            append_padded(buf, subsec_nanos(now), 9);
            buf.push(b'Z');
        }
        TimeZoneMode::Local => {
            let local = now.with_timezone(&Local);
            append_date_time(buf, &local);
            buf.push(b'.');
            append_padded(buf, subsec_nanos(&local), 9);
            append_offset(buf, local.offset().fix().local_minus_utc());
        }
    }
}
