//! Value encoding primitives
//!
//! Every function here appends to a caller-owned byte buffer and never fails.
//! Integers are rendered digit by digit so no formatting machinery runs on
//! the hot path.
//!
//! Floats are lossy: the integer part is exact and the fractional part is
//! truncated (not rounded) to three digits, so `3.14159` renders as `3.141`.

use super::log_context::FieldValue;
use super::output_format::OutputFormat;

/// Placeholder written for values that cannot be represented
pub const UNKNOWN_PLACEHOLDER: &str = "unknown";

/// Largest float magnitude whose integer part fits in an `i64`
const FLOAT_INT_LIMIT: f64 = 9_223_372_036_854_775_807.0;

/// Append the base-10 form of `value`
pub fn append_int(buf: &mut Vec<u8>, value: i64) {
    if value < 0 {
        buf.push(b'-');
    }
    append_uint(buf, value.unsigned_abs());
}

/// Append the base-10 form of an unsigned value
pub fn append_uint(buf: &mut Vec<u8>, mut value: u64) {
    if value == 0 {
        buf.push(b'0');
        return;
    }

    let mut tmp = [0u8; 20];
    let mut idx = tmp.len();
    while value > 0 {
        idx -= 1;
        tmp[idx] = b'0' + (value % 10) as u8;
        value /= 10;
    }
    buf.extend_from_slice(&tmp[idx..]);
}

/// Append `value` left-padded with zeros to `width` digits
pub(crate) fn append_padded(buf: &mut Vec<u8>, mut value: u32, width: usize) {
    let mut tmp = [b'0'; 10];
    let width = width.min(tmp.len());
    let mut idx = tmp.len();
    while value > 0 && idx > 0 {
        idx -= 1;
        tmp[idx] = b'0' + (value % 10) as u8;
        value /= 10;
    }
    let start = idx.min(tmp.len() - width);
    buf.extend_from_slice(&tmp[start..]);
}

/// Returns the truncated `(integer, thousandths)` parts of a finite float,
/// or `None` when it has no such representation.
fn float_parts(value: f64) -> Option<(bool, u64, u32)> {
    if !value.is_finite() || value.abs() >= FLOAT_INT_LIMIT {
        return None;
    }
    let negative = value < 0.0;
    let abs = value.abs();
    let integer = abs.trunc();
    let millis = ((abs - integer) * 1000.0) as u32;
    Some((negative, integer as u64, millis.min(999)))
}

/// Append the truncated three-decimal rendering of `value`.
///
/// Returns `false` (and appends nothing) for NaN, infinities and magnitudes
/// beyond the `i64` range; callers substitute the placeholder.
pub fn append_float(buf: &mut Vec<u8>, value: f64) -> bool {
    let Some((negative, integer, millis)) = float_parts(value) else {
        return false;
    };

    if integer == 0 && millis == 0 {
        buf.push(b'0');
        return true;
    }

    if negative {
        buf.push(b'-');
    }
    append_uint(buf, integer);
    if millis > 0 {
        buf.push(b'.');
        append_padded(buf, millis, 3);
    }
    true
}

/// Append `s` with JSON escaping for `"`, `\`, newline, carriage return and
/// tab. Other bytes pass through unchanged.
pub fn append_json_string(buf: &mut Vec<u8>, s: &str) {
    let bytes = s.as_bytes();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        let escaped: &[u8] = match b {
            b'"' => b"\\\"",
            b'\\' => b"\\\\",
            b'\n' => b"\\n",
            b'\r' => b"\\r",
            b'\t' => b"\\t",
            _ => continue,
        };
        buf.extend_from_slice(&bytes[start..i]);
        buf.extend_from_slice(escaped);
        start = i + 1;
    }
    buf.extend_from_slice(&bytes[start..]);
}

/// Append `s` as a quoted, escaped JSON string
pub fn append_json_quoted(buf: &mut Vec<u8>, s: &str) {
    buf.push(b'"');
    append_json_string(buf, s);
    buf.push(b'"');
}

/// Whether a text-mode value must be wrapped in quotes
pub fn needs_quoting(s: &str) -> bool {
    s.bytes().any(|b| b == b' ' || b == b'=' || b == b'"')
}

fn append_text_str(buf: &mut Vec<u8>, s: &str) {
    if needs_quoting(s) {
        buf.push(b'"');
        buf.extend_from_slice(s.as_bytes());
        buf.push(b'"');
    } else {
        buf.extend_from_slice(s.as_bytes());
    }
}

fn append_bool(buf: &mut Vec<u8>, value: bool) {
    buf.extend_from_slice(if value { b"true" } else { b"false" });
}

/// Append a JSON value
pub fn append_json_value(buf: &mut Vec<u8>, value: &FieldValue<'_>) {
    match value {
        FieldValue::Str(s) => append_json_quoted(buf, s),
        FieldValue::Int(i) => append_int(buf, *i),
        FieldValue::Float(f) => {
            if !append_float(buf, *f) {
                append_json_quoted(buf, UNKNOWN_PLACEHOLDER);
            }
        }
        FieldValue::Bool(b) => append_bool(buf, *b),
        FieldValue::Unknown => append_json_quoted(buf, UNKNOWN_PLACEHOLDER),
    }
}

/// Append a text-mode value
pub fn append_text_value(buf: &mut Vec<u8>, value: &FieldValue<'_>) {
    match value {
        FieldValue::Str(s) => append_text_str(buf, s),
        FieldValue::Int(i) => append_int(buf, *i),
        FieldValue::Float(f) => {
            if !append_float(buf, *f) {
                append_text_str(buf, UNKNOWN_PLACEHOLDER);
            }
        }
        FieldValue::Bool(b) => append_bool(buf, *b),
        FieldValue::Unknown => append_text_str(buf, UNKNOWN_PLACEHOLDER),
    }
}

impl FieldValue<'_> {
    /// Append this value in the lexical form of `format`
    pub fn encode(&self, buf: &mut Vec<u8>, format: OutputFormat) {
        match format {
            OutputFormat::Text => append_text_value(buf, self),
            OutputFormat::Json => append_json_value(buf, self),
        }
    }
}
