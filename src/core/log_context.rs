//! Structured fields attached to a record
//!
//! This module provides:
//! - `FieldValue`: the closed set of value kinds a field can carry
//! - `Field`: one ordered key/value pair
//! - `TracingContext`: trace/span identifiers resolved by the caller

use std::borrow::Cow;
use std::fmt;

/// Value type for structured logging fields
///
/// Anything outside the string/integer/float/bool set is carried as
/// `Unknown` and encoded as the `unknown` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Str(Cow<'a, str>),
    Int(i64),
    Float(f64),
    Bool(bool),
    Unknown,
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Unknown => f.write_str("unknown"),
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(s: &'a str) -> Self {
        FieldValue::Str(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(s: &'a String) -> Self {
        FieldValue::Str(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for FieldValue<'_> {
    fn from(s: String) -> Self {
        FieldValue::Str(Cow::Owned(s))
    }
}

impl<'a> From<Cow<'a, str>> for FieldValue<'a> {
    fn from(s: Cow<'a, str>) -> Self {
        FieldValue::Str(s)
    }
}

macro_rules! impl_from_lossless_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue<'_> {
                fn from(i: $ty) -> Self {
                    FieldValue::Int(i64::from(i))
                }
            }
        )*
    };
}

impl_from_lossless_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue<'_> {
                fn from(i: $ty) -> Self {
                    i64::try_from(i).map(FieldValue::Int).unwrap_or(FieldValue::Unknown)
                }
            }
        )*
    };
}

// Values outside the signed 64-bit range are not representable
impl_from_wide_int!(isize, u64, usize, i128, u128);

impl From<f64> for FieldValue<'_> {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<f32> for FieldValue<'_> {
    fn from(f: f32) -> Self {
        FieldValue::Float(f64::from(f))
    }
}

impl From<bool> for FieldValue<'_> {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<'a, T> From<Option<T>> for FieldValue<'a>
where
    T: Into<FieldValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Unknown)
    }
}

/// A single key/value pair attached to a record
///
/// Fields keep their order; duplicate keys are emitted as given.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<'a> {
    pub key: Cow<'a, str>,
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<Cow<'a, str>>,
        V: Into<FieldValue<'a>>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// A field whose value cannot be represented; encodes as `unknown`
    pub fn unknown<K: Into<Cow<'a, str>>>(key: K) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::Unknown,
        }
    }
}

/// Tracing context for distributed tracing
///
/// The caller resolves the identifiers; the logger only renders them as
/// `traceID` and `spanID` fields ahead of the call's own fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TracingContext {
    /// Trace ID for request correlation
    pub trace_id: Option<String>,

    /// Span ID for this operation
    pub span_id: Option<String>,
}

impl TracingContext {
    pub const TRACE_ID_KEY: &'static str = "traceID";
    pub const SPAN_ID_KEY: &'static str = "spanID";

    /// Create a new tracing context
    pub fn new(trace_id: impl Into<String>, span_id: impl Into<String>) -> Self {
        Self {
            trace_id: Some(trace_id.into()),
            span_id: Some(span_id.into()),
        }
    }

    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    #[must_use]
    pub fn with_span_id(mut self, span_id: impl Into<String>) -> Self {
        self.span_id = Some(span_id.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.trace_id.is_none() && self.span_id.is_none()
    }

    /// Context fields followed by `fields`, in that order
    pub fn prepend_to<'a>(&'a self, fields: &[Field<'a>]) -> Vec<Field<'a>> {
        let mut all = Vec::with_capacity(fields.len() + 2);
        if let Some(ref trace_id) = self.trace_id {
            all.push(Field::new(Self::TRACE_ID_KEY, trace_id.as_str()));
        }
        if let Some(ref span_id) = self.span_id {
            all.push(Field::new(Self::SPAN_ID_KEY, span_id.as_str()));
        }
        all.extend_from_slice(fields);
        all
    }
}
