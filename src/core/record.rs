use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Keeps only values that can be placed on a continuous axis.
#[must_use]
pub fn continuous(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// One dynamically typed record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Decimal(Decimal),
    Time(DateTime<Utc>),
    Text(String),
}

impl FieldValue {
    /// Returns the value when it can be placed on a continuous axis.
    ///
    /// Numbers must be finite; timestamps map to unix seconds; text, booleans
    /// and nulls are never continuous.
    #[must_use]
    pub fn as_continuous(&self) -> Option<f64> {
        match self {
            Self::Number(value) => continuous(*value),
            Self::Decimal(value) => value.to_f64().and_then(continuous),
            Self::Time(time) => continuous(time.timestamp_millis() as f64 / 1000.0),
            Self::Null | Self::Bool(_) | Self::Text(_) => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Ordered keyed record, the default row type of a histogram series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts a JSON object into a record. Returns `None` for non-objects.
    ///
    /// Nested arrays and objects become `FieldValue::Null`.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let fields = object
            .iter()
            .map(|(key, value)| {
                let field = match value {
                    serde_json::Value::Number(number) => {
                        number.as_f64().map_or(FieldValue::Null, FieldValue::Number)
                    }
                    serde_json::Value::String(text) => FieldValue::Text(text.clone()),
                    serde_json::Value::Bool(flag) => FieldValue::Bool(*flag),
                    _ => FieldValue::Null,
                };
                (key.clone(), field)
            })
            .collect();
        Some(Self { fields })
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Read access to continuous field values by name.
pub trait KeyedRecord {
    fn continuous_field(&self, key: &str) -> Option<f64>;
}

impl KeyedRecord for Record {
    fn continuous_field(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(FieldValue::as_continuous)
    }
}

impl KeyedRecord for serde_json::Value {
    fn continuous_field(&self, key: &str) -> Option<f64> {
        self.get(key)
            .and_then(serde_json::Value::as_f64)
            .and_then(continuous)
    }
}

impl<R: KeyedRecord + ?Sized> KeyedRecord for Arc<R> {
    fn continuous_field(&self, key: &str) -> Option<f64> {
        (**self).continuous_field(key)
    }
}

impl<R: KeyedRecord + ?Sized> KeyedRecord for &R {
    fn continuous_field(&self, key: &str) -> Option<f64> {
        (**self).continuous_field(key)
    }
}

pub type FieldReadFn<T> = Arc<dyn Fn(&T) -> Option<f64> + Send + Sync + 'static>;

/// Field reader bound once per key.
///
/// Reads always return finite values or `None`.
pub struct FieldAccessor<T> {
    key: String,
    read: FieldReadFn<T>,
}

impl<T> FieldAccessor<T> {
    pub fn from_fn(
        key: impl Into<String>,
        read: impl Fn(&T) -> Option<f64> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            read: Arc::new(read),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn read(&self, record: &T) -> Option<f64> {
        (self.read)(record).and_then(continuous)
    }
}

impl<T: KeyedRecord + 'static> FieldAccessor<T> {
    /// Binds a named field. An empty key means "not configured" and yields `None`.
    #[must_use]
    pub fn bind(key: &str) -> Option<Self> {
        if key.is_empty() {
            return None;
        }
        let owned = key.to_owned();
        Some(Self::from_fn(key, move |record: &T| {
            record.continuous_field(&owned)
        }))
    }
}

impl<T> Clone for FieldAccessor<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            read: Arc::clone(&self.read),
        }
    }
}

impl<T> fmt::Debug for FieldAccessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
