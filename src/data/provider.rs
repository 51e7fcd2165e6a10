use crate::foundation::core::TimeCursor;
use crate::schema::value::Scalar;
use std::collections::{BTreeMap, HashMap};

/// Source of time-indexed values for bound element properties.
///
/// `resolve` runs inside frame preparation and must return immediately: a provider
/// backed by slow IO answers `None` until its data is cached, and may push late results
/// through [`crate::SceneBuilder::deliver_binding`].
pub trait DataProvider {
    /// Value of `data_key` at `cursor`, or `None` when not (yet) available.
    fn resolve(&self, data_key: &str, cursor: TimeCursor) -> Option<Scalar>;
}

impl<F> DataProvider for F
where
    F: Fn(&str, TimeCursor) -> Option<Scalar>,
{
    fn resolve(&self, data_key: &str, cursor: TimeCursor) -> Option<Scalar> {
        self(data_key, cursor)
    }
}

/// Provider with no data; every binding falls back.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoData;

impl DataProvider for NoData {
    fn resolve(&self, _data_key: &str, _cursor: TimeCursor) -> Option<Scalar> {
        None
    }
}

/// In-memory time series per data key, sampled as a step function.
///
/// A lookup returns the latest sample at or before the cursor, and `None` before the
/// first sample.
#[derive(Clone, Debug, Default)]
pub struct TimelineData {
    series: HashMap<String, BTreeMap<TimeCursor, Scalar>>,
}

impl TimelineData {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `data_key` at `at`, replacing any sample already there.
    pub fn insert(
        &mut self,
        data_key: impl Into<String>,
        at: TimeCursor,
        value: impl Into<Scalar>,
    ) {
        self.series
            .entry(data_key.into())
            .or_default()
            .insert(at, value.into());
    }

    /// Drop every sample of `data_key`; returns `true` if the key existed.
    pub fn remove_key(&mut self, data_key: &str) -> bool {
        self.series.remove(data_key).is_some()
    }

    /// Return `true` if any sample exists for `data_key`.
    pub fn contains_key(&self, data_key: &str) -> bool {
        self.series.contains_key(data_key)
    }
}

impl DataProvider for TimelineData {
    fn resolve(&self, data_key: &str, cursor: TimeCursor) -> Option<Scalar> {
        self.series
            .get(data_key)?
            .range(..=cursor)
            .next_back()
            .map(|(_, v)| *v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/provider.rs"]
mod tests;
