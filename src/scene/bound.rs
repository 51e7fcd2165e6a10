use crate::data::provider::DataProvider;
use crate::foundation::core::TimeCursor;
use crate::scene::element::SceneElement;
use crate::schema::property::PropertyKey;
use crate::schema::validate::validate_scalar;
use crate::schema::value::{Binding, Scalar};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Non-fatal report that a bound property could not be freshly resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct StaleBinding {
    /// Id of the element owning the binding.
    pub element: String,
    /// Bound property.
    pub property: PropertyKey,
    /// Data key that could not be resolved.
    pub data_key: String,
    /// Value applied instead: the last resolved value, else the binding default.
    pub fallback: Scalar,
}

#[derive(Clone, Debug)]
struct BindingState {
    binding: Binding,
    last: Option<Scalar>,
    applied: Option<Scalar>,
    stale: bool,
}

/// A [`SceneElement`] whose properties may be resolved from a [`DataProvider`] each
/// update cycle.
#[derive(Clone, Debug)]
pub struct BoundSceneElement {
    element: SceneElement,
    bindings: BTreeMap<PropertyKey, BindingState>,
}

impl BoundSceneElement {
    pub(crate) fn new(element: SceneElement) -> Self {
        Self {
            element,
            bindings: BTreeMap::new(),
        }
    }

    /// Underlying scene element.
    pub fn element(&self) -> &SceneElement {
        &self.element
    }

    /// Mutable access to the underlying scene element.
    pub fn element_mut(&mut self) -> &mut SceneElement {
        &mut self.element
    }

    /// Bind `key` to external data. Rebinding to the same data key keeps the cached value.
    pub(crate) fn bind(&mut self, key: PropertyKey, binding: Binding) {
        let last = self
            .bindings
            .get(&key)
            .filter(|s| s.binding.data_key == binding.data_key)
            .and_then(|s| s.last);
        let initial = last.unwrap_or(binding.default);
        self.element.apply(key, initial);
        self.bindings.insert(
            key,
            BindingState {
                binding,
                last,
                applied: Some(initial),
                stale: false,
            },
        );
    }

    /// Drop the binding on `key`; the property keeps its current value.
    pub(crate) fn unbind(&mut self, key: PropertyKey) {
        self.bindings.remove(&key);
    }

    /// Binding on `key`, if any.
    pub fn binding(&self, key: PropertyKey) -> Option<&Binding> {
        self.bindings.get(&key).map(|s| &s.binding)
    }

    /// Keys that currently carry a binding.
    pub fn bound_keys(&self) -> impl Iterator<Item = PropertyKey> + '_ {
        self.bindings.keys().copied()
    }

    /// Whether the last resolution of `key` fell back.
    pub fn is_stale(&self, key: PropertyKey) -> bool {
        self.bindings.get(&key).is_some_and(|s| s.stale)
    }

    /// Last value successfully resolved or delivered for `key`.
    pub fn last_resolved(&self, key: PropertyKey) -> Option<Scalar> {
        self.bindings.get(&key).and_then(|s| s.last)
    }

    /// Resolve every binding at `cursor` and apply the results.
    ///
    /// Absent or schema-violating data falls back to the last resolved value, then the
    /// default, and is reported as stale. Never fails.
    pub fn resolve(
        &mut self,
        provider: &dyn DataProvider,
        cursor: TimeCursor,
    ) -> SmallVec<[StaleBinding; 2]> {
        let kind = self.element.kind();
        let mut stale = SmallVec::new();

        for (key, state) in self.bindings.iter_mut() {
            let fresh = provider
                .resolve(&state.binding.data_key, cursor)
                .and_then(|v| match validate_scalar(kind, *key, v) {
                    Ok(v) => Some(v),
                    Err(msg) => {
                        tracing::debug!(
                            element = %self.element.id(),
                            property = %key,
                            data_key = %state.binding.data_key,
                            "rejected bound value: {msg}"
                        );
                        None
                    }
                });

            let value = match fresh {
                Some(v) => {
                    state.last = Some(v);
                    state.stale = false;
                    v
                }
                None => {
                    let fallback = state.last.unwrap_or(state.binding.default);
                    state.stale = true;
                    stale.push(StaleBinding {
                        element: self.element.id().to_owned(),
                        property: *key,
                        data_key: state.binding.data_key.clone(),
                        fallback,
                    });
                    fallback
                }
            };

            if state.applied != Some(value) {
                self.element.apply(*key, value);
                state.applied = Some(value);
            }
        }

        stale
    }

    /// Accept a late result for `data_key`. Returns `true` when at least one binding took it.
    pub(crate) fn deliver(&mut self, data_key: &str, value: Scalar) -> bool {
        let kind = self.element.kind();
        let mut accepted = false;
        for (key, state) in self.bindings.iter_mut() {
            if state.binding.data_key != data_key {
                continue;
            }
            let Ok(v) = validate_scalar(kind, *key, value) else {
                continue;
            };
            state.last = Some(v);
            state.stale = false;
            if state.applied != Some(v) {
                self.element.apply(*key, v);
                state.applied = Some(v);
            }
            accepted = true;
        }
        accepted
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/bound.rs"]
mod tests;
