use crate::foundation::core::Rect;
use crate::foundation::error::{SceneError, SceneResult};
use crate::registry::kind::{ElementInstance, ElementKind};
use crate::schema::config::ElementConfig;
use crate::schema::property::PropertyKey;
use crate::schema::validate::{ValidatedPatch, validate_patch};
use crate::schema::value::{ConfigValue, Scalar};
use serde_json::Value as JsonValue;
use slotmap::SlotMap;
use std::collections::HashMap;

slotmap::new_key_type! {
    /// Generational handle to a registered element.
    ///
    /// A handle outlives its element safely: lookups through a removed handle fail.
    pub struct ElementHandle;
}

/// Options controlling builder validation and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneOpts {
    /// Reject config objects containing unrecognized keys. When off, unknown keys are
    /// dropped with a debug log.
    pub strict_keys: bool,
    /// Log stale bindings at `warn` level (otherwise `debug`).
    pub warn_on_stale: bool,
}

impl Default for SceneOpts {
    fn default() -> Self {
        Self {
            strict_keys: true,
            warn_on_stale: true,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) kind: ElementKind,
    pub(crate) instance: ElementInstance,
    pub(crate) config: ElementConfig,
    pub(crate) parent: Option<ElementHandle>,
    pub(crate) children: Vec<ElementHandle>,
    // Insertion sequence, breaks z-order ties.
    pub(crate) seq: u64,
}

impl Entry {
    pub(crate) fn id(&self) -> &str {
        self.instance.element().id()
    }

    pub(crate) fn paint_key(&self) -> (i32, u64) {
        (self.instance.element().props().z_index, self.seq)
    }
}

/// Type-keyed element registry and builder.
///
/// Owns every element of one scene in an arena keyed by [`ElementHandle`], with a
/// string id index on top. Instances are independent; nothing is global.
///
/// Config mutations are atomic per call: a config object with any invalid field is
/// rejected as a whole and leaves the element untouched.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    pub(crate) opts: SceneOpts,
    pub(crate) elements: SlotMap<ElementHandle, Entry>,
    ids: HashMap<String, ElementHandle>,
    next_seq: u64,
}

impl SceneBuilder {
    /// Create an empty builder.
    pub fn new(opts: SceneOpts) -> Self {
        Self {
            opts,
            elements: SlotMap::with_key(),
            ids: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Options this builder was created with.
    pub fn opts(&self) -> &SceneOpts {
        &self.opts
    }

    /// Register a new element of type `type_key` under `id`.
    ///
    /// Fails with [`SceneError::UnknownType`], [`SceneError::DuplicateId`], or
    /// [`SceneError::Validation`] (empty id, invalid initial config); nothing is registered
    /// on failure.
    pub fn add_element(
        &mut self,
        type_key: &str,
        id: &str,
        initial: Option<&JsonValue>,
    ) -> SceneResult<ElementHandle> {
        let kind = ElementKind::from_key(type_key)?;
        self.add_element_of(kind, id, initial)
    }

    /// Typed form of [`SceneBuilder::add_element`].
    pub fn add_element_of(
        &mut self,
        kind: ElementKind,
        id: &str,
        initial: Option<&JsonValue>,
    ) -> SceneResult<ElementHandle> {
        if id.trim().is_empty() {
            return Err(SceneError::validation("element id must be non-empty"));
        }
        if self.ids.contains_key(id) {
            return Err(SceneError::duplicate_id(id));
        }
        let patch = match initial {
            Some(v) => self.validate(kind, id, v)?,
            None => ValidatedPatch::default(),
        };

        let mut instance = kind.create(id);
        let mut config = ElementConfig::defaults(instance.element().content().size);
        apply_fields(&mut instance, &patch.fields);
        config.merge(patch.fields);

        let seq = self.next_seq;
        self.next_seq += 1;
        let handle = self.elements.insert(Entry {
            kind,
            instance,
            config,
            parent: None,
            children: Vec::new(),
            seq,
        });
        self.ids.insert(id.to_owned(), handle);

        tracing::debug!(id, kind = %kind, "element added");
        Ok(handle)
    }

    /// Merge `partial` into the stored config of `id` and apply it to the live element.
    ///
    /// Unspecified keys keep their values. Any invalid field rejects the whole call.
    pub fn update_element_config(&mut self, id: &str, partial: &JsonValue) -> SceneResult<()> {
        let handle = self.require(id)?;
        let kind = self.elements[handle].kind;
        let patch = self.validate(kind, id, partial)?;

        let entry = &mut self.elements[handle];
        apply_fields(&mut entry.instance, &patch.fields);
        let changed = patch.fields.len();
        entry.config.merge(patch.fields);
        entry.instance.element_mut().mark_dirty();

        tracing::debug!(id, changed, "element config updated");
        Ok(())
    }

    /// Owned copy of the stored config of `id`.
    pub fn get_element_config(&self, id: &str) -> SceneResult<ElementConfig> {
        let handle = self.require(id)?;
        Ok(self.elements[handle].config.clone())
    }

    /// Remove `id`, detaching it from its parent and re-rooting its children.
    ///
    /// A missing id is reported as [`SceneError::NotFound`].
    pub fn remove_element(&mut self, id: &str) -> SceneResult<()> {
        let handle = self.ids.remove(id).ok_or_else(|| SceneError::not_found(id))?;
        let Some(entry) = self.elements.remove(handle) else {
            return Err(SceneError::not_found(id));
        };

        if let Some(parent) = entry.parent
            && let Some(p) = self.elements.get_mut(parent)
        {
            p.children.retain(|c| *c != handle);
        }
        for child in &entry.children {
            if let Some(c) = self.elements.get_mut(*child) {
                c.parent = None;
            }
        }

        tracing::debug!(id, rerooted = entry.children.len(), "element removed");
        Ok(())
    }

    /// Return `true` if `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Return `true` when no element is registered.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Registered ids in insertion order.
    pub fn ids(&self) -> Vec<&str> {
        let mut entries: Vec<&Entry> = self.elements.values().collect();
        entries.sort_by_key(|e| e.seq);
        entries.into_iter().map(Entry::id).collect()
    }

    /// Arena handle of `id`, for late data delivery.
    pub fn handle(&self, id: &str) -> Option<ElementHandle> {
        self.ids.get(id).copied()
    }

    /// Id behind `handle`; `None` once the element was removed.
    pub fn id_of(&self, handle: ElementHandle) -> Option<&str> {
        self.elements.get(handle).map(Entry::id)
    }

    /// Element kind `id` was registered with.
    pub fn kind_of(&self, id: &str) -> SceneResult<ElementKind> {
        let handle = self.require(id)?;
        Ok(self.elements[handle].kind)
    }

    /// Live instance of `id`.
    pub fn element(&self, id: &str) -> SceneResult<&ElementInstance> {
        let handle = self.require(id)?;
        Ok(&self.elements[handle].instance)
    }

    /// Anchor-aware bounds of `id`'s own content in its parent's space.
    pub fn element_bounds(&mut self, id: &str) -> SceneResult<Option<Rect>> {
        let handle = self.require(id)?;
        Ok(self.elements[handle].instance.element_mut().bounds())
    }

    /// Place `child` under `parent`. Its offset is then measured in the parent's local
    /// content space.
    pub fn attach(&mut self, child_id: &str, parent_id: &str) -> SceneResult<()> {
        let child = self.require(child_id)?;
        let parent = self.require(parent_id)?;
        if child == parent {
            return Err(SceneError::validation(format!(
                "element '{child_id}' cannot be attached to itself"
            )));
        }

        let mut cursor = Some(parent);
        while let Some(h) = cursor {
            if h == child {
                return Err(SceneError::validation(format!(
                    "attaching '{child_id}' under '{parent_id}' would create a cycle"
                )));
            }
            cursor = self.elements.get(h).and_then(|e| e.parent);
        }

        self.unlink(child);
        self.elements[child].parent = Some(parent);
        self.elements[parent].children.push(child);

        tracing::debug!(child = child_id, parent = parent_id, "element attached");
        Ok(())
    }

    /// Move `child_id` back to the root level. Detaching a root is a no-op.
    pub fn detach(&mut self, child_id: &str) -> SceneResult<()> {
        let child = self.require(child_id)?;
        self.unlink(child);
        Ok(())
    }

    /// Parent id of `id`, or `None` for a root element.
    pub fn parent_of(&self, id: &str) -> SceneResult<Option<&str>> {
        let handle = self.require(id)?;
        Ok(self.elements[handle]
            .parent
            .and_then(|p| self.elements.get(p))
            .map(Entry::id))
    }

    /// Direct children of `id` in attach order.
    pub fn children_of(&self, id: &str) -> SceneResult<Vec<&str>> {
        let handle = self.require(id)?;
        Ok(self.elements[handle]
            .children
            .iter()
            .filter_map(|c| self.elements.get(*c))
            .map(Entry::id)
            .collect())
    }

    /// Feed a late data result to a bound element.
    ///
    /// Returns `false` and discards the value when the element was removed, is not a
    /// bound element, or has no binding for `data_key`.
    pub fn deliver_binding(
        &mut self,
        handle: ElementHandle,
        data_key: &str,
        value: impl Into<Scalar>,
    ) -> bool {
        let Some(entry) = self.elements.get_mut(handle) else {
            tracing::debug!(data_key, "discarding late data for removed element");
            return false;
        };
        match entry.instance.as_bound_mut() {
            Some(bound) => bound.deliver(data_key, value.into()),
            None => false,
        }
    }

    fn require(&self, id: &str) -> SceneResult<ElementHandle> {
        self.ids
            .get(id)
            .copied()
            .ok_or_else(|| SceneError::not_found(id))
    }

    fn unlink(&mut self, child: ElementHandle) {
        let Some(parent) = self.elements.get_mut(child).and_then(|e| e.parent.take()) else {
            return;
        };
        if let Some(p) = self.elements.get_mut(parent) {
            p.children.retain(|c| *c != child);
        }
    }

    fn validate(&self, kind: ElementKind, id: &str, v: &JsonValue) -> SceneResult<ValidatedPatch> {
        let patch = validate_patch(kind, v, self.opts.strict_keys).map_err(|e| {
            SceneError::validation(format!("element '{id}' ({kind}): {e}"))
        })?;
        if !patch.ignored.is_empty() {
            tracing::debug!(id, ignored = ?patch.ignored, "ignoring unknown config keys");
        }
        Ok(patch)
    }
}

fn apply_fields(instance: &mut ElementInstance, fields: &[(PropertyKey, ConfigValue)]) {
    for (key, value) in fields {
        match value {
            ConfigValue::Literal(s) => {
                if let Some(bound) = instance.as_bound_mut() {
                    bound.unbind(*key);
                }
                instance.element_mut().apply(*key, *s);
            }
            ConfigValue::Bound(binding) => match instance.as_bound_mut() {
                Some(bound) => bound.bind(*key, binding.clone()),
                None => {
                    tracing::debug!(%key, "binding on a static element ignored");
                }
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/builder.rs"]
mod tests;
