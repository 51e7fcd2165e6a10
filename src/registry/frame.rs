use crate::data::provider::DataProvider;
use crate::foundation::core::{Affine, TimeCursor, rect_is_finite};
use crate::registry::builder::{ElementHandle, SceneBuilder};
use crate::render::plan::{FramePlan, FrameStats, PlannedElement, SkippedElement};
use crate::render::surface::DrawSurface;
use crate::scene::node::TransformNode;

impl SceneBuilder {
    /// Take the frame-start snapshot.
    ///
    /// Resolves every binding at `cursor`, re-derives dirty nodes, and composes the
    /// element forest in paint order: ascending `zIndex`, ties by insertion order, parents
    /// before children. Invisible elements are left out with their subtrees; elements
    /// with non-finite geometry are skipped and reported without affecting the rest.
    #[tracing::instrument(skip(self, provider), fields(elements = self.elements.len()))]
    pub fn prepare_frame(&mut self, provider: &dyn DataProvider, cursor: TimeCursor) -> FramePlan {
        let mut plan = FramePlan::new(cursor);

        for (_, entry) in self.elements.iter_mut() {
            if let Some(bound) = entry.instance.as_bound_mut() {
                plan.stale.extend(bound.resolve(provider, cursor));
            }
            entry.instance.element_mut().sync();
        }

        for w in &plan.stale {
            if self.opts.warn_on_stale {
                tracing::warn!(
                    element = %w.element,
                    property = %w.property,
                    data_key = %w.data_key,
                    fallback = ?w.fallback,
                    "stale binding"
                );
            } else {
                tracing::debug!(
                    element = %w.element,
                    property = %w.property,
                    data_key = %w.data_key,
                    "stale binding"
                );
            }
        }

        let roots = self.sorted(
            self.elements
                .iter()
                .filter(|(_, e)| e.parent.is_none())
                .map(|(h, _)| h),
        );
        for root in roots {
            if let Some(node) = self.plan_subtree(root, Affine::IDENTITY, 1.0, 0, &mut plan) {
                plan.roots.push(node);
            }
        }

        plan
    }

    /// Prepare a frame and paint it onto `surface`.
    pub fn render_frame(
        &mut self,
        surface: &mut dyn DrawSurface,
        provider: &dyn DataProvider,
        cursor: TimeCursor,
    ) -> FrameStats {
        self.prepare_frame(provider, cursor).paint(surface)
    }

    fn sorted(&self, handles: impl Iterator<Item = ElementHandle>) -> Vec<ElementHandle> {
        let mut out: Vec<ElementHandle> = handles.collect();
        out.sort_by_key(|h| {
            self.elements
                .get(*h)
                .map(|e| e.paint_key())
                .unwrap_or((i32::MAX, u64::MAX))
        });
        out
    }

    fn plan_subtree(
        &self,
        handle: ElementHandle,
        parent_world: Affine,
        parent_opacity: f64,
        depth: usize,
        plan: &mut FramePlan,
    ) -> Option<TransformNode> {
        let entry = self.elements.get(handle)?;
        let element = entry.instance.element();

        if !element.props().visible {
            plan.hidden += self.subtree_len(handle);
            return None;
        }

        let mut node = element.node().clone();
        let world = parent_world * node.local_affine();
        let world_ok = world.as_coeffs().iter().all(|c| c.is_finite());
        let world_bounds = node.bounds().map(|b| parent_world.transform_rect_bbox(b));
        let world_bounds = match world_bounds {
            Some(b) if world_ok && rect_is_finite(b) => b,
            _ => {
                let reason = if world_bounds.is_none() {
                    "element has no bounds"
                } else {
                    "element geometry is not finite"
                };
                tracing::warn!(id = %entry.id(), reason, "skipping element");
                plan.skipped.push(SkippedElement {
                    id: entry.id().to_owned(),
                    reason: reason.to_owned(),
                    subtree_len: self.subtree_len(handle),
                });
                return None;
            }
        };

        let opacity = parent_opacity * element.props().opacity;
        plan.elements.push(PlannedElement {
            id: entry.id().to_owned(),
            z_index: element.props().z_index,
            depth,
            world_transform: world,
            world_bounds,
            opacity,
        });

        for child in self.sorted(entry.children.iter().copied()) {
            if let Some(child_node) = self.plan_subtree(child, world, opacity, depth + 1, plan) {
                node.push_child(child_node);
            }
        }

        Some(node)
    }

    fn subtree_len(&self, handle: ElementHandle) -> usize {
        self.elements
            .get(handle)
            .map(|e| 1 + e.children.iter().map(|c| self.subtree_len(*c)).sum::<usize>())
            .unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/frame.rs"]
mod tests;
