//! rollscene is an anchor-aware 2D scene graph with a type-keyed element registry.
//!
//! It backs timeline and piano-roll editors: tracks, piano-roll clips and decorative layers
//! are registered by type key, reconfigured through partial JSON config objects, and
//! composed into a tree of [`TransformNode`]s that paint onto any [`DrawSurface`].
//!
//! # Pipeline overview
//!
//! 1. **Build**: [`SceneBuilder::add_element`] / [`SceneBuilder::update_element_config`]
//!    mutate validated element configs (atomic per call).
//! 2. **Prepare**: [`SceneBuilder::prepare_frame`] resolves data bindings at a
//!    [`TimeCursor`] and snapshots the composed scene into a [`FramePlan`].
//! 3. **Paint**: [`FramePlan::paint`] issues transform and fill calls against a
//!    [`DrawSurface`] ([`CpuSurface`] rasterizes with `vello_cpu`, [`RecordingSurface`]
//!    records).
//!
//! Each element's rotation and scale pivot about its anchor point; the anchor lands
//! exactly at the configured offset regardless of rotation, scale, or content size.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod data;
mod foundation;
mod registry;
mod render;
mod scene;
mod schema;
mod transform;

pub use crate::data::provider::{DataProvider, NoData, TimelineData};
pub use crate::foundation::core::{Affine, Point, Rect, Rgba8Premul, Size, TimeCursor, Vec2};
pub use crate::foundation::error::{SceneError, SceneResult};
pub use crate::registry::builder::{ElementHandle, SceneBuilder, SceneOpts};
pub use crate::registry::kind::{ElementInstance, ElementKind};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::plan::{FramePlan, FrameStats, PlannedElement, SkippedElement};
pub use crate::render::recording::{RecordedFill, RecordingSurface, SurfaceOp};
pub use crate::render::surface::{DrawSurface, FrameRGBA, RenderSettings};
pub use crate::scene::bound::{BoundSceneElement, StaleBinding};
pub use crate::scene::content::ElementContent;
pub use crate::scene::element::{ElementProps, SceneElement};
pub use crate::scene::node::TransformNode;
pub use crate::schema::config::ElementConfig;
pub use crate::schema::property::{PropertyKey, ValueKind};
pub use crate::schema::value::{Binding, ConfigValue, Scalar};
pub use crate::transform::affine::{anchored, compose};
