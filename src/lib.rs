//! Glyphseed grows a deterministic insignia from a line of text.
//!
//! # Pipeline overview
//!
//! 1. **Seed**: `"<mode>|<text>"` is hashed with 32-bit FNV-1a into a seed.
//! 2. **Derive**: an xorshift32 stream over the seed plus text statistics yield
//!    [`GenerationParams`] (layout, symmetry, detail, palette).
//! 3. **Build**: [`build_scene`] turns parameters into an ordered [`Scene`] of layered elements
//!    in a fixed 1000x1000 space.
//! 4. **Show**: either export statically ([`scene_to_markup`], [`rasterize_png`]) or drive the
//!    animated live [`Surface`], where [`reconcile`] moves from one scene to the next by
//!    matching elements on structural [`Signature`]s.
//!
//! [`InsigniaSession`] ties these together for an interactive front end: debounced live edits,
//! a build generation counter that retires stale scheduled work, status text, and exports.
//!
//! The same text and palette mode always give the same seed, parameters, and scene, on every
//! platform.
#![forbid(unsafe_code)]

pub mod foundation;
pub mod render;
pub mod scene;
pub mod seed;
pub mod session;

pub use foundation::core::{Generation, Millis, Point, Vec2, Viewport};
pub use foundation::error::{GlyphError, GlyphResult};
pub use foundation::math::{Fnv1a32, XorShift32, hash_str};
pub use render::ease::Ease;
pub use render::markup::scene_to_markup;
pub use render::organic::{RenderOptions, render_organic, run_surface_task};
pub use render::raster::{layer_census, parse_export_size, parse_markup, rasterize_png};
pub use render::reconcile::{ReconcileStats, reconcile};
pub use render::surface::{NodeId, NodePhase, Surface, SurfaceNode, SurfaceTask, TransitionTiming};
pub use render::timeline::Timeline;
pub use scene::builder::build_scene;
pub use scene::model::{Element, ElementId, Layer, Scene, Shape};
pub use scene::signature::{Signature, SceneDiff, diff_scenes, scene_signatures};
pub use seed::palette::{Hsl, Palette, PaletteMode};
pub use seed::params::{GenerationParams, seed_for};
pub use seed::text::TextStats;
pub use session::insignia_session::{
    ExportArtifact, Generated, InsigniaSession, PLACEHOLDER_TEXT, SessionStats, SessionTask, Status,
};
pub use session::opts::SessionOpts;
