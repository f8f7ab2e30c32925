//! Static export and the animated live surface.
//!
//! Static output goes through [`markup`] (and [`raster`] for PNG). The live path drives a retained
//! [`surface::Surface`] through a virtual [`timeline::Timeline`]: [`organic`] is the cold start and
//! [`reconcile`] animates only the delta between two scenes.

/// Transition easing curves.
pub mod ease;
/// Vector markup export.
pub mod markup;
/// Cold-start staggered reveal and surface task execution.
pub mod organic;
/// Markup parsing and PNG rasterization.
pub mod raster;
/// Incremental reconciler.
pub mod reconcile;
/// Retained live drawing surface.
pub mod surface;
/// Virtual clock with cancellable timer and frame tasks.
pub mod timeline;
