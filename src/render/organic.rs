use std::collections::BTreeMap;

use crate::{
    foundation::core::{Generation, Millis},
    render::{
        surface::{Surface, SurfaceTask},
        timeline::Timeline,
    },
    scene::{
        model::{Element, Layer, Scene},
        signature::{Signature, scene_signatures},
    },
};

/// Reveal pacing for one render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub total_duration_ms: f64,
    pub piece_stagger_ms: f64,
    pub layer_order: Vec<Layer>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            total_duration_ms: 3000.0,
            piece_stagger_ms: 30.0,
            layer_order: Layer::REVEAL_ORDER.to_vec(),
        }
    }
}

impl RenderOptions {
    /// Shorter pacing for regenerations while typing.
    pub fn live() -> Self {
        Self {
            total_duration_ms: 1800.0,
            piece_stagger_ms: 18.0,
            ..Self::default()
        }
    }

    /// Replace unusable values (zero, negative, non-finite, empty order) with the defaults.
    pub fn normalized(&self) -> Self {
        let d = Self::default();
        let usable = |v: f64| v.is_finite() && v > 0.0;
        Self {
            total_duration_ms: if usable(self.total_duration_ms) {
                self.total_duration_ms
            } else {
                d.total_duration_ms
            },
            piece_stagger_ms: if usable(self.piece_stagger_ms) {
                self.piece_stagger_ms
            } else {
                d.piece_stagger_ms
            },
            layer_order: if self.layer_order.is_empty() {
                d.layer_order
            } else {
                self.layer_order.clone()
            },
        }
    }

    /// Delay added after each layer that reveals at least one element.
    pub fn layer_delay_ms(&self) -> f64 {
        self.total_duration_ms / self.layer_order.len().max(1) as f64 / 1.4
    }
}

/// Schedule staggered inserts for `pending`, grouped by `opts.layer_order`. Layers not listed
/// there are never revealed. Returns the number of scheduled inserts.
pub(crate) fn schedule_inserts<T: From<SurfaceTask>>(
    timeline: &mut Timeline<T>,
    generation: Generation,
    pending: Vec<(Signature, Element, usize)>,
    opts: &RenderOptions,
) -> usize {
    let mut by_layer: BTreeMap<Layer, Vec<(Signature, Element, usize)>> = BTreeMap::new();
    for entry in pending {
        by_layer.entry(entry.1.layer).or_default().push(entry);
    }

    let mut scheduled = 0;
    let mut base = 0.0;
    for layer in &opts.layer_order {
        let Some(entries) = by_layer.remove(layer) else {
            continue;
        };
        for (idx, (signature, element, order)) in entries.into_iter().enumerate() {
            let delay = base + idx as f64 * opts.piece_stagger_ms;
            timeline.schedule_after(
                Millis(delay),
                SurfaceTask::Insert {
                    generation,
                    element,
                    signature,
                    order,
                }
                .into(),
            );
            scheduled += 1;
        }
        base += opts.layer_delay_ms();
    }
    scheduled
}

/// Cold start: reset the surface and reveal `scene` layer by layer.
///
/// Each element's insert is scheduled at `layer base + index * stagger`; the layer base grows by
/// `total / layer count / 1.4` after every non-empty layer. Inserted nodes flip visible on the
/// following frame. A missing surface makes this a no-op.
#[tracing::instrument(skip_all, fields(generation = generation.0, elements = scene.len()))]
pub fn render_organic<T: From<SurfaceTask>>(
    surface: Option<&mut Surface>,
    timeline: &mut Timeline<T>,
    generation: Generation,
    scene: &Scene,
    opts: &RenderOptions,
) -> usize {
    let Some(surface) = surface else {
        return 0;
    };
    let opts = opts.normalized();
    surface.clear();
    surface.install_root(scene.defs().cloned(), &opts.layer_order);

    let mut ordinals: BTreeMap<Layer, usize> = BTreeMap::new();
    let pending = scene_signatures(scene)
        .into_iter()
        .map(|(sig, el)| {
            let ord = ordinals.entry(el.layer).or_insert(0);
            let entry = (sig, el.clone(), *ord);
            *ord += 1;
            entry
        })
        .collect();
    schedule_inserts(timeline, generation, pending, &opts)
}

/// Apply one deferred surface task on behalf of `current`.
///
/// Tasks from any other generation are dropped without touching the surface. Returns whether the
/// surface changed.
pub fn run_surface_task<T: From<SurfaceTask>>(
    surface: Option<&mut Surface>,
    timeline: &mut Timeline<T>,
    current: Generation,
    task: SurfaceTask,
) -> bool {
    if task.generation() != current {
        tracing::trace!(task = ?task.generation(), current = current.0, "dropping stale surface task");
        return false;
    }
    let Some(surface) = surface else {
        return false;
    };
    let now = timeline.now();
    match task {
        SurfaceTask::Insert {
            generation,
            element,
            signature,
            order,
        } => {
            if !surface.is_drawing() {
                return false;
            }
            let node = surface.insert(generation, element, signature, order, now);
            timeline.request_frame(SurfaceTask::Reveal { generation, node }.into());
            true
        }
        SurfaceTask::Reveal { node, .. } => surface.reveal(node, now),
        SurfaceTask::Remove { node, .. } => surface.remove(node).is_some(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/organic.rs"]
mod tests;
