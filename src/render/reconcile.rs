use std::collections::BTreeMap;

use crate::{
    foundation::core::{Generation, Millis},
    render::{
        organic::{RenderOptions, render_organic, schedule_inserts},
        surface::{NodeId, NodePhase, Surface, SurfaceTask, TransitionTiming},
        timeline::Timeline,
    },
    scene::{
        model::{Layer, Scene},
        signature::{Signature, match_signatures, scene_signatures},
    },
};

/// What one reconcile pass did to the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Ran the cold-start path instead of diffing.
    pub cold_start: bool,
    pub inserted: usize,
    pub updated: usize,
    /// Matched with identical content.
    pub kept: usize,
    pub removed: usize,
}

/// Move the surface from `previous` to `next`, animating only the delta.
///
/// `previous = None` (or a surface without a drawing root) takes the cold-start path. Otherwise
/// the surface's live nodes are matched against `next` by structural signature: matches are
/// retargeted in place, unmatched nodes fade out and are removed after the exit transition, and
/// new elements are inserted with the staggered reveal compressed into `opts`. Nodes still
/// waiting for their reveal get a fresh one under `generation`, and nodes still fading out get
/// their removal rescheduled under it for whatever is left of the exit. A missing surface is a
/// no-op.
///
/// The caller must have dropped pending tasks of older generations before calling this.
#[tracing::instrument(skip_all, fields(generation = generation.0, elements = next.len()))]
pub fn reconcile<T: From<SurfaceTask>>(
    surface: Option<&mut Surface>,
    timeline: &mut Timeline<T>,
    generation: Generation,
    previous: Option<&Scene>,
    next: &Scene,
    opts: &RenderOptions,
    timing: &TransitionTiming,
) -> Option<ReconcileStats> {
    let surface = surface?;
    if previous.is_none() || !surface.is_drawing() {
        let inserted = render_organic(Some(surface), timeline, generation, next, opts);
        return Some(ReconcileStats {
            cold_start: true,
            inserted,
            ..ReconcileStats::default()
        });
    }

    let opts = opts.normalized();
    let now = timeline.now();
    let mut stats = ReconcileStats::default();

    // Fades still running belong to a cancelled generation; their removal moves to this one.
    let exit = Millis(timing.exit_ms.max(0.0));
    let fading: Vec<(NodeId, Millis)> = surface.exiting().collect();
    for (node, since) in fading {
        let left = Millis((exit.0 - now.since(since).0).max(0.0));
        timeline.schedule_after(left, SurfaceTask::Remove { generation, node }.into());
    }
    surface.set_defs(next.defs().cloned());

    let live: Vec<(NodeId, Signature, bool)> = surface
        .live_nodes()
        .map(|n| (n.id, n.signature, n.phase == NodePhase::Hidden))
        .collect();
    let live_sigs: Vec<Signature> = live.iter().map(|(_, s, _)| *s).collect();

    let wanted = scene_signatures(next);
    let next_sigs: Vec<Signature> = wanted.iter().map(|(s, _)| *s).collect();
    let pairs = match_signatures(&live_sigs, &next_sigs);

    let mut claimed = vec![false; live.len()];
    let mut ordinals: BTreeMap<Layer, usize> = BTreeMap::new();
    let mut pending = Vec::new();
    for ((sig, el), m) in wanted.into_iter().zip(pairs) {
        let ord = ordinals.entry(el.layer).or_insert(0);
        let order = *ord;
        *ord += 1;
        match m {
            Some(li) => {
                claimed[li] = true;
                let (node, _, hidden) = live[li];
                if surface.update(node, el.clone(), order, now, timing) {
                    stats.updated += 1;
                } else {
                    stats.kept += 1;
                }
                if hidden {
                    timeline.request_frame(SurfaceTask::Reveal { generation, node }.into());
                }
            }
            None => pending.push((sig, el.clone(), order)),
        }
    }

    for ((node, _, _), _) in live.iter().zip(&claimed).filter(|(_, c)| !**c) {
        if surface.begin_exit(*node, now) {
            timeline.schedule_after(
                exit,
                SurfaceTask::Remove {
                    generation,
                    node: *node,
                }
                .into(),
            );
            stats.removed += 1;
        }
    }

    surface.restack();
    stats.inserted = schedule_inserts(timeline, generation, pending, &opts);

    tracing::debug!(
        inserted = stats.inserted,
        updated = stats.updated,
        kept = stats.kept,
        removed = stats.removed,
        "reconciled surface"
    );
    Some(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/reconcile.rs"]
mod tests;
