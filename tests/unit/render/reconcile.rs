use super::*;
use crate::{
    render::surface::SurfaceNode,
    scene::{builder::build_scene, signature::diff_scenes},
    seed::{palette::PaletteMode, params::GenerationParams},
};

fn scene(text: &str, mode: PaletteMode) -> Scene {
    build_scene(&GenerationParams::derive(text, mode))
}

fn drain(surface: &mut Surface, tl: &mut Timeline<SurfaceTask>, current: Generation, until: f64) {
    while let Some((_, task)) = tl.pop_due(Millis(until)) {
        crate::render::organic::run_surface_task(Some(&mut *surface), tl, current, task);
    }
    tl.set_now(Millis(until));
}

fn sorted_sigs(sigs: impl IntoIterator<Item = Signature>) -> Vec<Signature> {
    let mut v: Vec<Signature> = sigs.into_iter().collect();
    v.sort();
    v
}

fn settled(a: &Scene) -> (Surface, Timeline<SurfaceTask>) {
    let mut surface = Surface::new();
    let mut tl = Timeline::new();
    render_organic(Some(&mut surface), &mut tl, Generation(1), a, &RenderOptions::default());
    drain(&mut surface, &mut tl, Generation(1), 10_000.0);
    (surface, tl)
}

#[test]
fn first_render_is_a_cold_start() {
    let b = scene("Hello", PaletteMode::Auto);
    let mut surface = Surface::new();
    let mut tl: Timeline<SurfaceTask> = Timeline::new();
    let stats = reconcile(
        Some(&mut surface),
        &mut tl,
        Generation(1),
        None,
        &b,
        &RenderOptions::default(),
        &TransitionTiming::default(),
    )
    .unwrap();
    assert!(stats.cold_start);
    assert_eq!(stats.inserted, b.drawables().count());
}

#[test]
fn counts_follow_the_structural_diff() {
    let a = scene("Hello", PaletteMode::Auto);
    let b = scene("Hello", PaletteMode::Cool);
    let (mut surface, mut tl) = settled(&a);

    let stats = reconcile(
        Some(&mut surface),
        &mut tl,
        Generation(2),
        Some(&a),
        &b,
        &RenderOptions::live(),
        &TransitionTiming::default(),
    )
    .unwrap();
    let diff = diff_scenes(&a, &b);
    assert!(!stats.cold_start);
    assert_eq!(stats.updated + stats.kept, diff.matched.len());
    assert_eq!(stats.inserted, diff.inserted.len());
    assert_eq!(stats.removed, diff.removed.len());
}

#[test]
fn settles_on_exactly_the_next_scene_and_keeps_matched_nodes() {
    let a = scene("Hello", PaletteMode::Auto);
    let b = scene("Hello", PaletteMode::Cool);
    let (mut surface, mut tl) = settled(&a);
    let before: Vec<(crate::render::surface::NodeId, Signature)> =
        surface.nodes().iter().map(|n| (n.id, n.signature)).collect();

    reconcile(
        Some(&mut surface),
        &mut tl,
        Generation(2),
        Some(&a),
        &b,
        &RenderOptions::live(),
        &TransitionTiming::default(),
    );
    drain(&mut surface, &mut tl, Generation(2), 20_000.0);
    assert!(tl.is_idle());

    assert_eq!(
        sorted_sigs(surface.nodes().iter().map(|n| n.signature)),
        sorted_sigs(scene_signatures(&b).into_iter().map(|(s, _)| s)),
    );
    assert!(surface.nodes().iter().all(SurfaceNode::is_live));

    let matched = diff_scenes(&a, &b).matched.len();
    let kept: Vec<&SurfaceNode> = surface
        .nodes()
        .iter()
        .filter(|n| n.epoch == Generation(1))
        .collect();
    assert_eq!(kept.len(), matched);
    for n in kept {
        assert!(before.iter().any(|(id, sig)| *id == n.id && *sig == n.signature));
    }
}

#[test]
fn paint_order_within_layers_follows_next_scene() {
    let a = scene("Hello", PaletteMode::Auto);
    let b = scene("Hello", PaletteMode::Cool);
    let (mut surface, mut tl) = settled(&a);
    reconcile(
        Some(&mut surface),
        &mut tl,
        Generation(2),
        Some(&a),
        &b,
        &RenderOptions::live(),
        &TransitionTiming::default(),
    );
    drain(&mut surface, &mut tl, Generation(2), 20_000.0);

    for layer in Layer::REVEAL_ORDER {
        let orders: Vec<usize> = surface
            .nodes()
            .iter()
            .filter(|n| n.layer() == layer)
            .map(|n| n.order)
            .collect();
        let expected: Vec<usize> = (0..b.count(layer)).collect();
        assert_eq!(orders, expected, "layer {layer}");
    }
}

#[test]
fn superseding_a_cold_start_mid_reveal() {
    let a = scene("Or", PaletteMode::Auto);
    let b = scene("Orb", PaletteMode::Auto);
    let mut surface = Surface::new();
    let mut tl: Timeline<SurfaceTask> = Timeline::new();
    render_organic(Some(&mut surface), &mut tl, Generation(1), &a, &RenderOptions::default());
    drain(&mut surface, &mut tl, Generation(1), 300.0);
    assert!(surface.nodes().len() < a.drawables().count());

    tl.retain(|t| t.generation() == Generation(2));
    reconcile(
        Some(&mut surface),
        &mut tl,
        Generation(2),
        Some(&a),
        &b,
        &RenderOptions::live(),
        &TransitionTiming::default(),
    );
    drain(&mut surface, &mut tl, Generation(2), 30_000.0);

    assert_eq!(
        sorted_sigs(surface.nodes().iter().map(|n| n.signature)),
        sorted_sigs(scene_signatures(&b).into_iter().map(|(s, _)| s)),
    );
    assert!(
        surface
            .nodes()
            .iter()
            .all(|n| matches!(n.phase, NodePhase::Shown { .. }))
    );
}

#[test]
fn reconciling_to_the_same_scene_changes_nothing() {
    let a = scene("Orbit", PaletteMode::Cool);
    let (mut surface, mut tl) = settled(&a);
    let stats = reconcile(
        Some(&mut surface),
        &mut tl,
        Generation(2),
        Some(&a),
        &a,
        &RenderOptions::live(),
        &TransitionTiming::default(),
    )
    .unwrap();
    assert_eq!(stats.kept, a.drawables().count());
    assert_eq!((stats.inserted, stats.updated, stats.removed), (0, 0, 0));
    assert!(tl.is_idle());
}

#[test]
fn missing_surface_is_a_no_op() {
    let a = scene("Hello", PaletteMode::Auto);
    let mut tl: Timeline<SurfaceTask> = Timeline::new();
    let stats = reconcile(
        None,
        &mut tl,
        Generation(2),
        Some(&a),
        &a,
        &RenderOptions::live(),
        &TransitionTiming::default(),
    );
    assert!(stats.is_none());
    assert!(tl.is_idle());
}

#[test]
fn fades_outlive_the_generation_that_started_them() {
    let a = scene("Hello", PaletteMode::Auto);
    let b = scene("Hello", PaletteMode::Cool);
    let (mut surface, mut tl) = settled(&a);
    let t0 = tl.now().0;
    let timing = TransitionTiming::default();

    reconcile(
        Some(&mut surface),
        &mut tl,
        Generation(2),
        Some(&a),
        &b,
        &RenderOptions::live(),
        &timing,
    );
    drain(&mut surface, &mut tl, Generation(2), t0 + 100.0);
    let fading: Vec<NodeId> = surface.exiting().map(|(id, _)| id).collect();
    assert_eq!(fading.len(), diff_scenes(&a, &b).removed.len());
    assert!(!fading.is_empty());

    // A newer build cancels everything queued for generation 2, its removals included.
    tl.retain(|t| t.generation() == Generation(3));
    let stats = reconcile(
        Some(&mut surface),
        &mut tl,
        Generation(3),
        Some(&b),
        &b,
        &RenderOptions::live(),
        &timing,
    )
    .unwrap();
    assert_eq!(stats.removed, 0);

    drain(&mut surface, &mut tl, Generation(3), t0 + timing.exit_ms - 20.0);
    for id in &fading {
        let node = surface.node(*id).unwrap();
        assert!(matches!(node.phase, NodePhase::Exiting { .. }));
        assert!(node.sample(tl.now(), &timing).is_some());
    }

    drain(&mut surface, &mut tl, Generation(3), t0 + timing.exit_ms + 10.0);
    assert!(fading.iter().all(|id| surface.node(*id).is_none()));

    drain(&mut surface, &mut tl, Generation(3), t0 + 20_000.0);
    assert_eq!(
        sorted_sigs(surface.nodes().iter().map(|n| n.signature)),
        sorted_sigs(scene_signatures(&b).into_iter().map(|(s, _)| s)),
    );
    assert!(tl.is_idle());
}
