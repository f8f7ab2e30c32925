use super::*;
use crate::{
    scene::{builder::build_scene, signature::scene_signatures},
    seed::{palette::PaletteMode, params::GenerationParams},
};

fn hello() -> Scene {
    build_scene(&GenerationParams::derive("Hello", PaletteMode::Auto))
}

fn drawing_surface(scene: &Scene) -> Surface {
    let mut s = Surface::new();
    s.install_root(scene.defs().cloned(), &Layer::REVEAL_ORDER);
    s
}

#[test]
fn placeholder_and_clear() {
    let mut s = Surface::new();
    assert_eq!(s.state(), &SurfaceState::Empty);
    s.show_placeholder("type something");
    assert_eq!(s.placeholder(), Some("type something"));
    assert!(s.frame_at(Millis::ZERO, &TransitionTiming::default()).is_none());
    s.clear();
    assert!(s.placeholder().is_none());
}

#[test]
fn insert_keeps_layer_order_regardless_of_arrival() {
    let scene = hello();
    let mut s = drawing_surface(&scene);
    let sigs = scene_signatures(&scene);
    let center = sigs.iter().find(|(_, e)| e.layer == Layer::Center).unwrap();
    let ring = sigs.iter().find(|(_, e)| e.layer == Layer::Rings).unwrap();

    s.insert(Generation(1), center.1.clone(), center.0, 0, Millis::ZERO);
    s.insert(Generation(1), ring.1.clone(), ring.0, 0, Millis::ZERO);
    let layers: Vec<Layer> = s.nodes().iter().map(SurfaceNode::layer).collect();
    assert_eq!(layers, vec![Layer::Rings, Layer::Center]);
}

#[test]
fn hidden_nodes_are_not_drawn_until_revealed() {
    let scene = hello();
    let mut s = drawing_surface(&scene);
    let (sig, el) = scene_signatures(&scene)[0].clone();
    let id = s.insert(Generation(1), el.clone(), sig, 0, Millis::ZERO);
    let timing = TransitionTiming::default();

    let frame = s.frame_at(Millis(10.0), &timing).unwrap();
    assert_eq!(frame.drawables().count(), 0);

    assert!(s.reveal(id, Millis(16.0)));
    assert!(!s.reveal(id, Millis(20.0)));
    let mid = s.frame_at(Millis(16.0 + timing.enter_ms / 2.0), &timing).unwrap();
    let drawn = mid.drawables().next().unwrap();
    assert!(drawn.opacity > 0.0 && drawn.opacity < el.opacity);

    let done = s.frame_at(Millis(5_000.0), &timing).unwrap();
    assert_eq!(done.drawables().next().unwrap().opacity, el.opacity);
}

#[test]
fn update_transitions_from_current_geometry() {
    let a = hello();
    let b = build_scene(&GenerationParams::derive("Hello", PaletteMode::Cool));
    let ring_a = a.layer(Layer::Rings).next().unwrap().clone();
    let ring_b = b.layer(Layer::Rings).next().unwrap().clone();
    let timing = TransitionTiming {
        ease: Ease::Linear,
        ..TransitionTiming::default()
    };

    let mut s = drawing_surface(&a);
    let sig = scene_signatures(&a)[0].0;
    let id = s.insert(Generation(1), ring_a.clone(), sig, 0, Millis::ZERO);
    s.reveal(id, Millis::ZERO);
    assert!(s.update(id, ring_b.clone(), 0, Millis(1_000.0), &timing));
    assert_eq!(s.node(id).unwrap().epoch, Generation(1));

    let half = s.node(id).unwrap().sample(Millis(1_000.0 + timing.update_ms / 2.0), &timing).unwrap();
    let (Shape::Ring(ra), Shape::Ring(rb), Shape::Ring(rh)) = (&ring_a.shape, &ring_b.shape, &half.shape) else {
        panic!("expected rings");
    };
    assert!((rh.radius - (ra.radius + rb.radius) / 2.0).abs() < 1e-9);

    let end = s.node(id).unwrap().sample(Millis(9_000.0), &timing).unwrap();
    assert!(end.same_content(&ring_b));
}

#[test]
fn update_with_same_content_is_a_no_op() {
    let a = hello();
    let (sig, el) = scene_signatures(&a)[0].clone();
    let mut s = drawing_surface(&a);
    let id = s.insert(Generation(1), el.clone(), sig, 0, Millis::ZERO);
    assert!(!s.update(id, el.clone(), 0, Millis(5.0), &TransitionTiming::default()));
}

#[test]
fn exit_then_remove() {
    let a = hello();
    let mut s = drawing_surface(&a);
    let ids: Vec<NodeId> = scene_signatures(&a)
        .into_iter()
        .take(3)
        .enumerate()
        .map(|(i, (sig, el))| s.insert(Generation(1), el.clone(), sig, i, Millis::ZERO))
        .collect();
    for id in &ids {
        s.reveal(*id, Millis::ZERO);
    }
    assert!(s.begin_exit(ids[1], Millis(100.0)));
    assert!(!s.begin_exit(ids[1], Millis(120.0)));
    assert_eq!(s.live_nodes().count(), 2);
    assert_eq!(s.nodes().len(), 3);

    let timing = TransitionTiming::default();
    let gone = s.frame_at(Millis(100.0 + timing.exit_ms), &timing).unwrap();
    assert_eq!(gone.drawables().count(), 2);

    assert_eq!(s.exiting().collect::<Vec<_>>(), vec![(ids[1], Millis(100.0))]);
    assert!(s.remove(ids[1]).is_some());
    assert_eq!(s.exiting().count(), 0);
    assert!(s.node(ids[1]).is_none());
    assert!(s.remove(ids[0]).is_some());
    assert!(s.remove(ids[0]).is_none());
}

#[test]
fn restack_follows_order_keys() {
    let a = hello();
    let mut s = drawing_surface(&a);
    let spokes: Vec<_> = scene_signatures(&a)
        .into_iter()
        .filter(|(_, e)| e.layer == Layer::Spokes)
        .take(3)
        .collect();
    let ids: Vec<NodeId> = spokes
        .iter()
        .enumerate()
        .map(|(i, (sig, el))| s.insert(Generation(1), (*el).clone(), *sig, i, Millis::ZERO))
        .collect();

    for (id, order) in ids.iter().zip([2, 0, 1]) {
        let el = s.node(*id).unwrap().element.clone();
        s.update(*id, el, order, Millis::ZERO, &TransitionTiming::default());
    }
    s.restack();
    let got: Vec<NodeId> = s.nodes().iter().map(|n| n.id).collect();
    assert_eq!(got, vec![ids[1], ids[2], ids[0]]);
}

#[test]
fn frame_ids_are_unique() {
    let a = hello();
    let mut s = drawing_surface(&a);
    let (sig, el) = scene_signatures(&a)[0].clone();
    for _ in 0..2 {
        let id = s.insert(Generation(1), el.clone(), sig, 0, Millis::ZERO);
        s.reveal(id, Millis::ZERO);
    }
    let frame = s.frame_at(Millis(10_000.0), &TransitionTiming::default()).unwrap();
    let ids: Vec<String> = frame.drawables().map(Element::dom_id).collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
    assert!(frame.defs().is_some());
}

#[test]
fn task_generation() {
    let t = SurfaceTask::Reveal {
        generation: Generation(4),
        node: NodeId(1),
    };
    assert_eq!(t.generation(), Generation(4));
}
