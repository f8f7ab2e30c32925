use std::collections::{HashMap, VecDeque};

use crate::{
    foundation::core::{CENTER, Point},
    scene::model::{Element, Layer, Scene, Shape, ShapeTag},
};

/// Radius buckets are this many units wide.
const RADIUS_BUCKET: f64 = 10.0;

/// Layer-significant part of a signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum SignatureKey {
    /// Rounded radius of a concentric ring.
    Radius(i64),
    /// Rounded angle in whole degrees around the center, `0..360`.
    Angle(i64),
    /// Position within the layer, for layers whose geometry is fully randomized per build.
    Ordinal(usize),
}

/// Structural key used to pair elements of two independently built scenes.
///
/// Build-local identifiers never take part: two elements match when they sit in the same layer,
/// have the same shape kind and vertex count, and agree on the layer's key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Signature {
    pub layer: Layer,
    pub shape: ShapeTag,
    pub vertices: usize,
    pub key: SignatureKey,
}

impl Signature {
    /// `ordinal` is the element's position among the elements of its layer.
    pub fn of(element: &Element, ordinal: usize) -> Self {
        let vertices = match &element.shape {
            Shape::Path(c) => c.points.len(),
            Shape::Polygon(p) => p.points.len(),
            _ => 0,
        };
        let key = match (element.layer, &element.shape) {
            (Layer::Rings | Layer::Orbits, Shape::Ring(r)) => {
                SignatureKey::Radius((r.radius / RADIUS_BUCKET).round() as i64)
            }
            (Layer::Spokes, Shape::Line(l)) => SignatureKey::Angle(angle_bucket(l.from)),
            (Layer::Petals, Shape::Polygon(p)) => SignatureKey::Angle(angle_bucket(centroid(&p.points))),
            _ => SignatureKey::Ordinal(ordinal),
        };
        Self {
            layer: element.layer,
            shape: element.shape.tag(),
            vertices,
            key,
        }
    }
}

fn angle_bucket(p: Point) -> i64 {
    let v = p - CENTER;
    let deg = v.y.atan2(v.x).to_degrees().round() as i64;
    deg.rem_euclid(360)
}

fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return CENTER;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(x, y), p| (x + p.x, y + p.y));
    Point::new(sx / n, sy / n)
}

/// Signatures of every drawable element of `scene`, in scene order.
pub fn scene_signatures(scene: &Scene) -> Vec<(Signature, &Element)> {
    let mut ordinals: HashMap<Layer, usize> = HashMap::new();
    scene
        .drawables()
        .map(|e| {
            let ord = ordinals.entry(e.layer).or_insert(0);
            let sig = Signature::of(e, *ord);
            *ord += 1;
            (sig, e)
        })
        .collect()
}

/// Pair `next` entries with `prev` entries that carry the same signature.
///
/// Returns, for each entry of `next`, the index into `prev` it is matched to. Each `prev` entry is
/// used at most once; among equal signatures the earliest unused `prev` entry wins, so repeated
/// signatures pair up in order.
pub fn match_signatures(prev: &[Signature], next: &[Signature]) -> Vec<Option<usize>> {
    let mut pool: HashMap<Signature, VecDeque<usize>> = HashMap::new();
    for (i, sig) in prev.iter().enumerate() {
        pool.entry(*sig).or_default().push_back(i);
    }
    next.iter()
        .map(|sig| pool.get_mut(sig).and_then(VecDeque::pop_front))
        .collect()
}

/// Element-level delta between two scenes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneDiff {
    /// `(prev index, next index)` into the drawable lists, in next-scene order.
    pub matched: Vec<(usize, usize)>,
    /// Next-scene drawable indices with no counterpart.
    pub inserted: Vec<usize>,
    /// Previous-scene drawable indices with no counterpart.
    pub removed: Vec<usize>,
}

impl SceneDiff {
    pub fn is_identity(&self) -> bool {
        self.inserted.is_empty() && self.removed.is_empty()
    }
}

/// Pure structural diff of two scenes' drawables. Depends on nothing but the two scenes.
pub fn diff_scenes(prev: &Scene, next: &Scene) -> SceneDiff {
    let prev_sigs: Vec<Signature> = scene_signatures(prev).into_iter().map(|(s, _)| s).collect();
    let next_sigs: Vec<Signature> = scene_signatures(next).into_iter().map(|(s, _)| s).collect();
    let pairs = match_signatures(&prev_sigs, &next_sigs);

    let mut used = vec![false; prev_sigs.len()];
    let mut diff = SceneDiff::default();
    for (ni, m) in pairs.into_iter().enumerate() {
        match m {
            Some(pi) => {
                used[pi] = true;
                diff.matched.push((pi, ni));
            }
            None => diff.inserted.push(ni),
        }
    }
    diff.removed = used
        .iter()
        .enumerate()
        .filter_map(|(i, u)| (!u).then_some(i))
        .collect();
    diff
}

#[cfg(test)]
#[path = "../../tests/unit/scene/signature.rs"]
mod tests;
