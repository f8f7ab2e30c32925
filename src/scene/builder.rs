use std::f64::consts::{PI, TAU};

use crate::{
    foundation::{
        core::{CENTER, Point, polar},
        math::XorShift32,
    },
    scene::model::{
        BlurFilter, Curve, Defs, Disc, Element, ElementId, Fill, GradientStop, Layer, Line,
        Polygon, RadialGradient, Ring, Scene, Shape,
    },
    seed::params::GenerationParams,
};

pub const GRADIENT_ID: &str = "bgGradient";
pub const BLUR_FILTER_ID: &str = "softBlur";

pub const MAX_RINGS: usize = 9;
pub const MAX_SPOKES: usize = 120;
pub const MAX_ACCENTS: usize = 40;

const RADIUS_BASE: f64 = 120.0;
const RADIUS_MAX: f64 = 360.0;
const PETAL_RADIUS: f64 = 210.0;
const CURVE_SEGMENTS: usize = 64;
const CENTER_SIDES: [usize; 4] = [4, 5, 6, 8];

/// Per-build state: one generator and one identifier counter, both fresh for every build.
struct SceneBuilder<'a> {
    params: &'a GenerationParams,
    rng: XorShift32,
    next_id: u32,
    elements: Vec<Element>,
}

impl<'a> SceneBuilder<'a> {
    fn new(params: &'a GenerationParams) -> Self {
        Self {
            params,
            rng: XorShift32::new(params.seed),
            next_id: 0,
            elements: Vec::new(),
        }
    }

    fn push(&mut self, layer: Layer, opacity: f64, shape: Shape) {
        self.next_id += 1;
        self.elements.push(Element {
            id: ElementId(self.next_id),
            layer,
            opacity,
            shape,
        });
    }

    fn draw(&mut self) -> f64 {
        self.rng.next_f64()
    }

    fn defs(&mut self) {
        let palette = &self.params.palette;
        let defs = Defs {
            gradient: RadialGradient {
                id: GRADIENT_ID.to_string(),
                cx: 50.0,
                cy: 50.0,
                r: 70.0,
                fx: 50.0,
                fy: 34.0,
                stops: vec![
                    GradientStop {
                        offset: 0.0,
                        color: palette.background_inner,
                        opacity: 1.0,
                    },
                    GradientStop {
                        offset: 100.0,
                        color: palette.background_outer,
                        opacity: 1.0,
                    },
                ],
            },
            blur: BlurFilter {
                id: BLUR_FILTER_ID.to_string(),
                std_deviation: 11.0,
            },
        };
        self.push(Layer::Defs, 1.0, Shape::Defs(defs));
    }

    fn rings(&mut self) {
        let p = self.params;
        let count = ring_count(p);
        let symmetry = f64::from(p.symmetry);
        for i in 0..count {
            let t = i as f64 / (count.max(2) - 1) as f64;
            let ring = Ring {
                center: CENTER,
                radius: RADIUS_BASE + t * (RADIUS_MAX - RADIUS_BASE),
                stroke: if i % 2 == 0 {
                    p.palette.main1
                } else {
                    p.palette.main2
                },
                stroke_width: 5.0 + (1.0 - t) * 12.0 / symmetry,
                blur: i > 0 && i % 3 == 0,
            };
            self.push(Layer::Rings, 0.18 + 0.32 * (1.0 - t), Shape::Ring(ring));
        }
    }

    fn orbits(&mut self) {
        let p = self.params;
        let count = orbit_count(p);
        for i in 0..count {
            let t = (i + 1) as f64 / (count + 1) as f64;
            let ring = Ring {
                center: CENTER,
                radius: RADIUS_BASE + 30.0 + t * (RADIUS_MAX - RADIUS_BASE - 60.0),
                stroke: p.palette.subtle,
                stroke_width: 0.9,
                blur: false,
            };
            self.push(Layer::Orbits, 0.12, Shape::Ring(ring));
        }
    }

    fn spokes(&mut self) {
        let p = self.params;
        let count = spoke_count(p);
        let base_len = 60.0 + p.detail_level * 10.0;
        let jitter = 26.0 + p.detail_level * 7.0;
        let inner = RADIUS_BASE - 16.0;
        let opacity = 0.13 + 0.26 * (1.0 - p.curve_bias);
        for i in 0..count {
            let angle = i as f64 / count as f64 * TAU;
            let len = base_len + (self.draw() - 0.5) * jitter;
            let stroke_width = 1.1 + self.draw() * 2.1;
            let line = Line {
                from: polar(inner, angle),
                to: polar(inner + len, angle),
                stroke: p.palette.subtle,
                stroke_width,
            };
            self.push(Layer::Spokes, opacity, Shape::Line(line));
        }
    }

    fn curves(&mut self) {
        let p = self.params;
        let count = curve_count(p);
        for g in 0..count {
            let base_angle = self.draw() * TAU;
            let band_radius = RADIUS_BASE + 40.0 + self.draw() * (RADIUS_MAX - RADIUS_BASE - 120.0);
            let band_width = 18.0 + self.draw() * 32.0;

            let points = (0..=CURVE_SEGMENTS)
                .map(|i| {
                    let tt = i as f64 / CURVE_SEGMENTS as f64;
                    let angle = base_angle + (tt - 0.5) * (PI * 1.7);
                    let wobble = (tt * PI * 4.0 + g as f64).sin() * 16.0 * p.curve_bias;
                    polar(band_radius + wobble, angle)
                })
                .collect();

            let curve = Curve {
                points,
                stroke: p.palette.main3,
                stroke_width: band_width / 11.0,
            };
            self.push(
                Layer::Curves,
                0.2 + 0.18 * p.curve_bias,
                Shape::Path(curve),
            );
        }
    }

    fn petals(&mut self) {
        let p = self.params;
        let count = petal_count(p);
        let size = 40.0 + p.detail_level * 2.0;
        for i in 0..count {
            let angle = i as f64 / count as f64 * TAU;
            let c = polar(PETAL_RADIUS, angle);
            let points = (0..4)
                .map(|k| {
                    let a = angle + PI / 2.0 * k as f64;
                    let s = if k % 2 == 0 { 1.0 } else { 0.55 };
                    offset(c, size * s, a)
                })
                .collect();
            let petal = Polygon {
                points,
                fill: p.palette.main1,
            };
            self.push(Layer::Petals, 0.4, Shape::Polygon(petal));
        }
    }

    fn accents(&mut self) {
        let p = self.params;
        let count = accent_count(p);
        for _ in 0..count {
            let ring_t = self.draw();
            let r = RADIUS_BASE + 30.0 + ring_t * (RADIUS_MAX - RADIUS_BASE - 80.0);
            let angle = self.draw() * TAU;
            let size = 6.0 + self.draw() * 14.0;
            let rot = self.draw() * TAU;

            let c = polar(r, angle);
            let points = (0..3)
                .map(|k| offset(c, size, rot + k as f64 * (TAU / 3.0)))
                .collect();
            let accent = Polygon {
                points,
                fill: p.palette.highlight,
            };
            self.push(Layer::Accents, 0.6, Shape::Polygon(accent));
        }
    }

    fn core(&mut self) {
        let p = self.params;
        self.push(
            Layer::CoreBg,
            0.96,
            Shape::Disc(Disc {
                center: CENTER,
                radius: 88.0,
                fill: Fill::BackgroundGradient,
                blur: true,
            }),
        );

        for (radius, stroke, width) in [(76.0, p.palette.main1, 3.8), (60.0, p.palette.main2, 2.4)] {
            self.push(
                Layer::Center,
                0.96,
                Shape::Ring(Ring {
                    center: CENTER,
                    radius,
                    stroke,
                    stroke_width: width,
                    blur: false,
                }),
            );
        }

        let sides = center_sides(p);
        let rot = PI / sides as f64;
        let points = (0..sides)
            .map(|i| polar(36.0, rot + i as f64 * (TAU / sides as f64)))
            .collect();
        self.push(
            Layer::Center,
            0.96,
            Shape::Polygon(Polygon {
                points,
                fill: p.palette.subtle,
            }),
        );

        self.push(
            Layer::Center,
            0.98,
            Shape::Disc(Disc {
                center: CENTER,
                radius: 8.0 + p.curve_bias * 12.0,
                fill: Fill::Color(p.palette.highlight),
                blur: false,
            }),
        );
    }

    fn finish(self) -> Scene {
        Scene {
            elements: self.elements,
        }
    }
}

fn offset(c: Point, r: f64, angle: f64) -> Point {
    Point::new(c.x + r * angle.cos(), c.y + r * angle.sin())
}

pub fn ring_count(p: &GenerationParams) -> usize {
    let base = 3 + p.detail_level.floor() as usize;
    let extra = (p.structure_level * 4.0).floor() as usize;
    (base + extra).min(MAX_RINGS)
}

pub fn orbit_count(p: &GenerationParams) -> usize {
    3 + (p.detail_level / 2.0).floor() as usize
}

pub fn spoke_count(p: &GenerationParams) -> usize {
    let density = 10 + (p.detail_level * 4.0).floor() as usize;
    (density * p.symmetry as usize).min(MAX_SPOKES)
}

pub fn curve_count(p: &GenerationParams) -> usize {
    2 + (p.curve_bias * 4.0).floor() as usize
}

pub fn petal_count(p: &GenerationParams) -> usize {
    p.symmetry as usize * 2
}

pub fn accent_count(p: &GenerationParams) -> usize {
    (p.accent_level as usize * 3).min(MAX_ACCENTS)
}

pub fn center_sides(p: &GenerationParams) -> usize {
    CENTER_SIDES[(p.layout_mode as usize).min(CENTER_SIDES.len() - 1)]
}

/// Build the scene for `params`.
///
/// Pure: the generator is re-seeded from `params.seed` and identifiers restart at 1, so the same
/// parameters always yield the same scene. Layers come out in a fixed order (defs, rings, orbits,
/// spokes, curves, petals, accents, core-bg, center) and the generator draw sequence follows
/// that order.
#[tracing::instrument(skip(params), fields(seed = params.seed))]
pub fn build_scene(params: &GenerationParams) -> Scene {
    let mut b = SceneBuilder::new(params);
    b.defs();
    b.rings();
    b.orbits();
    b.spokes();
    b.curves();
    b.petals();
    b.accents();
    b.core();
    let scene = b.finish();
    tracing::debug!(elements = scene.len(), "scene built");
    scene
}

#[cfg(test)]
#[path = "../../tests/unit/scene/builder.rs"]
mod tests;
