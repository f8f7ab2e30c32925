use std::collections::BTreeMap;

use crate::{
    foundation::{core::Point, math::lerp},
    seed::palette::Hsl,
};

/// Named drawing bucket. Controls paint order in the export and reveal grouping on the surface.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Layer {
    Defs,
    CoreBg,
    Rings,
    Orbits,
    Spokes,
    Curves,
    Petals,
    Accents,
    Center,
}

impl Layer {
    pub const ALL: [Layer; 9] = [
        Layer::Defs,
        Layer::CoreBg,
        Layer::Rings,
        Layer::Orbits,
        Layer::Spokes,
        Layer::Curves,
        Layer::Petals,
        Layer::Accents,
        Layer::Center,
    ];

    /// Reveal order used by the live surface when none is configured.
    pub const REVEAL_ORDER: [Layer; 8] = [
        Layer::CoreBg,
        Layer::Rings,
        Layer::Orbits,
        Layer::Spokes,
        Layer::Curves,
        Layer::Petals,
        Layer::Accents,
        Layer::Center,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Defs => "defs",
            Self::CoreBg => "core-bg",
            Self::Rings => "rings",
            Self::Orbits => "orbits",
            Self::Spokes => "spokes",
            Self::Curves => "curves",
            Self::Petals => "petals",
            Self::Accents => "accents",
            Self::Center => "center",
        }
    }

    pub fn from_name(name: &str) -> Option<Layer> {
        Self::ALL.into_iter().find(|l| l.name() == name)
    }

    /// Prefix of the per-build element identifiers in this layer.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Defs => "defs",
            Self::CoreBg => "core-bg",
            Self::Rings => "ring",
            Self::Orbits => "orbit",
            Self::Spokes => "spoke",
            Self::Curves => "curve",
            Self::Petals => "petal",
            Self::Accents => "accent",
            Self::Center => "center",
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Build-local identifier. Starts at 1 for every build; meaningless across builds.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u32);

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    /// Percent along the gradient radius.
    pub offset: f64,
    pub color: Hsl,
    pub opacity: f64,
}

/// Radial gradient, geometry in percent of the bounding box.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RadialGradient {
    pub id: String,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fx: f64,
    pub fy: f64,
    pub stops: Vec<GradientStop>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlurFilter {
    pub id: String,
    pub std_deviation: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Defs {
    pub gradient: RadialGradient,
    pub blur: BlurFilter,
}

/// Fill of a solid disc.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Fill {
    Color(Hsl),
    /// The scene's radial background gradient.
    BackgroundGradient,
}

/// Stroked circle with no fill.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ring {
    pub center: Point,
    pub radius: f64,
    pub stroke: Hsl,
    pub stroke_width: f64,
    pub blur: bool,
}

/// Filled circle.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Disc {
    pub center: Point,
    pub radius: f64,
    pub fill: Fill,
    pub blur: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub stroke: Hsl,
    pub stroke_width: f64,
}

/// Open polyline drawn as a path.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Curve {
    pub points: Vec<Point>,
    pub stroke: Hsl,
    pub stroke_width: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub fill: Hsl,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Defs(Defs),
    Ring(Ring),
    Disc(Disc),
    Line(Line),
    Path(Curve),
    Polygon(Polygon),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum ShapeTag {
    Defs,
    Ring,
    Disc,
    Line,
    Path,
    Polygon,
}

impl Shape {
    pub fn tag(&self) -> ShapeTag {
        match self {
            Self::Defs(_) => ShapeTag::Defs,
            Self::Ring(_) => ShapeTag::Ring,
            Self::Disc(_) => ShapeTag::Disc,
            Self::Line(_) => ShapeTag::Line,
            Self::Path(_) => ShapeTag::Path,
            Self::Polygon(_) => ShapeTag::Polygon,
        }
    }

    /// Blend geometry and paint toward `to`. `None` when the two cannot be interpolated
    /// (different kinds or vertex counts).
    pub fn lerp(&self, to: &Shape, t: f64) -> Option<Shape> {
        let pt = |a: Point, b: Point| a.lerp(b, t);
        let pts = |a: &[Point], b: &[Point]| -> Option<Vec<Point>> {
            (a.len() == b.len()).then(|| a.iter().zip(b).map(|(p, q)| p.lerp(*q, t)).collect())
        };
        let out = match (self, to) {
            (Self::Ring(a), Self::Ring(b)) => Self::Ring(Ring {
                center: pt(a.center, b.center),
                radius: lerp(a.radius, b.radius, t),
                stroke: a.stroke.lerp(b.stroke, t),
                stroke_width: lerp(a.stroke_width, b.stroke_width, t),
                blur: b.blur,
            }),
            (Self::Disc(a), Self::Disc(b)) => Self::Disc(Disc {
                center: pt(a.center, b.center),
                radius: lerp(a.radius, b.radius, t),
                fill: match (a.fill, b.fill) {
                    (Fill::Color(x), Fill::Color(y)) => Fill::Color(x.lerp(y, t)),
                    (_, f) => f,
                },
                blur: b.blur,
            }),
            (Self::Line(a), Self::Line(b)) => Self::Line(Line {
                from: pt(a.from, b.from),
                to: pt(a.to, b.to),
                stroke: a.stroke.lerp(b.stroke, t),
                stroke_width: lerp(a.stroke_width, b.stroke_width, t),
            }),
            (Self::Path(a), Self::Path(b)) => Self::Path(Curve {
                points: pts(&a.points, &b.points)?,
                stroke: a.stroke.lerp(b.stroke, t),
                stroke_width: lerp(a.stroke_width, b.stroke_width, t),
            }),
            (Self::Polygon(a), Self::Polygon(b)) => Self::Polygon(Polygon {
                points: pts(&a.points, &b.points)?,
                fill: a.fill.lerp(b.fill, t),
            }),
            (Self::Defs(_), Self::Defs(b)) => Self::Defs(b.clone()),
            _ => return None,
        };
        Some(out)
    }

    fn for_each_scalar(&self, f: &mut impl FnMut(f64)) {
        fn point(p: &Point, f: &mut impl FnMut(f64)) {
            f(p.x);
            f(p.y);
        }
        match self {
            Self::Defs(d) => {
                f(d.blur.std_deviation);
                for s in &d.gradient.stops {
                    f(s.offset);
                    f(s.opacity);
                }
            }
            Self::Ring(r) => {
                point(&r.center, f);
                f(r.radius);
                f(r.stroke_width);
                f(r.stroke.h);
            }
            Self::Disc(d) => {
                point(&d.center, f);
                f(d.radius);
            }
            Self::Line(l) => {
                point(&l.from, f);
                point(&l.to, f);
                f(l.stroke_width);
            }
            Self::Path(c) => {
                for p in &c.points {
                    point(p, f);
                }
                f(c.stroke_width);
            }
            Self::Polygon(p) => {
                for q in &p.points {
                    point(q, f);
                }
                f(p.fill.h);
            }
        }
    }
}

/// One drawable descriptor. Immutable once the builder hands it out.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub layer: Layer,
    pub opacity: f64,
    pub shape: Shape,
}

impl Element {
    /// `"<prefix>-<n>"`, unique within one scene.
    pub fn dom_id(&self) -> String {
        format!("{}-{}", self.layer.id_prefix(), self.id.0)
    }

    pub fn is_defs(&self) -> bool {
        matches!(self.shape, Shape::Defs(_))
    }

    /// Equal apart from the build-local identifier.
    pub fn same_content(&self, other: &Element) -> bool {
        self.layer == other.layer && self.opacity == other.opacity && self.shape == other.shape
    }

    pub fn lerp(&self, to: &Element, t: f64) -> Option<Element> {
        Some(Element {
            id: to.id,
            layer: to.layer,
            opacity: lerp(self.opacity, to.opacity, t),
            shape: self.shape.lerp(&to.shape, t)?,
        })
    }

    /// No NaN or infinity anywhere in geometry or paint.
    pub fn is_finite(&self) -> bool {
        let mut ok = self.opacity.is_finite();
        self.shape.for_each_scalar(&mut |v| ok &= v.is_finite());
        ok
    }
}

/// Ordered output of one build.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn defs(&self) -> Option<&Defs> {
        self.elements.iter().find_map(|e| match &e.shape {
            Shape::Defs(d) => Some(d),
            _ => None,
        })
    }

    pub fn drawables(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| !e.is_defs())
    }

    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.layer == layer)
    }

    pub fn count(&self, layer: Layer) -> usize {
        self.layer(layer).count()
    }

    /// Drawable element count per layer (defs excluded).
    pub fn layer_counts(&self) -> BTreeMap<Layer, usize> {
        let mut out = BTreeMap::new();
        for e in self.drawables() {
            *out.entry(e.layer).or_insert(0) += 1;
        }
        out
    }

    pub fn is_finite(&self) -> bool {
        self.elements.iter().all(Element::is_finite)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
