use std::fmt::Write as _;

use crate::{
    foundation::{
        core::{Point, Viewport},
        math::fmt_num,
    },
    scene::{
        builder::{BLUR_FILTER_ID, GRADIENT_ID},
        model::{Defs, Element, Fill, Layer, Scene, Shape},
    },
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Serialize a scene into a self-contained SVG document.
///
/// The document carries one `<defs>` block followed by every drawable element in scene order.
/// Each contiguous run of a layer is wrapped in `<g id="layer-<name>">` and every node carries its
/// build-local id, so the structure survives a parse.
pub fn scene_to_markup(scene: &Scene) -> String {
    let vp = Viewport::default();
    let mut out = String::with_capacity(256 + scene.len() * 160);
    let _ = write!(
        out,
        r#"<svg xmlns="{SVG_NS}" viewBox="{}" width="{}" height="{}">"#,
        vp.view_box(),
        fmt_num(vp.width),
        fmt_num(vp.height)
    );

    out.push_str("<defs>");
    if let Some(defs) = scene.defs() {
        write_defs(&mut out, defs);
    }
    out.push_str("</defs>");

    let mut open: Option<Layer> = None;
    for el in scene.drawables() {
        if open != Some(el.layer) {
            if open.is_some() {
                out.push_str("</g>");
            }
            let _ = write!(out, r#"<g id="layer-{}">"#, el.layer.name());
            open = Some(el.layer);
        }
        write_element(&mut out, el);
    }
    if open.is_some() {
        out.push_str("</g>");
    }

    out.push_str("</svg>");
    out
}

pub(crate) fn write_defs(out: &mut String, defs: &Defs) {
    let g = &defs.gradient;
    let _ = write!(
        out,
        r#"<radialGradient id="{}" cx="{}%" cy="{}%" r="{}%" fx="{}%" fy="{}%">"#,
        g.id,
        fmt_num(g.cx),
        fmt_num(g.cy),
        fmt_num(g.r),
        fmt_num(g.fx),
        fmt_num(g.fy)
    );
    for stop in &g.stops {
        let _ = write!(
            out,
            r#"<stop offset="{}%" stop-color="{}" stop-opacity="{}"/>"#,
            fmt_num(stop.offset),
            stop.color.to_hex(),
            fmt_num(stop.opacity)
        );
    }
    out.push_str("</radialGradient>");

    let f = &defs.blur;
    let _ = write!(
        out,
        r#"<filter id="{}" x="-20%" y="-20%" width="140%" height="140%"><feGaussianBlur stdDeviation="{}"/></filter>"#,
        f.id,
        fmt_num(f.std_deviation)
    );
}

fn blur_attr(blur: bool) -> String {
    if blur {
        format!(r#" filter="url(#{BLUR_FILTER_ID})""#)
    } else {
        String::new()
    }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `M x y L x y ...` for an open polyline.
pub fn path_data(points: &[Point]) -> String {
    let mut d = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        let _ = write!(d, "{cmd} {} {}", fmt_num(p.x), fmt_num(p.y));
    }
    d
}

pub(crate) fn write_element(out: &mut String, el: &Element) {
    let id = el.dom_id();
    let opacity = fmt_num(el.opacity);
    let _ = match &el.shape {
        Shape::Defs(_) => Ok(()),
        Shape::Ring(r) => write!(
            out,
            r#"<circle id="{id}" cx="{}" cy="{}" r="{}" stroke="{}" stroke-width="{}" fill="none" opacity="{opacity}"{}/>"#,
            fmt_num(r.center.x),
            fmt_num(r.center.y),
            fmt_num(r.radius),
            r.stroke.to_hex(),
            fmt_num(r.stroke_width),
            blur_attr(r.blur)
        ),
        Shape::Disc(d) => {
            let fill = match d.fill {
                Fill::Color(c) => c.to_hex(),
                Fill::BackgroundGradient => format!("url(#{GRADIENT_ID})"),
            };
            write!(
                out,
                r#"<circle id="{id}" cx="{}" cy="{}" r="{}" fill="{fill}" opacity="{opacity}"{}/>"#,
                fmt_num(d.center.x),
                fmt_num(d.center.y),
                fmt_num(d.radius),
                blur_attr(d.blur)
            )
        }
        Shape::Line(l) => write!(
            out,
            r#"<line id="{id}" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" stroke-linecap="round" opacity="{opacity}"/>"#,
            fmt_num(l.from.x),
            fmt_num(l.from.y),
            fmt_num(l.to.x),
            fmt_num(l.to.y),
            l.stroke.to_hex(),
            fmt_num(l.stroke_width)
        ),
        Shape::Path(c) => write!(
            out,
            r#"<path id="{id}" d="{}" stroke="{}" stroke-width="{}" fill="none" opacity="{opacity}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            path_data(&c.points),
            c.stroke.to_hex(),
            fmt_num(c.stroke_width)
        ),
        Shape::Polygon(p) => write!(
            out,
            r#"<polygon id="{id}" points="{}" fill="{}" opacity="{opacity}"/>"#,
            points_attr(&p.points),
            p.fill.to_hex()
        ),
    };
}

#[cfg(test)]
#[path = "../../tests/unit/render/markup.rs"]
mod tests;
