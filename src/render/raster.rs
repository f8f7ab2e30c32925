use std::collections::BTreeMap;

use anyhow::Context;

use crate::{
    foundation::error::{GlyphError, GlyphResult},
    scene::model::Layer,
};

/// Largest accepted export edge, in pixels.
pub const MAX_EXPORT_SIZE: u32 = 16_384;

/// Edge used when the requested export size is missing or unparsable.
pub const DEFAULT_EXPORT_SIZE: u32 = 1024;

/// Parse exported markup back into a vector tree.
pub fn parse_markup(markup: &str) -> GlyphResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(markup, &opts).context("parse svg markup")?;
    Ok(tree)
}

/// Drawable node count per layer group of a parsed export.
///
/// Counts every path below each `layer-<name>` group; shapes that usvg wraps in their own group
/// (for opacity or filters) are still counted once.
pub fn layer_census(tree: &usvg::Tree) -> BTreeMap<Layer, usize> {
    fn count_paths(group: &usvg::Group) -> usize {
        group
            .children()
            .iter()
            .map(|child| match child {
                usvg::Node::Group(g) => count_paths(g),
                usvg::Node::Path(_) => 1,
                usvg::Node::Image(_) | usvg::Node::Text(_) => 0,
            })
            .sum()
    }

    fn visit(group: &usvg::Group, out: &mut BTreeMap<Layer, usize>) {
        for child in group.children() {
            let usvg::Node::Group(g) = child else {
                continue;
            };
            match g.id().strip_prefix("layer-").and_then(Layer::from_name) {
                Some(layer) => *out.entry(layer).or_insert(0) += count_paths(g),
                None => visit(g, out),
            }
        }
    }

    let mut out = BTreeMap::new();
    visit(tree.root(), &mut out);
    out
}

/// Parse a user-supplied export size. Missing or unparsable input falls back to
/// [`DEFAULT_EXPORT_SIZE`]; parsed values must lie in `1..=MAX_EXPORT_SIZE`.
pub fn parse_export_size(raw: Option<&str>) -> GlyphResult<u32> {
    let Some(v) = raw.and_then(|s| s.trim().parse::<i64>().ok()) else {
        return Ok(DEFAULT_EXPORT_SIZE);
    };
    if v == 0 {
        return Ok(DEFAULT_EXPORT_SIZE);
    }
    u32::try_from(v)
        .ok()
        .filter(|s| (1..=MAX_EXPORT_SIZE).contains(s))
        .ok_or_else(|| {
            GlyphError::validation(format!(
                "export size must be within 1..={MAX_EXPORT_SIZE}, got {v}"
            ))
        })
}

/// Rasterize markup into a square straight-alpha RGBA8 buffer of `size` x `size`.
pub fn rasterize_rgba8(markup: &str, size: u32) -> GlyphResult<Vec<u8>> {
    if size == 0 || size > MAX_EXPORT_SIZE {
        return Err(GlyphError::validation(format!(
            "export size must be within 1..={MAX_EXPORT_SIZE}, got {size}"
        )));
    }
    let tree = parse_markup(markup)?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| GlyphError::render("failed to allocate export pixmap"))?;
    let sx = size as f32 / tree.size().width();
    let sy = size as f32 / tree.size().height();
    if !sx.is_finite() || !sy.is_finite() {
        return Err(GlyphError::render("svg has invalid width/height"));
    }
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    let mut rgba = Vec::with_capacity(size as usize * size as usize * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(rgba)
}

/// Rasterize markup and encode it as PNG.
#[tracing::instrument(skip(markup), fields(bytes = markup.len()))]
pub fn rasterize_png(markup: &str, size: u32) -> GlyphResult<Vec<u8>> {
    let rgba = rasterize_rgba8(markup, size)?;
    let img = image::RgbaImage::from_raw(size, size, rgba)
        .ok_or_else(|| GlyphError::render("raster buffer has the wrong length"))?;
    let mut out = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
