use super::*;
use crate::{
    scene::builder::build_scene,
    seed::{palette::PaletteMode, params::GenerationParams},
};

fn hello_markup() -> String {
    scene_to_markup(&build_scene(&GenerationParams::derive(
        "Hello",
        PaletteMode::Auto,
    )))
}

#[test]
fn document_is_self_contained() {
    let svg = hello_markup();
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1000 1000""#));
    assert!(svg.ends_with("</svg>"));
    assert_eq!(svg.matches("<defs>").count(), 1);
    assert!(svg.contains(r#"<radialGradient id="bgGradient""#));
    assert!(svg.contains(r#"<filter id="softBlur""#));
    assert_eq!(svg.matches("http://").count(), 1);
    assert!(!svg.contains("NaN"));
}

#[test]
fn one_node_per_drawable_grouped_by_layer() {
    let svg = hello_markup();
    // 4 rings + 3 orbits + 2 center rings + core disc + center dot.
    assert_eq!(svg.matches("<circle ").count(), 11);
    assert_eq!(svg.matches("<line ").count(), 90);
    assert_eq!(svg.matches("<path ").count(), 3);
    assert_eq!(svg.matches("<polygon ").count(), 13);
    for layer in ["rings", "orbits", "spokes", "curves", "petals", "core-bg", "center"] {
        assert_eq!(svg.matches(&format!(r#"<g id="layer-{layer}">"#)).count(), 1);
    }
    assert!(!svg.contains("layer-accents"));
    assert!(!svg.contains("layer-defs"));
}

#[test]
fn core_disc_uses_gradient_and_blur() {
    let svg = hello_markup();
    assert!(svg.contains(r#"fill="url(#bgGradient)""#));
    assert!(svg.contains(r#"filter="url(#softBlur)""#));
}

#[test]
fn path_data_is_an_open_polyline() {
    let d = path_data(&[Point::new(1.0, 2.0), Point::new(3.5, 4.0), Point::new(5.0, 6.0)]);
    assert_eq!(d, "M 1 2 L 3.5 4 L 5 6");
    assert_eq!(path_data(&[]), "");
}

#[test]
fn empty_scene_still_renders_a_document() {
    let svg = scene_to_markup(&Scene::default());
    assert!(svg.contains("<defs></defs>"));
    assert!(!svg.contains("<g "));
}
