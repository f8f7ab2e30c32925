use super::*;

fn ring(radius: f64) -> Element {
    Element {
        id: ElementId(1),
        layer: Layer::Rings,
        opacity: 0.5,
        shape: Shape::Ring(Ring {
            center: Point::new(500.0, 500.0),
            radius,
            stroke: Hsl::new(10.0, 50.0, 50.0),
            stroke_width: 4.0,
            blur: false,
        }),
    }
}

#[test]
fn layer_names_roundtrip() {
    for layer in Layer::ALL {
        assert_eq!(Layer::from_name(layer.name()), Some(layer));
    }
    assert_eq!(Layer::from_name("nope"), None);
    assert_eq!(Layer::CoreBg.to_string(), "core-bg");
}

#[test]
fn dom_id_uses_layer_prefix() {
    let mut e = ring(100.0);
    e.id = ElementId(7);
    assert_eq!(e.dom_id(), "ring-7");
}

#[test]
fn same_content_ignores_id() {
    let a = ring(100.0);
    let mut b = ring(100.0);
    b.id = ElementId(42);
    assert!(a.same_content(&b));
    assert!(!a.same_content(&ring(101.0)));
}

#[test]
fn lerp_blends_geometry_and_takes_target_id() {
    let a = ring(100.0);
    let mut b = ring(200.0);
    b.id = ElementId(9);
    b.opacity = 1.0;
    let mid = a.lerp(&b, 0.5).unwrap();
    assert_eq!(mid.id, ElementId(9));
    assert_eq!(mid.opacity, 0.75);
    let Shape::Ring(r) = mid.shape else {
        panic!("expected ring");
    };
    assert_eq!(r.radius, 150.0);
}

#[test]
fn lerp_refuses_mismatched_shapes() {
    let tri = Shape::Polygon(Polygon {
        points: vec![Point::ZERO; 3],
        fill: Hsl::new(0.0, 0.0, 0.0),
    });
    let quad = Shape::Polygon(Polygon {
        points: vec![Point::ZERO; 4],
        fill: Hsl::new(0.0, 0.0, 0.0),
    });
    assert!(tri.lerp(&quad, 0.5).is_none());
    assert!(tri.lerp(&ring(1.0).shape, 0.5).is_none());
}

#[test]
fn non_finite_geometry_is_detected() {
    assert!(ring(10.0).is_finite());
    assert!(!ring(f64::NAN).is_finite());
}
