use super::*;

#[test]
fn from_straight_rgba_rounds_half_up() {
    let c = Rgba8Premul::from_straight_rgba(100, 50, 200, 128);
    assert_eq!(c.r, ((100u16 * 128 + 127) / 255) as u8);
    assert_eq!(c.g, ((50u16 * 128 + 127) / 255) as u8);
    assert_eq!(c.b, ((200u16 * 128 + 127) / 255) as u8);
    assert_eq!(c.a, 128);

    let opaque = Rgba8Premul::from_straight_rgba(10, 20, 30, 255);
    assert_eq!((opaque.r, opaque.g, opaque.b, opaque.a), (10, 20, 30, 255));
}

#[test]
fn transform_to_affine_identity_and_translation() {
    let t = Transform2D::default();
    assert_eq!(t.to_affine(), kurbo::Affine::IDENTITY);

    let t = Transform2D {
        translate: Vec2::new(10.0, -2.5),
        ..Transform2D::default()
    };
    assert_eq!(
        t.to_affine(),
        kurbo::Affine::translate(Vec2::new(10.0, -2.5))
    );
}

#[test]
fn transform_maps_anchor_onto_translate_under_rotation() {
    let t = Transform2D {
        translate: Vec2::new(40.0, 60.0),
        rotation_rad: 1.3,
        scale: Vec2::new(2.0, 2.0),
        anchor: Vec2::new(25.0, 90.0),
    };
    let p = t.to_affine() * Point::new(25.0, 90.0);
    assert!((p.x - 40.0).abs() < 1e-9);
    assert!((p.y - 60.0).abs() < 1e-9);
}

#[test]
fn transform_scales_about_anchor() {
    let t = Transform2D {
        translate: Vec2::new(0.0, 0.0),
        rotation_rad: 0.0,
        scale: Vec2::new(3.0, 3.0),
        anchor: Vec2::new(10.0, 10.0),
    };
    // A point 1px right of the anchor lands 3px right of the translate.
    let p = t.to_affine() * Point::new(11.0, 10.0);
    assert!((p.x - 3.0).abs() < 1e-9);
    assert!(p.y.abs() < 1e-9);
}
