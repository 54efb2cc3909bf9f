use super::*;

fn approx(a: MappedPoint, b: MappedPoint) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

fn bbox() -> NormalizedRect {
    NormalizedRect::new(0.25, 0.2, 0.5, 0.4)
}

#[test]
fn local_origin_maps_to_box_bottom_left_in_raster_space() {
    let resized = ImageSize::new(512, 384);
    let p = to_resized_pixel(NormalizedPoint::new(0.0, 0.0), bbox(), resized);
    assert!(approx(p, MappedPoint::new(0.25 * 512.0, (1.0 - 0.2) * 384.0)));
}

#[test]
fn local_far_corner_maps_to_box_top_right_in_raster_space() {
    let resized = ImageSize::new(512, 384);
    let b = bbox();
    let p = to_resized_pixel(NormalizedPoint::new(1.0, 1.0), b, resized);
    let expected = MappedPoint::new(
        (b.x + b.width) * 512.0,
        (1.0 - b.y - b.height) * 384.0,
    );
    assert!(approx(p, expected));
}

#[test]
fn stage_b_scales_each_axis_independently() {
    let scale = ScaleFactors {
        width_scale: 2.0,
        height_scale: 3.0,
    };
    let p = to_original_pixel(MappedPoint::new(10.0, 20.0), scale);
    assert_eq!(p, MappedPoint::new(20.0, 60.0));
}

#[test]
fn full_mapping_matches_hand_computed_value() {
    // 1024x768 photo analysed at 512x384.
    let resized = ImageSize::new(512, 384);
    let scale = ScaleFactors::between(ImageSize::new(1024, 768), resized);
    let p = map_landmark(NormalizedPoint::new(0.5, 0.25), bbox(), resized, scale);

    // rx = 0.25*512 + 0.5*0.5*512 = 256, ry = 0.4*384 + 0.75*0.4*384 = 268.8
    assert!(approx(p, MappedPoint::new(512.0, 537.6)));
}

#[test]
fn mapping_is_deterministic_bit_for_bit() {
    let mapper = LandmarkMapper::new(
        NormalizedRect::new(0.137, 0.291, 0.333, 0.417),
        ImageSize::new(512, 341),
        ScaleFactors::between(ImageSize::new(3000, 2000), ImageSize::new(512, 341)),
    );
    let pts = [
        NormalizedPoint::new(0.1, 0.9),
        NormalizedPoint::new(0.77, 0.31),
        NormalizedPoint::new(0.5, 0.5),
    ];
    let first = mapper.map_points(&pts);
    // Interleave unrelated calls; output must not depend on them.
    let _ = mapper.map_point(NormalizedPoint::new(0.9, 0.9));
    let second = mapper.map_points(&pts);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
    }
    assert_eq!(first[1], mapper.map_point(pts[1]));
}

#[test]
fn out_of_range_points_are_not_clamped() {
    let resized = ImageSize::new(100, 100);
    let whole = NormalizedRect::new(0.0, 0.0, 1.0, 1.0);
    let p = to_resized_pixel(NormalizedPoint::new(-0.5, 1.5), whole, resized);
    assert!(approx(p, MappedPoint::new(-50.0, -50.0)));
}

#[test]
fn map_points_preserves_order_and_length() {
    let mapper = LandmarkMapper::new(
        NormalizedRect::new(0.0, 0.0, 1.0, 1.0),
        ImageSize::new(10, 10),
        ScaleFactors {
            width_scale: 1.0,
            height_scale: 1.0,
        },
    );
    let out = mapper.map_points(&[NormalizedPoint::new(0.0, 1.0), NormalizedPoint::new(1.0, 0.0)]);
    assert_eq!(out, vec![MappedPoint::new(0.0, 0.0), MappedPoint::new(10.0, 10.0)]);
    assert!(mapper.map_points(&[]).is_empty());
    assert_eq!(mapper.to_resized(NormalizedPoint::new(1.0, 0.0)), out[1]);
}
