use kurbo::PathEl;

use super::*;

fn pts(coords: &[(f64, f64)]) -> Vec<MappedPoint> {
    coords.iter().map(|&(x, y)| MappedPoint::new(x, y)).collect()
}

#[test]
fn lip_polygon_closes_back_to_first_point() {
    let geom = lip_polygon(pts(&[(10.0, 10.0), (30.0, 10.0), (20.0, 25.0), (12.0, 18.0)]));
    let path = geom.to_bezpath().unwrap();
    let els = path.elements();
    assert_eq!(els.len(), 5);
    assert_eq!(els[0], PathEl::MoveTo(Point::new(10.0, 10.0)));
    assert!(els[1..4].iter().all(|e| matches!(e, PathEl::LineTo(_))));
    assert_eq!(els[3], PathEl::LineTo(Point::new(12.0, 18.0)));
    assert_eq!(els[4], PathEl::ClosePath);
}

#[test]
fn eyebrow_three_points_give_two_segments() {
    let p = pts(&[(0.0, 10.0), (10.0, 0.0), (20.0, 10.0)]);
    let segs = smoothed_segments(&p);
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0].control, p[0]);
    assert_eq!(segs[0].end, p[0].midpoint(p[1]));
    assert_eq!(segs[1].control, p[1]);
    assert_eq!(segs[1].end, MappedPoint::new(15.0, 5.0));
}

#[test]
fn eyebrow_path_is_open_and_quadratic() {
    let geom = eyebrow_curve(pts(&[(0.0, 10.0), (10.0, 0.0), (20.0, 10.0)]));
    let path = geom.to_bezpath().unwrap();
    let els = path.elements();
    assert_eq!(
        els,
        &[
            PathEl::MoveTo(Point::new(0.0, 10.0)),
            PathEl::QuadTo(Point::new(0.0, 10.0), Point::new(5.0, 5.0)),
            PathEl::QuadTo(Point::new(10.0, 0.0), Point::new(15.0, 5.0)),
        ]
    );
}

#[test]
fn fewer_than_two_points_produce_no_path() {
    for geom in [
        lip_polygon(Vec::new()),
        lip_polygon(pts(&[(1.0, 1.0)])),
        eyebrow_curve(Vec::new()),
        eyebrow_curve(pts(&[(1.0, 1.0)])),
    ] {
        assert!(!geom.is_drawable());
        assert!(geom.to_bezpath().is_none());
    }
    assert!(smoothed_segments(&pts(&[(1.0, 1.0)])).is_empty());
}

#[test]
fn two_points_are_enough_to_draw() {
    let geom = eyebrow_curve(pts(&[(0.0, 0.0), (4.0, 4.0)]));
    assert!(geom.is_drawable());
    assert_eq!(geom.to_bezpath().unwrap().elements().len(), 2);
    assert_eq!(geom.points().len(), 2);
}
