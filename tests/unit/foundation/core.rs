use super::*;

#[test]
fn from_rgba8_checks_buffer_length() {
    assert!(PixelImage::from_rgba8(2, 2, vec![0; 16]).is_ok());
    let err = PixelImage::from_rgba8(2, 2, vec![0; 15]).unwrap_err();
    assert!(err.to_string().contains("expected 16"));
}

#[test]
fn pixel_reads_row_major() {
    let mut data = vec![0u8; 3 * 2 * 4];
    let i = (3 + 2) * 4;
    data[i..i + 4].copy_from_slice(&[9, 8, 7, 6]);
    let img = PixelImage::from_rgba8(3, 2, data).unwrap();
    assert_eq!(img.pixel(2, 1), Some([9, 8, 7, 6]));
    assert_eq!(img.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(img.pixel(3, 0), None);
}

#[test]
fn rgba_image_conversion_keeps_pixels() {
    let img = PixelImage::solid(4, 3, [10, 20, 30, 255]);
    let rgba = img.to_rgba_image();
    assert_eq!(rgba.dimensions(), (4, 3));
    assert_eq!(PixelImage::from(rgba), img);
}

#[test]
fn scale_factors_invert_resize() {
    let s = ScaleFactors::between(ImageSize::new(1024, 768), ImageSize::new(512, 384));
    assert_eq!(s.width_scale, 2.0);
    assert_eq!(s.height_scale, 2.0);
}

#[test]
fn normalized_point_accepts_object_or_pair() {
    let a: NormalizedPoint = serde_json::from_str(r#"{"x":0.25,"y":0.5}"#).unwrap();
    let b: NormalizedPoint = serde_json::from_str("[0.25, 0.5]").unwrap();
    assert_eq!(a, b);
    assert!(serde_json::from_str::<NormalizedPoint>("[0.25]").is_err());
}

#[test]
fn midpoint_is_componentwise_mean() {
    let m = MappedPoint::new(10.0, 20.0).midpoint(MappedPoint::new(30.0, 0.0));
    assert_eq!(m, MappedPoint::new(20.0, 10.0));
}
