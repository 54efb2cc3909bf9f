use std::path::Path;

use super::*;

#[test]
fn file_uris_and_bare_paths_resolve() {
    assert_eq!(
        resolve_image_ref("file:///tmp/a.jpg").unwrap(),
        Path::new("/tmp/a.jpg")
    );
    assert_eq!(
        resolve_image_ref("file://localhost/tmp/a.jpg").unwrap(),
        Path::new("/tmp/a.jpg")
    );
    assert_eq!(
        resolve_image_ref(" photos/me.png ").unwrap(),
        Path::new("photos/me.png")
    );
}

#[test]
fn other_schemes_and_empty_refs_fail_to_load() {
    for bad in ["", "   ", "file://", "https://example.com/a.jpg"] {
        let err = resolve_image_ref(bad).unwrap_err();
        assert!(matches!(err, FacetintError::Load(_)), "{bad:?}");
    }
}

#[test]
fn loader_reads_png_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("src.png");
    image::RgbaImage::from_pixel(3, 2, image::Rgba([9, 8, 7, 255]))
        .save(&path)
        .unwrap();

    let uri = format!("file://{}", path.display());
    let img = FsImageLoader::new().load(&uri).unwrap();
    assert_eq!((img.width(), img.height()), (3, 2));
    assert_eq!(img.pixel(2, 1), Some([9, 8, 7, 255]));
}

#[test]
fn missing_file_is_a_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    let err = FsImageLoader::new()
        .load(dir.path().join("nope.jpg").to_str().unwrap())
        .unwrap_err();
    assert!(matches!(err, FacetintError::Load(_)));
}

#[test]
fn percent_encoded_file_uris_are_decoded() {
    assert_eq!(
        resolve_image_ref("file:///tmp/my%20photo%25.png").unwrap(),
        Path::new("/tmp/my photo%.png")
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("my photo.png");
    image::RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 255]))
        .save(&path)
        .unwrap();
    let uri = url::Url::from_file_path(&path).unwrap().to_string();
    assert!(uri.ends_with("/my%20photo.png"), "{uri}");
    let img = FsImageLoader::new().load(&uri).unwrap();
    assert_eq!(img.pixel(1, 1), Some([1, 2, 3, 255]));
}
