use std::sync::Mutex;

use super::*;
use crate::{
    detect::{
        face::{FaceRecord, LandmarkRegion},
        oracle::StaticLandmarkOracle,
    },
    foundation::{
        core::{NormalizedPoint, NormalizedRect},
        error::FacetintError,
    },
};

const GRAY: [u8; 4] = [128, 128, 128, 255];

struct MemoryLoader;

impl ImageLoader for MemoryLoader {
    fn load(&self, image_ref: &str) -> FacetintResult<PixelImage> {
        match image_ref {
            "mem://gray" => Ok(PixelImage::solid(64, 64, GRAY)),
            "mem://color" => Ok(PixelImage::solid(64, 64, [200, 40, 10, 255])),
            other => Err(FacetintError::load(format!("unknown image '{other}'"))),
        }
    }
}

#[derive(Default)]
struct MemoryWriter {
    written: Mutex<Vec<PixelImage>>,
}

impl ArtifactWriter for MemoryWriter {
    fn write(&self, image: &PixelImage) -> FacetintResult<OutputReference> {
        let mut written = self.written.lock().unwrap();
        written.push(image.clone());
        OutputReference::from_path(std::path::Path::new(&format!("/mem/{}.jpg", written.len())))
    }
}

fn lips_face() -> FaceRecord {
    FaceRecord::new(NormalizedRect::new(0.25, 0.25, 0.5, 0.5)).with_landmarks(
        LandmarkRegion::OuterLips,
        vec![
            NormalizedPoint::new(0.2, 0.2),
            NormalizedPoint::new(0.8, 0.2),
            NormalizedPoint::new(0.8, 0.5),
            NormalizedPoint::new(0.2, 0.5),
        ],
    )
}

fn pipeline(faces: Vec<FaceRecord>) -> (FacePipeline, Arc<MemoryWriter>) {
    let writer = Arc::new(MemoryWriter::default());
    let pipeline = FacePipeline::new(
        Arc::new(MemoryLoader),
        Arc::new(StaticLandmarkOracle::new(faces)),
        writer.clone(),
        PipelineSettings::default(),
    )
    .unwrap();
    (pipeline, writer)
}

#[test]
fn invalid_settings_are_rejected_up_front() {
    let settings = PipelineSettings {
        jpeg_quality: 0,
        ..PipelineSettings::default()
    };
    let err = FacePipeline::new(
        Arc::new(MemoryLoader),
        Arc::new(StaticLandmarkOracle::empty()),
        Arc::new(MemoryWriter::default()),
        settings,
    )
    .unwrap_err();
    assert!(matches!(err, FacetintError::Validation(_)));
}

#[tokio::test]
async fn grayscale_skips_detection_and_stores_one_artifact() {
    let (pipeline, writer) = pipeline(Vec::new());
    let out = pipeline.convert_to_grayscale("mem://color").await.unwrap();
    assert_eq!(out.as_str(), "file:///mem/1.jpg");

    let written = writer.written.lock().unwrap();
    assert_eq!(written.len(), 1);
    let [r, g, b, a] = written[0].pixel(10, 10).unwrap();
    assert!(r == g && g == b && a == 255);
}

#[tokio::test]
async fn lip_color_writes_a_tinted_copy() {
    let (pipeline, writer) = pipeline(vec![lips_face()]);
    pipeline.add_lip_color("mem://gray", "#00FF00").await.unwrap();

    let written = writer.written.lock().unwrap();
    let [r, g, b, _] = written[0].pixel(32, 36).unwrap();
    assert!(g > 180 && r < 80 && b < 80, "({r},{g},{b})");
    assert_eq!(written[0].pixel(1, 1), Some(GRAY));
}

#[tokio::test]
async fn failures_write_nothing() {
    let (pipeline, writer) = pipeline(Vec::new());

    let err = pipeline.add_lip_color("mem://gray", "#FF0000").await.unwrap_err();
    assert!(matches!(err, FacetintError::NoFaceFound(_)));

    let err = pipeline.recolor_eyebrows("mem://missing", "#FF0000").await.unwrap_err();
    assert!(matches!(err, FacetintError::Load(_)));

    assert!(writer.written.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_color_falls_back_to_black() {
    let (pipeline, writer) = pipeline(vec![lips_face()]);
    pipeline.add_lip_color("mem://gray", "not-a-color").await.unwrap();

    let written = writer.written.lock().unwrap();
    let [r, g, b, _] = written[0].pixel(32, 36).unwrap();
    assert!(r < 60 && g < 60 && b < 60, "({r},{g},{b})");
}

#[tokio::test]
async fn dispatched_operations_resolve_independently() {
    let (pipeline, writer) = pipeline(vec![lips_face()]);

    let handles = vec![
        pipeline.dispatch(Operation::Grayscale {
            image_ref: "mem://gray".to_owned(),
        }),
        pipeline.dispatch(Operation::LipColor {
            image_ref: "mem://gray".to_owned(),
            hex_color: "#FF0000".to_owned(),
        }),
        pipeline.dispatch(Operation::EyebrowColor {
            image_ref: "mem://nope".to_owned(),
            hex_color: "#FF0000".to_owned(),
        }),
    ];

    let mut ok = 0;
    let mut failed = 0;
    for handle in handles {
        match handle.wait().await {
            Ok(_) => ok += 1,
            Err(FacetintError::Load(_)) => failed += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!((ok, failed), (2, 1));
    assert_eq!(writer.written.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn run_matches_the_direct_calls() {
    let (pipeline, writer) = pipeline(vec![lips_face()]);
    pipeline
        .run(Operation::LipColor {
            image_ref: "mem://gray".to_owned(),
            hex_color: "FF0000".to_owned(),
        })
        .await
        .unwrap();
    pipeline.add_lip_color("mem://gray", "#ff0000").await.unwrap();

    let written = writer.written.lock().unwrap();
    assert_eq!(written[0], written[1]);
}

#[test]
fn operation_names_are_stable() {
    let op = Operation::EyebrowColor {
        image_ref: String::new(),
        hex_color: String::new(),
    };
    assert_eq!(op.name(), "eyebrow-color");
}
