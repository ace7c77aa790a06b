use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDate;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};

use dentia_core::models::PatientProfile;
use dentia_report::{DocumentConverter, ReportError, ScanReportPipeline, UploadedScan};
use dentia_services::DiagnosisOracle;

const SCRIPTED_ANSWER: &str = "Dental Condition Name
Dental Caries
Information About the Condition
Localized demineralization of the enamel surface.
Severity Percentage
72%
Home Cure or Remedy
Warm saltwater rinses twice daily.
Dietary Options or Food Solutions
Reduce refined sugar and acidic drinks.
Call for Action
Schedule a dental consultation within two weeks.";

struct ScriptedOracle {
    calls: AtomicUsize,
}

impl ScriptedOracle {
    fn new() -> Arc<Self> {
        Arc::new(ScriptedOracle {
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DiagnosisOracle for ScriptedOracle {
    async fn diagnose(&self, _instruction: &str, _png_image: Bytes) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SCRIPTED_ANSWER.to_string())
    }
}

struct FakeConverter;

#[async_trait]
impl DocumentConverter for FakeConverter {
    async fn convert_to_pdf(&self, input: &Path, output_dir: &Path) -> anyhow::Result<PathBuf> {
        let stem = input.file_stem().unwrap().to_string_lossy();
        let pdf_path = output_dir.join(format!("{stem}.pdf"));
        std::fs::write(&pdf_path, b"%PDF-1.4\n")?;
        Ok(pdf_path)
    }
}

struct FailingConverter;

#[async_trait]
impl DocumentConverter for FailingConverter {
    async fn convert_to_pdf(&self, _input: &Path, _output_dir: &Path) -> anyhow::Result<PathBuf> {
        anyhow::bail!("soffice exited with status 1")
    }
}

fn png_fixture() -> Bytes {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(8, 6, Rgb([120, 80, 40]));
    let mut out = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    Bytes::from(out)
}

fn patient() -> PatientProfile {
    PatientProfile {
        first_name: "Amina".to_string(),
        last_name: "Rahman".to_string(),
        email: "amina@example.com".to_string(),
        gender: Some("female".to_string()),
        date_of_birth: NaiveDate::from_ymd_opt(2000, 6, 15),
        contact_number: Some("+8801000000000".to_string()),
        address: None,
        symptoms: vec!["Toothache".to_string()],
        previous_treatments: vec![],
        brushing_frequency: Some("twice daily".to_string()),
        tobacco_use: Some(false),
    }
}

fn dir_entries(dir: &Path, suffix: &str) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.to_string_lossy().ends_with(suffix))
        .collect()
}

#[tokio::test]
async fn full_pipeline_produces_pdf_and_cleans_up() {
    let reports = tempfile::tempdir().unwrap();
    let oracle = ScriptedOracle::new();
    let pipeline = ScanReportPipeline::new(
        oracle.clone(),
        Arc::new(FakeConverter),
        reports.path(),
        "http://198.51.100.7:8000",
    );

    let uploads = vec![
        UploadedScan {
            filename: "front.png".to_string(),
            data: png_fixture(),
        },
        UploadedScan {
            filename: "notes.txt".to_string(),
            data: Bytes::from_static(b"not an image"),
        },
    ];

    let summary = pipeline.generate(&patient(), uploads).await.unwrap();

    assert_eq!(summary.email, "amina@example.com");
    assert!(summary.pdf_url.starts_with("http://198.51.100.7:8000/reports/amina_example.com_"));
    assert!(summary.pdf_url.ends_with(".pdf"));
    assert_eq!(summary.analysis.condition, "Dental Caries");
    assert_eq!(summary.analysis.severity, "72%");
    assert_eq!(
        summary.analysis.action,
        "Schedule a dental consultation within two weeks."
    );

    // One call for the decodable image, none for the text file.
    assert_eq!(oracle.call_count(), 1);

    assert_eq!(dir_entries(reports.path(), ".pdf").len(), 1);
    assert!(dir_entries(reports.path(), ".docx").is_empty());
    assert!(dir_entries(reports.path(), ".png").is_empty());
}

#[tokio::test]
async fn every_decodable_image_is_diagnosed_even_beyond_embed_cap() {
    let reports = tempfile::tempdir().unwrap();
    let oracle = ScriptedOracle::new();
    let pipeline = ScanReportPipeline::new(
        oracle.clone(),
        Arc::new(FakeConverter),
        reports.path(),
        "http://127.0.0.1:8000",
    );

    let uploads = (0..6)
        .map(|i| UploadedScan {
            filename: format!("scan{i}.png"),
            data: png_fixture(),
        })
        .collect();

    pipeline.generate(&patient(), uploads).await.unwrap();
    assert_eq!(oracle.call_count(), 6);
}

#[tokio::test]
async fn all_invalid_uploads_short_circuit_before_any_model_call() {
    let reports = tempfile::tempdir().unwrap();
    let oracle = ScriptedOracle::new();
    let pipeline = ScanReportPipeline::new(
        oracle.clone(),
        Arc::new(FakeConverter),
        reports.path(),
        "http://127.0.0.1:8000",
    );

    let uploads = vec![UploadedScan {
        filename: "bogus.bin".to_string(),
        data: Bytes::from_static(b"\x00\x01garbage"),
    }];

    let err = pipeline.generate(&patient(), uploads).await.unwrap_err();
    assert!(matches!(err, ReportError::NoValidImages));
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn conversion_failure_leaves_intermediates_behind() {
    let reports = tempfile::tempdir().unwrap();
    let pipeline = ScanReportPipeline::new(
        ScriptedOracle::new(),
        Arc::new(FailingConverter),
        reports.path(),
        "http://127.0.0.1:8000",
    );

    let uploads = vec![UploadedScan {
        filename: "front.png".to_string(),
        data: png_fixture(),
    }];

    let err = pipeline.generate(&patient(), uploads).await.unwrap_err();
    assert!(matches!(err, ReportError::Convert { .. }));

    // Cleanup only runs on success; the DOCX and staging PNG are kept.
    assert_eq!(dir_entries(reports.path(), ".docx").len(), 1);
    assert_eq!(dir_entries(reports.path(), ".png").len(), 1);
}
