use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use dentia_core::models::PatientProfile;
use dentia_services::DiagnosisOracle;

use crate::context::ReportContext;
use crate::document::{render_report, DocumentConverter};
use crate::error::ReportError;
use crate::normalize::{normalize_image, NormalizedImage};
use crate::sections::{analysis_header, parse_sections, CLINICAL_PROMPT};

/// A raw multipart upload handed to the pipeline. The filename is only
/// used for logging; content sniffing decides whether it is an image.
#[derive(Debug, Clone)]
pub struct UploadedScan {
    pub filename: String,
    pub data: Bytes,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScanAnalysis {
    pub condition: String,
    pub severity: String,
    pub action: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScanReportSummary {
    pub email: String,
    pub pdf_url: String,
    pub analysis: ScanAnalysis,
}

/// Drives a batch of uploads through normalization, per-image diagnosis,
/// section parsing, document rendering and PDF conversion.
///
/// Model calls are strictly sequential, one per decodable image, in upload
/// order. Staging images and the intermediate DOCX are removed only on the
/// success path; a failure partway leaves them behind in the reports
/// directory.
pub struct ScanReportPipeline {
    oracle: Arc<dyn DiagnosisOracle>,
    converter: Arc<dyn DocumentConverter>,
    reports_dir: PathBuf,
    public_base_url: String,
}

impl ScanReportPipeline {
    pub fn new(
        oracle: Arc<dyn DiagnosisOracle>,
        converter: Arc<dyn DocumentConverter>,
        reports_dir: impl Into<PathBuf>,
        public_base_url: impl Into<String>,
    ) -> Self {
        ScanReportPipeline {
            oracle,
            converter,
            reports_dir: reports_dir.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub async fn generate(
        &self,
        profile: &PatientProfile,
        uploads: Vec<UploadedScan>,
    ) -> Result<ScanReportSummary, ReportError> {
        let images = self.normalize_uploads(&uploads);
        if images.is_empty() {
            return Err(ReportError::NoValidImages);
        }

        let mut full_text = String::new();
        for (idx, img) in images.iter().enumerate() {
            let answer = self
                .oracle
                .diagnose(CLINICAL_PROMPT, img.png.clone())
                .await
                .map_err(|source| ReportError::Oracle { source })?;
            full_text.push_str(&analysis_header(idx + 1));
            full_text.push_str(answer.trim());
            full_text.push('\n');
        }

        let sections = parse_sections(&full_text);
        let context = ReportContext::build(profile, &sections, Utc::now().date_naive());

        // Second-resolution timestamp; two reports for the same user within
        // one second collide on the same filename.
        let timestamp = Utc::now().format("%Y-%m-%d_%H-%M-%S");
        let stem = format!("{}_{timestamp}", profile.email.replace('@', "_"));
        let docx_path = self.reports_dir.join(format!("{stem}.docx"));

        render_report(&context, &images, &docx_path)?;
        let pdf_path = self
            .converter
            .convert_to_pdf(&docx_path, &self.reports_dir)
            .await
            .map_err(|source| ReportError::Convert {
                input: docx_path.clone(),
                source,
            })?;
        std::fs::remove_file(&docx_path)?;

        for img in &images {
            if let Err(error) = std::fs::remove_file(&img.path) {
                tracing::warn!(path = %img.path.display(), %error, "failed to remove staging image");
            }
        }

        let pdf_name = pdf_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{stem}.pdf"));
        let pdf_url = format!("{}/reports/{}", self.public_base_url, pdf_name);
        tracing::info!(email = %profile.email, %pdf_url, images = images.len(), "scan report generated");

        Ok(ScanReportSummary {
            email: profile.email.clone(),
            pdf_url,
            analysis: ScanAnalysis {
                condition: context.condition,
                severity: context.severity,
                action: context.action,
            },
        })
    }

    /// Decodes each upload to a staged RGB PNG, skipping files that are not
    /// decodable images.
    fn normalize_uploads(&self, uploads: &[UploadedScan]) -> Vec<NormalizedImage> {
        let mut images = Vec::with_capacity(uploads.len());
        for upload in uploads {
            match normalize_image(&upload.data, &self.reports_dir) {
                Ok(img) => images.push(img),
                Err(error) => {
                    tracing::warn!(filename = %upload.filename, %error, "skipping invalid image");
                }
            }
        }
        images
    }
}
