use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Text/vision completion oracle used for scan diagnosis.
///
/// The caller provides the full instruction text and one PNG image; the
/// oracle returns free-form text. No structured schema is enforced here -
/// downstream parsing deals with whatever comes back.
#[async_trait]
pub trait DiagnosisOracle: Send + Sync {
    async fn diagnose(&self, instruction: &str, png_image: Bytes) -> Result<String>;
}
