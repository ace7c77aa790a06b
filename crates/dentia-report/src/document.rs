use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use async_trait::async_trait;
use docx_rs::{AlignmentType, Docx, Paragraph, Pic, Run};

use crate::context::ReportContext;
use crate::error::ReportError;
use crate::normalize::NormalizedImage;

/// Scan images are embedded two inches wide, height scaled to keep the
/// aspect ratio. EMU, 914400 per inch.
const IMAGE_WIDTH_EMU: u32 = 2 * 914_400;

/// At most five scan images appear in the document; extra uploads are
/// still analyzed but not embedded.
pub const MAX_EMBEDDED_IMAGES: usize = 5;

fn heading(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).bold().size(28))
}

fn labeled(label: &str, value: &str) -> Paragraph {
    Paragraph::new()
        .add_run(Run::new().add_text(format!("{label}: ")).bold())
        .add_run(Run::new().add_text(value))
}

fn body(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

/// The slice of images that actually ends up in the document.
fn embedded_images(images: &[NormalizedImage]) -> &[NormalizedImage] {
    &images[..images.len().min(MAX_EMBEDDED_IMAGES)]
}

/// Renders the clinical report as a DOCX file at `path`.
///
/// The layout is fixed: a title, the patient details block, the six
/// diagnosis sections, then up to [`MAX_EMBEDDED_IMAGES`] scan images.
pub fn render_report(
    context: &ReportContext,
    images: &[NormalizedImage],
    path: &Path,
) -> Result<(), ReportError> {
    let mut docx = Docx::new()
        .add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(Run::new().add_text("Dental Scan Report").bold().size(36)),
        )
        .add_paragraph(heading("Patient Details"))
        .add_paragraph(labeled(
            "Name",
            &format!("{} {}", context.first_name, context.last_name),
        ))
        .add_paragraph(labeled("Email", &context.email))
        .add_paragraph(labeled("Gender", &context.gender))
        .add_paragraph(labeled("Date of Birth", &context.date_of_birth))
        .add_paragraph(labeled("Age", &context.age))
        .add_paragraph(labeled("Contact Number", &context.contact_number))
        .add_paragraph(labeled("Address", &context.address))
        .add_paragraph(labeled("Symptoms", &context.symptoms))
        .add_paragraph(labeled("Previous Treatments", &context.previous_treatments))
        .add_paragraph(labeled("Brushing Frequency", &context.brushing_frequency))
        .add_paragraph(labeled("Tobacco Use", &context.tobacco_use));

    let sections = [
        ("Dental Condition Name", &context.condition),
        ("Information About the Condition", &context.info),
        ("Severity Percentage", &context.severity),
        ("Home Cure or Remedy", &context.remedy),
        ("Dietary Options or Food Solutions", &context.diet),
        ("Call for Action", &context.action),
    ];
    for (title, text) in sections {
        docx = docx.add_paragraph(heading(title)).add_paragraph(body(text));
    }

    docx = docx.add_paragraph(heading("Scan Images"));
    for img in embedded_images(images) {
        let height = if img.width > 0 {
            (IMAGE_WIDTH_EMU as u64 * img.height as u64 / img.width as u64) as u32
        } else {
            IMAGE_WIDTH_EMU
        };
        let pic = Pic::new(&img.png[..]).size(IMAGE_WIDTH_EMU, height);
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_image(pic)));
    }

    let file = std::fs::File::create(path)?;
    docx.build()
        .pack(file)
        .map_err(|e| ReportError::Render(e.to_string()))?;
    Ok(())
}

/// Converts a rendered document into a PDF placed next to it.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    /// Produces `{input stem}.pdf` inside `output_dir` and returns its path.
    async fn convert_to_pdf(&self, input: &Path, output_dir: &Path) -> anyhow::Result<PathBuf>;
}

/// PDF conversion via a headless LibreOffice subprocess.
pub struct SofficeConverter {
    soffice_path: String,
}

impl SofficeConverter {
    pub fn new(soffice_path: impl Into<String>) -> Self {
        SofficeConverter {
            soffice_path: soffice_path.into(),
        }
    }
}

#[async_trait]
impl DocumentConverter for SofficeConverter {
    async fn convert_to_pdf(&self, input: &Path, output_dir: &Path) -> anyhow::Result<PathBuf> {
        let output = tokio::process::Command::new(&self.soffice_path)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(output_dir)
            .arg(input)
            .output()
            .await
            .with_context(|| format!("failed to spawn {}", self.soffice_path))?;

        if !output.status.success() {
            bail!(
                "{} exited with {}: {}",
                self.soffice_path,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stem = input
            .file_stem()
            .context("input path has no file stem")?
            .to_string_lossy();
        let pdf_path = output_dir.join(format!("{stem}.pdf"));
        if !pdf_path.exists() {
            bail!("conversion produced no output at {}", pdf_path.display());
        }
        Ok(pdf_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_image;
    use std::io::Cursor;

    fn png_image(dir: &std::path::Path) -> NormalizedImage {
        let img = image::ImageBuffer::from_pixel(10, 4, image::Rgb([1u8, 2, 3]));
        let mut out = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        normalize_image(&out, dir).unwrap()
    }

    fn context() -> ReportContext {
        ReportContext {
            first_name: "Amina".into(),
            last_name: "Rahman".into(),
            email: "amina@example.com".into(),
            gender: "female".into(),
            date_of_birth: "2000-06-15".into(),
            age: "24".into(),
            contact_number: "N/A".into(),
            address: "N/A".into(),
            symptoms: "Toothache".into(),
            previous_treatments: String::new(),
            brushing_frequency: "Twice daily".into(),
            tobacco_use: "No".into(),
            condition: "Dental Caries".into(),
            severity: "72%".into(),
            info: "Localized demineralization.".into(),
            remedy: "Saltwater rinses.".into(),
            diet: "Less sugar.".into(),
            action: "See a dentist.".into(),
        }
    }

    #[test]
    fn embeds_at_most_five_images() {
        let dir = tempfile::tempdir().unwrap();
        let images: Vec<NormalizedImage> = (0..7).map(|_| png_image(dir.path())).collect();
        assert_eq!(embedded_images(&images).len(), 5);
        assert_eq!(embedded_images(&images[..2]).len(), 2);
        assert!(embedded_images(&[]).is_empty());
    }

    #[test]
    fn renders_a_zip_packaged_docx() {
        let dir = tempfile::tempdir().unwrap();
        let images = vec![png_image(dir.path())];
        let path = dir.path().join("report.docx");

        render_report(&context(), &images, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // DOCX is a zip container; check the magic.
        assert_eq!(&bytes[..2], b"PK");
    }
}
