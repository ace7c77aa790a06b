pub mod context;
pub mod document;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod sections;

pub use context::ReportContext;
pub use document::{DocumentConverter, SofficeConverter};
pub use error::ReportError;
pub use normalize::NormalizedImage;
pub use pipeline::{ScanAnalysis, ScanReportPipeline, ScanReportSummary, UploadedScan};
pub use sections::DiagnosisSections;
