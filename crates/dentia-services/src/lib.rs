//! Dentia Services: outbound collaborators.
//!
//! Currently a single concern: the generative-vision oracle used for scan
//! diagnosis. The concrete Gemini client lives behind the [`DiagnosisOracle`]
//! trait so the pipeline receives it by injection and tests can script it.

mod gemini;
mod oracle;

pub use gemini::GeminiService;
pub use oracle::DiagnosisOracle;
