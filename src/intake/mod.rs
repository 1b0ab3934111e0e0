pub mod parser;
pub mod types;

pub use parser::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("No JSON object found in extractor response")]
    NoJson,

    #[error("Extractor JSON parsing failed: {0}")]
    JsonParsing(String),

    #[error("Extractor marked the document as not a lab report")]
    NotLabReport,
}
