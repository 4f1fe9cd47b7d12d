pub mod frames;
pub mod gemini;
pub mod ocr;
pub mod pipeline;
pub mod sql;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("video {0} not found")]
    VideoNotFound(i32),
    #[error("GEMINI_API_KEY environment variable is not set")]
    MissingApiKey,
    #[error("database connection unavailable")]
    DatabaseUnavailable,
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("frame extraction failed: {0}")]
    FrameExtraction(String),
    #[error("OCR processing failed: {0}")]
    Ocr(String),
    #[error("language model request failed: {0}")]
    Gemini(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for AnalysisError {
    fn from(e: reqwest::Error) -> Self {
        AnalysisError::Gemini(e.to_string())
    }
}
