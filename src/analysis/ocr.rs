use std::path::PathBuf;

use leptess::LepTess;

use super::AnalysisError;

const OCR_LANG: &str = "eng";

/// Recognizes text in each frame in order. A single Tesseract worker is
/// created per run and reused across all frames.
pub fn recognize_frames(frames: &[PathBuf]) -> Result<Vec<String>, AnalysisError> {
    let mut worker =
        LepTess::new(None, OCR_LANG).map_err(|e| AnalysisError::Ocr(e.to_string()))?;

    let mut results = Vec::with_capacity(frames.len());
    for frame in frames {
        worker
            .set_image(frame)
            .map_err(|e| AnalysisError::Ocr(e.to_string()))?;
        let text = worker
            .get_utf8_text()
            .map_err(|e| AnalysisError::Ocr(e.to_string()))?;
        results.push(text.trim().to_string());
    }

    Ok(results)
}
