use std::path::Path;

use super::gemini::GeminiClient;
use super::{frames, ocr, sql, AnalysisError};
use crate::config;
use crate::models::AnalysisNoId;

/// Runs the full analysis for one video: frames, OCR, feature extraction,
/// document generation, persistence, cleanup. On any failure the video is
/// marked failed and the error is returned to the caller.
pub async fn analyze_video(video_id: i32) -> Result<(), AnalysisError> {
    match run(video_id).await {
        Ok(()) => {
            info!("Analysis of video {} completed", video_id);
            Ok(())
        }
        Err(e) => {
            error!("Error analyzing video {} ({})", video_id, e);
            if let Err(update_error) = sql::mark_video_failed(video_id) {
                error!(
                    "Failed to mark video {} as failed ({})",
                    video_id, update_error
                );
            }
            Err(e)
        }
    }
}

async fn run(video_id: i32) -> Result<(), AnalysisError> {
    let video =
        crate::video::sql::get_video_by_id(video_id).ok_or(AnalysisError::VideoNotFound(video_id))?;

    let upload_dir = config::upload_dir();
    let video_path = Path::new(&upload_dir).join(&video.filename);
    let frames_dir = Path::new(&upload_dir).join("frames");

    let frame_paths = frames::extract_frames(&video_path, &frames_dir).await?;
    let ocr_text = ocr::recognize_frames(&frame_paths)?;

    let client = GeminiClient::from_env()?;
    let features = client.analyze_features(&ocr_text).await?;

    let (prd_document, business_plan) = tokio::try_join!(
        client.generate_prd(&ocr_text, &features),
        client.generate_business_plan(&ocr_text, &features),
    )?;

    sql::insert_analysis(&AnalysisNoId {
        video_id,
        frames: frame_paths
            .iter()
            .map(|path| path.display().to_string())
            .collect(),
        ocr_text: ocr_text.clone(),
        features: features.clone(),
        // No dedicated user-flow extraction yet; the feature list stands in.
        user_flow: features.clone(),
    })?;

    sql::mark_video_completed(video_id, &prd_document, &business_plan)?;

    // Frames are only removed after a fully successful run; an earlier
    // failure leaves them on disk.
    frames::cleanup_frames(&frame_paths, &frames_dir).await?;

    Ok(())
}
