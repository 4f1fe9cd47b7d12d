use std::path::Path;

use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::response::content::RawJson;
use rocket::response::status::Custom;
use serde_json::json;

use crate::analysis::{pipeline, AnalysisError};
use crate::auth::util::AuthUser;
use crate::config;
use crate::error::ApiError;
use crate::models::{VideoNoId, STATUS_PROCESSING};
use crate::video::model::VideoWithAnalysis;
use crate::video::{sql, util};

type ApiResult = Result<Custom<RawJson<String>>, ApiError>;

#[derive(FromForm)]
pub struct UploadForm<'f> {
    pub video: Option<TempFile<'f>>,
}

#[post("/upload", data = "<form>")]
pub async fn upload_video(user: AuthUser, mut form: Form<UploadForm<'_>>) -> ApiResult {
    let file = match form.video.as_mut() {
        Some(file) => file,
        None => return Err(ApiError::Validation("No video file provided")),
    };

    match file.content_type() {
        Some(content_type) if util::is_video_content_type(content_type) => {}
        _ => return Err(ApiError::Validation("Only video files are allowed")),
    }

    let upload_dir = config::upload_dir();
    if let Err(e) = rocket::tokio::fs::create_dir_all(&upload_dir).await {
        warn!("Failed to create upload directory {} (error {})", upload_dir, e);
        return Err(ApiError::Internal);
    }

    let stored_name = util::make_stored_filename(
        file.raw_name()
            .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str()),
    );
    let destination = Path::new(&upload_dir).join(&stored_name);
    if let Err(e) = file.move_copy_to(&destination).await {
        warn!(
            "Failed to store upload at {} (error {})",
            destination.display(),
            e
        );
        return Err(ApiError::Internal);
    }

    let video = sql::insert_new_video(&VideoNoId {
        user_id: user.id,
        filename: stored_name,
        status: STATUS_PROCESSING.to_string(),
    })
    .ok_or(ApiError::Internal)?;

    // TODO : Hook crate::analysis::pipeline::analyze_video up to a background
    // job runner so uploads start processing without a manual trigger.

    info!("User {} uploaded video {}", user.id, video.id);
    Ok(make_json_response!(
        201,
        "Video uploaded successfully",
        json!({ "videoId": video.id })
    ))
}

#[post("/<id>/analyze")]
pub async fn analyze_video(user: AuthUser, id: i32) -> ApiResult {
    sql::get_video_for_user(id, user.id).ok_or(ApiError::NotFound("Video not found"))?;

    match pipeline::analyze_video(id).await {
        Ok(()) => Ok(make_json_response!(200, "Analysis completed")),
        Err(AnalysisError::VideoNotFound(_)) => Err(ApiError::NotFound("Video not found")),
        Err(e) => {
            error!("Analysis of video {} failed ({})", id, e);
            Err(ApiError::Internal)
        }
    }
}

#[get("/")]
pub async fn list_videos(user: AuthUser) -> ApiResult {
    let videos = sql::get_videos_for_user(user.id).ok_or(ApiError::Internal)?;
    Ok(make_json_response!(200, "OK", json!({ "videos": videos })))
}

#[get("/<id>")]
pub async fn get_video(user: AuthUser, id: i32) -> ApiResult {
    let video = sql::get_video_for_user(id, user.id).ok_or(ApiError::NotFound("Video not found"))?;
    let analysis = sql::get_analysis_for_video(video.id);
    Ok(make_json_response!(
        200,
        "OK",
        json!({ "video": VideoWithAnalysis { video, analysis } })
    ))
}

#[get("/<id>/prd")]
pub async fn get_prd(user: AuthUser, id: i32) -> ApiResult {
    let video = sql::get_video_for_user(id, user.id).ok_or(ApiError::NotFound("PRD not found"))?;
    Ok(make_json_response!(
        200,
        "OK",
        json!({ "prd": video.prd_document })
    ))
}

#[get("/<id>/business-plan")]
pub async fn get_business_plan(user: AuthUser, id: i32) -> ApiResult {
    let video =
        sql::get_video_for_user(id, user.id).ok_or(ApiError::NotFound("Business plan not found"))?;
    Ok(make_json_response!(
        200,
        "OK",
        json!({ "businessPlan": video.business_plan })
    ))
}
