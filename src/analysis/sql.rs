use diesel::prelude::*;
use diesel::PgConnection;

use super::AnalysisError;
use crate::models::{Analysis, AnalysisNoId, STATUS_COMPLETED, STATUS_FAILED};
use crate::schema::videos;

fn connection() -> Result<PgConnection, AnalysisError> {
    crate::create_connection().ok_or(AnalysisError::DatabaseUnavailable)
}

pub fn insert_analysis(analysis: &AnalysisNoId) -> Result<Analysis, AnalysisError> {
    let connection = connection()?;
    Ok(diesel::insert_into(crate::schema::analyses::table)
        .values(analysis)
        .get_result::<Analysis>(&connection)?)
}

pub fn mark_video_completed(
    video_id: i32,
    prd_document: &str,
    business_plan: &str,
) -> Result<(), AnalysisError> {
    let connection = connection()?;
    diesel::update(videos::table.filter(videos::id.eq(video_id)))
        .set((
            videos::status.eq(STATUS_COMPLETED),
            videos::prd_document.eq(prd_document),
            videos::business_plan.eq(business_plan),
        ))
        .execute(&connection)?;
    Ok(())
}

/// Unconditional status update keyed by id, usable whatever state the row
/// was left in.
pub fn mark_video_failed(video_id: i32) -> Result<(), AnalysisError> {
    let connection = connection()?;
    diesel::update(videos::table.filter(videos::id.eq(video_id)))
        .set(videos::status.eq(STATUS_FAILED))
        .execute(&connection)?;
    Ok(())
}
