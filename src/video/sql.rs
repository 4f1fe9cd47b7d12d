extern crate diesel;

use diesel::prelude::*;

use crate::create_connection;
use crate::models::{Analysis, Video, VideoNoId};
use crate::schema::{analyses, videos};

pub fn insert_new_video(video: &VideoNoId) -> Option<Video> {
    let connection = match create_connection() {
        Some(connection) => connection,
        None => {
            warn!("Failed to get connection to database");
            return None;
        }
    };
    match diesel::insert_into(videos::table)
        .values(video)
        .get_result::<Video>(&connection)
    {
        Ok(video) => Some(video),
        Err(e) => {
            warn!(
                "Failed to insert video {} for user {} (error {})",
                video.filename, video.user_id, e
            );
            None
        }
    }
}

pub fn get_video_by_id(id: i32) -> Option<Video> {
    let connection = match create_connection() {
        Some(connection) => connection,
        None => {
            warn!("Failed to get connection to database");
            return None;
        }
    };
    match videos::table
        .filter(videos::id.eq(id))
        .first::<Video>(&connection)
    {
        Ok(video) => Some(video),
        Err(e) => {
            if e != diesel::NotFound {
                warn!("Failed to get video {} (error {})", id, e);
            }
            None
        }
    }
}

pub fn get_video_for_user(id: i32, user_id: i32) -> Option<Video> {
    let connection = match create_connection() {
        Some(connection) => connection,
        None => {
            warn!("Failed to get connection to database");
            return None;
        }
    };
    match videos::table
        .filter(videos::id.eq(id))
        .filter(videos::user_id.eq(user_id))
        .first::<Video>(&connection)
    {
        Ok(video) => Some(video),
        Err(e) => {
            if e != diesel::NotFound {
                warn!("Failed to get video {} for user {} (error {})", id, user_id, e);
            }
            None
        }
    }
}

pub fn get_videos_for_user(user_id: i32) -> Option<Vec<Video>> {
    let connection = match create_connection() {
        Some(connection) => connection,
        None => {
            warn!("Failed to get connection to database");
            return None;
        }
    };
    match videos::table
        .filter(videos::user_id.eq(user_id))
        .order(videos::created_at.desc())
        .load::<Video>(&connection)
    {
        Ok(videos) => Some(videos),
        Err(e) => {
            warn!("Failed to load videos for user {} (error {})", user_id, e);
            None
        }
    }
}

pub fn get_analysis_for_video(video_id: i32) -> Option<Analysis> {
    let connection = match create_connection() {
        Some(connection) => connection,
        None => {
            warn!("Failed to get connection to database");
            return None;
        }
    };
    match analyses::table
        .filter(analyses::video_id.eq(video_id))
        .order(analyses::id.desc())
        .first::<Analysis>(&connection)
    {
        Ok(analysis) => Some(analysis),
        Err(e) => {
            if e != diesel::NotFound {
                warn!("Failed to get analysis for video {} (error {})", video_id, e);
            }
            None
        }
    }
}
