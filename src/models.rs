extern crate diesel;

use crate::schema::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

pub const STATUS_PROCESSING: &str = "processing";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_FAILED: &str = "failed";

#[derive(Identifiable, Queryable, Serialize, Deserialize, Debug)]
#[table_name = "users"]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub is_verified: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, Debug, Insertable)]
#[table_name = "users"]
pub struct UserNoId {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Identifiable, Queryable, Associations, Debug, Serialize, Deserialize)]
#[belongs_to(User, foreign_key = "user_id")]
#[table_name = "verifications"]
pub struct Verification {
    pub id: i32,
    pub user_id: i32,
    pub code: String,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[table_name = "verifications"]
pub struct VerificationNoId {
    pub user_id: i32,
    pub code: String,
    pub expires_at: NaiveDateTime,
}

#[derive(Identifiable, Queryable, Associations, Debug, Serialize, Deserialize)]
#[belongs_to(User, foreign_key = "user_id")]
#[table_name = "videos"]
pub struct Video {
    pub id: i32,
    pub user_id: i32,
    pub filename: String,
    pub status: String,
    pub prd_document: Option<String>,
    pub business_plan: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[table_name = "videos"]
pub struct VideoNoId {
    pub user_id: i32,
    pub filename: String,
    pub status: String,
}

#[derive(Identifiable, Queryable, Associations, Debug, Serialize, Deserialize)]
#[belongs_to(Video, foreign_key = "video_id")]
#[table_name = "analyses"]
pub struct Analysis {
    pub id: i32,
    pub video_id: i32,
    pub frames: Vec<String>,
    pub ocr_text: Vec<String>,
    pub features: Vec<String>,
    pub user_flow: Vec<String>,
}

#[derive(Insertable, Debug)]
#[table_name = "analyses"]
pub struct AnalysisNoId {
    pub video_id: i32,
    pub frames: Vec<String>,
    pub ocr_text: Vec<String>,
    pub features: Vec<String>,
    pub user_flow: Vec<String>,
}
