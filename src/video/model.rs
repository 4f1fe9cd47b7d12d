use serde::Serialize;

use crate::models::{Analysis, Video};

#[derive(Debug, Serialize)]
pub struct VideoWithAnalysis {
    #[serde(flatten)]
    pub video: Video,
    pub analysis: Option<Analysis>,
}
