use rocket::http::ContentType;

use crate::util::make_random_string;

const ENDINGS: [&'static str; 11] = [
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "mpg", "mpeg", "m4v", "3gp", "webm",
];

pub fn is_video_content_type(content_type: &ContentType) -> bool {
    content_type.top() == "video"
}

pub fn get_filename_ending<T: Into<String>>(filename: T) -> Option<String> {
    let filename = filename.into();
    let split = filename.split('.').collect::<Vec<&str>>();

    if split.len() > 1 {
        Some(split[split.len() - 1].to_lowercase())
    } else {
        None
    }
}

/// Random stored name keeping only a whitelisted extension of the original.
pub fn make_stored_filename(original: Option<&str>) -> String {
    let ending = original
        .and_then(get_filename_ending)
        .filter(|ending| ENDINGS.contains(&ending.as_str()))
        .unwrap_or_else(|| String::from("mp4"));
    format!("{}.{}", make_random_string(32), ending)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_ending_is_lowercased_last_segment() {
        assert_eq!(get_filename_ending("demo.walk.MOV").unwrap(), "mov");
        assert_eq!(get_filename_ending("clip.mp4").unwrap(), "mp4");
        assert!(get_filename_ending("no_extension").is_none());
    }

    #[test]
    fn stored_filenames_keep_whitelisted_endings_only() {
        assert!(make_stored_filename(Some("demo.webm")).ends_with(".webm"));
        assert!(make_stored_filename(Some("nefarious.sh")).ends_with(".mp4"));
        assert!(make_stored_filename(None).ends_with(".mp4"));
    }

    #[test]
    fn video_mime_types_are_recognized() {
        assert!(is_video_content_type(&ContentType::new("video", "mp4")));
        assert!(is_video_content_type(&ContentType::new("video", "webm")));
        assert!(!is_video_content_type(&ContentType::new("image", "png")));
        assert!(!is_video_content_type(&ContentType::new(
            "application",
            "octet-stream"
        )));
    }
}
