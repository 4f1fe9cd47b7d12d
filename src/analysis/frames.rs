use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::process::Command;

use super::AnalysisError;

/// Seconds into the video at which stills are taken.
pub const FRAME_OFFSETS: [u32; 5] = [0, 2, 4, 6, 8];

pub fn frame_path(output_dir: &Path, index: usize) -> PathBuf {
    output_dir.join(format!("frame-{}.jpg", index + 1))
}

/// Writes one still per offset into `output_dir`, creating it if absent.
pub async fn extract_frames(
    video_path: &Path,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, AnalysisError> {
    fs::create_dir_all(output_dir).await?;

    if let Err(e) = ffprobe::ffprobe(video_path) {
        return Err(AnalysisError::FrameExtraction(format!(
            "{} is not a readable video ({:?})",
            video_path.display(),
            e
        )));
    }

    let mut frames = Vec::with_capacity(FRAME_OFFSETS.len());
    for (index, offset) in FRAME_OFFSETS.iter().enumerate() {
        let output_path = frame_path(output_dir, index);
        let output = Command::new("ffmpeg")
            .arg("-y")
            .arg("-ss")
            .arg(offset.to_string())
            .arg("-i")
            .arg(video_path)
            .arg("-frames:v")
            .arg("1")
            .arg("-q:v")
            .arg("2")
            .arg(&output_path)
            .output()
            .await?;

        if !output.status.success() {
            return Err(AnalysisError::FrameExtraction(format!(
                "ffmpeg exited with {} at offset {}s",
                output.status, offset
            )));
        }
        frames.push(output_path);
    }

    Ok(frames)
}

/// Removes the extracted frame files, then the working directory itself.
pub async fn cleanup_frames(frames: &[PathBuf], output_dir: &Path) -> Result<(), AnalysisError> {
    for frame in frames {
        fs::remove_file(frame).await?;
    }
    fs::remove_dir(output_dir).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_offsets_two_seconds_apart() {
        assert_eq!(FRAME_OFFSETS.len(), 5);
        for pair in FRAME_OFFSETS.windows(2) {
            assert_eq!(pair[1] - pair[0], 2);
        }
    }

    #[test]
    fn frame_paths_are_one_indexed() {
        let dir = Path::new("uploads/frames");
        assert_eq!(frame_path(dir, 0), dir.join("frame-1.jpg"));
        assert_eq!(frame_path(dir, 4), dir.join("frame-5.jpg"));
    }

    #[rocket::async_test]
    async fn cleanup_removes_files_and_directory() {
        let root = tempfile::tempdir().unwrap();
        let frames_dir = root.path().join("frames");
        fs::create_dir_all(&frames_dir).await.unwrap();

        let mut frames = Vec::new();
        for index in 0..3 {
            let path = frame_path(&frames_dir, index);
            fs::write(&path, b"jpeg").await.unwrap();
            frames.push(path);
        }

        cleanup_frames(&frames, &frames_dir).await.unwrap();

        for frame in &frames {
            assert!(!frame.exists());
        }
        assert!(!frames_dir.exists());
    }

    #[rocket::async_test]
    async fn cleanup_fails_when_a_frame_is_already_gone() {
        let root = tempfile::tempdir().unwrap();
        let frames_dir = root.path().join("frames");
        fs::create_dir_all(&frames_dir).await.unwrap();

        let missing = vec![frame_path(&frames_dir, 0)];
        assert!(cleanup_frames(&missing, &frames_dir).await.is_err());
    }
}
