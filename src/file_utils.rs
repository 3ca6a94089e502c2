use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::app_config::DiscoveryConfig;
use crate::errors::DiscoveryError;

// @module: File and directory utilities

/// Enum representing different file types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Video file
    Video,
    /// Subtitle file
    Subtitle,
    /// Comment (danmaku) file
    Comment,
    /// Unknown file type
    Unknown,
}

// @struct: Files found directly inside one directory, grouped by type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredFiles {
    pub videos: Vec<PathBuf>,
    pub subtitles: Vec<PathBuf>,
    pub comments: Vec<PathBuf>,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @generates: Output path for a video's mixed subtitle
    // @params: video_file, tag, extension
    pub fn generate_output_path<P: AsRef<Path>>(video_file: P, tag: &str, extension: &str) -> PathBuf {
        let video_file = video_file.as_ref();
        let output_dir = match video_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // Get the file stem (filename without extension)
        let stem = video_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(tag);
        output_filename.push('.');
        output_filename.push_str(extension);

        output_dir.join(output_filename)
    }

    /// Classify a file by its extension, ignoring case
    pub fn detect_file_type<P: AsRef<Path>>(path: P, discovery: &DiscoveryConfig) -> FileType {
        let Some(ext) = path.as_ref().extension() else {
            return FileType::Unknown;
        };
        let ext = ext.to_string_lossy();
        let listed = |extensions: &[String]| extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext));

        if listed(&discovery.video_extensions) {
            FileType::Video
        } else if listed(&discovery.subtitle_extensions) {
            FileType::Subtitle
        } else if listed(&discovery.comment_extensions) {
            FileType::Comment
        } else {
            FileType::Unknown
        }
    }

    /// List the regular files directly inside `dir`, grouped by type.
    ///
    /// Each group is sorted by file name.
    pub fn discover<P: AsRef<Path>>(dir: P, discovery: &DiscoveryConfig) -> Result<DiscoveredFiles, DiscoveryError> {
        let dir = dir.as_ref();
        if !Self::dir_exists(dir) {
            return Err(DiscoveryError::ReadDir(format!("Not a directory: {:?}", dir)));
        }

        let mut found = DiscoveredFiles::default();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| DiscoveryError::ReadDir(format!("{:?}: {}", dir, e)))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.into_path();
            match Self::detect_file_type(&path, discovery) {
                FileType::Video => found.videos.push(path),
                FileType::Subtitle => found.subtitles.push(path),
                FileType::Comment => found.comments.push(path),
                FileType::Unknown => {}
            }
        }

        debug!(
            "{:?}: {} video(s), {} subtitle(s), {} comment file(s)",
            dir,
            found.videos.len(),
            found.subtitles.len(),
            found.comments.len()
        );

        Ok(found)
    }
}
