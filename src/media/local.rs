use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use super::probe::SubtitleTrack;
use super::{split_name, LanguageMetadata, NamedItem};

// @module: Local video and subtitle files

// @struct: File on disk seen through its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalFile {
    // @field: Path as discovered
    pub path: PathBuf,

    // @field: File name with extension
    name: String,

    // @field: File name without extension
    basename: String,

    // @field: Extension including the dot, possibly empty
    extension: String,
}

impl LocalFile {
    // @creates: Local file view, no filesystem access
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let (basename, extension) = split_name(&name);
        let basename = basename.to_string();
        let extension = extension.to_string();

        Self {
            path,
            name,
            basename,
            extension,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn basename(&self) -> &str {
        &self.basename
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    // @returns: Parent directory, `.` for bare names
    pub fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl NamedItem for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn basename(&self) -> &str {
        &self.basename
    }
}

/// A single video file of the series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Video {
    pub file: LocalFile,
}

impl Video {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            file: LocalFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file.path
    }
}

impl NamedItem for Video {
    fn name(&self) -> &str {
        self.file.name()
    }

    fn basename(&self) -> &str {
        self.file.basename()
    }
}

impl fmt::Display for Video {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.file.name())
    }
}

/// A subtitle candidate: either a standalone file or a track inside a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Subtitle {
    /// Subtitle file next to the videos
    External { file: LocalFile },

    /// Subtitle stream embedded in a video container.
    ///
    /// The track is named after the video that carries it.
    Embedded { file: LocalFile, track: SubtitleTrack },
}

impl Subtitle {
    pub fn external<P: AsRef<Path>>(path: P) -> Self {
        Self::External {
            file: LocalFile::new(path),
        }
    }

    pub fn embedded<P: AsRef<Path>>(video_path: P, track: SubtitleTrack) -> Self {
        Self::Embedded {
            file: LocalFile::new(video_path),
            track,
        }
    }

    pub fn file(&self) -> &LocalFile {
        match self {
            Self::External { file } | Self::Embedded { file, .. } => file,
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded { .. })
    }
}

impl NamedItem for Subtitle {
    fn name(&self) -> &str {
        self.file().name()
    }

    fn basename(&self) -> &str {
        self.file().basename()
    }

    fn language_metadata(&self) -> Option<&dyn LanguageMetadata> {
        match self {
            Self::External { .. } => None,
            Self::Embedded { track, .. } => Some(track),
        }
    }
}

impl fmt::Display for Subtitle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::External { file } => write!(f, "{}", file.name()),
            Self::Embedded { file, track } => {
                write!(f, "{} [track {}", file.name(), track.index)?;
                if let Some(language) = &track.language {
                    write!(f, ", {}", language)?;
                }
                if let Some(title) = &track.title {
                    write!(f, ", {}", title)?;
                }
                write!(f, "]")
            }
        }
    }
}
