/*!
 * Mix sources: the comment data mixed into one episode's subtitle.
 *
 * A series of mix-source sets is produced already in episode order (a remote
 * API lists episodes in order; local comment files are ordered when the
 * series is built). The alignment engine pairs them positionally and never
 * reorders them.
 */

use serde::Serialize;
use std::path::Path;

use crate::alignment::infer_order;
use crate::media::{LocalFile, NamedItem};

/// The comment data for one episode
pub trait MixSourceSet {
    /// Opaque content handle
    type Source: ?Sized;

    /// Identifier of the set within its producer
    fn code(&self) -> &str;

    /// Position of the set in its series
    fn index(&self) -> usize;

    /// Tag appended to output names
    fn tag(&self) -> &str;

    /// The content to mix in
    fn sources(&self) -> &Self::Source;
}

/// A comment file found next to the videos
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalCommentSet {
    index: usize,
    file: LocalFile,
    tag: String,
}

impl LocalCommentSet {
    pub fn new(index: usize, file: LocalFile, tag: impl Into<String>) -> Self {
        Self {
            index,
            file,
            tag: tag.into(),
        }
    }

    pub fn file(&self) -> &LocalFile {
        &self.file
    }

    /// Build the ordered series from unordered comment files.
    ///
    /// Files whose episode cannot be placed are dropped.
    pub fn series(files: &[LocalFile], tag: &str) -> Vec<Self> {
        infer_order(files)
            .into_iter()
            .enumerate()
            .map(|(index, file)| Self::new(index, file, tag))
            .collect()
    }
}

impl MixSourceSet for LocalCommentSet {
    type Source = Path;

    fn code(&self) -> &str {
        self.file.name()
    }

    fn index(&self) -> usize {
        self.index
    }

    fn tag(&self) -> &str {
        &self.tag
    }

    fn sources(&self) -> &Path {
        &self.file.path
    }
}

impl NamedItem for LocalCommentSet {
    fn name(&self) -> &str {
        self.file.name()
    }

    fn basename(&self) -> &str {
        self.file.basename()
    }
}
