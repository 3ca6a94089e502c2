/*!
 * Named media items consumed by the alignment engine.
 *
 * Anything the engine orders or pairs only needs a full name and a basename
 * (the name without its trailing extension). Items extracted from a
 * container may additionally expose language metadata through the
 * [`LanguageMetadata`] capability; items without it are ranked on their
 * file name alone.
 */

pub mod local;
pub mod probe;

pub use local::{LocalFile, Subtitle, Video};
pub use probe::{FfprobeTrackProbe, SubtitleTrack, TrackProbe};

/// Language tags attached to an item by the container it was extracted from
pub trait LanguageMetadata {
    /// Value of the `language` tag, if present
    fn language(&self) -> Option<&str>;

    /// Value of the `title` tag, if present
    fn title(&self) -> Option<&str>;
}

/// Read-only view over a video, subtitle or any other named record
pub trait NamedItem {
    /// Full file name or identifier
    fn name(&self) -> &str;

    /// Name with the trailing extension removed
    fn basename(&self) -> &str;

    /// Container metadata, only present for extracted tracks
    fn language_metadata(&self) -> Option<&dyn LanguageMetadata> {
        None
    }
}

impl<T: NamedItem + ?Sized> NamedItem for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn basename(&self) -> &str {
        (**self).basename()
    }

    fn language_metadata(&self) -> Option<&dyn LanguageMetadata> {
        (**self).language_metadata()
    }
}

/// Split a file name into `(basename, extension)`.
///
/// The extension keeps its leading dot. A leading dot alone does not start an
/// extension, so `.hidden` has an empty extension.
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) if name[..pos].chars().any(|c| c != '.') => (&name[..pos], &name[pos..]),
        _ => (name, ""),
    }
}
