//! Output object keys for clips.

use std::fmt;

use super::AnnotationRow;
use crate::constants::WAV_EXTENSION;

/// Object key of an uploaded clip.
///
/// Format: `<prefix>/confidence_<confidence>/<category>/<type>/<label_id>.wav`.
/// Labels are used verbatim, so two rows with the same labels map to the
/// same key and the later upload replaces the earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClipKey(String);

impl ClipKey {
    /// Build a key from its parts. Slashes around `prefix` are dropped.
    pub fn new(
        prefix: &str,
        confidence: &str,
        sound_category: &str,
        sound_type: &str,
        label_id: &str,
    ) -> Self {
        let prefix = prefix.trim_matches('/');
        Self(format!(
            "{prefix}/confidence_{confidence}/{sound_category}/{sound_type}/{label_id}.{WAV_EXTENSION}"
        ))
    }

    /// Build the key for an annotation row.
    pub fn for_row(prefix: &str, row: &AnnotationRow) -> Self {
        Self::new(
            prefix,
            &row.confidence,
            &row.sound_category,
            &row.sound_type,
            &row.label_id,
        )
    }

    /// The key as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ClipKey> for String {
    fn from(key: ClipKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label_id: &str) -> AnnotationRow {
        AnnotationRow {
            line: 2,
            begin: 1.0,
            end: 2.0,
            sound_category: "rumble".to_string(),
            sound_type: "low".to_string(),
            label_id: label_id.to_string(),
            confidence: "0.9".to_string(),
        }
    }

    #[test]
    fn test_key_format() {
        let key = ClipKey::new("soundfiles_trimmed", "0.9", "rumble", "low", "42");
        assert_eq!(
            key.as_str(),
            "soundfiles_trimmed/confidence_0.9/rumble/low/42.wav"
        );
    }

    #[test]
    fn test_prefix_slashes_trimmed() {
        let key = ClipKey::new("/clips/", "1", "a", "b", "c");
        assert_eq!(key.to_string(), "clips/confidence_1/a/b/c.wav");
    }

    #[test]
    fn test_same_labels_same_key_regardless_of_row() {
        let mut later = row("42");
        later.line = 99;
        later.begin = 50.0;
        later.end = 51.0;
        assert_eq!(
            ClipKey::for_row("soundfiles_trimmed", &row("42")),
            ClipKey::for_row("soundfiles_trimmed", &later)
        );
        assert_ne!(
            ClipKey::for_row("soundfiles_trimmed", &row("42")),
            ClipKey::for_row("soundfiles_trimmed", &row("43"))
        );
    }
}
