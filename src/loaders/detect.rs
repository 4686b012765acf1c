//! Maps a source reference (path or URL) to a document kind.

use std::path::Path;

use crate::models::DocumentType;
use crate::types::PipelineError;

/// Returns `true` when the source carries an `http(s)://` scheme prefix.
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Classifies a source string.
///
/// URLs classify as [`DocumentType::Url`]. Anything else is treated as a
/// filesystem path: a missing path fails with
/// [`PipelineError::SourceNotFound`], and an existing file classifies by its
/// case-insensitive extension. `Ok(None)` means the extension is outside the
/// supported set (or absent); the caller decides whether that is an error or
/// a silent skip. Directories are the caller's responsibility to expand.
pub fn detect_source(source: &str) -> Result<Option<DocumentType>, PipelineError> {
    if is_url(source) {
        return Ok(Some(DocumentType::Url));
    }

    let path = Path::new(source);
    if !path.exists() {
        return Err(PipelineError::SourceNotFound {
            origin: source.to_string(),
        });
    }

    Ok(path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(DocumentType::from_extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn urls_classify_by_scheme_prefix() {
        assert_eq!(
            detect_source("https://example.com/page").unwrap(),
            Some(DocumentType::Url)
        );
        assert_eq!(
            detect_source("http://example.com").unwrap(),
            Some(DocumentType::Url)
        );
    }

    #[test]
    fn missing_path_is_source_not_found() {
        let err = detect_source("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, PipelineError::SourceNotFound { .. }));
    }

    #[test]
    fn extension_matching_is_case_insensitive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("REPORT.PDF");
        std::fs::write(&path, b"stub").unwrap();
        assert_eq!(
            detect_source(path.to_str().unwrap()).unwrap(),
            Some(DocumentType::Pdf)
        );
    }

    #[test]
    fn unknown_or_missing_extension_yields_none() {
        let dir = tempdir().unwrap();
        let odd = dir.path().join("data.xyz");
        std::fs::write(&odd, b"stub").unwrap();
        assert_eq!(detect_source(odd.to_str().unwrap()).unwrap(), None);

        let bare = dir.path().join("noext");
        std::fs::write(&bare, b"stub").unwrap();
        assert_eq!(detect_source(bare.to_str().unwrap()).unwrap(), None);
    }
}
