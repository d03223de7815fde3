// src/input/loader.rs
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use roxmltree::{Document, ParsingOptions};
use walkdir::WalkDir;

use crate::config::ExtractorConfig;
use crate::utils::error::ExtractError;

/// Reads a document's bytes as text, honouring the encoding named in the XML
/// declaration. Without a recognised label, non-UTF-8 input is decoded lossily.
pub fn read_document_text(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(encoding) = declared_encoding(&bytes) {
        let (text, used, had_errors) = encoding.decode(&bytes);
        if had_errors {
            tracing::warn!("{} has bytes invalid in {}", path.display(), used.name());
        }
        return Ok(text.into_owned());
    }

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            tracing::warn!("{} is not valid UTF-8, decoding lossily", path.display());
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}

/// Encoding label from `<?xml ... encoding="..."?>`, if present and known.
fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let head = &head[..head.len().min(256)];
    if !head.starts_with(b"<?xml") {
        return None;
    }
    let decl = &head[..head.windows(2).position(|w| w == b"?>")?];
    let at = decl.windows(8).position(|w| w == b"encoding")?;

    let rest = skip_spaces(skip_spaces(&decl[at + 8..]).strip_prefix(b"=")?);
    let (&quote, value) = rest.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let label = &value[..value.iter().position(|&b| b == quote)?];

    let encoding = Encoding::for_label(label);
    if encoding.is_none() {
        tracing::warn!("Unknown encoding label '{}'", String::from_utf8_lossy(label));
    }
    encoding
}

fn skip_spaces(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Parses document text into a tree. DOCTYPE declarations are accepted.
pub fn parse_document(text: &str) -> Result<Document<'_>, ExtractError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(text, options)?)
}

/// Files directly inside `dir` whose extension is in `extensions`, sorted by name.
/// Excluded divisions are dropped.
pub fn list_input_files(
    dir: &Path,
    extensions: &[String],
    config: &ExtractorConfig,
) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();

        if !entry.file_type().is_file() || !ExtractorConfig::has_extension(path, extensions) {
            continue;
        }
        if config.is_excluded(path) {
            tracing::debug!("Skipping excluded division file {}", path.display());
            continue;
        }
        files.push(path.to_path_buf());
    }

    tracing::debug!("Found {} matching files in {}", files.len(), dir.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_lists_matching_files_non_recursively() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("03 30 00.SEC"), "<SEC/>").unwrap();
        fs::write(dir.path().join("01 33 00.sec"), "<SEC/>").unwrap();
        fs::write(dir.path().join("MASTER.REF"), "<MASTER/>").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("archive")).unwrap();
        fs::write(dir.path().join("archive").join("05 12 00.SEC"), "<SEC/>").unwrap();

        let config = ExtractorConfig::default();
        let files = list_input_files(dir.path(), &config.section_extensions, &config).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["01 33 00.sec", "03 30 00.SEC"]);

        let config = ExtractorConfig {
            exclude_divisions: vec!["01".to_string()],
            ..ExtractorConfig::default()
        };
        let files = list_input_files(dir.path(), &config.section_extensions, &config).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_parse_accepts_doctype() {
        let text = "<?xml version=\"1.0\"?>\n<!DOCTYPE SEC SYSTEM \"SEC.DTD\">\n<SEC><SCN>SECTION 03 30 00</SCN></SEC>";
        let doc = parse_document(text).unwrap();
        assert_eq!(doc.root_element().tag_name().name(), "SEC");
    }

    #[test]
    fn test_parse_error_on_malformed_xml() {
        assert!(matches!(parse_document("<SEC><SCN></SEC>"), Err(ExtractError::XmlParse(_))));
    }

    #[test]
    fn test_lossy_decoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.SEC");
        fs::write(&path, b"<SEC><STL>B\xe9ton</STL></SEC>").unwrap();
        let text = read_document_text(&path).unwrap();
        assert!(text.contains("B\u{fffd}ton"));
    }

    #[test]
    fn test_declared_latin1_is_decoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.SEC");
        fs::write(
            &path,
            b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<SEC><STL>B\xe9ton</STL></SEC>",
        )
        .unwrap();
        let text = read_document_text(&path).unwrap();
        let doc = parse_document(&text).unwrap();
        let stl = doc.descendants().find(|n| n.has_tag_name("STL")).unwrap();
        assert_eq!(stl.text(), Some("Béton"));
    }

    #[test]
    fn test_declared_encoding_labels() {
        assert_eq!(
            declared_encoding(b"<?xml version='1.0' encoding='windows-1252'?><SEC/>"),
            Some(encoding_rs::WINDOWS_1252)
        );
        assert_eq!(
            declared_encoding(b"\xEF\xBB\xBF<?xml version=\"1.0\" encoding = \"UTF-8\"?><SEC/>"),
            Some(encoding_rs::UTF_8)
        );
        assert_eq!(declared_encoding(b"<?xml version=\"1.0\"?><SEC encoding=\"x\"/>"), None);
        assert_eq!(declared_encoding(b"<?xml version=\"1.0\" encoding=\"no-such\"?><SEC/>"), None);
        assert_eq!(declared_encoding(b"<SEC/>"), None);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = read_document_text(Path::new("does/not/exist.SEC")).unwrap_err();
        assert!(matches!(err, ExtractError::Read { .. }));
    }
}
