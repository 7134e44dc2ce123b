mod encoding;

pub use encoding::Encoding;

use crate::types::LoadError;
use std::path::{Path, PathBuf};

/// How a single physical line was terminated in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Crlf,
    Lf,
    Cr,
    /// The last line of a file with no trailing terminator.
    None,
}

/// The dominant line-ending convention of a whole file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEndingStyle {
    Crlf,
    Lf,
    Cr,
    Mixed,
}

/// One physical line, decoded and stripped of its terminator. Classification
/// (C2) is layered on top of this in [`crate::classify`].
#[derive(Debug, Clone)]
pub struct RawLine {
    pub index: usize,
    pub text: String,
    pub original_ending: LineEnding,
}

/// An immutable, fully loaded script. Created once per file and discarded
/// with its [`crate::rules::context::AnalysisContext`] at the end of analysis.
#[derive(Debug, Clone)]
pub struct Script {
    pub path: PathBuf,
    pub raw_bytes: Vec<u8>,
    pub encoding: Encoding,
    pub line_ending_style: LineEndingStyle,
    pub lines: Vec<RawLine>,
}

/// Default ceiling on input size (component C1 / spec.md §5 resource policy).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

pub fn load(path: &Path, max_input_bytes: u64) -> Result<Script, LoadError> {
    let raw_bytes =
        std::fs::read(path).map_err(|_| LoadError::FileNotFound(path.to_path_buf()))?;

    if raw_bytes.len() as u64 > max_input_bytes {
        return Err(LoadError::FileTooLarge {
            path: path.to_path_buf(),
            limit: max_input_bytes,
            actual: raw_bytes.len() as u64,
        });
    }

    let (encoding, text) =
        encoding::decode(&raw_bytes).ok_or_else(|| LoadError::DecodeFailure(path.to_path_buf()))?;

    let (line_ending_style, lines) = split_lines(&text);

    Ok(Script {
        path: path.to_path_buf(),
        raw_bytes,
        encoding,
        line_ending_style,
        lines,
    })
}

/// Splits `text` on any of CRLF/LF/CR while recording each line's original
/// terminator, and classifies the dominant style (spec.md §4.1).
fn split_lines(text: &str) -> (LineEndingStyle, Vec<RawLine>) {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut crlf = 0usize;
    let mut lf = 0usize;
    let mut cr = 0usize;
    let mut i = 0usize;
    let mut index = 1usize;

    while i < bytes.len() {
        match bytes[i] {
            b'\r' if i + 1 < bytes.len() && bytes[i + 1] == b'\n' => {
                lines.push(RawLine {
                    index,
                    text: text[start..i].to_string(),
                    original_ending: LineEnding::Crlf,
                });
                crlf += 1;
                index += 1;
                i += 2;
                start = i;
            }
            b'\n' => {
                lines.push(RawLine {
                    index,
                    text: text[start..i].to_string(),
                    original_ending: LineEnding::Lf,
                });
                lf += 1;
                index += 1;
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(RawLine {
                    index,
                    text: text[start..i].to_string(),
                    original_ending: LineEnding::Cr,
                });
                cr += 1;
                index += 1;
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }

    if start < bytes.len() {
        lines.push(RawLine {
            index,
            text: text[start..].to_string(),
            original_ending: LineEnding::None,
        });
    }

    let style = dominant_style(crlf, lf, cr);
    (style, lines)
}

fn dominant_style(crlf: usize, lf: usize, cr: usize) -> LineEndingStyle {
    let total = crlf + lf + cr;
    if total == 0 {
        return LineEndingStyle::Crlf;
    }

    let counts = [
        (LineEndingStyle::Crlf, crlf),
        (LineEndingStyle::Lf, lf),
        (LineEndingStyle::Cr, cr),
    ];
    let (dominant_kind, dominant_count) = counts
        .iter()
        .max_by_key(|(_, c)| *c)
        .copied()
        .unwrap_or((LineEndingStyle::Crlf, 0));

    let others: usize = total - dominant_count;
    if others > 0 && (dominant_count as f64) / (total as f64) < 0.95 {
        LineEndingStyle::Mixed
    } else {
        dominant_kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_lines() {
        let (style, lines) = split_lines("");
        assert!(lines.is_empty());
        assert_eq!(style, LineEndingStyle::Crlf);
    }

    #[test]
    fn single_lf_produces_one_empty_line() {
        let (style, lines) = split_lines("\n");
        assert_eq!(style, LineEndingStyle::Lf);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "");
    }

    #[test]
    fn crlf_dominant_style() {
        let (style, lines) = split_lines("echo off\r\necho hi\r\n");
        assert_eq!(style, LineEndingStyle::Crlf);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "echo off");
    }

    #[test]
    fn mixed_style_detected() {
        let (style, _lines) = split_lines("a\r\nb\nc\rd\r\ne\r\nf\r\ng\r\n");
        assert_eq!(style, LineEndingStyle::Mixed);
    }

    #[test]
    fn single_stray_cr_under_threshold_is_not_mixed() {
        // 20 CRLF lines plus one lone LF: LF share is below 5%, so the
        // dominant style still wins rather than being reported as Mixed.
        let mut text = String::new();
        for _ in 0..20 {
            text.push_str("echo hi\r\n");
        }
        text.push_str("echo stray\n");
        let (style, _) = split_lines(&text);
        assert_eq!(style, LineEndingStyle::Crlf);
    }

    #[test]
    fn last_line_without_terminator_is_kept() {
        let (_, lines) = split_lines("echo off\r\necho hi");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].original_ending, LineEnding::None);
        assert_eq!(lines[1].text, "echo hi");
    }

    #[test]
    fn dense_unique_indices() {
        let (_, lines) = split_lines("a\r\nb\r\nc\r\n");
        let indices: Vec<usize> = lines.iter().map(|l| l.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn load_missing_file_is_file_not_found() {
        let err = load(Path::new("/nonexistent/path/nope.bat"), DEFAULT_MAX_INPUT_BYTES).unwrap_err();
        assert_eq!(err, LoadError::FileNotFound(PathBuf::from("/nonexistent/path/nope.bat")));
    }

    #[test]
    fn load_respects_size_ceiling() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bat");
        std::fs::write(&path, vec![b'a'; 100]).unwrap();
        let err = load(&path, 99).unwrap_err();
        assert!(matches!(err, LoadError::FileTooLarge { .. }));
    }

    #[test]
    fn load_empty_file_has_no_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.bat");
        std::fs::write(&path, b"").unwrap();
        let script = load(&path, DEFAULT_MAX_INPUT_BYTES).unwrap();
        assert!(script.lines.is_empty());
    }
}
