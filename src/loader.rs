use crate::caption::CaptionRecord;
use crate::error::Result;
use crate::parser::parse_srt;

use std::path::Path;

use tracing::info;

/// Reads a JSON caption array: `[{id, text, start, end, section?}, ...]`.
/// Records are kept in file order.
pub fn load_json(data: &str) -> Result<Vec<CaptionRecord>> {
    let records: Vec<CaptionRecord> = serde_json::from_str(data)?;
    info!(count = records.len(), "loaded JSON captions");
    Ok(records)
}

pub fn load_srt(data: &str) -> Result<Vec<CaptionRecord>> {
    let records = parse_srt(data)?;
    info!(count = records.len(), "loaded SRT captions");
    Ok(records)
}

/// Loads captions from a file, as SRT when the extension says so and as
/// JSON otherwise.
pub fn load_path(path: &Path) -> Result<Vec<CaptionRecord>> {
    let data = std::fs::read_to_string(path)?;
    if is_srt(path) {
        load_srt(&data)
    } else {
        load_json(&data)
    }
}

pub fn is_srt(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("srt"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caption::CaptionId;
    use crate::error::CaplineError;

    #[test]
    fn json_keeps_file_order_and_sections() {
        let data = r#"[
            {"id": 0, "text": "夢を", "start": 12.4, "end": 14.0, "section": "verse1"},
            {"id": 1001, "text": "食べる", "start": 14.0, "end": 15.5, "section": "verse1"},
            {"id": "bridge-a", "text": "ばく", "start": 15.5, "end": 17.0}
        ]"#;
        let subs = load_json(data).unwrap();

        assert_eq!(subs.len(), 3);
        assert_eq!(subs[1].id, CaptionId::Int(1001));
        assert_eq!(subs[1].section.as_deref(), Some("verse1"));
        assert_eq!(subs[2].id, CaptionId::from("bridge-a"));
        assert_eq!(subs[2].section, None);
    }

    #[test]
    fn json_missing_times_is_rejected() {
        let err = load_json(r#"[{"id": 1, "text": "x", "start": 1.0}]"#).unwrap_err();
        assert!(matches!(err, CaplineError::Json(_)));
    }

    #[test]
    fn srt_by_extension() {
        assert!(is_srt(Path::new("lyrics.srt")));
        assert!(is_srt(Path::new("LYRICS.SRT")));
        assert!(!is_srt(Path::new("final_subtitles.json")));
        assert!(!is_srt(Path::new("srt")));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_path(Path::new("/nonexistent/captions.json")).unwrap_err();
        assert!(matches!(err, CaplineError::Io(_)));
    }
}
