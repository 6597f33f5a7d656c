use crate::caption::{CaptionId, CaptionRecord};
use crate::extension::ExtensionResult;
use crate::placement::PhrasePosition;

use std::collections::HashMap;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use serde::Serialize;

const SNIPPET_CHARS: usize = 15;

/// Writes extension results as a markdown table, one row per result.
pub fn write_extension_table<W: Write>(
    dst: W,
    records: &[CaptionRecord],
    results: &[ExtensionResult],
) -> Result<()> {
    let texts: HashMap<&CaptionId, &str> = records.iter().map(|r| (&r.id, r.text.as_str())).collect();
    let mut buf = BufWriter::new(dst);
    writeln!(buf, "ID | Text | Extra Frames | Seconds | Followers")?;
    writeln!(buf, "---|---|---|---|---")?;
    for res in results {
        let text = texts.get(&res.id).copied().unwrap_or_default();
        writeln!(
            buf,
            "{} | {} | {} | {:.2}s | {}",
            res.id,
            snippet(text),
            res.extra_frames,
            res.extra_duration_seconds,
            followers(res)
        )?;
    }
    buf.flush().context("Failed to write extension table.")?;
    Ok(())
}

pub fn write_position_table<W: Write>(dst: W, first_index: usize, positions: &[PhrasePosition]) -> Result<()> {
    let mut buf = BufWriter::new(dst);
    writeln!(buf, "Index | X | Y | Z")?;
    writeln!(buf, "---|---|---|---")?;
    for (i, pos) in positions.iter().enumerate() {
        writeln!(buf, "{} | {} | {} | {}", first_index + i, pos.x, pos.y, pos.z)?;
    }
    buf.flush().context("Failed to write position table.")?;
    Ok(())
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(dst: W, value: &T) -> Result<()> {
    let mut buf = BufWriter::new(dst);
    serde_json::to_writer_pretty(&mut buf, value).context("Failed to serialise JSON output.")?;
    writeln!(buf)?;
    buf.flush().context("Failed to write JSON output.")?;
    Ok(())
}

/// Contributing captions as `id(1.25s)`, space-separated.
fn followers(res: &ExtensionResult) -> String {
    res.followers
        .iter()
        .map(|f| format!("{}({:.2}s)", f.id, f.duration_seconds))
        .collect::<Vec<_>>()
        .join(" ")
}

/// First few characters of a caption, on one line.
fn snippet(text: &str) -> String {
    text.replace(['\r', '\n'], " ").chars().take(SNIPPET_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::{compute, ExtendOpts, Follower};
    use crate::filter::GroupFilter;
    use std::io::Cursor;

    macro_rules! test_snippet {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (input, expected) = $value;

                assert_eq!(snippet(input), expected);
            }
        )*
        }
    }

    test_snippet! {
        snippet_short: ("hello", "hello"),
        snippet_newlines: ("two\nlines", "two lines"),
        snippet_crlf: ("a\r\nb", "a  b"),
        snippet_truncated: ("abcdefghijklmnopqrstuvwxyz", "abcdefghijklmno"),
        snippet_multibyte: ("夢喰いバクの夜に夢を見ていた少年の話", "夢喰いバクの夜に夢を見ていた少"),
    }

    #[test]
    fn table_rows_follow_results() {
        let records = vec![
            CaptionRecord::new(1, "one\nline", 0.0, 2.0),
            CaptionRecord::new(2, "two", 2.0, 3.0),
        ];
        let results = vec![
            ExtensionResult {
                id: CaptionId::Int(1),
                extra_duration_seconds: 1.0,
                extra_frames: 30,
                extended_end_seconds: 3.0,
                followers: vec![Follower {
                    id: CaptionId::Int(2),
                    duration_seconds: 1.0,
                }],
            },
            ExtensionResult {
                id: CaptionId::Int(2),
                extra_duration_seconds: 0.0,
                extra_frames: 0,
                extended_end_seconds: 3.0,
                followers: vec![],
            },
        ];
        let mut out = Cursor::new(vec![]);
        write_extension_table(&mut out, &records, &results).unwrap();

        let text = String::from_utf8(out.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "1 | one line | 30 | 1.00s | 2(1.00s)");
        assert_eq!(lines[3], "2 | two | 0 | 0.00s | ");
    }

    #[test]
    fn computed_tail_row_prints_positive_zero() {
        let records = vec![CaptionRecord::new(1, "a", 0.0, 1.0)];
        let results = compute(&records, &GroupFilter::All, &ExtendOpts::default());
        let mut out = Cursor::new(vec![]);
        write_extension_table(&mut out, &records, &results).unwrap();

        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(text.lines().nth(2), Some("1 | a | 0 | 0.00s | "));

        let mut out = Cursor::new(vec![]);
        write_json(&mut out, &results).unwrap();
        let json = String::from_utf8(out.into_inner()).unwrap();
        assert!(json.contains("\"extra_duration_seconds\": 0.0"), "{}", json);
    }

    #[test]
    fn positions_as_json() {
        let positions = vec![PhrasePosition::at(-360.0, -180.0, -420.0)];
        let mut out = Cursor::new(vec![]);
        write_json(&mut out, &positions).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out.into_inner()).unwrap();
        assert_eq!(value[0]["x"], -360.0);
        assert!(value[0].get("rotate_x").is_none());
    }

    #[test]
    fn position_table_numbers_from_first_index() {
        let positions = vec![PhrasePosition::at(1.0, 2.0, 3.0)];
        let mut out = Cursor::new(vec![]);
        write_position_table(&mut out, 6, &positions).unwrap();

        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(text.lines().nth(2), Some("6 | 1 | 2 | 3"));
    }
}
