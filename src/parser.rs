use crate::caption::{CaptionId, CaptionRecord};
use crate::error::{CaplineError, Result};

use nom::bytes::complete::{tag, take_while1, take_while_m_n};
use nom::character::complete::{digit1, line_ending, multispace0, multispace1, space0, space1};
use nom::combinator::{map_res, opt};
use nom::error::{convert_error, ErrorKind, VerboseError};
use nom::multi::many_till;
use nom::sequence::terminated;
use nom::{branch::alt, error_position, Err, IResult};

type ParseResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Parses an SRT document into caption records sorted by start time.
/// SRT has no notion of sections, so every record comes back untagged.
pub fn parse_srt(input: &str) -> Result<Vec<CaptionRecord>> {
    match srt_file(input) {
        Ok((_, subs)) => Ok(subs),
        Err(Err::Error(err)) | Err(Err::Failure(err)) => Err(CaplineError::parse(convert_error(input, err))),
        Err(Err::Incomplete(_)) => Err(CaplineError::parse("unexpected end of SRT input")),
    }
}

fn srt_file(input: &str) -> ParseResult<Vec<CaptionRecord>> {
    let (input, _) = opt(tag("\u{FEFF}"))(input)?;
    let (input, mut subs) = all_captions(input)?;
    let (input, _) = end_of_file(input)?;
    subs.sort_by(|a, b| a.start.total_cmp(&b.start));
    Ok((input, subs))
}

fn all_captions(mut input: &str) -> ParseResult<Vec<CaptionRecord>> {
    let mut parsed = Vec::new();
    loop {
        match caption(input) {
            Ok((rest, record)) => {
                parsed.push(record);
                let (rest, _) = multispace0(rest)?;
                input = rest;
            }
            Err(err) => {
                let (rest, _) = multispace0(input)?;
                return if rest.is_empty() { Ok((rest, parsed)) } else { Err(err) };
            }
        }
    }
}

fn caption(input: &str) -> ParseResult<CaptionRecord> {
    let (input, _) = multispace0(input)?;
    let (input, id) = terminated(seq_num, multispace1)(input)?;
    let (input, (start, end)) = terminated(start_end, line_ending)(input)?;
    let (input, lines) = caption_text(input)?;

    Ok((
        input,
        CaptionRecord {
            id: CaptionId::Int(id),
            text: lines.join("\n"),
            start,
            end,
            section: None,
        },
    ))
}

fn end_of_file(input: &str) -> ParseResult<&str> {
    if input.is_empty() {
        Ok((input, input))
    } else {
        Err(Err::Error(error_position!(input, ErrorKind::Eof)))
    }
}

fn caption_text(input: &str) -> ParseResult<Vec<&str>> {
    let line = terminated(
        take_while1(|c: char| c != '\n' && c != '\r'),
        alt((line_ending, end_of_file)),
    );
    let (input, (lines, _)) = many_till(line, alt((line_ending, end_of_file)))(input)?;
    Ok((input, lines))
}

fn start_end(input: &str) -> ParseResult<(f64, f64)> {
    let (input, start) = timestamp(input)?;
    let (input, _) = space1(input)?;
    let (input, _) = tag("-->")(input)?;
    let (input, _) = space1(input)?;
    let (input, end) = timestamp(input)?;
    let (input, _) = space0(input)?;
    Ok((input, (start, end)))
}

/// `HH:MM:SS,mmm` to seconds. Short fields are tolerated: `1:2:3` pads to
/// the left, a short millisecond field such as `,2` pads to the right (200ms).
fn timestamp(input: &str) -> ParseResult<f64> {
    fn padded(s: &str, width: usize, left: bool) -> std::result::Result<u64, std::num::ParseIntError> {
        let s = if left {
            format!("{:0>width$}", s, width = width)
        } else {
            format!("{:0<width$}", s, width = width)
        };
        s.parse()
    }
    let hms = || map_res(take_while_m_n(0, 2, |c: char| c.is_ascii_digit()), |s: &str| padded(s, 2, true));
    let millis = || map_res(take_while_m_n(0, 3, |c: char| c.is_ascii_digit()), |s: &str| padded(s, 3, false));

    let (input, hours) = hms()(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, minutes) = hms()(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, seconds) = hms()(input)?;
    let (input, _) = alt((tag(","), tag(".")))(input)?;
    let (input, millis) = millis()(input)?;

    let total_millis = millis + seconds * 1000 + minutes * 60_000 + hours * 3_600_000;
    Ok((input, total_millis as f64 / 1000.0))
}

fn seq_num(input: &str) -> ParseResult<i64> {
    map_res(digit1, |s: &str| s.parse())(input)
}
