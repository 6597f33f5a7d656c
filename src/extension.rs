use crate::caption::{CaptionId, CaptionRecord};
use crate::error::{CaplineError, Result};
use crate::filter::GroupFilter;

use serde::Serialize;
use tracing::{debug, warn};

/// How many following captions of the group a caption stays visible for.
const LOOKAHEAD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtendOpts {
    pub frame_rate: f64,
    /// Frames added to every extension on top of the look-ahead sum.
    pub fixed_buffer_frames: i64,
}

impl Default for ExtendOpts {
    fn default() -> Self {
        Self {
            frame_rate: 30.0,
            fixed_buffer_frames: 0,
        }
    }
}

/// A later caption of the group that the extension covers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Follower {
    pub id: CaptionId,
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtensionResult {
    pub id: CaptionId,
    pub extra_duration_seconds: f64,
    pub extra_frames: i64,
    pub extended_end_seconds: f64,
    pub followers: Vec<Follower>,
}

/// Computes how long each caption of the filtered group has to stay on
/// screen past its own end: the durations of the next one or two captions
/// of the same group.
///
/// Returns one result per matching record, in source order. A filter that
/// matches nothing yields an empty vector; use [`compute_checked`] to turn
/// that into an error.
///
/// Durations are not validated. A NaN timestamp gives a NaN
/// `extra_duration_seconds` and an `extra_frames` of just the buffer,
/// since a NaN frame count saturates to zero.
pub fn compute(records: &[CaptionRecord], filter: &GroupFilter, opts: &ExtendOpts) -> Vec<ExtensionResult> {
    let group = filter.apply(records);
    if group.is_empty() && !records.is_empty() {
        warn!(%filter, total = records.len(), "filter matched no captions");
    }

    group
        .iter()
        .enumerate()
        .map(|(i, sub)| {
            let followers: Vec<Follower> = group
                .iter()
                .skip(i + 1)
                .take(LOOKAHEAD)
                .map(|next| Follower {
                    id: next.id.clone(),
                    duration_seconds: next.duration(),
                })
                .collect();
            // Empty float sums are -0.0; start from +0.0 so tail rows print as 0.
            let extra = followers.iter().fold(0.0, |acc, f| acc + f.duration_seconds);
            let extra_frames = (extra * opts.frame_rate).round() as i64 + opts.fixed_buffer_frames;
            debug!(id = %sub.id, extra, extra_frames, "extended caption");
            ExtensionResult {
                id: sub.id.clone(),
                extra_duration_seconds: extra,
                extra_frames,
                extended_end_seconds: sub.end + extra,
                followers,
            }
        })
        .collect()
}

/// Like [`compute`], but a filter that matches none of a non-empty caption
/// list is an error. That mismatch usually means the section name in the
/// caller differs from the one in the data.
pub fn compute_checked(
    records: &[CaptionRecord],
    filter: &GroupFilter,
    opts: &ExtendOpts,
) -> Result<Vec<ExtensionResult>> {
    let results = compute(records, filter, opts);
    if results.is_empty() && !records.is_empty() {
        return Err(CaplineError::NoMatchingCaptions {
            filter: filter.to_string(),
        });
    }
    Ok(results)
}
