use crate::caption::{CaptionId, CaptionRecord};

use std::collections::HashSet;
use std::fmt;

use regex::Regex;

type Predicate = Box<dyn Fn(&CaptionRecord) -> bool + Send + Sync>;

/// Selects the subsequence of captions an extension is computed over.
///
/// Lyric projects group captions either by a `section` tag or by a
/// hand-maintained list of ids. Both are plain filters here, so the
/// calculator does not care which one the caller picked.
pub enum GroupFilter {
    All,
    Section(String),
    SectionPattern(Regex),
    Ids(HashSet<CaptionId>),
    Predicate(Predicate),
}

impl GroupFilter {
    pub fn section(name: impl Into<String>) -> Self {
        GroupFilter::Section(name.into())
    }

    pub fn section_pattern(pattern: &str) -> crate::Result<Self> {
        Ok(GroupFilter::SectionPattern(Regex::new(pattern)?))
    }

    pub fn ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CaptionId>,
    {
        GroupFilter::Ids(ids.into_iter().map(Into::into).collect())
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&CaptionRecord) -> bool + Send + Sync + 'static,
    {
        GroupFilter::Predicate(Box::new(f))
    }

    pub fn matches(&self, record: &CaptionRecord) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Section(name) => record.section.as_deref() == Some(name.as_str()),
            GroupFilter::SectionPattern(re) => {
                record.section.as_deref().map_or(false, |s| re.is_match(s))
            }
            GroupFilter::Ids(ids) => ids.contains(&record.id),
            GroupFilter::Predicate(f) => f(record),
        }
    }

    /// Matching records, in source order.
    pub fn apply<'a>(&self, records: &'a [CaptionRecord]) -> Vec<&'a CaptionRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

impl Default for GroupFilter {
    fn default() -> Self {
        GroupFilter::All
    }
}

impl fmt::Display for GroupFilter {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GroupFilter::All => write!(fmt, "all"),
            GroupFilter::Section(name) => write!(fmt, "section '{}'", name),
            GroupFilter::SectionPattern(re) => write!(fmt, "section /{}/", re),
            GroupFilter::Ids(ids) => write!(fmt, "{} id(s)", ids.len()),
            GroupFilter::Predicate(_) => write!(fmt, "custom predicate"),
        }
    }
}

impl fmt::Debug for GroupFilter {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GroupFilter::Ids(ids) => fmt.debug_tuple("Ids").field(ids).finish(),
            other => write!(fmt, "GroupFilter({})", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<CaptionRecord> {
        vec![
            CaptionRecord::new(0, "a", 0.0, 1.0).with_section("verse1"),
            CaptionRecord::new(1, "b", 1.0, 2.0).with_section("chorus1"),
            CaptionRecord::new(1001, "c", 2.0, 3.0).with_section("verse1"),
            CaptionRecord::new(2, "d", 3.0, 4.0),
            CaptionRecord::new(3, "e", 4.0, 5.0).with_section("verse2"),
        ]
    }

    fn ids_of(records: &[&CaptionRecord]) -> Vec<CaptionId> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn section_keeps_source_order() {
        let subs = sample();
        let picked = GroupFilter::section("verse1").apply(&subs);
        assert_eq!(ids_of(&picked), vec![CaptionId::Int(0), CaptionId::Int(1001)]);
    }

    #[test]
    fn id_list_order_does_not_matter() {
        let subs = sample();
        let picked = GroupFilter::ids([1001i64, 0]).apply(&subs);
        assert_eq!(ids_of(&picked), vec![CaptionId::Int(0), CaptionId::Int(1001)]);
    }

    #[test]
    fn pattern_skips_untagged_records() {
        let subs = sample();
        let picked = GroupFilter::section_pattern("^verse").unwrap().apply(&subs);
        assert_eq!(picked.len(), 3);
        assert!(picked.iter().all(|r| r.section.is_some()));
    }

    #[test]
    fn bad_pattern_is_an_error() {
        assert!(GroupFilter::section_pattern("(").is_err());
    }

    #[test]
    fn predicate_sees_whole_record() {
        let subs = sample();
        let picked = GroupFilter::predicate(|r| r.start >= 2.0).apply(&subs);
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn misspelt_section_matches_nothing() {
        let subs = sample();
        assert!(GroupFilter::section("Verse1").apply(&subs).is_empty());
        assert!(GroupFilter::section("verse_1").apply(&subs).is_empty());
    }
}
