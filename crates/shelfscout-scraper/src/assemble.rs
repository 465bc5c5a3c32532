//! Record assembly and URL deduplication for the listing stage.

use std::collections::HashSet;

use shelfscout_core::ListingRecord;

/// Collects listing records in encounter order; the distinct product URL
/// list is derived from them when the listing is finished.
#[derive(Debug, Default)]
pub struct RecordAssembler {
    records: Vec<ListingRecord>,
}

/// Final output of the listing stage, ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledListing {
    pub records: Vec<ListingRecord>,
    /// Distinct non-empty URLs in first-seen order.
    pub urls: Vec<String>,
    /// Set when the listing produced no records and a page snapshot should
    /// be captured for diagnosis.
    pub needs_snapshot: bool,
}

impl RecordAssembler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ListingRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn finish(self) -> AssembledListing {
        let needs_snapshot = self.records.is_empty();
        let urls = dedup_urls(self.records.iter().map(|r| r.url.as_str()));
        AssembledListing {
            records: self.records,
            urls,
            needs_snapshot,
        }
    }
}

impl Extend<ListingRecord> for RecordAssembler {
    fn extend<I: IntoIterator<Item = ListingRecord>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

/// Keeps the first occurrence of each non-empty URL, preserving order.
///
/// Idempotent: deduplicating the output again returns it unchanged.
#[must_use]
pub fn dedup_urls<I, S>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter_map(|url| {
            let url = url.as_ref();
            (!url.is_empty() && seen.insert(url.to_owned())).then(|| url.to_owned())
        })
        .collect()
}
