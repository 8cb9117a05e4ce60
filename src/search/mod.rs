//! Client-side search over a loaded collection.
//!
//! Matching is a case-insensitive substring test, OR-combined across the
//! fields an entity kind declares searchable. The term is used as typed: it is
//! lower-cased but not trimmed or tokenized. Filtering never touches the
//! collection; it returns borrowed views in the original order.
//!
//! # Examples
//!
//! ```
//! use healthdesk::domain::seed;
//! use healthdesk::search;
//!
//! let doctors = seed::sample_doctors();
//! let hits = search::filter(&doctors, "NHI KHOA");
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].name, "BS. Trần Thị B");
//! ```

use crate::domain::Entity;

/// Records whose searchable fields contain `term`, ignoring case.
///
/// An empty term matches every record.
#[must_use]
pub fn filter<'a, E: Entity>(records: &'a [E], term: &str) -> Vec<&'a E> {
    filter_by(records, term, E::searchable_fields)
}

/// Like [`filter`], with an explicit choice of fields.
#[must_use]
pub fn filter_by<'a, E, F>(records: &'a [E], term: &str, fields: F) -> Vec<&'a E>
where
    F: Fn(&'a E) -> Vec<&'a str>,
{
    let _span = tracing::debug_span!("search_filter", total = records.len(), term_len = term.len())
        .entered();

    if term.is_empty() {
        return records.iter().collect();
    }

    let needle = term.to_lowercase();
    let matches: Vec<&E> = records
        .iter()
        .filter(|&record| {
            fields(record)
                .into_iter()
                .any(|field| contains_ignoring_case(field, &needle))
        })
        .collect();

    tracing::debug!(matched = matches.len(), "search filter applied");
    matches
}

fn contains_ignoring_case(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}
