//! The listing pipeline: filter, sort, then paginate.
//!
//! Stages run in a fixed order over the output of the previous stage. Sorting
//! happens before slicing so page boundaries follow the requested order.

use crate::normalize::PatientRecord;
use crate::params::{QueryParams, SortField, SortOrder};
use crate::{DirectoryError, DirectoryResult};
use icu_collator::{Collator, CollatorOptions};
use serde::Serialize;
use std::cmp::Ordering;

/// One page of listing results plus pagination metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientPage {
    pub data: Vec<PatientRecord>,
    /// Number of records matching the filters, across all pages.
    pub total: u64,
    /// The page actually served, after clamping.
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Run the full pipeline over `records`.
///
/// # Errors
///
/// Returns `DirectoryError::Internal` if the collator cannot be loaded or
/// pagination metadata cannot be represented.
pub fn query(records: &[PatientRecord], params: &QueryParams) -> DirectoryResult<PatientPage> {
    let mut rows = filter(records, params);
    if let Some(field) = params.sort_by {
        let collator = root_collator()?;
        sort(&mut rows, field, params.order, &collator);
    }
    paginate(&rows, params.limit, params.page)
}

/// Apply every filter stage and return the surviving records in input order.
pub fn filter<'a>(records: &'a [PatientRecord], params: &QueryParams) -> Vec<&'a PatientRecord> {
    let mut rows: Vec<&PatientRecord> = records.iter().collect();

    if !params.issues.is_empty() {
        rows.retain(|p| {
            let issue = p.issue.to_lowercase();
            params.issues.iter().any(|wanted| *wanted == issue)
        });
    }
    if params.has_email {
        rows.retain(|p| is_present(p.email.as_deref()));
    }
    if params.has_phone {
        rows.retain(|p| is_present(p.phone.as_deref()));
    }
    if let Some(min) = params.age_min {
        rows.retain(|p| i64::from(p.age) >= min);
    }
    if let Some(max) = params.age_max {
        rows.retain(|p| i64::from(p.age) <= max);
    }
    if let Some(q) = &params.q {
        rows.retain(|p| {
            [
                p.id.as_str(),
                p.name.as_str(),
                p.issue.as_str(),
                p.address.as_str(),
                p.email.as_deref().unwrap_or_default(),
            ]
            .into_iter()
            .any(|field| q.matches(field))
        });
    }

    rows
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Stable sort by `field`. Records with equal keys keep their relative order
/// in both directions.
pub fn sort(
    rows: &mut [&PatientRecord],
    field: SortField,
    order: SortOrder,
    collator: &Collator,
) {
    rows.sort_by(|a, b| {
        let ordering = compare_by(a, b, field, collator);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_by(
    a: &PatientRecord,
    b: &PatientRecord,
    field: SortField,
    collator: &Collator,
) -> Ordering {
    match field {
        SortField::Id => collator.compare(&a.id, &b.id),
        SortField::Name => collator.compare(&a.name, &b.name),
        SortField::Age => a.age.cmp(&b.age),
        SortField::Issue => collator.compare(&a.issue, &b.issue),
        SortField::Email => collator.compare(
            a.email.as_deref().unwrap_or_default(),
            b.email.as_deref().unwrap_or_default(),
        ),
    }
}

/// Collator for the root locale at default (tertiary) strength.
///
/// Accents and punctuation carry their collation weights, and lower-case sorts
/// before upper-case when strings differ only in case.
pub fn root_collator() -> DirectoryResult<Collator> {
    Collator::try_new(&Default::default(), CollatorOptions::new())
        .map_err(|e| DirectoryError::Internal(format!("collator unavailable: {e:?}")))
}

/// Slice one page out of the filtered, sorted rows.
///
/// An out-of-range page is clamped to the last page rather than returning an
/// empty slice.
pub fn paginate(rows: &[&PatientRecord], limit: u32, page: u32) -> DirectoryResult<PatientPage> {
    if limit == 0 {
        return Err(DirectoryError::Internal("page size must be positive".into()));
    }

    let total = rows.len();
    let page_size = limit as usize;
    let total_pages = u32::try_from(total.div_ceil(page_size).max(1))
        .map_err(|_| DirectoryError::Internal(format!("page count overflow for {total} rows")))?;
    let page = page.clamp(1, total_pages);
    let start = (page as usize - 1) * page_size;

    let data = rows
        .iter()
        .skip(start)
        .take(page_size)
        .map(|p| (*p).clone())
        .collect();

    Ok(PatientPage {
        data,
        total: total as u64,
        page,
        limit,
        total_pages,
    })
}
