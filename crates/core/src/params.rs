//! Permissive coercion of listing query parameters.
//!
//! Parameters arrive as raw strings from a URL query string. Every coercion is
//! total: malformed input degrades to a default instead of rejecting the request.

use crate::constants::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, MAX_PAGE};
use directory_types::SearchText;

/// A coerced parameter value and whether the default was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coerced<T> {
    pub value: T,
    pub defaulted: bool,
}

impl<T> Coerced<T> {
    fn parsed(value: T) -> Self {
        Self {
            value,
            defaulted: false,
        }
    }

    fn fallback(value: T) -> Self {
        Self {
            value,
            defaulted: true,
        }
    }
}

/// Fields the listing can be sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Age,
    Issue,
    Email,
}

impl SortField {
    /// Parse a sort field name. Matching is exact after trimming.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "id" => Some(SortField::Id),
            "name" => Some(SortField::Name),
            "age" => Some(SortField::Age),
            "issue" => Some(SortField::Issue),
            "email" => Some(SortField::Email),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything other than a case-insensitive `desc` is ascending.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Validated listing parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryParams {
    pub limit: u32,
    /// Requested page, before clamping to the number of available pages.
    pub page: u32,
    pub q: Option<SearchText>,
    /// Lower-cased issue names; empty means no issue filter.
    pub issues: Vec<String>,
    pub has_email: bool,
    pub has_phone: bool,
    pub age_min: Option<i64>,
    pub age_max: Option<i64>,
    pub sort_by: Option<SortField>,
    pub order: SortOrder,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
            q: None,
            issues: Vec::new(),
            has_email: false,
            has_phone: false,
            age_min: None,
            age_max: None,
            sort_by: None,
            order: SortOrder::Asc,
        }
    }
}

impl QueryParams {
    /// Build parameters from raw query pairs.
    ///
    /// The first occurrence of a key wins; unknown keys are ignored.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut raw = RawParams::default();
        for (key, value) in pairs {
            let slot = match key {
                "limit" => &mut raw.limit,
                "page" => &mut raw.page,
                "q" => &mut raw.q,
                "issue" => &mut raw.issue,
                "hasEmail" => &mut raw.has_email,
                "hasPhone" => &mut raw.has_phone,
                "ageMin" => &mut raw.age_min,
                "ageMax" => &mut raw.age_max,
                "sortBy" => &mut raw.sort_by,
                "order" => &mut raw.order,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        raw.coerce()
    }
}

#[derive(Default)]
struct RawParams<'a> {
    limit: Option<&'a str>,
    page: Option<&'a str>,
    q: Option<&'a str>,
    issue: Option<&'a str>,
    has_email: Option<&'a str>,
    has_phone: Option<&'a str>,
    age_min: Option<&'a str>,
    age_max: Option<&'a str>,
    sort_by: Option<&'a str>,
    order: Option<&'a str>,
}

impl RawParams<'_> {
    fn coerce(self) -> QueryParams {
        let limit = coerce_bounded(self.limit, DEFAULT_LIMIT, 1, MAX_LIMIT);
        if limit.defaulted {
            tracing::debug!("limit {:?} not usable, defaulting to {}", self.limit, limit.value);
        }
        let page = coerce_bounded(self.page, DEFAULT_PAGE, 1, MAX_PAGE);
        if page.defaulted {
            tracing::debug!("page {:?} not usable, defaulting to {}", self.page, page.value);
        }

        QueryParams {
            limit: limit.value,
            page: page.value,
            q: self.q.and_then(|q| SearchText::new(q).ok()),
            issues: coerce_issue_list(self.issue),
            has_email: coerce_flag(self.has_email),
            has_phone: coerce_flag(self.has_phone),
            age_min: self.age_min.and_then(parse_int),
            age_max: self.age_max.and_then(parse_int),
            sort_by: self.sort_by.and_then(SortField::parse),
            order: self.order.map(SortOrder::parse).unwrap_or_default(),
        }
    }
}

/// Parse a leading base-10 integer the way browsers' `parseInt` does.
///
/// Leading whitespace and a sign are accepted, parsing stops at the first
/// non-digit, and input without any leading digit yields `None`. Values beyond
/// the `i64` range saturate.
pub fn parse_int(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut saw_digit = false;
    let mut acc: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        saw_digit = true;
        let d = i64::from(b - b'0');
        acc = if negative {
            acc.saturating_mul(10).saturating_sub(d)
        } else {
            acc.saturating_mul(10).saturating_add(d)
        };
    }

    saw_digit.then_some(acc)
}

/// Parse an integer and clamp it to `[min, max]`.
///
/// Absent, empty, or unparseable input yields `default` (itself clamped).
pub fn coerce_bounded(value: Option<&str>, default: u32, min: u32, max: u32) -> Coerced<u32> {
    let clamp = |n: i64| n.clamp(i64::from(min), i64::from(max)) as u32;
    match value.filter(|v| !v.is_empty()).and_then(parse_int) {
        Some(n) => Coerced::parsed(clamp(n)),
        None => Coerced::fallback(clamp(i64::from(default))),
    }
}

/// A flag is set only by the exact values `1` and `true`.
pub fn coerce_flag(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true"))
}

/// Split a comma-separated issue list into trimmed, lower-cased names.
pub fn coerce_issue_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
