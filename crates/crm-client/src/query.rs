//! Query String Codec
//!
//! Two encodings of the same `PaginationParams`:
//! - the browser URL (`pageNumber`, `pageSize`, `sortBy`, `sortDirection`), defaults omitted
//! - the API list query (`PageNumber`, `PageSize`, `SortBy`, `SortDirection`), always complete

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::pagination::{
    is_allowed_page_size, is_sort_field, PaginationParams, SortDirection, DEFAULT_PAGE_NUMBER,
    DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY,
};

/// Characters left as-is in query components (RFC 3986 unreserved)
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const URL_PAGE_NUMBER: &str = "pageNumber";
const URL_PAGE_SIZE: &str = "pageSize";
const URL_SORT_BY: &str = "sortBy";
const URL_SORT_DIRECTION: &str = "sortDirection";

/// Ordered `key=value` pairs joined with `&`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Push only when the value is present and non-blank
    pub fn push_opt(self, key: impl Into<String>, value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    pub fn extend(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.pairs.extend(pairs);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Encoded form with a leading `?`, or empty when there are no pairs
    pub fn to_suffix(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("?{}", self)
        }
    }

    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim().trim_start_matches('?');
        let pairs = raw
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let (key, value) = part.split_once('=').unwrap_or((part, ""));
                (decode_component(key), decode_component(value))
            })
            .collect();
        Self { pairs }
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl std::fmt::Display for QueryString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, (key, value)) in self.pairs.iter().enumerate() {
            if index > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", encode_component(key), encode_component(value))?;
        }
        Ok(())
    }
}

pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_COMPONENT).to_string()
}

pub fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// URL query for the browser address bar. Defaults are left out, no leading `?`.
pub fn encode(params: &PaginationParams) -> String {
    let mut query = QueryString::new();
    if params.page_number != DEFAULT_PAGE_NUMBER {
        query = query.push(URL_PAGE_NUMBER, params.page_number);
    }
    if params.page_size != DEFAULT_PAGE_SIZE {
        query = query.push(URL_PAGE_SIZE, params.page_size);
    }
    if !params.sort_by.is_empty() && params.sort_by != DEFAULT_SORT_BY {
        query = query.push(URL_SORT_BY, &params.sort_by);
    }
    if params.sort_direction != SortDirection::default() {
        query = query.push(URL_SORT_DIRECTION, params.sort_direction.as_str());
    }
    query.to_string()
}

/// Inverse of [`encode`]. Every field falls back to its default on its own when
/// missing or unusable, so any input yields valid params.
pub fn decode(raw: &str) -> PaginationParams {
    let query = QueryString::parse(raw);
    let defaults = PaginationParams::default();

    let page_number = query
        .get(URL_PAGE_NUMBER)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(defaults.page_number);
    let page_size = query
        .get(URL_PAGE_SIZE)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|n| is_allowed_page_size(*n))
        .unwrap_or(defaults.page_size);
    let sort_by = query
        .get(URL_SORT_BY)
        .map(str::trim)
        .filter(|v| is_sort_field(v))
        .map(str::to_string)
        .unwrap_or(defaults.sort_by);
    let sort_direction = query
        .get(URL_SORT_DIRECTION)
        .and_then(SortDirection::parse)
        .unwrap_or(defaults.sort_direction);

    PaginationParams {
        page_number,
        page_size,
        sort_by,
        sort_direction,
    }
}

/// Query pairs understood by the API list endpoints
pub fn api_query(params: &PaginationParams) -> Vec<(String, String)> {
    vec![
        ("PageNumber".to_string(), params.page_number.to_string()),
        ("PageSize".to_string(), params.page_size.to_string()),
        ("SortBy".to_string(), params.sort_by.clone()),
        ("SortDirection".to_string(), params.sort_direction.as_str().to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_params() -> Vec<PaginationParams> {
        let mut all = Vec::new();
        for page_number in [1, 2, 17] {
            for page_size in crate::pagination::PAGE_SIZE_OPTIONS {
                for sort_by in ["name", "position", "completedPercent", "user.fio"] {
                    for sort_direction in [SortDirection::Ascending, SortDirection::Descending] {
                        all.push(PaginationParams {
                            page_number,
                            page_size,
                            sort_by: sort_by.to_string(),
                            sort_direction,
                        });
                    }
                }
            }
        }
        all
    }

    #[test]
    fn test_decode_inverts_encode() {
        for params in valid_params() {
            assert!(params.is_valid());
            assert_eq!(decode(&encode(&params)), params, "query: {}", encode(&params));
        }
    }

    #[test]
    fn test_defaults_are_omitted() {
        assert_eq!(encode(&PaginationParams::default()), "");
        let params = PaginationParams::default().with_page(3);
        assert_eq!(encode(&params), "pageNumber=3");
        let params = params.toggle_sort("position").toggle_sort("position");
        assert_eq!(encode(&params), "sortBy=position&sortDirection=desc");
    }

    #[test]
    fn test_decode_missing_or_garbage() {
        let defaults = PaginationParams::default();
        assert_eq!(decode(""), defaults);
        assert_eq!(decode("?"), defaults);
        assert_eq!(decode("%%%&&==garbage=&pageNumber"), defaults);
        assert_eq!(decode("pageNumber=-4&pageSize=7&sortBy=&sortDirection=sideways"), defaults);
        assert_eq!(decode("pageNumber=abc&pageSize=1000000000000"), defaults);
    }

    #[test]
    fn test_decode_keeps_good_fields() {
        let params = decode("?pageSize=25&pageNumber=zero&sortDirection=desc&unknown=1");
        assert_eq!(params.page_size, 25);
        assert_eq!(params.page_number, 1);
        assert_eq!(params.sort_direction, SortDirection::Descending);
        assert_eq!(params.sort_by, "name");
    }

    #[test]
    fn test_api_query_keys() {
        let params = PaginationParams::default().with_page(2);
        let query = QueryString::new().extend(api_query(&params)).push_opt("fio", Some("Ivanov I."));
        assert_eq!(
            query.to_suffix(),
            "?PageNumber=2&PageSize=10&SortBy=name&SortDirection=asc&fio=Ivanov%20I."
        );
        assert_eq!(QueryString::new().push_opt("fio", Some("  ")).to_suffix(), "");
    }

    #[test]
    fn test_component_round_trip() {
        let query = QueryString::parse("text=%D0%9F%D1%80%D0%B8%D0%B2%D0%B5%D1%82+mir&x");
        assert_eq!(query.get("text"), Some("Привет mir"));
        assert_eq!(query.get("x"), Some(""));
    }
}
