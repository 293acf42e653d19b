//! Path and query validation for the report endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Error, ReportFilters};

pub(crate) const INVALID_CUSTOMER_ID: &str = "Invalid input: customerId must be a positive integer";
pub(crate) const INVALID_MIN_SPENT: &str = "Invalid input: minSpent must be a non-negative number";

/// Parse the `{customerId}` path segment as an integer of at least one.
pub(crate) fn parse_customer_id(raw: &str) -> Result<i64, Error> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id >= 1)
        .ok_or_else(|| Error::invalid_request(INVALID_CUSTOMER_ID))
}

/// Raw query string of `GET /api/reports/customer-orders`.
///
/// Values arrive as text so malformed numbers become envelope errors rather
/// than extractor rejections.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Exact country match; blank means no filter.
    #[param(example = "USA")]
    pub country: Option<String>,
    /// Minimum total spend, inclusive.
    #[param(value_type = Option<f64>, example = 100.0)]
    pub min_spent: Option<String>,
}

impl TryFrom<ReportQuery> for ReportFilters {
    type Error = Error;

    fn try_from(query: ReportQuery) -> Result<Self, Self::Error> {
        let country = query
            .country
            .map(|country| country.trim().to_owned())
            .filter(|country| !country.is_empty());
        let min_spent = match query.min_spent.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_min_spent(raw)?),
        };
        Ok(Self { country, min_spent })
    }
}

fn parse_min_spent(raw: &str) -> Result<f64, Error> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .ok_or_else(|| Error::invalid_request(INVALID_MIN_SPENT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case(" 42 ", 42)]
    #[case("9007199254740993", 9_007_199_254_740_993)]
    fn accepts_positive_customer_ids(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(parse_customer_id(raw).expect("valid id"), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("1.5")]
    #[case("abc")]
    #[case("")]
    fn rejects_other_customer_ids(#[case] raw: &str) {
        let err = parse_customer_id(raw).expect_err("invalid id");
        assert_eq!(err.message(), INVALID_CUSTOMER_ID);
    }

    fn query(country: Option<&str>, min_spent: Option<&str>) -> ReportQuery {
        ReportQuery {
            country: country.map(str::to_owned),
            min_spent: min_spent.map(str::to_owned),
        }
    }

    #[rstest]
    #[case(query(None, None), None, None)]
    #[case(query(Some("UK"), Some("0")), Some("UK"), Some(0.0))]
    #[case(query(Some("  "), Some("")), None, None)]
    #[case(query(Some(" USA "), Some("79.99")), Some("USA"), Some(79.99))]
    fn builds_filters(
        #[case] input: ReportQuery,
        #[case] country: Option<&str>,
        #[case] min_spent: Option<f64>,
    ) {
        let filters = ReportFilters::try_from(input).expect("valid query");
        assert_eq!(filters.country.as_deref(), country);
        assert_eq!(filters.min_spent, min_spent);
    }

    #[rstest]
    #[case("-1")]
    #[case("lots")]
    #[case("NaN")]
    #[case("inf")]
    fn rejects_bad_min_spent(#[case] raw: &str) {
        let err = ReportFilters::try_from(query(None, Some(raw))).expect_err("invalid minSpent");
        assert_eq!(err.message(), INVALID_MIN_SPENT);
    }
}
