//! Translation of search criteria into the Melo query string.
//!
//! The upstream expects PHP-style array keys (`propertyTypes[]`,
//! `includedZipcodes[]`) and bracketed sort keys (`order[price]`), so the
//! query is kept as an ordered list of pairs rather than a map.

use serde::Serialize;

use super::criteria::SearchCriteria;

/// Upstream query key names.
pub mod keys {
    pub const PROPERTY_TYPES: &str = "propertyTypes[]";
    pub const TRANSACTION_TYPE: &str = "transactionType";
    pub const BUDGET_MIN: &str = "budgetMin";
    pub const BUDGET_MAX: &str = "budgetMax";
    pub const SURFACE_MIN: &str = "surfaceMin";
    pub const SURFACE_MAX: &str = "surfaceMax";
    pub const PRICE_PER_METER_MIN: &str = "pricePerMeterMin";
    pub const PRICE_PER_METER_MAX: &str = "pricePerMeterMax";
    pub const BEDROOM_MIN: &str = "bedroomMin";
    pub const INCLUDED_ZIPCODES: &str = "includedZipcodes[]";
    pub const ITEMS_PER_PAGE: &str = "itemsPerPage";
    pub const PAGE: &str = "page";
    pub const WITH_COHERENT_PRICE: &str = "withCoherentPrice";
}

/// Ordered, possibly multi-valued query pairs sent to the upstream API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UpstreamQuery {
    pairs: Vec<(&'static str, String)>,
}

impl UpstreamQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl ToString) {
        self.pairs.push((key, value.to_string()));
    }

    /// Push a pair only when the value is present.
    pub fn push_opt<T: ToString>(&mut self, key: &'static str, value: Option<T>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// First value recorded under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values recorded under `key`, in insertion order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| *k == key)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// URL-encoded form of the query, for logging.
    pub fn encoded(&self) -> String {
        serde_urlencoded::to_string(self).unwrap_or_default()
    }
}

/// Build the upstream query for the given criteria.
///
/// Optional fields emit nothing when unset. Pagination and the coherent-price
/// flag are always appended last.
pub fn translate(criteria: &SearchCriteria) -> UpstreamQuery {
    let mut query = UpstreamQuery::new();

    query.push(keys::PROPERTY_TYPES, criteria.property_type.code());
    query.push(keys::TRANSACTION_TYPE, criteria.transaction_type.code());

    query.push_opt(keys::BUDGET_MIN, criteria.budget_min);
    query.push_opt(keys::BUDGET_MAX, criteria.budget_max);
    query.push_opt(keys::SURFACE_MIN, criteria.surface_min);
    query.push_opt(keys::SURFACE_MAX, criteria.surface_max);
    query.push_opt(keys::PRICE_PER_METER_MIN, criteria.price_per_meter_min);
    query.push_opt(keys::PRICE_PER_METER_MAX, criteria.price_per_meter_max);
    query.push_opt(keys::BEDROOM_MIN, criteria.bedroom_min);

    for zip_code in criteria.zip_codes.iter().flatten() {
        query.push(keys::INCLUDED_ZIPCODES, zip_code);
    }

    if let Some(order_by) = criteria.order_by {
        query.push(order_by.upstream_key(), order_by.direction().as_str());
    }

    query.push(keys::ITEMS_PER_PAGE, criteria.items_per_page);
    query.push(keys::PAGE, criteria.page);
    query.push(keys::WITH_COHERENT_PRICE, "true");

    query
}

#[cfg(test)]
mod tests {
    use super::super::criteria::{OrderBy, PropertyType, TransactionType};
    use super::*;

    const RANGE_KEYS: [&str; 7] = [
        keys::BUDGET_MIN,
        keys::BUDGET_MAX,
        keys::SURFACE_MIN,
        keys::SURFACE_MAX,
        keys::PRICE_PER_METER_MIN,
        keys::PRICE_PER_METER_MAX,
        keys::BEDROOM_MIN,
    ];

    fn set_range_field(criteria: &mut SearchCriteria, index: usize, value: i64) {
        match index {
            0 => criteria.budget_min = Some(value),
            1 => criteria.budget_max = Some(value),
            2 => criteria.surface_min = Some(value),
            3 => criteria.surface_max = Some(value),
            4 => criteria.price_per_meter_min = Some(value),
            5 => criteria.price_per_meter_max = Some(value),
            6 => criteria.bedroom_min = Some(value),
            _ => unreachable!(),
        }
    }

    fn sort_pairs(query: &UpstreamQuery) -> Vec<(&str, &str)> {
        query
            .pairs()
            .iter()
            .filter(|(k, _)| k.starts_with("order["))
            .map(|(k, v)| (*k, v.as_str()))
            .collect()
    }

    #[test]
    fn test_optional_fields_present_iff_set() {
        // Every subset of the optional range fields.
        for mask in 0u32..(1 << RANGE_KEYS.len()) {
            let mut criteria = SearchCriteria::default();
            for index in 0..RANGE_KEYS.len() {
                if mask & (1 << index) != 0 {
                    set_range_field(&mut criteria, index, 100 + index as i64);
                }
            }

            let query = translate(&criteria);
            for (index, key) in RANGE_KEYS.iter().enumerate() {
                let set = mask & (1 << index) != 0;
                assert_eq!(query.contains_key(key), set, "mask {mask:#b}, key {key}");
                if set {
                    assert_eq!(query.get(key), Some((100 + index).to_string().as_str()));
                    assert_eq!(query.get_all(key).len(), 1);
                }
            }
            assert!(!query.contains_key(keys::INCLUDED_ZIPCODES));
            assert!(sort_pairs(&query).is_empty());
        }
    }

    #[test]
    fn test_translate_is_deterministic() {
        let criteria = SearchCriteria {
            property_type: PropertyType::House,
            surface_min: Some(40),
            zip_codes: Some(vec!["69001".into(), "69002".into()]),
            order_by: Some(OrderBy::Price),
            ..Default::default()
        };
        assert_eq!(translate(&criteria), translate(&criteria));
    }

    #[test]
    fn test_pagination_and_flag_always_present() {
        let query = translate(&SearchCriteria::default());
        assert_eq!(query.get(keys::ITEMS_PER_PAGE), Some("5"));
        assert_eq!(query.get(keys::PAGE), Some("1"));
        assert_eq!(query.get(keys::WITH_COHERENT_PRICE), Some("true"));
        assert_eq!(query.get(keys::PROPERTY_TYPES), Some("0"));
        assert_eq!(query.get(keys::TRANSACTION_TYPE), Some("0"));
        assert_eq!(query.len(), 5);

        let paged = translate(&SearchCriteria {
            items_per_page: 10,
            page: 3,
            ..Default::default()
        });
        assert_eq!(paged.get(keys::ITEMS_PER_PAGE), Some("10"));
        assert_eq!(paged.get(keys::PAGE), Some("3"));
    }

    #[test]
    fn test_order_by_price_per_meter() {
        let query = translate(&SearchCriteria {
            order_by: Some(OrderBy::PricePerMeter),
            ..Default::default()
        });
        assert_eq!(sort_pairs(&query), vec![("order[pricePerMeter]", "asc")]);
    }

    #[test]
    fn test_order_by_price() {
        let query = translate(&SearchCriteria {
            order_by: Some(OrderBy::Price),
            ..Default::default()
        });
        assert_eq!(sort_pairs(&query), vec![("order[price]", "asc")]);
    }

    #[test]
    fn test_order_by_updated_at() {
        let query = translate(&SearchCriteria {
            order_by: Some(OrderBy::UpdatedAt),
            ..Default::default()
        });
        assert_eq!(sort_pairs(&query), vec![("order[updatedAt]", "desc")]);
    }

    #[test]
    fn test_zip_codes_repeated_in_order() {
        let query = translate(&SearchCriteria {
            zip_codes: Some(vec!["75011".into(), "75012".into(), "75011".into()]),
            ..Default::default()
        });
        assert_eq!(
            query.get_all(keys::INCLUDED_ZIPCODES),
            vec!["75011", "75012", "75011"]
        );
    }

    #[test]
    fn test_empty_zip_codes_emit_nothing() {
        let query = translate(&SearchCriteria {
            zip_codes: Some(vec![]),
            ..Default::default()
        });
        assert!(!query.contains_key(keys::INCLUDED_ZIPCODES));
    }

    #[test]
    fn test_house_rent_budget_max() {
        let query = translate(&SearchCriteria {
            property_type: PropertyType::House,
            transaction_type: TransactionType::Rent,
            budget_max: Some(2000),
            ..Default::default()
        });

        assert_eq!(
            query.pairs(),
            &[
                ("propertyTypes[]", "1".to_string()),
                ("transactionType", "1".to_string()),
                ("budgetMax", "2000".to_string()),
                ("itemsPerPage", "5".to_string()),
                ("page", "1".to_string()),
                ("withCoherentPrice", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_pair_order() {
        let query = translate(&SearchCriteria {
            budget_min: Some(1),
            bedroom_min: Some(2),
            zip_codes: Some(vec!["13001".into()]),
            order_by: Some(OrderBy::UpdatedAt),
            ..Default::default()
        });
        let keys: Vec<&str> = query.pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                "propertyTypes[]",
                "transactionType",
                "budgetMin",
                "bedroomMin",
                "includedZipcodes[]",
                "order[updatedAt]",
                "itemsPerPage",
                "page",
                "withCoherentPrice",
            ]
        );
    }

    #[test]
    fn test_encoded_query_string() {
        let query = translate(&SearchCriteria {
            zip_codes: Some(vec!["75011".into(), "75012".into()]),
            ..Default::default()
        });
        assert_eq!(
            query.encoded(),
            "propertyTypes%5B%5D=0&transactionType=0&includedZipcodes%5B%5D=75011\
             &includedZipcodes%5B%5D=75012&itemsPerPage=5&page=1&withCoherentPrice=true"
        );
    }
}
