//! Search criteria accepted by the property search tool.
//!
//! The caller-facing vocabulary is deliberately small: two property types,
//! two transaction types, a handful of numeric ranges, zip codes, a sort key
//! and pagination. Each label maps to an upstream code through an exhaustive
//! `match`, so the mapping cannot silently fall through.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::SearchError;

pub const DEFAULT_ITEMS_PER_PAGE: u32 = 5;
pub const MAX_ITEMS_PER_PAGE: u32 = 10;
pub const DEFAULT_PAGE: u32 = 1;

// ============================================================================
// Enumerated Labels
// ============================================================================

/// Kind of property to search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[schemars(rename_all = "lowercase")]
pub enum PropertyType {
    #[default]
    Apartment,
    House,
}

impl PropertyType {
    /// Upstream `propertyTypes[]` code.
    pub fn code(self) -> u8 {
        match self {
            Self::Apartment => 0,
            Self::House => 1,
        }
    }
}

/// Whether the listing is for purchase or rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[schemars(rename_all = "lowercase")]
pub enum TransactionType {
    #[default]
    Sell,
    Rent,
}

impl TransactionType {
    /// Upstream `transactionType` code.
    pub fn code(self) -> u8 {
        match self {
            Self::Sell => 0,
            Self::Rent => 1,
        }
    }
}

/// Sort key for the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(rename_all = "camelCase")]
pub enum OrderBy {
    /// Cheapest per square meter first
    PricePerMeter,
    /// Cheapest first
    Price,
    /// Most recently updated first
    UpdatedAt,
}

/// Direction of an upstream sort pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl OrderBy {
    /// Upstream query key carrying the sort direction.
    pub fn upstream_key(self) -> &'static str {
        match self {
            Self::PricePerMeter => "order[pricePerMeter]",
            Self::Price => "order[price]",
            Self::UpdatedAt => "order[updatedAt]",
        }
    }

    pub fn direction(self) -> SortDirection {
        match self {
            Self::PricePerMeter | Self::Price => SortDirection::Asc,
            Self::UpdatedAt => SortDirection::Desc,
        }
    }
}

// ============================================================================
// Search Criteria
// ============================================================================

/// Parameters for the property search tool.
///
/// Field names are advertised in snake_case; the camelCase spellings are
/// accepted as aliases.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchCriteria {
    #[serde(default, alias = "propertyType")]
    #[schemars(description = "Type of property: 'apartment' or 'house'")]
    pub property_type: PropertyType,

    #[serde(default, alias = "transactionType")]
    #[schemars(description = "Transaction type: 'sell' for purchase or 'rent' for rental")]
    pub transaction_type: TransactionType,

    #[serde(default, alias = "budgetMin")]
    #[schemars(description = "Minimum budget/price in euros")]
    pub budget_min: Option<i64>,

    #[serde(default, alias = "budgetMax")]
    #[schemars(description = "Maximum budget/price in euros")]
    pub budget_max: Option<i64>,

    #[serde(default, alias = "surfaceMin")]
    #[schemars(description = "Minimum surface area in square meters")]
    pub surface_min: Option<i64>,

    #[serde(default, alias = "surfaceMax")]
    #[schemars(description = "Maximum surface area in square meters")]
    pub surface_max: Option<i64>,

    #[serde(default, alias = "pricePerMeterMin")]
    #[schemars(description = "Minimum price per square meter in euros")]
    pub price_per_meter_min: Option<i64>,

    #[serde(default, alias = "pricePerMeterMax")]
    #[schemars(description = "Maximum price per square meter in euros")]
    pub price_per_meter_max: Option<i64>,

    #[serde(default, alias = "bedroomMin")]
    #[schemars(description = "Minimum number of bedrooms")]
    pub bedroom_min: Option<i64>,

    #[serde(default, alias = "zipCodes")]
    #[schemars(description = "List of zip codes to search in (e.g., ['75011', '23158'])")]
    pub zip_codes: Option<Vec<String>>,

    #[serde(default, alias = "orderBy")]
    #[schemars(description = "Sort results by: 'pricePerMeter', 'price', or 'updatedAt'")]
    pub order_by: Option<OrderBy>,

    #[serde(default = "default_items_per_page", alias = "itemsPerPage")]
    #[schemars(range(min = 1, max = 10))]
    #[schemars(description = "Number of results per page (1-10)")]
    pub items_per_page: u32,

    #[serde(default = "default_page")]
    #[schemars(range(min = 1))]
    #[schemars(description = "Page number for pagination")]
    pub page: u32,
}

fn default_items_per_page() -> u32 {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            property_type: PropertyType::default(),
            transaction_type: TransactionType::default(),
            budget_min: None,
            budget_max: None,
            surface_min: None,
            surface_max: None,
            price_per_meter_min: None,
            price_per_meter_max: None,
            bedroom_min: None,
            zip_codes: None,
            order_by: None,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            page: DEFAULT_PAGE,
        }
    }
}

impl SearchCriteria {
    /// Enforce the pagination bounds that the type system cannot.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !(1..=MAX_ITEMS_PER_PAGE).contains(&self.items_per_page) {
            return Err(SearchError::invalid_params(format!(
                "items_per_page must be between 1 and {MAX_ITEMS_PER_PAGE}, got {}",
                self.items_per_page
            )));
        }

        if self.page < 1 {
            return Err(SearchError::invalid_params(format!(
                "page must be at least 1, got {}",
                self.page
            )));
        }

        Ok(())
    }
}
