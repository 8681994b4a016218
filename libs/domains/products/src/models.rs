use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::{ProductError, ProductResult};

static PRODUCT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^P[0-9]+$").expect("product id pattern is valid"));

/// Largest unit price accepted from a form: 8 integer digits
const MAX_UNIT_PRICE_INTEGER: i64 = 100_000_000;

/// Product entity as held in the catalog
///
/// `unitsInOrder` and `discontinued` are maintained by the store itself and
/// have no public setters; form input goes through [`NewProduct`], which does
/// not carry them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, immutable identifier (e.g. `P1234`)
    pub product_id: String,
    pub name: String,
    /// Exact decimal price, serialized as a string
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String, example = "500.00")]
    pub unit_price: Decimal,
    pub description: String,
    pub manufacturer: String,
    pub category: String,
    pub units_in_stock: u64,
    units_in_order: u64,
    discontinued: bool,
    pub condition: String,
    pub language: String,
}

/// Form input for adding a product
///
/// Built by [`crate::form::ProductForm`] only; it has no wire format of its own.
#[derive(Debug, Clone, Validate)]
pub struct NewProduct {
    #[validate(regex(
        path = *PRODUCT_ID_PATTERN,
        message = "Invalid product ID. It should start with character P followed by number."
    ))]
    pub product_id: String,
    #[validate(length(
        min = 4,
        max = 50,
        message = "Invalid product name. It should be minimum 4 characters to maximum 50 characters long."
    ))]
    pub name: String,
    #[validate(custom(function = "validate_unit_price"))]
    pub unit_price: Decimal,
    pub description: String,
    pub manufacturer: String,
    pub category: String,
    pub units_in_stock: u64,
    pub condition: String,
    pub language: String,
}

fn validate_unit_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        let mut err = ValidationError::new("range");
        err.message = Some("Unit price is Invalid. It cannot have negative values.".into());
        return Err(err);
    }

    let normalized = price.normalize();
    if normalized.scale() > 2 || normalized.trunc() >= Decimal::from(MAX_UNIT_PRICE_INTEGER) {
        let mut err = ValidationError::new("digits");
        err.message = Some(
            "Unit price is Invalid. It can have maximum of 2 digit fraction and 8 digit integer."
                .into(),
        );
        return Err(err);
    }

    Ok(())
}

impl Product {
    /// Create a catalog record from form input. Order state starts empty.
    pub fn new(input: NewProduct) -> Self {
        Self {
            product_id: input.product_id,
            name: input.name,
            unit_price: input.unit_price,
            description: input.description,
            manufacturer: input.manufacturer,
            category: input.category,
            units_in_stock: input.units_in_stock,
            units_in_order: 0,
            discontinued: false,
            condition: input.condition,
            language: input.language,
        }
    }

    /// Set the store-managed order state
    pub(crate) fn with_order_state(mut self, units_in_order: u64, discontinued: bool) -> Self {
        self.units_in_order = units_in_order;
        self.discontinued = discontinued;
        self
    }

    pub fn units_in_order(&self) -> u64 {
        self.units_in_order
    }

    pub fn is_discontinued(&self) -> bool {
        self.discontinued
    }
}

/// Attributes a [`ProductFilter`] can constrain
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    ToSchema,
)]
#[schema(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ProductAttribute {
    Category,
    Manufacturer,
    UnitsInStock,
    UnitsInOrder,
    Condition,
    Language,
}

impl ProductAttribute {
    /// The product's value for this attribute, rendered as a string
    pub fn value_of<'a>(&self, product: &'a Product) -> Cow<'a, str> {
        match self {
            Self::Category => Cow::Borrowed(&product.category),
            Self::Manufacturer => Cow::Borrowed(&product.manufacturer),
            Self::UnitsInStock => Cow::Owned(product.units_in_stock.to_string()),
            Self::UnitsInOrder => Cow::Owned(product.units_in_order.to_string()),
            Self::Condition => Cow::Borrowed(&product.condition),
            Self::Language => Cow::Borrowed(&product.language),
        }
    }
}

/// Multi-valued attribute filter: AND across attributes, OR within one attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    criteria: BTreeMap<ProductAttribute, Vec<String>>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add acceptable values for an attribute; repeated calls accumulate.
    pub fn with<I, S>(mut self, attribute: ProductAttribute, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.criteria
            .entry(attribute)
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Build from a string-keyed map. Keys that are not a [`ProductAttribute`]
    /// are dropped.
    pub fn from_raw(raw: HashMap<String, Vec<String>>) -> Self {
        raw.into_iter()
            .fold(Self::new(), |filter, (key, values)| match key.parse() {
                Ok(attribute) => filter.with(attribute, values),
                Err(_) => {
                    tracing::debug!(key = %key, "Ignoring unknown filter attribute");
                    filter
                }
            })
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn criteria(&self) -> &BTreeMap<ProductAttribute, Vec<String>> {
        &self.criteria
    }

    /// An attribute listed with no values matches nothing.
    pub fn matches(&self, product: &Product) -> bool {
        self.criteria.iter().all(|(attribute, accepted)| {
            let value = attribute.value_of(product);
            accepted.iter().any(|candidate| candidate.as_str() == value.as_ref())
        })
    }
}

/// Closed price interval `[low, high]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub low: Decimal,
    pub high: Decimal,
}

impl PriceRange {
    pub fn new(low: Decimal, high: Decimal) -> Self {
        Self { low, high }
    }

    /// Parse both bounds from decimal strings
    pub fn parse(low: &str, high: &str) -> ProductResult<Self> {
        Ok(Self::new(parse_price(low)?, parse_price(high)?))
    }

    pub fn contains(&self, price: &Decimal) -> bool {
        self.low <= *price && *price <= self.high
    }
}

/// Parse a decimal price without going through floating point
pub fn parse_price(raw: &str) -> ProductResult<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str_exact(trimmed).map_err(|e| {
        ProductError::InvalidPrice(format!("'{}' is not a decimal number ({})", trimmed, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn new_product(id: &str, price: Decimal) -> NewProduct {
        NewProduct {
            product_id: id.to_string(),
            name: "Nexus 7".to_string(),
            unit_price: price,
            description: String::new(),
            manufacturer: "Google".to_string(),
            category: "Tablet".to_string(),
            units_in_stock: 10,
            condition: "New".to_string(),
            language: "English".to_string(),
        }
    }

    #[test]
    fn test_new_product_starts_without_orders() {
        let product = Product::new(new_product("P1", Decimal::new(300, 0)));
        assert_eq!(product.units_in_order(), 0);
        assert!(!product.is_discontinued());
    }

    #[test]
    fn test_product_id_must_match_pattern() {
        assert!(new_product("P1236", Decimal::ONE).validate().is_ok());

        let errors = new_product("X1", Decimal::ONE).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("product_id"));
    }

    #[test]
    fn test_name_length_is_checked() {
        let mut input = new_product("P1", Decimal::ONE);
        input.name = "TV".to_string();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_unit_price_rules() {
        assert!(new_product("P1", Decimal::ZERO).validate().is_ok());
        assert!(new_product("P1", Decimal::new(99_999_999_99, 2)).validate().is_ok());
        assert!(new_product("P1", Decimal::new(-1, 2)).validate().is_err());
        assert!(new_product("P1", Decimal::new(1_001, 3)).validate().is_err());
        assert!(new_product("P1", Decimal::new(100_000_000, 0)).validate().is_err());
        // Trailing zeros do not count towards the fraction limit
        assert!(new_product("P1", Decimal::new(1_500, 3)).validate().is_ok());
    }

    #[test]
    fn test_attribute_names_round_trip() {
        for attribute in ProductAttribute::iter() {
            let parsed: ProductAttribute = attribute.to_string().parse().unwrap();
            assert_eq!(parsed, attribute);
        }
        assert_eq!(ProductAttribute::UnitsInStock.to_string(), "unitsInStock");
        assert!("brand".parse::<ProductAttribute>().is_err());
    }

    #[test]
    fn test_attribute_schema_lists_camel_case_names() {
        use utoipa::PartialSchema;

        let schema = serde_json::to_value(ProductAttribute::schema()).unwrap();
        let names: Vec<_> = schema["enum"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        let expected: Vec<_> = ProductAttribute::iter().map(|a| a.to_string()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_attribute_values_render_as_strings() {
        let product =
            Product::new(new_product("P1", Decimal::ONE)).with_order_state(3, false);
        assert_eq!(ProductAttribute::UnitsInStock.value_of(&product), "10");
        assert_eq!(ProductAttribute::UnitsInOrder.value_of(&product), "3");
        assert_eq!(ProductAttribute::Manufacturer.value_of(&product), "Google");
    }

    #[test]
    fn test_filter_from_raw_ignores_unknown_keys() {
        let raw = HashMap::from([
            ("category".to_string(), vec!["Tablet".to_string()]),
            ("brand".to_string(), vec!["Google".to_string()]),
        ]);
        let filter = ProductFilter::from_raw(raw);

        assert_eq!(filter.criteria().len(), 1);
        assert!(filter.criteria().contains_key(&ProductAttribute::Category));
    }

    #[test]
    fn test_filter_and_across_or_within() {
        let product = Product::new(new_product("P1", Decimal::ONE));

        let matching = ProductFilter::new()
            .with(ProductAttribute::Category, ["Laptop", "Tablet"])
            .with(ProductAttribute::Manufacturer, ["Google"]);
        assert!(matching.matches(&product));

        let wrong_maker = ProductFilter::new()
            .with(ProductAttribute::Category, ["Tablet"])
            .with(ProductAttribute::Manufacturer, ["Apple"]);
        assert!(!wrong_maker.matches(&product));

        assert!(ProductFilter::new().matches(&product));
        assert!(!ProductFilter::new()
            .with(ProductAttribute::Language, Vec::<String>::new())
            .matches(&product));
    }

    #[test]
    fn test_price_range_is_closed() {
        let range = PriceRange::parse("5", "15.00").unwrap();
        assert!(range.contains(&Decimal::new(5, 0)));
        assert!(range.contains(&Decimal::new(1500, 2)));
        assert!(!range.contains(&Decimal::new(499, 2)));
        assert!(!range.contains(&Decimal::new(1501, 2)));
    }

    #[test]
    fn test_parse_price_rejects_garbage() {
        let err = parse_price("abc").unwrap_err();
        assert!(matches!(err, ProductError::InvalidPrice(_)));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_product_serializes_camel_case_with_string_price() {
        let product = Product::new(new_product("P1", Decimal::new(30000, 2)));
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["productId"], "P1");
        assert_eq!(json["unitPrice"], "300.00");
        assert_eq!(json["unitsInOrder"], 0);
        assert_eq!(json["discontinued"], false);
    }
}
