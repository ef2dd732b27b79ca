use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{Result, ScrapeError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderSet(pub BTreeMap<String, String>);

impl HeaderSet {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }
    pub fn with(mut self, k: &str, v: &str) -> Self {
        self.0.insert(k.to_string(), v.to_string());
        self
    }
}

/// One product listing, mapped from the JSON-LD `Product` object on a detail
/// page. Serializes to exactly these six keys, nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_name: String,
    pub brand_name: String,
    pub aggregate_rating: f64,
    pub review_count: u64,
    pub price: f64,
    pub price_currency: String,
}

impl ProductRecord {
    /// Build a record from a JSON-LD object whose `@type` is already known
    /// to be `Product`. A missing or mistyped field is structural: it fails
    /// the extraction rather than degrading to a skip.
    pub fn from_jsonld(url: &str, data: &Value) -> Result<Self> {
        Ok(Self {
            product_name: string_field(url, data, "name")?,
            brand_name: string_field(url, data, "brand.name")?,
            aggregate_rating: f64_field(url, data, "aggregateRating.ratingValue")?,
            review_count: u64_field(url, data, "aggregateRating.reviewCount")?,
            price: f64_field(url, data, "offers.price")?,
            price_currency: string_field(url, data, "offers.priceCurrency")?,
        })
    }
}

fn missing(url: &str, field: &'static str) -> ScrapeError {
    ScrapeError::MissingField {
        url: url.to_string(),
        field,
    }
}

/// Walk a dotted path (`"offers.price"`) into the JSON-LD object.
fn field<'a>(url: &str, data: &'a Value, name: &'static str) -> Result<&'a Value> {
    let mut value = data;
    for key in name.split('.') {
        value = value.get(key).ok_or_else(|| missing(url, name))?;
    }
    Ok(value)
}

fn string_field(url: &str, data: &Value, name: &'static str) -> Result<String> {
    field(url, data, name)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| missing(url, name))
}

/// JSON-LD numbers arrive as numbers or numeric strings depending on the
/// page; accept both.
fn f64_field(url: &str, data: &Value, name: &'static str) -> Result<f64> {
    match field(url, data, name)? {
        Value::Number(n) => n.as_f64().ok_or_else(|| missing(url, name)),
        Value::String(s) => s.trim().parse().map_err(|_| missing(url, name)),
        _ => Err(missing(url, name)),
    }
}

fn u64_field(url: &str, data: &Value, name: &'static str) -> Result<u64> {
    match field(url, data, name)? {
        Value::Number(n) => n.as_u64().ok_or_else(|| missing(url, name)),
        // Review counts sometimes render as "1,234".
        Value::String(s) => s
            .trim()
            .replace(',', "")
            .parse()
            .map_err(|_| missing(url, name)),
        _ => Err(missing(url, name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "https://www.flipkart.com/acme-monitor/p/itm1";

    fn product() -> Value {
        json!({
            "@type": "Product",
            "name": "Acme 24in Monitor",
            "brand": { "name": "Acme" },
            "aggregateRating": { "ratingValue": 4.3, "reviewCount": 128 },
            "offers": { "price": "10999", "priceCurrency": "INR" }
        })
    }

    #[test]
    fn maps_all_six_fields() {
        let record = ProductRecord::from_jsonld(URL, &product()).unwrap();
        assert_eq!(record.product_name, "Acme 24in Monitor");
        assert_eq!(record.brand_name, "Acme");
        assert_eq!(record.aggregate_rating, 4.3);
        assert_eq!(record.review_count, 128);
        assert_eq!(record.price, 10999.0);
        assert_eq!(record.price_currency, "INR");
    }

    #[test]
    fn serializes_exactly_six_keys() {
        let record = ProductRecord::from_jsonld(URL, &product()).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 6);
        for key in [
            "product_name",
            "brand_name",
            "aggregate_rating",
            "review_count",
            "price",
            "price_currency",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
    }

    #[test]
    fn accepts_numeric_strings() {
        let mut data = product();
        data["aggregateRating"]["ratingValue"] = json!("4.3");
        data["aggregateRating"]["reviewCount"] = json!("1,234");
        let record = ProductRecord::from_jsonld(URL, &data).unwrap();
        assert_eq!(record.aggregate_rating, 4.3);
        assert_eq!(record.review_count, 1234);
    }

    #[test]
    fn missing_nested_field_is_an_error() {
        let mut data = product();
        data.as_object_mut().unwrap().remove("offers");
        let err = ProductRecord::from_jsonld(URL, &data).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::MissingField {
                field: "offers.price",
                ..
            }
        ));
    }

    #[test]
    fn non_numeric_rating_is_an_error() {
        let mut data = product();
        data["aggregateRating"]["ratingValue"] = json!("great");
        let err = ProductRecord::from_jsonld(URL, &data).unwrap_err();
        assert!(matches!(err, ScrapeError::MissingField { .. }));
    }
}
