//! Matrix parameters embedded in a single path segment.
//!
//! A segment such as `ByCriteria;category=Laptop,Tablet;manufacturer=Google`
//! carries a leading name followed by `;key=v1,v2` pairs. Axum hands the whole
//! segment to the handler through `Path<String>`; [`MatrixParams::parse`] splits it.

use std::collections::HashMap;

/// Multi-valued `key -> [values]` map parsed from a path segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixParams {
    name: String,
    params: HashMap<String, Vec<String>>,
}

impl MatrixParams {
    /// Parse a path segment.
    ///
    /// Repeated keys accumulate values. Empty values inside a comma list are
    /// dropped, pairs without `=` are ignored.
    ///
    /// ```rust
    /// use axum_helpers::MatrixParams;
    ///
    /// let params = MatrixParams::parse("price;low=200;high=400");
    /// assert_eq!(params.name(), "price");
    /// assert_eq!(params.first("low"), Some("200"));
    /// ```
    pub fn parse(segment: &str) -> Self {
        let mut parts = segment.split(';');
        let name = parts.next().unwrap_or_default().trim().to_string();

        let mut params: HashMap<String, Vec<String>> = HashMap::new();
        for pair in parts {
            let Some((key, raw_values)) = pair.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            params.entry(key.to_string()).or_default().extend(
                raw_values
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(String::from),
            );
        }

        Self { name, params }
    }

    /// The segment text before the first `;`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.params.get(key).map(Vec::as_slice)
    }

    /// First value for `key`, if any
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|values| values.first()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn into_map(self) -> HashMap<String, Vec<String>> {
        self.params
    }
}
