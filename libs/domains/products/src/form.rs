//! Binding of the add-product multipart form
//!
//! Only the fields of [`NewProduct`] and the two attachments are bound.
//! `unitsInOrder` and `discontinued` are store-managed, so a form that sends
//! either one is rejected as a whole. Any other field is ignored.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;

use crate::attachments::AttachmentKind;
use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, parse_price};

const DISALLOWED_FIELDS: [&str; 2] = ["unitsInOrder", "discontinued"];

const TEXT_FIELDS: [&str; 9] = [
    "productId",
    "name",
    "unitPrice",
    "description",
    "manufacturer",
    "category",
    "unitsInStock",
    "condition",
    "language",
];

/// Raw add-product form as received
#[derive(Debug, Default)]
pub struct ProductForm {
    text: HashMap<String, String>,
    image: Option<Bytes>,
    manual: Option<Bytes>,
    disallowed: Vec<String>,
}

/// A bound form: the product input plus its optional attachments
#[derive(Debug)]
pub struct ProductUpload {
    pub product: NewProduct,
    pub image: Option<Bytes>,
    pub manual: Option<Bytes>,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every field of a multipart body
    pub async fn from_multipart(mut multipart: Multipart) -> ProductResult<Self> {
        let mut form = Self::new();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if let Some(kind) = attachment_kind(&name) {
                let contents = field.bytes().await.map_err(multipart_error)?;
                form.insert_file(kind, contents);
            } else if TEXT_FIELDS.contains(&name.as_str()) {
                let value = field.text().await.map_err(multipart_error)?;
                form.insert_text(&name, value);
            } else {
                // Dropped unread; the next call to `next_field` skips its body
                form.skip_field(&name);
            }
        }

        Ok(form)
    }

    /// Record a text field
    pub fn insert_text(&mut self, name: &str, value: impl Into<String>) {
        if TEXT_FIELDS.contains(&name) {
            self.text.insert(name.to_string(), value.into());
        } else {
            self.skip_field(name);
        }
    }

    /// Note a field whose value is not bound
    pub fn skip_field(&mut self, name: &str) {
        if DISALLOWED_FIELDS.contains(&name) {
            if !self.disallowed.iter().any(|field| field == name) {
                self.disallowed.push(name.to_string());
            }
        } else {
            tracing::debug!(field = %name, "Ignoring unknown form field");
        }
    }

    /// Record an uploaded file
    pub fn insert_file(&mut self, kind: AttachmentKind, contents: Bytes) {
        match kind {
            AttachmentKind::Image => self.image = Some(contents),
            AttachmentKind::Manual => self.manual = Some(contents),
        }
    }

    /// Bind the collected fields
    ///
    /// # Errors
    /// - `DisallowedFields` if a store-managed field was submitted
    /// - `Validation` if `unitPrice` is missing or `unitsInStock` is not a number
    /// - `InvalidPrice` if `unitPrice` is not a decimal
    pub fn into_upload(mut self) -> ProductResult<ProductUpload> {
        if !self.disallowed.is_empty() {
            return Err(ProductError::DisallowedFields(self.disallowed));
        }

        let unit_price = match self.text.remove("unitPrice") {
            Some(raw) => parse_price(&raw)?,
            None => return Err(ProductError::Validation("unitPrice is required".to_string())),
        };

        let units_in_stock = match self.text.remove("unitsInStock") {
            Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|_| {
                ProductError::Validation(format!("unitsInStock '{}' is not a valid count", raw))
            })?,
            _ => 0,
        };

        let mut take = |key: &str| self.text.remove(key).unwrap_or_default();
        let product = NewProduct {
            product_id: take("productId"),
            name: take("name"),
            unit_price,
            description: take("description"),
            manufacturer: take("manufacturer"),
            category: take("category"),
            units_in_stock,
            condition: take("condition"),
            language: take("language"),
        };

        Ok(ProductUpload {
            product,
            image: self.image,
            manual: self.manual,
        })
    }
}

fn attachment_kind(name: &str) -> Option<AttachmentKind> {
    [AttachmentKind::Image, AttachmentKind::Manual]
        .into_iter()
        .find(|kind| kind.field_name() == name)
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ProductError {
    ProductError::Validation(err.body_text())
}
