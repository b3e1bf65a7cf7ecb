//! Form schemas for admin mutations.
//!
//! Every mutation form arrives as raw strings. A [`FormSchema`] turns the raw
//! payload into the strongly-typed input the services accept, or into a
//! per-field error map. Nothing reaches the store before validation passes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use crate::entities::OrderStatus;

/// Field name → messages, serialized as `{"name": ["Name is required"]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

/// A raw form payload that knows how to validate itself
pub trait FormSchema {
    type Output;

    fn validate(self) -> Result<Self::Output, FieldErrors>;
}

// -----------------------------
// 字段校验工具
// -----------------------------

fn required(errors: &mut FieldErrors, field: &str, value: Option<String>, message: &str) -> String {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => v,
        _ => {
            errors.add(field, message);
            String::new()
        }
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// HTML checkbox semantics: only the literal `"true"` is true
fn flag(value: Option<&str>) -> bool {
    value == Some("true")
}

// -----------------------------
// Category
// -----------------------------

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl FormSchema for CategoryForm {
    type Output = CategoryInput;

    fn validate(self) -> Result<CategoryInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = required(&mut errors, "name", self.name, "Name is required");
        let description = optional(self.description);
        let image_url = optional(self.image_url);
        if let Some(url) = &image_url
            && !is_valid_url(url)
        {
            errors.add("imageUrl", "Image URL must be a valid URL");
        }
        errors.into_result(CategoryInput {
            name,
            description,
            image_url,
        })
    }
}

// -----------------------------
// Product
// -----------------------------

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub volume: Option<String>,
    pub in_stock: Option<String>,
    pub featured: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    /// so'm
    pub price: i64,
    pub image_url: String,
    pub category_id: i32,
    pub brand: String,
    pub volume: String,
    pub in_stock: bool,
    pub featured: bool,
}

fn parse_price(errors: &mut FieldErrors, raw: Option<String>) -> i64 {
    let Some(raw) = optional(raw) else {
        errors.add("price", "Price is required");
        return 0;
    };
    match raw.parse::<i64>() {
        Ok(price) if price >= 0 => price,
        Ok(_) => {
            errors.add("price", "Price must be a positive number");
            0
        }
        Err(_) => {
            match raw.parse::<f64>() {
                Ok(v) if v.is_finite() && v < 0.0 => {
                    errors.add("price", "Price must be a positive number")
                }
                Ok(v) if v.is_finite() => errors.add("price", "Price must be a whole number"),
                _ => errors.add("price", "Expected number"),
            }
            0
        }
    }
}

impl FormSchema for ProductForm {
    type Output = ProductInput;

    fn validate(self) -> Result<ProductInput, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = required(&mut errors, "name", self.name, "Name is required");
        let description = required(
            &mut errors,
            "description",
            self.description,
            "Description is required",
        );
        let price = parse_price(&mut errors, self.price);
        let image_url = match optional(self.image_url) {
            Some(url) if is_valid_url(&url) => url,
            _ => {
                errors.add("imageUrl", "Image URL must be a valid URL");
                String::new()
            }
        };
        let category_id = match optional(self.category) {
            Some(raw) => raw.parse::<i32>().unwrap_or_else(|_| {
                errors.add("category", "Invalid category");
                0
            }),
            None => {
                errors.add("category", "Category is required");
                0
            }
        };
        let brand = required(&mut errors, "brand", self.brand, "Brand is required");
        let volume = required(&mut errors, "volume", self.volume, "Volume is required");

        errors.into_result(ProductInput {
            name,
            description,
            price,
            image_url,
            category_id,
            brand,
            volume,
            in_stock: flag(self.in_stock.as_deref()),
            featured: flag(self.featured.as_deref()),
        })
    }
}

// -----------------------------
// Order status
// -----------------------------

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OrderStatusForm {
    pub status: Option<String>,
}

impl FormSchema for OrderStatusForm {
    type Output = OrderStatus;

    fn validate(self) -> Result<OrderStatus, FieldErrors> {
        match optional(self.status) {
            Some(raw) => raw
                .parse::<OrderStatus>()
                .map_err(|_| FieldErrors::single("status", "Invalid order status")),
            None => Err(FieldErrors::single("status", "Status is required")),
        }
    }
}

// -----------------------------
// Payout receipt
// -----------------------------

pub const DEFAULT_RECEIPT_NAME: &str = "image.jpg";

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayoutForm {
    pub name: Option<String>,
    /// http(s) 链接或 data URL
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutReceipt {
    pub name: String,
    pub image_url: String,
}

impl FormSchema for PayoutForm {
    type Output = PayoutReceipt;

    fn validate(self) -> Result<PayoutReceipt, FieldErrors> {
        let mut errors = FieldErrors::new();
        let image_url = match optional(self.image_url) {
            Some(url) if is_valid_url(&url) => url,
            Some(_) => {
                errors.add("imageUrl", "Receipt image must be a URL or data URL");
                String::new()
            }
            None => {
                errors.add("imageUrl", "Receipt image is required");
                String::new()
            }
        };
        let name = optional(self.name).unwrap_or_else(|| DEFAULT_RECEIPT_NAME.to_string());
        errors.into_result(PayoutReceipt { name, image_url })
    }
}
