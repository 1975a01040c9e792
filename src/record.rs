use serde::Deserialize;

use crate::money::Money;

/// Defines the CSV format for sales data.
///
/// Each field accepts the original column header or one of its English
/// aliases. Column order in the file does not matter.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SalesRecord {
    #[serde(rename = "Название товара", alias = "Product", alias = "Product name")]
    pub product: String,
    #[serde(rename = "Количество продаж", alias = "Quantity", alias = "Quantity sold")]
    pub quantity: u32,
    #[serde(rename = "Общая стоимость", alias = "Revenue", alias = "Total revenue")]
    pub revenue: Money,
}

impl SalesRecord {
    #[must_use]
    pub fn new(product: impl Into<String>, quantity: u32, revenue: Money) -> Self {
        Self {
            product: product.into(),
            quantity,
            revenue,
        }
    }
}

/// A column the loader insists on, with every header name that satisfies it.
pub(crate) struct Column {
    pub(crate) field: &'static str,
    pub(crate) headers: &'static [&'static str],
}

/// Required columns, kept in step with the serde attributes on [`SalesRecord`].
pub(crate) const REQUIRED_COLUMNS: [Column; 3] = [
    Column {
        field: "product",
        headers: &["Название товара", "Product", "Product name"],
    },
    Column {
        field: "quantity",
        headers: &["Количество продаж", "Quantity", "Quantity sold"],
    },
    Column {
        field: "revenue",
        headers: &["Общая стоимость", "Revenue", "Total revenue"],
    },
];
