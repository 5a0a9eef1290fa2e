//! # CSV Codec
//!
//! Serializes product catalogs and sales history to a flat CSV encoding and
//! parses CSV text back into row records. Pure string handling, no I/O.
//!
//! ## Wire Contract
//! ```text
//! Product export header:
//!   category,sub_category,base_name,color,size,sku,barcode,price,additional_price,stock
//!
//! Sales export header:
//!   date,product_name,category,color,size,quantity,sale_type,discount_amount,total_price,note
//! ```
//!
//! One product row per variant; a variant-less product emits exactly one row
//! with empty variant fields. A field containing a comma, double quote or
//! newline is wrapped in double quotes with internal quotes doubled; every
//! other field is written verbatim. Fields are trimmed on read, not on write.
//!
//! ## Parser Limitation
//! The parser is line-oriented: input is split on newlines before fields are
//! scanned, so a quoted field cannot span physical lines. Embedded newlines
//! survive export (they are quoted) but will not round-trip through this
//! parser. Import columns are matched by lower-cased, underscore-joined
//! header name, so column order is free and unknown columns are ignored.

use std::collections::HashMap;

use crate::money::Money;
use crate::types::{ProductWithVariants, SaleWithDetails};

/// Column order for the product export, also the import vocabulary.
pub const PRODUCT_EXPORT_HEADER: [&str; 10] = [
    "category",
    "sub_category",
    "base_name",
    "color",
    "size",
    "sku",
    "barcode",
    "price",
    "additional_price",
    "stock",
];

/// Column order for the sales export.
pub const SALES_EXPORT_HEADER: [&str; 10] = [
    "date",
    "product_name",
    "category",
    "color",
    "size",
    "quantity",
    "sale_type",
    "discount_amount",
    "total_price",
    "note",
];

// =============================================================================
// Export
// =============================================================================

/// Serializes a catalog to CSV, one row per variant.
///
/// A product with zero variants emits exactly one row with empty variant
/// fields and zero additional price/stock, so the product itself survives a
/// round trip.
pub fn export_products(catalog: &[ProductWithVariants]) -> String {
    let mut rows: Vec<String> = vec![PRODUCT_EXPORT_HEADER.join(",")];

    for entry in catalog {
        let product = &entry.product;
        let category = escape_field(product.category.as_deref().unwrap_or(""));
        let sub_category = escape_field(product.sub_category.as_deref().unwrap_or(""));
        let base_name = escape_field(&product.base_name);
        let price = product.price().to_decimal_string();

        if entry.variants.is_empty() {
            rows.push(
                [
                    category.as_str(),
                    sub_category.as_str(),
                    base_name.as_str(),
                    "",
                    "",
                    "",
                    "",
                    price.as_str(),
                    "0.00",
                    "0",
                ]
                .join(","),
            );
            continue;
        }

        for variant in &entry.variants {
            rows.push(
                [
                    category.as_str(),
                    sub_category.as_str(),
                    base_name.as_str(),
                    escape_field(variant.color.as_deref().unwrap_or("")).as_str(),
                    escape_field(variant.size.as_deref().unwrap_or("")).as_str(),
                    escape_field(variant.sku.as_deref().unwrap_or("")).as_str(),
                    escape_field(variant.barcode.as_deref().unwrap_or("")).as_str(),
                    price.as_str(),
                    variant.additional_price().to_decimal_string().as_str(),
                    variant.stock.to_string().as_str(),
                ]
                .join(","),
            );
        }
    }

    rows.join("\n")
}

/// Serializes a sale history to CSV, one row per sale.
///
/// The date is an ISO-8601 UTC instant with milliseconds. A sale whose
/// product reference no longer resolves renders the name as "Unknown" and
/// the category empty; a missing variant renders empty color/size.
pub fn export_sales(sales: &[SaleWithDetails]) -> String {
    let mut rows: Vec<String> = vec![SALES_EXPORT_HEADER.join(",")];

    for detail in sales {
        let sale = &detail.sale;
        let product_name = detail
            .product
            .as_ref()
            .map(|p| p.base_name.as_str())
            .unwrap_or("Unknown");
        let category = detail
            .product
            .as_ref()
            .and_then(|p| p.category.as_deref())
            .unwrap_or("");
        let color = detail
            .variant
            .as_ref()
            .and_then(|v| v.color.as_deref())
            .unwrap_or("");
        let size = detail
            .variant
            .as_ref()
            .and_then(|v| v.size.as_deref())
            .unwrap_or("");

        rows.push(
            [
                sale.created_at
                    .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
                    .as_str(),
                escape_field(product_name).as_str(),
                escape_field(category).as_str(),
                escape_field(color).as_str(),
                escape_field(size).as_str(),
                sale.quantity.to_string().as_str(),
                sale.sale_type.as_str(),
                sale.discount().to_decimal_string().as_str(),
                sale.total().to_decimal_string().as_str(),
                escape_field(sale.note.as_deref().unwrap_or("")).as_str(),
            ]
            .join(","),
        );
    }

    rows.join("\n")
}

/// Wraps a field in double quotes (doubling internal quotes) when it
/// contains a comma, quote or newline; otherwise returns it verbatim.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

// =============================================================================
// Parse
// =============================================================================

/// One parsed CSV row: values keyed by normalized header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvRecord {
    fields: HashMap<String, String>,
}

impl CsvRecord {
    /// Returns the value for a normalized column name, or "" when the
    /// column was absent from the header.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }
}

/// Parses CSV text into row records.
///
/// The first line is the header; its names are lower-cased with spaces
/// replaced by underscores before keying. Values missing for trailing
/// columns default to empty strings. Header-only or empty input yields zero
/// rows — never an error.
pub fn parse_rows(content: &str) -> Vec<CsvRecord> {
    let lines: Vec<&str> = content.trim().split('\n').collect();
    if lines.len() < 2 {
        return Vec::new();
    }

    let headers: Vec<String> = parse_line(lines[0])
        .into_iter()
        .map(|h| normalize_header(&h))
        .collect();

    let mut rows = Vec::with_capacity(lines.len() - 1);
    for line in &lines[1..] {
        let values = parse_line(line);
        let mut fields = HashMap::with_capacity(headers.len());

        for (index, header) in headers.iter().enumerate() {
            let value = values.get(index).cloned().unwrap_or_default();
            fields.insert(header.clone(), value);
        }

        rows.push(CsvRecord { fields });
    }

    rows
}

/// Lower-cases a header cell and joins words with underscores.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Splits a single physical line into fields, honouring quoted commas and
/// doubled-quote escapes. Each field is trimmed.
fn parse_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                values.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    values.push(current.trim().to_string());
    values
}

// =============================================================================
// Typed Product Rows
// =============================================================================

/// The ten product-import columns of one row, as raw strings.
///
/// Numeric columns stay strings here; the import reconciler owns the
/// "invalid number means zero" fallback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRow {
    pub category: String,
    pub sub_category: String,
    pub base_name: String,
    pub color: String,
    pub size: String,
    pub sku: String,
    pub barcode: String,
    pub price: String,
    pub additional_price: String,
    pub stock: String,
}

impl ProductRow {
    /// Projects the product columns out of a parsed record. Columns absent
    /// from the header come through as empty strings.
    pub fn from_record(record: &CsvRecord) -> Self {
        ProductRow {
            category: record.get("category").to_string(),
            sub_category: record.get("sub_category").to_string(),
            base_name: record.get("base_name").to_string(),
            color: record.get("color").to_string(),
            size: record.get("size").to_string(),
            sku: record.get("sku").to_string(),
            barcode: record.get("barcode").to_string(),
            price: record.get("price").to_string(),
            additional_price: record.get("additional_price").to_string(),
            stock: record.get("stock").to_string(),
        }
    }

    /// Price in cents; invalid or empty parses as zero.
    pub fn price_cents(&self) -> i64 {
        Money::parse_decimal(&self.price).unwrap_or_default().cents()
    }

    /// Additional price in cents; invalid or empty parses as zero.
    pub fn additional_price_cents(&self) -> i64 {
        Money::parse_decimal(&self.additional_price)
            .unwrap_or_default()
            .cents()
    }

    /// Stock count; invalid or empty parses as zero.
    pub fn stock_count(&self) -> i64 {
        self.stock.trim().parse().unwrap_or(0)
    }

    /// True when the row carries neither color nor size: a product-only row
    /// that the reconciler skips for variant processing.
    pub fn is_product_only(&self) -> bool {
        self.color.is_empty() && self.size.is_empty()
    }
}

/// Parses CSV text straight into typed product rows.
pub fn parse_product_rows(content: &str) -> Vec<ProductRow> {
    parse_rows(content)
        .iter()
        .map(ProductRow::from_record)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::attach_variants;
    use crate::types::{Product, Sale, SaleType, Variant};
    use chrono::{TimeZone, Utc};

    fn product(id: i64, cat: Option<&str>, name: &str, price_cents: i64) -> Product {
        Product {
            id,
            brand_id: 1,
            category: cat.map(String::from),
            sub_category: Some("Tee".to_string()),
            base_name: name.to_string(),
            description: None,
            price_cents,
            created_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
        }
    }

    fn variant(id: i64, product_id: i64, color: &str, size: &str, stock: i64) -> Variant {
        Variant {
            id,
            product_id,
            color: Some(color.to_string()),
            size: Some(size.to_string()),
            sku: Some(format!("SKU-{id}")),
            barcode: None,
            stock,
            additional_price_cents: 150,
            created_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_product_export_header_and_rows() {
        let variants = vec![variant(10, 1, "Black", "M", 4), variant(11, 1, "White", "L", 2)];
        let catalog = vec![attach_variants(product(1, Some("Tops"), "Crew Tee", 1999), &variants)];

        let csv = export_products(&catalog);
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(
            lines[0],
            "category,sub_category,base_name,color,size,sku,barcode,price,additional_price,stock"
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Tops,Tee,Crew Tee,Black,M,SKU-10,,19.99,1.50,4");
        assert_eq!(lines[2], "Tops,Tee,Crew Tee,White,L,SKU-11,,19.99,1.50,2");
    }

    #[test]
    fn test_variantless_product_emits_one_row() {
        let catalog = vec![attach_variants(product(1, Some("Tops"), "Crew Tee", 1999), &[])];
        let csv = export_products(&catalog);
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Tops,Tee,Crew Tee,,,,,19.99,0.00,0");
    }

    #[test]
    fn test_field_with_comma_round_trips() {
        let mut p = product(1, Some("Tees, Casual"), "Crew Tee", 1000);
        p.sub_category = None;
        let catalog = vec![attach_variants(p, &[])];

        let csv = export_products(&catalog);
        assert!(csv.contains("\"Tees, Casual\""));

        let rows = parse_product_rows(&csv);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "Tees, Casual");
    }

    #[test]
    fn test_field_with_quotes_round_trips() {
        let p = product(1, Some("Say \"hi\""), "Crew Tee", 1000);
        let catalog = vec![attach_variants(p, &[])];

        let csv = export_products(&catalog);
        let rows = parse_product_rows(&csv);
        assert_eq!(rows[0].category, "Say \"hi\"");
    }

    #[test]
    fn test_catalog_round_trip() {
        let variants = vec![variant(10, 1, "Black", "M", 4)];
        let catalog = vec![attach_variants(product(1, Some("Tops"), "Crew Tee", 1999), &variants)];

        let rows = parse_product_rows(&export_products(&catalog));
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.category, "Tops");
        assert_eq!(row.sub_category, "Tee");
        assert_eq!(row.base_name, "Crew Tee");
        assert_eq!(row.color, "Black");
        assert_eq!(row.size, "M");
        assert_eq!(row.sku, "SKU-10");
        assert_eq!(row.barcode, "");
        assert_eq!(row.price_cents(), 1999);
        assert_eq!(row.additional_price_cents(), 150);
        assert_eq!(row.stock_count(), 4);
    }

    #[test]
    fn test_empty_and_header_only_inputs() {
        assert!(parse_rows("").is_empty());
        assert!(parse_rows("   \n  ").is_empty());
        assert!(parse_rows("category,base_name,price").is_empty());
    }

    #[test]
    fn test_header_normalization_and_unknown_columns() {
        let csv = "Base Name,PRICE,Mystery Column\nCrew Tee,12.50,whatever";
        let rows = parse_rows(csv);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("base_name"), "Crew Tee");
        assert_eq!(rows[0].get("price"), "12.50");
        // Unknown columns are carried but ignored by the typed projection;
        // missing expected columns read as empty.
        let typed = ProductRow::from_record(&rows[0]);
        assert_eq!(typed.base_name, "Crew Tee");
        assert_eq!(typed.category, "");
    }

    #[test]
    fn test_short_rows_pad_trailing_columns() {
        let csv = "category,sub_category,base_name\nTops";
        let rows = parse_rows(csv);

        assert_eq!(rows[0].get("category"), "Tops");
        assert_eq!(rows[0].get("sub_category"), "");
        assert_eq!(rows[0].get("base_name"), "");
    }

    #[test]
    fn test_fields_trimmed_on_read() {
        let csv = "category,base_name\n  Tops  ,  Crew Tee ";
        let rows = parse_rows(csv);

        assert_eq!(rows[0].get("category"), "Tops");
        assert_eq!(rows[0].get("base_name"), "Crew Tee");
    }

    #[test]
    fn test_sales_export() {
        let sale = Sale {
            id: 1,
            brand_id: 1,
            product_id: Some(1),
            product_variant_id: Some(10),
            quantity: 2,
            sale_type: SaleType::Discount,
            discount_cents: 200,
            total_cents: 3798,
            note: Some("loyal customer".to_string()),
            created_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
        };
        let detail = SaleWithDetails {
            sale,
            product: Some(product(1, Some("Tops"), "Crew Tee", 1999)),
            variant: Some(variant(10, 1, "Black", "M", 4)),
        };

        let csv = export_sales(&[detail]);
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(
            lines[0],
            "date,product_name,category,color,size,quantity,sale_type,discount_amount,total_price,note"
        );
        assert_eq!(
            lines[1],
            "2026-03-14T09:30:00.000Z,Crew Tee,Tops,Black,M,2,discount,2.00,37.98,loyal customer"
        );
    }

    #[test]
    fn test_sales_export_unknown_references() {
        let sale = Sale {
            id: 1,
            brand_id: 1,
            product_id: None,
            product_variant_id: None,
            quantity: 1,
            sale_type: SaleType::Normal,
            discount_cents: 0,
            total_cents: 500,
            note: None,
            created_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
        };
        let detail = SaleWithDetails {
            sale,
            product: None,
            variant: None,
        };

        let csv = export_sales(&[detail]);
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines[1], "2026-03-14T09:30:00.000Z,Unknown,,,,1,normal,0.00,5.00,");
    }

    #[test]
    fn test_product_only_row_detection() {
        let row = ProductRow {
            base_name: "Crew Tee".to_string(),
            ..Default::default()
        };
        assert!(row.is_product_only());

        let row = ProductRow {
            color: "Black".to_string(),
            ..Default::default()
        };
        assert!(!row.is_product_only());
    }
}
