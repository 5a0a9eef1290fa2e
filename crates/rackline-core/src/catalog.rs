//! # Catalog Model
//!
//! Pure data shaping over products and variants: attaching variant lists to
//! their products and building the nested category → sub-category →
//! product → color → size view used for catalog browsing.
//!
//! Grouping preserves the caller's input order (conventionally category,
//! sub_category, base_name ascending, as produced by the store's catalog
//! listing) and never sorts independently, so the output is deterministic
//! for deterministic input.

use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductWithVariants, Variant};
use crate::DEFAULT_COLOR;

// =============================================================================
// Attaching Variants
// =============================================================================

/// Pairs a product with the variants that belong to it and sums their stock.
///
/// Variants whose `product_id` doesn't match are ignored; an empty match
/// yields `total_stock = 0`. There are no error conditions.
pub fn attach_variants(product: Product, all_variants: &[Variant]) -> ProductWithVariants {
    let variants: Vec<Variant> = all_variants
        .iter()
        .filter(|v| v.product_id == product.id)
        .cloned()
        .collect();

    let total_stock = variants.iter().map(|v| v.stock).sum();

    ProductWithVariants {
        product,
        variants,
        total_stock,
    }
}

/// Builds the full catalog view: every product paired with its variants.
pub fn build_catalog(products: Vec<Product>, variants: Vec<Variant>) -> Vec<ProductWithVariants> {
    products
        .into_iter()
        .map(|p| attach_variants(p, &variants))
        .collect()
}

// =============================================================================
// Grouped Catalog View
// =============================================================================

/// Nested catalog view: category → sub-category → product → color → sizes.
///
/// All levels are order-preserving vectors keyed by their label, mirroring
/// the first-seen order of the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedProducts {
    pub categories: Vec<CategoryGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Category label; "Uncategorized" when the product had none.
    pub category: String,
    pub sub_categories: Vec<SubCategoryGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCategoryGroup {
    /// Sub-category label; "General" when the product had none.
    pub sub_category: String,
    pub products: Vec<GroupedProduct>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedProduct {
    pub product_id: i64,
    pub base_name: String,
    pub price_cents: i64,
    pub description: Option<String>,
    /// Stock summed over every variant of the product.
    pub total_stock: i64,
    pub colors: Vec<ColorGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorGroup {
    /// Color label; "Default" when the variant had none.
    pub color: String,
    /// Stock summed over this color's size entries.
    pub total_stock: i64,
    pub sizes: Vec<SizeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeEntry {
    pub variant_id: i64,
    pub size: Option<String>,
    pub stock: i64,
    /// Effective unit price: base + additional, in cents.
    pub price_cents: i64,
}

/// Groups a catalog into the nested browsing view.
///
/// Missing category/sub-category map to "Uncategorized"/"General"; a
/// variant without a color lands under "Default". Buckets are created in
/// first-seen order and never re-sorted.
pub fn group_products(catalog: &[ProductWithVariants]) -> GroupedProducts {
    let mut grouped = GroupedProducts::default();

    for entry in catalog {
        let product = &entry.product;
        let category_label = product.category_label();
        let sub_label = product.sub_category_label();

        let category = find_or_push(
            &mut grouped.categories,
            |c| c.category == category_label,
            || CategoryGroup {
                category: category_label.to_string(),
                sub_categories: Vec::new(),
            },
        );

        let sub = find_or_push(
            &mut category.sub_categories,
            |s| s.sub_category == sub_label,
            || SubCategoryGroup {
                sub_category: sub_label.to_string(),
                products: Vec::new(),
            },
        );

        let mut colors: Vec<ColorGroup> = Vec::new();
        for variant in &entry.variants {
            let color_label = variant.color.as_deref().unwrap_or(DEFAULT_COLOR);

            let color = find_or_push(
                &mut colors,
                |c| c.color == color_label,
                || ColorGroup {
                    color: color_label.to_string(),
                    total_stock: 0,
                    sizes: Vec::new(),
                },
            );

            color.sizes.push(SizeEntry {
                variant_id: variant.id,
                size: variant.size.clone(),
                stock: variant.stock,
                price_cents: variant.unit_price(product).cents(),
            });
            color.total_stock += variant.stock;
        }

        sub.products.push(GroupedProduct {
            product_id: product.id,
            base_name: product.base_name.clone(),
            price_cents: product.price_cents,
            description: product.description.clone(),
            total_stock: entry.total_stock,
            colors,
        });
    }

    grouped
}

/// Returns a mutable reference to the first matching element, pushing a new
/// one first if none matches. Linear scan; bucket counts are small.
fn find_or_push<'a, T>(
    items: &'a mut Vec<T>,
    matches: impl Fn(&T) -> bool,
    make: impl FnOnce() -> T,
) -> &'a mut T {
    match items.iter().position(|i| matches(i)) {
        Some(idx) => &mut items[idx],
        None => {
            items.push(make());
            let last = items.len() - 1;
            &mut items[last]
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
