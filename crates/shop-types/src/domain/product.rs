use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub description: String,
    #[serde(rename = "price", with = "crate::domain::money::dollars")]
    pub price_cents: i64,
    pub images: Vec<String>,
    pub sizes: Vec<f32>,
    pub colors: Vec<String>,
    pub category: String,
    pub featured: bool,
}

/// Product fields accepted on create; the id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "price", with = "crate::domain::money::dollars")]
    pub price_cents: i64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<f32>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub featured: bool,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "price",
        default,
        with = "crate::domain::money::dollars_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// Listing filter. Matching is case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub brand: Option<String>,
}

impl Product {
    pub fn new(new: NewProduct) -> anyhow::Result<Self> {
        let product = Self {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            brand: new.brand,
            description: new.description,
            price_cents: new.price_cents,
            images: new.images,
            sizes: new.sizes,
            colors: new.colors,
            category: new.category,
            featured: new.featured,
        };
        product.validate()?;
        Ok(product)
    }

    /// Returns the patched product without touching `self`, so a failed
    /// validation leaves the stored copy intact.
    pub fn patched(&self, patch: ProductPatch) -> anyhow::Result<Self> {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(brand) = patch.brand {
            next.brand = brand;
        }
        if let Some(description) = patch.description {
            next.description = description;
        }
        if let Some(price) = patch.price_cents {
            next.price_cents = price;
        }
        if let Some(images) = patch.images {
            next.images = images;
        }
        if let Some(sizes) = patch.sizes {
            next.sizes = sizes;
        }
        if let Some(colors) = patch.colors {
            next.colors = colors;
        }
        if let Some(category) = patch.category {
            next.category = category;
        }
        if let Some(featured) = patch.featured {
            next.featured = featured;
        }
        next.validate()?;
        Ok(next)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("product name empty");
        }
        if self.price_cents < 0 {
            anyhow::bail!("product price must be >= 0");
        }
        Ok(())
    }

    /// An empty size list means the product is not sized.
    pub fn offers_size(&self, size: f32) -> bool {
        self.sizes.is_empty() || self.sizes.iter().any(|s| *s == size)
    }

    pub fn offers_color(&self, color: &str) -> bool {
        self.offered_color(color).is_some()
    }

    /// The product's own spelling of `color`, matched case-insensitively.
    /// Uncolored products take the caller's spelling as is.
    pub fn offered_color<'a>(&'a self, color: &'a str) -> Option<&'a str> {
        if self.colors.is_empty() {
            return Some(color);
        }
        self.colors
            .iter()
            .find(|c| c.eq_ignore_ascii_case(color))
            .map(String::as_str)
    }
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| product.category.eq_ignore_ascii_case(c));
        let brand_ok = self
            .brand
            .as_deref()
            .map_or(true, |b| product.brand.eq_ignore_ascii_case(b));
        category_ok && brand_ok
    }
}
