//! Catalog service.
//!
//! Owns product validation and the ownership rules: every write is scoped
//! to the creating administrator, and a wrong owner looks exactly like a
//! missing product.

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use url::Url;

use tradepost_core::{AdminId, ProductId};

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::{
    Product,
    product::{NewProduct, ProductPatch},
};

const PRODUCT_NAME_LENGTH: std::ops::RangeInclusive<usize> = 5..=50;
const DESCRIPTION_LENGTH: std::ops::RangeInclusive<usize> = 10..=500;
const CATEGORY_LENGTH: std::ops::RangeInclusive<usize> = 5..=20;

/// Create-product request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub product_name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub stock: i32,
    pub image_url: String,
}

/// Update-product request body: any subset of fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
}

/// Catalog service.
pub struct CatalogService<'a> {
    products: ProductRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool),
        }
    }

    /// List the administrator's own products.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` when the administrator owns no products
    /// (an empty catalog is distinguished from transport failure).
    pub async fn list(&self, admin_id: AdminId) -> Result<Vec<Product>> {
        let products = self.products.list_by_creator(admin_id).await?;

        if products.is_empty() {
            return Err(AppError::NotFound(
                "No products found for the admin".to_owned(),
            ));
        }

        Ok(products)
    }

    /// Validate and create a product owned by `admin_id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if any field constraint is unmet.
    pub async fn create(
        &self,
        admin_id: AdminId,
        request: CreateProductRequest,
    ) -> Result<Product> {
        let fields = validate_new_product(request)?;
        Ok(self.products.create(admin_id, &fields).await?)
    }

    /// Validate and apply a partial update, scoped by `(id, creator_id)`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if a supplied field is invalid, and
    /// `AppError::NotFound` when no product matches — a wrong owner is
    /// deliberately indistinguishable from a wrong id.
    pub async fn update(
        &self,
        admin_id: AdminId,
        product_id: ProductId,
        request: UpdateProductRequest,
    ) -> Result<Product> {
        let patch = validate_product_patch(request)?;

        self.products
            .update(admin_id, product_id, &patch)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))
    }

    /// Delete the product, but only if `admin_id` owns it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` when no owned product matches.
    pub async fn delete(&self, admin_id: AdminId, product_id: ProductId) -> Result<Product> {
        self.products
            .delete(admin_id, product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))
    }
}

fn validate_new_product(request: CreateProductRequest) -> Result<NewProduct> {
    check_length("productName", &request.product_name, PRODUCT_NAME_LENGTH)?;
    check_length("description", &request.description, DESCRIPTION_LENGTH)?;
    check_price(request.price)?;
    check_length("category", &request.category, CATEGORY_LENGTH)?;
    check_stock(request.stock)?;
    check_image_url(&request.image_url)?;

    Ok(NewProduct {
        product_name: request.product_name,
        description: request.description,
        price: request.price,
        category: request.category,
        stock: request.stock,
        image_url: request.image_url,
    })
}

fn validate_product_patch(request: UpdateProductRequest) -> Result<ProductPatch> {
    if let Some(name) = &request.product_name {
        check_length("productName", name, PRODUCT_NAME_LENGTH)?;
    }
    if let Some(description) = &request.description {
        check_length("description", description, DESCRIPTION_LENGTH)?;
    }
    if let Some(price) = request.price {
        check_price(price)?;
    }
    if let Some(category) = &request.category {
        check_length("category", category, CATEGORY_LENGTH)?;
    }
    if let Some(stock) = request.stock {
        check_stock(stock)?;
    }
    if let Some(image_url) = &request.image_url {
        check_image_url(image_url)?;
    }

    Ok(ProductPatch {
        product_name: request.product_name,
        description: request.description,
        price: request.price,
        category: request.category,
        stock: request.stock,
        image_url: request.image_url,
    })
}

fn check_length(
    field: &str,
    value: &str,
    bounds: std::ops::RangeInclusive<usize>,
) -> Result<()> {
    // Bounds count characters, not bytes
    if bounds.contains(&value.chars().count()) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{field}: must be between {} and {} characters",
            bounds.start(),
            bounds.end()
        )))
    }
}

fn check_price(price: Decimal) -> Result<()> {
    if price.is_sign_negative() {
        Err(AppError::Validation(
            "price: must not be negative".to_owned(),
        ))
    } else {
        Ok(())
    }
}

fn check_stock(stock: i32) -> Result<()> {
    if stock < 0 {
        Err(AppError::Validation(
            "stock: must be a non-negative integer".to_owned(),
        ))
    } else {
        Ok(())
    }
}

fn check_image_url(image_url: &str) -> Result<()> {
    Url::parse(image_url)
        .map(|_| ())
        .map_err(|e| AppError::Validation(format!("imageUrl: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateProductRequest {
        CreateProductRequest {
            product_name: "Walnut Desk".to_owned(),
            description: "A sturdy desk made of walnut.".to_owned(),
            price: Decimal::new(19_999, 2),
            category: "furniture".to_owned(),
            stock: 12,
            image_url: "https://cdn.example.com/desk.jpg".to_owned(),
        }
    }

    #[test]
    fn accepts_a_well_formed_product() {
        assert!(validate_new_product(create_request()).is_ok());
    }

    #[test]
    fn rejects_field_bounds_violations() {
        let mut short_name = create_request();
        short_name.product_name = "Desk".to_owned();
        assert!(validate_new_product(short_name).is_err());

        let mut short_description = create_request();
        short_description.description = "Too short".to_owned();
        assert!(validate_new_product(short_description).is_err());

        let mut short_category = create_request();
        short_category.category = "misc".to_owned();
        assert!(validate_new_product(short_category).is_err());
    }

    #[test]
    fn length_bounds_count_characters_not_bytes() {
        // 50 characters, 100 bytes: at the top of the name bound
        let mut accented = create_request();
        accented.product_name = "é".repeat(50);
        assert!(validate_new_product(accented).is_ok());

        let mut too_long = create_request();
        too_long.product_name = "é".repeat(51);
        assert!(validate_new_product(too_long).is_err());
    }

    #[test]
    fn rejects_negative_price_and_stock() {
        let mut negative_price = create_request();
        negative_price.price = Decimal::new(-1, 2);
        assert!(validate_new_product(negative_price).is_err());

        let mut negative_stock = create_request();
        negative_stock.stock = -1;
        assert!(validate_new_product(negative_stock).is_err());
    }

    #[test]
    fn rejects_malformed_image_urls() {
        let mut bad_url = create_request();
        bad_url.image_url = "not a url".to_owned();
        assert!(validate_new_product(bad_url).is_err());
    }

    #[test]
    fn empty_patch_is_valid_and_changes_nothing() {
        let patch = validate_product_patch(UpdateProductRequest::default()).expect("patch");
        assert!(patch.is_empty());
    }

    #[test]
    fn patch_validates_each_supplied_field() {
        let bad = UpdateProductRequest {
            price: Some(Decimal::new(-500, 2)),
            ..UpdateProductRequest::default()
        };
        assert!(validate_product_patch(bad).is_err());

        let good = UpdateProductRequest {
            stock: Some(0),
            product_name: Some("Standing Desk".to_owned()),
            ..UpdateProductRequest::default()
        };
        let patch = validate_product_patch(good).expect("patch");
        assert_eq!(patch.stock, Some(0));
        assert!(!patch.is_empty());
    }
}
