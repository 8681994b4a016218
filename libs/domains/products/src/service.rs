//! Product Service - Business logic layer

use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::ProductResult;
use crate::models::{NewProduct, PriceRange, Product, ProductFilter};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Read operations pass straight through to the repository. The service adds
/// input validation on the write path and the category × manufacturer × price
/// intersection.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_all_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.get_all_products().await
    }

    #[instrument(skip(self))]
    pub async fn get_product_by_id(&self, product_id: &str) -> ProductResult<Product> {
        self.repository.get_product_by_id(product_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_products_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        self.repository.get_products_by_category(category).await
    }

    #[instrument(skip(self))]
    pub async fn get_products_by_manufacturer(
        &self,
        manufacturer: &str,
    ) -> ProductResult<Vec<Product>> {
        self.repository
            .get_products_by_manufacturer(manufacturer)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_products_by_price(&self, range: PriceRange) -> ProductResult<Vec<Product>> {
        self.repository.get_products_by_price(range).await
    }

    #[instrument(skip(self))]
    pub async fn get_products_by_filter(
        &self,
        filter: ProductFilter,
    ) -> ProductResult<HashSet<Product>> {
        self.repository.get_products_by_filter(filter).await
    }

    /// Products that are in `category`, made by `manufacturer` and priced
    /// inside `range`, in catalog order
    #[instrument(skip(self))]
    pub async fn filter_products(
        &self,
        category: &str,
        manufacturer: &str,
        range: PriceRange,
    ) -> ProductResult<Vec<Product>> {
        let (by_category, by_manufacturer, by_price) = tokio::try_join!(
            self.repository.get_products_by_category(category),
            self.repository.get_products_by_manufacturer(manufacturer),
            self.repository.get_products_by_price(range),
        )?;

        let manufacturer_ids = product_ids(&by_manufacturer);
        let price_ids = product_ids(&by_price);

        Ok(by_category
            .into_iter()
            .filter(|p| {
                manufacturer_ids.contains(p.product_id.as_str())
                    && price_ids.contains(p.product_id.as_str())
            })
            .collect())
    }

    /// Validate and insert a new product
    ///
    /// The id is claimed atomically by the insert, so of two concurrent adds
    /// with the same id exactly one succeeds.
    #[instrument(skip(self, input), fields(product_id = %input.product_id))]
    pub async fn add_product(&self, input: NewProduct) -> ProductResult<Product> {
        input.validate()?;

        let product = Product::new(input);
        self.repository.add_product(product.clone()).await?;
        Ok(product)
    }

    /// Take back a product whose add could not be completed
    #[instrument(skip(self))]
    pub async fn remove_product(&self, product_id: &str) -> ProductResult<Product> {
        self.repository.remove_product(product_id).await
    }

    #[instrument(skip(self))]
    pub async fn catalog_size(&self) -> ProductResult<usize> {
        self.repository.count().await
    }
}

fn product_ids(products: &[Product]) -> HashSet<&str> {
    products.iter().map(|p| p.product_id.as_str()).collect()
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
