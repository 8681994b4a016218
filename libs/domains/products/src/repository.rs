use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{PriceRange, Product, ProductFilter};

/// Repository trait for the product catalog
///
/// Read queries return an empty collection when nothing matches; only
/// [`get_product_by_id`](ProductRepository::get_product_by_id) reports a miss
/// as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products in insertion order
    async fn get_all_products(&self) -> ProductResult<Vec<Product>>;

    /// Get a product by ID
    async fn get_product_by_id(&self, product_id: &str) -> ProductResult<Product>;

    /// Products whose category equals `category` (case-sensitive)
    async fn get_products_by_category(&self, category: &str) -> ProductResult<Vec<Product>>;

    /// Products whose manufacturer equals `manufacturer` (case-sensitive)
    async fn get_products_by_manufacturer(&self, manufacturer: &str)
    -> ProductResult<Vec<Product>>;

    /// Products priced inside the closed range
    async fn get_products_by_price(&self, range: PriceRange) -> ProductResult<Vec<Product>>;

    /// Products matching every attribute of the filter
    async fn get_products_by_filter(&self, filter: ProductFilter)
    -> ProductResult<HashSet<Product>>;

    /// Insert a new product. Fails if the id is taken.
    async fn add_product(&self, product: Product) -> ProductResult<()>;

    /// Remove a product and return it
    async fn remove_product(&self, product_id: &str) -> ProductResult<Product>;

    /// Number of products in the catalog
    async fn count(&self) -> ProductResult<usize>;
}

#[derive(Debug, Default)]
struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    fn insert(&mut self, product: Product) -> ProductResult<()> {
        if self.index.contains_key(&product.product_id) {
            return Err(ProductError::DuplicateId(product.product_id));
        }
        self.index
            .insert(product.product_id.clone(), self.products.len());
        self.products.push(product);
        Ok(())
    }

    fn remove(&mut self, product_id: &str) -> Option<Product> {
        let position = self.index.remove(product_id)?;
        let product = self.products.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(product)
    }

    fn select<F>(&self, predicate: F) -> Vec<Product>
    where
        F: Fn(&Product) -> bool,
    {
        self.products
            .iter()
            .filter(|p| predicate(p))
            .cloned()
            .collect()
    }
}

/// In-memory implementation of ProductRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    catalog: Arc<RwLock<Catalog>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository pre-populated with `products`
    pub fn with_products<I>(products: I) -> ProductResult<Self>
    where
        I: IntoIterator<Item = Product>,
    {
        let mut catalog = Catalog::default();
        for product in products {
            catalog.insert(product)?;
        }
        Ok(Self {
            catalog: Arc::new(RwLock::new(catalog)),
        })
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_all_products(&self) -> ProductResult<Vec<Product>> {
        let catalog = self.catalog.read().await;
        Ok(catalog.products.clone())
    }

    async fn get_product_by_id(&self, product_id: &str) -> ProductResult<Product> {
        let catalog = self.catalog.read().await;
        catalog
            .index
            .get(product_id)
            .and_then(|&position| catalog.products.get(position))
            .cloned()
            .ok_or_else(|| ProductError::NotFound(product_id.to_string()))
    }

    async fn get_products_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        let catalog = self.catalog.read().await;
        Ok(catalog.select(|p| p.category == category))
    }

    async fn get_products_by_manufacturer(
        &self,
        manufacturer: &str,
    ) -> ProductResult<Vec<Product>> {
        let catalog = self.catalog.read().await;
        Ok(catalog.select(|p| p.manufacturer == manufacturer))
    }

    async fn get_products_by_price(&self, range: PriceRange) -> ProductResult<Vec<Product>> {
        let catalog = self.catalog.read().await;
        Ok(catalog.select(|p| range.contains(&p.unit_price)))
    }

    async fn get_products_by_filter(
        &self,
        filter: ProductFilter,
    ) -> ProductResult<HashSet<Product>> {
        let catalog = self.catalog.read().await;
        Ok(catalog
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn add_product(&self, product: Product) -> ProductResult<()> {
        let mut catalog = self.catalog.write().await;
        let product_id = product.product_id.clone();
        catalog.insert(product)?;

        tracing::info!(product_id = %product_id, "Added product");
        Ok(())
    }

    async fn remove_product(&self, product_id: &str) -> ProductResult<Product> {
        let mut catalog = self.catalog.write().await;
        let product = catalog
            .remove(product_id)
            .ok_or_else(|| ProductError::NotFound(product_id.to_string()))?;

        tracing::info!(product_id = %product_id, "Removed product");
        Ok(product)
    }

    async fn count(&self) -> ProductResult<usize> {
        let catalog = self.catalog.read().await;
        Ok(catalog.products.len())
    }
}
