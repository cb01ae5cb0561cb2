//! # Catalog Source
//!
//! Where product lookups are answered from.
//!
//! The database catalog is authoritative once it holds any products. A
//! fresh install with an empty `products` table serves the built-in launch
//! catalog instead, so browsing and cart commands work before `admin seed`.

use bazaar_core::{Product, ProductFilter, StaticCatalog};
use bazaar_db::{DbResult, ProductRepository};
use tracing::info;

#[derive(Debug, Clone)]
pub enum CatalogSource {
    Database(ProductRepository),
    Static(StaticCatalog),
}

impl CatalogSource {
    /// Picks the database catalog if it has products, else the launch catalog.
    pub async fn resolve(repo: ProductRepository) -> DbResult<Self> {
        if repo.count().await? > 0 {
            Ok(CatalogSource::Database(repo))
        } else {
            info!("Product table is empty, serving the launch catalog");
            Ok(CatalogSource::Static(StaticCatalog::seeded()))
        }
    }

    pub async fn get_product(&self, id: &str) -> DbResult<Option<Product>> {
        match self {
            CatalogSource::Database(repo) => repo.get_by_id(id).await,
            CatalogSource::Static(catalog) => Ok(catalog.get_product(id).cloned()),
        }
    }

    pub async fn list_products(&self, filter: &ProductFilter) -> DbResult<Vec<Product>> {
        match self {
            CatalogSource::Database(repo) => repo.list(filter).await,
            CatalogSource::Static(catalog) => Ok(catalog.list_products(filter)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::catalog::mock_products;
    use bazaar_core::Money;
    use bazaar_db::{Database, DbConfig};

    #[tokio::test]
    async fn test_empty_database_falls_back_to_launch_catalog() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let source = CatalogSource::resolve(db.products()).await.unwrap();

        assert!(matches!(source, CatalogSource::Static(_)));
        assert!(source.get_product("1").await.unwrap().is_some());
        let all = source.list_products(&ProductFilter::default()).await.unwrap();
        assert_eq!(all.len(), mock_products().len());
    }

    #[tokio::test]
    async fn test_populated_database_is_authoritative() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products()
            .upsert(&Product::new("only", "Only Thing", Money::from_major(10)).with_category("Books"))
            .await
            .unwrap();

        let source = CatalogSource::resolve(db.products()).await.unwrap();
        assert!(matches!(source, CatalogSource::Database(_)));
        assert!(source.get_product("1").await.unwrap().is_none());
        assert!(source.get_product("only").await.unwrap().is_some());
    }
}
