//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProductDto, ListProductsQuery, Product, ProductDto, ProductFilter, ProductPage,
    UpdateProductDto,
};
use crate::repository::ProductRepository;
use crate::unit_of_work::{UnitOfWork, UnitOfWorkFactory};

/// Product service providing business logic operations
///
/// Every operation runs in its own unit of work. Name checks and the writes
/// they guard happen under the store-wide name lock.
pub struct ProductService<F: UnitOfWorkFactory> {
    factory: Arc<F>,
}

impl<F: UnitOfWorkFactory> ProductService<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory: Arc::new(factory),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create(&self, input: CreateProductDto) -> ProductResult<ProductDto> {
        input.validate()?;

        let uow = self.factory.begin();
        let products = uow.products()?;

        let _names = products.lock_names().await;
        if products.name_exists(&input.name, None).await? {
            return Err(ProductError::DuplicateName(input.name));
        }

        let product = products
            .create(Product::new(input.name, input.category, input.price))
            .await?;
        uow.save_changes().await?;

        Ok(product.into())
    }

    /// Get a non-deleted product by ID
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: Uuid) -> ProductResult<ProductDto> {
        let uow = self.factory.begin();
        uow.products()?
            .get_by_id(id, false)
            .await?
            .map(ProductDto::from)
            .ok_or(ProductError::NotFound(id))
    }

    /// Replace name, category and price of an existing product
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: UpdateProductDto) -> ProductResult<ProductDto> {
        input.validate()?;

        let uow = self.factory.begin();
        let products = uow.products()?;

        let mut existing = products
            .get_by_id(id, false)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let _names = products.lock_names().await;
        if products.name_exists(&input.name, Some(id)).await? {
            return Err(ProductError::DuplicateName(input.name));
        }

        existing.apply_update(input);
        let updated = products.update(existing).await?;
        uow.save_changes().await?;

        // The record can vanish or be deleted between the read and the write
        updated
            .filter(|product| !product.is_deleted)
            .map(ProductDto::from)
            .ok_or(ProductError::NotFound(id))
    }

    /// Soft-delete a product
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ProductResult<()> {
        let uow = self.factory.begin();
        if !uow.products()?.soft_delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        uow.save_changes().await?;
        Ok(())
    }

    /// List products with filters and clamped paging
    #[instrument(skip(self))]
    pub async fn list(&self, query: ListProductsQuery) -> ProductResult<ProductPage> {
        let filter = ProductFilter::from(query);

        let uow = self.factory.begin();
        let (items, total_count) = uow.products()?.list(&filter).await?;

        Ok(ProductPage {
            page_number: filter.page,
            page_size: filter.page_size,
            total_count,
            items: items.into_iter().map(ProductDto::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryDataStore, MockDataStore};
    use crate::unit_of_work::{InMemoryUnitOfWork, InMemoryUnitOfWorkFactory};
    use rust_decimal::Decimal;
    use tokio::sync::Mutex;

    fn service(store: MockDataStore) -> ProductService<InMemoryUnitOfWorkFactory<MockDataStore>> {
        ProductService::new(InMemoryUnitOfWorkFactory::new(Arc::new(store)))
    }

    fn with_name_lock(store: &mut MockDataStore) {
        let lock = Arc::new(Mutex::new(()));
        store
            .expect_name_lock()
            .returning(move || Arc::clone(&lock));
    }

    fn update_dto(name: &str) -> UpdateProductDto {
        UpdateProductDto {
            name: name.to_string(),
            category: "Tools".to_string(),
            price: Decimal::new(1999, 2),
        }
    }

    #[tokio::test]
    async fn test_create_invalid_dto_never_touches_store() {
        let store = MockDataStore::new();
        let result = service(store).create(CreateProductDto::default()).await;

        match result {
            Err(ProductError::Validation(errors)) => {
                let fields = errors.field_errors();
                assert!(fields.contains_key("name"));
                assert!(fields.contains_key("category"));
                assert!(fields.contains_key("price"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_duplicate_name_skips_insert() {
        let mut store = MockDataStore::new();
        with_name_lock(&mut store);
        let existing = Product::new("Widget".into(), "Tools".into(), Decimal::ONE);
        store
            .expect_snapshot()
            .returning(move || vec![existing.clone()]);
        store.expect_insert().never();

        let result = service(store)
            .create(CreateProductDto {
                name: "wIdGeT".into(),
                category: "Tools".into(),
                price: Decimal::ONE,
            })
            .await;

        assert!(matches!(result, Err(ProductError::DuplicateName(name)) if name == "wIdGeT"));
    }

    #[tokio::test]
    async fn test_update_reports_not_found_when_record_vanishes() {
        let mut store = MockDataStore::new();
        with_name_lock(&mut store);
        let existing = Product::new("Widget".into(), "Tools".into(), Decimal::ONE);
        let id = existing.id;
        let fetched = existing.clone();
        store
            .expect_get()
            .withf(move |requested| *requested == id)
            .returning(move |_| Some(fetched.clone()));
        store
            .expect_snapshot()
            .returning(move || vec![existing.clone()]);
        store.expect_replace().times(1).returning(|_| None);

        let result = service(store).update(id, update_dto("Widget")).await;

        assert!(matches!(result, Err(ProductError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_update_reports_not_found_when_record_deleted_meanwhile() {
        let mut store = MockDataStore::new();
        with_name_lock(&mut store);
        let existing = Product::new("Widget".into(), "Tools".into(), Decimal::ONE);
        let id = existing.id;
        let fetched = existing.clone();
        store.expect_get().returning(move |_| Some(fetched.clone()));
        store
            .expect_snapshot()
            .returning(move || vec![existing.clone()]);
        store.expect_replace().times(1).returning(|mut product| {
            product.is_deleted = true;
            Some(product)
        });

        let result = service(store).update(id, update_dto("Gadget")).await;

        assert!(matches!(result, Err(ProductError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let mut store = MockDataStore::new();
        store.expect_get().returning(|_| None);
        store.expect_replace().never();

        let id = Uuid::new_v4();
        let result = service(store).update(id, update_dto("Widget")).await;

        assert!(matches!(result, Err(ProductError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_update_deleted_record_is_not_found() {
        let mut store = MockDataStore::new();
        let mut deleted = Product::new("Widget".into(), "Tools".into(), Decimal::ONE);
        deleted.is_deleted = true;
        let id = deleted.id;
        store.expect_get().returning(move |_| Some(deleted.clone()));

        let result = service(store).update(id, update_dto("Widget")).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let mut store = MockDataStore::new();
        store.expect_mark_deleted().returning(|_| false);

        let result = service(store).delete(Uuid::new_v4()).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_reports_clamped_paging() {
        let mut store = MockDataStore::new();
        store.expect_snapshot().returning(Vec::new);

        let page = service(store)
            .list(ListProductsQuery {
                page: -5,
                page_size: 1000,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, 100);
        assert_eq!(page.total_count, 0);
        assert!(page.items.is_empty());
    }

    /// Hands out units that were released before the service sees them
    struct DisposedUnits(InMemoryUnitOfWorkFactory<InMemoryDataStore>);

    impl UnitOfWorkFactory for DisposedUnits {
        type Unit = InMemoryUnitOfWork<InMemoryDataStore>;

        fn begin(&self) -> Self::Unit {
            let unit = self.0.begin();
            unit.dispose();
            unit
        }
    }

    #[tokio::test]
    async fn test_every_operation_fails_on_a_disposed_unit() {
        let service = ProductService::new(DisposedUnits(InMemoryUnitOfWorkFactory::new(
            Arc::new(InMemoryDataStore::new()),
        )));
        let id = Uuid::new_v4();

        let created = service
            .create(CreateProductDto {
                name: "Widget".into(),
                category: "Tools".into(),
                price: Decimal::ONE,
            })
            .await;
        assert!(matches!(created, Err(ProductError::Disposed)));
        assert!(matches!(service.get_by_id(id).await, Err(ProductError::Disposed)));
        assert!(matches!(
            service.update(id, update_dto("Widget")).await,
            Err(ProductError::Disposed)
        ));
        assert!(matches!(service.delete(id).await, Err(ProductError::Disposed)));
        assert!(matches!(
            service.list(ListProductsQuery::default()).await,
            Err(ProductError::Disposed)
        ));
    }
}
