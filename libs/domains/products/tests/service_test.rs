//! Service tests for the Products domain, run against the in-memory
//! repositories and a temp-dir storage backend.
//!
//! These exercise the observable filter/assembly semantics: predicate
//! behavior, pagination math, the fixed sort order, reference checks, and the
//! image lifecycle around create/delete.

use domain_categories::{Category, CategoryRepository, CreateCategory, InMemoryCategoryRepository};
use domain_products::*;
use domain_suppliers::{CreateSupplier, InMemorySupplierRepository, Supplier, SupplierRepository};
use media::{FileStorage, LocalFileStorage};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

struct Fixture {
    service: ProductService<
        InMemoryProductRepository,
        InMemoryCategoryRepository,
        InMemorySupplierRepository,
    >,
    repo: InMemoryProductRepository,
    categories: InMemoryCategoryRepository,
    suppliers: InMemorySupplierRepository,
    storage: Arc<LocalFileStorage>,
    _dir: tempfile::TempDir,
}

fn fixture() -> Fixture {
    let categories = InMemoryCategoryRepository::new();
    let suppliers = InMemorySupplierRepository::new();
    let repo = InMemoryProductRepository::new(categories.clone(), suppliers.clone());
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(LocalFileStorage::new(dir.path(), "/uploads"));

    let service = ProductService::new(
        repo.clone(),
        Arc::new(categories.clone()),
        Arc::new(suppliers.clone()),
        storage.clone() as Arc<dyn FileStorage>,
    );

    Fixture {
        service,
        repo,
        categories,
        suppliers,
        storage,
        _dir: dir,
    }
}

async fn seed_refs(fx: &Fixture) -> (Category, Supplier) {
    let category = fx
        .categories
        .create(CreateCategory {
            name: "Phones".to_string(),
            description: String::new(),
        })
        .await
        .unwrap();
    let supplier = fx
        .suppliers
        .create(CreateSupplier {
            name: "FPT Trading".to_string(),
            email: None,
            phone_number: None,
            address: None,
        })
        .await
        .unwrap();
    (category, supplier)
}

fn create_input(name: &str, category: &Category, supplier: &Supplier) -> CreateProduct {
    CreateProduct {
        name: name.to_string(),
        price: 100.0,
        discount: 10.0,
        stock: 5,
        description: String::new(),
        category_id: category.id.to_hex(),
        supplier_id: supplier.id.to_hex(),
    }
}

async fn seed_product(
    fx: &Fixture,
    name: &str,
    price: f64,
    discount: f64,
    category: &Category,
    supplier: &Supplier,
) -> Product {
    let input = CreateProduct {
        name: name.to_string(),
        price,
        discount,
        stock: 5,
        description: String::new(),
        category_id: category.id.to_hex(),
        supplier_id: supplier.id.to_hex(),
    };
    fx.service.create_product(input, vec![]).await.unwrap()
}

#[tokio::test]
async fn test_create_product_stores_images_and_record() {
    let fx = fixture();
    let (category, supplier) = seed_refs(&fx).await;

    let files = vec![ProductImageUpload {
        field: "file".to_string(),
        filename: "front view.png".to_string(),
        data: b"pngdata".to_vec(),
    }];

    let product = fx
        .service
        .create_product(create_input("Phone", &category, &supplier), files)
        .await
        .unwrap();

    assert_eq!(product.images.len(), 1);
    assert_eq!(product.images[0].name, "front_view.png");
    assert!(
        fx.storage.exists(&product.images[0].location).await.unwrap(),
        "image file written to storage"
    );

    let detail = fx.service.get_product(&product.id.to_hex()).await.unwrap();
    assert_eq!(detail.name, "Phone");
    assert_eq!(detail.discounted_price, 90.0);
    assert_eq!(detail.category.unwrap().name, "Phones");
    assert_eq!(detail.supplier.unwrap().name, "FPT Trading");
}

#[tokio::test]
async fn test_create_product_lists_every_violated_reference() {
    let fx = fixture();

    let input = CreateProduct {
        name: "Phone".to_string(),
        price: 100.0,
        discount: 0.0,
        stock: 0,
        description: String::new(),
        category_id: ObjectId::new().to_hex(),
        supplier_id: ObjectId::new().to_hex(),
    };

    let result = fx.service.create_product(input, vec![]).await;

    match result {
        Err(ProductError::References(violations)) => {
            assert_eq!(
                violations,
                vec!["Category not found", "Supplier not found"]
            );
        }
        other => panic!("expected reference violations, got {:?}", other.err()),
    }

    // Nothing persisted
    let page = fx
        .service
        .search_products(ProductQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_create_product_rejects_deleted_references() {
    let fx = fixture();
    let (category, supplier) = seed_refs(&fx).await;
    fx.categories.soft_delete(category.id).await.unwrap();

    let result = fx
        .service
        .create_product(create_input("Phone", &category, &supplier), vec![])
        .await;

    match result {
        Err(ProductError::References(violations)) => {
            assert_eq!(violations, vec!["Category is deleted"]);
        }
        other => panic!("expected reference violations, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn test_create_product_duplicate_name() {
    let fx = fixture();
    let (category, supplier) = seed_refs(&fx).await;

    seed_product(&fx, "Phone", 100.0, 0.0, &category, &supplier).await;

    let result = fx
        .service
        .create_product(create_input("Phone", &category, &supplier), vec![])
        .await;

    assert!(matches!(result, Err(ProductError::DuplicateName(_))));
}

#[tokio::test]
async fn test_search_keyword_is_case_insensitive_substring() {
    let fx = fixture();
    let (category, supplier) = seed_refs(&fx).await;

    seed_product(&fx, "Smartphone X", 100.0, 0.0, &category, &supplier).await;
    seed_product(&fx, "PHONE case", 5.0, 0.0, &category, &supplier).await;
    seed_product(&fx, "Laptop", 900.0, 0.0, &category, &supplier).await;

    let page = fx
        .service
        .search_products(ProductQuery {
            keyword: Some("phone".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    let names: Vec<&str> = page.payload.iter().map(|p| p.name.as_str()).collect();
    assert!(names.contains(&"Smartphone X"));
    assert!(names.contains(&"PHONE case"));
}

#[tokio::test]
async fn test_search_excludes_soft_deleted_even_when_matching() {
    let fx = fixture();
    let (category, supplier) = seed_refs(&fx).await;

    let kept = seed_product(&fx, "Phone A", 100.0, 0.0, &category, &supplier).await;
    let mut hidden = Product::new(
        CreateProduct {
            name: "Phone B".to_string(),
            price: 100.0,
            discount: 0.0,
            stock: 0,
            description: String::new(),
            category_id: category.id.to_hex(),
            supplier_id: supplier.id.to_hex(),
        },
        category.id,
        supplier.id,
        vec![],
    );
    hidden.is_deleted = true;
    fx.repo.insert(hidden).await.unwrap();

    let page = fx
        .service
        .search_products(ProductQuery {
            keyword: Some("phone".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.payload[0].id, kept.id.to_hex());
}

#[tokio::test]
async fn test_search_price_range_both_bounds_inclusive() {
    let fx = fixture();
    let (category, supplier) = seed_refs(&fx).await;

    seed_product(&fx, "A", 10.0, 0.0, &category, &supplier).await;
    seed_product(&fx, "B", 20.0, 0.0, &category, &supplier).await;
    seed_product(&fx, "C", 35.0, 0.0, &category, &supplier).await;
    seed_product(&fx, "D", 50.0, 0.0, &category, &supplier).await;
    seed_product(&fx, "E", 51.0, 0.0, &category, &supplier).await;

    let page = fx
        .service
        .search_products(ProductQuery {
            price_start: Some(20.0),
            price_end: Some(50.0),
            ..Default::default()
        })
        .await
        .unwrap();

    let names: Vec<&str> = page.payload.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["B", "C", "D"]);
}

#[tokio::test]
async fn test_search_price_single_bound_is_one_sided() {
    let fx = fixture();
    let (category, supplier) = seed_refs(&fx).await;

    seed_product(&fx, "A", 10.0, 0.0, &category, &supplier).await;
    seed_product(&fx, "B", 20.0, 0.0, &category, &supplier).await;
    seed_product(&fx, "C", 500.0, 0.0, &category, &supplier).await;

    let page = fx
        .service
        .search_products(ProductQuery {
            price_start: Some(20.0),
            ..Default::default()
        })
        .await
        .unwrap();

    // No upper bound: everything from 20 up matches
    let names: Vec<&str> = page.payload.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["B", "C"]);
}

#[tokio::test]
async fn test_search_by_reference_ids() {
    let fx = fixture();
    let (category, supplier) = seed_refs(&fx).await;
    let other_category = fx
        .categories
        .create(CreateCategory {
            name: "Laptops".to_string(),
            description: String::new(),
        })
        .await
        .unwrap();

    seed_product(&fx, "Phone", 100.0, 0.0, &category, &supplier).await;
    seed_product(&fx, "Laptop", 900.0, 0.0, &other_category, &supplier).await;

    let page = fx
        .service
        .search_products(ProductQuery {
            category_id: Some(category.id.to_hex()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.payload[0].name, "Phone");
}

#[tokio::test]
async fn test_search_total_ignores_pagination_count_does_not() {
    let fx = fixture();
    let (category, supplier) = seed_refs(&fx).await;

    for i in 0..30 {
        seed_product(&fx, &format!("P{:02}", i), 10.0, 0.0, &category, &supplier).await;
    }

    let page = fx
        .service
        .search_products(ProductQuery {
            page: Some(2),
            page_size: Some(12),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total, 30);
    assert_eq!(page.count, 12);
    // skip = 12 × (2 − 1)
    assert_eq!(page.payload[0].name, "P12");

    let last = fx
        .service
        .search_products(ProductQuery {
            page: Some(3),
            page_size: Some(12),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(last.total, 30);
    assert_eq!(last.count, 6);
}

#[tokio::test]
async fn test_default_page_size_is_twelve() {
    let fx = fixture();
    let (category, supplier) = seed_refs(&fx).await;

    for i in 0..20 {
        seed_product(&fx, &format!("P{:02}", i), 10.0, 0.0, &category, &supplier).await;
    }

    let page = fx.service.list_page(None, None).await.unwrap();
    assert_eq!(page.total, 20);
    assert_eq!(page.count, 12);
}

#[tokio::test]
async fn test_sort_secondary_keys_only_matter_on_name_ties() {
    let fx = fixture();
    let (category, supplier) = seed_refs(&fx).await;

    // Colliding names with different price/discount
    seed_product(&fx, "Widget", 30.0, 10.0, &category, &supplier).await;
    let tie_a = Product::new(
        CreateProduct {
            name: "Widget".to_string(),
            price: 20.0,
            discount: 5.0,
            stock: 0,
            description: String::new(),
            category_id: category.id.to_hex(),
            supplier_id: supplier.id.to_hex(),
        },
        category.id,
        supplier.id,
        vec![],
    );
    fx.repo.insert(tie_a).await.unwrap();

    let tie_b = Product::new(
        CreateProduct {
            name: "Widget".to_string(),
            price: 20.0,
            discount: 50.0,
            stock: 0,
            description: String::new(),
            category_id: category.id.to_hex(),
            supplier_id: supplier.id.to_hex(),
        },
        category.id,
        supplier.id,
        vec![],
    );
    fx.repo.insert(tie_b).await.unwrap();

    seed_product(&fx, "Adapter", 99.0, 0.0, &category, &supplier).await;

    let page = fx.service.list_page(None, None).await.unwrap();
    let ordered: Vec<(f64, f64)> = page
        .payload
        .iter()
        .map(|p| (p.price, p.discount))
        .collect();

    // Name ascending first: Adapter before the Widgets
    assert_eq!(page.payload[0].name, "Adapter");
    // Within the Widget tie: price ascending, then discount descending
    assert_eq!(ordered[1], (20.0, 50.0));
    assert_eq!(ordered[2], (20.0, 5.0));
    assert_eq!(ordered[3], (30.0, 10.0));
}

#[tokio::test]
async fn test_search_malformed_reference_id_collapses_to_search_failure() {
    let fx = fixture();

    let result = fx
        .service
        .search_products(ProductQuery {
            category_id: Some("definitely-not-an-object-id".to_string()),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(ProductError::SearchFailed)));
}

#[tokio::test]
async fn test_get_product_malformed_id_is_not_found() {
    let fx = fixture();

    let result = fx.service.get_product("garbage").await;
    assert!(matches!(result, Err(ProductError::NotFound)));
}

#[tokio::test]
async fn test_dangling_reference_resolves_to_absent_not_error() {
    let fx = fixture();
    let (category, supplier) = seed_refs(&fx).await;

    // Product whose supplier id points nowhere
    let product = Product::new(
        CreateProduct {
            name: "Orphan".to_string(),
            price: 10.0,
            discount: 0.0,
            stock: 0,
            description: String::new(),
            category_id: category.id.to_hex(),
            supplier_id: supplier.id.to_hex(),
        },
        category.id,
        ObjectId::new(),
        vec![],
    );
    let id = product.id;
    fx.repo.insert(product).await.unwrap();

    let detail = fx.service.get_product(&id.to_hex()).await.unwrap();
    assert!(detail.category.is_some());
    assert!(detail.supplier.is_none(), "dangling ref is absent");
}

#[tokio::test]
async fn test_update_revalidates_only_changed_references() {
    let fx = fixture();
    let (category, supplier) = seed_refs(&fx).await;
    let product = seed_product(&fx, "Phone", 100.0, 0.0, &category, &supplier).await;

    // Same references: no re-validation failure even if pointing at a
    // record that later got soft-deleted
    fx.categories.soft_delete(category.id).await.unwrap();

    let updated = fx
        .service
        .update_product(
            &product.id.to_hex(),
            UpdateProduct {
                name: "Phone v2".to_string(),
                price: 120.0,
                discount: 5.0,
                stock: 2,
                description: "new".to_string(),
                category_id: category.id.to_hex(),
                supplier_id: supplier.id.to_hex(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Phone v2");

    // Changed reference must point at a live record
    let result = fx
        .service
        .update_product(
            &product.id.to_hex(),
            UpdateProduct {
                name: "Phone v3".to_string(),
                price: 120.0,
                discount: 5.0,
                stock: 2,
                description: String::new(),
                category_id: ObjectId::new().to_hex(),
                supplier_id: supplier.id.to_hex(),
            },
        )
        .await;

    match result {
        Err(ProductError::References(violations)) => {
            assert_eq!(violations, vec!["Category not found"]);
        }
        other => panic!("expected reference violations, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn test_delete_removes_record_and_image_files() {
    let fx = fixture();
    let (category, supplier) = seed_refs(&fx).await;

    let files = vec![
        ProductImageUpload {
            field: "file".to_string(),
            filename: "a.png".to_string(),
            data: b"a".to_vec(),
        },
        ProductImageUpload {
            field: "file".to_string(),
            filename: "b.png".to_string(),
            data: b"b".to_vec(),
        },
    ];
    let product = fx
        .service
        .create_product(create_input("Phone", &category, &supplier), files)
        .await
        .unwrap();

    let locations: Vec<String> = product.images.iter().map(|i| i.location.clone()).collect();

    // One image already gone before deletion: the delete must still succeed
    fx.storage.delete(&locations[0]).await.unwrap();

    fx.service.delete_product(&product.id.to_hex()).await.unwrap();

    for location in &locations {
        assert!(!fx.storage.exists(location).await.unwrap());
    }
    // Record is physically gone: even the raw lookup misses
    assert!(fx.repo.get_by_id(product.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_unknown_product_is_not_found() {
    let fx = fixture();

    let result = fx.service.delete_product(&ObjectId::new().to_hex()).await;
    assert!(matches!(result, Err(ProductError::NotFound)));
}

#[tokio::test]
async fn test_seed_products_attaches_live_references() {
    let fx = fixture();
    let (category, supplier) = seed_refs(&fx).await;

    let inserted = fx
        .service
        .seed_products(vec![
            ProductDraft {
                name: "Seed A".to_string(),
                price: 1.0,
                discount: 0.0,
                stock: 1,
                description: String::new(),
            },
            ProductDraft {
                name: "Seed B".to_string(),
                price: 2.0,
                discount: 0.0,
                stock: 1,
                description: String::new(),
            },
        ])
        .await
        .unwrap();

    assert_eq!(inserted, 2);

    let page = fx
        .service
        .search_products(ProductQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    for item in &page.payload {
        assert_eq!(item.category_id, category.id.to_hex());
        assert_eq!(item.supplier_id, supplier.id.to_hex());
    }
}

#[tokio::test]
async fn test_seed_products_requires_live_references() {
    let fx = fixture();

    let result = fx
        .service
        .seed_products(vec![ProductDraft {
            name: "Seed".to_string(),
            price: 1.0,
            discount: 0.0,
            stock: 1,
            description: String::new(),
        }])
        .await;

    assert!(matches!(result, Err(ProductError::References(_))));
}
