//! Product store integration tests against in-memory and on-disk catalogs.

mod common;

use agri_catalog::models::{ProductId, ProductType};
use agri_catalog::{AsyncCatalog, Catalog, CatalogError};
use serde_json::json;

// ---------------------------------------------------------------------------
// create
// ---------------------------------------------------------------------------

#[test]
fn create_returns_normalized_record() {
    let catalog = common::setup_catalog();

    let draft = common::draft(json!({
        "name": "Neem Oil",
        "type": "Pesticide",
        "price": 250,
        "supplier": "AgroCorp"
    }));
    let product = catalog.products().create(&draft).unwrap();

    assert_eq!(product.name, "Neem Oil");
    assert_eq!(product.product_type, ProductType::Pesticide);
    assert_eq!(product.price, 250.0);
    assert_eq!(product.description, "");
    assert_eq!(product.supplier, "AgroCorp");
    assert!(product.image_url.contains("Neem%20Oil"));
    assert_eq!(product.id.as_str().len(), 24);
    assert_eq!(product.created_at, product.updated_at);
}

#[test]
fn created_record_matches_stored_record() {
    let catalog = common::setup_catalog();
    let product = catalog
        .products()
        .create(&common::valid_draft("DAP", "fertilizer", 1350.75))
        .unwrap();

    let stored = catalog.products().list_all().unwrap();
    assert_eq!(stored, vec![product]);
}

#[test]
fn create_rejects_invalid_draft_without_writing() {
    let catalog = common::setup_catalog();

    let err = catalog
        .products()
        .create(&common::valid_draft("", "seed", 10.0))
        .unwrap_err();
    match err {
        CatalogError::Validation(v) => assert!(v.has_field("name")),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(catalog.products().count().unwrap(), 0);
}

#[test]
fn create_rejects_unknown_type() {
    let catalog = common::setup_catalog();
    let err = catalog
        .products()
        .create(&common::valid_draft("Tractor", "vehicle", 10.0))
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(ref v) if v.has_field("type")));
}

#[test]
fn ids_are_unique() {
    let catalog = common::setup_catalog();
    let mut ids: Vec<ProductId> = (0..50)
        .map(|i| {
            catalog
                .products()
                .create(&common::valid_draft(&format!("Seed {i}"), "seed", 1.0))
                .unwrap()
                .id
        })
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

// ---------------------------------------------------------------------------
// list_all
// ---------------------------------------------------------------------------

#[test]
fn list_all_on_empty_catalog_is_empty() {
    let catalog = common::setup_catalog();
    assert!(catalog.products().list_all().unwrap().is_empty());
}

#[test]
fn list_all_is_newest_first() {
    let (catalog, created) = common::setup_seeded_catalog();

    let names: Vec<String> = catalog
        .products()
        .list_all()
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    let mut expected: Vec<String> = created.into_iter().map(|p| p.name).collect();
    expected.reverse();
    assert_eq!(names, expected);
}

#[test]
fn list_all_orders_two_quick_creates() {
    let catalog = common::setup_catalog();
    let r1 = catalog.products().create(&common::valid_draft("R1", "seed", 1.0)).unwrap();
    let r2 = catalog.products().create(&common::valid_draft("R2", "seed", 1.0)).unwrap();

    let ids: Vec<ProductId> = catalog.products().list_all().unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![r2.id, r1.id]);
}

// ---------------------------------------------------------------------------
// delete_by_id
// ---------------------------------------------------------------------------

#[test]
fn delete_removes_record() {
    let (catalog, created) = common::setup_seeded_catalog();
    let target = &created[1];

    let deleted = catalog.products().delete_by_id(target.id.as_str()).unwrap();
    assert_eq!(deleted, target.id);

    let remaining = catalog.products().list_all().unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|p| p.id != target.id));
}

#[test]
fn delete_accepts_uppercase_hex() {
    let (catalog, created) = common::setup_seeded_catalog();
    let upper = created[0].id.as_str().to_uppercase();

    let deleted = catalog.products().delete_by_id(&upper).unwrap();
    assert_eq!(deleted, created[0].id);
}

#[test]
fn delete_twice_reports_not_found() {
    let (catalog, created) = common::setup_seeded_catalog();
    let id = created[0].id.as_str();

    catalog.products().delete_by_id(id).unwrap();
    let err = catalog.products().delete_by_id(id).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[test]
fn delete_unknown_id_reports_not_found() {
    let (catalog, _) = common::setup_seeded_catalog();
    let err = catalog
        .products()
        .delete_by_id("0123456789abcdef01234567")
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
    assert_eq!(catalog.products().count().unwrap(), 3);
}

#[test]
fn delete_malformed_id_is_invalid() {
    let (catalog, _) = common::setup_seeded_catalog();
    for raw in ["", "123", "not-an-id", "0123456789abcdef0123456z", "0123456789abcdef012345678"] {
        let err = catalog.products().delete_by_id(raw).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidId(_)), "input {raw:?}");
    }
    assert_eq!(catalog.products().count().unwrap(), 3);
}

// ---------------------------------------------------------------------------
// ProductId
// ---------------------------------------------------------------------------

#[test]
fn generated_ids_parse_and_carry_creation_time() {
    let id = ProductId::generate();
    assert_eq!(ProductId::parse(id.as_str()).unwrap(), id);

    let now = chrono::Utc::now().timestamp() as u32;
    assert!(now.abs_diff(id.timestamp()) <= 2);
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn records_survive_reopening_a_file_database() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("nested").join("catalog.duckdb");

    let created = {
        let catalog = Catalog::builder().database_path(&path).build().unwrap();
        let product = catalog
            .products()
            .create(&common::valid_draft("Sickle", "equipment", 180.0))
            .unwrap();
        catalog.close().unwrap();
        product
    };

    let reopened = Catalog::builder().database_path(&path).build().unwrap();
    assert_eq!(reopened.products().list_all().unwrap(), vec![created]);
}

// ---------------------------------------------------------------------------
// AsyncCatalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn async_catalog_runs_store_operations() {
    let catalog = AsyncCatalog::builder().in_memory().build().await.unwrap();

    let product = catalog
        .create(common::valid_draft("Rotavator", "equipment", 95000.0))
        .await
        .unwrap();
    assert_eq!(catalog.count().await.unwrap(), 1);
    assert_eq!(catalog.list_all().await.unwrap(), vec![product.clone()]);

    let deleted = catalog.delete_by_id(product.id.to_string()).await.unwrap();
    assert_eq!(deleted, product.id);
    assert!(catalog.list_all().await.unwrap().is_empty());

    catalog.close().await.unwrap();
}

#[tokio::test]
async fn async_catalog_close_while_shared_leaves_clones_usable() {
    let catalog = AsyncCatalog::builder().in_memory().build().await.unwrap();
    let other = catalog.clone();

    catalog.close().await.unwrap();

    other
        .create(common::valid_draft("Pruning Shears", "equipment", 450.0))
        .await
        .unwrap();
    assert_eq!(other.count().await.unwrap(), 1);
    other.close().await.unwrap();
}

#[tokio::test]
async fn async_close_flushes_file_database() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("catalog.duckdb");

    let catalog = AsyncCatalog::builder().database_path(&path).build().await.unwrap();
    let server_handle = catalog.clone();
    let product = catalog
        .create(common::valid_draft("Drip Line", "equipment", 75.0))
        .await
        .unwrap();
    catalog.close().await.unwrap();
    drop(server_handle);

    let reopened = Catalog::builder().database_path(&path).build().unwrap();
    assert_eq!(reopened.products().list_all().unwrap(), vec![product]);
}
