//! Store-backed tests for the MongoDB product repository.
//!
//! Each test starts its own MongoDB container; run with
//! `cargo test -p domain_products -- --ignored`.

use database::{ConnectionManager, ConnectionState, mongodb::MongoConnector};
use domain_products::*;
use ::mongodb::bson::{Document, doc, oid::ObjectId};
use std::sync::Arc;
use test_utils::{TestDataBuilder, TestMongo, assertions};

fn connections(mongo: &TestMongo) -> Arc<ConnectionManager<MongoConnector>> {
    Arc::new(ConnectionManager::new(MongoConnector::new(mongo.store_config())))
}

fn service(mongo: &TestMongo) -> ProductService<MongoProductRepository> {
    ProductService::new(MongoProductRepository::new(connections(mongo)))
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_empty_store_lists_zero_total() {
    let mongo = TestMongo::new().await;

    let page = service(&mongo).list_products(None, None).await.unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.pagination.total, 0);
    assert!(!page.pagination.has_more);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_then_get_round_trip() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo);
    let builder = TestDataBuilder::from_test_name("create_then_get");

    let created = service
        .create_product(CreateProduct {
            name: builder.name("product", "widget"),
            price: Some(builder.price()),
            url: Some("http://x.example".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assertions::assert_canonical_id(&created.id, "created product");
    assert!(created.brands.is_empty());

    let found = assertions::assert_some(
        service.get_product_by_id(&created.id).await,
        "created product lookup",
    );
    assert_eq!(found.name, created.name);
    assert_eq!(found.price, created.price);
    assert_eq!(found.url, created.url);

    let prefixed = service
        .get_product_by_id(&format!("product:{}", created.id))
        .await;
    assert_eq!(prefixed.map(|p| p.id), Some(created.id));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_brands_are_joined_through_edges() {
    let mongo = TestMongo::new().await;
    let db = mongo.database();

    let product_id = ObjectId::new();
    db.collection::<Document>("product")
        .insert_one(doc! { "_id": product_id, "name": "Headphones", "price": 349 })
        .await
        .unwrap();
    db.collection::<Document>("brands")
        .insert_many(vec![
            doc! { "_id": "brands:sony", "name": "Sony" },
            doc! { "_id": "brands:other", "name": "Other" },
        ])
        .await
        .unwrap();
    db.collection::<Document>("product_brand")
        .insert_one(doc! { "in": product_id, "out": "brands:sony" })
        .await
        .unwrap();

    let service = service(&mongo);
    let product = service
        .get_product_by_id(&product_id.to_hex())
        .await
        .unwrap();

    assert_eq!(product.price, Some(349.0));
    assert_eq!(
        product.brands,
        vec![Brand {
            id: "sony".into(),
            name: "Sony".into()
        }]
    );

    let page = service.list_products(None, None).await.unwrap();
    assert_eq!(page.data[0].brands.len(), 1);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_brands_follow_edge_order() {
    let mongo = TestMongo::new().await;
    let db = mongo.database();

    db.collection::<Document>("product")
        .insert_one(doc! { "_id": "product:tv", "name": "TV" })
        .await
        .unwrap();
    db.collection::<Document>("brands")
        .insert_many(vec![
            doc! { "_id": "brands:a", "name": "Alpha" },
            doc! { "_id": "brands:z", "name": "Zeta" },
        ])
        .await
        .unwrap();
    db.collection::<Document>("product_brand")
        .insert_many(vec![
            doc! { "in": "product:tv", "out": "brands:z" },
            doc! { "in": "product:tv", "out": "brands:missing" },
            doc! { "in": "product:tv", "out": "brands:a" },
        ])
        .await
        .unwrap();

    let product = service(&mongo).get_product_by_id("tv").await.unwrap();

    let names: Vec<_> = product.brands.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Zeta", "Alpha"]);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_string_ids_with_table_prefix() {
    let mongo = TestMongo::new().await;
    mongo
        .database()
        .collection::<Document>("product")
        .insert_one(doc! { "_id": "product:legacy", "name": "Legacy" })
        .await
        .unwrap();

    let service = service(&mongo);
    let product = service.get_product_by_id("legacy").await.unwrap();
    assert_eq!(product.id, "legacy");

    assert!(service.delete_product("legacy").await);
    assert!(service.get_product_by_id("legacy").await.is_none());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_is_a_merge() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo);

    let created = service
        .create_product(CreateProduct {
            name: "Widget".into(),
            description: Some("Blue".into()),
            price: Some(9.99),
            url: Some("http://x.example".into()),
            brand: None,
        })
        .await
        .unwrap();

    let updated = service
        .update_product(
            &created.id,
            UpdateProduct {
                price: Some(19.99),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.price, Some(19.99));
    assert_eq!(updated.name, "Widget");
    assert_eq!(updated.description.as_deref(), Some("Blue"));
    assert_eq!(updated.url.as_deref(), Some("http://x.example"));

    let missing = service
        .update_product(&ObjectId::new().to_hex(), UpdateProduct::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_delete_removes_product_and_edges() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo);

    let created = service
        .create_product(CreateProduct {
            name: "Widget".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    let oid = ObjectId::parse_str(&created.id).unwrap();

    let edges = mongo.database().collection::<Document>("product_brand");
    edges
        .insert_one(doc! { "in": oid, "out": "brands:acme" })
        .await
        .unwrap();

    assert!(service.delete_product(&created.id).await);
    assert!(service.get_product_by_id(&created.id).await.is_none());
    assert_eq!(edges.count_documents(doc! {}).await.unwrap(), 0);

    assert!(!service.delete_product(&created.id).await);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_pagination_against_store() {
    let mongo = TestMongo::new().await;
    let service = service(&mongo);

    for i in 0..5 {
        service
            .create_product(CreateProduct {
                name: format!("Product {}", i),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let page = service.list_products(Some(2), Some(0)).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.pagination.total, 5);
    assert!(page.pagination.has_more);

    let page = service.list_products(Some(2), Some(4)).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert!(!page.pagination.has_more);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_connection_is_shared_and_released() {
    let mongo = TestMongo::new().await;
    let connections = connections(&mongo);
    let repository = MongoProductRepository::new(connections.clone());

    repository.init_indexes().await.unwrap();
    assert_eq!(connections.state(), ConnectionState::Ready);

    connections.release().await;
    assert_eq!(connections.state(), ConnectionState::Uninitialized);

    assert!(repository.list_with_brands().await.unwrap().is_empty());
    assert_eq!(connections.state(), ConnectionState::Ready);
}
