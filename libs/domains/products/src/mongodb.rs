//! MongoDB implementation of ProductRepository
//!
//! Products live in `product`, brands in `brands`, and each relation is an
//! edge document `{in: <product _id>, out: <brand _id>}` in `product_brand`.
//! Brands are resolved in the same aggregation that reads the products.

use async_trait::async_trait;
use database::{ConnectionManager, mongodb::MongoConnector};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, oid::ObjectId},
    options::{IndexOptions, ReturnDocument},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::normalize::{
    BRAND_TABLE, PRODUCT_BRAND_TABLE, PRODUCT_TABLE, clean_identifier, identifier_from_bson,
    to_canonical_product,
};
use crate::repository::ProductRepository;

const EDGES_FIELD: &str = "_edges";

/// MongoDB implementation of the ProductRepository
///
/// Holds the shared [`ConnectionManager`]; each call acquires the live handle,
/// connecting lazily on first use.
pub struct MongoProductRepository {
    connections: Arc<ConnectionManager<MongoConnector>>,
}

impl MongoProductRepository {
    pub fn new(connections: Arc<ConnectionManager<MongoConnector>>) -> Self {
        Self { connections }
    }

    async fn database(&self) -> ProductResult<Database> {
        let handle = self.connections.acquire().await?;
        Ok(handle.database().clone())
    }

    async fn products(&self) -> ProductResult<Collection<Document>> {
        Ok(self.database().await?.collection(PRODUCT_TABLE))
    }

    /// Create the index backing the relation lookup.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let edges: Collection<Document> = self.database().await?.collection(PRODUCT_BRAND_TABLE);

        let index = IndexModel::builder()
            .keys(doc! { "in": 1 })
            .options(
                IndexOptions::builder()
                    .name("idx_product_brand_in".to_string())
                    .build(),
            )
            .build();

        edges.create_index(index).await?;
        info!("Product indexes created successfully");
        Ok(())
    }

    /// Values `_id` may hold for `id`: the ObjectId form when `id` is one,
    /// the bare string and the `product:`-qualified string.
    pub fn id_candidates(id: &str) -> Vec<Bson> {
        let bare = clean_identifier(id);
        let mut candidates = Vec::with_capacity(3);

        if let Ok(oid) = ObjectId::parse_str(&bare) {
            candidates.push(Bson::ObjectId(oid));
        }
        candidates.push(Bson::String(format!("{}:{}", PRODUCT_TABLE, bare)));
        candidates.push(Bson::String(bare));

        candidates
    }

    /// Parameterized identifier filter; `id` is only ever a bound value.
    pub fn id_filter(id: &str) -> Document {
        doc! { "_id": { "$in": Self::id_candidates(id) } }
    }

    /// Aggregation reading products joined with their brands.
    ///
    /// `brands` follows edge insertion order (edge `_id` ascending); edges
    /// pointing at a missing brand are dropped.
    pub fn with_brands_pipeline(filter: Option<Document>) -> Vec<Document> {
        let mut pipeline = Vec::with_capacity(6);

        if let Some(filter) = filter {
            pipeline.push(doc! { "$match": filter });
        }

        pipeline.push(doc! { "$sort": { "_id": 1 } });
        pipeline.push(doc! {
            "$lookup": {
                "from": PRODUCT_BRAND_TABLE,
                "let": { "product_id": "$_id" },
                "pipeline": [
                    { "$match": { "$expr": { "$eq": ["$in", "$$product_id"] } } },
                    { "$sort": { "_id": 1 } },
                ],
                "as": EDGES_FIELD,
            }
        });
        pipeline.push(doc! {
            "$lookup": {
                "from": BRAND_TABLE,
                "localField": format!("{}.out", EDGES_FIELD),
                "foreignField": "_id",
                "as": "brands",
            }
        });
        pipeline.push(doc! {
            "$set": {
                "brands": {
                    "$filter": {
                        "input": {
                            "$map": {
                                "input": format!("${}.out", EDGES_FIELD),
                                "as": "out",
                                "in": {
                                    "$arrayElemAt": [
                                        {
                                            "$filter": {
                                                "input": "$brands",
                                                "as": "brand",
                                                "cond": { "$eq": ["$$brand._id", "$$out"] },
                                            }
                                        },
                                        0,
                                    ]
                                },
                            }
                        },
                        "as": "brand",
                        "cond": { "$eq": [{ "$type": "$$brand" }, "object"] },
                    }
                }
            }
        });
        pipeline.push(doc! { "$project": { EDGES_FIELD: 0 } });

        pipeline
    }

    /// Extract the `$count` result; an empty result set means no usable count.
    pub fn count_from_documents(documents: &[Document]) -> Option<u64> {
        let total = documents.first()?.get("total")?;

        match total {
            Bson::Int32(n) => u64::try_from(*n).ok(),
            Bson::Int64(n) => u64::try_from(*n).ok(),
            Bson::Double(n) if n.is_finite() && *n >= 0.0 => Some(*n as u64),
            _ => None,
        }
    }

    /// `$set` body holding only the fields present in `patch`.
    pub fn merge_document(patch: &UpdateProduct) -> Document {
        let mut set = Document::new();

        if let Some(ref name) = patch.name {
            set.insert("name", name.as_str());
        }
        if let Some(ref description) = patch.description {
            set.insert("description", description.as_str());
        }
        if let Some(price) = patch.price {
            set.insert("price", price);
        }
        if let Some(ref url) = patch.url {
            set.insert("url", url.as_str());
        }
        if let Some(ref brand) = patch.brand {
            set.insert("brand", brand.as_str());
        }

        set
    }

    /// Document stored for a new product; absent fields are not written.
    pub fn insert_document(input: &CreateProduct) -> Document {
        let mut document = doc! { "name": input.name.as_str() };

        if let Some(ref description) = input.description {
            document.insert("description", description.as_str());
        }
        if let Some(price) = input.price {
            document.insert("price", price);
        }
        if let Some(ref url) = input.url {
            document.insert("url", url.as_str());
        }
        if let Some(ref brand) = input.brand {
            document.insert("brand", brand.as_str());
        }

        document
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn list_with_brands(&self) -> ProductResult<Vec<Product>> {
        let cursor = self
            .products()
            .await?
            .aggregate(Self::with_brands_pipeline(None))
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        Ok(documents.iter().map(to_canonical_product).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> ProductResult<Option<u64>> {
        let cursor = self
            .products()
            .await?
            .aggregate(vec![doc! { "$count": "total" }])
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        Ok(Self::count_from_documents(&documents))
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let mut pipeline = Self::with_brands_pipeline(Some(Self::id_filter(id)));
        pipeline.push(doc! { "$limit": 1 });

        let mut cursor = self.products().await?.aggregate(pipeline).await?;

        Ok(cursor
            .try_next()
            .await?
            .map(|document| to_canonical_product(&document)))
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut document = Self::insert_document(&input);

        let result = self.products().await?.insert_one(&document).await?;

        let id = identifier_from_bson(Some(&result.inserted_id), PRODUCT_TABLE);
        if id.is_empty() {
            return Err(ProductError::Database("Failed to create product".to_string()));
        }

        document.insert("_id", result.inserted_id);
        info!(product_id = %id, "Product created successfully");
        Ok(to_canonical_product(&document))
    }

    #[instrument(skip(self, patch))]
    async fn merge(&self, id: &str, patch: UpdateProduct) -> ProductResult<Option<Product>> {
        let set = Self::merge_document(&patch);
        if set.is_empty() {
            return self.get_by_id(id).await;
        }

        let updated = self
            .products()
            .await?
            .find_one_and_update(Self::id_filter(id), doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated.map(|document| to_canonical_product(&document)))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ProductResult<bool> {
        let database = self.database().await?;
        let products: Collection<Document> = database.collection(PRODUCT_TABLE);

        let result = products.delete_one(Self::id_filter(id)).await?;
        if result.deleted_count == 0 {
            return Ok(false);
        }

        let edges: Collection<Document> = database.collection(PRODUCT_BRAND_TABLE);
        if let Err(e) = edges
            .delete_many(doc! { "in": { "$in": Self::id_candidates(id) } })
            .await
        {
            warn!(product_id = %id, error = %e, "Product deleted but its brand relations were not");
        }

        info!(product_id = %id, "Product deleted successfully");
        Ok(true)
    }
}
