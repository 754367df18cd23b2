// src/db.rs

use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, from_document, to_document, Document},
    options::FindOptions,
    Client,
};
//
use crate::{config::Config, error::TransformError, orderin::RootOrderIn, row::OrderInRow};

#[derive(Clone, Debug)]
pub struct DB {
    pub client: Client,
    pub database: String,
}

impl DB {
    pub async fn new(config: &Config) -> Result<Self, TransformError> {
        let client = Client::with_uri_str(&config.uri).await?;

        Ok(Self { client, database: config.database.clone() })
    }

    // rows come back in insertion order; a row that does not decode is skipped
    pub async fn fetch_rows(&self, collection_name: &str) -> Result<Vec<OrderInRow>, TransformError> {
        let collection = self.client.database(&self.database).collection::<Document>(collection_name);
        let find_options = FindOptions::builder().sort(doc! { "_id": 1 }).build();

        let cursor = collection.find(None, find_options).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        let (rows, skipped) = decode_rows(documents);
        tracing::info!(collection = collection_name, rows = rows.len(), skipped, "fetched rows");

        Ok(rows)
    }

    pub async fn add_documents(
        &self,
        collection_name: &str,
        documents: Vec<Document>,
        replace: bool,
    ) -> Result<(), TransformError> {
        let collection = self.client.database(&self.database).collection::<Document>(collection_name);

        if replace {
            collection.delete_many(doc! {}, None).await?;
        }

        if documents.is_empty() {
            return Ok(());
        }

        let count = documents.len();
        collection.insert_many(documents, None).await?;
        tracing::info!(collection = collection_name, documents = count, "wrote shipment documents");

        Ok(())
    }
}

pub fn decode_rows(documents: impl IntoIterator<Item = Document>) -> (Vec<OrderInRow>, usize) {
    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for document in documents {
        let id = document.get("_id").map(ToString::to_string);
        match from_document::<OrderInRow>(document) {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                tracing::warn!(id = ?id, "skipping row that failed to decode: {}", e);
            }
        }
    }

    (rows, skipped)
}

pub fn to_documents(shipments: &[RootOrderIn]) -> Result<Vec<Document>, TransformError> {
    shipments
        .iter()
        .map(|shipment| to_document(shipment).map_err(TransformError::from))
        .collect()
}
