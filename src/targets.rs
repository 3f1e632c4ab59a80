//! Target preselection. One set of query parameters is chosen per run and
//! shared by every strategy, so all measurements hit the same documents.

use mongodb::{
    bson::{doc, Document},
    sync::Database,
};

use crate::{
    error::Error,
    models::{CATEGORIES, ORDERS},
    Result,
};

/// Immutable query targets consumed read-only for the remainder of a run.
#[derive(Debug, Clone)]
pub struct Targets {
    /// Slug of one uniformly sampled category.
    pub category_slug: String,
    /// Order number of one uniformly sampled order.
    pub order_number: String,
    /// The order status with the highest document count, used by bulk reads.
    pub bulk_status: String,
}

/// Samples one document of each entity type and determines the most populous
/// order status. Fails with [`Error::TargetUnavailable`] if either collection
/// is empty; the run cannot proceed without real targets.
pub fn select_targets(db: &Database) -> Result<Targets> {
    let category = sample_one(db, CATEGORIES)?;
    let order = sample_one(db, ORDERS)?;

    Ok(Targets {
        category_slug: category.get_str("slug")?.to_string(),
        order_number: order.get_str("order_number")?.to_string(),
        bulk_status: most_populous_status(db)?,
    })
}

fn sample_one(db: &Database, collection: &str) -> Result<Document> {
    let mut cursor = db
        .collection::<Document>(collection)
        .aggregate(vec![doc! { "$sample": { "size": 1 } }])
        .run()?;

    match cursor.next() {
        Some(doc) => Ok(doc?),
        None => Err(Error::TargetUnavailable {
            collection: collection.to_string(),
        }),
    }
}

/// Groups orders by status and picks the value with the highest count. Ties
/// break on the status value itself so the choice is deterministic across
/// store implementations.
fn most_populous_status(db: &Database) -> Result<String> {
    let pipeline = vec![
        doc! { "$group": { "_id": "$status", "count": { "$sum": 1 } } },
        doc! { "$sort": { "count": -1, "_id": 1 } },
        doc! { "$limit": 1 },
    ];

    let mut cursor = db.collection::<Document>(ORDERS).aggregate(pipeline).run()?;
    match cursor.next() {
        Some(doc) => Ok(doc?.get_str("_id")?.to_string()),
        None => Err(Error::TargetUnavailable {
            collection: ORDERS.to_string(),
        }),
    }
}
