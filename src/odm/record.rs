//! Blocking active-record layer. Models validate their fields and round-trip
//! through an intermediate `Document` on every save and load, mirroring the
//! bookkeeping a classic ODM performs on each operation. This is the most
//! expensive blocking strategy by construction.

use mongodb::{
    bson::{doc, from_document, to_document, Document},
    sync::Database,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::Error,
    models::{Category, Order, CATEGORIES, ORDERS},
    Result,
};

pub trait Record: Serialize + DeserializeOwned + Sized {
    const COLLECTION: &'static str;

    /// Filter identifying this specific document.
    fn key_filter(&self) -> Document;

    /// Field-level checks performed before any document leaves the process.
    fn validate(&self) -> Result<()>;

    fn collection(db: &Database) -> mongodb::sync::Collection<Document> {
        db.collection(Self::COLLECTION)
    }

    /// Validates, serializes through a `Document` and inserts.
    fn save(&self, db: &Database) -> Result<()> {
        self.validate()?;
        Self::collection(db).insert_one(to_document(self)?).run()?;
        Ok(())
    }

    /// Validates and inserts a batch in one unordered call.
    fn save_many(records: &[Self], db: &Database) -> Result<()> {
        let mut docs = Vec::with_capacity(records.len());
        for record in records {
            record.validate()?;
            docs.push(to_document(record)?);
        }
        Self::collection(db).insert_many(docs).ordered(false).run()?;
        Ok(())
    }

    /// Fetches the first document matching `filter` and rebuilds the model
    /// from the raw document.
    fn first(db: &Database, filter: Document) -> Result<Option<Self>> {
        match Self::collection(db).find_one(filter).run()? {
            Some(doc) => Ok(Some(from_document(doc)?)),
            None => Ok(None),
        }
    }

    /// Projected fetch; returns the raw partial document since a partial
    /// model would fail validation.
    fn first_projected(
        db: &Database,
        filter: Document,
        projection: Document,
    ) -> Result<Option<Document>> {
        Ok(Self::collection(db)
            .find_one(filter)
            .projection(projection)
            .run()?)
    }

    /// Fetches up to `limit` matching documents and rebuilds each model.
    fn find(db: &Database, filter: Document, sort: Option<Document>, limit: i64) -> Result<Vec<Self>> {
        let collection = Self::collection(db);
        let mut find = collection.find(filter).limit(limit);
        if let Some(sort) = sort {
            find = find.sort(sort);
        }
        let mut out = Vec::new();
        for doc in find.run()? {
            out.push(from_document(doc?)?);
        }
        Ok(out)
    }

    /// Persists the current model state by full replacement.
    fn replace(&self, db: &Database) -> Result<()> {
        self.validate()?;
        Self::collection(db)
            .replace_one(self.key_filter(), to_document(self)?)
            .run()?;
        Ok(())
    }

    fn delete(&self, db: &Database) -> Result<()> {
        Self::collection(db).delete_one(self.key_filter()).run()?;
        Ok(())
    }
}

fn require(condition: bool, what: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::Validation(what.to_string()))
    }
}

impl Record for Category {
    const COLLECTION: &'static str = CATEGORIES;

    fn key_filter(&self) -> Document {
        doc! { "slug": &self.slug }
    }

    fn validate(&self) -> Result<()> {
        require(!self.name.is_empty(), "category name is required")?;
        require(!self.slug.is_empty(), "category slug is required")?;
        require(self.view_count >= 0, "view_count must be non-negative")?;
        Ok(())
    }
}

impl Record for Order {
    const COLLECTION: &'static str = ORDERS;

    fn key_filter(&self) -> Document {
        doc! { "order_number": &self.order_number }
    }

    fn validate(&self) -> Result<()> {
        require(!self.order_number.is_empty(), "order_number is required")?;
        require(!self.customer_email.is_empty(), "customer_email is required")?;
        require(!self.status.is_empty(), "status is required")?;
        require(self.total_cents >= 0, "total_cents must be non-negative")?;
        require(!self.line_items.is_empty(), "line_items must not be empty")?;
        for item in &self.line_items {
            require(!item.sku.is_empty(), "line item sku is required")?;
            require(item.quantity > 0, "line item quantity must be positive")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::generator::DataGenerator;

    #[test]
    fn generated_models_validate() {
        let mut gen = DataGenerator::new(7);
        for i in 0..50 {
            gen.make_category(i).validate().unwrap();
            gen.make_order(i).validate().unwrap();
        }
    }

    #[test]
    fn empty_key_is_rejected() {
        let mut category = DataGenerator::new(7).make_category(0);
        category.slug.clear();
        assert!(category.validate().is_err());
    }
}
