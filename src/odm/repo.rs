//! Async repository layer. Operations go through a generic [`Repo`] bound to
//! a model type; queries build up filter/sort/limit before materializing the
//! full result set. Every call suspends at the underlying driver operation.

use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    Collection,
    Database,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    models::{Category, Order, CATEGORIES, ORDERS},
    Result,
};

/// Binds a schema struct to its collection and natural key.
pub trait Model: Serialize + DeserializeOwned + Send + Sync + Unpin {
    const COLLECTION: &'static str;

    /// Filter identifying this specific document.
    fn key_filter(&self) -> Document;
}

impl Model for Category {
    const COLLECTION: &'static str = CATEGORIES;

    fn key_filter(&self) -> Document {
        doc! { "slug": &self.slug }
    }
}

impl Model for Order {
    const COLLECTION: &'static str = ORDERS;

    fn key_filter(&self) -> Document {
        doc! { "order_number": &self.order_number }
    }
}

pub struct Repo<T: Model> {
    coll: Collection<T>,
}

impl<T: Model> Repo<T> {
    pub fn new(db: &Database) -> Self {
        Repo {
            coll: db.collection(T::COLLECTION),
        }
    }

    pub async fn find_one(&self, filter: Document) -> Result<Option<T>> {
        Ok(self.coll.find_one(filter).await?)
    }

    /// Single-field fetch deserializing into a dedicated projection type.
    pub async fn find_one_projected<P>(
        &self,
        filter: Document,
        projection: Document,
    ) -> Result<Option<P>>
    where
        P: DeserializeOwned + Send + Sync + Unpin,
    {
        Ok(self
            .coll
            .clone_with_type::<P>()
            .find_one(filter)
            .projection(projection)
            .await?)
    }

    pub fn find(&self, filter: Document) -> Query<'_, T> {
        Query {
            coll: &self.coll,
            filter,
            sort: None,
            limit: None,
        }
    }

    pub async fn insert(&self, model: &T) -> Result<()> {
        self.coll.insert_one(model).await?;
        Ok(())
    }

    pub async fn insert_many(&self, models: &[T]) -> Result<()> {
        self.coll.insert_many(models).ordered(false).await?;
        Ok(())
    }

    /// Persists the current state of a fetched model by full replacement,
    /// matched on its natural key.
    pub async fn save(&self, model: &T) -> Result<()> {
        self.coll.replace_one(model.key_filter(), model).await?;
        Ok(())
    }

    pub async fn delete(&self, model: &T) -> Result<()> {
        self.coll.delete_one(model.key_filter()).await?;
        Ok(())
    }
}

/// Fluent query over a repository, materialized by [`Query::to_vec`].
pub struct Query<'a, T: Model> {
    coll: &'a Collection<T>,
    filter: Document,
    sort: Option<Document>,
    limit: Option<i64>,
}

impl<T: Model> Query<'_, T> {
    pub fn sort(mut self, sort: Document) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub async fn to_vec(self) -> Result<Vec<T>> {
        let mut find = self.coll.find(self.filter);
        if let Some(sort) = self.sort {
            find = find.sort(sort);
        }
        if let Some(limit) = self.limit {
            find = find.limit(limit);
        }
        Ok(find.await?.try_collect().await?)
    }
}
