//! Seeding and teardown of the synthetic corpus.

pub mod generator;

use indicatif::{ProgressBar, ProgressStyle};
use mongodb::{
    bson::doc,
    options::IndexOptions,
    sync::{Client, Database},
    IndexModel,
};
use tracing::info;

use crate::{
    config::Config,
    models::{Category, Order, CATEGORIES, ORDERS},
    seed::generator::DataGenerator,
    Result,
};

const GENERATOR_SEED: u64 = 42;

/// Seeds both collections up to `config.seed_count` documents each.
/// Under-populated collections are topped up from their current count;
/// `force` drops and rebuilds them from scratch. Indexes are created after
/// the bulk inserts.
pub fn seed_database(config: &Config, force: bool) -> Result<()> {
    let client = Client::with_uri_str(&config.uri)?;
    let db = client.database(&config.db_name);
    let mut gen = DataGenerator::new(GENERATOR_SEED);

    let categories = db.collection::<Category>(CATEGORIES);
    if force {
        categories.drop().run()?;
    }
    let existing = categories.estimated_document_count().run()?;
    if existing >= config.seed_count {
        info!(count = existing, "categories already seeded, skipping");
    } else {
        // Top up starting at the existing count; generated keys embed the
        // index, so new documents never collide with the unique indexes.
        let missing = config.seed_count - existing;
        let bar = progress_bar(missing, "seeding categories");
        let mut remaining = missing as usize;
        let mut index = existing;
        while remaining > 0 {
            let batch_len = usize::min(remaining, config.batch_size);
            let batch: Vec<Category> = (0..batch_len)
                .map(|_| {
                    let category = gen.make_category(index);
                    index += 1;
                    category
                })
                .collect();
            categories.insert_many(batch).ordered(false).run()?;
            bar.inc(batch_len as u64);
            remaining -= batch_len;
        }
        bar.finish();
    }

    let orders = db.collection::<Order>(ORDERS);
    if force {
        orders.drop().run()?;
    }
    let existing = orders.estimated_document_count().run()?;
    if existing >= config.seed_count {
        info!(count = existing, "orders already seeded, skipping");
    } else {
        let missing = config.seed_count - existing;
        let bar = progress_bar(missing, "seeding orders");
        let mut remaining = missing as usize;
        let mut index = existing;
        while remaining > 0 {
            let batch_len = usize::min(remaining, config.batch_size);
            let batch: Vec<Order> = (0..batch_len)
                .map(|_| {
                    let order = gen.make_order(index);
                    index += 1;
                    order
                })
                .collect();
            orders.insert_many(batch).ordered(false).run()?;
            bar.inc(batch_len as u64);
            remaining -= batch_len;
        }
        bar.finish();
    }

    create_indexes(&db)?;
    Ok(())
}

/// Drops the whole benchmark database.
pub fn reset_database(config: &Config) -> Result<()> {
    let client = Client::with_uri_str(&config.uri)?;
    client.database(&config.db_name).drop().run()?;
    info!(database = %config.db_name, "database dropped");
    Ok(())
}

/// Seeds the database if either collection is under-populated. Called before
/// a run so benchmarks always execute against a full corpus.
pub fn ensure_seeded(config: &Config) -> Result<()> {
    let client = Client::with_uri_str(&config.uri)?;
    let db = client.database(&config.db_name);
    let categories = db
        .collection::<Category>(CATEGORIES)
        .estimated_document_count()
        .run()?;
    let orders = db
        .collection::<Order>(ORDERS)
        .estimated_document_count()
        .run()?;

    if categories < config.seed_count || orders < config.seed_count {
        info!("database not fully seeded, seeding now");
        seed_database(config, false)?;
    }
    Ok(())
}

fn create_indexes(db: &Database) -> Result<()> {
    info!("creating indexes");
    let unique = IndexOptions::builder().unique(true).build();

    let categories = db.collection::<Category>(CATEGORIES);
    categories.create_indexes(vec![
        IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(unique.clone())
            .build(),
        IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(unique.clone())
            .build(),
        IndexModel::builder().keys(doc! { "view_count": -1 }).build(),
    ])
    .run()?;

    let orders = db.collection::<Order>(ORDERS);
    orders.create_indexes(vec![
        IndexModel::builder()
            .keys(doc! { "order_number": 1 })
            .options(unique)
            .build(),
        IndexModel::builder().keys(doc! { "customer_email": 1 }).build(),
        IndexModel::builder().keys(doc! { "status": 1 }).build(),
        IndexModel::builder().keys(doc! { "total_cents": -1 }).build(),
        IndexModel::builder().keys(doc! { "created_at": -1 }).build(),
    ])
    .run()?;

    Ok(())
}

pub(crate) fn progress_bar(len: u64, message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new(len).with_message(message);
    if let Ok(style) =
        ProgressStyle::with_template("{msg:24} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar
}
