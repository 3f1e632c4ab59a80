//! Data-mapped strategy: the same blocking driver calls as the baseline, but
//! through serde-typed collections so every fetched document is deserialized
//! into a schema struct.

use mongodb::bson::{doc, DateTime};

use crate::{
    models::{Category, CategoryName, Order, OrderEmail, CATEGORIES, ORDERS},
    ops::{bench_category, bench_order, SUITE},
    registry::{BenchmarkDescriptor, BlockingFn, Strategy, SyncCtx},
    Result,
};

pub(crate) fn register(out: &mut Vec<BenchmarkDescriptor>) {
    // Implementations in suite order.
    let ops: [BlockingFn; 15] = [
        read_single_field_category,
        read_single_field_order,
        read_full_record_category,
        read_full_record_order,
        read_100_orders,
        read_1000_orders,
        read_10000_orders,
        read_100_categories,
        read_1000_categories,
        read_10000_categories,
        insert_single,
        insert_batch_100,
        insert_batch_1000,
        update_single,
        delete_single,
    ];
    for (spec, op) in SUITE.iter().zip(ops) {
        out.push(BenchmarkDescriptor::blocking(
            spec.name,
            Strategy::Typed,
            spec.kind,
            spec.collection,
            spec.description,
            op,
        ));
    }
}

fn categories(cx: &SyncCtx) -> mongodb::sync::Collection<Category> {
    cx.db.collection(CATEGORIES)
}

fn orders(cx: &SyncCtx) -> mongodb::sync::Collection<Order> {
    cx.db.collection(ORDERS)
}

fn read_single_field_category(cx: &SyncCtx) -> Result<()> {
    categories(cx)
        .clone_with_type::<CategoryName>()
        .find_one(doc! { "slug": &cx.targets.category_slug })
        .projection(doc! { "name": 1, "_id": 0 })
        .run()?;
    Ok(())
}

fn read_single_field_order(cx: &SyncCtx) -> Result<()> {
    orders(cx)
        .clone_with_type::<OrderEmail>()
        .find_one(doc! { "order_number": &cx.targets.order_number })
        .projection(doc! { "customer_email": 1, "_id": 0 })
        .run()?;
    Ok(())
}

fn read_full_record_category(cx: &SyncCtx) -> Result<()> {
    categories(cx)
        .find_one(doc! { "slug": &cx.targets.category_slug })
        .run()?;
    Ok(())
}

fn read_full_record_order(cx: &SyncCtx) -> Result<()> {
    orders(cx)
        .find_one(doc! { "order_number": &cx.targets.order_number })
        .run()?;
    Ok(())
}

fn read_orders_by_status(cx: &SyncCtx, limit: i64) -> Result<()> {
    let cursor = orders(cx)
        .find(doc! { "status": &cx.targets.bulk_status })
        .limit(limit)
        .run()?;
    cursor.collect::<mongodb::error::Result<Vec<Order>>>()?;
    Ok(())
}

fn read_100_orders(cx: &SyncCtx) -> Result<()> {
    read_orders_by_status(cx, 100)
}

fn read_1000_orders(cx: &SyncCtx) -> Result<()> {
    read_orders_by_status(cx, 1000)
}

fn read_10000_orders(cx: &SyncCtx) -> Result<()> {
    read_orders_by_status(cx, 10_000)
}

fn read_categories_by_views(cx: &SyncCtx, limit: i64) -> Result<()> {
    let cursor = categories(cx)
        .find(doc! {})
        .sort(doc! { "view_count": -1 })
        .limit(limit)
        .run()?;
    cursor.collect::<mongodb::error::Result<Vec<Category>>>()?;
    Ok(())
}

fn read_100_categories(cx: &SyncCtx) -> Result<()> {
    read_categories_by_views(cx, 100)
}

fn read_1000_categories(cx: &SyncCtx) -> Result<()> {
    read_categories_by_views(cx, 1000)
}

fn read_10000_categories(cx: &SyncCtx) -> Result<()> {
    read_categories_by_views(cx, 10_000)
}

fn insert_single(cx: &SyncCtx) -> Result<()> {
    categories(cx).insert_one(bench_category()).run()?;
    Ok(())
}

fn insert_batch_100(cx: &SyncCtx) -> Result<()> {
    let batch: Vec<Category> = (0..100).map(|_| bench_category()).collect();
    categories(cx).insert_many(batch).ordered(false).run()?;
    Ok(())
}

fn insert_batch_1000(cx: &SyncCtx) -> Result<()> {
    let batch: Vec<Order> = (0..1000).map(|_| bench_order()).collect();
    orders(cx).insert_many(batch).ordered(false).run()?;
    Ok(())
}

fn update_single(cx: &SyncCtx) -> Result<()> {
    orders(cx)
        .update_one(
            doc! { "order_number": &cx.targets.order_number },
            doc! { "$set": { "updated_at": DateTime::now() } },
        )
        .run()?;
    Ok(())
}

fn delete_single(cx: &SyncCtx) -> Result<()> {
    let category = bench_category();
    let coll = categories(cx);
    coll.insert_one(&category).run()?;
    coll.delete_one(doc! { "slug": &category.slug }).run()?;
    Ok(())
}
