//! Active-record strategy: blocking operations through the validating,
//! document-round-tripping mapping layer.

use mongodb::bson::{doc, DateTime};

use crate::{
    error::Error,
    models::{Category, Order, ORDERS},
    odm::record::Record,
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
            Strategy::Record,
            spec.kind,
            spec.collection,
            spec.description,
            op,
        ));
    }
}

fn read_single_field_category(cx: &SyncCtx) -> Result<()> {
    Category::first_projected(
        &cx.db,
        doc! { "slug": &cx.targets.category_slug },
        doc! { "name": 1, "_id": 0 },
    )?;
    Ok(())
}

fn read_single_field_order(cx: &SyncCtx) -> Result<()> {
    Order::first_projected(
        &cx.db,
        doc! { "order_number": &cx.targets.order_number },
        doc! { "customer_email": 1, "_id": 0 },
    )?;
    Ok(())
}

fn read_full_record_category(cx: &SyncCtx) -> Result<()> {
    Category::first(&cx.db, doc! { "slug": &cx.targets.category_slug })?;
    Ok(())
}

fn read_full_record_order(cx: &SyncCtx) -> Result<()> {
    Order::first(&cx.db, doc! { "order_number": &cx.targets.order_number })?;
    Ok(())
}

fn read_orders_by_status(cx: &SyncCtx, limit: i64) -> Result<()> {
    Order::find(
        &cx.db,
        doc! { "status": &cx.targets.bulk_status },
        None,
        limit,
    )?;
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
    Category::find(&cx.db, doc! {}, Some(doc! { "view_count": -1 }), limit)?;
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
    bench_category().save(&cx.db)
}

fn insert_batch_100(cx: &SyncCtx) -> Result<()> {
    let batch: Vec<Category> = (0..100).map(|_| bench_category()).collect();
    Category::save_many(&batch, &cx.db)
}

fn insert_batch_1000(cx: &SyncCtx) -> Result<()> {
    let batch: Vec<Order> = (0..1000).map(|_| bench_order()).collect();
    Order::save_many(&batch, &cx.db)
}

/// Fetch-modify-save: load the model, touch one field, write the whole
/// document back through validation.
fn update_single(cx: &SyncCtx) -> Result<()> {
    let mut order = Order::first(&cx.db, doc! { "order_number": &cx.targets.order_number })?
        .ok_or_else(|| Error::NotFound {
            collection: ORDERS.to_string(),
        })?;
    order.updated_at = DateTime::now();
    order.replace(&cx.db)
}

fn delete_single(cx: &SyncCtx) -> Result<()> {
    let category = bench_category();
    category.save(&cx.db)?;
    category.delete(&cx.db)
}
