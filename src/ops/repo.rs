//! Repository strategy: the async mapping layer. These are the only
//! suspending operations; the runner executes them under one cooperative
//! scheduler after every blocking strategy has finished.

use futures::future::BoxFuture;
use mongodb::bson::{doc, DateTime};

use crate::{
    error::Error,
    models::{Category, CategoryName, Order, OrderEmail, ORDERS},
    odm::repo::Repo,
    ops::{bench_category, bench_order, SUITE},
    registry::{AsyncCtx, BenchmarkDescriptor, Strategy, SuspendingFn},
    Result,
};

pub(crate) fn register(out: &mut Vec<BenchmarkDescriptor>) {
    // Implementations in suite order.
    let ops: [SuspendingFn; 15] = [
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
        out.push(BenchmarkDescriptor::suspending(
            spec.name,
            Strategy::Repo,
            spec.kind,
            spec.collection,
            spec.description,
            op,
        ));
    }
}

fn read_single_field_category(cx: &AsyncCtx) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        Repo::<Category>::new(&cx.db)
            .find_one_projected::<CategoryName>(
                doc! { "slug": &cx.targets.category_slug },
                doc! { "name": 1, "_id": 0 },
            )
            .await?;
        Ok(())
    })
}

fn read_single_field_order(cx: &AsyncCtx) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        Repo::<Order>::new(&cx.db)
            .find_one_projected::<OrderEmail>(
                doc! { "order_number": &cx.targets.order_number },
                doc! { "customer_email": 1, "_id": 0 },
            )
            .await?;
        Ok(())
    })
}

fn read_full_record_category(cx: &AsyncCtx) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        Repo::<Category>::new(&cx.db)
            .find_one(doc! { "slug": &cx.targets.category_slug })
            .await?;
        Ok(())
    })
}

fn read_full_record_order(cx: &AsyncCtx) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        Repo::<Order>::new(&cx.db)
            .find_one(doc! { "order_number": &cx.targets.order_number })
            .await?;
        Ok(())
    })
}

async fn read_orders_by_status(cx: &AsyncCtx, limit: i64) -> Result<()> {
    Repo::<Order>::new(&cx.db)
        .find(doc! { "status": &cx.targets.bulk_status })
        .limit(limit)
        .to_vec()
        .await?;
    Ok(())
}

fn read_100_orders(cx: &AsyncCtx) -> BoxFuture<'_, Result<()>> {
    Box::pin(read_orders_by_status(cx, 100))
}

fn read_1000_orders(cx: &AsyncCtx) -> BoxFuture<'_, Result<()>> {
    Box::pin(read_orders_by_status(cx, 1000))
}

fn read_10000_orders(cx: &AsyncCtx) -> BoxFuture<'_, Result<()>> {
    Box::pin(read_orders_by_status(cx, 10_000))
}

async fn read_categories_by_views(cx: &AsyncCtx, limit: i64) -> Result<()> {
    Repo::<Category>::new(&cx.db)
        .find(doc! {})
        .sort(doc! { "view_count": -1 })
        .limit(limit)
        .to_vec()
        .await?;
    Ok(())
}

fn read_100_categories(cx: &AsyncCtx) -> BoxFuture<'_, Result<()>> {
    Box::pin(read_categories_by_views(cx, 100))
}

fn read_1000_categories(cx: &AsyncCtx) -> BoxFuture<'_, Result<()>> {
    Box::pin(read_categories_by_views(cx, 1000))
}

fn read_10000_categories(cx: &AsyncCtx) -> BoxFuture<'_, Result<()>> {
    Box::pin(read_categories_by_views(cx, 10_000))
}

fn insert_single(cx: &AsyncCtx) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        Repo::<Category>::new(&cx.db).insert(&bench_category()).await
    })
}

fn insert_batch_100(cx: &AsyncCtx) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        let batch: Vec<Category> = (0..100).map(|_| bench_category()).collect();
        Repo::<Category>::new(&cx.db).insert_many(&batch).await
    })
}

fn insert_batch_1000(cx: &AsyncCtx) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        let batch: Vec<Order> = (0..1000).map(|_| bench_order()).collect();
        Repo::<Order>::new(&cx.db).insert_many(&batch).await
    })
}

/// Fetch-modify-save, the way a document mapper updates: load the model,
/// mutate it, persist the whole document back.
fn update_single(cx: &AsyncCtx) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        let repo = Repo::<Order>::new(&cx.db);
        let mut order = repo
            .find_one(doc! { "order_number": &cx.targets.order_number })
            .await?
            .ok_or_else(|| Error::NotFound {
                collection: ORDERS.to_string(),
            })?;
        order.updated_at = DateTime::now();
        repo.save(&order).await
    })
}

fn delete_single(cx: &AsyncCtx) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        let repo = Repo::<Category>::new(&cx.db);
        let category = bench_category();
        repo.insert(&category).await?;
        repo.delete(&category).await
    })
}
