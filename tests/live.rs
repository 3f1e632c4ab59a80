//! End-to-end tests against a live MongoDB deployment. All tests here are
//! ignored by default; run them with `cargo test -- --ignored` against a
//! local mongod (override the connection string with MONGODB_URI).

use mongodb::{
    bson::{doc, Document},
    sync::{Client, Database},
};

use mongo_odm_bench::{
    config::Config,
    error::Error,
    models::{CATEGORIES, ORDERS},
    registry::{OpKind, Strategy},
    runner::{run_benchmarks, RunOptions},
    seed::generator::DataGenerator,
    targets::select_targets,
};

fn test_db(name: &str) -> (Config, Database) {
    let mut config = Config::from_env();
    config.db_name = format!("odm_bench_test_{name}");
    let client = Client::with_uri_str(&config.uri).expect("client");
    let db = client.database(&config.db_name);
    db.drop().run().expect("drop");
    (config, db)
}

fn insert_order(db: &Database, index: u64, status: &str) {
    let mut order = DataGenerator::new(index).make_order(index);
    order.status = status.to_string();
    db.collection(ORDERS).insert_one(order).run().expect("insert order");
}

#[test]
#[ignore]
fn target_selector_picks_existing_records_and_top_status() {
    let (_config, db) = test_db("targets");

    let mut gen = DataGenerator::new(5);
    for i in 0..2 {
        db.collection(CATEGORIES)
            .insert_one(gen.make_category(i))
            .run()
            .expect("insert category");
    }
    insert_order(&db, 0, "shipped");
    insert_order(&db, 1, "shipped");
    insert_order(&db, 2, "pending");

    let targets = select_targets(&db).expect("targets");

    // The sampled keys must correspond to real documents.
    let category = db
        .collection::<Document>(CATEGORIES)
        .find_one(doc! { "slug": &targets.category_slug })
        .run()
        .expect("find category");
    assert!(category.is_some());
    let order = db
        .collection::<Document>(ORDERS)
        .find_one(doc! { "order_number": &targets.order_number })
        .run()
        .expect("find order");
    assert!(order.is_some());

    assert_eq!(targets.bulk_status, "shipped");

    db.drop().run().expect("cleanup");
}

#[test]
#[ignore]
fn empty_collection_aborts_target_selection() {
    let (_config, db) = test_db("empty");

    let err = select_targets(&db).expect_err("should fail on empty store");
    assert!(matches!(err, Error::TargetUnavailable { .. }));
}

#[test]
#[ignore]
fn raising_seed_count_tops_up_without_key_collisions() {
    let (mut config, db) = test_db("top_up");
    config.batch_size = 50;

    config.seed_count = 100;
    mongo_odm_bench::seed::seed_database(&config, true).expect("initial seed");

    // The unique indexes exist now; growing the corpus must extend it, not
    // re-insert the low indexes.
    config.seed_count = 150;
    mongo_odm_bench::seed::seed_database(&config, false).expect("top up");

    for collection in [CATEGORIES, ORDERS] {
        let count = db
            .collection::<Document>(collection)
            .count_documents(doc! {})
            .run()
            .expect("count");
        assert_eq!(count, 150, "{collection} not topped up");
    }

    db.drop().run().expect("cleanup");
}

#[test]
#[ignore]
fn write_group_leaves_no_benchmark_documents() {
    let (mut config, db) = test_db("cleanup");
    config.seed_count = 200;
    config.batch_size = 100;

    mongo_odm_bench::seed::seed_database(&config, true).expect("seed");

    let results = run_benchmarks(
        &config,
        &RunOptions {
            strategy: None,
            kind: Some(OpKind::Write),
            iterations: 2,
        },
    )
    .expect("run");
    assert_eq!(results.len(), 20); // 5 write ops x 4 strategies

    for collection in [CATEGORIES, ORDERS] {
        let leftover = db
            .collection::<Document>(collection)
            .count_documents(doc! { "_benchmark": true })
            .run()
            .expect("count");
        assert_eq!(leftover, 0, "benchmark documents left in {collection}");
    }

    db.drop().run().expect("cleanup");
}

#[test]
#[ignore]
fn end_to_end_run_produces_full_statistics() {
    let (mut config, db) = test_db("end_to_end");
    config.seed_count = 200;
    config.batch_size = 100;

    mongo_odm_bench::seed::seed_database(&config, true).expect("seed");

    let iterations = 5;
    let results = run_benchmarks(
        &config,
        &RunOptions {
            strategy: Some(Strategy::Raw),
            kind: None,
            iterations,
        },
    )
    .expect("run");

    assert_eq!(results.len(), 15);
    for result in &results {
        assert_eq!(result.samples.len(), iterations as usize);
        assert!(result.summary.min_ms >= 0.0);
        assert!(result.summary.min_ms <= result.summary.median_ms);
        assert!(result.summary.median_ms <= result.summary.max_ms);
        assert!(result.summary.p95_ms <= result.summary.max_ms);
    }

    db.drop().run().expect("cleanup");
}
