//! The fixed benchmark operation suite, implemented once per access
//! strategy. Operation names are identical across strategies so results can
//! be grouped for comparison.

pub mod raw;
pub mod record;
pub mod repo;
pub mod typed;

use std::cell::RefCell;

use crate::{
    models::{Category, Order, CATEGORIES, ORDERS},
    registry::OpKind,
    seed::generator::DataGenerator,
};

/// Metadata for one operation of the suite, shared by every strategy so the
/// descriptor catalogs stay in lockstep.
pub(crate) struct OpSpec {
    pub name: &'static str,
    pub kind: OpKind,
    pub collection: &'static str,
    pub description: &'static str,
}

const fn op(
    name: &'static str,
    kind: OpKind,
    collection: &'static str,
    description: &'static str,
) -> OpSpec {
    OpSpec {
        name,
        kind,
        collection,
        description,
    }
}

/// The full suite, reads first. Each strategy registers its implementations
/// in this exact order.
pub(crate) const SUITE: [OpSpec; 15] = [
    op(
        "read_single_field_category",
        OpKind::Read,
        CATEGORIES,
        "Select only 'name' from one category by slug (projection)",
    ),
    op(
        "read_single_field_order",
        OpKind::Read,
        ORDERS,
        "Select only 'customer_email' from one order by order number (projection)",
    ),
    op(
        "read_full_record_category",
        OpKind::Read,
        CATEGORIES,
        "Select one full category document by slug",
    ),
    op(
        "read_full_record_order",
        OpKind::Read,
        ORDERS,
        "Select one full order document (with nested subdocs) by order number",
    ),
    op(
        "read_100_orders",
        OpKind::Read,
        ORDERS,
        "Select 100 full order documents by status",
    ),
    op(
        "read_1000_orders",
        OpKind::Read,
        ORDERS,
        "Select 1,000 full order documents by status",
    ),
    op(
        "read_10000_orders",
        OpKind::Read,
        ORDERS,
        "Select 10,000 full order documents by status",
    ),
    op(
        "read_100_categories",
        OpKind::Read,
        CATEGORIES,
        "Select 100 categories sorted by view count descending",
    ),
    op(
        "read_1000_categories",
        OpKind::Read,
        CATEGORIES,
        "Select 1,000 categories sorted by view count descending",
    ),
    op(
        "read_10000_categories",
        OpKind::Read,
        CATEGORIES,
        "Select 10,000 categories sorted by view count descending",
    ),
    op(
        "insert_single",
        OpKind::Write,
        CATEGORIES,
        "Insert one category document",
    ),
    op(
        "insert_batch_100",
        OpKind::Write,
        CATEGORIES,
        "Insert 100 category documents in one call",
    ),
    op(
        "insert_batch_1000",
        OpKind::Write,
        ORDERS,
        "Insert 1,000 order documents in one call",
    ),
    op(
        "update_single",
        OpKind::Write,
        ORDERS,
        "Update 'updated_at' on one order by order number",
    ),
    op(
        "delete_single",
        OpKind::Write,
        CATEGORIES,
        "Insert then delete one category by slug",
    ),
];

// Execution is single-threaded by design (the cooperative group runs on a
// current-thread scheduler), so a thread-local generator is safe to share
// between write operations of every strategy.
thread_local! {
    static GEN: RefCell<DataGenerator> = RefCell::new(DataGenerator::new(99));
}

/// A category for insertion by a write benchmark: unique key, tagged with the
/// benchmark-origin marker so post-group cleanup can find it.
pub(crate) fn bench_category() -> Category {
    let uid = uuid::Uuid::new_v4().simple().to_string();
    GEN.with(|gen| {
        let mut category = gen.borrow_mut().make_category(0);
        category.name = format!("bench-{uid}");
        category.slug = format!("bench-{uid}");
        category.benchmark = true;
        category
    })
}

/// An order for insertion by a write benchmark, tagged like [`bench_category`].
pub(crate) fn bench_order() -> Order {
    let uid = uuid::Uuid::new_v4().simple().to_string();
    GEN.with(|gen| {
        let mut order = gen.borrow_mut().make_order(0);
        order.order_number = format!("BENCH-{uid}");
        order.benchmark = true;
        order
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bench_documents_are_tagged_and_unique() {
        let a = bench_category();
        let b = bench_category();
        assert!(a.benchmark && b.benchmark);
        assert_ne!(a.slug, b.slug);
        assert!(a.slug.starts_with("bench-"));

        let order = bench_order();
        assert!(order.benchmark);
        assert!(order.order_number.starts_with("BENCH-"));
    }
}
