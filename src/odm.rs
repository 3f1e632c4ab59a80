//! The two higher-level mapping layers under comparison. Both bind schema
//! structs to their collections through a small trait; [`repo`] is async and
//! suspends at every driver call, [`record`] is blocking and pays for field
//! validation plus a `Document` round-trip on each operation.

pub mod record;
pub mod repo;
