//! Storage module: the frontier store (§4.2) and run-log store (§4.3).
//!
//! The trait definitions in [`traits`] are backend-independent; [`sqlite`]
//! provides the embedded-SQL implementation this crate ships (§10.5).

mod schema;
mod sqlite;
mod traits;

pub use schema::{get_schema_version, initialize_schema};
pub use sqlite::SqliteStorage;
pub use traits::{
    Frontier, FrontierEntry, FrontierStatistics, NewFrontierEntry, NewRunLog, RunLog,
    RunLogStore, StorageError, StorageResult,
};

/// A backend that can hold both frontier entries and run logs, which is what
/// the run controller and strategy dispatcher actually need (§9 interface
/// seams). Blanket-implemented for anything that implements both traits so
/// `SqliteStorage` and any test double satisfy it for free.
pub trait Store: Frontier + RunLogStore {}
impl<T: Frontier + RunLogStore> Store for T {}
