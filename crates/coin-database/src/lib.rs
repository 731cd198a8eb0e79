pub mod db;
pub mod memory;
pub mod repository;
pub mod stats;

pub use db::{connect, health_check, run_migrations, DatabaseConfig};
pub use memory::MemoryRepository;
pub use repository::{CurrentSnapshotStore, HistoryStore, PostgresRepository, StoreSummary};
