pub mod history;
pub mod market;
pub mod scheduler;
pub mod snapshot;

pub use history::HistoryService;
pub use market::MarketService;
pub use scheduler::{Scheduler, DEFAULT_PERIOD};
pub use snapshot::SnapshotRecorder;
