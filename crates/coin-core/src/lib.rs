pub mod error;
pub mod traits;
pub mod types;
pub mod utils;

pub use error::CoinError;
pub use traits::{Clock, MarketDataSource, SystemClock};
pub use types::*;
pub use utils::*;
