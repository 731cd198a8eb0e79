pub mod common;
pub mod db;
pub mod serve;
pub mod snapshot;
