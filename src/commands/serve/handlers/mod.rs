pub mod coins;
pub mod health;
pub mod history;
