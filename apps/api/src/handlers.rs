pub mod clients;
pub mod health;
pub mod reports;
