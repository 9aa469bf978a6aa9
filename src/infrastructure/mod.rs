pub mod database;
pub mod logger;
