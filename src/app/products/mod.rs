pub mod filter;
pub mod handler;
pub mod model;
pub mod service;

pub use model::{Product, ProductList};
pub use service::ProductService;
