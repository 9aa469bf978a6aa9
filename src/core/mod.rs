pub mod error;
pub mod middleware;
pub mod response;

pub use error::{CoreError, ErrorResponse};
pub use response::MessageResponse;
