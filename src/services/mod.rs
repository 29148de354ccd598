pub use errors::{ServiceError, ServiceResult};

pub mod brands;
pub mod categories;
pub mod errors;
pub mod products;
