pub mod models;
pub mod route;
pub mod services;
pub mod errors;

pub use models::*;
pub use route::*;
pub use services::*;
pub use errors::*;
