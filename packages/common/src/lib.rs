pub mod error;
pub mod models;
pub mod result;

pub use error::*;
pub use models::*;
pub use result::*;
