pub mod errors;
pub mod models;
pub mod value_objects;

pub use errors::*;
pub use models::*;
pub use value_objects::*;
