pub mod error;
pub mod fetch;
pub mod schema;
pub mod table;
pub mod transform;
pub mod write;
