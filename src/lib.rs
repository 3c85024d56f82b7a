pub mod aggregate;
pub mod api;
pub mod columns;
pub mod config;
pub mod error;
pub mod input;
pub mod record;
pub mod schema;
pub mod scorer;
pub mod transform;
// cmd and reports belong to the binary crate (main.rs).
