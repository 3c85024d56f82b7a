pub mod columns;
pub mod report;
pub mod score;
pub mod validate;
