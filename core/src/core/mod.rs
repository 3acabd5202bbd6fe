pub mod engine;
pub mod inspector;
pub mod result;
