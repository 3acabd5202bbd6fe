pub mod export;
pub mod poc;
