pub mod dataset;
pub mod filter;
pub mod output;
