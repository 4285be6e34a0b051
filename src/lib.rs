pub mod config;
pub mod error;
pub mod filter;
pub mod output;
pub mod pipeline;
pub mod reader;
pub mod record;
pub mod transform;
