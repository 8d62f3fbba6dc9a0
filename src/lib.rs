// Search Bench - Library root

pub mod bench;
pub mod config;
pub mod corpus;
pub mod error;
pub mod search;
