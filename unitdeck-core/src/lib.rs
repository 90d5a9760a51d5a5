pub mod catalog;
pub mod command;
pub mod completion;
pub mod config;
pub mod facets;
pub mod parser;
pub mod policy;
pub mod reducer;
pub mod state;
pub mod unit;
