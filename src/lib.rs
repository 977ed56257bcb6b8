pub mod cli;
pub mod config;
pub mod corpus;
pub mod db;
pub mod generator;
pub mod pipeline;
pub mod writer;
