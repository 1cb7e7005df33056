//! Main module for the SQL post-processing functionality

pub mod error;
pub mod lexing;
pub mod pipeline;
pub mod processor;
pub mod source;
pub mod statements;
pub mod token;
pub mod unlexing;
