//! Main module for ebnf library functionality

pub mod ast;
pub mod formats;
pub mod schema;
pub mod tagged;
pub mod testing;
