pub mod config;
pub mod error;
pub mod lower;
pub mod mapper;
pub mod model;
pub mod parse;
pub mod schema;
pub mod validate;
pub mod wasm;
