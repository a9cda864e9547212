//! Handler tree: types, schema, command endpoints, and the convert flow

pub mod commands;
pub mod convert;
pub mod schema;
pub mod types;
