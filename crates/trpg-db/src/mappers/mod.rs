//! Model to entity mappers
//!
//! Conversions from database rows to domain entities (`trpg-core`), plus the
//! small helpers repositories use when binding entity values.

mod character;
mod member;
mod room;
mod user;

pub use character::json_or_null;
