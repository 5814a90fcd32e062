//! Implementation of the `#[derive(FieldAccessor)]` macro.
//!
//! Generates compile-time field accessors from struct annotations, so
//! records can be filtered without runtime reflection.

mod attrs;
mod derive;

pub use derive::field_accessor_derive_impl;
