//! Core domain logic for the glass-inlay order platform.
//!
//! Pure logic only: no I/O, no database access. The shape module derives
//! the GET/POST/PATCH/PUT wire shapes of every entity from its canonical
//! definition; the permission module answers which actor may perform which
//! action.

pub mod diff;
pub mod error;
pub mod permissions;
pub mod roles;
pub mod shape;
pub mod types;
