//! Constraint validation for form inputs
//!
//! Validators are small closures attached to inputs; the form runs them the way
//! a browser runs `required`/`pattern` constraints before dispatching submit.

pub mod validators;

pub use validators::{FieldValidator, leading_integer};
