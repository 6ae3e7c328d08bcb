//! Input validation

pub mod email;

pub use email::{EmailValidator, HickoryMxResolver, MxResolver};
