//! Request handlers, one module per handler group.

pub mod employee;
pub mod greeting;
