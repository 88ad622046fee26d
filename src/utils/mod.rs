//! Small response helpers shared by handlers and middleware.

pub mod redirect;
