pub mod controller;

pub use controller::{not_found, ping};
