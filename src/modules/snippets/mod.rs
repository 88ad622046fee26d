pub mod controller;
pub mod model;
pub mod router;

pub use model::*;
pub use router::{init_protected_snippets_router, init_snippets_router};
