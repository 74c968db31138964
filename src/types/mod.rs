mod models;
mod patch;

pub use models::*;
pub use patch::*;
