mod manifest;
mod types;

pub use manifest::*;
pub use types::*;
