pub mod constraints;
pub mod decision;
pub mod error;
pub mod feature;
pub mod frontmatter;
pub mod graph;
pub mod handoff;
pub mod ids;
pub mod io;
pub mod issue;
pub mod manifest;
pub mod paths;
pub mod types;
pub mod validate;

pub use error::{LevitError, Result};
