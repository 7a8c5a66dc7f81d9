//! Review inbox records.

mod model;

pub use model::{Review, Visibility};
