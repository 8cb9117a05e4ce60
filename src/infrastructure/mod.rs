//! Infrastructure utilities for filesystem locations.

pub mod paths;

pub use paths::{default_data_dir, expand_tilde};
