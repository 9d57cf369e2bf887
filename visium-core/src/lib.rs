//! # Core utilities for visium
//!
//! Small helpers shared by the dataset loaders: opening plain or gzip'd files behind a
//! single reader type, and locating a uniquely named file anywhere below a directory.
pub mod errors;
pub mod utils;

pub use errors::FileLookupError;
pub use utils::{find_file_in_tree, get_dynamic_reader};
