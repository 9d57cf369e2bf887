//! # visium
//!
//! Umbrella crate re-exporting the visium workspace members behind features:
//! - `core`: file lookup and gzip-aware readers ([visium_core])
//! - `sc`: feature-barcode matrix and probe set loaders ([visium_sc])
#[cfg(feature = "core")]
#[doc(inline)]
pub use visium_core as core;

#[cfg(feature = "sc")]
#[doc(inline)]
pub use visium_sc as sc;
