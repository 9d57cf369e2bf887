//! # Single-cell / spatial gene expression loaders
//!
//! Two independent entry points:
//! - [load_feature_barcode_matrix]: assemble a `matrix.mtx.gz` / `features.tsv.gz` /
//!   `barcodes.tsv.gz` directory into a labeled sparse [FeatureBarcodeTable].
//! - [load_probe_set]: read a probe set reference CSV and keep the included probes as a
//!   [ProbeSetTable], joinable to the matrix on `feature_id`.
//!
//! ```no_run
//! use visium_sc::{load_feature_barcode_matrix, load_probe_set};
//!
//! let table = load_feature_barcode_matrix("outs/filtered_feature_bc_matrix").unwrap();
//! let probes = load_probe_set("Visium_Human_Transcriptome_Probe_Set_v2.0_GRCh38.csv").unwrap();
//!
//! for feature_id in probes.feature_ids() {
//!     let rows = table.feature_id_positions(feature_id);
//!     println!("{feature_id}: {} row(s)", rows.len());
//! }
//! ```
pub mod errors;
pub mod mex;
pub mod models;
pub mod probe_set;

// re-exports
pub use errors::{Result, ScError};
pub use mex::{load_feature_barcode_matrix, write_feature_barcode_matrix};
pub use models::{Feature, FeatureBarcodeTable, ProbeRecord, ProbeSetMetadata, ProbeSetTable};
pub use probe_set::load_probe_set;
