pub mod feature;
pub mod probe_set;
pub mod table;

// re-export for cleaner imports
pub use self::feature::Feature;
pub use self::probe_set::{ProbeRecord, ProbeSetMetadata, ProbeSetTable};
pub use self::table::FeatureBarcodeTable;
