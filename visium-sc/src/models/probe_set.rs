use std::collections::HashMap;
use std::ops::Deref;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name of the join key column, renamed from `gene_id` on load.
pub const FEATURE_ID_COLUMN: &str = "feature_id";

/// `key=value` pairs read from the `#` comment lines of a probe set CSV.
/// ```csv
/// #probe_set_file_format=1.0
/// #panel_name=Visium Human Transcriptome Probe Set
/// #reference_genome=GRCh38
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProbeSetMetadata(pub HashMap<String, String>);

impl Deref for ProbeSetMetadata {
    type Target = HashMap<String, String>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ProbeSetMetadata {
    /// Return true if the metadata declares a probe set file format.
    pub fn is_probe_set_metadata(&self) -> bool {
        self.0.contains_key("probe_set_file_format")
    }
}

/// One retained probe: its field values, aligned with [ProbeSetTable::columns].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProbeRecord {
    pub fields: Vec<String>,
}

impl ProbeRecord {
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }
}

///
/// Probes whose `included` flag is true. The `included` column is gone and
/// `gene_id` is called `feature_id`; every other column is kept in file order.
///
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProbeSetTable {
    pub columns: Vec<String>,
    pub records: Vec<ProbeRecord>,
    pub metadata: ProbeSetMetadata,
}

impl ProbeSetTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.records
                .iter()
                .map(|r| r.get(idx).unwrap_or_default())
                .collect(),
        )
    }

    pub fn feature_ids(&self) -> Vec<&str> {
        self.column(FEATURE_ID_COLUMN).unwrap_or_default()
    }

    pub fn metadata(&self) -> &ProbeSetMetadata {
        &self.metadata
    }
}
