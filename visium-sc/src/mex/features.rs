use std::io::Read;
use std::path::Path;

use visium_core::utils::get_dynamic_reader;

use super::tsv_reader;
use crate::errors::{Result, ScError};
use crate::models::Feature;

///
/// The three columns of a `features.tsv.gz` file, index aligned:
/// - feature ids, e.g. `ENSG00000187634`
/// - gene names, e.g. `SAMD11`
/// - feature types, e.g. `Gene Expression`
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureColumns {
    pub feature_ids: Vec<String>,
    pub genes: Vec<String>,
    pub feature_types: Vec<String>,
}

impl FeatureColumns {
    pub fn len(&self) -> usize {
        self.feature_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feature_ids.is_empty()
    }

    /// Zip the columns into composite row keys, keeping file order.
    pub fn into_features(self) -> Vec<Feature> {
        self.feature_ids
            .into_iter()
            .zip(self.genes)
            .zip(self.feature_types)
            .map(|((feature_id, gene), feature_type)| Feature {
                feature_id,
                gene,
                feature_type,
            })
            .collect()
    }
}

/// Parse headerless `feature_id<TAB>gene<TAB>feature_type` lines.
pub fn parse_features<R: Read>(reader: R) -> Result<FeatureColumns> {
    let mut columns = FeatureColumns::default();

    for record in tsv_reader(reader).records() {
        let record = record?;
        if record.len() != 3 {
            return Err(ScError::FeatureFieldCount {
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                found: record.len(),
            });
        }
        columns.feature_ids.push(record[0].to_string());
        columns.genes.push(record[1].to_string());
        columns.feature_types.push(record[2].to_string());
    }

    Ok(columns)
}

///
/// Read a (gzip'd) `features.tsv.gz` file.
///
/// # Arguments
/// - path: path to the features file
///
pub fn read_features(path: &Path) -> Result<FeatureColumns> {
    let reader = get_dynamic_reader(path)?;
    parse_features(reader)
}
