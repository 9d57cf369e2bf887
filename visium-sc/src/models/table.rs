use std::hash::Hash;

use fxhash::FxHashMap;
use ndarray::Array2;
use sprs::CsMat;

use crate::errors::{Result, ScError};
use crate::models::Feature;

///
/// A labeled, sparse feature-by-barcode count table.
///
/// Rows are keyed by [Feature] and columns by barcode, both in the order they were read.
/// Keys are labels, not a set: duplicates are kept at their positions, and the position
/// indices map each key to every position it occupies.
///
#[derive(Clone, Debug)]
pub struct FeatureBarcodeTable {
    features: Vec<Feature>,
    barcodes: Vec<String>,
    counts: CsMat<u32>,
    feature_index: FxHashMap<Feature, Vec<usize>>,
    feature_id_index: FxHashMap<String, Vec<usize>>,
    barcode_index: FxHashMap<String, Vec<usize>>,
}

fn position_index<K: Clone + Eq + Hash>(keys: &[K]) -> FxHashMap<K, Vec<usize>> {
    let mut index: FxHashMap<K, Vec<usize>> = FxHashMap::default();
    for (pos, key) in keys.iter().enumerate() {
        index.entry(key.clone()).or_default().push(pos);
    }
    index
}

impl FeatureBarcodeTable {
    ///
    /// Build a table from its row labels, column labels and counts.
    ///
    /// Fails with [ScError::DimensionMismatch] when the number of features differs from
    /// the number of matrix rows, or the number of barcodes from the number of columns.
    /// Counts are stored row-major.
    ///
    pub fn new(features: Vec<Feature>, barcodes: Vec<String>, counts: CsMat<u32>) -> Result<Self> {
        let counts = match counts.is_csr() {
            true => counts,
            false => counts.to_other_storage(),
        };
        if features.len() != counts.rows() {
            return Err(ScError::DimensionMismatch {
                axis: "feature",
                expected: counts.rows(),
                found: features.len(),
            });
        }
        if barcodes.len() != counts.cols() {
            return Err(ScError::DimensionMismatch {
                axis: "barcode",
                expected: counts.cols(),
                found: barcodes.len(),
            });
        }

        let feature_index = position_index(&features);
        let feature_id_index = position_index(
            &features
                .iter()
                .map(|f| f.feature_id.clone())
                .collect::<Vec<_>>(),
        );
        let barcode_index = position_index(&barcodes);

        Ok(FeatureBarcodeTable {
            features,
            barcodes,
            counts,
            feature_index,
            feature_id_index,
            barcode_index,
        })
    }

    /// (number of features, number of barcodes)
    pub fn shape(&self) -> (usize, usize) {
        self.counts.shape()
    }

    /// Number of explicitly stored entries.
    pub fn nnz(&self) -> usize {
        self.counts.nnz()
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn feature_ids(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.feature_id.as_str())
    }

    pub fn barcodes(&self) -> &[String] {
        &self.barcodes
    }

    pub fn counts(&self) -> &CsMat<u32> {
        &self.counts
    }

    ///
    /// Count at (row, col). Implicit zeros come back as `Some(0)`; `None` means the
    /// position is out of bounds.
    ///
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        let (rows, cols) = self.shape();
        if row >= rows || col >= cols {
            return None;
        }
        Some(self.counts.get(row, col).copied().unwrap_or(0))
    }

    /// Every row position labeled with `feature`, in order.
    pub fn feature_positions(&self, feature: &Feature) -> &[usize] {
        self.feature_index
            .get(feature)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every row position whose feature carries `feature_id`, in order.
    pub fn feature_id_positions(&self, feature_id: &str) -> &[usize] {
        self.feature_id_index
            .get(feature_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every column position labeled with `barcode`, in order.
    pub fn barcode_positions(&self, barcode: &str) -> &[usize] {
        self.barcode_index
            .get(barcode)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn to_dense(&self) -> Array2<u32> {
        self.counts.to_dense()
    }

    pub fn into_parts(self) -> (Vec<Feature>, Vec<String>, CsMat<u32>) {
        (self.features, self.barcodes, self.counts)
    }
}

impl PartialEq for FeatureBarcodeTable {
    fn eq(&self, other: &Self) -> bool {
        // the position indices are derived from the labels
        self.features == other.features
            && self.barcodes == other.barcodes
            && self.counts.shape() == other.counts.shape()
            && self.counts.is_csr() == other.counts.is_csr()
            && self.counts.proper_indptr() == other.counts.proper_indptr()
            && self.counts.indices() == other.counts.indices()
            && self.counts.data() == other.counts.data()
    }
}

impl Eq for FeatureBarcodeTable {}
