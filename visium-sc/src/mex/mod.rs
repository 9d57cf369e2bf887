//! # Feature-barcode matrices
//!
//! Reading (and writing) the MEX triad produced by single-cell and spatial gene expression
//! pipelines:
//! - `matrix.mtx.gz`: MatrixMarket coordinate counts, features x barcodes
//! - `features.tsv.gz`: one `feature_id<TAB>gene<TAB>feature_type` line per matrix row
//! - `barcodes.tsv.gz`: barcodes, one matrix column each
//!
//! The three files may sit anywhere below the directory handed to
//! [load_feature_barcode_matrix], but each name must be unique there.
pub mod barcodes;
pub mod consts;
pub mod features;
pub mod matrix;
pub mod writer;

use std::io::Read;
use std::path::Path;

use log::info;

use visium_core::utils::find_file_in_tree;

pub use barcodes::read_barcodes;
pub use consts::*;
pub use features::{read_features, FeatureColumns};
pub use matrix::read_matrix_market;
pub use writer::write_feature_barcode_matrix;

use crate::errors::{Result, ScError};
use crate::models::FeatureBarcodeTable;

/// Headerless, tab separated reader. Line lengths may vary.
pub(crate) fn tsv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

///
/// Load a feature-barcode matrix directory into a [FeatureBarcodeTable].
///
/// Rows are features in `features.tsv.gz` order, columns are barcodes in
/// `barcodes.tsv.gz` order, values are the counts in `matrix.mtx.gz`. Nothing is sorted
/// or deduplicated.
///
/// # Arguments
/// - feature_bc_matrix_dir: directory holding (possibly nested) the three matrix files
///
pub fn load_feature_barcode_matrix<P: AsRef<Path>>(
    feature_bc_matrix_dir: P,
) -> Result<FeatureBarcodeTable> {
    let dir = feature_bc_matrix_dir.as_ref();
    if !dir.is_dir() {
        return Err(ScError::NotADirectory(dir.to_path_buf()));
    }

    let matrix_path = find_file_in_tree(dir, MATRIX_FILE_NAME)?;
    let features_path = find_file_in_tree(dir, FEATURES_FILE_NAME)?;
    let barcodes_path = find_file_in_tree(dir, BARCODES_FILE_NAME)?;

    let counts = read_matrix_market(&matrix_path)?;
    let features = read_features(&features_path)?.into_features();
    let barcodes = read_barcodes(&barcodes_path)?;

    let table = FeatureBarcodeTable::new(features, barcodes, counts)?;

    let (rows, cols) = table.shape();
    info!(
        "Loaded {} features x {} barcodes ({} non-zero) from {}",
        rows,
        cols,
        table.nnz(),
        dir.display()
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::{create_dir_all, write, File};
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use ndarray::array;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use tempfile::{tempdir, TempDir};

    use crate::models::Feature;
    use visium_core::errors::FileLookupError;

    fn write_gz(path: &Path, content: &str) {
        let mut encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
        encoder.write_all(content.as_bytes()).unwrap();
        encoder.finish().unwrap();
    }

    #[fixture]
    fn matrix_dir() -> TempDir {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("filtered_feature_bc_matrix");
        create_dir_all(&nested).unwrap();

        write_gz(
            &nested.join(MATRIX_FILE_NAME),
            "%%MatrixMarket matrix coordinate integer general\n\
             %metadata_json: {}\n\
             3 2 4\n\
             1 1 4\n\
             3 1 1\n\
             2 2 7\n\
             3 2 2\n",
        );
        write_gz(
            &nested.join(FEATURES_FILE_NAME),
            "G1\tA\tGene Expression\nG2\tB\tGene Expression\nG3\tC\tGene Expression\n",
        );
        write_gz(&nested.join(BARCODES_FILE_NAME), "AAA-1\nBBB-1\n");
        dir
    }

    #[rstest]
    fn test_load_feature_barcode_matrix(matrix_dir: TempDir) {
        let table = load_feature_barcode_matrix(matrix_dir.path()).unwrap();

        assert_eq!(table.barcodes(), &["AAA-1".to_string(), "BBB-1".to_string()]);
        assert_eq!(
            table.features(),
            &[
                Feature::new("G1", "A", "Gene Expression"),
                Feature::new("G2", "B", "Gene Expression"),
                Feature::new("G3", "C", "Gene Expression"),
            ]
        );
        assert_eq!(table.to_dense(), array![[4, 0], [0, 7], [1, 2]]);
    }

    #[rstest]
    fn test_load_is_idempotent(matrix_dir: TempDir) {
        let first = load_feature_barcode_matrix(matrix_dir.path()).unwrap();
        let second = load_feature_barcode_matrix(matrix_dir.path()).unwrap();
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_regular_file_is_rejected(matrix_dir: TempDir) {
        let file = matrix_dir
            .path()
            .join("filtered_feature_bc_matrix")
            .join(BARCODES_FILE_NAME);
        let err = load_feature_barcode_matrix(&file).unwrap_err();
        assert!(matches!(err, ScError::NotADirectory(p) if p == file));
    }

    #[rstest]
    fn test_missing_path_is_rejected() {
        let dir = tempdir().unwrap();
        let err = load_feature_barcode_matrix(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ScError::NotADirectory(_)));
    }

    #[rstest]
    fn test_missing_file_surfaces_lookup_error(matrix_dir: TempDir) {
        std::fs::remove_file(
            matrix_dir
                .path()
                .join("filtered_feature_bc_matrix")
                .join(FEATURES_FILE_NAME),
        )
        .unwrap();

        let err = load_feature_barcode_matrix(matrix_dir.path()).unwrap_err();
        assert!(matches!(
            err,
            ScError::Lookup(FileLookupError::NotFound { ref filename, .. }) if filename == FEATURES_FILE_NAME
        ));
    }

    #[rstest]
    fn test_ambiguous_file_surfaces_lookup_error(matrix_dir: TempDir) {
        let raw = matrix_dir.path().join("raw_feature_bc_matrix");
        create_dir_all(&raw).unwrap();
        write_gz(&raw.join(BARCODES_FILE_NAME), "AAA-1\nBBB-1\n");

        let err = load_feature_barcode_matrix(matrix_dir.path()).unwrap_err();
        assert!(matches!(
            err,
            ScError::Lookup(FileLookupError::Ambiguous { .. })
        ));
    }

    #[rstest]
    fn test_label_count_mismatch_fails(matrix_dir: TempDir) {
        write_gz(
            &matrix_dir
                .path()
                .join("filtered_feature_bc_matrix")
                .join(BARCODES_FILE_NAME),
            "AAA-1\tBBB-1\nCCC-1\n",
        );

        let err = load_feature_barcode_matrix(matrix_dir.path()).unwrap_err();
        assert!(matches!(
            err,
            ScError::DimensionMismatch {
                axis: "barcode",
                expected: 2,
                found: 3
            }
        ));
    }

    #[rstest]
    fn test_write_then_load(matrix_dir: TempDir) {
        let table = load_feature_barcode_matrix(matrix_dir.path()).unwrap();

        let out = tempdir().unwrap();
        let out_dir = out.path().join("copy");
        write_feature_barcode_matrix(&table, &out_dir).unwrap();

        let reloaded = load_feature_barcode_matrix(&out_dir).unwrap();
        assert_eq!(reloaded, table);
    }

    #[rstest]
    fn test_uncompressed_names_are_not_matched() {
        let dir = tempdir().unwrap();
        write(dir.path().join("matrix.mtx"), "").unwrap();
        let err = load_feature_barcode_matrix(dir.path()).unwrap_err();
        assert!(matches!(err, ScError::Lookup(FileLookupError::NotFound { .. })));
    }
}
