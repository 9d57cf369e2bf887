use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use log::info;

use super::consts::{BARCODES_FILE_NAME, FEATURES_FILE_NAME, MATRIX_FILE_NAME, MATRIX_MARKET_HEADER};
use crate::errors::Result;
use crate::models::FeatureBarcodeTable;

fn gz_writer(path: &Path) -> Result<BufWriter<GzEncoder<File>>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(GzEncoder::new(file, Compression::default())))
}

fn finish(writer: BufWriter<GzEncoder<File>>) -> Result<()> {
    let encoder = writer.into_inner().map_err(|e| e.into_error())?;
    encoder.finish()?;
    Ok(())
}

///
/// Write a table to disk as the `matrix.mtx.gz`, `features.tsv.gz` and `barcodes.tsv.gz`
/// triad, readable by [load_feature_barcode_matrix](super::load_feature_barcode_matrix).
///
/// Triplets come out sorted by (row, col) and 1-indexed.
///
/// # Arguments
/// - table: the table to write
/// - out_dir: directory to write into; created if missing
///
pub fn write_feature_barcode_matrix<P: AsRef<Path>>(
    table: &FeatureBarcodeTable,
    out_dir: P,
) -> Result<()> {
    let out_dir = out_dir.as_ref();
    create_dir_all(out_dir)?;

    // 1. matrix.mtx.gz
    let (rows, cols) = table.shape();
    let mut mtx_writer = gz_writer(&out_dir.join(MATRIX_FILE_NAME))?;
    writeln!(mtx_writer, "{}", MATRIX_MARKET_HEADER)?;
    writeln!(mtx_writer, "{} {} {}", rows, cols, table.nnz())?;

    // CSR rows are visited in order and their column indices are sorted
    for (row_idx, row) in table.counts().outer_iterator().enumerate() {
        for (col_idx, value) in row.iter() {
            writeln!(mtx_writer, "{} {} {}", row_idx + 1, col_idx + 1, value)?;
        }
    }
    finish(mtx_writer)?;

    // 2. features.tsv.gz
    let mut features_writer = gz_writer(&out_dir.join(FEATURES_FILE_NAME))?;
    for feature in table.features() {
        writeln!(features_writer, "{}", feature)?;
    }
    finish(features_writer)?;

    // 3. barcodes.tsv.gz
    let mut barcodes_writer = gz_writer(&out_dir.join(BARCODES_FILE_NAME))?;
    for barcode in table.barcodes() {
        writeln!(barcodes_writer, "{}", barcode)?;
    }
    finish(barcodes_writer)?;

    info!(
        "Wrote {} x {} feature-barcode matrix ({} entries) to {}",
        rows,
        cols,
        table.nnz(),
        out_dir.display()
    );

    Ok(())
}
