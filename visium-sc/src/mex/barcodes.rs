use std::io::Read;
use std::path::Path;

use visium_core::utils::get_dynamic_reader;

use super::tsv_reader;
use crate::errors::Result;

///
/// Parse barcode lines into a single list.
///
/// Every tab separated field of every line is appended in order, so a line holding
/// `X1<TAB>X2` contributes two barcodes.
///
pub fn parse_barcodes<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut barcodes = Vec::new();
    for record in tsv_reader(reader).records() {
        barcodes.extend(record?.iter().map(str::to_string));
    }
    Ok(barcodes)
}

///
/// Read a (gzip'd) `barcodes.tsv.gz` file, e.g. `AAACAAGTATCTCCCA-1` per line.
///
/// # Arguments
/// - path: path to the barcodes file
///
pub fn read_barcodes(path: &Path) -> Result<Vec<String>> {
    let reader = get_dynamic_reader(path)?;
    parse_barcodes(reader)
}
