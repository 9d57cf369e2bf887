use std::io::BufRead;
use std::path::Path;

use log::debug;
use sprs::{CsMat, TriMat};

use visium_core::utils::get_dynamic_reader;

use super::consts::MATRIX_MARKET_BANNER;
use crate::errors::{Result, ScError};

/// Value type declared in the MatrixMarket banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MatrixField {
    Integer,
    /// Entries carry no value; every listed entry counts as 1.
    Pattern,
}

fn malformed<S: Into<String>>(line: usize, msg: S) -> ScError {
    ScError::MatrixMarket {
        line,
        msg: msg.into(),
    }
}

fn parse_banner(banner: &str, line: usize) -> Result<MatrixField> {
    let tokens: Vec<String> = banner
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect();

    let expected_banner = MATRIX_MARKET_BANNER.to_lowercase();
    if tokens.first() != Some(&expected_banner) {
        return Err(malformed(line, "missing %%MatrixMarket header"));
    }
    if tokens.len() != 5 {
        return Err(malformed(
            line,
            format!("expected 5 header tokens, found {}", tokens.len()),
        ));
    }
    if tokens[1] != "matrix" || tokens[2] != "coordinate" {
        return Err(ScError::UnsupportedMatrixFormat(format!(
            "{} {}",
            tokens[1], tokens[2]
        )));
    }

    let field = match tokens[3].as_str() {
        "integer" => MatrixField::Integer,
        "pattern" => MatrixField::Pattern,
        other => {
            return Err(ScError::UnsupportedMatrixFormat(format!(
                "field type '{}'",
                other
            )));
        }
    };

    if tokens[4] != "general" {
        return Err(ScError::UnsupportedMatrixFormat(format!(
            "symmetry '{}'",
            tokens[4]
        )));
    }

    Ok(field)
}

fn parse_index(token: &str, bound: usize, axis: &str, line: usize) -> Result<usize> {
    let idx = token
        .parse::<usize>()
        .map_err(|_| malformed(line, format!("invalid {} index '{}'", axis, token)))?;

    // 1-indexed on disk
    if idx == 0 || idx > bound {
        return Err(malformed(
            line,
            format!("{} index {} outside 1..={}", axis, idx, bound),
        ));
    }
    Ok(idx - 1)
}

/// Upper bound on declared rows / columns; indices are 32-bit in pipeline outputs.
pub const MAX_MATRIX_DIM: usize = u32::MAX as usize;

/// Entries pre-allocated from the size line; the rest grows as entries are read.
const MAX_PREALLOCATED_ENTRIES: usize = 1 << 20;

/// Declared shape and entry count, plus the entries read so far.
struct Coordinates {
    rows: usize,
    cols: usize,
    nnz: usize,
    /// (row, col, value, line)
    entries: Vec<(usize, usize, u32, usize)>,
}

fn parse_size_line(parts: &[&str], line: usize) -> Result<Coordinates> {
    if parts.len() != 3 {
        return Err(malformed(line, "expected 'rows cols nnz'"));
    }
    let mut dims = [0_usize; 3];
    for (dim, token) in dims.iter_mut().zip(parts.iter()) {
        *dim = token
            .parse()
            .map_err(|_| malformed(line, format!("invalid size '{}'", token)))?;
    }
    let [rows, cols, nnz] = dims;

    if rows > MAX_MATRIX_DIM || cols > MAX_MATRIX_DIM {
        return Err(malformed(
            line,
            format!("dimensions {} x {} exceed {}", rows, cols, MAX_MATRIX_DIM),
        ));
    }

    debug!("MatrixMarket dimensions: {} x {}, {} entries", rows, cols, nnz);
    Ok(Coordinates {
        rows,
        cols,
        nnz,
        entries: Vec::with_capacity(nnz.min(MAX_PREALLOCATED_ENTRIES)),
    })
}

///
/// Parse MatrixMarket coordinate content into a CSR matrix of counts.
///
/// Duplicate coordinates are summed; a sum that does not fit in a `u32` is an error.
///
pub fn parse_matrix_market<R: BufRead>(reader: R) -> Result<CsMat<u32>> {
    let mut lines = reader.lines().enumerate().map(|(i, l)| (i + 1, l));

    let field = match lines.next() {
        Some((line_num, banner)) => parse_banner(&banner?, line_num)?,
        None => return Err(malformed(1, "empty file")),
    };

    let mut coords: Option<Coordinates> = None;

    for (line_num, line) in lines {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();

        let Some(state) = coords.as_mut() else {
            // first data line holds the dimensions
            coords = Some(parse_size_line(&parts, line_num)?);
            continue;
        };

        let expected_fields = match field {
            MatrixField::Integer => 3,
            MatrixField::Pattern => 2,
        };
        if parts.len() != expected_fields {
            return Err(malformed(
                line_num,
                format!("expected {} fields, found {}", expected_fields, parts.len()),
            ));
        }

        if state.entries.len() >= state.nnz {
            return Err(malformed(
                line_num,
                format!("more entries than the {} declared", state.nnz),
            ));
        }

        let row = parse_index(parts[0], state.rows, "row", line_num)?;
        let col = parse_index(parts[1], state.cols, "column", line_num)?;
        let value = match field {
            MatrixField::Integer => parts[2]
                .parse::<u32>()
                .map_err(|_| malformed(line_num, format!("invalid count '{}'", parts[2])))?,
            MatrixField::Pattern => 1,
        };

        state.entries.push((row, col, value, line_num));
    }

    let Some(mut coords) = coords else {
        return Err(malformed(0, "missing 'rows cols nnz' size line"));
    };
    if coords.entries.len() != coords.nnz {
        return Err(malformed(
            0,
            format!(
                "declared {} entries but found {}",
                coords.nnz,
                coords.entries.len()
            ),
        ));
    }

    // stable sort keeps duplicates in file order, so overflow is reported on the later line
    coords.entries.sort_by_key(|&(row, col, _, _)| (row, col));

    let mut tri = TriMat::with_capacity((coords.rows, coords.cols), coords.entries.len());
    let mut pending: Option<(usize, usize, u32)> = None;
    for (row, col, value, line_num) in coords.entries {
        pending = match pending {
            Some((r, c, sum)) if (r, c) == (row, col) => {
                let sum = sum.checked_add(value).ok_or_else(|| {
                    malformed(
                        line_num,
                        format!("summed count at ({}, {}) overflows u32", row + 1, col + 1),
                    )
                })?;
                Some((r, c, sum))
            }
            Some((r, c, sum)) => {
                tri.add_triplet(r, c, sum);
                Some((row, col, value))
            }
            None => Some((row, col, value)),
        };
    }
    if let Some((r, c, sum)) = pending {
        tri.add_triplet(r, c, sum);
    }

    Ok(tri.to_csr())
}

///
/// Read a (gzip'd) MatrixMarket coordinate file, e.g. `matrix.mtx.gz`.
///
/// # Arguments
/// - path: path to the matrix file
///
pub fn read_matrix_market(path: &Path) -> Result<CsMat<u32>> {
    let reader = get_dynamic_reader(path)?;
    parse_matrix_market(reader)
}
