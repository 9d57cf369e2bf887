//! # Probe set references
//!
//! A probe set reference CSV lists every capture probe of a panel together with an
//! `included` flag. Probes predicted to have off-target activity are marked `FALSE` there
//! and are left out of filtered outputs.
//!
//! Filtering here is strictly per row: a probe is kept iff its own `included` value is
//! true. Excluding a whole gene because one of its probes is off-target, or dropping
//! `DEPRECATED`-prefixed probe ids, is expected to already be reflected in the CSV.
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use log::info;

use visium_core::utils::get_dynamic_reader;

use crate::errors::{Result, ScError};
use crate::models::probe_set::FEATURE_ID_COLUMN;
use crate::models::{ProbeRecord, ProbeSetMetadata, ProbeSetTable};

pub const GENE_ID_COLUMN: &str = "gene_id";
pub const INCLUDED_COLUMN: &str = "included";

const COMMENT: char = '#';

/// Collect `#key=value` comment lines; other comments carry no metadata.
fn parse_comment_metadata(content: &str) -> ProbeSetMetadata {
    let pairs: HashMap<String, String> = content
        .lines()
        .filter_map(|line| line.strip_prefix(COMMENT))
        .filter_map(|comment| comment.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect();
    ProbeSetMetadata(pairs)
}

fn parse_included(value: &str, line: u64) -> Result<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ScError::InvalidIncluded {
            line,
            value: value.to_string(),
        })
    }
}

///
/// Parse probe set CSV content and keep the included probes.
///
/// `#` lines are skipped wherever they appear, `gene_id` is renamed to `feature_id` and
/// the `included` column is dropped.
///
pub fn parse_probe_set<R: Read>(mut reader: R) -> Result<ProbeSetTable> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    let metadata = parse_comment_metadata(&content);

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .comment(Some(COMMENT as u8))
        .from_reader(content.as_bytes());

    let header = csv_reader.headers()?.clone();
    let gene_id_idx = header
        .iter()
        .position(|h| h == GENE_ID_COLUMN)
        .ok_or(ScError::MissingColumn(GENE_ID_COLUMN))?;
    let included_idx = header
        .iter()
        .position(|h| h == INCLUDED_COLUMN)
        .ok_or(ScError::MissingColumn(INCLUDED_COLUMN))?;

    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != included_idx)
        .map(|(idx, name)| match idx == gene_id_idx {
            true => FEATURE_ID_COLUMN.to_string(),
            false => name.to_string(),
        })
        .collect();

    let mut records = Vec::new();
    let mut total = 0_usize;
    for record in csv_reader.records() {
        let record = record?;
        total += 1;

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        if !parse_included(&record[included_idx], line)? {
            continue;
        }

        let fields = record
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != included_idx)
            .map(|(_, value)| value.to_string())
            .collect();
        records.push(ProbeRecord { fields });
    }

    info!("Kept {} of {} probes", records.len(), total);

    Ok(ProbeSetTable {
        columns,
        records,
        metadata,
    })
}

///
/// Load a probe set reference CSV, keeping only probes marked as included.
///
/// # Arguments
/// - probe_set_path: path to the (optionally gzip'd) probe set CSV
///
pub fn load_probe_set<P: AsRef<Path>>(probe_set_path: P) -> Result<ProbeSetTable> {
    let reader = get_dynamic_reader(probe_set_path.as_ref())?;
    parse_probe_set(reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_filter_and_rename() {
        let content = "# comment\ngene_id,included,extra\nG1,True,x\nG2,False,y\n";
        let table = parse_probe_set(content.as_bytes()).unwrap();

        assert_eq!(table.columns, vec!["feature_id", "extra"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].fields, vec!["G1", "x"]);
        assert_eq!(table.column_index(GENE_ID_COLUMN), None);
        assert_eq!(table.column_index(INCLUDED_COLUMN), None);
    }

    #[rstest]
    fn test_columns_keep_original_order() {
        let content = "probe_seq,probe_id,included,gene_id,region\n\
                       ACGT,ENSG1|A|1,TRUE,ENSG1,spliced\n\
                       TTTT,ENSG2|B|1,TRUE,ENSG2,unspliced\n\
                       GGGG,DEPRECATED_ENSG3|C|1,FALSE,ENSG3,spliced\n";
        let table = parse_probe_set(content.as_bytes()).unwrap();

        assert_eq!(
            table.columns,
            vec!["probe_seq", "probe_id", "feature_id", "region"]
        );
        assert_eq!(table.feature_ids(), vec!["ENSG1", "ENSG2"]);
        assert_eq!(table.column("region").unwrap(), vec!["spliced", "unspliced"]);
    }

    #[rstest]
    fn test_comments_anywhere_are_skipped() {
        let content = "#probe_set_file_format=1.0\n\
                       #panel_name=Visium Human Transcriptome Probe Set\n\
                       gene_id,probe_id,included\n\
                       G1,P1,true\n\
                       # mid-file note\n\
                       G2,P2,true\n";
        let table = parse_probe_set(content.as_bytes()).unwrap();

        assert_eq!(table.feature_ids(), vec!["G1", "G2"]);
        assert!(table.metadata().is_probe_set_metadata());
        assert_eq!(
            table.metadata().get("panel_name").map(String::as_str),
            Some("Visium Human Transcriptome Probe Set")
        );
        assert_eq!(table.metadata().len(), 2);
    }

    #[rstest]
    fn test_filter_is_row_local() {
        // one off-target probe does not take the gene's other probes with it
        let content = "gene_id,probe_id,included\nG1,P1,TRUE\nG1,P2,FALSE\n";
        let table = parse_probe_set(content.as_bytes()).unwrap();

        assert_eq!(table.column("probe_id").unwrap(), vec!["P1"]);
    }

    #[rstest]
    fn test_all_excluded() {
        let content = "gene_id,included\nG1,False\n";
        let table = parse_probe_set(content.as_bytes()).unwrap();

        assert!(table.is_empty());
        assert_eq!(table.columns, vec!["feature_id"]);
    }

    #[rstest]
    #[case("included,extra\nTrue,x\n", GENE_ID_COLUMN)]
    #[case("gene_id,extra\nG1,x\n", INCLUDED_COLUMN)]
    fn test_missing_column(#[case] content: &str, #[case] column: &str) {
        let err = parse_probe_set(content.as_bytes()).unwrap_err();
        assert!(matches!(err, ScError::MissingColumn(c) if c == column));
    }

    #[rstest]
    fn test_invalid_included_value() {
        let content = "gene_id,included\nG1,True\nG2,maybe\n";
        let err = parse_probe_set(content.as_bytes()).unwrap_err();
        match err {
            ScError::InvalidIncluded { line, value } => {
                assert_eq!((line, value.as_str()), (3, "maybe"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
