use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use glob::{glob, Pattern};
use log::debug;

use crate::errors::FileLookupError;

///
/// Check whether a path points at a gzip'd file, judging by its extension.
///
pub fn is_gzipped(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("gz"))
}

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// The file handle is owned by the returned reader and closed when it is dropped.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> io::Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("Failed to open file {}: {}", path.display(), e),
        )
    })?;

    let file: Box<dyn Read> = match is_gzipped(path) {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Find the single file called `filename` anywhere below `root` (including `root` itself).
///
/// Fails with [FileLookupError::NotFound] when nothing matches and with
/// [FileLookupError::Ambiguous] when more than one file matches.
///
/// # Arguments
///
/// - root: directory to search
/// - filename: exact file name to look for, e.g. `matrix.mtx.gz`
///
pub fn find_file_in_tree<P: AsRef<Path>>(
    root: P,
    filename: &str,
) -> Result<PathBuf, FileLookupError> {
    let root = root.as_ref();
    let pattern = format!(
        "{}/**/{}",
        Pattern::escape(&root.to_string_lossy()),
        Pattern::escape(filename)
    );

    let mut candidates = glob(&pattern)?
        .map(|entry| entry.map_err(|e| FileLookupError::Io(e.into_error())))
        .collect::<Result<Vec<_>, _>>()?;

    // a directory can carry the same name
    candidates.retain(|path| path.is_file());
    candidates.sort();

    debug!(
        "Found {} candidate(s) for '{}' under {}",
        candidates.len(),
        filename,
        root.display()
    );

    match candidates.len() {
        0 => Err(FileLookupError::NotFound {
            root: root.to_path_buf(),
            filename: filename.to_string(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(FileLookupError::Ambiguous {
            root: root.to_path_buf(),
            filename: filename.to_string(),
            candidates,
        }),
    }
}
