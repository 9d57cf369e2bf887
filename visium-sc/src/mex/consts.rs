pub const MATRIX_FILE_NAME: &str = "matrix.mtx.gz";
pub const FEATURES_FILE_NAME: &str = "features.tsv.gz";
pub const BARCODES_FILE_NAME: &str = "barcodes.tsv.gz";

pub const MATRIX_MARKET_BANNER: &str = "%%MatrixMarket";
pub const MATRIX_MARKET_HEADER: &str = "%%MatrixMarket matrix coordinate integer general";
