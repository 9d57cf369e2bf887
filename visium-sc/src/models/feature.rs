use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

///
/// A measured feature (gene or genomic region). Used as the composite row key of a
/// [FeatureBarcodeTable](crate::models::FeatureBarcodeTable).
///
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Feature {
    /// e.g. `ENSG00000187634`
    pub feature_id: String,
    /// e.g. `SAMD11`
    pub gene: String,
    /// e.g. `Gene Expression`
    pub feature_type: String,
}

impl Feature {
    pub fn new<S: Into<String>>(feature_id: S, gene: S, feature_type: S) -> Self {
        Feature {
            feature_id: feature_id.into(),
            gene: gene.into(),
            feature_type: feature_type.into(),
        }
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.feature_id, self.gene, self.feature_type)
    }
}

impl<S: Into<String>> From<(S, S, S)> for Feature {
    fn from(value: (S, S, S)) -> Self {
        Feature::new(value.0, value.1, value.2)
    }
}
