use crate::config::SortVariant;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use utoipa::ToSchema;

/// Bucket a file is sorted into by its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
pub enum Category {
    #[serde(rename = "CW")]
    Cw,
    #[serde(rename = "SW")]
    Sw,
    Uncategorized,
}

impl Category {
    /// Categories a variant can produce, in report order
    pub fn for_variant(variant: SortVariant) -> &'static [Category] {
        match variant {
            SortVariant::Semester => &[Self::Cw, Self::Sw],
            SortVariant::Simple => &[Self::Cw, Self::Sw, Self::Uncategorized],
        }
    }

    /// Classifies a file by its lower-cased base name.
    ///
    /// The semester variant has no uncategorized bucket: anything without
    /// "cw" in its name is SW, even if it does not contain "sw" either.
    /// The simple variant requires a positive "sw" match.
    pub fn classify(filename: &str, variant: SortVariant) -> Category {
        let base = Path::new(filename)
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| filename.to_lowercase());

        tracing::debug!("Base filename: {}", base);

        if base.contains("cw") {
            return Self::Cw;
        }

        match variant {
            SortVariant::Semester => Self::Sw,
            SortVariant::Simple if base.contains("sw") => Self::Sw,
            SortVariant::Simple => Self::Uncategorized,
        }
    }

    /// Directory name under the output root
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cw => "CW",
            Self::Sw => "SW",
            Self::Uncategorized => "Uncategorized",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
