use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use utoipa::ToSchema;

/// Which sorting scheme the server applies to an uploaded folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortVariant {
    /// CW/SW by filename, then academic year from the PDF's "Semester" line
    Semester,
    /// CW/SW/Uncategorized by filename only, no PDF parsing
    Simple,
}

impl FromStr for SortVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "semester" | "full" => Ok(Self::Semester),
            "simple" | "flat" => Ok(Self::Simple),
            other => Err(format!("unknown sort variant '{}'", other)),
        }
    }
}

/// What the placer does when the destination file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Replace the existing file (last writer wins)
    Overwrite,
    /// Pick a free name such as `notes (1).pdf`
    Rename,
    /// Leave the existing file alone and fail the placement
    Reject,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "rename" => Ok(Self::Rename),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown collision policy '{}'", other)),
        }
    }
}

/// Runtime configuration for the sorter
#[derive(Debug, Clone)]
pub struct SorterConfig {
    /// Staging directory for uploaded files (default: "uploads")
    pub upload_dir: PathBuf,

    /// Root of the sorted output tree (default: "output")
    pub output_dir: PathBuf,

    /// Append-only diagnostic log (default: "file_upload.log")
    pub log_file: PathBuf,

    /// Active sorting scheme (default: semester)
    pub variant: SortVariant,

    /// Destination collision handling (default: overwrite)
    pub collision_policy: CollisionPolicy,

    /// Maximum request body size in bytes (default: 512 MB)
    pub max_upload_size: usize,

    /// Allowed CORS Origins (comma separated)
    pub allowed_origins: Vec<String>,
}

impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            output_dir: PathBuf::from("output"),
            log_file: PathBuf::from("file_upload.log"),
            variant: SortVariant::Semester,
            collision_policy: CollisionPolicy::Overwrite,
            max_upload_size: 512 * 1024 * 1024, // 512 MB
            allowed_origins: vec![
                "http://localhost:5000".to_string(),
                "http://127.0.0.1:5000".to_string(),
            ],
        }
    }
}

impl SorterConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source; unset keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();

        Self {
            upload_dir: lookup("UPLOAD_FOLDER")
                .map(PathBuf::from)
                .unwrap_or(default.upload_dir),

            output_dir: lookup("OUTPUT_FOLDER")
                .map(PathBuf::from)
                .unwrap_or(default.output_dir),

            log_file: lookup("LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(default.log_file),

            variant: parse_or(&lookup, "SORT_VARIANT", default.variant),

            collision_policy: parse_or(&lookup, "COLLISION_POLICY", default.collision_policy),

            max_upload_size: parse_or(&lookup, "MAX_UPLOAD_SIZE", default.max_upload_size),

            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(default.allowed_origins),
        }
    }

    /// Config rooted in a scratch directory, used by tests and local runs
    pub fn development(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            upload_dir: root.join("uploads"),
            output_dir: root.join("output"),
            log_file: root.join("file_upload.log"),
            ..Self::default()
        }
    }

    pub fn with_variant(mut self, variant: SortVariant) -> Self {
        self.variant = variant;
        self
    }
}

fn parse_or<T>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!("Ignoring {}={:?} ({}), using {:?}", key, raw, e, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SorterConfig::default();
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.log_file, PathBuf::from("file_upload.log"));
        assert_eq!(config.variant, SortVariant::Semester);
        assert_eq!(config.collision_policy, CollisionPolicy::Overwrite);
    }

    #[test]
    fn test_development_config() {
        let config = SorterConfig::development("/tmp/sorter");
        assert_eq!(config.upload_dir, PathBuf::from("/tmp/sorter/uploads"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/sorter/output"));
        assert_eq!(config.variant, SortVariant::Semester);
    }

    #[test]
    fn test_parse_variant() {
        assert_eq!("semester".parse::<SortVariant>(), Ok(SortVariant::Semester));
        assert_eq!(" Simple ".parse::<SortVariant>(), Ok(SortVariant::Simple));
        assert!("yearly".parse::<SortVariant>().is_err());
    }

    #[test]
    fn test_parse_collision_policy() {
        assert_eq!(
            "RENAME".parse::<CollisionPolicy>(),
            Ok(CollisionPolicy::Rename)
        );
        assert_eq!(
            "reject".parse::<CollisionPolicy>(),
            Ok(CollisionPolicy::Reject)
        );
        assert!("merge".parse::<CollisionPolicy>().is_err());
    }

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars = [
            ("UPLOAD_FOLDER", "/srv/in"),
            ("SORT_VARIANT", "simple"),
            ("COLLISION_POLICY", "Rename"),
            ("MAX_UPLOAD_SIZE", "4096"),
            ("ALLOWED_ORIGINS", "http://a.test, http://b.test"),
        ];
        let config = SorterConfig::from_lookup(lookup_from(&vars));

        assert_eq!(config.upload_dir, PathBuf::from("/srv/in"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.variant, SortVariant::Simple);
        assert_eq!(config.collision_policy, CollisionPolicy::Rename);
        assert_eq!(config.max_upload_size, 4096);
        assert_eq!(config.allowed_origins, ["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_from_lookup_invalid_values_fall_back() {
        let vars = [
            ("SORT_VARIANT", "yearly"),
            ("COLLISION_POLICY", "merge"),
            ("MAX_UPLOAD_SIZE", "lots"),
        ];
        let config = SorterConfig::from_lookup(lookup_from(&vars));
        let default = SorterConfig::default();

        assert_eq!(config.variant, default.variant);
        assert_eq!(config.collision_policy, default.collision_policy);
        assert_eq!(config.max_upload_size, default.max_upload_size);
    }
}
