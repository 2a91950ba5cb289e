//! File storage adapter selection result

use serde::{Deserialize, Serialize};

/// The files adapter the Parse Server should be constructed with.
///
/// `Default` leaves the choice to the server itself (GridFS / local storage).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "adapter", rename_all = "lowercase")]
pub enum FilesAdapterConfig {
    /// Amazon S3
    #[serde(rename_all = "camelCase")]
    S3 {
        access_key: String,
        secret_key: String,
        bucket: String,
        direct_access: bool,
    },
    /// Google Cloud Storage
    #[serde(rename_all = "camelCase")]
    Gcs {
        project_id: String,
        keyfile_path: String,
        bucket: String,
        direct_access: bool,
    },
    #[default]
    Default,
}

impl FilesAdapterConfig {
    /// Short provider name for logs and status output
    pub fn provider(&self) -> &'static str {
        match self {
            FilesAdapterConfig::S3 { .. } => "s3",
            FilesAdapterConfig::Gcs { .. } => "gcs",
            FilesAdapterConfig::Default => "default",
        }
    }

    pub fn bucket(&self) -> Option<&str> {
        match self {
            FilesAdapterConfig::S3 { bucket, .. } | FilesAdapterConfig::Gcs { bucket, .. } => {
                Some(bucket)
            }
            FilesAdapterConfig::Default => None,
        }
    }

    pub fn direct_access(&self) -> bool {
        match self {
            FilesAdapterConfig::S3 { direct_access, .. }
            | FilesAdapterConfig::Gcs { direct_access, .. } => *direct_access,
            FilesAdapterConfig::Default => false,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, FilesAdapterConfig::Default)
    }
}
