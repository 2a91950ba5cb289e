//! Files adapter selection

use crate::env::{vars, EnvironmentMap};
use tracing::{debug, info};
use types::utils::parse_flag;
use types::FilesAdapterConfig;

/// Amazon S3 inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3Inputs {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub bucket: Option<String>,
    pub direct: Option<String>,
}

impl S3Inputs {
    pub fn from_env(env: &EnvironmentMap) -> Self {
        Self {
            access_key: env.get_owned(vars::S3_ACCESS_KEY),
            secret_key: env.get_owned(vars::S3_SECRET_KEY),
            bucket: env.get_owned(vars::S3_BUCKET),
            direct: env.get_owned(vars::S3_DIRECT),
        }
    }
}

/// Google Cloud Storage inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GcsInputs {
    pub project_id: Option<String>,
    pub keyfile_path: Option<String>,
    pub bucket: Option<String>,
    pub direct: Option<String>,
}

impl GcsInputs {
    pub fn from_env(env: &EnvironmentMap) -> Self {
        Self {
            project_id: env.get_owned(vars::GCP_PROJECT_ID),
            keyfile_path: env.get_owned(vars::GCP_KEYFILE_PATH),
            bucket: env.get_owned(vars::GCS_BUCKET),
            direct: env.get_owned(vars::GCS_DIRECT),
        }
    }
}

/// Picks at most one files adapter. S3 wins over GCS when both are complete.
pub struct StorageAdapterSelector;

impl StorageAdapterSelector {
    pub fn select(s3: &S3Inputs, gcs: &GcsInputs) -> FilesAdapterConfig {
        if let Some((access_key, secret_key, bucket)) =
            complete(&s3.access_key, &s3.secret_key, &s3.bucket)
        {
            let direct_access = parse_flag(s3.direct.as_deref());
            info!(bucket, direct_access, "Using S3 files adapter");
            return FilesAdapterConfig::S3 {
                access_key: access_key.to_string(),
                secret_key: secret_key.to_string(),
                bucket: bucket.to_string(),
                direct_access,
            };
        }

        if let Some((project_id, keyfile_path, bucket)) =
            complete(&gcs.project_id, &gcs.keyfile_path, &gcs.bucket)
        {
            let direct_access = parse_flag(gcs.direct.as_deref());
            info!(project_id, bucket, direct_access, "Using GCS files adapter");
            return FilesAdapterConfig::Gcs {
                project_id: project_id.to_string(),
                keyfile_path: keyfile_path.to_string(),
                bucket: bucket.to_string(),
                direct_access,
            };
        }

        debug!("No files adapter configured, server default applies");
        FilesAdapterConfig::Default
    }

    pub fn select_from_env(env: &EnvironmentMap) -> FilesAdapterConfig {
        Self::select(&S3Inputs::from_env(env), &GcsInputs::from_env(env))
    }
}

fn complete<'a>(
    a: &'a Option<String>,
    b: &'a Option<String>,
    c: &'a Option<String>,
) -> Option<(&'a str, &'a str, &'a str)> {
    let present = |v: &'a Option<String>| v.as_deref().filter(|s| !s.is_empty());
    Some((present(a)?, present(b)?, present(c)?))
}
