use serde::{Deserialize, Serialize};

pub const DEFAULT_REGION: &str = "us-east-1";

/// S3-compatible bucket holding uploaded documents and images
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_region")]
    pub region: String,
    pub bucket: String,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default)]
    pub path_style: bool,
    /// Base of the public URL returned after an upload, e.g. a CDN origin
    #[serde(default)]
    pub public_base_url: Option<String>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl StorageConfig {
    /// Build from `HELIOPS_STORAGE_*` values, `None` when no bucket is set
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let bucket = lookup("HELIOPS_STORAGE_BUCKET")?;

        Some(Self {
            endpoint: lookup("HELIOPS_STORAGE_ENDPOINT"),
            region: lookup("HELIOPS_STORAGE_REGION").unwrap_or_else(default_region),
            bucket,
            access_key: lookup("HELIOPS_STORAGE_ACCESS_KEY")
                .or_else(|| lookup("AWS_ACCESS_KEY_ID"))
                .unwrap_or_default(),
            secret_key: lookup("HELIOPS_STORAGE_SECRET_KEY")
                .or_else(|| lookup("AWS_SECRET_ACCESS_KEY"))
                .unwrap_or_default(),
            path_style: lookup("HELIOPS_STORAGE_PATH_STYLE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            public_base_url: lookup("HELIOPS_STORAGE_PUBLIC_URL"),
        })
    }

    /// Local MinIO with its default credentials
    pub fn for_minio(endpoint: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            region: default_region(),
            bucket: bucket.into(),
            access_key: "minioadmin".to_string(),
            secret_key: "minioadmin".to_string(),
            path_style: true,
            public_base_url: None,
        }
    }

    /// Public URL of an object key
    pub fn public_url(&self, key: &str) -> String {
        match (&self.public_base_url, &self.endpoint) {
            (Some(base), _) => format!("{}/{}", base.trim_end_matches('/'), key),
            (None, Some(endpoint)) => {
                format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key)
            },
            (None, None) => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }

    /// Same config with credentials masked, for display
    pub fn redacted(&self) -> Self {
        let mask = |s: &str| if s.is_empty() { String::new() } else { "****".to_string() };
        Self {
            access_key: mask(&self.access_key),
            secret_key: mask(&self.secret_key),
            ..self.clone()
        }
    }
}
