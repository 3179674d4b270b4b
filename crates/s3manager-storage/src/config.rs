use s3manager_common::error::{ManagerError, Result};
use url::Url;

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone)]
pub struct S3Config {
    /// `host[:port]` or a full URL. A bare host gets its scheme from `use_ssl`.
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub use_ssl: bool,
    pub path_style: bool,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            endpoint: "s3.amazonaws.com".to_string(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            region: DEFAULT_REGION.to_string(),
            use_ssl: true,
            path_style: true,
        }
    }
}

impl S3Config {
    pub fn endpoint_url(&self) -> Result<String> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ManagerError::InvalidArgument(
                "endpoint must not be empty".to_string(),
            ));
        }

        let candidate = if endpoint.contains("://") {
            endpoint.to_string()
        } else {
            let scheme = if self.use_ssl { "https" } else { "http" };
            format!("{scheme}://{endpoint}")
        };

        let url = Url::parse(&candidate).map_err(|err| {
            ManagerError::InvalidArgument(format!("invalid endpoint {endpoint:?}: {err}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ManagerError::InvalidArgument(format!(
                "endpoint must be an http(s) host: {endpoint}"
            )));
        }

        Ok(url.as_str().trim_end_matches('/').to_string())
    }

    pub fn validate(&self) -> Result<()> {
        if self.access_key_id.is_empty() || self.secret_access_key.is_empty() {
            return Err(ManagerError::InvalidArgument(
                "access key id and secret access key are required".to_string(),
            ));
        }
        self.endpoint_url().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str, use_ssl: bool) -> S3Config {
        S3Config {
            endpoint: endpoint.to_string(),
            access_key_id: "access".to_string(),
            secret_access_key: "secret".to_string(),
            use_ssl,
            ..S3Config::default()
        }
    }

    #[test]
    fn bare_host_gets_scheme_from_ssl_flag() {
        assert_eq!(
            config("localhost:9000", false).endpoint_url().unwrap(),
            "http://localhost:9000"
        );
        assert_eq!(
            config("s3.amazonaws.com", true).endpoint_url().unwrap(),
            "https://s3.amazonaws.com"
        );
    }

    #[test]
    fn explicit_scheme_wins() {
        assert_eq!(
            config("http://minio.internal:9000/", true).endpoint_url().unwrap(),
            "http://minio.internal:9000"
        );
    }

    #[test]
    fn rejects_empty_and_non_http_endpoints() {
        assert!(config("  ", true).endpoint_url().is_err());
        assert!(config("ftp://files.example.com", true).endpoint_url().is_err());
    }

    #[test]
    fn validate_requires_credentials() {
        let mut cfg = config("localhost:9000", false);
        assert!(cfg.validate().is_ok());
        cfg.secret_access_key.clear();
        assert!(matches!(cfg.validate(), Err(ManagerError::InvalidArgument(_))));
    }
}
