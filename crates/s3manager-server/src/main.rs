use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{ArgAction, Parser};
use s3manager_storage::{AwsObjectStore, S3Config, traits::ObjectStore};
use s3manager_web::{AppState, WebConfig, app_router, config::DEFAULT_MAX_UPLOAD_BYTES};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "s3manager", about = "Web front end for S3-compatible object storage")]
struct Cli {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,

    /// S3 endpoint, `host[:port]` or a full URL.
    #[arg(long, env = "ENDPOINT", default_value = "s3.amazonaws.com")]
    endpoint: String,

    #[arg(long, env = "ACCESS_KEY_ID")]
    access_key_id: String,

    #[arg(long, env = "SECRET_ACCESS_KEY", hide_env_values = true)]
    secret_access_key: String,

    #[arg(long, env = "REGION", default_value = "us-east-1")]
    region: String,

    #[arg(long, env = "USE_SSL", default_value_t = true, action = ArgAction::Set)]
    use_ssl: bool,

    #[arg(long, env = "PATH_STYLE", default_value_t = true, action = ArgAction::Set)]
    path_style: bool,

    #[arg(long, env = "TEMPLATE_DIR", default_value = "web/template")]
    template_dir: PathBuf,

    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,
}

impl Cli {
    fn s3_config(&self) -> S3Config {
        S3Config {
            endpoint: self.endpoint.clone(),
            access_key_id: self.access_key_id.clone(),
            secret_access_key: self.secret_access_key.clone(),
            region: self.region.clone(),
            use_ssl: self.use_ssl,
            path_style: self.path_style,
        }
    }

    fn web_config(&self) -> WebConfig {
        WebConfig {
            template_dir: self.template_dir.clone(),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::from_default_env().add_directive("s3manager=info".parse()?);
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let addr = format!("{}:{}", cli.host, cli.port);

    let store: Arc<dyn ObjectStore> = Arc::new(
        AwsObjectStore::new(&cli.s3_config())
            .await
            .context("failed to configure s3 client")?,
    );
    let state = AppState::new(store, &cli.web_config()).with_context(|| {
        format!("failed to load templates from {}", cli.template_dir.display())
    })?;
    let app = app_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(endpoint = %cli.endpoint, "s3manager listening on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_documented_configuration() {
        let cli = Cli::try_parse_from([
            "s3manager",
            "--access-key-id",
            "access",
            "--secret-access-key",
            "secret",
        ])
        .unwrap();

        assert!(cli.use_ssl);
        assert_eq!(cli.template_dir, PathBuf::from("web/template"));
        let s3 = cli.s3_config();
        assert_eq!(s3.endpoint_url().unwrap(), "https://s3.amazonaws.com");
        assert_eq!(cli.web_config().max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn ssl_can_be_disabled_for_local_endpoints() {
        let cli = Cli::try_parse_from([
            "s3manager",
            "--endpoint",
            "localhost:9000",
            "--use-ssl",
            "false",
            "--access-key-id",
            "access",
            "--secret-access-key",
            "secret",
        ])
        .unwrap();

        assert_eq!(cli.s3_config().endpoint_url().unwrap(), "http://localhost:9000");
    }
}
