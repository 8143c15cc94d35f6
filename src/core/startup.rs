//! Process bootstrap: directory checks, server construction and transport.

use tracing::{info, instrument, warn};

use super::config::{Config, TemplatesConfig};
use super::error::{Error, Result};
use super::server::McpServer;
use super::transport::TransportService;

/// Prepare the filesystem before serving.
///
/// The records directory is created if needed and must not be the template
/// directory, which stays read-only. A missing template directory is only a
/// warning: the server still starts and listing reports the failure per call.
#[instrument(skip_all)]
pub async fn prepare_directories(templates: &TemplatesConfig) -> Result<()> {
    if templates.record_dir == templates.template_dir {
        return Err(shared_directory(templates));
    }

    tokio::fs::create_dir_all(&templates.record_dir)
        .await
        .map_err(|e| {
            Error::startup(format!(
                "cannot create records directory {}: {}",
                templates.record_dir.display(),
                e
            ))
        })?;
    info!("Records directory: {}", templates.record_dir.display());

    if let (Ok(records), Ok(sources)) = (
        tokio::fs::canonicalize(&templates.record_dir).await,
        tokio::fs::canonicalize(&templates.template_dir).await,
    ) {
        if records == sources {
            return Err(shared_directory(templates));
        }
    }

    match tokio::fs::metadata(&templates.template_dir).await {
        Ok(meta) if meta.is_dir() => {
            info!("Template directory: {}", templates.template_dir.display());
        }
        Ok(_) => warn!(
            "Template path {} is not a directory",
            templates.template_dir.display()
        ),
        Err(e) => warn!(
            "Template directory {} is not readable: {}",
            templates.template_dir.display(),
            e
        ),
    }

    Ok(())
}

fn shared_directory(templates: &TemplatesConfig) -> Error {
    Error::config(format!(
        "records directory {} is the template directory",
        templates.record_dir.display()
    ))
}

/// Bring the server up and serve until the transport shuts down.
pub async fn serve(config: Config) -> Result<()> {
    info!("Starting {} v{}", config.server.name, config.server.version);

    prepare_directories(&config.templates).await?;

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config);
    info!("Server initialized");

    transport.run(server).await?;

    info!("Server shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tokio_test::{assert_err, assert_ok};

    fn templates_config(root: &std::path::Path) -> TemplatesConfig {
        TemplatesConfig {
            template_dir: root.join("templates"),
            record_dir: root.join("out").join("records"),
            ..TemplatesConfig::default()
        }
    }

    #[tokio::test]
    async fn test_creates_records_directory() {
        let temp_dir = TempDir::new().unwrap();
        let config = templates_config(temp_dir.path());
        fs::create_dir(&config.template_dir).unwrap();

        assert_ok!(prepare_directories(&config).await);
        assert!(config.record_dir.is_dir());

        // Already present is fine.
        assert_ok!(prepare_directories(&config).await);
    }

    #[tokio::test]
    async fn test_missing_template_directory_is_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let config = templates_config(temp_dir.path());

        assert_ok!(prepare_directories(&config).await);
        assert!(config.record_dir.is_dir());
    }

    #[tokio::test]
    async fn test_unwritable_records_path_is_startup_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        let config = TemplatesConfig {
            template_dir: temp_dir.path().to_path_buf(),
            record_dir: blocker.join("records"),
            ..TemplatesConfig::default()
        };

        let err = assert_err!(prepare_directories(&config).await);
        assert!(matches!(err, Error::Startup(_)));
        assert!(err.to_string().contains("records directory"));
    }

    #[tokio::test]
    async fn test_records_directory_must_differ_from_templates() {
        let temp_dir = TempDir::new().unwrap();
        let templates = temp_dir.path().join("templates");
        fs::create_dir(&templates).unwrap();

        let same = TemplatesConfig {
            template_dir: templates.clone(),
            record_dir: templates.clone(),
            ..TemplatesConfig::default()
        };
        let err = assert_err!(prepare_directories(&same).await);
        assert!(matches!(err, Error::Config(_)));

        // Same directory spelled differently.
        let aliased = TemplatesConfig {
            template_dir: templates.clone(),
            record_dir: templates.join("..").join("templates"),
            ..TemplatesConfig::default()
        };
        let err = assert_err!(prepare_directories(&aliased).await);
        assert!(matches!(err, Error::Config(_)));
    }
}
