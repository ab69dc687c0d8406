//! Subcommand implementations

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use inti_core::{
    filter_vendors, supported_backends, Catalog, CatalogServer, CatalogTools, ConfigFile, ConfigLoader,
    Logger, TracingLogger, VendorRecord,
};

use crate::Command;

/// Topics shown per row before collapsing into `+N`
const TOPIC_PREVIEW: usize = 3;

fn open_catalog(loader: &ConfigLoader, overrides: &ConfigFile) -> anyhow::Result<(Arc<Catalog>, Arc<dyn Logger>)> {
    let config = loader
        .load(overrides.clone())
        .context("failed to load configuration")?;

    let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new());
    let catalog = Arc::new(Catalog::from_config(&config, Arc::clone(&logger)));
    Ok((catalog, logger))
}

pub(crate) async fn run(loader: &ConfigLoader, overrides: &ConfigFile, command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Serve => {
            let (catalog, logger) = open_catalog(loader, overrides)?;
            CatalogServer::new(catalog, logger)
                .serve_stdio()
                .await
                .context("MCP server failed")?;
            Ok(ExitCode::SUCCESS)
        }
        Command::List { query, json } => {
            let (catalog, _) = open_catalog(loader, overrides)?;
            if json {
                let output = CatalogTools::new(catalog).list_vendors(query.as_deref()).await;
                return Ok(emit(&output.text, output.is_error));
            }
            match catalog.list_vendors().await {
                Ok(vendors) => {
                    let vendors = match query.as_deref() {
                        Some(query) => filter_vendors(vendors, query),
                        None => vendors,
                    };
                    Ok(emit(&render_table(&vendors), false))
                }
                Err(e) => Ok(emit(&format!("Failed to list vendors: {}", e), true)),
            }
        }
        Command::Get { slug } => {
            let (catalog, _) = open_catalog(loader, overrides)?;
            let output = CatalogTools::new(catalog).get_snippet(&slug).await;
            Ok(emit(&output.text, output.is_error))
        }
        Command::Backends => Ok(emit(&render_backends(), false)),
    }
}

/// Write `text` to stdout, or to stderr with a failing exit code
fn emit(text: &str, is_error: bool) -> ExitCode {
    if is_error {
        eprintln!("{}", text.trim_end());
        return ExitCode::FAILURE;
    }

    let mut stdout = std::io::stdout().lock();
    // ignore EPIPE from `inti list | head`
    let _ = writeln!(stdout, "{}", text.trim_end());
    ExitCode::SUCCESS
}

fn render_backends() -> String {
    supported_backends()
        .into_iter()
        .map(|(name, description)| format!("{:<8} {}\n", name, description))
        .collect()
}

fn topic_preview(topics: &[String]) -> String {
    let mut preview = topics.iter().take(TOPIC_PREVIEW).cloned().collect::<Vec<_>>().join(", ");
    if topics.len() > TOPIC_PREVIEW {
        preview.push_str(&format!(" +{}", topics.len() - TOPIC_PREVIEW));
    }
    preview
}

fn render_table(vendors: &[VendorRecord]) -> String {
    if vendors.is_empty() {
        return "No vendors found".to_string();
    }

    let slug_width = vendors.iter().map(|v| v.slug.len()).max().unwrap_or(0).max(4);
    let name_width = vendors.iter().map(|v| v.vendor_name.len()).max().unwrap_or(0).max(6);

    let mut out = format!(
        "{:<slug_width$}  {:<name_width$}  TOPICS\n",
        "SLUG",
        "VENDOR",
        slug_width = slug_width,
        name_width = name_width
    );
    for vendor in vendors {
        out.push_str(&format!(
            "{:<slug_width$}  {:<name_width$}  {}\n",
            vendor.slug,
            vendor.vendor_name,
            topic_preview(&vendor.topics),
            slug_width = slug_width,
            name_width = name_width
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_preview_collapses_extra_topics() {
        let topics: Vec<String> = ["billing", "sms", "voice", "video", "fax"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(topic_preview(&topics), "billing, sms, voice +2");
        assert_eq!(topic_preview(&topics[..2]), "billing, sms");
        assert_eq!(topic_preview(&[]), "");
    }

    #[test]
    fn test_render_table() {
        let vendors = vec![
            VendorRecord::new("Acme", "python", "acme/python").with_topics(["billing"]),
            VendorRecord::new("Twilio", "go", "twilio/go"),
        ];
        let table = render_table(&vendors);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("SLUG"));
        assert!(lines[1].starts_with("acme/python  Acme"));
        assert!(lines[1].ends_with("billing"));
        assert!(lines[2].starts_with("twilio/go    Twilio"));
    }

    #[test]
    fn test_render_table_empty() {
        assert_eq!(render_table(&[]), "No vendors found");
    }

    #[test]
    fn test_render_backends() {
        let text = render_backends();
        assert!(text.starts_with("local"));
        assert!(text.contains("\nremote"));
    }

    #[tokio::test]
    async fn test_get_missing_slug_fails_with_local_root() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::isolated();
        let overrides = ConfigFile {
            backend: Some(inti_core::BackendKind::Local),
            root: Some(dir.path().to_path_buf()),
            origin: None,
        };

        let code = run(&loader, &overrides, Command::Get { slug: "ghost/lang".to_string() })
            .await
            .unwrap();
        assert_eq!(code, ExitCode::FAILURE);

        let code = run(&loader, &overrides, Command::List { query: None, json: true })
            .await
            .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[tokio::test]
    async fn test_workspace_file_selects_root() {
        let workspace = tempfile::tempdir().unwrap();
        let config_dir = workspace.path().join(".config/inti");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join("config.yaml"), "backend: local\nroot: ../../snippets\n").unwrap();

        let snippet_dir = workspace.path().join("snippets/acme/python");
        std::fs::create_dir_all(&snippet_dir).unwrap();
        std::fs::write(snippet_dir.join("snippet.md"), "# Acme").unwrap();

        let loader = ConfigLoader::isolated().with_workspace(workspace.path());
        let code = run(&loader, &ConfigFile::default(), Command::Get { slug: "acme/python".to_string() })
            .await
            .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }
}
