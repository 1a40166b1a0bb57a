use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::document::PdfDocument;
use crate::render::{Hooks, Outcome, TerminalHooks};
use crate::split::{SplitMode, SplitRequest};

pub async fn run<P: AsRef<Path>>(
    input: P,
    mode: SplitMode,
    output_dir: Option<&Path>,
    config: &Config,
) -> Result<()> {
    let service = super::connect(config)?;
    let mut hooks = TerminalHooks::new();

    let request = SplitRequest {
        document: PdfDocument::open(&input, config.max_file_size)?,
        mode,
    };

    hooks.set_loading(true);
    let result = request.submit(service.as_ref()).await;
    hooks.set_loading(false);

    let outcome = Outcome::Split(result?);
    hooks.show_result(&outcome);

    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        for (filename, url) in outcome.downloads() {
            super::download_to(service.as_ref(), &url, dir.join(filename)).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::stub::StubServer;

    #[tokio::test]
    async fn test_downloads_land_in_output_dir() {
        let stub = StubServer::start(&[
            ("/get_pdf_info", 200, r#"{"success":true,"total_pages":2}"#),
            (
                "/split",
                200,
                r#"{"success":true,"files":[
                    {"filename":"../escaped.pdf","download_url":"/download/one.pdf","page":1},
                    {"filename":"/tmp/absolute.pdf","download_url":"/download/two.pdf","page":2}
                ]}"#,
            ),
            ("/download/one.pdf", 200, "%PDF-1.7"),
            ("/download/two.pdf", 200, "%PDF-1.7"),
        ])
        .await;
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("doc.pdf");
        std::fs::write(&input, b"%PDF-1.7\n").unwrap();
        let out = root.path().join("out");
        let config = Config {
            service_url: stub.url.clone(),
            ..Config::default()
        };

        run(&input, SplitMode::All, Some(out.as_path()), &config)
            .await
            .unwrap();

        assert!(out.join("escaped.pdf").is_file());
        assert!(out.join("absolute.pdf").is_file());
        assert!(!root.path().join("escaped.pdf").exists());
    }

    #[tokio::test]
    async fn test_out_of_range_pages_never_reach_split() {
        let stub = StubServer::start(&[(
            "/get_pdf_info",
            200,
            r#"{"success":true,"total_pages":2}"#,
        )])
        .await;
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("doc.pdf");
        std::fs::write(&input, b"%PDF-1.7\n").unwrap();
        let config = Config {
            service_url: stub.url.clone(),
            ..Config::default()
        };

        let mode = SplitMode::Specific("1,5".into());
        assert!(run(&input, mode, None, &config).await.is_err());
        assert_eq!(stub.requests(), ["/get_pdf_info"]);
    }
}
