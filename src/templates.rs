use std::{borrow::Cow, path::PathBuf};

use crate::error::AppError;

const EMBEDDED_INDEX: &str = include_str!("../templates/index.html");

/// Source of the index document served at `/`.
#[derive(Clone, Debug)]
pub enum IndexPage {
    /// Compiled into the binary; rendering cannot fail.
    Embedded,
    /// Re-read from disk on every request.
    Live(PathBuf),
}

impl IndexPage {
    pub fn new(auto_reload: bool, template_path: PathBuf) -> Self {
        if auto_reload {
            Self::Live(template_path)
        } else {
            Self::Embedded
        }
    }

    pub async fn render(&self) -> Result<Cow<'static, str>, AppError> {
        match self {
            Self::Embedded => Ok(Cow::Borrowed(EMBEDDED_INDEX)),
            Self::Live(path) => tokio::fs::read_to_string(path)
                .await
                .map(Cow::Owned)
                .map_err(|source| AppError::Template {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embedded_page_is_html() {
        let html = IndexPage::Embedded.render().await.unwrap();
        assert!(matches!(html, Cow::Borrowed(_)));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("game-canvas"));
    }

    #[tokio::test]
    async fn live_page_reads_checked_in_template() {
        let page = IndexPage::new(
            true,
            PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/index.html")),
        );
        let html = page.render().await.unwrap();
        assert!(matches!(html, Cow::Owned(_)));
        assert_eq!(html, EMBEDDED_INDEX);
    }

    #[tokio::test]
    async fn live_page_reports_missing_file() {
        let page = IndexPage::Live(PathBuf::from("templates/does-not-exist.html"));
        let err = page.render().await.unwrap_err();
        assert!(matches!(err, AppError::Template { ref path, .. }
            if path.ends_with("does-not-exist.html")));
    }

    #[test]
    fn reload_flag_selects_source() {
        assert!(matches!(
            IndexPage::new(false, PathBuf::from("x.html")),
            IndexPage::Embedded
        ));
        assert!(matches!(
            IndexPage::new(true, PathBuf::from("x.html")),
            IndexPage::Live(_)
        ));
    }
}
