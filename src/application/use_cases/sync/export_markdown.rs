use std::path::Path;

use anyhow::Context;

use crate::application::errors::ActionError;
use crate::application::ports::node_repository::NodeRepository;
use crate::application::services::markdown::{render_document, FrontMatter};
use crate::application::validation::slugify;

#[derive(Debug)]
pub struct ExportedDoc {
    pub id: i32,
    pub file: String,
}

/// Writes every node out as a front-matter-annotated markdown file. The
/// filename derives from the title; the body prefers the original markdown
/// kept in `metadata` over the stored content.
pub struct ExportMarkdown<'a, N: NodeRepository + ?Sized> {
    pub nodes: &'a N,
}

impl<'a, N: NodeRepository + ?Sized> ExportMarkdown<'a, N> {
    pub async fn execute(&self, dir: &Path) -> Result<Vec<ExportedDoc>, ActionError> {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("creating export dir {}", dir.display()))
            .map_err(ActionError::Store)?;

        let mut exported = Vec::new();
        for node in self.nodes.list_all().await? {
            let file_id = {
                let s = slugify(&node.title);
                if s.is_empty() {
                    format!("post-{}", node.id)
                } else {
                    s
                }
            };

            let body = node
                .metadata
                .as_ref()
                .and_then(|m| m.get("markdown"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .or_else(|| node.content.clone())
                .unwrap_or_default();

            let tags = node
                .metadata
                .as_ref()
                .and_then(|m| m.get("tags"))
                .and_then(|v| v.as_array())
                .map(|arr| {
                    arr.iter()
                        .filter_map(|t| t.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default();

            let mut fm = FrontMatter {
                title: Some(node.title.clone()),
                date: Some(node.created_at),
                updated: Some(node.updated_at),
                published: node.is_published,
                tags,
                ..Default::default()
            };
            fm.extra.insert("id".into(), node.id.to_string());

            let file = format!("{file_id}.md");
            tokio::fs::write(dir.join(&file), render_document(&fm, &body))
                .await
                .with_context(|| format!("writing {file}"))
                .map_err(ActionError::Store)?;

            exported.push(ExportedDoc { id: node.id, file });
        }
        Ok(exported)
    }
}
