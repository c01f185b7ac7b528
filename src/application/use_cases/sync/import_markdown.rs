use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use serde_json::json;

use crate::application::errors::ActionError;
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::ports::node_repository::{NewNode, NodePatch, NodeRepository};
use crate::application::services::markdown::{parse_document, render_html};
use crate::application::validation::slugify;

#[derive(Debug)]
pub struct ImportedDoc {
    pub id: i32,
    pub title: String,
    pub created: bool,
}

/// Upserts one node per `*.md` file in a directory: the slug is derived
/// from the file stem, the body becomes sanitized HTML content, and the
/// original markdown plus leftover front-matter keys land in `metadata`.
pub struct ImportMarkdown<'a, N, C>
where
    N: NodeRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    pub nodes: &'a N,
    pub categories: &'a C,
}

impl<'a, N, C> ImportMarkdown<'a, N, C>
where
    N: NodeRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    pub async fn execute(
        &self,
        dir: &Path,
        category_id: i32,
        user_id: i32,
    ) -> Result<Vec<ImportedDoc>, ActionError> {
        if self.categories.get_by_id(category_id).await?.is_none() {
            return Err(ActionError::not_found("category not found"));
        }

        let mut files = Vec::new();
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .with_context(|| format!("reading markdown dir {}", dir.display()))
            .map_err(ActionError::Store)?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .context("iterating markdown dir")
            .map_err(ActionError::Store)?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("md") {
                files.push(path);
            }
        }
        files.sort();

        let mut imported = Vec::new();
        for path in files {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let slug = slugify(stem);
            if slug.is_empty() {
                tracing::warn!(file = %path.display(), "skipping file with unusable name");
                continue;
            }

            let text = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("reading {}", path.display()))
                .map_err(ActionError::Store)?;
            let (fm, body) = parse_document(&text);

            let title = fm
                .title
                .clone()
                .unwrap_or_else(|| format!("Untitled-{stem}"));
            let html = render_html(&body);
            let mut metadata = json!({
                "markdown": body,
                "source": "markdown-import",
            });
            if !fm.tags.is_empty() {
                metadata["tags"] = json!(fm.tags);
            }
            for (key, value) in &fm.extra {
                metadata[key] = json!(value);
            }
            let published_at = fm
                .published
                .then(|| fm.date.unwrap_or_else(Utc::now));

            match self.nodes.find_by_slug(&slug).await? {
                Some(existing) => {
                    let patch = NodePatch {
                        title: Some(title.clone()),
                        content: Some(html),
                        is_published: Some(fm.published),
                        published_at,
                        metadata: Some(metadata),
                        updated_by: user_id,
                        ..Default::default()
                    };
                    let updated = self
                        .nodes
                        .apply_patch(existing.id, patch)
                        .await?
                        .ok_or_else(|| ActionError::not_found("node not found"))?;
                    imported.push(ImportedDoc {
                        id: updated.id,
                        title,
                        created: false,
                    });
                }
                None => {
                    let node = self
                        .nodes
                        .insert(NewNode {
                            title: title.clone(),
                            slug,
                            excerpt: None,
                            content: Some(html),
                            category_id,
                            parent_id: None,
                            is_published: fm.published,
                            order: 0,
                            metadata: Some(metadata),
                            created_by: user_id,
                            updated_by: user_id,
                        })
                        .await?;
                    if let Some(at) = published_at {
                        self.nodes
                            .apply_patch(node.id, NodePatch {
                                published_at: Some(at),
                                updated_by: user_id,
                                ..Default::default()
                            })
                            .await?;
                    }
                    imported.push(ImportedDoc {
                        id: node.id,
                        title,
                        created: true,
                    });
                }
            }
        }
        Ok(imported)
    }
}
