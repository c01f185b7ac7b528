mod support;

use leafpress::application::errors::ActionError;
use leafpress::application::ports::node_repository::NodeRepository;
use leafpress::application::use_cases::categories::create_category::CreateCategory;
use leafpress::application::use_cases::nodes::create_node::CreateNode;
use leafpress::application::use_cases::sync::export_markdown::ExportMarkdown;
use leafpress::application::use_cases::sync::import_markdown::ImportMarkdown;

use support::{new_category, new_node, MemoryCategoryRepository, MemoryNodeRepository};

async fn seed_category(categories: &MemoryCategoryRepository) -> i32 {
    CreateCategory { categories }
        .execute(new_category("Tech", "tech"))
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn import_creates_a_node_per_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("getting-started.md"),
        "---\ntitle: Getting Started\npublished: true\ntags: [rust]\n---\n\n# Hello\n\nIntro text.\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("notes.md"), "No front matter here.\n").unwrap();
    std::fs::write(dir.path().join("ignored.txt"), "not markdown").unwrap();

    let nodes = MemoryNodeRepository::new();
    let categories = MemoryCategoryRepository::new();
    let category_id = seed_category(&categories).await;

    let imported = ImportMarkdown {
        nodes: &nodes,
        categories: &categories,
    }
    .execute(dir.path(), category_id, 1)
    .await
    .unwrap();

    assert_eq!(imported.len(), 2);
    assert!(imported.iter().all(|d| d.created));

    let post = nodes.find_by_slug("getting-started").await.unwrap().unwrap();
    assert_eq!(post.title, "Getting Started");
    assert!(post.is_published);
    assert!(post.published_at.is_some());
    assert!(post.content.as_deref().unwrap().contains("<h1>"));
    let meta = post.metadata.unwrap();
    assert_eq!(meta["source"], "markdown-import");
    assert_eq!(meta["tags"][0], "rust");
    assert!(meta["markdown"].as_str().unwrap().contains("# Hello"));

    // Title falls back to the file stem when the front matter has none.
    let notes = nodes.find_by_slug("notes").await.unwrap().unwrap();
    assert_eq!(notes.title, "Untitled-notes");
    assert!(!notes.is_published);
}

#[tokio::test]
async fn reimport_updates_in_place_instead_of_duplicating() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("post.md");
    std::fs::write(&path, "---\ntitle: First\npublished: false\n---\n\nv1\n").unwrap();

    let nodes = MemoryNodeRepository::new();
    let categories = MemoryCategoryRepository::new();
    let category_id = seed_category(&categories).await;
    let importer = ImportMarkdown {
        nodes: &nodes,
        categories: &categories,
    };

    importer.execute(dir.path(), category_id, 1).await.unwrap();
    std::fs::write(&path, "---\ntitle: Second\npublished: false\n---\n\nv2\n").unwrap();
    let second = importer.execute(dir.path(), category_id, 1).await.unwrap();

    assert_eq!(second.len(), 1);
    assert!(!second[0].created);
    assert_eq!(nodes.len(), 1);
    let post = nodes.find_by_slug("post").await.unwrap().unwrap();
    assert_eq!(post.title, "Second");
    assert!(post.content.as_deref().unwrap().contains("v2"));
}

#[tokio::test]
async fn import_sanitizes_embedded_scripts() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("sneaky.md"),
        "---\ntitle: Sneaky\n---\n\n<script>alert(1)</script>\n\n*fine*\n",
    )
    .unwrap();

    let nodes = MemoryNodeRepository::new();
    let categories = MemoryCategoryRepository::new();
    let category_id = seed_category(&categories).await;

    ImportMarkdown {
        nodes: &nodes,
        categories: &categories,
    }
    .execute(dir.path(), category_id, 1)
    .await
    .unwrap();

    let post = nodes.find_by_slug("sneaky").await.unwrap().unwrap();
    let html = post.content.unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("<em>fine</em>"));
}

#[tokio::test]
async fn import_into_a_missing_category_fails() {
    let dir = tempfile::tempdir().unwrap();
    let nodes = MemoryNodeRepository::new();
    let categories = MemoryCategoryRepository::new();

    let err = ImportMarkdown {
        nodes: &nodes,
        categories: &categories,
    }
    .execute(dir.path(), 42, 1)
    .await
    .unwrap_err();
    assert!(matches!(err, ActionError::NotFound(_)));
}

#[tokio::test]
async fn export_writes_front_matter_files() {
    let nodes = MemoryNodeRepository::new();
    let categories = MemoryCategoryRepository::new();
    let category_id = seed_category(&categories).await;

    let mut published = new_node(category_id, "My First Post", "my-first-post");
    published.content = Some("<p>stored html</p>".to_string());
    published.metadata = Some(serde_json::json!({
        "markdown": "original *markdown* body",
        "tags": ["rust", "blog"],
    }));
    let created = CreateNode {
        nodes: &nodes,
        categories: &categories,
    }
    .execute(published)
    .await
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let exported = ExportMarkdown { nodes: &nodes }
        .execute(dir.path())
        .await
        .unwrap();

    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0].file, "my-first-post.md");

    let text = std::fs::read_to_string(dir.path().join("my-first-post.md")).unwrap();
    assert!(text.starts_with("---\n"));
    assert!(text.contains("title: My First Post"));
    assert!(text.contains(&format!("id: {}", created.id)));
    assert!(text.contains("tags: [rust, blog]"));
    // The original markdown wins over the stored HTML.
    assert!(text.ends_with("original *markdown* body"));
    assert!(!text.contains("<p>stored html</p>"));
}
