pub mod export_markdown;
pub mod import_markdown;
