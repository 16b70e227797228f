//! Renderers for the wiki markdown pages and the YAML sample manifest.

pub mod manifest;
pub mod markdown;

/// Footer appended to every generated page.
pub fn footer(generated_on: &str) -> String {
    format!("\n\nGenerated On {}", generated_on)
}
