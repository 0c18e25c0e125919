//! GitHub-flavored markdown anchor/slug generation for the namespace index.

/// Generate a table-of-contents list item linking to a heading.
pub fn render_toc_item(title: &str) -> String {
    format!("* [{}](#{})", title, github_slug(title))
}

/// GitHub heading anchor slug generation.
///
/// - lowercase
/// - remove all chars that aren't alphanumeric, space or hyphen
/// - replace spaces with hyphens
pub fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' {
            slug.push(c);
        }
        // All other chars (including '.', '_', '(') are stripped
    }
    slug.replace(' ', "-")
}
