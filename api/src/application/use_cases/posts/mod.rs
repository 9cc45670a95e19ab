pub mod create_post;
pub mod delete_post;
pub mod get_post;
pub mod list_posts;
pub mod react_to_post;
pub mod update_post;

/// Trims tags and drops blanks and repeats, keeping first-seen order.
fn clean_tags(raw: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_trimmed_and_deduplicated() {
        let raw = vec![" rust ".to_string(), "".into(), "rust".into(), "axum".into()];
        assert_eq!(clean_tags(&raw), vec!["rust", "axum"]);
    }
}
