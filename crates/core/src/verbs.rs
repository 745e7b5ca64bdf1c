#![forbid(unsafe_code)]

//! Activity-log verb builders. Verbs are free text on the wire; these keep
//! the wording identical across every call site.

/// Comments are previewed, not reproduced, in the activity feed.
pub const COMMENT_PREVIEW_CHARS: usize = 60;

pub fn task_created(title: &str) -> String {
    format!("Task created: {title}")
}

pub fn commented(content: &str) -> String {
    let preview: String = content.chars().take(COMMENT_PREVIEW_CHARS).collect();
    format!("commented: {preview}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_created_carries_title() {
        assert_eq!(task_created("Ship it"), "Task created: Ship it");
    }

    #[test]
    fn short_comments_are_kept_whole() {
        assert_eq!(commented("looks good"), "commented: looks good");
    }

    #[test]
    fn long_comments_truncate_at_sixty_chars() {
        let content = "x".repeat(200);
        let verb = commented(&content);
        assert_eq!(verb, format!("commented: {}", "x".repeat(60)));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let content = "é".repeat(61);
        let verb = commented(&content);
        assert_eq!(verb, format!("commented: {}", "é".repeat(60)));
    }
}
