/// Split a comma-separated flag value into trimmed items.
///
/// `None` and the empty string both yield an empty list.
pub fn parse_list_argument(arg: Option<&str>) -> Vec<String> {
    match arg {
        Some(s) if !s.is_empty() => s.split(',').map(|item| item.trim().to_string()).collect(),
        _ => Vec::new(),
    }
}

pub fn author_matches(users: &[String], author_name: &str, author_email: &str) -> bool {
    users.iter().any(|u| u == author_name || u == author_email)
}

pub fn project_name_matches(project_names: &[String], name: &str) -> bool {
    let name = name.to_lowercase();
    project_names.iter().any(|n| n.to_lowercase() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_missing_argument_is_empty_list() {
        assert!(parse_list_argument(None).is_empty());
        assert!(parse_list_argument(Some("")).is_empty());
    }

    #[test]
    fn items_are_trimmed() {
        assert_eq!(parse_list_argument(Some("a, b ,c")), vec!["a", "b", "c"]);
    }

    #[test]
    fn blank_items_are_kept() {
        assert_eq!(parse_list_argument(Some("a,,b")), vec!["a", "", "b"]);
    }

    #[test]
    fn author_match_is_exact_and_case_sensitive() {
        let users = vec!["alice".to_string(), "bob@example.com".to_string()];
        assert!(author_matches(&users, "alice", "a@example.com"));
        assert!(author_matches(&users, "Robert", "bob@example.com"));
        assert!(!author_matches(&users, "Alice", "a@example.com"));
        assert!(!author_matches(&users, "alicia", "alice@example.com"));
    }

    #[test]
    fn project_match_ignores_case() {
        let names = vec!["Backend".to_string()];
        assert!(project_name_matches(&names, "backend"));
        assert!(project_name_matches(&names, "BACKEND"));
        assert!(!project_name_matches(&names, "backend-api"));
    }
}
