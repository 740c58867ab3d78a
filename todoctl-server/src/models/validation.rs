//! Validation errors and the guard helpers that produce them

use thiserror::Error;

use super::title::MAX_TITLE_LEN;
use super::TodoList;

/// Validation error for submitted titles.
///
/// The display text is user-facing and returned verbatim as an error notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The title must be between 1 and 100 characters.")]
    ListTitleLength,

    #[error("The title must be unique.")]
    ListTitleTaken,

    #[error("The todo must be between 1 and 100 characters.")]
    TodoTitleLength,
}

fn has_valid_length(title: &str) -> bool {
    (1..=MAX_TITLE_LEN).contains(&title.chars().count())
}

/// Check an already-trimmed list title against length and uniqueness rules.
///
/// Uniqueness is case-sensitive and compared against every list in `lists`;
/// callers renaming a list pass the other lists only.
pub fn error_for_list_title<'a, I>(title: &str, lists: I) -> Option<ValidationError>
where
    I: IntoIterator<Item = &'a TodoList>,
{
    if !has_valid_length(title) {
        return Some(ValidationError::ListTitleLength);
    }

    if lists.into_iter().any(|list| list.title == title) {
        return Some(ValidationError::ListTitleTaken);
    }

    None
}

/// Check an already-trimmed todo title.
pub fn error_for_todo(title: &str) -> Option<ValidationError> {
    if has_valid_length(title) {
        None
    } else {
        Some(ValidationError::TodoTitleLength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(title: &str) -> TodoList {
        TodoList {
            id: title.to_lowercase(),
            title: title.to_owned(),
            todos: Vec::new(),
        }
    }

    #[test]
    fn error_display() {
        assert_eq!(
            ValidationError::ListTitleLength.to_string(),
            "The title must be between 1 and 100 characters."
        );
        assert_eq!(
            ValidationError::ListTitleTaken.to_string(),
            "The title must be unique."
        );
        assert_eq!(
            ValidationError::TodoTitleLength.to_string(),
            "The todo must be between 1 and 100 characters."
        );
    }

    #[test]
    fn list_title_bounds() {
        let none: [TodoList; 0] = [];
        assert_eq!(
            error_for_list_title("", &none),
            Some(ValidationError::ListTitleLength)
        );
        assert_eq!(error_for_list_title("a", &none), None);
        assert_eq!(error_for_list_title(&"a".repeat(100), &none), None);
        assert_eq!(
            error_for_list_title(&"a".repeat(101), &none),
            Some(ValidationError::ListTitleLength)
        );
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        let none: [TodoList; 0] = [];
        // 100 two-byte characters
        assert_eq!(error_for_list_title(&"é".repeat(100), &none), None);
        assert_eq!(error_for_todo(&"é".repeat(100)), None);
    }

    #[test]
    fn duplicate_title_is_rejected_case_sensitively() {
        let lists = vec![list("Groceries")];
        assert_eq!(
            error_for_list_title("Groceries", &lists),
            Some(ValidationError::ListTitleTaken)
        );
        assert_eq!(error_for_list_title("groceries", &lists), None);
    }

    #[test]
    fn length_checked_before_uniqueness() {
        let lists = vec![list("")];
        assert_eq!(
            error_for_list_title("", &lists),
            Some(ValidationError::ListTitleLength)
        );
    }

    #[test]
    fn todo_title_bounds() {
        assert_eq!(error_for_todo(""), Some(ValidationError::TodoTitleLength));
        assert_eq!(error_for_todo("milk"), None);
        assert_eq!(
            error_for_todo(&"x".repeat(101)),
            Some(ValidationError::TodoTitleLength)
        );
    }
}
