//! Validated list and todo titles
//!
//! Raw input is trimmed before any check. Stores only accept these types,
//! so nothing unvalidated reaches persistence.

use super::validation::{error_for_list_title, error_for_todo, ValidationError};
use super::TodoList;

/// Maximum title length in characters, for both lists and todos
pub const MAX_TITLE_LEN: usize = 100;

/// Validated list title (trimmed, 1-100 chars, unique among given lists)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListTitle(String);

impl ListTitle {
    /// Trim `raw` and validate it against the titles of `existing`.
    ///
    /// # Example
    /// ```
    /// use todoctl_server::models::{ListTitle, TodoList};
    ///
    /// let none: Vec<TodoList> = Vec::new();
    /// assert_eq!(ListTitle::parse("  Chores ", &none).unwrap().as_str(), "Chores");
    /// assert!(ListTitle::parse("   ", &none).is_err());
    /// ```
    pub fn parse<'a, I>(raw: &str, existing: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = &'a TodoList>,
    {
        let title = raw.trim();
        match error_for_list_title(title, existing) {
            Some(err) => Err(err),
            None => Ok(Self(title.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ListTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated todo title (trimmed, 1-100 chars)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TodoTitle(String);

impl TodoTitle {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let title = raw.trim();
        match error_for_todo(title) {
            Some(err) => Err(err),
            None => Ok(Self(title.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for TodoTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_before_validating() {
        let none: Vec<TodoList> = Vec::new();
        let title = ListTitle::parse("\t Errands \n", &none).unwrap();
        assert_eq!(title.as_str(), "Errands");

        let todo = TodoTitle::parse("  buy milk  ").unwrap();
        assert_eq!(todo.into_string(), "buy milk");
    }

    #[test]
    fn whitespace_only_is_empty() {
        let none: Vec<TodoList> = Vec::new();
        let err = ListTitle::parse("    ", &none).unwrap_err();
        assert_eq!(err, ValidationError::ListTitleLength);

        let err = TodoTitle::parse(" \t ").unwrap_err();
        assert_eq!(err, ValidationError::TodoTitleLength);
    }

    #[test]
    fn trimmed_duplicate_is_rejected() {
        let existing = vec![TodoList {
            id: "1".into(),
            title: "Work".into(),
            todos: Vec::new(),
        }];
        let err = ListTitle::parse("  Work  ", &existing).unwrap_err();
        assert_eq!(err, ValidationError::ListTitleTaken);
    }

    #[test]
    fn max_length() {
        // 100 chars plus padding still fits after trimming
        let padded = format!("  {}  ", "a".repeat(MAX_TITLE_LEN));
        assert!(TodoTitle::parse(&padded).is_ok());

        let err = TodoTitle::parse(&"a".repeat(MAX_TITLE_LEN + 1)).unwrap_err();
        assert_eq!(err, ValidationError::TodoTitleLength);
    }
}
