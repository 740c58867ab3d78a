//! Display ordering for lists and todos

use super::{Todo, TodoList};

/// Anything ordered by title for display
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for TodoList {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Titled for Todo {
    fn title(&self) -> &str {
        &self.title
    }
}

/// Sort by case-insensitive title, then move completed items after the open ones.
///
/// Both steps are stable: items with equal titles keep their input order,
/// and each group keeps title order.
pub fn sort_items<T, F>(mut items: Vec<T>, is_completed: F) -> Vec<T>
where
    T: Titled,
    F: Fn(&T) -> bool,
{
    items.sort_by_cached_key(|item| item.title().to_lowercase());
    let (open, done): (Vec<T>, Vec<T>) = items.into_iter().partition(|item| !is_completed(item));
    open.into_iter().chain(done).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{is_list_completed, is_todo_completed};

    fn todo(title: &str, completed: bool) -> Todo {
        Todo {
            id: title.into(),
            title: title.into(),
            completed,
        }
    }

    fn titles<T: Titled>(items: &[T]) -> Vec<&str> {
        items.iter().map(Titled::title).collect()
    }

    #[test]
    fn completed_todos_sink_to_the_bottom() {
        let todos = vec![
            todo("walk dog", true),
            todo("Buy milk", false),
            todo("call mom", false),
            todo("answer mail", true),
        ];
        let sorted = sort_items(todos, is_todo_completed);
        assert_eq!(
            titles(&sorted),
            vec!["Buy milk", "call mom", "answer mail", "walk dog"]
        );
    }

    #[test]
    fn equal_titles_keep_input_order() {
        let todos = vec![
            Todo {
                id: "1".into(),
                title: "Same".into(),
                completed: false,
            },
            Todo {
                id: "2".into(),
                title: "same".into(),
                completed: false,
            },
        ];
        let sorted = sort_items(todos, is_todo_completed);
        let ids: Vec<&str> = sorted.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn lists_sort_by_completion() {
        let done = TodoList {
            id: "1".into(),
            title: "Alpha".into(),
            todos: vec![todo("x", true)],
        };
        let empty = TodoList {
            id: "2".into(),
            title: "Beta".into(),
            todos: vec![],
        };
        let sorted = sort_items(vec![done, empty], is_list_completed);
        assert_eq!(titles(&sorted), vec!["Beta", "Alpha"]);
    }
}
