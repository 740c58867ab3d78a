//! List and todo records shared by every storage backend

use serde::{Deserialize, Serialize};

/// A single task owned by a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

/// A named list of todos, in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: String,
    pub title: String,
    pub todos: Vec<Todo>,
}

impl TodoList {
    /// Look up one of this list's todos by id.
    pub fn todo(&self, todo_id: &str) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == todo_id)
    }
}

/// A list is completed when it has at least one todo and none are open.
pub fn is_list_completed(list: &TodoList) -> bool {
    !list.todos.is_empty() && todos_remaining(list) == 0
}

pub fn is_todo_completed(todo: &Todo) -> bool {
    todo.completed
}

/// Number of todos in the list that are not yet completed.
pub fn todos_remaining(list: &TodoList) -> usize {
    list.todos.iter().filter(|todo| !todo.completed).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: &str, completed: bool) -> Todo {
        Todo {
            id: id.into(),
            title: format!("todo {id}"),
            completed,
        }
    }

    fn list_with(todos: Vec<Todo>) -> TodoList {
        TodoList {
            id: "l1".into(),
            title: "List".into(),
            todos,
        }
    }

    #[test]
    fn empty_list_is_not_completed() {
        let list = list_with(vec![]);
        assert!(!is_list_completed(&list));
        assert_eq!(todos_remaining(&list), 0);
    }

    #[test]
    fn partially_done_list_is_not_completed() {
        let list = list_with(vec![todo("a", true), todo("b", false)]);
        assert!(!is_list_completed(&list));
        assert_eq!(todos_remaining(&list), 1);
    }

    #[test]
    fn all_done_list_is_completed() {
        let list = list_with(vec![todo("a", true), todo("b", true)]);
        assert!(is_list_completed(&list));
        assert_eq!(todos_remaining(&list), 0);
    }

    #[test]
    fn finds_todo_by_id() {
        let list = list_with(vec![todo("a", false), todo("b", true)]);
        assert!(list.todo("b").is_some_and(is_todo_completed));
        assert!(list.todo("missing").is_none());
    }
}
