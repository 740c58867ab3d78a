//! Session store - volatile lists for a single session
//!
//! Everything lives in process memory and is lost on restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, TodoStore};
use crate::models::{ListTitle, Todo, TodoList, TodoTitle};

/// In-memory store holding one session's lists
#[derive(Debug, Default)]
pub struct SessionStore {
    lists: RwLock<Vec<TodoList>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current session contents.
    pub async fn snapshot(&self) -> Vec<TodoList> {
        self.lists.read().await.clone()
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn list_mut<'a>(
    lists: &'a mut [TodoList],
    list_id: &str,
) -> Result<&'a mut TodoList, StoreError> {
    lists
        .iter_mut()
        .find(|list| list.id == list_id)
        .ok_or_else(|| StoreError::list_not_found(list_id))
}

#[async_trait]
impl TodoStore for SessionStore {
    fn backend(&self) -> &'static str {
        "session"
    }

    async fn all_lists(&self) -> Result<Vec<TodoList>, StoreError> {
        Ok(self.snapshot().await)
    }

    async fn find_list(&self, list_id: &str) -> Result<Option<TodoList>, StoreError> {
        let lists = self.lists.read().await;
        Ok(lists.iter().find(|list| list.id == list_id).cloned())
    }

    async fn find_todo(&self, list_id: &str, todo_id: &str) -> Result<Option<Todo>, StoreError> {
        let lists = self.lists.read().await;
        Ok(lists
            .iter()
            .find(|list| list.id == list_id)
            .and_then(|list| list.todo(todo_id))
            .cloned())
    }

    async fn create_list(&self, title: ListTitle) -> Result<TodoList, StoreError> {
        let mut lists = self.lists.write().await;

        // Titles are validated against a read that may be stale by now.
        if lists.iter().any(|list| list.title == title.as_str()) {
            return Err(StoreError::Conflict(format!(
                "list title '{}' already exists",
                title.as_str()
            )));
        }

        let list = TodoList {
            id: new_id(),
            title: title.into_string(),
            todos: Vec::new(),
        };
        lists.push(list.clone());
        tracing::debug!(list_id = %list.id, "session: created list");
        Ok(list)
    }

    async fn update_list_title(&self, list_id: &str, title: ListTitle) -> Result<(), StoreError> {
        let mut lists = self.lists.write().await;

        if lists
            .iter()
            .any(|list| list.id != list_id && list.title == title.as_str())
        {
            return Err(StoreError::Conflict(format!(
                "list title '{}' already exists",
                title.as_str()
            )));
        }

        list_mut(&mut lists, list_id)?.title = title.into_string();
        tracing::debug!(list_id, "session: renamed list");
        Ok(())
    }

    async fn delete_list(&self, list_id: &str) -> Result<(), StoreError> {
        let mut lists = self.lists.write().await;
        let before = lists.len();
        lists.retain(|list| list.id != list_id);

        if lists.len() == before {
            return Err(StoreError::list_not_found(list_id));
        }
        tracing::debug!(list_id, "session: deleted list");
        Ok(())
    }

    async fn create_todo(&self, list_id: &str, title: TodoTitle) -> Result<Todo, StoreError> {
        let mut lists = self.lists.write().await;
        let list = list_mut(&mut lists, list_id)?;

        let todo = Todo {
            id: new_id(),
            title: title.into_string(),
            completed: false,
        };
        list.todos.push(todo.clone());
        tracing::debug!(list_id, todo_id = %todo.id, "session: created todo");
        Ok(todo)
    }

    async fn delete_todo(&self, list_id: &str, todo_id: &str) -> Result<(), StoreError> {
        let mut lists = self.lists.write().await;
        let list = list_mut(&mut lists, list_id)?;
        let before = list.todos.len();
        list.todos.retain(|todo| todo.id != todo_id);

        if list.todos.len() == before {
            return Err(StoreError::todo_not_found(todo_id));
        }
        Ok(())
    }

    async fn update_todo_status(
        &self,
        list_id: &str,
        todo_id: &str,
        completed: bool,
    ) -> Result<(), StoreError> {
        let mut lists = self.lists.write().await;
        let todo = list_mut(&mut lists, list_id)?
            .todos
            .iter_mut()
            .find(|todo| todo.id == todo_id)
            .ok_or_else(|| StoreError::todo_not_found(todo_id))?;

        todo.completed = completed;
        Ok(())
    }

    async fn complete_all_todos(&self, list_id: &str) -> Result<(), StoreError> {
        let mut lists = self.lists.write().await;
        for todo in &mut list_mut(&mut lists, list_id)?.todos {
            todo.completed = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::is_list_completed;

    fn list_title(raw: &str) -> ListTitle {
        let none: Vec<TodoList> = Vec::new();
        ListTitle::parse(raw, &none).unwrap()
    }

    fn todo_title(raw: &str) -> TodoTitle {
        TodoTitle::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn create_and_find_list() {
        let store = SessionStore::new();
        let list = store.create_list(list_title("Groceries")).await.unwrap();

        assert!(Uuid::parse_str(&list.id).is_ok());
        let found = store.find_list(&list.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Groceries");
        assert!(found.todos.is_empty());
        assert!(store.find_list("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lists_keep_creation_order() {
        let store = SessionStore::new();
        store.create_list(list_title("B")).await.unwrap();
        store.create_list(list_title("A")).await.unwrap();

        let titles: Vec<String> = store
            .all_lists()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.title)
            .collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn duplicate_title_conflicts() {
        let store = SessionStore::new();
        store.create_list(list_title("Work")).await.unwrap();

        let err = store.create_list(list_title("Work")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.all_lists().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rename_list() {
        let store = SessionStore::new();
        let list = store.create_list(list_title("Old")).await.unwrap();
        let other = store.create_list(list_title("Other")).await.unwrap();

        store
            .update_list_title(&list.id, list_title("New"))
            .await
            .unwrap();
        assert_eq!(store.find_list(&list.id).await.unwrap().unwrap().title, "New");

        // Keeping its own title is not a conflict
        store
            .update_list_title(&list.id, list_title("New"))
            .await
            .unwrap();

        let err = store
            .update_list_title(&other.id, list_title("New"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        let err = store
            .update_list_title("missing", list_title("X"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { resource: "list", .. }));
    }

    #[tokio::test]
    async fn delete_list_removes_its_todos() {
        let store = SessionStore::new();
        let list = store.create_list(list_title("Trip")).await.unwrap();
        let todo = store.create_todo(&list.id, todo_title("pack")).await.unwrap();
        let keep = store.create_list(list_title("Home")).await.unwrap();

        store.delete_list(&list.id).await.unwrap();

        assert!(store.find_list(&list.id).await.unwrap().is_none());
        assert!(store.find_todo(&list.id, &todo.id).await.unwrap().is_none());
        assert_eq!(store.all_lists().await.unwrap(), vec![keep]);

        let err = store.delete_list(&list.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn todo_lifecycle() {
        let store = SessionStore::new();
        let list = store.create_list(list_title("Chores")).await.unwrap();
        let todo = store.create_todo(&list.id, todo_title("dishes")).await.unwrap();
        assert!(!todo.completed);

        store
            .update_todo_status(&list.id, &todo.id, true)
            .await
            .unwrap();
        let found = store.find_todo(&list.id, &todo.id).await.unwrap().unwrap();
        assert!(found.completed);

        store.delete_todo(&list.id, &todo.id).await.unwrap();
        assert!(store.find_todo(&list.id, &todo.id).await.unwrap().is_none());

        let err = store.delete_todo(&list.id, &todo.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { resource: "todo", .. }));
    }

    #[tokio::test]
    async fn todo_belongs_to_its_list() {
        let store = SessionStore::new();
        let a = store.create_list(list_title("A")).await.unwrap();
        let b = store.create_list(list_title("B")).await.unwrap();
        let todo = store.create_todo(&a.id, todo_title("only in a")).await.unwrap();

        assert!(store.find_todo(&b.id, &todo.id).await.unwrap().is_none());
        let err = store
            .update_todo_status(&b.id, &todo.id, true)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { resource: "todo", .. }));

        let err = store
            .create_todo("missing", todo_title("orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { resource: "list", .. }));
    }

    #[tokio::test]
    async fn complete_all_marks_every_todo() {
        let store = SessionStore::new();
        let list = store.create_list(list_title("Week")).await.unwrap();
        for title in ["mon", "tue", "wed"] {
            store.create_todo(&list.id, todo_title(title)).await.unwrap();
        }
        let other = store.create_list(list_title("Other")).await.unwrap();
        store.create_todo(&other.id, todo_title("untouched")).await.unwrap();

        assert!(!is_list_completed(&store.find_list(&list.id).await.unwrap().unwrap()));
        store.complete_all_todos(&list.id).await.unwrap();

        let list = store.find_list(&list.id).await.unwrap().unwrap();
        assert!(list.todos.iter().all(|t| t.completed));
        assert!(is_list_completed(&list));

        let other = store.find_list(&other.id).await.unwrap().unwrap();
        assert!(!other.todos[0].completed);
    }

    #[tokio::test]
    async fn snapshot_matches_all_lists() {
        let store = SessionStore::new();
        let list = store.create_list(list_title("Snap")).await.unwrap();
        store.create_todo(&list.id, todo_title("one")).await.unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot, store.all_lists().await.unwrap());
        assert_eq!(snapshot[0].todos.len(), 1);
    }
}
