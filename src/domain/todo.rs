use crate::external_connections::ExternalConnectivity;
use anyhow::{Context, Error};

/// The single record managed by this service. [id] is absent until the store
/// persists the record and assigns one.
#[derive(Debug, Clone)]
pub struct Todo {
    pub id: Option<String>,
    pub description: String,
    pub is_complete: bool,
}

// Identity equality: two todos are the same record iff both have been persisted
// and carry the same id. Records without ids never compare equal, themselves
// included, so Eq is intentionally not implemented (the relation isn't reflexive).
impl PartialEq for Todo {
    fn eq(&self, other: &Self) -> bool {
        match (&self.id, &other.id) {
            (Some(own_id), Some(other_id)) => own_id == other_id,
            _ => false,
        }
    }
}

pub mod driven_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;

    /// Store for the "todo" collection, keyed by id. Mirrors a generic
    /// document-repository surface: save/find/delete with no validation
    /// and no transactional guarantees beyond the backing store's own.
    pub trait TodoStore {
        /// Inserts [todo] under a newly assigned id when it has none,
        /// otherwise upserts by id. Returns the persisted record.
        async fn save(
            &self,
            todo: &Todo,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Todo, anyhow::Error>;

        /// Retrieves every record in the collection, unordered.
        async fn find_all(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Todo>, anyhow::Error>;

        /// Retrieves the record stored under [id], if any.
        async fn find_one(
            &self,
            id: &str,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<Todo>, anyhow::Error>;

        /// Removes the record stored under [id]. Not an error if no such record exists.
        async fn delete(
            &self,
            id: &str,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;

        /// Empties the collection.
        async fn delete_all(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<(), anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;
    use crate::external_connections::ExternalConnectivity;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum CreateTodoError {
        #[error("A new todo cannot already have an ID.")]
        IdAlreadyAssigned,
        #[error(transparent)]
        PortError(#[from] anyhow::Error),
    }


    pub trait TodoPort {
        async fn create_todo(
            &self,
            todo: &Todo,
            ext_cxn: &mut impl ExternalConnectivity,
            store: &impl driven_ports::TodoStore,
        ) -> Result<Todo, CreateTodoError>;
        async fn upsert_todo(
            &self,
            todo: &Todo,
            ext_cxn: &mut impl ExternalConnectivity,
            store: &impl driven_ports::TodoStore,
        ) -> Result<Todo, anyhow::Error>;
        async fn all_todos(
            &self,
            ext_cxn: &mut impl ExternalConnectivity,
            store: &impl driven_ports::TodoStore,
        ) -> Result<Vec<Todo>, anyhow::Error>;
        async fn todo_by_id(
            &self,
            id: &str,
            ext_cxn: &mut impl ExternalConnectivity,
            store: &impl driven_ports::TodoStore,
        ) -> Result<Option<Todo>, anyhow::Error>;
        async fn delete_todo(
            &self,
            id: &str,
            ext_cxn: &mut impl ExternalConnectivity,
            store: &impl driven_ports::TodoStore,
        ) -> Result<(), anyhow::Error>;
    }
}

pub struct TodoService {}

impl driving_ports::TodoPort for TodoService {
    async fn create_todo(
        &self,
        todo: &Todo,
        ext_cxn: &mut impl ExternalConnectivity,
        store: &impl driven_ports::TodoStore,
    ) -> Result<Todo, driving_ports::CreateTodoError> {
        if todo.id.is_some() {
            return Err(driving_ports::CreateTodoError::IdAlreadyAssigned);
        }

        let created = store
            .save(todo, &mut *ext_cxn)
            .await
            .context("creating a todo")?;
        Ok(created)
    }

    async fn upsert_todo(
        &self,
        todo: &Todo,
        ext_cxn: &mut impl ExternalConnectivity,
        store: &impl driven_ports::TodoStore,
    ) -> Result<Todo, Error> {
        let saved = store
            .save(todo, &mut *ext_cxn)
            .await
            .context("upserting a todo")?;
        Ok(saved)
    }

    async fn all_todos(
        &self,
        ext_cxn: &mut impl ExternalConnectivity,
        store: &impl driven_ports::TodoStore,
    ) -> Result<Vec<Todo>, Error> {
        let todos = store
            .find_all(&mut *ext_cxn)
            .await
            .context("listing todos")?;
        Ok(todos)
    }

    async fn todo_by_id(
        &self,
        id: &str,
        ext_cxn: &mut impl ExternalConnectivity,
        store: &impl driven_ports::TodoStore,
    ) -> Result<Option<Todo>, Error> {
        let todo = store
            .find_one(id, &mut *ext_cxn)
            .await
            .context("fetching a todo by id")?;
        Ok(todo)
    }

    async fn delete_todo(
        &self,
        id: &str,
        ext_cxn: &mut impl ExternalConnectivity,
        store: &impl driven_ports::TodoStore,
    ) -> Result<(), Error> {
        store
            .delete(id, &mut *ext_cxn)
            .await
            .context("deleting a todo")?;
        Ok(())
    }
}
