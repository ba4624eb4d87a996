use crate::domain;
use crate::domain::todo::Todo;
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use sqlx::FromRow;
use uuid::Uuid;

/// Driven adapter persisting the "todo" collection to PostgreSQL
pub struct DbTodoStore;

#[derive(FromRow)]
struct TodoRow {
    id: String,
    description: String,
    is_complete: bool,
}

impl From<TodoRow> for Todo {
    fn from(value: TodoRow) -> Self {
        Todo {
            id: Some(value.id),
            description: value.description,
            is_complete: value.is_complete,
        }
    }
}

impl domain::todo::driven_ports::TodoStore for DbTodoStore {
    async fn save(
        &self,
        todo: &Todo,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Todo, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        // The store assigns ids; records arriving without one get a fresh UUID
        let id = match todo.id {
            Some(ref existing_id) => existing_id.clone(),
            None => Uuid::new_v4().to_string(),
        };

        sqlx::query(
            "INSERT INTO todo (id, description, is_complete) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE \
             SET description = EXCLUDED.description, is_complete = EXCLUDED.is_complete",
        )
        .bind(&id)
        .bind(&todo.description)
        .bind(todo.is_complete)
        .execute(cxn.borrow_connection())
        .await
        .context("trying to save a todo")?;

        Ok(Todo {
            id: Some(id),
            description: todo.description.clone(),
            is_complete: todo.is_complete,
        })
    }

    async fn find_all(&self, ext_cxn: &mut impl ExternalConnectivity) -> Result<Vec<Todo>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todos: Vec<Todo> =
            sqlx::query_as::<_, TodoRow>("SELECT t.id, t.description, t.is_complete FROM todo t")
                .fetch_all(cxn.borrow_connection())
                .await
                .context("trying to fetch all todos")?
                .into_iter()
                .map(Todo::from)
                .collect();

        Ok(todos)
    }

    async fn find_one(
        &self,
        id: &str,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<Todo>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todo = sqlx::query_as::<_, TodoRow>(
            "SELECT t.id, t.description, t.is_complete FROM todo t WHERE t.id = $1",
        )
        .bind(id)
        .fetch_optional(cxn.borrow_connection())
        .await
        .context("trying to fetch a todo by id")?;

        Ok(todo.map(Todo::from))
    }

    async fn delete(&self, id: &str, ext_cxn: &mut impl ExternalConnectivity) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        // Idempotent by design of the endpoint contract: deleting an id that was
        // never stored is not an error
        sqlx::query("DELETE FROM todo WHERE id = $1")
            .bind(id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to delete a todo")?;

        Ok(())
    }

    async fn delete_all(&self, ext_cxn: &mut impl ExternalConnectivity) -> Result<(), Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        sqlx::query("DELETE FROM todo")
            .execute(cxn.borrow_connection())
            .await
            .context("trying to empty the todo collection")?;

        Ok(())
    }
}
