use sqlx::PgConnection;

/// A handle to an active database connection, borrowed for the duration of one
/// or more queries
pub trait ConnectionHandle {
    fn borrow_connection(&mut self) -> &mut PgConnection;
}

/// Seam between business logic and the external systems it talks to. Driven adapters
/// acquire their connections through this trait so domain code can be exercised with
/// a fake in unit tests
pub trait ExternalConnectivity: Sync {
    type DbHandle<'cxn_borrow>: ConnectionHandle
    where
        Self: 'cxn_borrow;

    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error>;
}
