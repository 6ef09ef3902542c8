/// Errors from the census snapshot builder.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("{path} already exists")]
    AlreadyExists { path: String },

    #[error("census table already exists")]
    TableExists,

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("engine error: {0}")]
    Engine(#[from] manifold_kernel::EngineError),
}
