use sqlx::{sqlite::SqliteRow, FromRow, QueryBuilder, Sqlite, SqliteConnection};

use crate::common::error::AppError;

// ---
// Helper: violação de UNIQUE vira erro de validação (400)
// ---
/// Duas criações concorrentes com o mesmo código podem passar pela checagem
/// de existência; a constraint UNIQUE do banco é quem decide.
pub(crate) fn unique_violation_or(err: sqlx::Error, message: &str) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::Duplicate(message.to_string());
        }
    }
    AppError::DatabaseError(err)
}

/// Converte `rows_affected` de um DELETE/UPDATE em "achou ou não".
pub(crate) fn affected_any(result: sqlx::sqlite::SqliteQueryResult) -> bool {
    result.rows_affected() > 0
}

// ---
// Helper: filhos de vários pais em lotes de `IN (...)`
// ---
/// Máximo de parâmetros por consulta, abaixo do limite antigo do SQLite (999).
const CHILD_BATCH: usize = 500;

/// Busca as linhas de `table` cujo `parent_column` está em `parent_ids`,
/// em ordem de inserção dentro de cada pai. Lista vazia não vai ao banco.
pub(crate) async fn fetch_children<T>(
    conn: &mut SqliteConnection,
    table: &str,
    parent_column: &str,
    parent_ids: &[i64],
) -> Result<Vec<T>, AppError>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let mut rows = Vec::new();

    for batch in parent_ids.chunks(CHILD_BATCH) {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT * FROM {table} WHERE {parent_column} IN ("));
        let mut separated = builder.separated(", ");
        for id in batch {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY id");

        rows.extend(builder.build_query_as::<T>().fetch_all(&mut *conn).await?);
    }

    Ok(rows)
}
