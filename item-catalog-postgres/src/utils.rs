use heapless::String as HeaplessString;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

/// A trait for converting a database row into a model.
pub trait TryFromRow<R>: Sized {
    /// Performs the conversion.
    fn try_from_row(row: &R) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

/// Raised when a column value does not fit the model's bounded string.
#[derive(Debug, thiserror::Error)]
#[error("Value for column '{column}' is too long (max {max} bytes)")]
pub struct ColumnTooLong {
    pub column: String,
    pub max: usize,
}

/// Retrieves a required `HeaplessString` from a row.
pub fn get_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> Result<HeaplessString<N>, Box<dyn Error + Send + Sync>> {
    let s: String = row.try_get(col_name)?;
    HeaplessString::try_from(s.as_str()).map_err(|_| too_long::<N>(col_name))
}

/// Retrieves an optional `HeaplessString` from a row.
pub fn get_optional_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> Result<Option<HeaplessString<N>>, Box<dyn Error + Send + Sync>> {
    let s: Option<String> = row.try_get(col_name)?;
    s.map(|val| HeaplessString::try_from(val.as_str()))
        .transpose()
        .map_err(|_| too_long::<N>(col_name))
}

fn too_long<const N: usize>(col_name: &str) -> Box<dyn Error + Send + Sync> {
    Box::new(ColumnTooLong {
        column: col_name.to_string(),
        max: N,
    })
}
