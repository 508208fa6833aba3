use thiserror::Error;

// Unified error type for elide

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElideError {
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("size mismatch: {left} elements vs {right} elements")]
    SizeMismatch { left: usize, right: usize },
    #[error("shape mismatch: {left_rows}x{left_columns} vs {right_rows}x{right_columns}")]
    ShapeMismatch {
        left_rows: usize,
        left_columns: usize,
        right_rows: usize,
        right_columns: usize,
    },
    #[error("dimension mismatch: left has {left_columns} columns, right has {right_rows} rows")]
    DimensionMismatch { left_columns: usize, right_rows: usize },
    #[error("bad shape: {len} elements do not split into rows of {columns}")]
    BadShape { len: usize, columns: usize },
    #[error("row has {found} elements, expected {expected}")]
    RowShapeMismatch { expected: usize, found: usize },
    #[error("matrix must have at least one column")]
    ZeroColumns,
    #[error("shape {rows}x{columns} overflows usize")]
    ShapeOverflow { rows: usize, columns: usize },
    #[error("division by zero")]
    DivideByZero,
    #[error("empty input")]
    EmptyInput,
}
