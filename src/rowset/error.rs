/*!
# Rowset Error Handling

All fallible rowset operations return well-structured errors with enough
context to report the failing column, value, or input position.

## Error Categories

- **Parse Errors**: malformed delimited text or literals, with position
  information when known
- **Schema Errors**: unknown columns, nullability and shape violations
- **Type Errors**: cell coercion and cast failures, with expected vs
  actual types
- **Operation Errors**: invalid arguments to table, aggregate, or date
  helpers

## Examples

```rust
use rowset::rowset::error::TableError;

let err = TableError::type_error("INTEGER", "STRING", Some("abc".to_string()));
println!("{}", err); // "Type error: expected INTEGER, got STRING for value 'abc'"

let err = TableError::schema_error("column not found", Some("qty".to_string()));
println!("{}", err); // "Schema error for column 'qty': column not found"
```

Errors implement `std::error::Error`, `Display`, and `Debug` for seamless
integration with the `?` operator and error-reporting frameworks.
*/

use std::fmt;

/// Error type for all rowset operations.
///
/// Each variant carries the context relevant to its failure mode so error
/// messages can name the offending column, value, or input position.
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// Malformed delimited text or literal input.
    ///
    /// Raised by the delimited-text tokenizer and typed-literal parsing.
    /// Includes the character position in the input when known.
    ParseError {
        /// Human-readable error message
        message: String,
        /// Character position in the input where the error occurred
        position: Option<usize>,
    },

    /// Schema validation failure.
    ///
    /// Raised when a row references a column the schema does not define,
    /// violates nullability, or does not match the table shape.
    SchemaError {
        /// Description of the schema violation
        message: String,
        /// Name of the column that caused the error, if applicable
        column: Option<String>,
    },

    /// Cell coercion or cast failure.
    ///
    /// Raised when a non-null cell cannot be converted to the requested
    /// type.
    TypeError {
        /// Expected cell type
        expected: String,
        /// Actual cell type encountered
        actual: String,
        /// The value that failed to convert, if available
        value: Option<String>,
    },

    /// Invalid argument to a table, aggregate, or date helper.
    OperationError {
        /// Description of the failure
        message: String,
        /// Name of the helper that rejected its input, if applicable
        operation: Option<String>,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::ParseError { message, position } => {
                if let Some(pos) = position {
                    write!(f, "Parse error at position {}: {}", pos, message)
                } else {
                    write!(f, "Parse error: {}", message)
                }
            }
            TableError::SchemaError { message, column } => {
                if let Some(col) = column {
                    write!(f, "Schema error for column '{}': {}", col, message)
                } else {
                    write!(f, "Schema error: {}", message)
                }
            }
            TableError::TypeError {
                expected,
                actual,
                value,
            } => {
                if let Some(val) = value {
                    write!(
                        f,
                        "Type error: expected {}, got {} for value '{}'",
                        expected, actual, val
                    )
                } else {
                    write!(f, "Type error: expected {}, got {}", expected, actual)
                }
            }
            TableError::OperationError { message, operation } => {
                if let Some(op) = operation {
                    write!(f, "Operation error in {}: {}", op, message)
                } else {
                    write!(f, "Operation error: {}", message)
                }
            }
        }
    }
}

impl std::error::Error for TableError {}

impl TableError {
    /// Create a parse error with an optional input position
    pub fn parse_error(message: impl Into<String>, position: Option<usize>) -> Self {
        TableError::ParseError {
            message: message.into(),
            position,
        }
    }

    /// Create a schema error
    pub fn schema_error(message: impl Into<String>, column: Option<String>) -> Self {
        TableError::SchemaError {
            message: message.into(),
            column,
        }
    }

    /// Create a type error
    pub fn type_error(
        expected: impl Into<String>,
        actual: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        TableError::TypeError {
            expected: expected.into(),
            actual: actual.into(),
            value,
        }
    }

    /// Create an operation error
    pub fn operation_error(message: impl Into<String>, operation: Option<String>) -> Self {
        TableError::OperationError {
            message: message.into(),
            operation,
        }
    }
}

/// Result type for rowset operations
pub type TableResult<T> = Result<T, TableError>;
