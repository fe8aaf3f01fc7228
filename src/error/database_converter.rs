//! Maps diesel failures onto `AppError`.
//!
//! PostgreSQL names implicit constraints `<table>_<column>_<suffix>`, which is
//! enough to tell a duplicate `external_id` from a failed `price` check.

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

use crate::error::AppError;

#[derive(Debug, PartialEq, Eq)]
struct Constraint<'a> {
    table: &'a str,
    column: &'a str,
}

impl<'a> Constraint<'a> {
    fn parse(name: &'a str) -> Option<Self> {
        let stem = ["_pkey", "_fkey", "_key", "_check"]
            .iter()
            .find_map(|suffix| name.strip_suffix(suffix))?;
        match stem.split_once('_') {
            Some((table, column)) if !table.is_empty() && !column.is_empty() => {
                Some(Self { table, column })
            }
            _ => None,
        }
    }
}

/// Value inside `Key (column)=(value)`, as printed in unique-violation details.
fn offending_value(text: &str) -> Option<&str> {
    let (_, after) = text.split_once(")=(")?;
    after.split(')').next()
}

pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// `operation` names what was being attempted, e.g. `"insert raqueta"`.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        let (kind, info) = match error {
            DieselError::DatabaseError(kind, info) => (kind, info),
            DieselError::NotFound => return AppError::raqueta_not_found("id", "unknown"),
            other => {
                return AppError::Database {
                    operation: operation.to_string(),
                    source: other.into(),
                };
            }
        };

        Self::classify(kind, &*info).unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::anyhow!("{}", info.message()),
        })
    }

    fn classify(kind: DatabaseErrorKind, info: &dyn DatabaseErrorInformation) -> Option<AppError> {
        let constraint = Constraint::parse(info.constraint_name()?)?;

        match kind {
            DatabaseErrorKind::UniqueViolation => {
                let value = info
                    .details()
                    .and_then(offending_value)
                    .or_else(|| offending_value(info.message()))
                    .unwrap_or("unknown");
                Some(AppError::Duplicate {
                    entity: constraint.table.to_string(),
                    field: constraint.column.to_string(),
                    value: value.to_string(),
                })
            }
            DatabaseErrorKind::CheckViolation => Some(AppError::Validation {
                field: constraint.column.to_string(),
                reason: format!("Check constraint failed for {}", constraint.table),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeInfo {
        message: &'static str,
        details: Option<&'static str>,
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for FakeInfo {
        fn message(&self) -> &str {
            self.message
        }
        fn details(&self) -> Option<&str> {
            self.details
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn convert(kind: DatabaseErrorKind, info: FakeInfo) -> AppError {
        DatabaseErrorConverter::convert_diesel_error(
            DieselError::DatabaseError(kind, Box::new(info)),
            "insert raqueta",
        )
    }

    #[test]
    fn test_not_found() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find");
        assert!(matches!(result, AppError::NotFound { .. }));
    }

    #[test]
    fn test_duplicate_external_id() {
        let error = convert(
            DatabaseErrorKind::UniqueViolation,
            FakeInfo {
                message: "duplicate key value violates unique constraint \"raquetas_external_id_key\"",
                details: Some("Key (external_id)=(5f0c6b1e-0000-4000-8000-000000000000) already exists."),
                constraint: Some("raquetas_external_id_key"),
            },
        );

        match error {
            AppError::Duplicate { entity, field, value } => {
                assert_eq!(entity, "raquetas");
                assert_eq!(field, "external_id");
                assert_eq!(value, "5f0c6b1e-0000-4000-8000-000000000000");
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_price_check_becomes_validation() {
        let error = convert(
            DatabaseErrorKind::CheckViolation,
            FakeInfo {
                message: "new row for relation \"raquetas\" violates check constraint",
                constraint: Some("raquetas_price_check"),
                ..Default::default()
            },
        );

        match error {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "price");
                assert!(reason.contains("raquetas"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_unnamed_constraint_is_database_error() {
        let error = convert(
            DatabaseErrorKind::UniqueViolation,
            FakeInfo {
                message: "something odd",
                ..Default::default()
            },
        );
        assert!(matches!(error, AppError::Database { operation, .. } if operation == "insert raqueta"));
    }

    #[test]
    fn test_constraint_names() {
        assert_eq!(
            Constraint::parse("raquetas_external_id_key"),
            Some(Constraint {
                table: "raquetas",
                column: "external_id"
            })
        );
        assert_eq!(Constraint::parse("raquetas_pkey"), None);
        assert_eq!(Constraint::parse("weird"), None);
        assert_eq!(offending_value("Key (id)=(7) already exists."), Some("7"));
    }
}
