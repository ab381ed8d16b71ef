//! SQL rendering for migration plans.
//!
//! Rendering is a separate, swappable stage: the operations list in
//! [`crate::plan`] stays the testable core, and this module only turns it
//! into text. The down script is best-effort: create/drop are symmetric,
//! adds reverse to drops, and dropped columns are restored from the old
//! definitions the plan carries.

use covenant_contract::DefaultValue;

use crate::expand::{ColumnDef, IndexDef};
use crate::plan::{MigrationPlan, Operation, TableSpec};

/// Rendered migration program.
#[derive(Debug, Clone)]
pub struct MigrationScript {
    /// Statements applying the migration.
    pub up: String,
    /// Best-effort statements reversing the migration.
    pub down: String,
}

/// SQL renderer for migration plans.
pub struct SqlRenderer;

impl SqlRenderer {
    /// Render a plan into an up/down script.
    pub fn render(&self, plan: &MigrationPlan) -> MigrationScript {
        let mut up = Vec::new();
        let mut down = Vec::new();

        for op in &plan.operations {
            match op {
                Operation::CreateTable(spec) => {
                    up.push(self.create_table(spec));
                    for index in &spec.indexes {
                        up.push(self.create_index(index));
                    }
                    down.push(self.drop_table(&spec.table));
                }
                Operation::DropTable { table, recreate } => {
                    up.push(self.drop_table(table));
                    down.push(self.create_table(recreate));
                    for index in &recreate.indexes {
                        down.push(self.create_index(index));
                    }
                }
                Operation::AddColumn { table, column } => {
                    up.push(format!(
                        "ALTER TABLE \"{}\" ADD COLUMN {};",
                        table,
                        self.column_definition(column)
                    ));
                    down.push(format!(
                        "ALTER TABLE \"{}\" DROP COLUMN IF EXISTS \"{}\";",
                        table, column.name
                    ));
                }
                Operation::DropColumn { table, column } => {
                    up.push(format!(
                        "ALTER TABLE \"{}\" DROP COLUMN IF EXISTS \"{}\";",
                        table, column.name
                    ));
                    // The plan carries the dropped definition for reversal.
                    down.push(format!(
                        "ALTER TABLE \"{}\" ADD COLUMN {};",
                        table,
                        self.column_definition(column)
                    ));
                }
                Operation::ChangeColumn { table, old, new } => {
                    up.extend(self.change_column(table, old, new));
                    down.extend(self.change_column(table, new, old));
                }
                Operation::CreateIndex(index) => {
                    up.push(self.create_index(index));
                    down.push(self.drop_index(index));
                }
                Operation::DropIndex(index) => {
                    up.push(self.drop_index(index));
                    down.push(self.create_index(index));
                }
            }
        }

        MigrationScript {
            up: up.join("\n\n"),
            down: down.join("\n\n"),
        }
    }

    /// Generate a CREATE TABLE statement.
    fn create_table(&self, spec: &TableSpec) -> String {
        let mut columns: Vec<String> = spec
            .columns
            .iter()
            .map(|c| self.column_definition(c))
            .collect();

        let pk_cols: Vec<String> = spec
            .columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| format!("\"{}\"", c.name))
            .collect();
        if !pk_cols.is_empty() {
            columns.push(format!("PRIMARY KEY ({})", pk_cols.join(", ")));
        }

        format!(
            "CREATE TABLE \"{}\" (\n    {}\n);",
            spec.table,
            columns.join(",\n    ")
        )
    }

    /// Generate a column definition.
    fn column_definition(&self, column: &ColumnDef) -> String {
        let mut parts = vec![
            format!("\"{}\"", column.name),
            self.sql_type(column).to_string(),
        ];

        if !column.nullable && !column.primary_key {
            parts.push("NOT NULL".to_string());
        }

        if column.unique && !column.primary_key {
            parts.push("UNIQUE".to_string());
        }

        if let Some(default) = &column.default {
            parts.push(format!("DEFAULT {}", self.default_literal(default)));
        }

        if let Some(fk) = &column.foreign_key {
            let mut clause = format!("REFERENCES \"{}\" (\"{}\")", fk.table, fk.column);
            if let Some(action) = fk.on_delete {
                clause.push_str(&format!(" ON DELETE {}", action.as_sql()));
            }
            parts.push(clause);
        }

        parts.join(" ")
    }

    /// Resolve the rendered SQL type for a column.
    fn sql_type<'a>(&self, column: &'a ColumnDef) -> &'a str {
        if column.auto_increment {
            match column.storage_type.as_str() {
                "integer" => return "serial",
                "bigint" => return "bigserial",
                _ => {}
            }
        }
        match column.storage_type.as_str() {
            // Untyped arrays are persisted as delimited text.
            "simple-array" => "text",
            other => other,
        }
    }

    /// Render a default value as a SQL literal.
    fn default_literal(&self, value: &DefaultValue) -> String {
        match value {
            DefaultValue::String(s) => format!("'{}'", s.replace('\'', "''")),
            DefaultValue::Int(i) => i.to_string(),
            DefaultValue::Float(f) => f.to_string(),
            DefaultValue::Bool(true) => "TRUE".to_string(),
            DefaultValue::Bool(false) => "FALSE".to_string(),
            DefaultValue::Null => "NULL".to_string(),
            DefaultValue::Expression(expr) => expr.to_string(),
            DefaultValue::Array(values) => {
                let joined = values
                    .iter()
                    .map(|v| match v {
                        DefaultValue::String(s) => s.replace('\'', "''"),
                        other => self.default_literal(other),
                    })
                    .collect::<Vec<_>>()
                    .join(",");
                format!("'{joined}'")
            }
        }
    }

    /// Generate DROP TABLE.
    fn drop_table(&self, table: &str) -> String {
        format!("DROP TABLE IF EXISTS \"{table}\" CASCADE;")
    }

    /// Generate the statements moving a column from one definition to another.
    fn change_column(&self, table: &str, old: &ColumnDef, new: &ColumnDef) -> Vec<String> {
        let mut stmts = Vec::new();

        if old.storage_type != new.storage_type {
            let ty = self.sql_type(new);
            stmts.push(format!(
                "ALTER TABLE \"{}\" ALTER COLUMN \"{}\" TYPE {} USING \"{}\"::{};",
                table, new.name, ty, new.name, ty
            ));
        }

        if old.nullable != new.nullable {
            if new.nullable {
                stmts.push(format!(
                    "ALTER TABLE \"{}\" ALTER COLUMN \"{}\" DROP NOT NULL;",
                    table, new.name
                ));
            } else {
                stmts.push(format!(
                    "ALTER TABLE \"{}\" ALTER COLUMN \"{}\" SET NOT NULL;",
                    table, new.name
                ));
            }
        }

        if old.default != new.default {
            match &new.default {
                Some(default) => stmts.push(format!(
                    "ALTER TABLE \"{}\" ALTER COLUMN \"{}\" SET DEFAULT {};",
                    table,
                    new.name,
                    self.default_literal(default)
                )),
                None => stmts.push(format!(
                    "ALTER TABLE \"{}\" ALTER COLUMN \"{}\" DROP DEFAULT;",
                    table, new.name
                )),
            }
        }

        if stmts.is_empty() {
            // Uniqueness transitions arrive as index operations and validation
            // changes have no direct DDL; keep the artifact truthful anyway.
            stmts.push(format!(
                "-- column \"{}\".\"{}\" definition changed without direct DDL",
                table, new.name
            ));
        }

        stmts
    }

    /// Generate CREATE INDEX.
    fn create_index(&self, index: &IndexDef) -> String {
        let unique = if index.unique { "UNIQUE " } else { "" };
        let cols: Vec<String> = index.columns.iter().map(|c| format!("\"{c}\"")).collect();
        format!(
            "CREATE {}INDEX \"{}\" ON \"{}\" ({});",
            unique,
            index.name,
            index.table,
            cols.join(", ")
        )
    }

    /// Generate DROP INDEX.
    fn drop_index(&self, index: &IndexDef) -> String {
        format!("DROP INDEX IF EXISTS \"{}\";", index.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covenant_contract::{AbstractType, Contract, Field, ForeignKey, ReferentialAction};
    use crate::plan::synthesize;

    fn render(plan: &MigrationPlan) -> MigrationScript {
        SqlRenderer.render(plan)
    }

    #[test]
    fn test_create_table_script() {
        let contract = Contract::new("UserContract")
            .with_field(Field::new("id", AbstractType::Int64).primary_key())
            .with_field(Field::new("email", AbstractType::String).unique());

        let plan = synthesize(None, Some(&contract)).unwrap().unwrap();
        let script = render(&plan);

        assert!(script.up.contains("CREATE TABLE \"user\""));
        assert!(script.up.contains("\"email\" varchar NOT NULL UNIQUE"));
        assert!(script.up.contains("PRIMARY KEY (\"id\")"));
        assert!(script.up.contains("CREATE UNIQUE INDEX \"uq_user_email\""));
        assert!(script.down.contains("DROP TABLE IF EXISTS \"user\""));
    }

    #[test]
    fn test_drop_table_script_restates_structure() {
        let contract = Contract::new("UserContract")
            .with_field(Field::new("id", AbstractType::Int64).primary_key())
            .with_field(Field::new("email", AbstractType::String).unique());

        let plan = synthesize(Some(&contract), None).unwrap().unwrap();
        let script = render(&plan);

        assert!(script.up.contains("DROP TABLE IF EXISTS \"user\""));
        assert!(script.down.contains("CREATE TABLE \"user\""));
        assert!(script.down.contains("CREATE UNIQUE INDEX \"uq_user_email\""));
    }

    #[test]
    fn test_change_column_type_uses_cast() {
        let old = Contract::new("PostContract")
            .with_field(Field::new("id", AbstractType::Int64).primary_key())
            .with_field(Field::new("content", AbstractType::Text));
        let new = Contract::new("PostContract")
            .with_field(Field::new("id", AbstractType::Int64).primary_key())
            .with_field(Field::new("content", AbstractType::Jsonb));

        let plan = synthesize(Some(&old), Some(&new)).unwrap().unwrap();
        let script = render(&plan);

        assert!(
            script
                .up
                .contains("ALTER COLUMN \"content\" TYPE jsonb USING \"content\"::jsonb")
        );
        // Down restores the old type.
        assert!(script.down.contains("TYPE text"));
    }

    #[test]
    fn test_dropped_column_restored_in_down() {
        let old = Contract::new("ItemContract")
            .with_field(Field::new("id", AbstractType::Int64).primary_key())
            .with_field(Field::new("legacy", AbstractType::Text).nullable());
        let new = Contract::new("ItemContract")
            .with_field(Field::new("id", AbstractType::Int64).primary_key());

        let plan = synthesize(Some(&old), Some(&new)).unwrap().unwrap();
        let script = render(&plan);

        assert!(script.up.contains("DROP COLUMN IF EXISTS \"legacy\""));
        assert!(script.down.contains("ADD COLUMN \"legacy\" text"));
    }

    #[test]
    fn test_foreign_key_clause() {
        let column = crate::expand::ColumnDef::from_field(
            &Field::new("owner_id", AbstractType::Int64).with_foreign_key(
                ForeignKey::new("users", "id").on_delete(ReferentialAction::Cascade),
            ),
        );

        let sql = SqlRenderer.column_definition(&column);
        assert!(sql.contains("REFERENCES \"users\" (\"id\") ON DELETE CASCADE"));
    }

    #[test]
    fn test_default_literals() {
        let renderer = SqlRenderer;
        assert_eq!(renderer.default_literal(&DefaultValue::Int(0)), "0");
        assert_eq!(renderer.default_literal(&DefaultValue::Bool(false)), "FALSE");
        assert_eq!(
            renderer.default_literal(&DefaultValue::String(String::new())),
            "''"
        );
        assert_eq!(
            renderer.default_literal(&DefaultValue::String("it's".into())),
            "'it''s'"
        );
        assert_eq!(
            renderer.default_literal(&DefaultValue::Expression("now()".into())),
            "now()"
        );
        assert_eq!(
            renderer.default_literal(&DefaultValue::Array(vec![
                DefaultValue::String("a".into()),
                DefaultValue::String("b".into()),
            ])),
            "'a,b'"
        );
    }

    #[test]
    fn test_auto_increment_renders_serial() {
        let plan = synthesize(None, Some(&Contract::new("EmptyContract")))
            .unwrap()
            .unwrap();
        let script = render(&plan);
        assert!(script.up.contains("\"id\" bigserial"));
    }

    #[test]
    fn test_repeated_column_renders_as_text() {
        let contract = Contract::new("TagContract")
            .with_field(Field::new("id", AbstractType::Int64).primary_key())
            .with_field(Field::new("labels", AbstractType::String).repeated());

        let plan = synthesize(None, Some(&contract)).unwrap().unwrap();
        let script = render(&plan);
        assert!(script.up.contains("\"labels\" text"));
    }
}
