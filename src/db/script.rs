//! Renders the schema (and optionally the fixtures) as a standalone SQL script.

use crate::db::{Fixtures, Schema};
use std::fmt::Write;

/// Build the full reset script: drop, create, sequence reset, then inserts.
///
/// Running the script against any SQLite database leaves it in the same
/// state as [`Schema::reset`] followed, when `with_fixtures` is set, by
/// [`Fixtures::load`].
pub fn render(with_fixtures: bool) -> String {
    let mut out = String::new();

    out.push_str("-- XYZ Gym schema\n");
    out.push_str("PRAGMA foreign_keys = ON;\n\n");

    for name in Schema::table_names().rev() {
        let _ = writeln!(out, "DROP TABLE IF EXISTS {name};");
    }
    out.push('\n');

    for table in &Schema::TABLES {
        let _ = writeln!(out, "{};\n", table.ddl);
    }
    for index in Schema::indexes() {
        let _ = writeln!(out, "{index};");
    }
    out.push('\n');

    // sqlite_sequence exists once an AUTOINCREMENT table has been created
    out.push_str("DELETE FROM sqlite_sequence;\n");

    if with_fixtures {
        for fixture in &Fixtures::TABLES {
            out.push('\n');
            for statement in fixture.insert_statements() {
                out.push_str(&statement);
                out.push('\n');
            }
        }
    }

    out
}
