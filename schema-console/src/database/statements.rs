//! Statement text for table-scoped reads
//!
//! Only [`ValidIdentifier`]s are interpolated; limits and offsets are
//! integers.

use crate::identifier::ValidIdentifier;
use crate::schema::RowWindow;

pub fn count_statement(table: &ValidIdentifier) -> String {
    format!("SELECT COUNT(*) AS count FROM {}", table.quoted())
}

pub fn select_statement(table: &ValidIdentifier, window: RowWindow) -> String {
    let mut sql = format!("SELECT * FROM {}", table.quoted());

    if window.ordered {
        sql.push_str(" ORDER BY 1");
    }

    sql.push_str(&format!(" LIMIT {}", window.limit));

    if window.offset > 0 {
        sql.push_str(&format!(" OFFSET {}", window.offset));
    }

    sql
}
