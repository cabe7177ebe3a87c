//! Table rendering

use finsec_domain::{Row, Table};

use super::layout::escape_html;

/// Render `rows` under the columns of `table`
pub fn render_rows(table: &Table, rows: &[Row]) -> String {
    if table.columns().is_empty() {
        return r#"<p class="muted">The table has no columns.</p>"#.to_string();
    }

    let header: String = table
        .columns()
        .iter()
        .map(|column| format!("<th>{}</th>", escape_html(column)))
        .collect();

    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = table
                .columns()
                .iter()
                .map(|column| {
                    let value = row.get(column).map(ToString::to_string).unwrap_or_default();
                    format!("<td>{}</td>", escape_html(&value))
                })
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();

    format!("<table><thead><tr>{header}</tr></thead><tbody>{body}</tbody></table>")
}

/// Render every row of `table`
pub fn render_table(table: &Table) -> String {
    render_rows(table, table.rows())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_escapes_cells() {
        let table = Table::from_csv_bytes(b"memo\n<b>hi</b>\n").unwrap();
        let html = render_table(&table);
        assert!(html.contains("<th>memo</th>"));
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
    }

    #[test]
    fn test_render_head_only() {
        let table = Table::from_csv_bytes(b"n\n1\n2\n3\n").unwrap();
        let html = render_rows(&table, table.head(2));
        assert_eq!(html.matches("<tr>").count(), 3);
    }
}
