//! Box-drawn tables with deterministic column widths.

/// Render `headers` and `rows` as box-drawn lines.
///
/// Column widths come from the widest cell per column, measured in
/// characters. Rows shorter than the header are padded with empty cells.
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i >= widths.len() {
                widths.push(0);
            }
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let spans: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}", spans.join(mid))
    };

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(rule("┌", "┬", "┐"));
    lines.push(format_row(headers.iter().copied(), &widths));
    lines.push(rule("├", "┼", "┤"));
    for row in rows {
        lines.push(format_row(row.iter().map(String::as_str), &widths));
    }
    lines.push(rule("└", "┴", "┘"));
    lines
}

fn format_row<'c>(cells: impl Iterator<Item = &'c str>, widths: &[usize]) -> String {
    let cells: Vec<&str> = cells.collect();
    let mut line = String::from("│");
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).copied().unwrap_or("");
        let pad = width.saturating_sub(cell.chars().count());
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad));
        line.push_str(" │");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_aligned_box() {
        let rows = vec![
            vec!["serve".to_string(), "8080".to_string()],
            vec!["build".to_string(), "-".to_string()],
        ];

        let lines = render(&["command", "port"], &rows);

        assert_eq!(
            lines,
            [
                "┌─────────┬──────┐",
                "│ command │ port │",
                "├─────────┼──────┤",
                "│ serve   │ 8080 │",
                "│ build   │ -    │",
                "└─────────┴──────┘",
            ]
        );
    }

    #[test]
    fn short_rows_are_padded() {
        let rows = vec![vec!["only".to_string()]];

        let lines = render(&["a", "b"], &rows);

        assert_eq!(lines[3], "│ only │   │");
    }

    #[test]
    fn widths_follow_widest_cell() {
        let rows = vec![vec!["value-wider-than-header".to_string()]];

        let lines = render(&["h"], &rows);

        assert_eq!(lines[1], "│ h                       │");
        assert_eq!(lines[3], "│ value-wider-than-header │");
    }
}
