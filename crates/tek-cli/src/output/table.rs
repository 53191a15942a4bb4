#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN_WIDTH: usize = 4;

// Widths are in chars; team names and field labels are often Arabic.
fn width_of(value: &str) -> usize {
    value.chars().count()
}

/// Render an aligned table. Numeric cells are right-aligned.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| width_of(cell.as_str()))
                .max()
                .unwrap_or(0)
                .max(width_of(header))
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();
    shrink_to_fit(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(width_of(&header_line));

    let mut lines = vec![header_line, divider];
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = truncate(row.get(index).map_or("-", String::as_str), *width);
                let padded = pad(&cell, *width, looks_numeric(&cell));
                if options.color {
                    colorize(&cell, &padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line);
    }
    lines.join("\n")
}

/// Narrow the widest column one char at a time until the table fits.
fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > width_of(headers[*idx]).max(MIN_COLUMN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);
        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if width_of(value) <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok()
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(width_of(value)));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

fn colorize(cell: &str, padded: &str) -> String {
    let code = match cell.to_ascii_lowercase().as_str() {
        "complete" | "valid" | "true" | "found" => "32",
        "partial" | "pending" => "33",
        "invalid" | "false" | "not_found" | "failed" => "31",
        _ => return padded.to_string(),
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn aligns_mixed_widths() {
        let rows = vec![
            vec!["1".to_string(), "Herons".to_string(), "87.5".to_string()],
            vec!["12".to_string(), "Storks of the north".to_string(), "-".to_string()],
        ];
        let table = render_table(&["rank", "team_name", "total"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(width_of(lines[2]), width_of(lines[3]));
        assert!(lines[2].starts_with("   1"));
    }

    #[test]
    fn arabic_cells_are_measured_in_chars() {
        let rows = vec![vec!["التقنية المالية".to_string()]];
        let table = render_table(&["field"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(width_of(lines[0]), width_of(lines[2]));
    }

    #[test]
    fn shrinks_widest_column_to_fit() {
        let rows = vec![vec!["1".to_string(), "x".repeat(60)]];
        let table = render_table(
            &["rank", "notes"],
            &rows,
            TableOptions {
                max_width: Some(40),
                color: false,
            },
        );
        let row = table.lines().nth(2).expect("row");
        assert_eq!(width_of(row), 40);
        assert!(row.ends_with('…'));
    }

    #[test]
    fn colors_score_status() {
        let table = render_table(
            &["status"],
            &[vec!["partial".to_string()]],
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        assert!(table.contains("\u{1b}[33m"));
    }
}
