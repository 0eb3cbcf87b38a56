//! Plain-text table rendering for list and report commands.

/// Horizontal placement of cell text within its column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub alignment: Alignment,
    pub max_width: Option<usize>,
}

impl TableColumn {
    pub fn left(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            alignment: Alignment::Left,
            max_width: None,
        }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            alignment: Alignment::Right,
            max_width: None,
        }
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct Table {
    columns: Vec<TableColumn>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let widest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| visible_width(cell))
                    .fold(visible_width(&column.header), usize::max);
                column.max_width.map_or(widest, |max| widest.min(max))
            })
            .collect()
    }

    fn render_line(&self, cells: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = cells.get(idx).map(String::as_str).unwrap_or("");
                pad(&truncate(text, *width), *width, column.alignment)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }

    /// Header, rule, then one line per row.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);

        let mut lines = vec![self.render_line(&headers, &widths), "-".repeat(rule_width)];
        lines.extend(self.rows.iter().map(|row| self.render_line(row, &widths)));
        lines.join("\n")
    }
}

/// Character count ignoring ANSI escape sequences.
pub fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for inner in chars.by_ref() {
                if inner.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        width += 1;
    }
    width
}

fn truncate(text: &str, width: usize) -> String {
    if visible_width(text) <= width || text.contains('\u{1b}') {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn pad(text: &str, width: usize, alignment: Alignment) -> String {
    let fill = " ".repeat(width.saturating_sub(visible_width(text)));
    match alignment {
        Alignment::Left => format!("{text}{fill}"),
        Alignment::Right => format!("{fill}{text}"),
    }
}
