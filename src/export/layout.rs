use super::{COLUMNS, Report, Row};

/// Millimetres per typographic point.
const MM_PER_PT: f32 = 0.3528;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;

// ---------------------------------------------------------------------------
// Page geometry
// ---------------------------------------------------------------------------

/// A4 portrait geometry, all distances in millimetres from the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub title_y: f32,
    pub subtitle_y: f32,
    /// Where the table starts on the first page.
    pub table_y: f32,
    pub title_pt: f32,
    pub body_pt: f32,
    pub line_height: f32,
    pub column_widths: [f32; 5],
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin: 10.0,
            title_y: 10.0,
            subtitle_y: 18.0,
            table_y: 25.0,
            title_pt: 14.0,
            body_pt: 7.0,
            line_height: 3.6,
            column_widths: [70.0, 60.0, 20.0, 22.0, 18.0],
        }
    }
}

impl PageLayout {
    /// Characters that fit in each column at the body font size.
    pub fn column_chars(&self) -> [usize; 5] {
        let glyph = self.body_pt * MM_PER_PT * AVG_GLYPH_EM;
        self.column_widths
            .map(|w| ((w - 1.0) / glyph).floor().max(1.0) as usize)
    }

    /// Left edge of each column.
    pub fn column_x(&self) -> [f32; 5] {
        let mut x = [0.0; 5];
        let mut acc = self.margin;
        for (slot, width) in x.iter_mut().zip(self.column_widths) {
            *slot = acc;
            acc += width;
        }
        x
    }

    /// Body lines available below `top`, header row included.
    fn lines_below(&self, top: f32) -> usize {
        let usable = self.page_height - self.margin - top;
        ((usable / self.line_height).floor() as usize).max(2)
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// One report row broken into physical lines, one cell fragment per column.
pub type WrappedRow = Vec<Row>;

/// Table content of one page. Every page starts with the column header.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Top of the table on this page, in mm from the page top.
    pub table_y: f32,
    pub lines: Vec<Row>,
}

/// Split a report into pages. An empty report still yields one page with
/// the header row.
pub fn paginate(report: &Report, layout: &PageLayout) -> Vec<Page> {
    let chars = layout.column_chars();
    let header: Row = COLUMNS.map(str::to_string);

    let mut pages = vec![Page {
        table_y: layout.table_y,
        lines: vec![header.clone()],
    }];
    let mut capacity = layout.lines_below(layout.table_y);

    for row in &report.rows {
        let wrapped = wrap_row(row, &chars);
        let fits = pages.last().map_or(0, |p| p.lines.len()) + wrapped.len() <= capacity;

        if !fits && pages.last().is_some_and(|p| p.lines.len() > 1) {
            pages.push(Page {
                table_y: layout.margin,
                lines: vec![header.clone()],
            });
            capacity = layout.lines_below(layout.margin);
        }

        // Rows taller than a whole page continue on the next one.
        for line in wrapped {
            let full = pages.last().map_or(true, |p| p.lines.len() >= capacity);
            if full {
                pages.push(Page {
                    table_y: layout.margin,
                    lines: vec![header.clone()],
                });
                capacity = layout.lines_below(layout.margin);
            }
            if let Some(page) = pages.last_mut() {
                page.lines.push(line);
            }
        }
    }
    pages
}

/// Wrap every cell of `row` to its column width and pad the shorter cells
/// so all columns have the same number of lines.
pub fn wrap_row(row: &Row, chars: &[usize; 5]) -> WrappedRow {
    let cells: Vec<Vec<String>> = row
        .iter()
        .zip(chars)
        .map(|(cell, &width)| wrap(cell, width))
        .collect();
    let height = cells.iter().map(Vec::len).max().unwrap_or(1);
    (0..height)
        .map(|line| -> Row {
            std::array::from_fn(|col| cells[col].get(line).cloned().unwrap_or_default())
        })
        .collect()
}

/// Greedy word wrap; words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current.is_empty() {
            word.len()
        } else {
            current.chars().count() + 1 + word.len()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(wrap("Guru Gobind Singh", 11), ["Guru Gobind", "Singh"]);
        assert_eq!(wrap("", 5), [""]);
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(wrap("abcdefgh ij", 3), ["abc", "def", "gh", "ij"]);
    }

    #[test]
    fn wrapped_row_pads_short_cells() {
        let row: Row = ["aa bb cc".into(), "x".into(), String::new(), "y".into(), "1".into()];
        let wrapped = wrap_row(&row, &[2, 5, 5, 5, 5]);
        assert_eq!(wrapped.len(), 3);
        assert_eq!(wrapped[2][0], "cc");
        assert_eq!(wrapped[2][1], "");
    }
}
