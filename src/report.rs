//! 端末表示用の整形
//!
//! 表のプレビューとカテゴリ件数を固定幅テキストにする。

use marketing_classifier_common::{CategoryCount, Table};

/// セル表示の最大文字数
const MAX_CELL_CHARS: usize = 40;

/// 表をテキスト化（先頭に行番号列）
pub fn render_table(table: &Table) -> String {
    let mut header = vec![String::new()];
    header.extend(table.columns().iter().map(|c| truncate(c)));

    let mut lines: Vec<Vec<String>> = vec![header];
    for (i, row) in table.rows().iter().enumerate() {
        let mut line = vec![i.to_string()];
        line.extend(row.iter().map(|cell| truncate(&cell.to_string())));
        lines.push(line);
    }

    let widths = column_widths(&lines);
    lines
        .iter()
        .map(|line| format_line(line, &widths))
        .collect::<Vec<_>>()
        .join("\n")
}

/// カテゴリ件数をテキスト化
pub fn render_counts(counts: &[CategoryCount]) -> String {
    let mut lines = vec![vec![String::new(), "count".to_string()]];
    lines.extend(
        counts
            .iter()
            .map(|c| vec![c.label.clone(), c.count.to_string()]),
    );

    let widths = column_widths(&lines);
    lines
        .iter()
        .map(|line| format_line(line, &widths))
        .collect::<Vec<_>>()
        .join("\n")
}

fn column_widths(lines: &[Vec<String>]) -> Vec<usize> {
    let cols = lines.iter().map(Vec::len).max().unwrap_or(0);
    (0..cols)
        .map(|i| {
            lines
                .iter()
                .filter_map(|l| l.get(i))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn format_line(line: &[String], widths: &[usize]) -> String {
    line.iter()
        .zip(widths)
        .map(|(s, &w)| format!("{:<width$}", s, width = w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// 改行を空白にし、長いセルを省略
fn truncate(s: &str) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.chars().count() > MAX_CELL_CHARS {
        let head: String = flat.chars().take(MAX_CELL_CHARS - 1).collect();
        format!("{}…", head)
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketing_classifier_common::Cell;

    #[test]
    fn test_render_table() {
        let table = Table::from_rows(
            vec!["Statement".into(), "flag".into()],
            vec![
                vec![Cell::text("hurry"), Cell::Bool(true)],
                vec![Cell::text("a\nb"), Cell::Bool(false)],
            ],
        )
        .unwrap();

        let text = render_table(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "   Statement  flag");
        assert_eq!(lines[1], "0  hurry      True");
        assert_eq!(lines[2], "1  a b        False");
    }

    #[test]
    fn test_render_counts() {
        let counts = vec![
            CategoryCount { label: "urgency_marketing".into(), count: 3 },
            CategoryCount { label: "exclusive_marketing".into(), count: 12 },
        ];
        let text = render_counts(&counts);
        assert_eq!(
            text,
            "                     count\n\
             urgency_marketing    3\n\
             exclusive_marketing  12"
        );
    }

    #[test]
    fn test_truncate_long_cell() {
        let long = "x".repeat(100);
        let t = truncate(&long);
        assert_eq!(t.chars().count(), MAX_CELL_CHARS);
        assert!(t.ends_with('…'));
    }
}
