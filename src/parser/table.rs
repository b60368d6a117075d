use crate::nodes::{AstNode, NodeValue, TableAlignment};
use crate::parser::{close_sourcepos, Line, Parser};
use crate::scanners;

/// Probes `lines[ix]` for a table: a pipe row whose next line is an
/// alignment row of the same width.  Yields the header cells and the column
/// alignments.
pub(super) fn detect(lines: &[Line], ix: usize) -> Option<(Vec<String>, Vec<TableAlignment>)> {
    let header_text = lines[ix].text.trim_matches([' ', '\t']);
    scanners::find_unescaped(header_text, 0, b'|')?;
    let header = row(header_text)?;

    let marker = row(lines.get(ix + 1)?.text.trim_matches([' ', '\t']))?;
    if marker.len() != header.len() {
        return None;
    }

    let mut alignments = Vec::with_capacity(marker.len());
    for cell in &marker {
        alignments.push(alignment(cell)?);
    }
    Some((header, alignments))
}

pub(super) fn open<'a, 'o, 'c>(
    parser: &mut Parser<'a, 'o, 'c>,
    parent: &'a AstNode<'a>,
    lines: &[Line],
    ix: usize,
    header: Vec<String>,
    alignments: Vec<TableAlignment>,
) -> usize
where
    'c: 'o,
{
    let columns = alignments.len();
    let table = parser.add_child(parent, NodeValue::Table(alignments), lines[ix].number);

    let header_row = parser.add_child(table, NodeValue::TableRow(true), lines[ix].number);
    for content in header {
        let cell = parser.add_child(header_row, NodeValue::TableCell, lines[ix].number);
        cell.data.borrow_mut().content = content;
        close_sourcepos(cell, &lines[ix]);
    }
    close_sourcepos(header_row, &lines[ix]);

    let mut end = ix + 2;
    while end < lines.len() {
        let text = lines[end].text.trim_matches([' ', '\t']);
        if scanners::find_unescaped(text, 0, b'|').is_none() {
            break;
        }
        let cells = match row(text) {
            Some(cells) => cells,
            None => break,
        };

        let tr = parser.add_child(table, NodeValue::TableRow(false), lines[end].number);

        // The header fixes the column count: surplus cells are dropped and
        // missing ones come out empty.
        let mut filled = 0;
        for content in cells.into_iter().take(columns) {
            let cell = parser.add_child(tr, NodeValue::TableCell, lines[end].number);
            cell.data.borrow_mut().content = content;
            close_sourcepos(cell, &lines[end]);
            filled += 1;
        }
        for _ in filled..columns {
            let cell = parser.add_child(tr, NodeValue::TableCell, lines[end].number);
            close_sourcepos(cell, &lines[end]);
        }

        close_sourcepos(tr, &lines[end]);
        end += 1;
    }

    close_sourcepos(table, &lines[end - 1]);
    end
}

/// Splits a pipe row into trimmed cells.  Escaped pipes never split; their
/// marks stay in the cell text for the inline pass to unescape.
fn row(text: &str) -> Option<Vec<String>> {
    let mut cells = Vec::new();
    let mut from = usize::from(text.as_bytes().first() == Some(&b'|'));

    loop {
        match scanners::find_unescaped(text, from, b'|') {
            Some(p) => {
                cells.push(cell(&text[from..p]));
                from = p + 1;
            }
            None => {
                if from < text.len() {
                    cells.push(cell(&text[from..]));
                }
                break;
            }
        }
    }

    if cells.is_empty() {
        None
    } else {
        Some(cells)
    }
}

fn cell(raw: &str) -> String {
    raw.trim_matches([' ', '\t']).to_string()
}

fn alignment(cell: &str) -> Option<TableAlignment> {
    let bytes = cell.as_bytes();
    let left = bytes.first() == Some(&b':');
    let right = bytes.last() == Some(&b':');

    let colons = usize::from(left) + usize::from(right);
    if cell.len() <= colons {
        return None;
    }
    if !cell[usize::from(left)..cell.len() - usize::from(right)]
        .bytes()
        .all(|b| b == b'-')
    {
        return None;
    }

    Some(match (left, right) {
        (true, true) => TableAlignment::Center,
        (true, false) => TableAlignment::Left,
        (false, true) => TableAlignment::Right,
        (false, false) => TableAlignment::None,
    })
}
