use super::*;

#[test]
fn basic_table() {
    html(
        concat!("| a | b |\n", "| - | - |\n", "| 1 | 2 |\n"),
        concat!(
            "<table>\n",
            "<thead>\n",
            "<tr>\n",
            "<th>a</th>\n",
            "<th>b</th>\n",
            "</tr>\n",
            "</thead>\n",
            "<tbody>\n",
            "<tr>\n",
            "<td>1</td>\n",
            "<td>2</td>\n",
            "</tr>\n",
            "</tbody>\n",
            "</table>\n"
        ),
    );
}

#[test]
fn column_alignment() {
    html(
        concat!(
            "| l | c | r |\n",
            "| :- | :-: | -: |\n",
            "| 1 | 2 | 3 |\n"
        ),
        concat!(
            "<table>\n",
            "<thead>\n",
            "<tr>\n",
            "<th align=\"left\">l</th>\n",
            "<th align=\"center\">c</th>\n",
            "<th align=\"right\">r</th>\n",
            "</tr>\n",
            "</thead>\n",
            "<tbody>\n",
            "<tr>\n",
            "<td align=\"left\">1</td>\n",
            "<td align=\"center\">2</td>\n",
            "<td align=\"right\">3</td>\n",
            "</tr>\n",
            "</tbody>\n",
            "</table>\n"
        ),
    );
}

#[test]
fn header_only_table() {
    html(
        concat!("| a |\n", "| - |\n"),
        concat!(
            "<table>\n",
            "<thead>\n",
            "<tr>\n",
            "<th>a</th>\n",
            "</tr>\n",
            "</thead>\n",
            "</table>\n"
        ),
    );
}

#[test]
fn surplus_cells_are_dropped_and_missing_cells_filled() {
    html(
        concat!("| a | b |\n", "| - | - |\n", "| 1 | 2 | 3 |\n", "| 4 |\n"),
        concat!(
            "<table>\n",
            "<thead>\n",
            "<tr>\n",
            "<th>a</th>\n",
            "<th>b</th>\n",
            "</tr>\n",
            "</thead>\n",
            "<tbody>\n",
            "<tr>\n",
            "<td>1</td>\n",
            "<td>2</td>\n",
            "</tr>\n",
            "<tr>\n",
            "<td>4</td>\n",
            "<td></td>\n",
            "</tr>\n",
            "</tbody>\n",
            "</table>\n"
        ),
    );
}

#[test]
fn escaped_pipes_stay_in_cells() {
    html(
        concat!("| a \\| b | c |\n", "| - | - |\n"),
        concat!(
            "<table>\n",
            "<thead>\n",
            "<tr>\n",
            "<th>a | b</th>\n",
            "<th>c</th>\n",
            "</tr>\n",
            "</thead>\n",
            "</table>\n"
        ),
    );
}

#[test]
fn edge_pipes_are_optional() {
    html(
        concat!("a | b\n", "- | -\n"),
        concat!(
            "<table>\n",
            "<thead>\n",
            "<tr>\n",
            "<th>a</th>\n",
            "<th>b</th>\n",
            "</tr>\n",
            "</thead>\n",
            "</table>\n"
        ),
    );
}

#[test]
fn marker_width_mismatch_is_not_a_table() {
    html(
        concat!("| a | b |\n", "| - |\n"),
        "<p>| a | b |\n| - |</p>\n",
    );
}

#[test]
fn header_needs_a_pipe() {
    html(
        concat!("plain\n", "| - |\n"),
        "<p>plain\n| - |</p>\n",
    );
}

#[test]
fn body_ends_at_a_line_without_pipes() {
    html(
        concat!("| a |\n", "| - |\n", "| 1 |\n", "plain\n"),
        concat!(
            "<table>\n",
            "<thead>\n",
            "<tr>\n",
            "<th>a</th>\n",
            "</tr>\n",
            "</thead>\n",
            "<tbody>\n",
            "<tr>\n",
            "<td>1</td>\n",
            "</tr>\n",
            "</tbody>\n",
            "</table>\n",
            "<p>plain</p>\n"
        ),
    );
}

#[test]
fn cells_hold_inline_markup() {
    html(
        concat!("| *em* | `code` |\n", "| - | - |\n"),
        concat!(
            "<table>\n",
            "<thead>\n",
            "<tr>\n",
            "<th><em>em</em></th>\n",
            "<th><code>code</code></th>\n",
            "</tr>\n",
            "</thead>\n",
            "</table>\n"
        ),
    );
}

#[test]
fn table_interrupts_a_paragraph() {
    html(
        concat!("text\n", "| a |\n", "| - |\n"),
        concat!(
            "<p>text</p>\n",
            "<table>\n",
            "<thead>\n",
            "<tr>\n",
            "<th>a</th>\n",
            "</tr>\n",
            "</thead>\n",
            "</table>\n"
        ),
    );
}
