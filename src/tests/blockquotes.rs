use super::*;

#[test]
fn basic_quote() {
    html(
        "> Hi\n",
        concat!("<blockquote>\n", "<p>Hi</p>\n", "</blockquote>\n"),
    );
}

#[test]
fn marker_without_space() {
    html(
        ">tight\n",
        concat!("<blockquote>\n", "<p>tight</p>\n", "</blockquote>\n"),
    );
}

#[test]
fn level_three_quote_resolves_inlines() {
    html(
        ">>> Deep *em*\n",
        concat!(
            "<blockquote>\n",
            "<blockquote>\n",
            "<blockquote>\n",
            "<p>Deep <em>em</em></p>\n",
            "</blockquote>\n",
            "</blockquote>\n",
            "</blockquote>\n"
        ),
    );
}

#[test]
fn consecutive_lines_merge() {
    html(
        concat!("> a\n", "> b\n"),
        concat!("<blockquote>\n", "<p>a\nb</p>\n", "</blockquote>\n"),
    );
}

#[test]
fn deeper_lines_nest_inside() {
    html(
        concat!("> outer\n", ">> inner\n"),
        concat!(
            "<blockquote>\n",
            "<p>outer</p>\n",
            "<blockquote>\n",
            "<p>inner</p>\n",
            "</blockquote>\n",
            "</blockquote>\n"
        ),
    );
}

#[test]
fn shallower_line_starts_a_new_quote() {
    html(
        concat!(">> in\n", "> out\n"),
        concat!(
            "<blockquote>\n",
            "<blockquote>\n",
            "<p>in</p>\n",
            "</blockquote>\n",
            "</blockquote>\n",
            "<blockquote>\n",
            "<p>out</p>\n",
            "</blockquote>\n"
        ),
    );
}

#[test]
fn six_markers_is_the_deepest_level() {
    html(
        ">>>>>> six\n",
        concat!(
            "<blockquote>\n",
            "<blockquote>\n",
            "<blockquote>\n",
            "<blockquote>\n",
            "<blockquote>\n",
            "<blockquote>\n",
            "<p>six</p>\n",
            "</blockquote>\n",
            "</blockquote>\n",
            "</blockquote>\n",
            "</blockquote>\n",
            "</blockquote>\n",
            "</blockquote>\n"
        ),
    );
}

#[test]
fn seventh_marker_stays_in_the_content() {
    html(
        ">>>>>>> seven\n",
        concat!(
            "<blockquote>\n",
            "<blockquote>\n",
            "<blockquote>\n",
            "<blockquote>\n",
            "<blockquote>\n",
            "<blockquote>\n",
            "<blockquote>\n",
            "<p>seven</p>\n",
            "</blockquote>\n",
            "</blockquote>\n",
            "</blockquote>\n",
            "</blockquote>\n",
            "</blockquote>\n",
            "</blockquote>\n",
            "</blockquote>\n"
        ),
    );
}

#[test]
fn quotes_may_hold_lists() {
    html(
        concat!("> - a\n", "> - b\n"),
        concat!(
            "<blockquote>\n",
            "<ul>\n",
            "<li>a</li>\n",
            "<li>b</li>\n",
            "</ul>\n",
            "</blockquote>\n"
        ),
    );
}

#[test]
fn blank_line_ends_the_quote() {
    html(
        concat!("> quoted\n", "\n", "plain\n"),
        concat!(
            "<blockquote>\n",
            "<p>quoted</p>\n",
            "</blockquote>\n",
            "<p>plain</p>\n"
        ),
    );
}
