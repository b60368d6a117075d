use super::*;

#[test]
fn alert_box() {
    html(
        concat!("!!!\n", "Inside the box.\n", "!!!\n"),
        concat!(
            "<div class=\"box box-alert\">\n",
            "<p>Inside the box.</p>\n",
            "</div>\n"
        ),
    );
}

#[test]
fn notice_box() {
    html(
        concat!("!!\n", "Gentle note.\n", "!!\n"),
        concat!(
            "<div class=\"box box-notice\">\n",
            "<p>Gentle note.</p>\n",
            "</div>\n"
        ),
    );
}

#[test]
fn unterminated_box_runs_to_end() {
    html(
        concat!("!!!\n", "Still inside.\n"),
        concat!(
            "<div class=\"box box-alert\">\n",
            "<p>Still inside.</p>\n",
            "</div>\n"
        ),
    );
}

#[test]
fn box_body_holds_multiple_blocks() {
    html(
        concat!("!!\n", "# Heading\n", "\n", "text\n", "!!\n"),
        concat!(
            "<div class=\"box box-notice\">\n",
            "<h1>Heading</h1>\n",
            "<p>text</p>\n",
            "</div>\n"
        ),
    );
}

#[test]
fn delimiter_tolerates_trailing_whitespace() {
    html(
        concat!("!!!  \n", "x\n", "!!!\t\n"),
        concat!(
            "<div class=\"box box-alert\">\n",
            "<p>x</p>\n",
            "</div>\n"
        ),
    );
}

#[test]
fn box_may_contain_an_admonition() {
    html(
        concat!("!!!\n", "!!! note\n", "    Deep.\n", "!!!\n"),
        concat!(
            "<div class=\"box box-alert\">\n",
            "<div class=\"admonition note\">\n",
            "<p class=\"admonition-title\">Note</p>\n",
            "<p>Deep.</p>\n",
            "</div>\n",
            "</div>\n"
        ),
    );
}

#[test]
fn text_after_delimiter_is_not_a_box() {
    html("!!!x\n", "<p>!!!x</p>\n");
}

#[test]
fn single_bang_is_ordinary_text() {
    html("!\n", "<p>!</p>\n");
}

#[test]
fn empty_alert_box() {
    html(
        concat!("!!!\n", "!!!\n"),
        concat!("<div class=\"box box-alert\">\n", "</div>\n"),
    );
}
