use super::*;

#[test]
fn basic_hidden_reveal() {
    html(
        "[tap]-(answer)\n",
        "<p><span title=\"answer\">tap</span></p>\n",
    );
}

#[test]
fn hidden_text_is_attribute_escaped() {
    html(
        "[x]-(say \"hi\")\n",
        "<p><span title=\"say &quot;hi&quot;\">x</span></p>\n",
    );
}

#[test]
fn visible_text_is_inline_resolved() {
    html(
        "[**answer**]-(42)\n",
        "<p><span title=\"42\"><strong>answer</strong></span></p>\n",
    );
}

#[test]
fn unclosed_hidden_part_falls_back_to_text() {
    html("[v]-(broken\n", "<p>[v]-(broken</p>\n");
}

#[test]
fn dash_without_paren_falls_back_to_text() {
    html("[a]-b\n", "<p>[a]-b</p>\n");
}

#[test]
fn images_cannot_hide_text() {
    html(
        "![alt]-(x)\n",
        "<p>!<span title=\"x\">alt</span></p>\n",
    );
}

#[test]
fn hidden_reveal_in_running_text() {
    html(
        "the answer is [here]-(42), promise\n",
        "<p>the answer is <span title=\"42\">here</span>, promise</p>\n",
    );
}

#[test]
fn escaped_hidden_delimiter_is_literal() {
    html("\\[v]-(h)\n", "<p>[v]-(h)</p>\n");
}
