use super::*;

#[test]
fn anchor_target() {
    html(
        "Start {#here} end\n",
        "<p>Start <span id=\"here\">here</span> end</p>\n",
    );
}

#[test]
fn anchor_link_to_earlier_target() {
    html(
        concat!("{#top}\n", "\n", "Go {top}\n"),
        concat!(
            "<p><span id=\"top\">top</span></p>\n",
            "<p>Go <a href=\"#top\">top</a></p>\n"
        ),
    );
}

#[test]
fn anchor_link_may_precede_its_target() {
    html(
        concat!("See {below}\n", "\n", "Text {#below}\n"),
        concat!(
            "<p>See <a href=\"#below\">below</a></p>\n",
            "<p>Text <span id=\"below\">below</span></p>\n"
        ),
    );
}

#[test]
fn unregistered_anchor_link_is_literal() {
    html("{nothing}\n", "<p>{nothing}</p>\n");
}

#[test]
fn anchor_name_may_not_contain_spaces() {
    html("{#a b}\n", "<p>{#a b}</p>\n");
}

#[test]
fn empty_anchor_name_is_literal() {
    html("{#}\n", "<p>{#}</p>\n");
}

#[test]
fn targets_inside_code_spans_do_not_register() {
    html(
        // The braced payload still dispatches to emphasized code; only the
        // anchor table is unaffected.
        concat!("`{#x}`\n", "\n", "{x}\n"),
        concat!("<p><code><em>#x</em></code></p>\n", "<p>{x}</p>\n"),
    );
}

#[test]
fn targets_in_commented_line_tails_do_not_register() {
    html(
        concat!("x //{#dead}\n", "\n", "{dead}\n"),
        concat!("<p>x</p>\n", "<p>{dead}</p>\n"),
    );
}

#[test]
fn targets_after_an_autolink_still_register() {
    html(
        concat!("<http://a> {#live}\n", "\n", "{live}\n"),
        concat!(
            "<p><a href=\"http://a\">http://a</a> <span id=\"live\">live</span></p>\n",
            "<p><a href=\"#live\">live</a></p>\n",
        ),
    );
}

#[test]
fn non_ascii_anchor_names() {
    html(
        concat!("{#区}\n", "\n", "{区}\n"),
        concat!(
            "<p><span id=\"区\">区</span></p>\n",
            "<p><a href=\"#%E5%8C%BA\">区</a></p>\n"
        ),
    );
}

#[test]
fn multiple_targets_in_one_paragraph() {
    html(
        "a {#one} b {#two} c\n",
        "<p>a <span id=\"one\">one</span> b <span id=\"two\">two</span> c</p>\n",
    );
}
