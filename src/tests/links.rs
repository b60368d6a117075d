use std::sync::Arc;

use super::*;
use crate::{BrokenLinkReference, ResolvedReference};

#[test]
fn inline_link() {
    html(
        "[text](https://example.com)\n",
        "<p><a href=\"https://example.com\">text</a></p>\n",
    );
}

#[test]
fn url_whitespace_is_trimmed() {
    html("[t]( /path )\n", "<p><a href=\"/path\">t</a></p>\n");
}

#[test]
fn link_text_is_inline_resolved() {
    html("[*go*](/x)\n", "<p><a href=\"/x\"><em>go</em></a></p>\n");
}

#[test]
fn url_is_href_escaped() {
    html("[x](/a b)\n", "<p><a href=\"/a%20b\">x</a></p>\n");
    html("[x](/a&b)\n", "<p><a href=\"/a&amp;b\">x</a></p>\n");
}

#[test]
fn basic_image() {
    html(
        "![alt text](/img.png)\n",
        "<p><img src=\"/img.png\" alt=\"alt text\" /></p>\n",
    );
}

#[test]
fn image_alt_text_is_flattened() {
    html(
        "![*em* and `code`](/i.png)\n",
        "<p><img src=\"/i.png\" alt=\"em and code\" /></p>\n",
    );
}

#[test]
fn reference_link() {
    html(
        concat!("[site][home]\n", "\n", "[home]: https://example.com\n"),
        "<p><a href=\"https://example.com\">site</a></p>\n",
    );
}

#[test]
fn definition_may_come_first() {
    html(
        concat!("[home]: https://example.com\n", "\n", "[site][home]\n"),
        "<p><a href=\"https://example.com\">site</a></p>\n",
    );
}

#[test]
fn unknown_reference_is_literal() {
    html("[x][nope]\n", "<p>[x][nope]</p>\n");
}

#[test]
fn later_definition_wins() {
    html(
        concat!("[k]: /first\n", "[k]: /second\n", "\n", "[x][k]\n"),
        "<p><a href=\"/second\">x</a></p>\n",
    );
}

#[test]
fn definition_without_target_is_a_paragraph() {
    html("[k]:\n", "<p>[k]:</p>\n");
}

#[test]
fn reference_images_resolve_too() {
    html(
        concat!("![pic][p]\n", "\n", "[p]: /shot.png\n"),
        "<p><img src=\"/shot.png\" alt=\"pic\" /></p>\n",
    );
}

#[test]
fn broken_link_callback_fills_gaps() {
    let cb = |link_ref: BrokenLinkReference| match link_ref.key {
        "docs" => Some(ResolvedReference {
            url: "https://docs.example.com/".to_string(),
        }),
        _ => None,
    };

    html_opts_i(
        "See [the docs][docs]. A [missing one][nope].\n",
        "<p>See <a href=\"https://docs.example.com/\">the docs</a>. A [missing one][nope].</p>\n",
        |opts| opts.parse.broken_link_callback = Some(Arc::new(cb)),
    );
}

#[test]
fn autolink() {
    html(
        "Visit <https://example.com/a?b=c> now\n",
        "<p>Visit <a href=\"https://example.com/a?b=c\">https://example.com/a?b=c</a> now</p>\n",
    );
}

#[test]
fn autolink_requires_a_scheme() {
    html("<not a link>\n", "<p>&lt;not a link&gt;</p>\n");
}

#[test]
fn mailto_autolink() {
    html(
        "<mailto:x@y.example>\n",
        "<p><a href=\"mailto:x@y.example\">mailto:x@y.example</a></p>\n",
    );
}

#[test]
fn unclosed_bracket_is_literal() {
    html("[unclosed\n", "<p>[unclosed</p>\n");
}

#[test]
fn space_between_brackets_and_parens_is_literal() {
    html("[text] (x)\n", "<p>[text] (x)</p>\n");
}

#[test]
fn bracket_scan_skips_code_spans() {
    html(
        "[a `]` b](/u)\n",
        "<p><a href=\"/u\">a <code>]</code> b</a></p>\n",
    );
}

#[test]
fn link_destination_with_utf8() {
    html(
        "[x](/路径)\n",
        "<p><a href=\"/%E8%B7%AF%E5%BE%84\">x</a></p>\n",
    );
}
