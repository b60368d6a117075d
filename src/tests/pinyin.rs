use super::*;

#[test]
fn basic_annotation() {
    html(
        "[中文]^(zhōngwén)\n",
        "<p><ruby>中文<rt>zhōngwén</rt></ruby></p>\n",
    );
}

#[test]
fn base_text_is_inline_resolved() {
    html(
        "[*中*]^(zhōng)\n",
        "<p><ruby><em>中</em><rt>zhōng</rt></ruby></p>\n",
    );
}

#[test]
fn annotation_is_html_escaped() {
    html(
        "[x]^(a<b&c)\n",
        "<p><ruby>x<rt>a&lt;b&amp;c</rt></ruby></p>\n",
    );
}

#[test]
fn annotation_whitespace_is_kept() {
    html(
        "[你好]^( nǐ hǎo )\n",
        "<p><ruby>你好<rt> nǐ hǎo </rt></ruby></p>\n",
    );
}

#[test]
fn empty_annotation_is_allowed() {
    html("[汉]^()\n", "<p><ruby>汉<rt></rt></ruby></p>\n");
}

#[test]
fn unclosed_annotation_falls_back_to_text() {
    html("[base]^(oops\n", "<p>[base]^(oops</p>\n");
}

#[test]
fn caret_without_paren_falls_back_to_text() {
    html("[a]^b\n", "<p>[a]^b</p>\n");
}

#[test]
fn images_cannot_carry_annotations() {
    html("![alt]^(x)\n", "<p>!<ruby>alt<rt>x</rt></ruby></p>\n");
}

#[test]
fn annotation_in_running_text() {
    html(
        "say [好]^(hǎo) often\n",
        "<p>say <ruby>好<rt>hǎo</rt></ruby> often</p>\n",
    );
}
