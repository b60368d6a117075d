use super::*;

#[test]
fn strong_comment_is_stripped() {
    html("a |=secret=| b\n", "<p>a  b</p>\n");
}

#[test]
fn strong_comment_spans_lines() {
    html(
        concat!("before |=line1\n", "line2=| after\n"),
        "<p>before  after</p>\n",
    );
}

#[test]
fn strong_comment_reaches_into_code() {
    html(
        "`code |=x=| here`\n",
        "<p><code>code  here</code></p>\n",
    );
}

#[test]
fn unterminated_strong_comment_runs_to_end() {
    html(
        concat!("keep |=gone\n", "gone too\n"),
        "<p>keep</p>\n",
    );
}

#[test]
fn html_comment_is_stripped() {
    html("a <!-- note --> b\n", "<p>a  b</p>\n");
}

#[test]
fn unterminated_html_comment_is_left_alone() {
    html("a <!--b\n", "<p>a &lt;!--b</p>\n");
}

#[test]
fn weak_comment_cuts_to_end_of_line() {
    html("code is good // not really\n", "<p>code is good</p>\n");
}

#[test]
fn weak_comment_keeps_following_lines() {
    html(
        concat!("first // gone\n", "second\n"),
        "<p>first\nsecond</p>\n",
    );
}

#[test]
fn single_slash_is_not_a_comment() {
    html("five / four\n", "<p>five / four</p>\n");
}

#[test]
fn weak_comment_marker_survives_in_code_spans() {
    html("`x // y`\n", "<p><code>x // y</code></p>\n");
}

#[test]
fn escaped_slash_defeats_weak_comment() {
    html("a \\// b\n", "<p>a // b</p>\n");
}

#[test]
fn escaped_pipe_defeats_strong_comment() {
    html("a \\|=kept=| b\n", "<p>a |=kept=| b</p>\n");
}

#[test]
fn weak_comment_at_line_start_empties_the_line() {
    html(
        concat!("// all comment\n", "visible\n"),
        "<p>\nvisible</p>\n",
    );
}
