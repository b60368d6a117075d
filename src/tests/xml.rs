use super::*;

#[test]
fn basic_document() {
    xml(
        concat!("hello *world*\n", "\n", "```\n", "code\n", "```\n"),
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE document SYSTEM \"CrossDown.dtd\">\n",
            "<document>\n",
            "  <paragraph>\n",
            "    <text xml:space=\"preserve\">hello </text>\n",
            "    <emph>\n",
            "      <text xml:space=\"preserve\">world</text>\n",
            "    </emph>\n",
            "  </paragraph>\n",
            "  <code_block xml:space=\"preserve\">code\n",
            "</code_block>\n",
            "</document>\n"
        ),
    );
}

#[test]
fn empty_document_self_closes() {
    xml(
        "",
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE document SYSTEM \"CrossDown.dtd\">\n",
            "<document />\n"
        ),
    );
}

#[test]
fn headings_keep_their_outline_prefix() {
    xml(
        concat!("2.1 Title\n", "\n", "# Plain\n"),
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE document SYSTEM \"CrossDown.dtd\">\n",
            "<document>\n",
            "  <heading level=\"2\" outline=\"2.1\">\n",
            "    <text xml:space=\"preserve\">2.1 Title</text>\n",
            "  </heading>\n",
            "  <heading level=\"1\">\n",
            "    <text xml:space=\"preserve\">Plain</text>\n",
            "  </heading>\n",
            "</document>\n"
        ),
    );
}

#[test]
fn lists_carry_type_and_start() {
    xml(
        concat!("- a\n", "\n", "2. b\n"),
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE document SYSTEM \"CrossDown.dtd\">\n",
            "<document>\n",
            "  <list type=\"bullet\">\n",
            "    <item>\n",
            "      <text xml:space=\"preserve\">a</text>\n",
            "    </item>\n",
            "  </list>\n",
            "  <list type=\"ordered\" start=\"2\">\n",
            "    <item>\n",
            "      <text xml:space=\"preserve\">b</text>\n",
            "    </item>\n",
            "  </list>\n",
            "</document>\n"
        ),
    );
}

#[test]
fn block_quotes_carry_their_level() {
    xml(
        ">> q\n",
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE document SYSTEM \"CrossDown.dtd\">\n",
            "<document>\n",
            "  <block_quote level=\"2\">\n",
            "    <paragraph>\n",
            "      <text xml:space=\"preserve\">q</text>\n",
            "    </paragraph>\n",
            "  </block_quote>\n",
            "</document>\n"
        ),
    );
}

#[test]
fn annotation_spans() {
    xml(
        "[汉]^(hàn) and [v]-(h)\n",
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE document SYSTEM \"CrossDown.dtd\">\n",
            "<document>\n",
            "  <paragraph>\n",
            "    <pinyin annotation=\"hàn\">\n",
            "      <text xml:space=\"preserve\">汉</text>\n",
            "    </pinyin>\n",
            "    <text xml:space=\"preserve\"> and </text>\n",
            "    <hidden_reveal hidden=\"h\">\n",
            "      <text xml:space=\"preserve\">v</text>\n",
            "    </hidden_reveal>\n",
            "  </paragraph>\n",
            "</document>\n"
        ),
    );
}

#[test]
fn math_and_function_plots() {
    xml(
        "`$x$` `¥x¥€1,2€`\n",
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE document SYSTEM \"CrossDown.dtd\">\n",
            "<document>\n",
            "  <paragraph>\n",
            "    <math math_style=\"inline\" xml:space=\"preserve\">x</math>\n",
            "    <text xml:space=\"preserve\"> </text>\n",
            "    <function_plot expression=\"x\" domain=\"1,2\" />\n",
            "  </paragraph>\n",
            "</document>\n"
        ),
    );
}

#[test]
fn function_plot_with_range() {
    xml(
        "`¥x¥€0,10|-5,5€`\n",
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE document SYSTEM \"CrossDown.dtd\">\n",
            "<document>\n",
            "  <paragraph>\n",
            "    <function_plot expression=\"x\" domain=\"0,10\" range=\"-5,5\" />\n",
            "  </paragraph>\n",
            "</document>\n"
        ),
    );
}

#[test]
fn admonitions_and_boxes() {
    xml(
        concat!("!!! note \"T\"\n", "    Body.\n", "\n", "!!\n", "B.\n", "!!\n"),
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE document SYSTEM \"CrossDown.dtd\">\n",
            "<document>\n",
            "  <admonition kind=\"note\" title=\"T\">\n",
            "    <paragraph>\n",
            "      <text xml:space=\"preserve\">Body.</text>\n",
            "    </paragraph>\n",
            "  </admonition>\n",
            "  <bordered_box kind=\"notice\">\n",
            "    <paragraph>\n",
            "      <text xml:space=\"preserve\">B.</text>\n",
            "    </paragraph>\n",
            "  </bordered_box>\n",
            "</document>\n"
        ),
    );
}

#[test]
fn footnote_nodes_carry_labels() {
    xml(
        concat!("x[^a]\n", "\n", "[^a]: B.\n"),
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE document SYSTEM \"CrossDown.dtd\">\n",
            "<document>\n",
            "  <paragraph>\n",
            "    <text xml:space=\"preserve\">x</text>\n",
            "    <footnote_reference label=\"a\" />\n",
            "  </paragraph>\n",
            "  <footnote_definition label=\"a\">\n",
            "    <paragraph>\n",
            "      <text xml:space=\"preserve\">B.</text>\n",
            "    </paragraph>\n",
            "  </footnote_definition>\n",
            "</document>\n"
        ),
    );
}

#[test]
fn table_cells_carry_alignment() {
    xml(
        concat!("| a |\n", "| :- |\n", "| 1 |\n"),
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE document SYSTEM \"CrossDown.dtd\">\n",
            "<document>\n",
            "  <table>\n",
            "    <table_row>\n",
            "      <table_cell align=\"left\">\n",
            "        <text xml:space=\"preserve\">a</text>\n",
            "      </table_cell>\n",
            "    </table_row>\n",
            "    <table_row>\n",
            "      <table_cell align=\"left\">\n",
            "        <text xml:space=\"preserve\">1</text>\n",
            "      </table_cell>\n",
            "    </table_row>\n",
            "  </table>\n",
            "</document>\n"
        ),
    );
}

#[test]
fn link_family_attributes() {
    xml(
        concat!(
            "{#top} {top} <https://x.example/> [t](/u)\n",
            "\n",
            "*[AB]: Alpha\n",
            "\n",
            "AB\n"
        ),
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE document SYSTEM \"CrossDown.dtd\">\n",
            "<document>\n",
            "  <paragraph>\n",
            "    <anchor_target name=\"top\" />\n",
            "    <text xml:space=\"preserve\"> </text>\n",
            "    <anchor_link target=\"top\" />\n",
            "    <text xml:space=\"preserve\"> </text>\n",
            "    <autolink destination=\"https://x.example/\" />\n",
            "    <text xml:space=\"preserve\"> </text>\n",
            "    <link destination=\"/u\">\n",
            "      <text xml:space=\"preserve\">t</text>\n",
            "    </link>\n",
            "  </paragraph>\n",
            "  <paragraph>\n",
            "    <abbreviation title=\"Alpha\" xml:space=\"preserve\">AB</abbreviation>\n",
            "  </paragraph>\n",
            "</document>\n"
        ),
    );
}

#[test]
fn literal_text_is_xml_escaped() {
    xml(
        "a & b < c \"d\"\n",
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE document SYSTEM \"CrossDown.dtd\">\n",
            "<document>\n",
            "  <paragraph>\n",
            "    <text xml:space=\"preserve\">a &amp; b &lt; c &quot;d&quot;</text>\n",
            "  </paragraph>\n",
            "</document>\n"
        ),
    );
}

#[test]
fn soft_breaks_and_thematic_breaks_self_close() {
    xml(
        concat!("a\n", "b\n", "\n", "---\n"),
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE document SYSTEM \"CrossDown.dtd\">\n",
            "<document>\n",
            "  <paragraph>\n",
            "    <text xml:space=\"preserve\">a</text>\n",
            "    <softbreak />\n",
            "    <text xml:space=\"preserve\">b</text>\n",
            "  </paragraph>\n",
            "  <thematic_break />\n",
            "</document>\n"
        ),
    );
}

#[test]
fn sourcepos_attribute() {
    xml_opts(
        "hi *there*\n",
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE document SYSTEM \"CrossDown.dtd\">\n",
            "<document sourcepos=\"1:1-1:10\">\n",
            "  <paragraph sourcepos=\"1:1-1:10\">\n",
            "    <text sourcepos=\"1:1-1:10\" xml:space=\"preserve\">hi </text>\n",
            "    <emph sourcepos=\"1:1-1:10\">\n",
            "      <text sourcepos=\"1:1-1:10\" xml:space=\"preserve\">there</text>\n",
            "    </emph>\n",
            "  </paragraph>\n",
            "</document>\n"
        ),
        |opts| opts.render.sourcepos = true,
    );
}
