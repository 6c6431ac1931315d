use bbmark_core::{TransformOptions, Transformer, transform};

#[test]
fn plain_text_is_only_escaped() {
    let result = transform("Fish & chips <3 > salad\n");
    assert_eq!(result.html, "Fish &amp; chips &lt;3 &gt; salad");
    assert!(result.unclosed.is_empty());
}

#[test]
fn inline_tag_wraps_body() {
    let result = transform("[u]under[/u]");
    assert_eq!(result.html, "<u>under</u>");
    assert!(result.unclosed.is_empty());
}

#[test]
fn unmatched_close_markers_are_text() {
    assert_eq!(transform("a[/b]c").html, "a[/b]c");
    assert_eq!(transform("a[/marquee]c").html, "a[/marquee]c");
    assert_eq!(transform("[i]a[/b]c[/i]").html, "<i>a[/b]c</i>");
}

#[test]
fn unclosed_tag_renders_to_end_of_input() {
    let result = transform("[b]unclosed");
    assert_eq!(result.html, "<b>unclosed</b>");
    assert_eq!(result.unclosed, vec!["b"]);
}

#[test]
fn nested_tags_render_inside_out() {
    let result = transform("[b][i]x[/i][/b]");
    assert_eq!(result.html, "<b><i>x</i></b>");
    assert!(result.unclosed.is_empty());
}

#[test]
fn tag_names_ignore_case() {
    assert_eq!(transform("[B]x[/b]").html, "<b>x</b>");
    assert_eq!(transform("[QUOTE]x[/Quote]").html, "<blockquote>x</blockquote>");
}

#[test]
fn script_urls_are_neutralized() {
    let result = transform("[url=javascript:alert(1)]click[/url]");
    assert_eq!(result.html, "<a href=\"about:blank\">click</a>");

    let result = transform("[url] JAVASCRIPT:alert(1)[/url]");
    assert_eq!(
        result.html,
        "<a href=\"about:blank\"> JAVASCRIPT:alert(1)</a>"
    );
}

#[test]
fn url_target_defaults_to_trimmed_body() {
    let result = transform("[url] http://a.example/ [/url]");
    assert_eq!(
        result.html,
        "<a href=\"http://a.example/\"> http://a.example/ </a>"
    );
}

#[test]
fn url_without_param_does_not_parse_its_body() {
    let result = transform("[url][b]x[/url]");
    assert_eq!(result.html, "<a href=\"[b]x\">[b]x</a>");
    assert!(result.unclosed.is_empty());
}

#[test]
fn image_dimensions() {
    let result = transform("[img=100x50]http://x/y.png[/img]");
    assert_eq!(
        result.html,
        "<img width=\"100\" height=\"50\" src=\"http://x/y.png\" />"
    );
    assert_eq!(
        transform("[img=5w]s[/img]").html,
        "<img width=\"5\" src=\"s\" />"
    );
}

#[test]
fn list_lines_become_items_in_order() {
    let result = transform("[list]\nfirst\n\nsecond\n   \nthird\n[/list]");
    assert_eq!(
        result.html,
        "<ul><li>first</li><li>second</li><li>third</li></ul>"
    );
}

#[test]
fn list_items_keep_multiline_markup_whole() {
    let result = transform("[list]\n[b]one\ntwo[/b]\nthree\n[/list]");
    assert_eq!(
        result.html,
        "<ul><li><b>one\ntwo</b></li><li>three</li></ul>"
    );
}

#[test]
fn explicit_items_are_never_nested() {
    assert_eq!(
        transform("[list][li]a[/li][li]b[/li][/list]").html,
        "<ul><li>a</li><li>b</li></ul>"
    );
    assert_eq!(
        transform("[list]\n[li]a[/li] [li]b[/li]\n[/list]").html,
        "<ul><li>a</li><li>b</li></ul>"
    );
    assert_eq!(
        transform("[list]\n[li]a[/li]\nplain\n[/list]").html,
        "<ul><li>a</li><li>plain</li></ul>"
    );
}

#[test]
fn ordered_list_parameters() {
    assert_eq!(
        transform("[list=1]a[/list]").html,
        "<ol type=\"1\"><li>a</li></ol>"
    );
    assert_eq!(
        transform("[list=4]a[/list]").html,
        "<ol type=\"1\" start=\"4\"><li>a</li></ol>"
    );
    assert_eq!(
        transform("[list=I]a[/list]").html,
        "<ol type=\"I\"><li>a</li></ol>"
    );
    assert_eq!(
        transform("[list=99999999999999999999999]a[/list]").html,
        "<ol type=\"1\" start=\"99999999999999999999999\"><li>a</li></ol>"
    );
    assert_eq!(
        transform("[list=3rd]a[/list]").html,
        "<ol type=\"1\" start=\"3\"><li>a</li></ol>"
    );
}

#[test]
fn size_uses_integer_prefix_of_numeric_parameters() {
    assert_eq!(
        transform("[size=1e3]x[/size]").html,
        "<span style=\"font-size: 1pt;\">x</span>"
    );
    assert_eq!(
        transform("[size=12.9]x[/size]").html,
        "<span style=\"font-size: 12pt;\">x</span>"
    );
}

#[test]
fn code_body_is_never_interpreted() {
    let result = transform("[code][b]x[/b][/code]");
    assert_eq!(result.html, "<pre>[b]x[/b]</pre>");
    assert!(result.unclosed.is_empty());
}

#[test]
fn block_tags_trim_one_newline_on_each_side() {
    let result = transform("[right]\n\ntext\n[/right]\n\nnext");
    assert_eq!(
        result.html,
        "<div style=\"text-align: right;\">\ntext\n</div>\nnext"
    );
}

#[test]
fn crlf_newlines_are_trimmed_too() {
    let result = transform("[quote]\r\nhi[/quote]\r\nbye");
    assert_eq!(result.html, "<blockquote>hi</blockquote>bye");
}

#[test]
fn contextual_tags_stay_inline_without_leading_newline() {
    let result = transform("[size=30]one\ntwo[/size]\nafter");
    assert_eq!(
        result.html,
        "<span style=\"font-size: 30pt;\">one\ntwo</span>\nafter"
    );
    let result = transform("[size=30]\none[/size]\nafter");
    assert_eq!(
        result.html,
        "<div style=\"font-size: 30pt;\">one</div>after"
    );
}

#[test]
fn parameters_cannot_leave_their_attribute() {
    let result = transform("[color=red\" onclick=\"alert(1)]hi[/color]");
    assert_eq!(
        result.html,
        "<span style=\"color: red&quot; onclick=&quot;alert(1);\">hi</span>"
    );
    let result = transform("[font=<script>]x[/font]");
    assert_eq!(
        result.html,
        "<span style=\"font-family: &lt;script&gt;;\">x</span>"
    );
}

#[test]
fn malformed_brackets_pass_through() {
    let source = "[ [b [=] [b=] [1] ]]";
    assert_eq!(transform(source).html, source);
}

#[test]
fn depth_limit_is_configurable() {
    let transformer = Transformer::new(TransformOptions {
        max_depth: 1,
        ..Default::default()
    });
    let result = transformer.transform("[b][i]x[/i][/b]");
    assert!(result.depth_limited);
    assert_eq!(result.html, "<b>[i]x[/i][/b]</b>");
    assert_eq!(result.unclosed, vec!["b"]);
}

#[test]
fn pathological_nesting_fails_closed() {
    let source = "[b]".repeat(20_000);
    let result = transform(&source);
    assert!(result.depth_limited);
    assert_eq!(result.unclosed.len(), bbmark_core::DEFAULT_MAX_DEPTH);
    assert!(result.html.ends_with("[b]</b>"));
}
