use stencil_dom::{Document, NodeData, VNode, h, parse_fragment, text};

#[test]
fn parse_element_with_text() {
    let nodes = parse_fragment("<div>hi</div>").unwrap();
    assert_eq!(nodes, vec![h("div", (), vec![text("hi")])]);
}

#[test]
fn parse_keeps_whitespace_text_between_elements() {
    let nodes = parse_fragment("<ul>\n  <li>a</li>\n</ul>").unwrap();
    match &nodes[0] {
        VNode::Element { children, .. } => {
            assert_eq!(children.len(), 3);
            assert_eq!(children[0], text("\n  "));
            assert_eq!(children[2], text("\n"));
        }
        _ => panic!("expected element"),
    }
}

#[test]
fn parse_handle_attribute_and_placeholders() {
    let nodes =
        parse_fragment(r##"<button #handle="go" class='btn' disabled>Go {{name}}</button>"##)
            .unwrap();
    match &nodes[0] {
        VNode::Element {
            tag,
            props,
            children,
        } => {
            assert_eq!(tag, "button");
            assert_eq!(props.get("#handle"), Some("go"));
            assert_eq!(props.get("class"), Some("btn"));
            assert_eq!(props.get("disabled"), Some(""));
            assert_eq!(children, &vec![text("Go {{name}}")]);
        }
        _ => panic!("expected element"),
    }
}

#[test]
fn parse_void_and_self_closing_elements() {
    let nodes = parse_fragment(r#"<p>a<br>b<img src=x.png/><my-icon name="x"/>c</p>"#).unwrap();
    match &nodes[0] {
        VNode::Element { children, .. } => {
            let tags: Vec<_> = children
                .iter()
                .map(|c| match c {
                    VNode::Element { tag, .. } => tag.as_str(),
                    VNode::Text(t) => t.as_str(),
                    VNode::Comment(_) => "#comment",
                })
                .collect();
            assert_eq!(tags, vec!["a", "br", "b", "img", "my-icon", "c"]);
        }
        _ => panic!("expected element"),
    }
}

#[test]
fn parse_raw_text_elements() {
    let nodes = parse_fragment("<div><style>.a > b {}</style><textarea>x &amp; <b></textarea></div>")
        .unwrap();
    let expected = h(
        "div",
        (),
        vec![
            h("style", (), vec![text(".a > b {}")]),
            h("textarea", (), vec![text("x & <b>")]),
        ],
    );
    assert_eq!(nodes, vec![expected]);
}

#[test]
fn parse_comments_and_doctype() {
    let nodes = parse_fragment("<!DOCTYPE html><!-- note --><p>x</p>").unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0], VNode::Comment(" note ".into()));
}

#[test]
fn parse_multiple_top_level_nodes() {
    let nodes = parse_fragment("<a>1</a><b>2</b>tail").unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[2], text("tail"));
}

#[test]
fn parse_lone_angle_bracket_is_text() {
    let nodes = parse_fragment("<p>1 < 2</p>").unwrap();
    assert_eq!(nodes, vec![h("p", (), vec![text("1 < 2")])]);
}

#[test]
fn parse_empty_input_yields_no_nodes() {
    assert!(parse_fragment("").unwrap().is_empty());
}

#[test]
fn parse_end_tags_ignore_case() {
    let nodes = parse_fragment("<div>Hello {{name}}</DIV><P>x</p>").unwrap();
    assert_eq!(
        nodes,
        vec![
            h("div", (), vec![text("Hello {{name}}")]),
            h("p", (), vec![text("x")]),
        ]
    );
}

#[test]
fn parse_end_tag_closes_elements_opened_after_it() {
    let nodes = parse_fragment("<div><p>{{a}}</div>tail").unwrap();
    assert_eq!(
        nodes,
        vec![h("div", (), vec![h("p", (), vec![text("{{a}}")])]), text("tail")]
    );

    let nodes = parse_fragment("<div><span>x</div></span>").unwrap();
    assert_eq!(nodes, vec![h("div", (), vec![h("span", (), vec![text("x")])])]);
}

#[test]
fn parse_closes_elements_left_open_at_end() {
    let nodes = parse_fragment("<div>unclosed<b>bold").unwrap();
    assert_eq!(
        nodes,
        vec![h("div", (), vec![text("unclosed"), h("b", (), vec![text("bold")])])]
    );
}

#[test]
fn parse_drops_stray_end_tags() {
    let nodes = parse_fragment("</section><p>a</br></i>b</p>").unwrap();
    assert_eq!(nodes, vec![h("p", (), vec![text("a"), text("b")])]);
}

#[test]
fn parse_implied_end_tags() {
    let nodes = parse_fragment("<ul><li>{{a}}<li>{{b}}</ul>").unwrap();
    assert_eq!(
        nodes,
        vec![h(
            "ul",
            (),
            vec![
                h("li", (), vec![text("{{a}}")]),
                h("li", (), vec![text("{{b}}")]),
            ]
        )]
    );

    let nodes = parse_fragment("<p>one<p>two<div>block</div>").unwrap();
    assert_eq!(
        nodes,
        vec![
            h("p", (), vec![text("one")]),
            h("p", (), vec![text("two")]),
            h("div", (), vec![text("block")]),
        ]
    );

    let nodes = parse_fragment("<ul><li>outer<ul><li>inner</ul></ul>").unwrap();
    assert_eq!(
        nodes,
        vec![h(
            "ul",
            (),
            vec![h(
                "li",
                (),
                vec![text("outer"), h("ul", (), vec![h("li", (), vec![text("inner")])])]
            )]
        )]
    );

    let nodes = parse_fragment("<table><tr><td>1<td>2<tr><td>3</table>").unwrap();
    let row = |cells: &[&str]| {
        h(
            "tr",
            (),
            cells.iter().map(|c| h("td", (), vec![text(*c)])).collect(),
        )
    };
    assert_eq!(
        nodes,
        vec![h("table", (), vec![row(&["1", "2"]), row(&["3"])])]
    );
}

#[test]
fn parse_deeply_nested_elements() {
    let depth = 1000;
    let src = format!("{}{{{{x}}}}{}", "<div>".repeat(depth), "</div>".repeat(depth));
    let nodes = parse_fragment(&src).unwrap();
    assert_eq!(nodes.len(), 1);

    let mut node = &nodes[0];
    let mut levels = 0;
    while let VNode::Element { children, .. } = node {
        levels += 1;
        node = &children[0];
    }
    assert_eq!(levels, depth);
    assert_eq!(node, &text("{{x}}"));
}

#[test]
fn parse_rejects_broken_tags() {
    assert!(parse_fragment(r#"<div><p class="oops>x</p></div>"#).is_err());
    assert!(parse_fragment("<div").is_err());
    assert!(parse_fragment("<!-- never closed").is_err());
}

#[test]
fn document_round_trips_markup() {
    let src = r#"<div class="item"><span title="a &amp; b">x &lt; y</span><br><!--c--></div>"#;
    let nodes = parse_fragment(src).unwrap();
    let mut doc = Document::new();
    let root = doc.materialize(&nodes[0]);
    assert_eq!(doc.outer_html(root), src);
    assert!(matches!(
        doc.node(root).map(|n| n.data()),
        Some(NodeData::Element { .. })
    ));
    assert_eq!(doc.text_content(root), "x < y");
}

#[test]
fn import_copies_subtree_between_documents() {
    let nodes = parse_fragment("<li>item</li>").unwrap();
    let mut source = Document::new();
    let li = source.materialize(&nodes[0]);

    let mut target = Document::new();
    let ul = target.create_element("ul", ());
    let copy = target.import(&source, li).unwrap();
    target.append_child(ul, copy).unwrap();

    assert_eq!(target.outer_html(ul), "<ul><li>item</li></ul>");
    // the source is untouched
    assert_eq!(source.parent(li), None);
}
