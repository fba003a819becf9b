use super::common::{base_parse, get_errors, TestErrorHandler, DEMO_TEMPLATE};
use compiler::parser::{ParseOption, Parser};
use compiler::{CompilationErrorKind as ErrorKind, ElementNode, Node, NodeKind, TextKind};
use vdom_template_compiler_core as compiler;

fn element<'a, 'b>(node: &'b Node<'a>) -> &'b ElementNode<'a> {
    node.get_element().expect("element node")
}

fn tag_names<'a>(e: &ElementNode<'a>) -> Vec<&'a str> {
    e.children
        .iter()
        .filter_map(|c| c.get_element())
        .map(|e| e.tag_name)
        .collect()
}

#[test]
fn test_demo_tree() {
    let root = base_parse(DEMO_TEMPLATE);
    assert_eq!(root.kind, NodeKind::Root);
    assert_eq!(root.tag_name, "template");
    assert_eq!(tag_names(&root), vec!["div"]);
    let div = element(&root.children[0]);
    assert_eq!(div.kind, NodeKind::Element);
    assert_eq!(tag_names(div), vec!["span", "span", "img"]);
    let raws: Vec<_> = div.attributes.iter().map(|a| a.raw).collect();
    assert_eq!(raws, vec![r#"id="app""#, r#"className="flex""#]);

    let first = element(&div.children[0]);
    assert!(first.attributes[0].is_dynamic);
    let second = element(&div.children[1]);
    let texts: Vec<_> = second
        .children
        .iter()
        .map(|c| {
            let t = c.get_text().unwrap();
            (t.kind, t.content.as_ref())
        })
        .collect();
    assert_eq!(
        texts,
        vec![
            (TextKind::PlainText, "number:"),
            (TextKind::Interpolation, "count")
        ]
    );
    let img = element(&div.children[2]);
    assert!(img.children.is_empty());
}

#[test]
fn test_root_never_child() {
    fn assert_no_root(e: &ElementNode) {
        for child in e.children.iter().filter_map(|c| c.get_element()) {
            assert_ne!(child.kind, NodeKind::Root);
            assert_no_root(child);
        }
    }
    let root = base_parse(DEMO_TEMPLATE);
    assert_no_root(&root);
}

#[test]
fn test_attribute_order() {
    let root = base_parse(r#"<p z="1" :a="b" m='2' n=3 />"#);
    let raws: Vec<_> = root.attributes.iter().map(|a| a.raw).collect();
    assert_eq!(raws, vec![r#"z="1""#, r#":a="b""#, "m='2'", "n=3"]);
}

#[test]
fn test_whitespace_in_tag() {
    let root = base_parse("<div\n  id=\"a\"\n  :b = \"c\"\n></div>");
    assert_eq!(root.attributes.len(), 2);
    assert_eq!(root.attributes[1].raw, r#":b = "c""#);
    assert!(root.attributes[1].is_dynamic);
}

#[test]
fn test_single_brace_is_text() {
    let root = base_parse("<p>{a} {{ b }}</p>");
    let first = root.children[0].get_text().unwrap();
    assert_eq!(first.kind, TextKind::PlainText);
    assert_eq!(first.content, "{a} ");
}

#[test]
fn test_multiline_interpolation() {
    let root = base_parse("<p>{{\n  a +\n  b\n}}</p>");
    let t = root.children[0].get_text().unwrap();
    assert_eq!(t.kind, TextKind::Interpolation);
    assert_eq!(t.content, "a +\n  b");
}

#[test]
fn test_content_outside_root_dropped() {
    let root = base_parse("before <div>in</div> after");
    assert_eq!(root.tag_name, "div");
    assert_eq!(root.children.len(), 1);
    assert!(get_errors("before <div>in</div> after").is_empty());
}

#[test]
fn test_end_tag_name_not_checked() {
    let root = base_parse("<div><b>x</i></div>");
    assert_eq!(tag_names(&root), vec!["b"]);
    assert!(get_errors("<div><b>x</i></div>").is_empty());
}

#[test]
fn test_stray_end_tag() {
    let root = base_parse("</div>");
    assert!(root.is_empty_root());
    assert!(root.children.is_empty());
    let errors = get_errors("</div>");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::StackUnderflow);
    assert_eq!(errors[0].to_string(), "End tag has no matching start tag. </div>");
}

#[test]
fn test_end_tag_after_root() {
    let root = base_parse("<div><p></p></div></div><i/>");
    assert_eq!(root.tag_name, "div");
    assert_eq!(tag_names(&root), vec!["p"]);
    let errors = get_errors("<div><p></p></div></div>");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::StackUnderflow);
    assert_eq!(errors[0].location.start.offset, 18);
}

#[test]
fn test_dynamic_marker_is_authoritative() {
    // a name that would also fit a static pattern is still bound by its marker
    let mut option = ParseOption::default();
    option.binding_prefixes = [':', '.'].iter().copied().collect();
    let root = Parser::new(option)
        .parse(r#"<p .value="v" value="w" :key="k"/>"#, TestErrorHandler)
        .unwrap();
    let flags: Vec<_> = root.attributes.iter().map(|a| a.is_dynamic).collect();
    assert_eq!(flags, vec![true, false, true]);
}
