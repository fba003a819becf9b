use super::common::{base_compile, base_transform, DEMO_TEMPLATE};
use compiler::codegen::{CodeGenerateOption, CodeWriter};
use insta::assert_snapshot;
use rslint_parser::parse_module;
use vdom_template_compiler_core as compiler;

fn gen_vnode(case: &str) -> String {
    let root = base_transform(case);
    CodeWriter::new(CodeGenerateOption::default())
        .generate_vnode(&root)
        .unwrap()
}

fn assert_valid_module(case: &str) {
    let code = base_compile(case);
    let parsed = parse_module(&code, 0);
    assert!(parsed.errors().is_empty(), "{}", code);
}

#[test]
fn test_demo_codegen() {
    assert_snapshot!(
        gen_vnode(DEMO_TEMPLATE),
        @"h('template', [h('div', { id: 'app', className: 'flex' }, [h('span', { className: vm.position }, [vm.add]), h('span', ['number:', vm.count]), h('img', { src: 'asdsad.png' })])])"
    );
    assert_valid_module(DEMO_TEMPLATE);
}

#[test]
fn test_element_codegen() {
    assert_snapshot!(gen_vnode("<br/>"), @"h('br')");
    assert_snapshot!(gen_vnode(r#"<a href="u"></a>"#), @"h('a', { href: 'u' })");
    assert_snapshot!(gen_vnode("<p>hi</p>"), @"h('p', ['hi'])");
    assert_snapshot!(
        gen_vnode(r#"<ul :class="cls"><li>{{ a }}</li><li>b</li></ul>"#),
        @"h('ul', { class: vm.cls }, [h('li', [vm.a]), h('li', ['b'])])"
    );
}

#[test]
fn test_text_escaping() {
    assert_snapshot!(
        gen_vnode("<p title=\"it's\">don't \\ stop</p>"),
        @r#"h('p', { title: 'it\'s' }, ['don\'t \\ stop'])"#
    );
    assert_valid_module("<p title=\"it's\">don't \\ stop</p>");
}

#[test]
fn test_order_preserved() {
    assert_snapshot!(
        gen_vnode(r#"<i z="1" a="2" :m="n">{{ x }}y<b/>{{ z }}</i>"#),
        @"h('i', { z: '1', a: '2', m: vm.n }, [vm.x, 'y', h('b'), vm.z])"
    );
}

#[test]
fn test_deterministic() {
    let first = base_compile(DEMO_TEMPLATE);
    for _ in 0..3 {
        assert_eq!(base_compile(DEMO_TEMPLATE), first);
    }
}

#[test]
fn test_valid_modules() {
    let cases = [
        "",
        "<p/>",
        r#"<div data-id="1" :aria-label="label"></div>"#,
        "<pre>\n  line\n</pre>",
        "<p>{{ a + b }} and {{ c.d }}</p>",
    ];
    for case in cases {
        assert_valid_module(case);
    }
}
