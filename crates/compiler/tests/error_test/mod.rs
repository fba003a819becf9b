use super::common::{get_compiler, get_errors, TestErrorHandler};
use compiler::CompilationErrorKind as ErrorKind;
use vdom_template_compiler_core as compiler;

fn parse_error(s: &str) -> ErrorKind {
    get_compiler()
        .parse(s, TestErrorHandler)
        .map(|_| ())
        .expect_err("template should not parse")
        .kind
}

fn compile_error(s: &str) -> ErrorKind {
    get_compiler()
        .compile(s)
        .expect_err("template should not compile")
        .kind
}

#[test]
fn test_fatal_parse_errors() {
    let cases = [
        ("<div>< p</div>", ErrorKind::MalformedStartTag),
        ("<div><1></div>", ErrorKind::MalformedStartTag),
        ("<div>a <", ErrorKind::MalformedStartTag),
        ("<div></ div>", ErrorKind::MalformedEndTag),
        ("<div></div", ErrorKind::MalformedEndTag),
        ("<div", ErrorKind::EofInTag),
        (r#"<div a="1""#, ErrorKind::EofInTag),
        (r#"<div a="1"#, ErrorKind::MalformedAttribute),
        (r#"<div a="1>"#, ErrorKind::MalformedAttribute),
        ("<div a=></div>", ErrorKind::MalformedAttribute),
        ("<div>{{ a </div>", ErrorKind::MissingInterpolationEnd),
    ];
    for (case, kind) in cases {
        assert_eq!(parse_error(case), kind, "{}", case);
    }
}

#[test]
fn test_reported_errors() {
    let errors = get_errors("<div><p>");
    let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ErrorKind::MissingEndTag, ErrorKind::MissingEndTag]);
    assert_eq!(errors[0].to_string(), "Element is missing end tag. <p>");
    assert!(get_errors("<div><p></p></div>").is_empty());
}

#[test]
fn test_pipeline_failures() {
    assert_eq!(compile_error("</div>"), ErrorKind::StackUnderflow);
    assert_eq!(compile_error("<div>"), ErrorKind::MissingEndTag);
    assert_eq!(compile_error("<input disabled/>"), ErrorKind::AttributeSyntaxError);
    assert_eq!(compile_error("<div>< </div>"), ErrorKind::MalformedStartTag);
}

#[test]
fn test_error_location() {
    let err = get_compiler()
        .parse("<div>\n  {{ oops\n</div>", TestErrorHandler)
        .map(|_| ())
        .unwrap_err();
    assert_eq!(err.location.start.line, 2);
    assert_eq!(err.location.start.column, 3);
    assert_eq!(err.location.end.offset, 22);
}
