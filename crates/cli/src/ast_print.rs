use compiler::{Attribute, ElementNode, Node, SourceLocation, TextNode};

/// Indented one node per line tree dump, with byte ranges.
pub trait AstString {
    fn ast_string(&self, level: usize) -> String;
}

fn range(location: &SourceLocation) -> String {
    format!("{}..{}", location.start.offset, location.end.offset)
}

impl<'a> AstString for ElementNode<'a> {
    fn ast_string(&self, level: usize) -> String {
        let mut ret = format!(
            "{}{:?} {} <{}>",
            "  ".repeat(level),
            self.kind,
            range(&self.location),
            self.tag_name
        );
        let lines = self
            .attributes
            .iter()
            .map(|attr| attr.ast_string(level + 1))
            .chain(self.children.iter().map(|node| node.ast_string(level + 1)));
        for line in lines {
            ret.push('\n');
            ret.push_str(&line);
        }
        ret
    }
}

impl<'a> AstString for Node<'a> {
    fn ast_string(&self, level: usize) -> String {
        match self {
            Node::Element(element) => element.ast_string(level),
            Node::Text(text) => text.ast_string(level),
        }
    }
}

impl<'a> AstString for TextNode<'a> {
    fn ast_string(&self, level: usize) -> String {
        format!(
            "{}{:?} {} `{}`",
            "  ".repeat(level),
            self.kind,
            range(&self.location),
            self.content
        )
    }
}

impl<'a> AstString for Attribute<'a> {
    fn ast_string(&self, level: usize) -> String {
        let kind = if self.is_dynamic { "binding" } else { "attribute" };
        let mut ret = format!("{}{} {} `{}`", "  ".repeat(level), kind, range(&self.location), self.raw);
        if !self.field.is_empty() {
            ret += &format!(" => {}: {}", self.field, self.value);
        }
        ret
    }
}
