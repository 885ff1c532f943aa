/**
 * Binding Expression AST
 *
 * Node types produced by the expression parser for attribute values.
 */
use serde::Serialize;

/// Span of a node within the parsed source, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParseSpan {
    pub start: usize,
    pub end: usize,
}

impl ParseSpan {
    pub fn new(start: usize, end: usize) -> Self {
        ParseSpan { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Main AST enum containing all node types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum AST {
    EmptyExpr(EmptyExpr),
    ImplicitReceiver(ImplicitReceiver),
    ThisReceiver(ThisReceiver),
    Chain(Chain),
    Conditional(Conditional),
    PropertyRead(PropertyRead),
    KeyedRead(KeyedRead),
    PropertyWrite(PropertyWrite),
    KeyedWrite(KeyedWrite),
    Filter(Filter),
    LiteralPrimitive(LiteralPrimitive),
    LiteralArray(LiteralArray),
    LiteralMap(LiteralMap),
    Binary(Binary),
    PrefixNot(PrefixNot),
    Unary(Unary),
    Call(Call),
    ParenthesizedExpression(ParenthesizedExpression),
}

/// Empty expression (blank attribute value)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyExpr {
    pub span: ParseSpan,
}

/// Implicit receiver (the binding context)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImplicitReceiver {
    pub span: ParseSpan,
}

/// Explicit `this`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThisReceiver {
    pub span: ParseSpan,
}

/// Chain of expressions (e.g., `a(); b()`), only valid in listeners
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chain {
    pub span: ParseSpan,
    pub expressions: Vec<AST>,
}

/// Ternary conditional (e.g., `condition ? yes : no`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conditional {
    pub span: ParseSpan,
    pub condition: Box<AST>,
    pub true_exp: Box<AST>,
    pub false_exp: Box<AST>,
}

/// Property read (e.g., `obj.property`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRead {
    pub span: ParseSpan,
    pub receiver: Box<AST>,
    pub name: String,
}

/// Keyed read (e.g., `obj[key]`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyedRead {
    pub span: ParseSpan,
    pub receiver: Box<AST>,
    pub key: Box<AST>,
}

/// Property write (e.g., `obj.property = value`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyWrite {
    pub span: ParseSpan,
    pub receiver: Box<AST>,
    pub name: String,
    pub value: Box<AST>,
}

/// Keyed write (e.g., `obj[key] = value`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyedWrite {
    pub span: ParseSpan,
    pub receiver: Box<AST>,
    pub key: Box<AST>,
    pub value: Box<AST>,
}

/// Filter application (e.g., `value | filterName:arg1:arg2`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    pub span: ParseSpan,
    pub exp: Box<AST>,
    pub name: String,
    pub args: Vec<AST>,
}

/// Literal primitive (string, number, boolean, null, undefined)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiteralPrimitive {
    pub span: ParseSpan,
    pub value: LiteralValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Undefined,
}

/// Array literal (e.g., `[1, 2, 3]`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiteralArray {
    pub span: ParseSpan,
    pub expressions: Vec<AST>,
}

/// Map literal key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiteralMapKey {
    pub key: String,
    pub quoted: bool,
}

/// Object literal (e.g., `{a: 1, b: 2}`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiteralMap {
    pub span: ParseSpan,
    pub keys: Vec<LiteralMapKey>,
    pub values: Vec<AST>,
}

/// Binary operator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binary {
    pub span: ParseSpan,
    pub operation: String,
    pub left: Box<AST>,
    pub right: Box<AST>,
}

/// Prefix not operator (e.g., `!expr`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefixNot {
    pub span: ParseSpan,
    pub expression: Box<AST>,
}

/// Unary operator (e.g., `+expr`, `-expr`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unary {
    pub span: ParseSpan,
    pub operator: String,
    pub expr: Box<AST>,
}

/// Function call (e.g., `fn(a, b)`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    pub span: ParseSpan,
    pub receiver: Box<AST>,
    pub args: Vec<AST>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParenthesizedExpression {
    pub span: ParseSpan,
    pub expression: Box<AST>,
}

impl LiteralPrimitive {
    pub fn new(span: ParseSpan, value: LiteralValue) -> Self {
        LiteralPrimitive { span, value }
    }
}

impl AST {
    pub fn span(&self) -> ParseSpan {
        match self {
            AST::EmptyExpr(e) => e.span,
            AST::ImplicitReceiver(e) => e.span,
            AST::ThisReceiver(e) => e.span,
            AST::Chain(e) => e.span,
            AST::Conditional(e) => e.span,
            AST::PropertyRead(e) => e.span,
            AST::KeyedRead(e) => e.span,
            AST::PropertyWrite(e) => e.span,
            AST::KeyedWrite(e) => e.span,
            AST::Filter(e) => e.span,
            AST::LiteralPrimitive(e) => e.span,
            AST::LiteralArray(e) => e.span,
            AST::LiteralMap(e) => e.span,
            AST::Binary(e) => e.span,
            AST::PrefixNot(e) => e.span,
            AST::Unary(e) => e.span,
            AST::Call(e) => e.span,
            AST::ParenthesizedExpression(e) => e.span,
        }
    }

    pub fn is_implicit_receiver(&self) -> bool {
        matches!(self, AST::ImplicitReceiver(_))
    }

    /// Whether the node can appear on the left of `=`
    pub fn is_assignable(&self) -> bool {
        matches!(self, AST::PropertyRead(_) | AST::KeyedRead(_))
    }

    /// Calls `f` for every direct child node
    pub fn for_each_child<'a>(&'a self, mut f: impl FnMut(&'a AST)) {
        match self {
            AST::Chain(c) => c.expressions.iter().for_each(f),
            AST::Conditional(c) => {
                f(&c.condition);
                f(&c.true_exp);
                f(&c.false_exp);
            }
            AST::PropertyRead(p) => f(&p.receiver),
            AST::KeyedRead(k) => {
                f(&k.receiver);
                f(&k.key);
            }
            AST::PropertyWrite(p) => {
                f(&p.receiver);
                f(&p.value);
            }
            AST::KeyedWrite(k) => {
                f(&k.receiver);
                f(&k.key);
                f(&k.value);
            }
            AST::Filter(p) => {
                f(&p.exp);
                p.args.iter().for_each(f);
            }
            AST::LiteralArray(a) => a.expressions.iter().for_each(f),
            AST::LiteralMap(m) => m.values.iter().for_each(f),
            AST::Binary(b) => {
                f(&b.left);
                f(&b.right);
            }
            AST::PrefixNot(p) => f(&p.expression),
            AST::Unary(u) => f(&u.expr),
            AST::Call(c) => {
                f(&c.receiver);
                c.args.iter().for_each(f);
            }
            AST::ParenthesizedExpression(p) => f(&p.expression),
            AST::EmptyExpr(_)
            | AST::ImplicitReceiver(_)
            | AST::ThisReceiver(_)
            | AST::LiteralPrimitive(_) => {}
        }
    }

    /// Names of all filters applied anywhere in the tree, outermost first
    pub fn filter_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        collect_filter_names(self, &mut names);
        names
    }
}

fn collect_filter_names<'a>(ast: &'a AST, names: &mut Vec<&'a str>) {
    if let AST::Filter(filter) = ast {
        names.push(filter.name.as_str());
    }
    ast.for_each_child(|child| collect_filter_names(child, names));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(name: &str) -> AST {
        AST::PropertyRead(PropertyRead {
            span: ParseSpan::new(0, name.len()),
            receiver: Box::new(AST::ImplicitReceiver(ImplicitReceiver {
                span: ParseSpan::new(0, 0),
            })),
            name: name.to_string(),
        })
    }

    #[test]
    fn test_parse_span() {
        let span = ParseSpan::new(2, 10);
        assert_eq!(span.len(), 8);
        assert!(!span.is_empty());
        assert!(ParseSpan::new(3, 3).is_empty());
    }

    #[test]
    fn test_is_assignable() {
        assert!(scope("name").is_assignable());
        let literal = AST::LiteralPrimitive(LiteralPrimitive::new(
            ParseSpan::new(0, 1),
            LiteralValue::Number(1.0),
        ));
        assert!(!literal.is_assignable());
    }

    #[test]
    fn test_filter_names_nested() {
        let inner = AST::Filter(Filter {
            span: ParseSpan::new(0, 10),
            exp: Box::new(scope("date")),
            name: "dateFormat".to_string(),
            args: vec![],
        });
        let outer = AST::Filter(Filter {
            span: ParseSpan::new(0, 20),
            exp: Box::new(inner),
            name: "upper".to_string(),
            args: vec![scope("locale")],
        });
        assert_eq!(outer.filter_names(), vec!["upper", "dateFormat"]);
    }
}
