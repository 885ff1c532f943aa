/**
 * Expression Serializer
 *
 * Prints an AST back in canonical source form
 */
use super::ast::*;

/// Serialize AST to string
pub fn serialize(ast: &AST) -> String {
    let mut out = String::new();
    write_ast(&mut out, ast);
    out
}

fn write_ast(out: &mut String, ast: &AST) {
    match ast {
        AST::EmptyExpr(_) | AST::ImplicitReceiver(_) => {}
        AST::ThisReceiver(_) => out.push_str("this"),
        AST::Chain(chain) => write_list(out, &chain.expressions, "; "),
        AST::Conditional(c) => {
            write_ast(out, &c.condition);
            out.push_str(" ? ");
            write_ast(out, &c.true_exp);
            out.push_str(" : ");
            write_ast(out, &c.false_exp);
        }
        AST::PropertyRead(read) => {
            write_receiver(out, &read.receiver);
            out.push_str(&read.name);
        }
        AST::KeyedRead(read) => {
            write_ast(out, &read.receiver);
            out.push('[');
            write_ast(out, &read.key);
            out.push(']');
        }
        AST::PropertyWrite(write) => {
            write_receiver(out, &write.receiver);
            out.push_str(&write.name);
            out.push_str(" = ");
            write_ast(out, &write.value);
        }
        AST::KeyedWrite(write) => {
            write_ast(out, &write.receiver);
            out.push('[');
            write_ast(out, &write.key);
            out.push_str("] = ");
            write_ast(out, &write.value);
        }
        AST::Filter(filter) => {
            write_ast(out, &filter.exp);
            out.push_str(" | ");
            out.push_str(&filter.name);
            for arg in &filter.args {
                out.push(':');
                write_ast(out, arg);
            }
        }
        AST::LiteralPrimitive(literal) => match &literal.value {
            LiteralValue::String(value) => {
                out.push('\'');
                out.push_str(&value.replace('\'', "\\'"));
                out.push('\'');
            }
            LiteralValue::Number(value) => out.push_str(&value.to_string()),
            LiteralValue::Boolean(value) => out.push_str(&value.to_string()),
            LiteralValue::Null => out.push_str("null"),
            LiteralValue::Undefined => out.push_str("undefined"),
        },
        AST::LiteralArray(array) => {
            out.push('[');
            write_list(out, &array.expressions, ", ");
            out.push(']');
        }
        AST::LiteralMap(map) => {
            out.push('{');
            for (i, (key, value)) in map.keys.iter().zip(&map.values).enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if key.quoted {
                    out.push('\'');
                    out.push_str(&key.key);
                    out.push('\'');
                } else {
                    out.push_str(&key.key);
                }
                out.push_str(": ");
                write_ast(out, value);
            }
            out.push('}');
        }
        AST::Binary(binary) => {
            write_ast(out, &binary.left);
            out.push(' ');
            out.push_str(&binary.operation);
            out.push(' ');
            write_ast(out, &binary.right);
        }
        AST::PrefixNot(not) => {
            out.push('!');
            write_ast(out, &not.expression);
        }
        AST::Unary(unary) => {
            out.push_str(&unary.operator);
            write_ast(out, &unary.expr);
        }
        AST::Call(call) => {
            write_ast(out, &call.receiver);
            out.push('(');
            write_list(out, &call.args, ", ");
            out.push(')');
        }
        AST::ParenthesizedExpression(paren) => {
            out.push('(');
            write_ast(out, &paren.expression);
            out.push(')');
        }
    }
}

fn write_receiver(out: &mut String, receiver: &AST) {
    if !receiver.is_implicit_receiver() {
        write_ast(out, receiver);
        out.push('.');
    }
}

fn write_list(out: &mut String, items: &[AST], separator: &str) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        write_ast(out, item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: f64, start: usize) -> AST {
        AST::LiteralPrimitive(LiteralPrimitive::new(
            ParseSpan::new(start, start + 1),
            LiteralValue::Number(value),
        ))
    }

    #[test]
    fn test_serialize_binary() {
        let ast = AST::Binary(Binary {
            span: ParseSpan::new(0, 5),
            operation: "+".to_string(),
            left: Box::new(number(1.0, 0)),
            right: Box::new(number(2.0, 4)),
        });

        assert_eq!(serialize(&ast), "1 + 2");
    }

    #[test]
    fn test_serialize_property_read() {
        let ast = AST::PropertyRead(PropertyRead {
            span: ParseSpan::new(0, 4),
            receiver: Box::new(AST::ImplicitReceiver(ImplicitReceiver {
                span: ParseSpan::new(0, 0),
            })),
            name: "name".to_string(),
        });

        assert_eq!(serialize(&ast), "name");
    }
}
