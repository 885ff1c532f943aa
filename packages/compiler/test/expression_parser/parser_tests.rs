/**
 * Parser Tests
 *
 * Binding expression grammar, canonical printing and parse errors
 */

// Import utils module
#[path = "utils/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::{parse, parse_error, unparse};
    use binding_syntax::expression_parser::ast::*;

    fn check_binding(source: &str, expected: &str) {
        assert_eq!(unparse(source), expected, "source: [{}]", source);
    }

    mod members_and_calls {
        use super::*;

        #[test]
        fn should_parse_property_reads() {
            check_binding("a", "a");
            check_binding("a.b.c", "a.b.c");
            check_binding("$parent.items", "$parent.items");
            check_binding("this.name", "this.name");
        }

        #[test]
        fn should_parse_keyed_reads() {
            check_binding("items[0]", "items[0]");
            check_binding("map['key'].value", "map['key'].value");
        }

        #[test]
        fn should_parse_calls() {
            check_binding("save()", "save()");
            check_binding("a.b(1, c)", "a.b(1, c)");
            check_binding("handlers[name](event)", "handlers[name](event)");
        }

        #[test]
        fn should_keep_member_receivers() {
            match parse("user.name") {
                AST::PropertyRead(read) => {
                    assert_eq!(read.name, "name");
                    assert!(matches!(*read.receiver, AST::PropertyRead(ref inner) if inner.name == "user"));
                }
                other => panic!("Expected property read, got {:?}", other),
            }
        }
    }

    mod operators {
        use super::*;

        #[test]
        fn should_respect_precedence() {
            match parse("1 + 2 * 3") {
                AST::Binary(binary) => {
                    assert_eq!(binary.operation, "+");
                    assert!(matches!(*binary.right, AST::Binary(ref right) if right.operation == "*"));
                }
                other => panic!("Expected binary, got {:?}", other),
            }
        }

        #[test]
        fn should_be_left_associative() {
            match parse("a - b - c") {
                AST::Binary(binary) => {
                    assert!(matches!(*binary.left, AST::Binary(_)));
                    assert!(matches!(*binary.right, AST::PropertyRead(_)));
                }
                other => panic!("Expected binary, got {:?}", other),
            }
        }

        #[test]
        fn should_parse_logical_and_relational_operators() {
            check_binding("a && b || !c", "a && b || !c");
            check_binding("a <= b", "a <= b");
            check_binding("key in map", "key in map");
            check_binding("a !== b", "a !== b");
        }

        #[test]
        fn should_parse_unary_operators() {
            check_binding("-x", "-x");
            check_binding("!!ok", "!!ok");
        }

        #[test]
        fn should_parse_conditionals() {
            check_binding("ok ? 'yes' : 'no'", "ok ? 'yes' : 'no'");
            assert!(matches!(parse("a ? b : c"), AST::Conditional(_)));
        }

        #[test]
        fn should_keep_parentheses() {
            check_binding("(a + b) * c", "(a + b) * c");
        }
    }

    mod literals {
        use super::*;

        #[test]
        fn should_parse_primitives() {
            check_binding("1.5", "1.5");
            check_binding("'text'", "'text'");
            check_binding("null", "null");
            check_binding("undefined", "undefined");
            check_binding("true", "true");
        }

        #[test]
        fn should_parse_arrays() {
            check_binding("[]", "[]");
            check_binding("[1, a, 'b']", "[1, a, 'b']");
        }

        #[test]
        fn should_parse_object_literals() {
            check_binding("{a: 1, 'b-c': d}", "{a: 1, 'b-c': d}");
            match parse("{}") {
                AST::LiteralMap(map) => assert!(map.keys.is_empty()),
                other => panic!("Expected literal map, got {:?}", other),
            }
        }
    }

    mod filters {
        use super::*;

        #[test]
        fn should_parse_filters_with_arguments() {
            check_binding("date | format:'short':locale", "date | format:'short':locale");
        }

        #[test]
        fn should_nest_chained_filters() {
            let ast = parse("name | trim | upper");
            match &ast {
                AST::Filter(filter) => {
                    assert_eq!(filter.name, "upper");
                    assert!(matches!(*filter.exp, AST::Filter(ref inner) if inner.name == "trim"));
                }
                other => panic!("Expected filter, got {:?}", other),
            }
            assert_eq!(ast.filter_names(), vec!["upper", "trim"]);
        }

        #[test]
        fn should_find_filters_inside_arguments() {
            let ast = parse("f(a | upper)");
            assert_eq!(ast.filter_names(), vec!["upper"]);
        }
    }

    mod assignments_and_chains {
        use super::*;

        #[test]
        fn should_parse_assignments() {
            check_binding("a = b", "a = b");
            check_binding("a.b = 1", "a.b = 1");
            check_binding("a[0] = 1", "a[0] = 1");
            assert!(matches!(parse("x = y"), AST::PropertyWrite(_)));
        }

        #[test]
        fn should_parse_chains() {
            check_binding("a(); b = 1", "a(); b = 1");
            match parse("a; b") {
                AST::Chain(chain) => assert_eq!(chain.expressions.len(), 2),
                other => panic!("Expected chain, got {:?}", other),
            }
        }

        #[test]
        fn should_allow_empty_input() {
            assert!(matches!(parse(""), AST::EmptyExpr(_)));
            assert!(matches!(parse("   "), AST::EmptyExpr(_)));
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn should_reject_dangling_tokens() {
            assert!(parse_error("a b").contains("Unexpected token 'b'"));
            assert!(parse_error("a)").contains("Unexpected token ')'"));
        }

        #[test]
        fn should_reject_unconsumed_closing_tokens() {
            assert!(parse_error(")").contains("Unconsumed token )"));
        }

        #[test]
        fn should_reject_incomplete_expressions() {
            assert!(parse_error("a +").contains("Unexpected end of expression"));
            assert!(parse_error("f(").contains("Unexpected end of expression"));
            assert!(parse_error("a[1").contains("Missing expected ]"));
        }

        #[test]
        fn should_reject_incomplete_conditionals() {
            assert!(parse_error("a ? b").contains("requires all 3 expressions"));
        }

        #[test]
        fn should_reject_unassignable_targets() {
            assert!(parse_error("1 = a").contains("Expression 1 is not assignable"));
        }

        #[test]
        fn should_reject_filters_in_chains() {
            assert!(parse_error("a | upper; b").contains("Cannot have a filter in a chain"));
        }

        #[test]
        fn should_surface_lexer_errors() {
            assert!(parse_error("'open").contains("Unterminated quote"));
        }
    }
}
