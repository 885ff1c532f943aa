/**
 * Lexer Tests
 *
 * Token stream produced for binding expressions
 */

#[cfg(test)]
mod tests {
    use binding_syntax::expression_parser::lexer::{Lexer, Token, TokenType};

    fn lex(text: &str) -> Vec<Token> {
        Lexer::new().tokenize(text)
    }

    fn expect_token(token: &Token, index: usize, end: usize) {
        assert_eq!(token.index, index, "Token index mismatch");
        assert_eq!(token.end, end, "Token end mismatch");
    }

    fn expect_character_token(token: &Token, index: usize, end: usize, character: char) {
        expect_token(token, index, end);
        assert!(
            token.is_character(character),
            "Expected character token '{}'",
            character
        );
    }

    fn expect_operator_token(token: &Token, index: usize, end: usize, operator: &str) {
        expect_token(token, index, end);
        assert!(
            token.is_operator(operator),
            "Expected operator token '{}'",
            operator
        );
    }

    fn expect_number_token(token: &Token, index: usize, end: usize, n: f64) {
        expect_token(token, index, end);
        assert!(token.is_number(), "Expected number token");
        assert_eq!(token.num_value, n);
    }

    fn expect_string_token(token: &Token, index: usize, end: usize, text: &str) {
        expect_token(token, index, end);
        assert!(token.is_string(), "Expected string token");
        assert_eq!(token.str_value, text);
    }

    fn expect_identifier_token(token: &Token, index: usize, end: usize, name: &str) {
        expect_token(token, index, end);
        assert!(token.is_identifier(), "Expected identifier token");
        assert_eq!(token.str_value, name);
    }

    fn expect_keyword_token(token: &Token, index: usize, end: usize, keyword: &str) {
        expect_token(token, index, end);
        assert!(token.is_keyword_named(keyword), "Expected keyword '{}'", keyword);
    }

    mod token {
        use super::*;

        #[test]
        fn should_tokenize_a_simple_identifier() {
            let tokens = lex("j");
            assert_eq!(tokens.len(), 1);
            expect_identifier_token(&tokens[0], 0, 1, "j");
        }

        #[test]
        fn should_tokenize_dollar_prefixed_identifiers() {
            let tokens = lex("$parent.$index");
            assert_eq!(tokens.len(), 3);
            expect_identifier_token(&tokens[0], 0, 7, "$parent");
            expect_character_token(&tokens[1], 7, 8, '.');
            expect_identifier_token(&tokens[2], 8, 14, "$index");
        }

        #[test]
        fn should_tokenize_a_property_call() {
            let tokens = lex("j.k(1)");
            assert_eq!(tokens.len(), 6);
            expect_identifier_token(&tokens[0], 0, 1, "j");
            expect_character_token(&tokens[1], 1, 2, '.');
            expect_identifier_token(&tokens[2], 2, 3, "k");
            expect_character_token(&tokens[3], 3, 4, '(');
            expect_number_token(&tokens[4], 4, 5, 1.0);
            expect_character_token(&tokens[5], 5, 6, ')');
        }

        #[test]
        fn should_recognize_keywords() {
            let tokens = lex("this null undefined true false in");
            expect_keyword_token(&tokens[0], 0, 4, "this");
            expect_keyword_token(&tokens[1], 5, 9, "null");
            expect_keyword_token(&tokens[2], 10, 19, "undefined");
            expect_keyword_token(&tokens[3], 20, 24, "true");
            expect_keyword_token(&tokens[4], 25, 30, "false");
            expect_keyword_token(&tokens[5], 31, 33, "in");
        }

        #[test]
        fn should_tokenize_numbers() {
            let tokens = lex("0.5 12 1e3 .25");
            expect_number_token(&tokens[0], 0, 3, 0.5);
            expect_number_token(&tokens[1], 4, 6, 12.0);
            expect_number_token(&tokens[2], 7, 10, 1000.0);
            expect_number_token(&tokens[3], 11, 14, 0.25);
        }

        #[test]
        fn should_tokenize_quoted_strings_with_escapes() {
            let tokens = lex(r#"'a\'b' "c\nd""#);
            assert_eq!(tokens.len(), 2);
            expect_string_token(&tokens[0], 0, 6, "a'b");
            expect_string_token(&tokens[1], 7, 13, "c\nd");
        }

        #[test]
        fn should_tokenize_the_longest_operator() {
            let tokens = lex("a !== b <= c && d || e");
            expect_operator_token(&tokens[1], 2, 5, "!==");
            expect_operator_token(&tokens[3], 8, 10, "<=");
            expect_operator_token(&tokens[5], 13, 15, "&&");
            expect_operator_token(&tokens[7], 18, 20, "||");
        }

        #[test]
        fn should_tokenize_filter_syntax() {
            let tokens = lex("d | date:'short'");
            assert_eq!(tokens.len(), 5);
            expect_operator_token(&tokens[1], 2, 3, "|");
            expect_identifier_token(&tokens[2], 4, 8, "date");
            expect_character_token(&tokens[3], 8, 9, ':');
            expect_string_token(&tokens[4], 9, 16, "short");
        }

        #[test]
        fn should_skip_whitespace() {
            let tokens = lex(" \t a \n");
            assert_eq!(tokens.len(), 1);
            expect_identifier_token(&tokens[0], 3, 4, "a");
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn should_report_unterminated_strings() {
            let tokens = lex("'abc");
            assert_eq!(tokens.len(), 1);
            assert_eq!(tokens[0].token_type, TokenType::Error);
            assert!(tokens[0].str_value.contains("Unterminated quote"));
        }

        #[test]
        fn should_report_unexpected_characters() {
            let tokens = lex("a # b");
            assert!(tokens[1].is_error());
            assert!(tokens[1].str_value.contains("Unexpected character [#]"));
        }

        #[test]
        fn should_reject_a_lone_ampersand() {
            let tokens = lex("a & b");
            assert!(tokens[1].is_error());
        }
    }
}
