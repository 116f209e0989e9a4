/**
 * Serializer Tests
 *
 * Serialized expressions parse back to the same tree
 */

#[path = "../utils/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::parse;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use translation_compiler::expression_parser::{
        serialize, ArrayExpr, BinaryExpr, BinaryOperator, ConditionalExpr, Node, TranschoiceExpr,
    };

    #[rstest]
    #[case("'hello'|trans|desc('Hello')")]
    #[case("'hi'|trans({'%name%': name}, 'admin')|desc('Hi %name%')")]
    #[case("(a == b) ? c|upper : 'd'")]
    #[case("[a, 'b', 3]")]
    #[case("'x' ~ (a ? b : c)")]
    fn test_serialize_parse_is_stable(#[case] exp: &str) {
        let node = parse(exp);
        let reparsed = parse(&serialize(&node));
        assert_eq!(reparsed, node);
    }

    #[test]
    fn test_serialize_conditional_test_gets_parentheses() {
        let node = Node::Conditional(ConditionalExpr::new(
            Node::Binary(BinaryExpr::new(
                BinaryOperator::Equal,
                Node::name("a", 1),
                Node::string("a", 1),
                1,
            )),
            Node::string("yes", 1),
            Node::name("a", 1),
            1,
        ));
        assert_eq!(serialize(&node), "(a == 'a') ? 'yes' : a");
    }

    #[test]
    fn test_serialize_transchoice() {
        let mut arguments = ArrayExpr::new(1);
        arguments.add_element(Node::string("apples", 1), None);
        arguments.add_element(Node::string("%count% apples", 1), None);
        let node = Node::Transchoice(TranschoiceExpr::new(arguments, 1));
        assert_eq!(
            serialize(&node),
            "transchoice_with_default('apples', '%count% apples')"
        );
    }

    #[test]
    fn test_serialize_filter_on_binary_operand() {
        let node = Node::filter(
            Node::Binary(BinaryExpr::new(
                BinaryOperator::Concat,
                Node::name("a", 1),
                Node::name("b", 1),
                1,
            )),
            "upper",
            vec![],
            1,
        );
        assert_eq!(serialize(&node), "(a ~ b)|upper");
    }
}
