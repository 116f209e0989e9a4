/**
 * Default Applying Tests
 *
 * The desc rewrite as seen through the node traverser
 */

#[path = "../utils/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::parse;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use translation_compiler::expression_parser::{serialize, Node, Parser};
    use translation_compiler::template::{FnVisitor, NodeTraverser, NodeVisitor};
    use translation_compiler::translation::DefaultApplyingNodeVisitor;
    use translation_compiler::CompilerError;

    fn traverser(enabled: bool) -> NodeTraverser {
        NodeTraverser::new(vec![Box::new(DefaultApplyingNodeVisitor::new(enabled))])
    }

    fn rewrite(exp: &str) -> String {
        serialize(&traverser(true).traverse(parse(exp)).unwrap())
    }

    mod rewriting {
        use super::*;
        use pretty_assertions::assert_eq;

        #[rstest]
        #[case(
            "'title'|trans|desc('Welcome')",
            "('title'|trans == 'title') ? 'Welcome' : 'title'|trans"
        )]
        #[case(
            "'hi'|trans({'%name%': name})|desc('Hi %name%')",
            "('hi'|trans([]) == 'hi') ? 'Hi %name%'|replace({'%name%': name}) : 'hi'|trans({'%name%': name})"
        )]
        #[case(
            "'hi'|trans({'%name%': name}, 'admin')|desc('Hi')",
            "('hi'|trans([], 'admin') == 'hi') ? 'Hi'|replace({'%name%': name}) : 'hi'|trans({'%name%': name}, 'admin')"
        )]
        #[case(
            "'apples'|trans({'%count%': n})|desc('%count% apples')",
            "transchoice_with_default('apples', '%count% apples', {'%count%': n})"
        )]
        #[case("'title'|trans", "'title'|trans")]
        #[case("'title'|upper", "'title'|upper")]
        fn test_rewrites(#[case] exp: &str, #[case] expected: &str) {
            assert_eq!(rewrite(exp), expected);
        }

        #[test]
        fn test_pluralized_chain_never_becomes_conditional() {
            let node = traverser(true)
                .traverse(parse("'apples'|trans({'%count%': 3, '%kind%': k})|desc('Apples')"))
                .unwrap();
            assert!(matches!(node, Node::Transchoice(_)));
        }

        #[test]
        fn test_rewrite_is_local() {
            assert_eq!(
                rewrite("'Name: ' ~ 'name'|trans|desc('Name') ~ suffix"),
                "('Name: ' ~ (('name'|trans == 'name') ? 'Name' : 'name'|trans)) ~ suffix"
            );
        }

        #[test]
        fn test_desc_inside_filter_argument() {
            assert_eq!(
                rewrite("'x'|trans({'%y%': 'y'|trans|desc('Y')})|desc('X %y%')"),
                "('x'|trans([]) == 'x') ? 'X %y%'|replace({'%y%': ('y'|trans == 'y') ? 'Y' : 'y'|trans}) : 'x'|trans({'%y%': ('y'|trans == 'y') ? 'Y' : 'y'|trans})"
            );
        }
    }

    mod idempotence {
        use super::*;
        use pretty_assertions::assert_eq;

        #[rstest]
        #[case("'title'|trans|desc('Welcome')")]
        #[case("'hi'|trans({'%name%': name})|desc('Hi %name%')")]
        #[case("'apples'|trans({'%count%': n})|desc('%count% apples')")]
        fn test_second_pass_is_identity(#[case] exp: &str) {
            let traverser = traverser(true);
            let once = traverser.traverse(parse(exp)).unwrap();
            let twice = traverser.traverse(once.clone()).unwrap();
            assert_eq!(twice, once);
        }
    }

    mod gate {
        use super::*;
        use pretty_assertions::assert_eq;

        #[rstest]
        #[case("'title'|trans|desc('Welcome')")]
        #[case("5|desc('default')")]
        fn test_disabled_is_identity(#[case] exp: &str) {
            let node = parse(exp);
            assert_eq!(traverser(false).traverse(node.clone()).unwrap(), node);
        }
    }

    mod errors {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_missing_trans_filter() {
            let node = Parser::new()
                .parse_expression("5|desc('default')", 12)
                .unwrap();
            let err = traverser(true).traverse(node).unwrap_err();
            assert_eq!(err, CompilerError::MissingTransFilter { line: 12 });
        }

        #[test]
        fn test_missing_trans_filter_deep_in_tree() {
            let node = Parser::new()
                .parse_expression("a ? b :\n\nname|upper|desc('x')", 1)
                .unwrap();
            let err = traverser(true).traverse(node).unwrap_err();
            assert_eq!(err.line(), Some(3));
        }

        #[test]
        fn test_desc_without_default() {
            let err = traverser(true)
                .traverse(parse("'a'|trans|desc"))
                .unwrap_err();
            assert_eq!(err, CompilerError::DescWithoutDefault { line: 1 });
        }
    }

    mod ordering {
        use super::*;
        use pretty_assertions::assert_eq;
        use std::sync::{Arc, Mutex};

        #[test]
        fn test_runs_before_default_priority_visitors() {
            let seen = Arc::new(Mutex::new(Vec::new()));
            let log = seen.clone();
            let mut traverser = NodeTraverser::default();
            traverser.add_visitor(Box::new(FnVisitor::on_enter("lowering", 0, move |node| {
                if let Node::Filter(f) = &node {
                    log.lock().unwrap().push(f.name.clone());
                }
                Ok(node)
            })));
            traverser.add_visitor(Box::new(DefaultApplyingNodeVisitor::new(true)));

            assert_eq!(traverser.visitor_names(), vec!["default_applying", "lowering"]);
            traverser.traverse(parse("'a'|trans|desc('A')")).unwrap();
            // desc is gone by the time later visitors run
            assert!(!seen.lock().unwrap().contains(&"desc".to_string()));
        }

        #[test]
        fn test_priority() {
            assert_eq!(DefaultApplyingNodeVisitor::new(true).priority(), -2);
        }
    }

    mod isolation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_replacement_branches_are_independent() {
            let node = traverser(true)
                .traverse(parse("'hi'|trans({'%name%': name})|desc('Hi')"))
                .unwrap();
            let Node::Conditional(mut conditional) = node else {
                panic!("expected a conditional");
            };
            let before = (*conditional.otherwise).clone();

            // mutate the equality probe
            if let Node::Binary(binary) = conditional.test.as_mut() {
                if let Node::Filter(probe) = binary.left.as_mut() {
                    probe.arguments[0] = Node::string("changed", 1);
                }
            }
            assert_eq!(*conditional.otherwise, before);
            assert_eq!(
                serialize(&conditional.otherwise),
                "'hi'|trans({'%name%': name})"
            );
        }
    }
}
