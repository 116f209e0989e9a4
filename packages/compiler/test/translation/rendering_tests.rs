/**
 * Rendering Tests
 *
 * What rewritten desc chains render to, with and without catalogue entries
 */

#[path = "../utils/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::{context, environment};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use translation_compiler::render::Value;
    use translation_compiler::CompilerError;

    fn render(debug: bool, messages: &[(&str, &str)], source: &str, vars: &[(&str, Value)]) -> String {
        environment(debug, messages)
            .render_source(source, "test", &context(vars))
            .unwrap()
    }

    mod plain {
        use super::*;
        use pretty_assertions::assert_eq;

        #[rstest]
        #[case(&[], "Welcome")]
        #[case(&[("title", "Bienvenue")], "Bienvenue")]
        fn test_plain_chain(#[case] messages: &[(&str, &str)], #[case] expected: &str) {
            assert_eq!(
                render(true, messages, "{{ 'title'|trans|desc('Welcome') }}", &[]),
                expected
            );
        }

        #[test]
        fn test_release_build_renders_key() {
            assert_eq!(
                render(false, &[], "{{ 'title'|trans|desc('Welcome') }}", &[]),
                "title"
            );
        }

        #[test]
        fn test_message_from_variable() {
            let vars = [("key", Value::from("title"))];
            assert_eq!(
                render(true, &[], "{{ key|trans|desc('Welcome') }}", &vars),
                "Welcome"
            );
        }
    }

    mod with_arguments {
        use super::*;
        use pretty_assertions::assert_eq;

        #[rstest]
        #[case(&[], "Hello Ada")]
        #[case(&[("greeting", "Bonjour %name% !")], "Bonjour Ada !")]
        fn test_arguments_are_substituted(#[case] messages: &[(&str, &str)], #[case] expected: &str) {
            let vars = [("name", Value::from("Ada"))];
            assert_eq!(
                render(
                    true,
                    messages,
                    "{{ 'greeting'|trans({'%name%': name})|desc('Hello %name%') }}",
                    &vars
                ),
                expected
            );
        }

        #[test]
        fn test_domain_argument_is_kept() {
            // the entry lives in "messages", the chain asks for "admin"
            let vars = [("name", Value::from("Ada"))];
            assert_eq!(
                render(
                    true,
                    &[("greeting", "Bonjour %name%")],
                    "{{ 'greeting'|trans({'%name%': name}, 'admin')|desc('Hello %name%') }}",
                    &vars
                ),
                "Hello Ada"
            );
        }
    }

    mod pluralized {
        use super::*;
        use pretty_assertions::assert_eq;

        const SOURCE: &str =
            "{{ 'apples'|trans({'%count%': n})|desc('{0} No apples|{1} One apple|]1,Inf[ %count% apples') }}";

        #[rstest]
        #[case(0, "No apples")]
        #[case(1, "One apple")]
        #[case(4, "4 apples")]
        fn test_default_is_pluralized(#[case] n: i64, #[case] expected: &str) {
            assert_eq!(render(true, &[], SOURCE, &[("n", Value::from(n))]), expected);
        }

        #[rstest]
        #[case(1, "Une pomme")]
        #[case(3, "3 pommes")]
        fn test_translation_wins(#[case] n: i64, #[case] expected: &str) {
            let messages = [("apples", "Une pomme|%count% pommes")];
            assert_eq!(render(true, &messages, SOURCE, &[("n", Value::from(n))]), expected);
        }
    }

    mod errors {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_desc_without_trans_aborts_compilation() {
            let err = environment(true, &[])
                .render_source("line one\n{{ 5|desc('default') }}", "test", &context(&[]))
                .unwrap_err();
            assert_eq!(err, CompilerError::MissingTransFilter { line: 2 });
        }

        #[test]
        fn test_desc_without_trans_is_ignored_in_release() {
            assert_eq!(render(false, &[], "{{ 5|desc('default') }}", &[]), "5");
        }
    }
}
