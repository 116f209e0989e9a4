/**
 * Environment Tests
 *
 * Configuration, visitor registration and parallel compilation
 */

#[path = "../utils/mod.rs"]
mod utils;

#[cfg(test)]
mod tests {
    use super::utils::{context, debug_config, environment, translator};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use translation_compiler::expression_parser::{serialize, Node};
    use translation_compiler::render::Value;
    use translation_compiler::template::FnVisitor;
    use translation_compiler::{CompilerConfig, CompilerError, Environment};

    mod config {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_config_from_file() {
            let path = std::env::temp_dir().join(format!("compiler-config-{}.json", std::process::id()));
            std::fs::write(&path, r#"{"debug": true, "locale": "fr"}"#).unwrap();
            let config = CompilerConfig::from_file(&path).unwrap();
            std::fs::remove_file(&path).unwrap();

            assert!(config.debug);
            assert_eq!(config.locale.as_deref(), Some("fr"));
            assert_eq!(config.default_domain, "messages");
        }

        #[test]
        fn test_default_domain_reaches_translator() {
            let mut catalogue = translation_compiler::translation::MessageCatalogue::new("en");
            catalogue.set("save", "Store", "admin");
            let translator = translation_compiler::translation::CatalogueTranslator::new("en")
                .with_catalogue(catalogue);
            let config = CompilerConfig {
                default_domain: "admin".to_string(),
                ..debug_config()
            };
            let env = Environment::new(config, Arc::new(translator));
            assert_eq!(
                env.render_source("{{ 'save'|trans|desc('Save') }}", "t", &context(&[]))
                    .unwrap(),
                "Store"
            );
        }

        #[test]
        fn test_locale_reaches_translator() {
            let translator = translator(&[("hello", "Hello")]).with_catalogue(
                translation_compiler::translation::MessageCatalogue::new("fr")
                    .with_message("hello", "Bonjour"),
            );
            let config = CompilerConfig {
                locale: Some("fr".to_string()),
                ..debug_config()
            };
            let env = Environment::new(config, Arc::new(translator));
            assert_eq!(
                env.render_source("{{ 'hello'|trans|desc('Hi') }}", "t", &context(&[]))
                    .unwrap(),
                "Bonjour"
            );
        }
    }

    mod compile {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_parse_does_not_rewrite() {
            let env = environment(true, &[]);
            let template = env.parse("{{ 'a'|trans|desc('A') }}", "t").unwrap();
            let expr = template.expressions().next().unwrap();
            assert!(expr.is_filter("desc"));

            let compiled = env.compile("{{ 'a'|trans|desc('A') }}", "t").unwrap();
            let expr = compiled.expressions().next().unwrap();
            assert!(matches!(expr, Node::Conditional(_)));
        }

        #[test]
        fn test_added_visitor_runs_after_default_applying() {
            let mut env = environment(true, &[]);
            env.add_visitor(Box::new(FnVisitor::on_enter("shout", 0, |node| {
                Ok(match node {
                    Node::Filter(mut f) if f.name == "trans" => {
                        f.name = "upper".to_string();
                        Node::Filter(f)
                    }
                    other => other,
                })
            })));
            let compiled = env.compile("{{ 'a'|trans|desc('A') }}", "t").unwrap();
            assert_eq!(
                compiled.expressions().map(serialize).collect::<Vec<_>>(),
                vec!["('a'|upper == 'a') ? 'A' : 'a'|upper".to_string()]
            );
        }

        #[test]
        fn test_compile_all_keeps_order() {
            let env = environment(true, &[("b", "Bee")]);
            let sources: Vec<(String, String)> = (0..32)
                .map(|i| (format!("t{}", i), format!("{{{{ 'm{}'|trans|desc('D{}') }}}}", i, i)))
                .collect();
            let mut inputs: Vec<(&str, &str)> = sources
                .iter()
                .map(|(name, source)| (name.as_str(), source.as_str()))
                .collect();
            inputs.insert(5, ("broken", "{{ 5|desc('x') }}"));

            let results = env.compile_all(&inputs);
            assert_eq!(results.len(), 33);
            assert_eq!(
                results[5].as_ref().unwrap_err(),
                &CompilerError::MissingTransFilter { line: 1 }
            );

            for (result, (name, _)) in results.iter().zip(&inputs) {
                if *name == "broken" {
                    continue;
                }
                let template = result.as_ref().unwrap();
                assert_eq!(template.name, *name);
                let index = &name[1..];
                assert_eq!(
                    env.render(template, &context(&[])).unwrap(),
                    format!("D{}", index)
                );
            }
        }

        #[test]
        fn test_render_text_and_values() {
            let env = environment(false, &[]);
            let vars = [("n", Value::from(3i64)), ("ok", Value::from(true))];
            assert_eq!(
                env.render_source("n={{ n }} ok={{ ok }} {{ ok ? 'yes' : 'no' }}", "t", &context(&vars))
                    .unwrap(),
                "n=3 ok=1 yes"
            );
        }
    }
}
