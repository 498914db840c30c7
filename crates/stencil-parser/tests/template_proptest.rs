//! Property-based tests for template parsing
//!
//! Generated templates are built from well-formed pieces only:
//! - Content runs that never start with a key character or `{`
//! - Placeholders `\@key`
//! - Balanced tag pairs `\@key{ ... \@}` wrapping nested pieces

use proptest::prelude::*;
use stencil_lexer::TemplateKind;
use stencil_parser::{parse, SyntaxError};

/// Generate valid key names
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9._-]{1,8}"
}

/// Generate content runs, sometimes carrying an escaped backslash
fn content_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ <>/=\n][a-zA-Z0-9 <>/=.@{}\n]{0,12}",
        "[ <>/=][a-z ]{0,6}".prop_map(|s| format!("{s}\\\\")),
    ]
}

fn placeholder_strategy() -> impl Strategy<Value = String> {
    key_strategy().prop_map(|k| format!("\\@{k}"))
}

/// Generate a whole template by nesting pieces
fn template_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![content_strategy(), placeholder_strategy()];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(|parts| parts.concat()),
            (key_strategy(), prop::collection::vec(inner, 0..4))
                .prop_map(|(k, parts)| format!("\\@{k}{{{}\\@}}", parts.concat())),
        ]
    })
}

proptest! {
    #[test]
    fn well_formed_templates_round_trip(source in template_strategy()) {
        let tokens = parse(&source).unwrap();
        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
        prop_assert_eq!(rebuilt, source);
    }

    #[test]
    fn tags_stay_balanced(source in template_strategy()) {
        let tokens = parse(&source).unwrap();
        let mut depth: i64 = 0;
        for token in &tokens {
            match token.kind {
                TemplateKind::OpenKey => depth += 1,
                TemplateKind::CloseKey => depth -= 1,
                _ => {}
            }
            prop_assert!(depth >= 0);
        }
        prop_assert_eq!(depth, 0);
    }

    #[test]
    fn positions_never_go_backwards(source in template_strategy()) {
        let tokens = parse(&source).unwrap();
        for pair in tokens.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(b.line > a.line || (b.line == a.line && b.column >= a.column));
        }
    }

    #[test]
    fn unclosed_tag_ends_with_premature_end(prefix in template_strategy(), key in key_strategy()) {
        let source = format!("{prefix}\\@{key}{{");
        let errors = parse(&source).unwrap_err();
        prop_assert_eq!(errors.last(), Some(&SyntaxError::PrematureEndOfInput));
    }

    #[test]
    fn arbitrary_input_never_panics(source in "[a-z\\\\@{}\n ]{0,40}") {
        match parse(&source) {
            Ok(tokens) => {
                let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
                prop_assert_eq!(rebuilt, source);
            }
            Err(errors) => prop_assert!(!errors.is_empty()),
        }
    }
}
