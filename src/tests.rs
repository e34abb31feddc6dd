use crate::{compile, do_matching, matches, Automaton, BuildError, CompileError};
use std::{sync::Arc, thread};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn check(pattern: &str, accepted: &[&str], rejected: &[&str]) {
    init();
    let re = compile(pattern).unwrap();
    for s in accepted {
        assert!(matches(&re, s), "{pattern:?} should match {s:?}");
    }
    for s in rejected {
        assert!(!matches(&re, s), "{pattern:?} should not match {s:?}");
    }
}

#[test]
fn literal() {
    check("abc", &["abc"], &["", "ab", "abcx", "xabc", "abd", "cba"]);
    check("a1B2", &["a1B2"], &["a1b2", "a1B"]);
}

#[test]
fn union() {
    check("a|b|c", &["a", "b", "c"], &["", "ab", "d", "abc", "a|b"]);
}

#[test]
fn star() {
    check("a*", &["", "a", "aaaa"], &["ab", "b", "ba"]);
}

#[test]
fn plus() {
    check("a+", &["a", "aaa"], &["", "b", "aab"]);
}

#[test]
fn question() {
    check("ab?c", &["ac", "abc"], &["abbc", "a", "bc", ""]);
}

#[test]
fn nested() {
    check(
        "a(bb)+a*",
        &["abbbbaaaa", "abb", "abba", "abbbbbb"],
        &["abbb", "a", "b", "bba", "abbab"],
    );
    check(
        "((ab|cd)*efg)+h",
        &["ababcdabefgh", "efgh", "efgefgh", "cdefgabefgh"],
        &["h", "efg", "abh", "abefg"],
    );
    check("(a|b)*c(d|e)?", &["c", "abbac", "cd", "bce"], &["", "cde", "ad"]);
}

#[test]
fn precedence() {
    check("ab|cd", &["ab", "cd"], &["acd", "bd", "abd", "abcd", "a"]);
    check("a|bc*", &["a", "b", "bccc"], &["ac", "acc", ""]);
    check("(a|b)c", &["ac", "bc"], &["a", "abc"]);
}

#[test]
fn anchoring() {
    check("bc", &["bc"], &["abcd", "abc", "bcd"]);
}

#[test]
fn repeated_quantifiers() {
    check("a**", &["", "aaaa"], &["b"]);
    check("(a*)*b", &["b", "aaaaaaaaab"], &["", "a"]);
    check("((((a*)*)*)*)", &["", "aaaaaaaaa"], &["ab"]);
    check("a?+", &["", "a", "aa"], &["b"]);
}

#[test]
fn long_input() {
    let text = "a".repeat(1000) + "b";
    check("a*b", &[text.as_str()], &[&text[..1000]]);

    // a?^n a^n
    let n = 20;
    let pattern = "a?".repeat(n) + &"a".repeat(n);
    let re = compile(&pattern).unwrap();
    assert!(matches(&re, &"a".repeat(n)));
    assert!(matches(&re, &"a".repeat(2 * n)));
    assert!(!matches(&re, &"a".repeat(n - 1)));
    assert!(!matches(&re, &"a".repeat(2 * n + 1)));
}

#[test]
fn empty_pattern() {
    check("", &[""], &["a", " "]);
    check("()", &[""], &["a"]);
    check("(())", &[""], &["a"]);
}

#[test]
fn unsupported_chars() {
    init();
    assert_eq!(
        compile("a.b").unwrap_err(),
        CompileError::UnsupportedChar { pos: 1, ch: '.' }
    );
    assert_eq!(
        compile("[ab]").unwrap_err(),
        CompileError::UnsupportedChar { pos: 0, ch: '[' }
    );
    assert_eq!(
        compile("^a$").unwrap_err(),
        CompileError::UnsupportedChar { pos: 0, ch: '^' }
    );
    assert_eq!(
        compile("a b").unwrap_err(),
        CompileError::UnsupportedChar { pos: 1, ch: ' ' }
    );
}

#[test]
fn malformed_patterns() {
    init();
    // an empty group is not an operand
    for p in [
        "+b", "*b", "|b", "?b", "a|", "a||b", "(|a)", "()a", "a()", "a|()", "()()", "()*",
    ] {
        assert!(
            matches!(
                compile(p),
                Err(CompileError::Build(BuildError::MissingOperand(_)))
            ),
            "{p:?}"
        );
    }
    for p in ["(a", "a)", "((a)", "(a))b"] {
        assert!(
            matches!(
                compile(p),
                Err(CompileError::Build(BuildError::UnexpectedToken(_)))
            ),
            "{p:?}"
        );
    }
}

#[test]
fn error_messages() {
    assert_eq!(
        compile("a-b").unwrap_err().to_string(),
        "unsupported character '-' at position 1"
    );
    assert_eq!(
        compile("*").unwrap_err().to_string(),
        "missing operand for [Star: *]"
    );
    assert_eq!(
        compile("(a").unwrap_err().to_string(),
        "unexpected token [LParen: (]"
    );
}

#[test]
fn do_matching_one_shot() {
    assert!(do_matching("abc|def", "def").unwrap());
    assert!(do_matching("(abc)*", "abcabc").unwrap());
    assert!(do_matching("(ab|cd)+", "abcdcd").unwrap());
    assert!(!do_matching("(ab|cd)+", "").unwrap());
    assert!(!do_matching("abc?", "acb").unwrap());
    assert!(do_matching("+b", "bbb").is_err());
}

#[test]
fn idempotent_compilation() {
    let inputs = ["", "a", "ab", "abb", "abbbb", "abba", "abbaa", "b", "abbb"];
    for p in ["a(bb)+a*", "ab|cd", "(a|b)*", "a?b+"] {
        let re1 = compile(p).unwrap();
        let re2 = compile(p).unwrap();
        for s in inputs {
            assert_eq!(matches(&re1, s), matches(&re2, s), "{p:?} on {s:?}");
        }
    }
}

#[test]
fn deterministic() {
    let re = compile("((ab|cd)*efg)+h").unwrap();
    for _ in 0..10 {
        assert!(matches(&re, "ababcdabefgh"));
        assert!(!matches(&re, "ababcdabefg"));
        assert!(re.is_match("efgh"));
    }
}

#[test]
fn shared_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Automaton>();

    let re = Arc::new(compile("a(bb)+a*").unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let re = Arc::clone(&re);
            thread::spawn(move || {
                let text = format!("a{}{}", "bb".repeat(i + 1), "a".repeat(i));
                matches(&re, &text) && !matches(&re, &format!("{text}b"))
            })
        })
        .collect();

    for h in handles {
        assert!(h.join().unwrap());
    }
}
