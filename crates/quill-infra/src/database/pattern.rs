//! SQL `LIKE` matching for stores that cannot push the query down.
//!
//! `%` matches any run of characters, `_` exactly one, and `\` escapes the next
//! character. Matching is case-sensitive, as in PostgreSQL.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    AnyRun,
    AnyOne,
    Literal(char),
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        let token = match c {
            '%' => Token::AnyRun,
            '_' => Token::AnyOne,
            // A trailing backslash matches itself.
            '\\' => Token::Literal(chars.next().unwrap_or('\\')),
            c => Token::Literal(c),
        };
        if token == Token::AnyRun && tokens.last() == Some(&Token::AnyRun) {
            continue;
        }
        tokens.push(token);
    }

    tokens
}

/// Whether `text` matches the `LIKE` pattern in full.
pub(crate) fn like_matches(pattern: &str, text: &str) -> bool {
    let tokens = tokenize(pattern);
    let text: Vec<char> = text.chars().collect();

    let (mut t, mut p) = (0, 0);
    // Position of the most recent `%` and the text index it was tried at.
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match tokens.get(p) {
            Some(Token::AnyRun) => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(Token::AnyOne) => {
                t += 1;
                p += 1;
            }
            Some(Token::Literal(c)) if *c == text[t] => {
                t += 1;
                p += 1;
            }
            _ => match backtrack {
                Some((star, start)) => {
                    p = star + 1;
                    t = start + 1;
                    backtrack = Some((star, start + 1));
                }
                None => return false,
            },
        }
    }

    tokens[p..].iter().all(|tok| *tok == Token::AnyRun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_pattern() {
        assert!(like_matches("%needle%", "a needle here"));
        assert!(like_matches("%needle%", "needle"));
        assert!(!like_matches("%needle%", "a Needle here"));
        assert!(!like_matches("%needle%", "haystack"));
    }

    #[test]
    fn test_anchored_and_single_char() {
        assert!(like_matches("ru_t", "rust"));
        assert!(!like_matches("ru_t", "rut"));
        assert!(like_matches("rust%", "rustacean"));
        assert!(!like_matches("rust%", "trust"));
        assert!(like_matches("%", ""));
        assert!(!like_matches("_", ""));
    }

    #[test]
    fn test_escaped_wildcards_match_literally() {
        assert!(like_matches(r"100\%", "100%"));
        assert!(!like_matches(r"100\%", "1000"));
        assert!(like_matches(r"%a\_b%", "xa_by"));
        assert!(!like_matches(r"%a\_b%", "xacby"));
    }

    #[test]
    fn test_backtracking_over_repeated_prefix() {
        assert!(like_matches("%aab", "aaab"));
        assert!(like_matches("%ab%ab", "xabyab"));
        assert!(!like_matches("%ab%ab", "xabyba"));
    }

    #[test]
    fn test_multibyte_text() {
        assert!(like_matches("%ü%", "Grüße"));
        assert!(like_matches("Gr_ße", "Grüße"));
    }
}
