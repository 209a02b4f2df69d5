//! Tokenizer for prefix command messages.
//!
//! Splits a chat message into the command token and its arguments:
//! - The first whitespace-separated word must start with the prefix
//! - Arguments are whitespace separated
//! - Double or single quotes keep an argument with spaces together
//! - Escape sequences work inside quotes

/// A prefix command split out of a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Command token with the prefix stripped. May be empty.
    pub token: String,
    /// Arguments following the token.
    pub args: Vec<String>,
}

/// Splits `content` into an [`Invocation`] when it starts with `prefix`.
///
/// Returns `None` for messages that are not commands, including ones with
/// leading whitespace. A bare prefix yields an empty token, which resolves to
/// "not found".
pub fn parse_invocation(content: &str, prefix: &str) -> Option<Invocation> {
    let (head, rest) = match content.find(char::is_whitespace) {
        Some(idx) => content.split_at(idx),
        None => (content, ""),
    };

    let token = head.strip_prefix(prefix)?;

    Some(Invocation {
        token: token.to_string(),
        args: tokenize(rest),
    })
}

/// Tokenizes an argument string.
///
/// - `a b` → `["a", "b"]`
/// - `"hello world" x` → `["hello world", "x"]`
/// - `'it''s'` → `["its"]` (adjacent quoted parts join)
/// - `"say \"hi\""` → `["say \"hi\""]`
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let (word, quoted) = collect_word_or_quoted(&mut chars);
        if !word.is_empty() || quoted {
            tokens.push(word);
        }
    }

    tokens
}

/// Collects a word, handling quoted sections. Returns whether any quotes were seen
/// so that `""` still produces an (empty) argument.
fn collect_word_or_quoted(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> (String, bool) {
    let mut result = String::new();
    let mut quoted = false;

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            break;
        }

        if c == '"' || c == '\'' {
            chars.next();
            quoted = true;
            result.push_str(&collect_quoted(chars, c));
            continue;
        }

        chars.next();
        result.push(c);
    }

    (result, quoted)
}

/// Collects characters inside quotes, handling escape sequences.
fn collect_quoted(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, quote: char) -> String {
    let mut result = String::new();
    let mut escaped = false;

    for c in chars.by_ref() {
        if escaped {
            match c {
                'n' => result.push('\n'),
                't' => result.push('\t'),
                '\\' => result.push('\\'),
                '"' => result.push('"'),
                '\'' => result.push('\''),
                _ => {
                    // Unknown escape, keep as-is
                    result.push('\\');
                    result.push(c);
                }
            }
            escaped = false;
            continue;
        }

        if c == '\\' {
            escaped = true;
            continue;
        }

        if c == quote {
            break;
        }

        result.push(c);
    }

    result
}
