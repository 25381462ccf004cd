//! PII redaction applied before any seat sees a request payload.
//!
//! The scan is a single forward pass; redaction replaces matched spans with
//! a fixed marker, so the original text cannot be recovered from anything
//! downstream of this stage.

const REDACTION_MARKER: &str = "[REDACTED]";

/// Minimum digit-run length treated as an identifier (phone, SSN, account)
const MIN_DIGIT_RUN: usize = 7;

/// Result of sanitizing a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedPayload {
    /// Payload with PII spans replaced by the redaction marker
    pub text: String,
    /// Number of spans redacted
    pub redactions: usize,
}

impl SanitizedPayload {
    pub fn was_redacted(&self) -> bool {
        self.redactions > 0
    }
}

/// Redact PII-looking spans from a payload: email addresses and long digit
/// runs (digits may be separated by `-`, `.` or spaces).
pub fn sanitize_payload(payload: &str) -> SanitizedPayload {
    let mut out = String::with_capacity(payload.len());
    let mut redactions = 0;

    for token in split_keeping_separators(payload) {
        match token {
            Token::Word(word) => {
                if looks_like_email(word) || long_digit_run(word) {
                    out.push_str(REDACTION_MARKER);
                    redactions += 1;
                } else {
                    out.push_str(word);
                }
            }
            Token::Separator(sep) => out.push(sep),
        }
    }

    SanitizedPayload {
        text: out,
        redactions,
    }
}

enum Token<'a> {
    Word(&'a str),
    Separator(char),
}

/// Split on whitespace and newlines, keeping the separators so the
/// surrounding text survives redaction untouched.
fn split_keeping_separators(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;

    for (i, c) in input.char_indices() {
        if c.is_whitespace() {
            if start < i {
                tokens.push(Token::Word(&input[start..i]));
            }
            tokens.push(Token::Separator(c));
            start = i + c.len_utf8();
        }
    }
    if start < input.len() {
        tokens.push(Token::Word(&input[start..]));
    }
    tokens
}

fn looks_like_email(word: &str) -> bool {
    let Some(at) = word.find('@') else {
        return false;
    };
    let (local, rest) = word.split_at(at);
    let domain = &rest[1..];
    !local.is_empty() && domain.contains('.') && !domain.ends_with('.')
}

/// A token counts as an identifier when it contains a run of digits (allowing
/// `-`, `.`, space inside) of at least [`MIN_DIGIT_RUN`] digits.
fn long_digit_run(word: &str) -> bool {
    let digits = word.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < MIN_DIGIT_RUN {
        return false;
    }
    word.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | '.' | '+' | '(' | ')'))
}
