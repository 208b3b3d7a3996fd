//! Quote-aware tokenizer shared by command execution and completion.

use crate::{Error, Result};

/// A line split up to the cursor for completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialLine {
    /// Finished tokens before the word under the cursor
    pub tokens: Vec<String>,
    /// Unquoted text of the word under the cursor
    pub word: String,
    /// Byte offset where the word starts, including an opening quote
    pub word_start: usize,
    /// Quote character left open by the word, if any
    pub open_quote: Option<char>,
}

#[derive(Default)]
struct Lexer {
    tokens: Vec<String>,
    current: String,
    start: Option<usize>,
    quote: Option<char>,
}

impl Lexer {
    fn run(line: &str) -> Self {
        let mut lexer = Self::default();
        for (idx, ch) in line.char_indices() {
            match (lexer.quote, ch) {
                (Some(q), c) if c == q => lexer.quote = None,
                (Some(_), c) => lexer.current.push(c),
                (None, '"' | '\'') => {
                    lexer.start.get_or_insert(idx);
                    lexer.quote = Some(ch);
                }
                (None, c) if c.is_whitespace() => lexer.finish_token(),
                (None, c) => {
                    lexer.start.get_or_insert(idx);
                    lexer.current.push(c);
                }
            }
        }
        lexer
    }

    fn finish_token(&mut self) {
        if self.start.take().is_some() {
            self.tokens.push(std::mem::take(&mut self.current));
        }
    }
}

/// Split a command line into tokens, honouring single and double quotes.
///
/// # Errors
///
/// Returns a parse error if a quote is left open.
pub fn split_line(line: &str) -> Result<Vec<String>> {
    let mut lexer = Lexer::run(line);
    if let Some(q) = lexer.quote {
        return Err(Error::parse(format!("Unterminated quote ({q})")));
    }
    lexer.finish_token();
    Ok(lexer.tokens)
}

/// Split the text before the cursor into finished tokens and the word being
/// completed.
#[must_use]
pub fn tokenize_for_completion(line: &str) -> PartialLine {
    let lexer = Lexer::run(line);
    match lexer.start {
        Some(start) => PartialLine {
            tokens: lexer.tokens,
            word: lexer.current,
            word_start: start,
            open_quote: lexer.quote,
        },
        None => PartialLine {
            tokens: lexer.tokens,
            word: String::new(),
            word_start: line.len(),
            open_quote: None,
        },
    }
}

/// Quote a completion candidate so it survives re-tokenization.
#[must_use]
pub fn quote_candidate(candidate: &str) -> String {
    let needs_quotes = candidate.is_empty()
        || candidate
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '\'');
    if !needs_quotes {
        candidate.to_string()
    } else if candidate.contains('"') {
        format!("'{candidate}'")
    } else {
        format!("\"{candidate}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_words() {
        assert_eq!(
            split_line("media movies  list").unwrap(),
            vec!["media", "movies", "list"]
        );
    }

    #[test]
    fn test_split_quoted_words() {
        assert_eq!(
            split_line(r#"media movies list -d "George Lucas" -a 'Mark Hamill'"#).unwrap(),
            vec!["media", "movies", "list", "-d", "George Lucas", "-a", "Mark Hamill"]
        );
    }

    #[test]
    fn test_split_apostrophe_inside_double_quotes() {
        assert_eq!(
            split_line(r#"-a "Lupita Nyong'o""#).unwrap(),
            vec!["-a", "Lupita Nyong'o"]
        );
    }

    #[test]
    fn test_split_empty_quoted_token() {
        assert_eq!(split_line(r#"add "" PG"#).unwrap(), vec!["add", "", "PG"]);
    }

    #[test]
    fn test_split_unterminated_quote() {
        assert!(matches!(
            split_line("add \"New Hope"),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_partial_after_space() {
        let partial = tokenize_for_completion("library movie ");
        assert_eq!(partial.tokens, vec!["library", "movie"]);
        assert_eq!(partial.word, "");
        assert_eq!(partial.word_start, 14);
    }

    #[test]
    fn test_partial_mid_word() {
        let partial = tokenize_for_completion("library mo");
        assert_eq!(partial.tokens, vec!["library"]);
        assert_eq!(partial.word, "mo");
        assert_eq!(partial.word_start, 8);
        assert_eq!(partial.open_quote, None);
    }

    #[test]
    fn test_partial_open_quote() {
        let partial = tokenize_for_completion("list -a \"Mark H");
        assert_eq!(partial.tokens, vec!["list", "-a"]);
        assert_eq!(partial.word, "Mark H");
        assert_eq!(partial.word_start, 8);
        assert_eq!(partial.open_quote, Some('"'));
    }

    #[test]
    fn test_partial_empty_line() {
        let partial = tokenize_for_completion("");
        assert!(partial.tokens.is_empty());
        assert_eq!(partial.word_start, 0);
    }

    #[test]
    fn test_quote_candidate() {
        assert_eq!(quote_candidate("SW_EP04"), "SW_EP04");
        assert_eq!(quote_candidate("Mark Hamill"), "\"Mark Hamill\"");
        assert_eq!(quote_candidate("Lupita Nyong'o"), "\"Lupita Nyong'o\"");
        assert_eq!(quote_candidate("say \"hi\""), "'say \"hi\"'");
    }

    #[test]
    fn test_quoted_candidate_splits_back() {
        for name in ["Mark Hamill", "Lupita Nyong'o", "J. J. Abrams"] {
            let line = format!("-a {}", quote_candidate(name));
            assert_eq!(split_line(&line).unwrap(), vec!["-a", name]);
        }
    }
}
