//! Flat key/value view of an mmCIF file.
//!
//! Every data item (`_category.field`) maps to the list of its values, whether
//! it was written as a single pair or as a column of a `loop_` table.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// mmCIF placeholders for values that are unknown (`?`) or not applicable (`.`).
const PLACEHOLDERS: [&str; 2] = ["?", "."];

/// Values of every data item in an mmCIF file, keyed by tag.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CifDict {
    items: HashMap<String, Vec<String>>,
}

#[derive(Debug, PartialEq)]
enum Token {
    /// Bare word, possibly a tag or a keyword
    Word(String),
    /// Quoted string or text field, always a value
    Text(String),
}

impl CifDict {
    /// Read an mmCIF file. Unreadable files give an empty dictionary.
    pub fn from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(_) => Self::default(),
        }
    }

    /// Parse mmCIF text. Malformed input yields whatever items could be read.
    pub fn parse(text: &str) -> Self {
        let mut dict = CifDict::default();
        let mut tokens = tokenize(text).into_iter().peekable();

        while let Some(token) = tokens.next() {
            match token {
                Token::Word(word) if word.starts_with("data_") => {
                    dict.push("data_", word["data_".len()..].to_string());
                }
                Token::Word(word) if word.eq_ignore_ascii_case("loop_") => {
                    let mut keys = Vec::new();
                    while let Some(Token::Word(key)) = tokens.peek() {
                        if !key.starts_with('_') {
                            break;
                        }
                        keys.push(key.clone());
                        tokens.next();
                    }
                    if keys.is_empty() {
                        continue;
                    }

                    let mut column = 0;
                    while let Some(next) = tokens.peek() {
                        if let Token::Word(word) = next {
                            if is_reserved(word) {
                                break;
                            }
                        }
                        let value = match tokens.next() {
                            Some(Token::Word(value)) | Some(Token::Text(value)) => value,
                            None => break,
                        };
                        dict.push(&keys[column], value);
                        column = (column + 1) % keys.len();
                    }
                }
                Token::Word(key) if key.starts_with('_') => {
                    let has_value = match tokens.peek() {
                        Some(Token::Word(word)) => !is_reserved(word),
                        Some(Token::Text(_)) => true,
                        None => false,
                    };
                    if !has_value {
                        continue;
                    }
                    if let Some(Token::Word(value) | Token::Text(value)) = tokens.next() {
                        dict.push(&key, value);
                    }
                }
                _ => {}
            }
        }

        dict
    }

    fn push(&mut self, key: &str, value: String) {
        self.items.entry(key.to_string()).or_default().push(value);
    }

    /// All values stored under a key, placeholders included.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.items.get(key).map(Vec::as_slice)
    }

    /// The first value of a key that is not a placeholder.
    pub fn get_first(&self, key: &str) -> Option<&str> {
        self.values(key).next()
    }

    /// All non-placeholder values of a key joined with `", "`.
    pub fn get_joined(&self, key: &str) -> Option<String> {
        let values: Vec<&str> = self.values(key).collect();
        (!values.is_empty()).then(|| values.join(", "))
    }

    fn values<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.items
            .get(key)
            .into_iter()
            .flatten()
            .map(String::as_str)
            .filter(|v| !PLACEHOLDERS.contains(v))
    }
}

/// Tags and keywords, which can never be a value.
fn is_reserved(word: &str) -> bool {
    word.starts_with('_')
        || word.starts_with("data_")
        || word.eq_ignore_ascii_case("loop_")
        || word.starts_with("save_")
        || word.eq_ignore_ascii_case("global_")
        || word.eq_ignore_ascii_case("stop_")
}

/// Split mmCIF text into tokens, respecting quotes, text fields and comments.
fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        // Semicolon text field: runs until a line starting with ';'
        if let Some(first) = line.strip_prefix(';') {
            let mut field = first.to_string();
            for next in lines.by_ref() {
                if next.starts_with(';') {
                    break;
                }
                field.push('\n');
                field.push_str(next);
            }
            tokens.push(Token::Text(field.trim().to_string()));
            continue;
        }

        tokenize_line(line, &mut tokens);
    }

    tokens
}

/// Tokenize a single line, respecting single- and double-quoted strings.
fn tokenize_line(line: &str, tokens: &mut Vec<Token>) {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    let mut i = 0;

    while i < len {
        // Skip whitespace
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }

        // Comment until end of line
        if chars[i] == '#' {
            break;
        }

        // Quoted string; a quote only closes when followed by whitespace or EOL
        if chars[i] == '\'' || chars[i] == '"' {
            let quote = chars[i];
            i += 1;
            let start = i;
            while i < len && !(chars[i] == quote && (i + 1 == len || chars[i + 1].is_whitespace()))
            {
                i += 1;
            }
            tokens.push(Token::Text(chars[start..i].iter().collect()));
            i += 1;
            continue;
        }

        let start = i;
        while i < len && !chars[i].is_whitespace() {
            i += 1;
        }
        tokens.push(Token::Word(chars[start..i].iter().collect()));
    }
}
