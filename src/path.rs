//! Compilation of path templates into anchored matchers.
//!
//! A template is matched against the whole request path. Literal text must match
//! exactly, regex metacharacters included. A `:name` token, where the name is drawn
//! from `[A-Za-z0-9_]`, matches one or more characters up to the next `/`:
//! ```ignore
//!  Template: /users/:id/posts/:post
//!
//!   /users/42/posts/7          match: id="42", post="7"
//!   /users/42/posts/           no match
//!   /users/42/posts/7/edit     no match
//!   /users/42/posts/7/         no match
//! ```
//!
//! A `:` that is not followed by a name character is plain literal text, so every
//! string is a valid template.
use crate::error::PatternError;

use regex::Regex;

/// Matches a single named segment.
const PARAM_CAPTURE: &str = "([^/]+)";

/// A template compiled into a matcher plus its parameter names.
///
/// The names are in left-to-right order and line up with the capture groups of the
/// matcher.
#[derive(Debug, Clone)]
pub struct Pattern {
    template: String,
    matcher: Regex,
    names: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'t> {
    Literal(&'t str),
    Param(&'t str),
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Splits a template into literal runs and `:name` tokens.
fn tokenize(template: &str) -> Vec<Token<'_>> {
    let bytes = template.as_bytes();
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b':' {
            let name_len = bytes[i + 1..]
                .iter()
                .take_while(|&&b| is_name_byte(b))
                .count();

            if name_len > 0 {
                if literal_start < i {
                    tokens.push(Token::Literal(&template[literal_start..i]));
                }
                tokens.push(Token::Param(&template[i + 1..i + 1 + name_len]));
                i += 1 + name_len;
                literal_start = i;
                continue;
            }
        }
        i += 1;
    }

    if literal_start < bytes.len() {
        tokens.push(Token::Literal(&template[literal_start..]));
    }

    tokens
}

/// Returns the parameter names of `template` in order of appearance.
///
/// Repeated names are kept; when such a template matches, the value of the later
/// segment wins.
pub fn param_names(template: &str) -> Vec<String> {
    names_of(&tokenize(template))
}

fn names_of(tokens: &[Token<'_>]) -> Vec<String> {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Param(name) => Some((*name).to_owned()),
            Token::Literal(_) => None,
        })
        .collect()
}

impl Pattern {
    /// Compiles `template`.
    ///
    /// Fails only when the resulting matcher exceeds the regex engine's size limit.
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        let tokens = tokenize(template);

        let mut source = String::with_capacity(template.len() + 2);
        source.push('^');
        for token in &tokens {
            match token {
                Token::Literal(text) => source.push_str(&regex::escape(text)),
                Token::Param(_) => source.push_str(PARAM_CAPTURE),
            }
        }
        source.push('$');

        let matcher = Regex::new(&source).map_err(|source| PatternError::Compile {
            template: template.to_owned(),
            source,
        })?;

        Ok(Self {
            template: template.to_owned(),
            matcher,
            names: names_of(&tokens),
        })
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Parameter names in template order.
    pub fn param_names(&self) -> &[String] {
        &self.names
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    /// Matches `path` in full and binds each capture to its parameter name.
    pub fn at<'a>(&'a self, path: &'a str) -> Option<Params<'a>> {
        let captures = self.matcher.captures(path)?;

        let bound = self
            .names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                captures
                    .get(i + 1)
                    .map(|value| (name.as_str(), value.as_str()))
            })
            .collect();

        Some(Params { bound })
    }
}

/// Parameters bound by a successful match, in template order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params<'a> {
    bound: Vec<(&'a str, &'a str)>,
}

impl<'a> Params<'a> {
    /// Returns the value bound to `name`. For repeated names the last binding wins.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.bound
            .iter()
            .rev()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.bound.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}
