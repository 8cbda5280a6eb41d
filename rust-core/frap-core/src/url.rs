//! # Reverse URL Generation
//!
//! Maps endpoint names to URL patterns and builds URLs from them.
//!
//! Patterns are validated when registered: braces must balance and every
//! placeholder needs a name. Resolving checks the supplied values against
//! the pattern's placeholders, so a typo in either fails loudly instead of
//! producing a half-filled URL.

use crate::error::{Error, Result};
use crate::types::{parse_placeholder, Placeholder, UrlValues};
use std::collections::HashMap;
use tracing::warn;

/// One segment of a parsed URL pattern
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Placeholder(Placeholder),
}

/// A registered URL rule: endpoint name plus its parsed pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRule {
    /// Symbolic endpoint name (e.g. "login")
    pub endpoint: String,
    /// Original pattern (e.g. "/users/{id:int}")
    pub pattern: String,
    pieces: Vec<Piece>,
}

impl UrlRule {
    /// Parse a pattern into a rule
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrlRule` for unbalanced braces, empty
    /// placeholder names or unknown placeholder types.
    pub fn new(endpoint: impl Into<String>, pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let pieces = parse_pattern(&pattern)?;
        Ok(Self {
            endpoint: endpoint.into(),
            pattern,
            pieces,
        })
    }

    /// Placeholders in order of appearance
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.pieces.iter().filter_map(|p| match p {
            Piece::Placeholder(ph) => Some(ph),
            Piece::Literal(_) => None,
        })
    }

    /// Build a URL by substituting `values` into the pattern
    ///
    /// # Errors
    ///
    /// - `Error::MissingUrlValue` if a placeholder has no value
    /// - `Error::UnexpectedUrlValue` if a value names no placeholder
    /// - `Error::UrlValueType` if a typed placeholder gets the wrong type
    pub fn build(&self, values: &UrlValues) -> Result<String> {
        for name in values.names() {
            if !self.placeholders().any(|p| p.name == name) {
                return Err(Error::UnexpectedUrlValue {
                    endpoint: self.endpoint.clone(),
                    name: name.to_string(),
                });
            }
        }

        let mut url = String::with_capacity(self.pattern.len());
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => url.push_str(text),
                Piece::Placeholder(ph) => {
                    let value = values.get(&ph.name).ok_or_else(|| Error::MissingUrlValue {
                        endpoint: self.endpoint.clone(),
                        name: ph.name.clone(),
                    })?;
                    if !ph.param_type.accepts(value) {
                        return Err(Error::UrlValueType {
                            name: ph.name.clone(),
                            expected: ph.param_type.type_name(),
                            actual: value.type_name(),
                        });
                    }
                    url.push_str(&value.to_string());
                }
            }
        }
        Ok(url)
    }
}

fn parse_pattern(pattern: &str) -> Result<Vec<Piece>> {
    let invalid = |reason: &str| Error::InvalidUrlRule {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    };

    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let mut inner = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') => return Err(invalid("nested '{'")),
                        Some(ch) => inner.push(ch),
                        None => return Err(invalid("unclosed '{'")),
                    }
                }
                let placeholder = parse_placeholder(&inner)
                    .ok_or_else(|| invalid("empty placeholder name or unknown type"))?;
                if !literal.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                }
                pieces.push(Piece::Placeholder(placeholder));
            }
            '}' => return Err(invalid("unmatched '}'")),
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    Ok(pieces)
}

/// Endpoint name to URL rule registry
#[derive(Debug, Clone, Default)]
pub struct UrlRegistry {
    rules: HashMap<String, UrlRule>,
}

impl UrlRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `pattern` under `endpoint`
    ///
    /// Registering an endpoint twice replaces the earlier rule.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrlRule` if the pattern is malformed.
    pub fn register(&mut self, endpoint: &str, pattern: &str) -> Result<()> {
        let rule = UrlRule::new(endpoint, pattern)?;
        if let Some(previous) = self.rules.insert(endpoint.to_string(), rule) {
            warn!(
                endpoint = %endpoint,
                previous = %previous.pattern,
                pattern = %pattern,
                "URL rule overwritten"
            );
        }
        Ok(())
    }

    /// Build the URL for `endpoint`
    ///
    /// # Errors
    ///
    /// Returns `Error::EndpointNotFound` for an unknown endpoint, or any
    /// substitution error from [`UrlRule::build`].
    pub fn resolve(&self, endpoint: &str, values: &UrlValues) -> Result<String> {
        self.rules
            .get(endpoint)
            .ok_or_else(|| Error::EndpointNotFound {
                endpoint: endpoint.to_string(),
            })?
            .build(values)
    }

    /// Look up a rule by endpoint
    #[must_use]
    pub fn get(&self, endpoint: &str) -> Option<&UrlRule> {
        self.rules.get(endpoint)
    }

    /// Number of registered endpoints
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if no endpoint is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
