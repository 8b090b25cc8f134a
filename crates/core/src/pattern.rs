//! Step patterns with typed placeholders.
//!
//! A pattern is literal step text with Cucumber-expression placeholders:
//!
//! | placeholder | matches                                   | captured value        |
//! |-------------|-------------------------------------------|-----------------------|
//! | `{string}`  | `"double"` or `'single'` quoted literal   | contents, quotes gone |
//! | `{word}`    | a run of non-whitespace                   | as written            |
//! | `{int}`     | optionally signed integer                 | as written            |
//! | `{}`        | anything                                  | as written            |
//!
//! Inside a `{string}` literal, `\"` (or `\'` between single quotes) stands
//! for the quote character itself.
//!
//! Patterns compile once to an anchored [`Regex`].

use regex::Regex;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
	String,
	Word,
	Int,
	Anonymous,
}

impl Placeholder {
	fn parse(name: &str) -> Option<Self> {
		match name {
			"string" => Some(Placeholder::String),
			"word" => Some(Placeholder::Word),
			"int" => Some(Placeholder::Int),
			"" => Some(Placeholder::Anonymous),
			_ => None,
		}
	}

	fn regex(self) -> &'static str {
		match self {
			Placeholder::String => r#"(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')"#,
			Placeholder::Word => r"(\S+)",
			Placeholder::Int => r"([-+]?\d+)",
			Placeholder::Anonymous => r"(.*)",
		}
	}
}

#[derive(Debug, Clone)]
pub struct StepPattern {
	source: String,
	regex: Regex,
	placeholders: Vec<Placeholder>,
}

impl StepPattern {
	pub fn parse(source: &str) -> Result<Self> {
		let invalid = |reason: &str| Error::InvalidPattern {
			pattern: source.to_string(),
			reason: reason.to_string(),
		};

		let mut expr = String::from("^");
		let mut placeholders = Vec::new();
		let mut rest = source;

		while let Some(open) = rest.find(['{', '}']) {
			if rest[open..].starts_with('}') {
				return Err(invalid("unmatched '}'"));
			}
			expr.push_str(&regex::escape(&rest[..open]));

			let after = &rest[open + 1..];
			let close = after.find('}').ok_or_else(|| invalid("unclosed '{'"))?;
			let name = &after[..close];
			let placeholder = Placeholder::parse(name)
				.ok_or_else(|| invalid(&format!("unknown placeholder {{{name}}}")))?;

			expr.push_str(placeholder.regex());
			placeholders.push(placeholder);
			rest = &after[close + 1..];
		}
		expr.push_str(&regex::escape(rest));
		expr.push('$');

		let regex = Regex::new(&expr).map_err(|e| invalid(&e.to_string()))?;
		Ok(Self {
			source: source.to_string(),
			regex,
			placeholders,
		})
	}

	pub fn as_str(&self) -> &str {
		&self.source
	}

	pub fn arity(&self) -> usize {
		self.placeholders.len()
	}

	/// Returns the placeholder values when `text` matches the whole pattern.
	pub fn captures(&self, text: &str) -> Option<Vec<String>> {
		let caps = self.regex.captures(text)?;
		let mut group = 1;
		let mut values = Vec::with_capacity(self.placeholders.len());

		for placeholder in &self.placeholders {
			let value = match placeholder {
				Placeholder::String => {
					let value = match (caps.get(group), caps.get(group + 1)) {
						(Some(double), _) => double.as_str().replace(r#"\""#, "\""),
						(None, Some(single)) => single.as_str().replace(r"\'", "'"),
						(None, None) => String::new(),
					};
					group += 2;
					value
				}
				_ => {
					let plain = caps.get(group).map(|m| m.as_str().to_string());
					group += 1;
					plain.unwrap_or_default()
				}
			};
			values.push(value);
		}

		Some(values)
	}

	pub fn is_match(&self, text: &str) -> bool {
		self.regex.is_match(text)
	}
}

impl std::fmt::Display for StepPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.source)
	}
}
