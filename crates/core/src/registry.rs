//! Step registry: step patterns bound to async handlers.
//!
//! Definitions are registered once, before any scenario runs, and stay
//! immutable afterwards. `Given`, `When` and `Then` are interchangeable at
//! lookup time: the [`Phase`] a definition was registered under is kept for
//! reporting, but a scenario line resolves against every definition and must
//! match exactly one of them.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pattern::StepPattern;
use crate::session::Session;

pub type BoxFut<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Handler bound to a step pattern.
pub type StepFn = for<'a> fn(&'a Session, StepArgs) -> BoxFut<'a, Result<()>>;

/// Which part of a scenario a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
	/// Precondition (`Given`).
	Given,
	/// Action (`When`).
	When,
	/// Outcome (`Then`).
	Then,
}

impl Phase {
	pub const ALL: [Phase; 3] = [Phase::Given, Phase::When, Phase::Then];

	pub fn keyword(&self) -> &'static str {
		match self {
			Phase::Given => "Given",
			Phase::When => "When",
			Phase::Then => "Then",
		}
	}
}

impl std::fmt::Display for Phase {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.keyword())
	}
}

/// Placeholder values extracted from a matched step, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepArgs(Vec<String>);

impl StepArgs {
	pub fn new(values: Vec<String>) -> Self {
		Self(values)
	}

	pub fn get(&self, index: usize) -> Result<&str> {
		self.0
			.get(index)
			.map(String::as_str)
			.ok_or(Error::MissingArgument { index })
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

pub struct StepDefinition {
	pub phase: Phase,
	pub pattern: StepPattern,
	handler: StepFn,
}

impl std::fmt::Debug for StepDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("StepDefinition")
			.field("phase", &self.phase)
			.field("pattern", &self.pattern.as_str())
			.finish_non_exhaustive()
	}
}

/// A scenario line resolved to its definition.
#[derive(Debug)]
pub struct StepMatch<'r> {
	pub definition: &'r StepDefinition,
	pub args: StepArgs,
}

impl StepMatch<'_> {
	pub async fn run(self, session: &Session) -> Result<()> {
		(self.definition.handler)(session, self.args).await
	}
}

#[derive(Debug, Default)]
pub struct StepRegistry {
	steps: Vec<StepDefinition>,
}

impl StepRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry holding the SauceDemo login bindings.
	pub fn saucedemo() -> Result<Self> {
		let mut registry = Self::new();
		crate::saucedemo::register(&mut registry)?;
		Ok(registry)
	}

	pub fn register(&mut self, phase: Phase, pattern: &str, handler: StepFn) -> Result<&mut Self> {
		// Lookup ignores the phase, so the same text under two keywords could never resolve.
		if let Some(existing) = self.steps.iter().find(|step| step.pattern.as_str() == pattern) {
			return Err(Error::DuplicateStep {
				phase: existing.phase,
				pattern: pattern.to_string(),
			});
		}

		let pattern = StepPattern::parse(pattern)?;
		self.steps.push(StepDefinition { phase, pattern, handler });
		Ok(self)
	}

	pub fn given(&mut self, pattern: &str, handler: StepFn) -> Result<&mut Self> {
		self.register(Phase::Given, pattern, handler)
	}

	pub fn when(&mut self, pattern: &str, handler: StepFn) -> Result<&mut Self> {
		self.register(Phase::When, pattern, handler)
	}

	pub fn then(&mut self, pattern: &str, handler: StepFn) -> Result<&mut Self> {
		self.register(Phase::Then, pattern, handler)
	}

	/// Resolves `text` to exactly one definition, whatever phase it was
	/// registered under. `phase` is the keyword the scenario used and only
	/// appears in errors.
	pub fn find(&self, phase: Phase, text: &str) -> Result<StepMatch<'_>> {
		let mut matches = self
			.steps
			.iter()
			.filter_map(|step| step.pattern.captures(text).map(|args| (step, args)));

		let Some((definition, args)) = matches.next() else {
			return Err(Error::UndefinedStep {
				phase,
				text: text.to_string(),
			});
		};

		let others: Vec<&StepDefinition> = matches.map(|(step, _)| step).collect();
		if !others.is_empty() {
			let patterns = std::iter::once(definition)
				.chain(others)
				.map(|step| step.pattern.to_string())
				.collect();
			return Err(Error::AmbiguousStep {
				phase,
				text: text.to_string(),
				patterns,
			});
		}

		Ok(StepMatch {
			definition,
			args: StepArgs::new(args),
		})
	}

	pub fn iter(&self) -> impl Iterator<Item = &StepDefinition> {
		self.steps.iter()
	}

	pub fn len(&self) -> usize {
		self.steps.len()
	}

	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}
}
