//! Rule tables.
//!
//! A language is a set of contexts, each one owning an ordered list of
//! rules. A rule is a regular expression matched at the cursor, an action
//! assigning categories to the matched text, and a stack transition. Rule
//! lists are plain data: they are compiled once into a [`Grammar`] and then
//! interpreted by the [`Scanner`](crate::Scanner).
use crate::{registry::LexerInfo, Category, Error};
use regex::Regex;
use std::{collections::HashMap, fmt, hash::Hash};

/// Grammar context.
pub trait Context: 'static + Copy + Eq + Hash + fmt::Debug {
	/// Sentinel context at the bottom of every context stack.
	const ROOT: Self;

	/// Contexts the scanner can be in.
	///
	/// Contexts that are only ever included in other contexts may be left out.
	const ALL: &'static [Self];

	fn name(&self) -> &'static str;
}

/// Language definition.
pub trait Language {
	type Context: Context;

	const INFO: &'static LexerInfo;

	/// Ordered rule list of the given context.
	fn rules(context: Self::Context) -> Vec<Item<Self::Context>>;
}

/// Context stack operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackOp<C> {
	Push(C),
	Pop,
}

/// Category assignment of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
	/// The whole match gets one category.
	Emit(Category),

	/// Each capture group gets its own category, in order.
	ByGroups(&'static [Category]),
}

/// Lookahead condition on the text following a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
	FollowedBy(&'static str),
	NotFollowedBy(&'static str),
}

/// Rule definition.
#[derive(Clone, Debug)]
pub struct RuleDef<C> {
	pattern: &'static str,
	action: Action,
	guard: Option<Guard>,
	transition: Vec<StackOp<C>>,
}

impl<C> RuleDef<C> {
	pub fn new(pattern: &'static str, category: Category) -> Self {
		Self {
			pattern,
			action: Action::Emit(category),
			guard: None,
			transition: Vec::new(),
		}
	}

	pub fn by_groups(pattern: &'static str, categories: &'static [Category]) -> Self {
		Self {
			pattern,
			action: Action::ByGroups(categories),
			guard: None,
			transition: Vec::new(),
		}
	}

	/// Zero-width rule, matching when the text at the cursor starts with
	/// `pattern`.
	///
	/// Nothing is consumed: only the transition is applied.
	pub fn peek(pattern: &'static str) -> Self {
		Self::new("", Category::PlainText).followed_by(pattern)
	}

	/// Zero-width rule that always matches.
	pub fn fallback() -> Self {
		Self::new("", Category::PlainText)
	}

	pub fn followed_by(mut self, pattern: &'static str) -> Self {
		self.guard = Some(Guard::FollowedBy(pattern));
		self
	}

	pub fn not_followed_by(mut self, pattern: &'static str) -> Self {
		self.guard = Some(Guard::NotFollowedBy(pattern));
		self
	}

	pub fn push(mut self, context: C) -> Self {
		self.transition.push(StackOp::Push(context));
		self
	}

	pub fn pop(mut self) -> Self {
		self.transition.push(StackOp::Pop);
		self
	}

	pub fn then(mut self, ops: impl IntoIterator<Item = StackOp<C>>) -> Self {
		self.transition.extend(ops);
		self
	}

	pub fn pattern(&self) -> &'static str {
		self.pattern
	}
}

/// Rule list item.
#[derive(Clone, Debug)]
pub enum Item<C> {
	Rule(RuleDef<C>),

	/// Every rule of another context, in place.
	Include(C),
}

impl<C> From<RuleDef<C>> for Item<C> {
	fn from(rule: RuleDef<C>) -> Self {
		Self::Rule(rule)
	}
}

pub fn include<C>(context: C) -> Item<C> {
	Item::Include(context)
}

/// Compiled lookahead.
#[derive(Clone, Debug)]
struct Lookahead {
	regex: Regex,
	negated: bool,
}

impl Lookahead {
	/// End of input is never "followed by" anything.
	fn allows(&self, rest: &str) -> bool {
		self.regex.is_match(rest) != self.negated
	}
}

/// Compiled rule.
#[derive(Clone, Debug)]
pub struct Rule<C> {
	regex: Regex,
	action: Action,
	lookahead: Option<Lookahead>,
	transition: Vec<StackOp<C>>,
}

impl<C> Rule<C> {
	/// Matches the rule at the start of `input`.
	///
	/// Returns the length of the match, which may be zero.
	pub fn find(&self, input: &str) -> Option<usize> {
		let end = self.regex.find(input)?.end();
		match &self.lookahead {
			Some(lookahead) if !lookahead.allows(&input[end..]) => None,
			_ => Some(end),
		}
	}

	pub fn regex(&self) -> &Regex {
		&self.regex
	}

	pub fn action(&self) -> Action {
		self.action
	}

	pub fn transition(&self) -> &[StackOp<C>] {
		&self.transition
	}
}

/// Compiled rule table of a language.
///
/// Immutable once compiled, so it can be shared between any number of
/// concurrent scans.
#[derive(Clone, Debug)]
pub struct Grammar<C> {
	rules: HashMap<C, Vec<Rule<C>>>,
}

impl<C: Context> Grammar<C> {
	/// Compiles the rule tables of every context of the language.
	pub fn compile<L: Language<Context = C>>() -> Result<Self, Error> {
		let mut patterns = Patterns::default();
		let mut rules = HashMap::new();

		for &context in C::ALL {
			let mut defs = Vec::new();
			flatten::<L>(context, &mut Vec::new(), &mut defs)?;

			let compiled = defs
				.into_iter()
				.map(|def| {
					let lookahead = match def.guard {
						Some(Guard::FollowedBy(p)) => Some(Lookahead {
							regex: patterns.get(context, p)?,
							negated: false,
						}),
						Some(Guard::NotFollowedBy(p)) => Some(Lookahead {
							regex: patterns.get(context, p)?,
							negated: true,
						}),
						None => None,
					};

					Ok(Rule {
						regex: patterns.get(context, def.pattern)?,
						action: def.action,
						lookahead,
						transition: def.transition,
					})
				})
				.collect::<Result<Vec<_>, Error>>()?;

			log::debug!("compiled {} rules for `{}`", compiled.len(), context.name());
			rules.insert(context, compiled);
		}

		Ok(Self { rules })
	}

	/// Ordered rules of the given context.
	pub fn rules(&self, context: C) -> &[Rule<C>] {
		self.rules.get(&context).map(Vec::as_slice).unwrap_or(&[])
	}
}

/// Resolves the includes of `context`.
fn flatten<L: Language>(
	context: L::Context,
	visiting: &mut Vec<L::Context>,
	out: &mut Vec<RuleDef<L::Context>>,
) -> Result<(), Error> {
	if visiting.contains(&context) {
		return Err(Error::IncludeCycle(context.name()));
	}

	visiting.push(context);
	for item in L::rules(context) {
		match item {
			Item::Rule(rule) => out.push(rule),
			Item::Include(other) => flatten::<L>(other, visiting, out)?,
		}
	}
	visiting.pop();

	Ok(())
}

/// Anchored regex cache.
///
/// The same pattern shows up in many contexts (shared sub-grammars), and a
/// `Regex` clone shares its compiled program.
#[derive(Default)]
struct Patterns(HashMap<&'static str, Regex>);

impl Patterns {
	fn get<C: Context>(&mut self, context: C, pattern: &'static str) -> Result<Regex, Error> {
		if let Some(regex) = self.0.get(pattern) {
			return Ok(regex.clone());
		}

		let regex = Regex::new(&format!(r"\A(?:{pattern})")).map_err(|source| {
			Error::InvalidPattern {
				context: context.name(),
				pattern,
				source,
			}
		})?;

		self.0.insert(pattern, regex.clone());
		Ok(regex)
	}
}
