use crate::{
	grammar::{Action, Context, Grammar, Rule, StackOp},
	Category,
};
use decoded_char::DecodedChar;
use locspan::{Meta, Span};
use std::collections::VecDeque;

/// Scanning options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
	/// Maximum number of contexts on the stack, root included.
	///
	/// Pushes beyond this depth are ignored. Unlimited by default.
	pub max_depth: Option<usize>,
}

impl Options {
	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = Some(max_depth.max(1));
		self
	}
}

/// Stack of grammar contexts.
///
/// Never empty: the root context sits at the bottom and cannot be popped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextStack<C> {
	contexts: Vec<C>,
	max_depth: Option<usize>,
}

impl<C: Context> ContextStack<C> {
	pub fn new(max_depth: Option<usize>) -> Self {
		Self {
			contexts: vec![C::ROOT],
			max_depth,
		}
	}

	/// Active context.
	pub fn top(&self) -> C {
		self.contexts.last().copied().unwrap_or(C::ROOT)
	}

	pub fn depth(&self) -> usize {
		self.contexts.len()
	}

	pub fn is_root(&self) -> bool {
		self.contexts.len() == 1
	}

	pub fn as_slice(&self) -> &[C] {
		&self.contexts
	}

	fn accepts_push(&self, depth: usize) -> bool {
		self.max_depth.map_or(true, |max| depth < max)
	}

	/// Pushes a context, unless the maximum depth is reached.
	pub fn push(&mut self, context: C) -> bool {
		if self.accepts_push(self.depth()) {
			self.contexts.push(context);
			true
		} else {
			log::debug!("maximum depth reached, ignoring `{}`", context.name());
			false
		}
	}

	/// Pops the active context, unless it is the root.
	pub fn pop(&mut self) -> bool {
		if self.is_root() {
			log::debug!("stack underflow, staying in `{}`", self.top().name());
			false
		} else {
			self.contexts.pop();
			true
		}
	}

	pub fn apply(&mut self, ops: &[StackOp<C>]) {
		for op in ops {
			match *op {
				StackOp::Push(context) => {
					self.push(context);
				}
				StackOp::Pop => {
					self.pop();
				}
			}
		}
	}

	/// Depth of the stack after applying `ops`.
	pub fn projected_depth(&self, ops: &[StackOp<C>]) -> usize {
		ops.iter().fold(self.depth(), |depth, op| match op {
			StackOp::Push(_) if self.accepts_push(depth) => depth + 1,
			StackOp::Pop if depth > 1 => depth - 1,
			_ => depth,
		})
	}
}

/// Token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'a, C> {
	pub category: Category,

	/// Matched text.
	pub text: &'a str,

	/// Context stack right after the token, bottom first.
	pub stack: Vec<C>,
}

/// Scanner.
///
/// Changes a text buffer into a `Token` iterator, by interpreting the rule
/// table of a grammar. At each position the rules of the active context are
/// tried in order and the first match is committed. Zero-width matches are
/// only committed when they unwind the stack, and a character no rule
/// matches is emitted as an error, so the scan always terminates.
///
/// Tokens are contiguous and non-empty, and cover the whole input.
pub struct Scanner<'g, 'a, C> {
	grammar: &'g Grammar<C>,
	text: &'a str,
	pos: usize,
	stack: ContextStack<C>,
	pending: VecDeque<Meta<Token<'a, C>, Span>>,
}

impl<'g, 'a, C: Context> Scanner<'g, 'a, C> {
	pub fn new(grammar: &'g Grammar<C>, text: &'a str) -> Self {
		Self::with_options(grammar, text, Options::default())
	}

	pub fn with_options(grammar: &'g Grammar<C>, text: &'a str, options: Options) -> Self {
		Self {
			grammar,
			text,
			pos: 0,
			stack: ContextStack::new(options.max_depth),
			pending: VecDeque::new(),
		}
	}

	/// Current context stack, bottom first.
	pub fn stack(&self) -> &[C] {
		self.stack.as_slice()
	}

	/// Byte offset of the cursor.
	pub fn position(&self) -> usize {
		self.pos
	}

	/// Scans until at least one token is pending or the input is exhausted.
	fn step(&mut self) {
		let (grammar, text) = (self.grammar, self.text);
		let rest = &text[self.pos..];
		let context = self.stack.top();

		for rule in grammar.rules(context) {
			let Some(len) = rule.find(rest) else {
				continue;
			};

			if len == 0 && self.stack.projected_depth(rule.transition()) >= self.stack.depth() {
				continue;
			}

			log::trace!(
				"`{}` at {}: {:?} {:?}",
				context.name(),
				self.pos,
				&rest[..len],
				rule.transition()
			);

			let start = self.pos;
			self.pos += len;
			self.stack.apply(rule.transition());
			self.emit_match(rule, start, len);
			return;
		}

		if let Some(c) = rest.chars().next() {
			let c = DecodedChar::from_utf8(c);
			log::debug!(
				"unexpected character {:?} at {} in `{}`",
				*c,
				self.pos,
				context.name()
			);

			let start = self.pos;
			self.pos += c.len();
			self.emit(Category::Error, start, self.pos);
		}
	}

	fn emit_match(&mut self, rule: &Rule<C>, start: usize, len: usize) {
		let text = self.text;
		let end = start + len;
		match rule.action() {
			Action::Emit(category) => self.emit(category, start, end),
			Action::ByGroups(categories) => {
				let Some(captures) = rule.regex().captures(&text[start..]) else {
					self.emit(Category::PlainText, start, end);
					return;
				};

				let mut cursor = start;
				for (group, category) in captures.iter().skip(1).zip(categories) {
					if let Some(group) = group {
						let (group_start, group_end) = (start + group.start(), start + group.end());
						if group_start < cursor {
							continue;
						}

						self.emit(Category::PlainText, cursor, group_start);
						self.emit(*category, group_start, group_end);
						cursor = group_end;
					}
				}

				self.emit(Category::PlainText, cursor, end);
			}
		}
	}

	/// Queues a token, unless it is empty.
	fn emit(&mut self, category: Category, start: usize, end: usize) {
		if start < end {
			let text = self.text;
			let token = Token {
				category,
				text: &text[start..end],
				stack: self.stack.as_slice().to_vec(),
			};

			self.pending.push_back(Meta(token, Span::new(start, end)))
		}
	}
}

impl<'g, 'a, C: Context> Iterator for Scanner<'g, 'a, C> {
	type Item = Meta<Token<'a, C>, Span>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if let Some(token) = self.pending.pop_front() {
				break Some(token);
			}

			if self.pos >= self.text.len() {
				break None;
			}

			self.step()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		grammar::{include, Item, Language, RuleDef},
		registry::LexerInfo,
	};

	#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
	enum Nest {
		Root,
		Block,
		Spaces,
	}

	impl Context for Nest {
		const ROOT: Self = Self::Root;
		const ALL: &'static [Self] = &[Self::Root, Self::Block];

		fn name(&self) -> &'static str {
			match self {
				Self::Root => "root",
				Self::Block => "block",
				Self::Spaces => "spaces",
			}
		}
	}

	/// Nested `{ ... }` blocks of words, with `=name` assignments.
	struct Blocks;

	impl Language for Blocks {
		type Context = Nest;
		const INFO: &'static LexerInfo = &LexerInfo {
			name: "Blocks",
			aliases: &["blocks"],
			filenames: &[],
			mimetypes: &[],
		};

		fn rules(context: Nest) -> Vec<Item<Nest>> {
			match context {
				Nest::Spaces => vec![RuleDef::new(r"\s+", Category::PlainText).into()],
				Nest::Root => vec![
					include(Nest::Spaces),
					RuleDef::peek("!").pop().into(),
					RuleDef::new(r"\{", Category::Punctuation)
						.push(Nest::Block)
						.into(),
					RuleDef::new(r"\}", Category::Punctuation).pop().into(),
					RuleDef::new(";", Category::Punctuation).into(),
					RuleDef::by_groups(r"(=)(\w+)", &[Category::Operator, Category::NameVariable])
						.into(),
					RuleDef::new(r"\w+", Category::NameClass).into(),
				],
				Nest::Block => vec![
					include(Nest::Spaces),
					RuleDef::new(r"\{", Category::Punctuation)
						.push(Nest::Block)
						.into(),
					RuleDef::new(r"\}", Category::Punctuation).pop().into(),
					RuleDef::peek(";").pop().into(),
					RuleDef::new(r"\w+", Category::NameAttribute).into(),
				],
			}
		}
	}

	fn scan(text: &str, options: Options) -> (Vec<(Category, String)>, Vec<Nest>) {
		let grammar = Grammar::compile::<Blocks>().unwrap();
		let mut scanner = Scanner::with_options(&grammar, text, options);
		let tokens = scanner
			.by_ref()
			.map(|Meta(token, _)| (token.category, token.text.to_string()))
			.collect();
		(tokens, scanner.stack().to_vec())
	}

	#[test]
	fn nested_blocks() {
		let (tokens, stack) = scan("a { b { c } }", Options::default());
		let categories: Vec<_> = tokens
			.iter()
			.filter(|(c, _)| *c != Category::PlainText)
			.map(|(c, t)| (*c, t.as_str()))
			.collect();

		assert_eq!(
			categories,
			[
				(Category::NameClass, "a"),
				(Category::Punctuation, "{"),
				(Category::NameAttribute, "b"),
				(Category::Punctuation, "{"),
				(Category::NameAttribute, "c"),
				(Category::Punctuation, "}"),
				(Category::Punctuation, "}"),
			]
		);
		assert_eq!(stack, [Nest::Root]);
	}

	#[test]
	fn unbalanced_closing_brace_stays_in_root() {
		let (tokens, stack) = scan("} a", Options::default());
		assert_eq!(tokens[0], (Category::Punctuation, "}".to_string()));
		assert_eq!(tokens[2], (Category::NameClass, "a".to_string()));
		assert_eq!(stack, [Nest::Root]);
	}

	#[test]
	fn unmatched_characters_are_errors() {
		let (tokens, stack) = scan("a é!", Options::default());
		assert_eq!(
			tokens,
			[
				(Category::NameClass, "a".to_string()),
				(Category::PlainText, " ".to_string()),
				(Category::NameClass, "é".to_string()),
				(Category::Error, "!".to_string()),
			]
		);
		assert_eq!(stack, [Nest::Root]);

		let (tokens, _) = scan("€€", Options::default());
		assert_eq!(
			tokens,
			[
				(Category::Error, "€".to_string()),
				(Category::Error, "€".to_string()),
			]
		);
	}

	#[test]
	fn groups() {
		let (tokens, _) = scan("=x", Options::default());
		assert_eq!(
			tokens,
			[
				(Category::Operator, "=".to_string()),
				(Category::NameVariable, "x".to_string()),
			]
		);
	}

	#[test]
	fn lookahead_pops_without_consuming() {
		let (tokens, stack) = scan("{a;b", Options::default());
		assert_eq!(
			tokens,
			[
				(Category::Punctuation, "{".to_string()),
				(Category::NameAttribute, "a".to_string()),
				(Category::Punctuation, ";".to_string()),
				(Category::NameClass, "b".to_string()),
			]
		);
		assert_eq!(stack, [Nest::Root]);
	}

	#[test]
	fn zero_width_match_on_root_is_skipped() {
		let (tokens, stack) = scan("!", Options::default());
		assert_eq!(tokens, [(Category::Error, "!".to_string())]);
		assert_eq!(stack, [Nest::Root]);

		let mut stack = ContextStack::<Nest>::new(None);
		assert_eq!(stack.projected_depth(&[StackOp::Pop]), 1);
		assert!(!stack.pop());
		assert!(stack.push(Nest::Block));
		assert_eq!(stack.projected_depth(&[StackOp::Pop]), 1);
		assert_eq!(stack.projected_depth(&[StackOp::Pop, StackOp::Push(Nest::Block)]), 2);
	}

	#[test]
	fn max_depth() {
		let (_, stack) = scan("{ { {", Options::default().with_max_depth(2));
		assert_eq!(stack, [Nest::Root, Nest::Block]);

		let (_, stack) = scan("{ { {", Options::default());
		assert_eq!(stack, [Nest::Root, Nest::Block, Nest::Block, Nest::Block]);
	}

	#[test]
	fn spans_are_contiguous() {
		let grammar = Grammar::compile::<Blocks>().unwrap();
		let text = "a {b ! =c} } é";
		let mut end = 0;
		for Meta(token, span) in Scanner::new(&grammar, text) {
			assert_eq!(span.start(), end);
			assert!(span.end() > span.start());
			assert_eq!(&text[span.start()..span.end()], token.text);
			end = span.end();
		}
		assert_eq!(end, text.len());
	}
}
