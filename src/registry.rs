//! Lexer registration and lookup.
//!
//! Every language advertises a short name, aliases, file name patterns and
//! MIME types, so that a host tool can find the right lexer for a buffer.
use crate::{
	grammar::{Context, Grammar, Language},
	lexing::{Options, Scanner},
	n3::Notation3,
	sparql::Sparql,
	Category, Error,
};
use locspan::{Meta, Span};
use std::path::Path;

/// Lexer metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LexerInfo {
	/// Display name.
	pub name: &'static str,

	/// Short names, the first one being the canonical one.
	pub aliases: &'static [&'static str],

	/// File name patterns (`*.ext` or exact names).
	pub filenames: &'static [&'static str],

	pub mimetypes: &'static [&'static str],
}

impl LexerInfo {
	/// Checks the name against the aliases, ignoring case.
	pub fn matches_alias(&self, name: &str) -> bool {
		self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
	}

	/// Checks a file name against the file name patterns.
	///
	/// Patterns are case sensitive: `*.NT` does not match `data.nt`.
	pub fn matches_filename(&self, filename: &str) -> bool {
		self.filenames
			.iter()
			.any(|pattern| match pattern.strip_prefix('*') {
				Some(suffix) => filename.ends_with(suffix),
				None => filename == *pattern,
			})
	}

	pub fn matches_mimetype(&self, mimetype: &str) -> bool {
		let mimetype = mimetype.split(';').next().unwrap_or_default().trim();
		self.mimetypes
			.iter()
			.any(|m| m.eq_ignore_ascii_case(mimetype))
	}
}

/// Every registered lexer.
pub const LEXERS: &[&LexerInfo] = &[Notation3::INFO, Sparql::INFO];

/// Compiled lexer of a language.
pub struct Lexer<L: Language> {
	grammar: Grammar<L::Context>,
	options: Options,
}

impl<L: Language> Lexer<L> {
	/// Compiles the language rule tables.
	pub fn new() -> Result<Self, Error> {
		Ok(Self {
			grammar: Grammar::compile::<L>()?,
			options: Options::default(),
		})
	}

	pub fn with_options(mut self, options: Options) -> Self {
		self.options = options;
		self
	}

	pub fn info(&self) -> &'static LexerInfo {
		L::INFO
	}

	pub fn options(&self) -> Options {
		self.options
	}

	pub fn grammar(&self) -> &Grammar<L::Context> {
		&self.grammar
	}

	/// Starts a fresh scan of `text`.
	pub fn scan<'a>(&self, text: &'a str) -> Scanner<'_, 'a, L::Context> {
		Scanner::with_options(&self.grammar, text, self.options)
	}
}

/// Token with the context stack given by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Highlight<'a> {
	pub category: Category,
	pub text: &'a str,
	pub stack: Vec<&'static str>,
}

/// Lexer of any registered language.
pub enum Highlighter {
	Notation3(Lexer<Notation3>),
	Sparql(Lexer<Sparql>),
}

impl Highlighter {
	/// Finds the lexer registered under the given short name.
	pub fn by_name(name: &str) -> Result<Self, Error> {
		Self::find(|info| info.matches_alias(name), name)
	}

	/// Finds the lexer for the given file, using its name only.
	pub fn for_filename(path: impl AsRef<Path>) -> Result<Self, Error> {
		let path = path.as_ref();
		let filename = path
			.file_name()
			.and_then(|name| name.to_str())
			.unwrap_or_default();
		Self::find(|info| info.matches_filename(filename), &path.display().to_string())
	}

	pub fn for_mimetype(mimetype: &str) -> Result<Self, Error> {
		Self::find(|info| info.matches_mimetype(mimetype), mimetype)
	}

	fn find(f: impl Fn(&LexerInfo) -> bool, what: &str) -> Result<Self, Error> {
		if f(Notation3::INFO) {
			Ok(Self::Notation3(Lexer::new()?))
		} else if f(Sparql::INFO) {
			Ok(Self::Sparql(Lexer::new()?))
		} else {
			Err(Error::UnknownLexer(what.to_string()))
		}
	}

	pub fn with_options(self, options: Options) -> Self {
		match self {
			Self::Notation3(lexer) => Self::Notation3(lexer.with_options(options)),
			Self::Sparql(lexer) => Self::Sparql(lexer.with_options(options)),
		}
	}

	pub fn info(&self) -> &'static LexerInfo {
		match self {
			Self::Notation3(lexer) => lexer.info(),
			Self::Sparql(lexer) => lexer.info(),
		}
	}

	/// Scans `text` to the end.
	pub fn highlight<'a>(&self, text: &'a str) -> Vec<Meta<Highlight<'a>, Span>> {
		match self {
			Self::Notation3(lexer) => collect(lexer.scan(text)),
			Self::Sparql(lexer) => collect(lexer.scan(text)),
		}
	}
}

fn collect<'a, C: Context>(scanner: Scanner<'_, 'a, C>) -> Vec<Meta<Highlight<'a>, Span>> {
	scanner
		.map(|Meta(token, span)| {
			Meta(
				Highlight {
					category: token.category,
					text: token.text,
					stack: token.stack.iter().map(Context::name).collect(),
				},
				span,
			)
		})
		.collect()
}
