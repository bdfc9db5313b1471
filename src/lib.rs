//! Syntax highlighting lexers for the semantic web notations:
//! Notation3/Turtle (and N-Triples files) and SPARQL.
//!
//! A lexer turns a text buffer into a flat sequence of tokens, each one
//! tagged with a highlighting [`Category`] and located by a byte [`Span`].
//! There is no parsing involved: the output is meant to be colorized by an
//! editor or a rendering tool.
//!
//! Lexers are defined as rule tables (see [`grammar`]): each grammar context
//! owns an ordered list of regular expressions, and the [`Scanner`] keeps an
//! explicit stack of contexts to follow the nested structures of Notation3
//! (formulas, property lists, collections).
//!
//! ## Basic usage
//!
//! ```rust
//! use locspan::Meta;
//! use swlexers::Notation3Lexer;
//!
//! let lexer = Notation3Lexer::new().unwrap();
//! for Meta(token, span) in lexer.scan("ex:a ex:b \"hello\"@en .") {
//!   println!("{span:?}: {} {:?}", token.category, token.text);
//! }
//! ```
//!
//! When the language is only known by name, file name or MIME type, use a
//! [`Highlighter`]:
//!
//! ```rust
//! use swlexers::Highlighter;
//!
//! let highlighter = Highlighter::for_filename("query.rq").unwrap();
//! assert_eq!(highlighter.info().name, "SPARQL");
//! ```
use std::fmt;

pub mod grammar;
pub mod lexing;
pub mod n3;
pub mod registry;
pub mod sparql;

pub use lexing::{ContextStack, Options, Scanner, Token};
pub use locspan::{Meta, Span};
pub use registry::{Highlight, Highlighter, Lexer, LexerInfo};

/// Notation3/Turtle lexer.
pub type Notation3Lexer = Lexer<n3::Notation3>;

/// SPARQL lexer.
pub type SparqlLexer = Lexer<sparql::Sparql>;

/// Highlighting category of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
	Keyword,
	KeywordConstant,
	Operator,
	Punctuation,
	String,
	NumberInteger,
	NumberFloat,
	NumberRational,
	NameVariable,
	NameFunction,
	NameClass,
	NameAttribute,
	NameNamespace,
	Comment,
	PlainText,
	Error,
}

impl Category {
	pub const ALL: [Self; 16] = [
		Self::Keyword,
		Self::KeywordConstant,
		Self::Operator,
		Self::Punctuation,
		Self::String,
		Self::NumberInteger,
		Self::NumberFloat,
		Self::NumberRational,
		Self::NameVariable,
		Self::NameFunction,
		Self::NameClass,
		Self::NameAttribute,
		Self::NameNamespace,
		Self::Comment,
		Self::PlainText,
		Self::Error,
	];

	/// Dotted name of the category, as used by highlighting style sheets.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Keyword => "Keyword",
			Self::KeywordConstant => "Keyword.Constant",
			Self::Operator => "Operator",
			Self::Punctuation => "Punctuation",
			Self::String => "String",
			Self::NumberInteger => "Number.Integer",
			Self::NumberFloat => "Number.Float",
			Self::NumberRational => "Number.Rational",
			Self::NameVariable => "Name.Variable",
			Self::NameFunction => "Name.Function",
			Self::NameClass => "Name.Class",
			Self::NameAttribute => "Name.Attribute",
			Self::NameNamespace => "Name.Namespace",
			Self::Comment => "Comment",
			Self::PlainText => "Text",
			Self::Error => "Error",
		}
	}

	pub fn is_error(&self) -> bool {
		matches!(self, Self::Error)
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.as_str().fmt(f)
	}
}

/// Lexer construction and lookup error.
#[derive(Debug)]
pub enum Error {
	/// A rule pattern is not a valid regular expression.
	InvalidPattern {
		context: &'static str,
		pattern: &'static str,
		source: regex::Error,
	},

	/// A context includes itself, directly or not.
	IncludeCycle(&'static str),

	/// No lexer is registered under the given name, file name or MIME type.
	UnknownLexer(String),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::InvalidPattern {
				context,
				pattern,
				source,
			} => write!(f, "invalid pattern `{pattern}` in context `{context}`: {source}"),
			Self::IncludeCycle(context) => write!(f, "context `{context}` includes itself"),
			Self::UnknownLexer(name) => write!(f, "no lexer found for `{name}`"),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::InvalidPattern { source, .. } => Some(source),
			_ => None,
		}
	}
}
