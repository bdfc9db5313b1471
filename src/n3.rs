//! Notation3 / Turtle grammar.
//!
//! Follows the structure of the N3 grammar (statements, property lists,
//! object lists, path expressions), without trying to validate it. Formulas
//! (`{ ... }`) re-enter the root context, so they nest arbitrarily deep.
use crate::{
	grammar::{self, include, Item, Language, RuleDef, StackOp},
	registry::LexerInfo,
	Category,
};

/// Notation3 grammar context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Context {
	/// Statements (document level, or inside a formula).
	Root,

	/// Predicates of a subject.
	PropertyList,

	/// Objects of a predicate.
	ObjectList,

	/// Collection items, up to the closing `)`.
	List,

	/// Symbols after `@forSome` or `@forAll`.
	SymbolList,

	/// Optional `@lang` or `^^type` after a string literal.
	Datatype,

	/// Optional path continuation after an expression.
	PathTail,

	/// Path item after `!` or `.`.
	PathTailExpression,

	/// Whitespace and comments, included by the other contexts.
	Whitespace,
}

impl grammar::Context for Context {
	const ROOT: Self = Self::Root;

	const ALL: &'static [Self] = &[
		Self::Root,
		Self::PropertyList,
		Self::ObjectList,
		Self::List,
		Self::SymbolList,
		Self::Datatype,
		Self::PathTail,
		Self::PathTailExpression,
	];

	fn name(&self) -> &'static str {
		match self {
			Self::Root => "root",
			Self::PropertyList => "propertyList",
			Self::ObjectList => "objectList",
			Self::List => "list",
			Self::SymbolList => "symbolList",
			Self::Datatype => "datatype",
			Self::PathTail => "pathtail",
			Self::PathTailExpression => "pathtailExpression",
			Self::Whitespace => "whitespace",
		}
	}
}

macro_rules! symbol {
	() => {
		r"(?:(?:\w[-\w]*)?:)?\w[-\w]*|(?:\w[-\w]*)?:|<[^>]*>"
	};
}

/// Qualified name or explicit URI.
const SYMBOL: &str = symbol!();

const TYPED: &str = concat!(r"\^\^(?:", symbol!(), ")");

const LANGUAGE: &str = r"@[a-z]+(?:-[a-z0-9]+)*";

/// Long (`"""`) or short (`"`) string.
const STRING: &str = r#""""(?:[^"\\]|\\.|"(?:[^"\\]|\\.)|""(?:[^"\\]|\\.))*"""|"[^"\\]*(?:\\.[^"\\]*)*""#;

const FLOAT: &str = r"[-+]?[0-9]+\.[0-9]+(?:[eE][-+]?[0-9]+)?|[-+]?[0-9]+[eE][-+]?[0-9]+";

const RATIONAL: &str = r"[-+]?[0-9]+/[0-9]+";

const INTEGER: &str = r"[-+]?[0-9]+";

const QUICK_VARIABLE: &str = r"\?\w+";

/// First character of a path item.
const PATH_ITEM_START: &str = r#"[\w:<"?(\[{@+-]"#;

/// Path item (RDF term) rules.
///
/// The matched item gets `continuation` and a path tail pushed; nested
/// structures push their own context on top of that. Only symbols use the
/// `symbol` category, so that subjects, predicates and objects are told apart.
fn expression(symbol: Category, continuation: &[StackOp<Context>]) -> Vec<Item<Context>> {
	let then = |nested: Option<Context>| {
		let mut ops = continuation.to_vec();
		ops.push(StackOp::Push(Context::PathTail));
		ops.extend(nested.map(StackOp::Push));
		ops
	};

	vec![
		RuleDef::new(r"\(", Category::Punctuation)
			.then(then(Some(Context::List)))
			.into(),
		RuleDef::new(r"\[", Category::Punctuation)
			.then(then(Some(Context::PropertyList)))
			.into(),
		RuleDef::new(r"\{", Category::Punctuation)
			.then(then(Some(Context::Root)))
			.into(),
		RuleDef::new(r"@false|@true", Category::KeywordConstant)
			.then(then(None))
			.into(),
		RuleDef::new(STRING, Category::String)
			.then(then(Some(Context::Datatype)))
			.into(),
		RuleDef::new(FLOAT, Category::NumberFloat)
			.then(then(None))
			.into(),
		RuleDef::new(RATIONAL, Category::NumberRational)
			.then(then(None))
			.into(),
		RuleDef::new(INTEGER, Category::NumberInteger)
			.then(then(None))
			.into(),
		RuleDef::new(QUICK_VARIABLE, Category::NameVariable)
			.then(then(None))
			.into(),
		RuleDef::new(SYMBOL, symbol).then(then(None)).into(),
	]
}

/// Notation3 language.
pub struct Notation3;

impl Language for Notation3 {
	type Context = Context;

	const INFO: &'static LexerInfo = &LexerInfo {
		name: "N3",
		aliases: &["n3", "turtle"],
		filenames: &["*.n3", "*.ttl", "*.NT"],
		mimetypes: &["text/rdf+n3", "application/x-turtle", "application/n3"],
	};

	fn rules(context: Context) -> Vec<Item<Context>> {
		match context {
			Context::Whitespace => vec![
				RuleDef::new(r"#.*", Category::Comment).into(),
				RuleDef::new(r"\s+", Category::PlainText).into(),
			],
			Context::Root => {
				let mut rules = vec![
					include(Context::Whitespace),
					RuleDef::by_groups(
						r"(@(?:prefix|base))(\s*)(?:(\w*:)(\s+))?(<[^>]*>\s*\.)",
						&[
							Category::Keyword,
							Category::PlainText,
							Category::NameVariable,
							Category::PlainText,
							Category::NameNamespace,
						],
					)
					.into(),
					RuleDef::by_groups(
						r"(@keywords)((?:\s*\w+\s*,)*\s*\w+)",
						&[Category::Keyword, Category::PlainText],
					)
					.into(),
					RuleDef::new(r"@forSome|@forAll", Category::NameClass)
						.push(Context::SymbolList)
						.into(),
					RuleDef::new(r"\}", Category::Punctuation).pop().into(),
				];
				rules.extend(expression(
					Category::NameClass,
					&[StackOp::Push(Context::PropertyList)],
				));
				rules
			}
			Context::PropertyList => {
				let mut rules = vec![
					include(Context::Whitespace),
					RuleDef::new(r";", Category::Punctuation).into(),
					RuleDef::new(r"<=|=>|=", Category::Operator)
						.push(Context::ObjectList)
						.into(),
					RuleDef::new(r"@?a", Category::Operator)
						.followed_by(r"\s")
						.push(Context::ObjectList)
						.into(),
					RuleDef::new(r"\.", Category::Punctuation).pop().into(),
					RuleDef::new(r"\]", Category::Punctuation).pop().into(),
					RuleDef::peek(r"\}").pop().into(),
				];
				rules.extend(expression(
					Category::NameFunction,
					&[StackOp::Push(Context::ObjectList)],
				));
				rules
			}
			Context::ObjectList => {
				let mut rules = vec![
					include(Context::Whitespace),
					RuleDef::new(r",", Category::Punctuation).into(),
					RuleDef::peek(r";").pop().into(),
					RuleDef::peek(r"\.").pop().into(),
					RuleDef::peek(r"\]").pop().into(),
					RuleDef::peek(r"\}").pop().into(),
				];
				rules.extend(expression(Category::NameAttribute, &[]));
				rules
			}
			Context::List => vec![
				include(Context::ObjectList),
				RuleDef::new(r"\)", Category::Punctuation).pop().into(),
			],
			Context::SymbolList => vec![
				include(Context::Whitespace),
				RuleDef::new(r",", Category::Punctuation).into(),
				RuleDef::new(SYMBOL, Category::NameVariable).into(),
				RuleDef::new(r".", Category::Punctuation).pop().into(),
			],
			Context::Datatype => vec![
				RuleDef::new(LANGUAGE, Category::NameAttribute).pop().into(),
				RuleDef::new(TYPED, Category::NameAttribute).pop().into(),
				RuleDef::fallback().pop().into(),
			],
			Context::PathTail => vec![
				RuleDef::new(r"[!.]", Category::Operator)
					.followed_by(PATH_ITEM_START)
					.push(Context::PathTailExpression)
					.into(),
				RuleDef::fallback().pop().into(),
			],
			Context::PathTailExpression => expression(Category::NameFunction, &[StackOp::Pop]),
		}
	}
}
