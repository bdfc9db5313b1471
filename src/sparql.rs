//! SPARQL grammar.
//!
//! A flat rule table: SPARQL highlighting needs no nested contexts.
use crate::{
	grammar::{self, Item, Language, RuleDef},
	registry::LexerInfo,
	Category,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Context {
	Root,
}

impl grammar::Context for Context {
	const ROOT: Self = Self::Root;
	const ALL: &'static [Self] = &[Self::Root];

	fn name(&self) -> &'static str {
		"root"
	}
}

const KEYWORDS: &str = r"(?i:select|construct|describe|ask|where|filter|group\s+by|minus|distinct|reduced|from\s+named|from|order\s+by|desc|asc|limit|offset|values|load|into|clear|drop|create|add|move|copy|insert\s+data|delete\s+data|delete\s+where|with|delete|insert|using\s+named|using|graph|default|named|all|optional|service|silent|bind|undef|union|not\s+in|in|as|having|to|prefix|base)\b";

const FUNCTIONS: &str = r"(?i:str|lang|langmatches|datatype|bound|iri|uri|bnode|rand|abs|ceil|floor|round|concat|strlen|ucase|lcase|encode_for_uri|contains|strstarts|strends|strbefore|strafter|year|month|day|hours|minutes|seconds|timezone|tz|now|uuid|struuid|md5|sha1|sha256|sha384|sha512|coalesce|if|strlang|strdt|sameterm|isiri|isuri|isblank|isliteral|isnumeric|regex|substr|replace|exists|not\s+exists|count|sum|min|max|avg|sample|group_concat|separator)\b";

const IRI: &str = r"<[^<>\x22{}|^`\\\x00-\x20]*>";

/// Keywords and function names are not prefixes of a prefixed name.
const NAME_CONTINUATION: &str = r"[:\-]";

/// SPARQL language.
pub struct Sparql;

impl Language for Sparql {
	type Context = Context;

	const INFO: &'static LexerInfo = &LexerInfo {
		name: "SPARQL",
		aliases: &["sparql"],
		filenames: &["*.rq", "*.sparql"],
		mimetypes: &["application/sparql-query"],
	};

	fn rules(context: Context) -> Vec<Item<Context>> {
		match context {
			Context::Root => vec![
				RuleDef::new(r"\s+", Category::PlainText).into(),
				RuleDef::new(r"#.*", Category::Comment).into(),
				RuleDef::by_groups(
					r"(?i:(prefix))(\s+)(\w(?:[-\w.]*[-\w])?)?(:)(\s*)(<[^<>\x22{}|^`\\\x00-\x20]*>)",
					&[
						Category::Keyword,
						Category::PlainText,
						Category::NameNamespace,
						Category::Punctuation,
						Category::PlainText,
						Category::NameNamespace,
					],
				)
				.into(),
				RuleDef::by_groups(
					r"(?i:(base))(\s+)(<[^<>\x22{}|^`\\\x00-\x20]*>)",
					&[Category::Keyword, Category::PlainText, Category::NameNamespace],
				)
				.into(),
				RuleDef::new(KEYWORDS, Category::Keyword)
					.not_followed_by(NAME_CONTINUATION)
					.into(),
				RuleDef::new(r"a\b", Category::Keyword)
					.not_followed_by(NAME_CONTINUATION)
					.into(),
				RuleDef::new(r"(?i:true|false)\b", Category::KeywordConstant)
					.not_followed_by(NAME_CONTINUATION)
					.into(),
				RuleDef::new(FUNCTIONS, Category::NameFunction)
					.not_followed_by(NAME_CONTINUATION)
					.into(),
				RuleDef::new(IRI, Category::NameNamespace).into(),
				RuleDef::new(r"_:\w(?:[-\w.]*[-\w])?", Category::NameVariable).into(),
				RuleDef::new(r"[?$]\w+", Category::NameVariable).into(),
				RuleDef::by_groups(
					r"(\w(?:[-\w.]*[-\w])?)?(:)(\w(?:[-\w.:]*[-\w:])?)?",
					&[
						Category::NameNamespace,
						Category::Punctuation,
						Category::NameAttribute,
					],
				)
				.into(),
				RuleDef::new(
					r#""""(?:[^"\\]|\\(?s:.)|"(?:[^"\\]|\\(?s:.))|""(?:[^"\\]|\\(?s:.)))*""""#,
					Category::String,
				)
				.into(),
				RuleDef::new(
					r"'''(?:[^'\\]|\\(?s:.)|'(?:[^'\\]|\\(?s:.))|''(?:[^'\\]|\\(?s:.)))*'''",
					Category::String,
				)
				.into(),
				RuleDef::new(r#""(?:[^"\\\n\r]|\\.)*""#, Category::String).into(),
				RuleDef::new(r"'(?:[^'\\\n\r]|\\.)*'", Category::String).into(),
				RuleDef::new(r"@[a-zA-Z]+(?:-[a-zA-Z0-9]+)*", Category::NameAttribute).into(),
				RuleDef::new(r"\^\^", Category::Operator).into(),
				RuleDef::new(
					r"[+-]?(?:[0-9]+\.[0-9]*[eE][+-]?[0-9]+|\.?[0-9]+[eE][+-]?[0-9]+|[0-9]*\.[0-9]+)",
					Category::NumberFloat,
				)
				.into(),
				RuleDef::new(r"[+-]?[0-9]+", Category::NumberInteger).into(),
				RuleDef::new(r"\|\||&&|!=|<=|>=|=|\*|-|\+|/|!|<|>|\^|\||\?", Category::Operator)
					.into(),
				RuleDef::new(r"[(){}.;,\[\]]", Category::Punctuation).into(),
			],
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::grammar::Grammar;

	#[test]
	fn compiles() {
		let grammar = Grammar::compile::<Sparql>().unwrap();
		assert_eq!(grammar.rules(Context::Root).len(), 22);
	}
}
