use swlexers::{Category, Meta, SparqlLexer};

use Category::*;

fn significant(text: &str) -> Vec<(Category, &str)> {
	let lexer = SparqlLexer::new().unwrap();
	lexer
		.scan(text)
		.map(|Meta(token, _)| (token.category, token.text))
		.filter(|(category, _)| *category != PlainText)
		.collect()
}

#[test]
fn prologue() {
	assert_eq!(
		significant("PREFIX foaf: <http://xmlns.com/foaf/0.1/>\nbase <http://example.org/>"),
		[
			(Keyword, "PREFIX"),
			(NameNamespace, "foaf"),
			(Punctuation, ":"),
			(NameNamespace, "<http://xmlns.com/foaf/0.1/>"),
			(Keyword, "base"),
			(NameNamespace, "<http://example.org/>"),
		]
	);
}

#[test]
fn select_query() {
	assert_eq!(
		significant("SELECT ?s WHERE { ?s a foaf:Person . } LIMIT 5"),
		[
			(Keyword, "SELECT"),
			(NameVariable, "?s"),
			(Keyword, "WHERE"),
			(Punctuation, "{"),
			(NameVariable, "?s"),
			(Keyword, "a"),
			(NameNamespace, "foaf"),
			(Punctuation, ":"),
			(NameAttribute, "Person"),
			(Punctuation, "."),
			(Punctuation, "}"),
			(Keyword, "LIMIT"),
			(NumberInteger, "5"),
		]
	);
}

#[test]
fn multi_word_keywords() {
	assert_eq!(
		significant("GROUP BY ?x ORDER  BY DESC(?y) INSERT DATA"),
		[
			(Keyword, "GROUP BY"),
			(NameVariable, "?x"),
			(Keyword, "ORDER  BY"),
			(Keyword, "DESC"),
			(Punctuation, "("),
			(NameVariable, "?y"),
			(Punctuation, ")"),
			(Keyword, "INSERT DATA"),
		]
	);
}

#[test]
fn functions_and_operators() {
	assert_eq!(
		significant("FILTER (STRLEN(?n) >= 2 && !BOUND($m) || ?n != \"x\")"),
		[
			(Keyword, "FILTER"),
			(Punctuation, "("),
			(NameFunction, "STRLEN"),
			(Punctuation, "("),
			(NameVariable, "?n"),
			(Punctuation, ")"),
			(Operator, ">="),
			(NumberInteger, "2"),
			(Operator, "&&"),
			(Operator, "!"),
			(NameFunction, "BOUND"),
			(Punctuation, "("),
			(NameVariable, "$m"),
			(Punctuation, ")"),
			(Operator, "||"),
			(NameVariable, "?n"),
			(Operator, "!="),
			(String, "\"x\""),
			(Punctuation, ")"),
		]
	);
}

#[test]
fn literals() {
	assert_eq!(
		significant("\"chat\"@fr 'it''s' \"\"\"long\n\"text\" \"\"\"^^xsd:string 1.5 .5 2e3 true"),
		[
			(String, "\"chat\""),
			(NameAttribute, "@fr"),
			(String, "'it'"),
			(String, "'s'"),
			(String, "\"\"\"long\n\"text\" \"\"\""),
			(Operator, "^^"),
			(NameNamespace, "xsd"),
			(Punctuation, ":"),
			(NameAttribute, "string"),
			(NumberFloat, "1.5"),
			(NumberFloat, ".5"),
			(NumberFloat, "2e3"),
			(KeywordConstant, "true"),
		]
	);
}

#[test]
fn keywords_are_not_prefixes() {
	assert_eq!(
		significant("select:x a:b"),
		[
			(NameNamespace, "select"),
			(Punctuation, ":"),
			(NameAttribute, "x"),
			(NameNamespace, "a"),
			(Punctuation, ":"),
			(NameAttribute, "b"),
		]
	);
}

#[test]
fn blank_nodes_and_comments() {
	assert_eq!(
		significant("_:b0 ?p ?o # done"),
		[
			(NameVariable, "_:b0"),
			(NameVariable, "?p"),
			(NameVariable, "?o"),
			(Comment, "# done"),
		]
	);
}

#[test]
fn unknown_words_are_errors() {
	assert_eq!(
		significant("SELECT §"),
		[(Keyword, "SELECT"), (Error, "§")]
	);
}
