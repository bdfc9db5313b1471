use clap::Parser;
use std::{
	io::{self, BufWriter, Write},
	path::PathBuf,
	process::ExitCode,
};
use swlexers::{Highlighter, Meta, Options};

/// Prints the highlighting tokens of a Notation3/Turtle or SPARQL file.
#[derive(Parser, Debug)]
#[command(name = "swlex", version, about)]
struct Args {
	/// Lexer short name (`n3`, `turtle`, `sparql`).
	///
	/// Guessed from the file name by default.
	#[arg(short, long)]
	lexer: Option<String>,

	/// MIME type of the input, used to pick the lexer.
	#[arg(short, long, conflicts_with = "lexer")]
	mimetype: Option<String>,

	/// Maximum nesting depth of the context stack.
	#[arg(long)]
	max_depth: Option<usize>,

	/// Print the context stack after each token.
	#[arg(long)]
	stack: bool,

	/// Increase log verbosity.
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,

	/// Input file.
	file: PathBuf,
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
	let highlighter = match (&args.lexer, &args.mimetype) {
		(Some(name), _) => Highlighter::by_name(name)?,
		(None, Some(mimetype)) => Highlighter::for_mimetype(mimetype)?,
		(None, None) => Highlighter::for_filename(&args.file)?,
	};

	let mut options = Options::default();
	if let Some(max_depth) = args.max_depth {
		options = options.with_max_depth(max_depth)
	}
	let highlighter = highlighter.with_options(options);

	log::info!(
		"highlighting `{}` as {}",
		args.file.display(),
		highlighter.info().name
	);
	let buffer = std::fs::read_to_string(&args.file)?;

	let stdout = io::stdout();
	let mut out = BufWriter::new(stdout.lock());
	for Meta(token, span) in highlighter.highlight(&buffer) {
		write!(
			out,
			"{}..{}\t{}\t{:?}",
			span.start(),
			span.end(),
			token.category,
			token.text
		)?;

		if args.stack {
			write!(out, "\t{}", token.stack.join(" > "))?;
		}

		writeln!(out)?;
	}

	out.flush()?;
	Ok(())
}

fn main() -> ExitCode {
	let args = Args::parse();
	stderrlog::new()
		.modules([module_path!(), "swlexers"])
		.verbosity(args.verbose as usize + 1)
		.init()
		.ok();

	match run(&args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			log::error!("{e}");
			ExitCode::FAILURE
		}
	}
}
