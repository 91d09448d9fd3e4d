use std::collections::HashSet;
use std::io;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use colored::Colorize;

use brainflow::codegen::codegen::CodeGenerator;
use brainflow::codegen::listing::ListingEmitter;
use brainflow::codegen::Backend;
use brainflow::interpreter::program_interpreter::ProgramInterpreter;
use brainflow::interpreter::Runtime;
use brainflow::lexer::lexer::Lexer;
use brainflow::lexer::TokenKind;

/// Brainfuck compiler: lowers source into a structured control-flow
/// program, then prints or runs it
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The file to operate on
    #[arg()]
    file: String,

    #[arg(value_enum)]
    commands: Vec<Commands>,

    /// Abort a run after this many interpreter steps
    #[arg(short, long)]
    step_limit: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Hash, PartialEq, Eq)]
enum Commands {
    /// Output the lexer tokens
    Tokens,
    /// Output the ast
    Ast,
    /// Output the compiled program as a listing
    Listing,
    /// Run the compiled program in the interpreter backend
    Run,
}

fn render_token(token: &TokenKind) -> &str {
    match token {
        TokenKind::MoveRight => ">",
        TokenKind::MoveLeft => "<",
        TokenKind::Increment => "+",
        TokenKind::Decrement => "-",
        TokenKind::Write => ".",
        TokenKind::Read => ",",
        TokenKind::LoopStart => "[",
        TokenKind::LoopEnd => "]",
        TokenKind::Eof => "\n",
        TokenKind::Comment(c) => c.as_str(),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let commands: HashSet<Commands> = HashSet::from_iter(args.commands);

    let text = match std::fs::read_to_string(&args.file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{}: {}: {}", "Error".red(), args.file, e);
            return ExitCode::FAILURE;
        }
    };

    println!("Compiling {}", args.file);

    println!("{}", "Starting lexing".blue());
    let now = Instant::now();
    let tokens = match Lexer::new(&text).collect_results() {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            return ExitCode::FAILURE;
        }
    };
    println!("{} {:.2?}", "Finished lexing in".green(), now.elapsed());

    if commands.contains(&Commands::Tokens) {
        for token in tokens.iter() {
            print!("{}", render_token(token));
        }
        println!();
    }

    println!("{}", "Starting parsing".blue());
    let now = Instant::now();
    let ast = match brainflow::parser::parser::Parser::new(&tokens).parse_program() {
        Ok(ast) => ast,
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            return ExitCode::FAILURE;
        }
    };
    println!("{} {:.2?}", "Finished parsing in".green(), now.elapsed());

    if commands.contains(&Commands::Ast) {
        println!("{:#?}", ast);
    }

    println!("{}", "Starting lowering".blue());
    let now = Instant::now();
    let program = CodeGenerator::new().lower(&ast);
    println!(
        "{} {} loops in {:.2?}",
        "Finished lowering with".green(),
        program.loop_count(),
        now.elapsed()
    );

    if commands.contains(&Commands::Listing) {
        match ListingEmitter::new().consume(&program) {
            Ok(listing) => print!("{}", listing),
            Err(never) => match never {},
        }
    }

    if commands.contains(&Commands::Run) {
        println!("{}", "Starting interpreter".blue());
        let now = Instant::now();

        let runtime = Runtime::new(Box::new(io::stdin()), Box::new(io::stdout()));
        let mut interpreter = match args.step_limit {
            Some(limit) => ProgramInterpreter::with_step_limit(runtime, limit),
            None => ProgramInterpreter::new(runtime),
        };
        let status = match interpreter.run(&program) {
            Ok(status) => status,
            Err(e) => {
                eprintln!("{}: {}", "Error".red(), e);
                return ExitCode::FAILURE;
            }
        };

        println!();
        println!(
            "{} {:.2?}",
            "Finished interpreter in".green(),
            now.elapsed()
        );

        // the compiled program's return value becomes our exit status
        return ExitCode::from(status as u8);
    }

    ExitCode::SUCCESS
}
