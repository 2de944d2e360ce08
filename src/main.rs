use std::{env, fs::read_to_string, time::Instant};

use pyscan::{lexer::lexer::tokenize, parser::parser::parse};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        panic!("Incorrect arguments provided!");
    }

    let source = read_to_string(&args[1]).expect("Failed to read file!");

    let start = Instant::now();
    let tokens = tokenize(&source);
    println!("Tokenized in {:?} ({} tokens)", start.elapsed(), tokens.len());

    for token in &tokens {
        println!("{token}");
    }

    let parse_start = Instant::now();
    let (statements, diagnostics) = parse(tokens);
    println!(
        "Parsed in {:?} ({} statements)",
        parse_start.elapsed(),
        statements.len()
    );

    for stmt in &statements {
        println!("{stmt:?}");
    }

    for diagnostic in &diagnostics {
        println!("warning: {diagnostic}");
    }

    println!("Total time: {:?}", start.elapsed());
}
