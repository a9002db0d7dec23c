use std::{env, fs, path::Path};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use stmtc::bytecode::disasm::print_unit;
use stmtc::frontend::lexer::Lexer;
use stmtc::frontend::token_dumper::TokenDumper;
use stmtc::{Compiler, Session, SessionConfig};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let tokens_only = args.contains(&"--tokens".to_string());
    let no_color = args.contains(&"--no-color".to_string());
    let pretty = args.contains(&"--pretty".to_string());
    let bytecode = args.contains(&"--bc".to_string()) || args.contains(&"--bytecode".to_string());
    let trace = args.contains(&"--trace".to_string());
    let image = flag_value(&args, "--image");

    init_tracing(trace);

    // first non-flag argument that is not a flag's value is the filename
    let filename = args
        .iter()
        .skip(1)
        .find(|a| !a.starts_with('-') && Some(a.as_str()) != image);

    let Some(filename) = filename else {
        print_usage();
        std::process::exit(1);
    };

    if tokens_only {
        match fs::read_to_string(filename) {
            Ok(source) => dump_tokens(&source, no_color, pretty),
            Err(e) => {
                eprintln!("Failed to read '{}': {}", filename, e);
                std::process::exit(1);
            }
        }
        return;
    }

    let config = SessionConfig {
        trace_bytecode: trace,
        ..SessionConfig::default()
    };
    compile_program(filename, config, bytecode, image);
}

fn init_tracing(trace: bool) {
    let default = if trace { "stmtc=debug" } else { "stmtc=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn dump_tokens(source: &str, no_color: bool, pretty: bool) {
    let mut lexer = Lexer::new(source);

    match lexer.tokenize() {
        Ok(tokens) => {
            let mut dumper = TokenDumper::new();

            if no_color {
                dumper = dumper.no_color();
            }
            if pretty {
                dumper = dumper.pretty();
            }

            dumper.dump(&tokens);
        }
        Err(e) => {
            eprintln!("Lexer error: {}", e);
            std::process::exit(1);
        }
    }
}

fn compile_program(filename: &str, config: SessionConfig, bytecode: bool, image: Option<&str>) {
    let mut session = Session::new(config);

    let name = match Compiler::new(&mut session).compile_from_file(Path::new(filename)) {
        Ok(name) => name,
        Err(e) => {
            eprintln!("Compile error: {}", e);
            std::process::exit(1);
        }
    };

    let Some(unit) = session.unit(&name) else {
        eprintln!("Compile error: unit '{}' was not registered", name);
        std::process::exit(1);
    };

    if bytecode {
        print_unit(unit);
    }

    if let Some(path) = image {
        let bytes = match unit.to_image() {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Failed to encode '{}': {}", name, e);
                std::process::exit(1);
            }
        };
        if let Err(e) = fs::write(path, &bytes) {
            eprintln!("Failed to write '{}': {}", path, e);
            std::process::exit(1);
        }
        println!("{}: {} bytes written to {}", name, bytes.len(), path);
    }

    if !bytecode && image.is_none() {
        println!("{}: {} instructions", name, unit.code().len());
    }
}

fn print_usage() {
    println!("STMTC - statement compiler for a BASIC-style language");
    println!();
    println!("Usage:");
    println!("  stmtc <file.bas>                Compile a program unit");
    println!("  stmtc --tokens <file>           Show tokens only");
    println!("      --no-color                  Plain token dump");
    println!("      --pretty                    Show source spelling in token dump");
    println!("  stmtc --bc <file.bas>           Print the unit's disassembly");
    println!("  stmtc --image <out> <file.bas>  Write the compiled unit image");
    println!("  stmtc --trace <file.bas>        Debug logging and per-unit disassembly");
    println!("  stmtc --help, -h                Show this help");
}
