//! Dump the token stream or AST of an input.
//!
//! Reads a file, stdin, or interactive lines, and prints either the
//! classified tokens (`KIND:lexeme` per line) or the canonical form of
//! the parsed file.
//!
//! ```ignore
//! astdump [-i] [-t] [filename]
//! ```

use std::io::{BufRead, Read, Write};

use consish::reader::{self, Source};

const HELP: &str = "astdump [-i] [-t] <filename>
  filename: name of the file to dump the AST of.
  -i: interactive mode. Overrides filename.
  -t: tokenize instead of parse.";

fn tokenize(source: &Source) {
    for (kind, lexeme) in reader::tokens(source.cursor()) {
        if kind.is_terminal() {
            break;
        }
        println!("{}:{}", kind, lexeme);
    }
}

fn parse(source: &Source) {
    match reader::parse_file(source.cursor()) {
        Ok(file) => println!("{}", file),
        Err(err) => println!("{}", err),
    }
}

fn interactive(tokenize_mode: bool) -> std::io::Result<()> {
    let stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()?;
    for line in stdin.lines() {
        let line = line?;
        if line == "quit" {
            break;
        }
        let source = Source::new("(console)", line);
        if tokenize_mode {
            tokenize(&source);
        } else {
            parse(&source);
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
    }
    Ok(())
}

fn from_stdin() -> std::io::Result<Source> {
    let mut input = String::new();
    std::io::stdin().lock().read_to_string(&mut input)?;
    Ok(Source::new("(stdin)", input))
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() > 2 {
        eprintln!("Bad number of arguments.\n{}", HELP);
        std::process::exit(1);
    }

    let mut interact = false;
    let mut tokenize_mode = false;
    let mut fname = None;
    for arg in &args {
        match arg.as_str() {
            "-i" => interact = true,
            "-t" => tokenize_mode = true,
            other => fname = Some(other.to_owned()),
        }
    }

    if interact {
        return interactive(tokenize_mode);
    }

    let source = match fname {
        Some(name) => match Source::from_file(&name) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("Could not read {}: {}", name, err);
                std::process::exit(1);
            }
        },
        None => from_stdin()?,
    };
    if tokenize_mode {
        tokenize(&source);
    } else {
        parse(&source);
    }
    Ok(())
}
