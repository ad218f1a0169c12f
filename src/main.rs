use std::env;
use std::io::{self, Write};
use std::process;

use colored::Colorize;

use re2nfa::compiler;
use re2nfa::graphviz::Graphviz;
use re2nfa::utils::RenderFlags;

fn parse_options() -> RenderFlags {
    let mut flags = RenderFlags::NO_FLAG;
    for option in env::args().skip(1) {
        match option.as_str() {
            "--keep-dot" => flags |= RenderFlags::KEEP_DOT,
            "--view" => flags |= RenderFlags::OPEN_VIEWER,
            "--debug" => flags |= RenderFlags::DEBUG,
            unknown => {
                eprintln!("unknown option `{}`", unknown);
                eprintln!("usage: re2nfa [--keep-dot] [--view] [--debug]");
                process::exit(1);
            }
        }
    }
    flags
}

fn read_expression() -> io::Result<String> {
    print!("Enter a Regular Expression: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

fn main() {
    let flags = parse_options();

    let line = match read_expression() {
        Ok(line) => line,
        Err(err) => {
            eprintln!("could not read the expression: {}", err);
            process::exit(2);
        }
    };
    let expression = line.trim_end_matches(&['\r', '\n'][..]);

    let nfa = match compiler::compile(expression) {
        Ok(nfa) => nfa,
        Err(err) => {
            eprintln!("{}", err);
            if let Some(position) = err.position() {
                eprintln!(" | {}", expression);
                eprintln!(" | {}{}", " ".repeat(position), "^".green().bold());
            }
            process::exit(1);
        }
    };

    match Graphviz::new(flags).render(&nfa, &format!("{}_nfa", expression)) {
        Ok(image_path) => println!("{} {}", "rendered".green(), image_path.display()),
        Err(err) => {
            eprintln!("rendering failed: {}", err);
            process::exit(2);
        }
    }
}
