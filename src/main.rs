use roboscript::format::format_program;
use roboscript::{Interpreter, Parser, TraceRobot};
use std::{fs, path::PathBuf};

fn main() {
    let mut args = std::env::args().skip(1);
    let mut repl = false;
    let mut run = false;
    let mut emit_ast = false;
    let mut steps: u64 = 10_000;
    let mut file: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-r" | "--repl" => repl = true,
            "--run" => run = true,
            "--emit-ast" => emit_ast = true,
            "--steps" => {
                let value = args.next().unwrap_or_default();
                match value.parse() {
                    Ok(n) => steps = n,
                    Err(_) => {
                        eprintln!("--steps expects a number");
                        std::process::exit(64);
                    }
                }
            }
            path => {
                file = Some(PathBuf::from(path));
            }
        }
    }

    if let Some(ref path) = file {
        let src = fs::read_to_string(path).expect("failed to read file");
        if emit_ast {
            emit_ast_json(&src);
        } else if run {
            run_source(&src, steps);
        } else {
            print_source(&src);
        }
    }

    if repl || file.is_none() {
        run_repl(steps);
    }
}

fn parse_or_exit(src: &str) -> roboscript::ast::Program {
    match Parser::new(src).parse_program() {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Parse error: {e}");
            std::process::exit(65);
        }
    }
}

fn print_source(src: &str) {
    let program = parse_or_exit(src);
    print!("{}", format_program(&program));
}

fn emit_ast_json(src: &str) {
    let program = parse_or_exit(src);
    let json = serde_json::to_string_pretty(&program).expect("failed to serialize AST");
    println!("{json}");
}

fn run_source(src: &str, steps: u64) {
    let program = parse_or_exit(src);
    let mut interp = Interpreter::with_robot(TraceRobot::new()).with_step_limit(steps);
    let result = interp.run(&program);
    for action in &interp.robot.log {
        println!("{action}");
    }
    if !interp.env.is_empty() {
        println!("---");
        for (name, value) in interp.env.iter() {
            println!("${name} = {value}");
        }
    }
    if let Err(e) = result {
        eprintln!("Runtime error: {e}");
        std::process::exit(70);
    }
}

fn run_repl(steps: u64) {
    use rustyline::{error::ReadlineError, DefaultEditor};

    let mut rl = DefaultEditor::new().expect("failed to init REPL");
    let mut interp = Interpreter::with_robot(TraceRobot::new()).with_step_limit(steps);
    println!("RoboScript REPL. Ctrl-D to exit.");
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str()).ok();
                match Parser::new(&line).parse_program() {
                    Ok(program) => {
                        if let Err(e) = interp.run(&program) {
                            eprintln!("Runtime error: {e}");
                        }
                        for action in interp.robot.log.drain(..) {
                            println!("{action}");
                        }
                    }
                    Err(e) => eprintln!("Parse error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => { /* Ctrl-C: new line */ }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("REPL error: {e}");
                break;
            }
        }
    }
}

fn print_help() {
    println!("RoboScript - robot scripting language\n");
    println!("Usage: rbs [options] [file.rbs]\n");
    println!("Options:");
    println!("  --run          Execute the program against a trace robot");
    println!("  --steps <n>    Step budget for --run and the REPL (default 10000)");
    println!("  --emit-ast     Print the parsed program as JSON");
    println!("  -r, --repl     Start an interactive REPL");
    println!("  -h, --help     Show this help");
}
