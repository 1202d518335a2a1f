#[macro_use]
extern crate clap;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::process;

use clap::Arg;

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("source")
                .short("s")
                .long("source")
                .takes_value(true)
                .value_name("FILE")
                .help("Program XML to interpret (defaults to standard input)"),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .value_name("FILE")
                .help("Input read by the interpreted program (defaults to standard input)"),
        )
        .get_matches();

    let source_path = matches.value_of("source");
    let input_path = matches.value_of("input");

    // Both streams cannot come from standard input at once.
    if source_path.is_none() && input_path.is_none() {
        eprintln!("At least one of --source and --input is required.");
        return 10;
    }

    let source = match source_path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(_) => {
                eprintln!("Source file cannot be opened.");
                return 11;
            }
        },
        None => {
            let mut source = String::new();
            match io::stdin().read_to_string(&mut source) {
                Ok(_) => source,
                Err(_) => {
                    eprintln!("Source cannot be read from standard input.");
                    return 11;
                }
            }
        }
    };

    let mut input: Box<dyn BufRead> = match input_path {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(_) => {
                eprintln!("Input file cannot be opened.");
                return 11;
            }
        },
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut output = stdout.lock();
    let mut error = stderr.lock();

    ipprun::run_program(&source, &mut input, &mut output, &mut error)
}
