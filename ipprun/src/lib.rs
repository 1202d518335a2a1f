//! Glue between the loader, the execution engine and process IO.
//!
//! The binary in `main.rs` only selects the streams; everything that can
//! fault lives here so it can be exercised against in-memory buffers.

use std::io::{BufRead, Write};

use ippvm::{Io, Machine};

/// Loads and runs a program, reporting faults to the error stream.
///
/// Returns the process status code: the program's own result on normal
/// completion or EXIT, the fault's code otherwise. Output is flushed
/// before returning.
pub fn run_program(
    source: &str,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    error: &mut dyn Write,
) -> i32 {
    let result = match ippxml::load(source) {
        Ok(program) => {
            let mut machine = Machine::new(Io {
                input,
                output: &mut *output,
                error: &mut *error,
            });
            machine.run(&program)
        }
        Err(fault) => Err(fault),
    };

    let code = match result {
        Ok(code) => code,
        Err(fault) => {
            let _ = writeln!(error, "interpreter fault: {}", fault);
            fault.exit_code()
        }
    };

    let _ = output.flush();
    let _ = error.flush();

    code
}
