use std::error::Error;
use std::fmt;

/// Terminal interpreter faults.
///
/// Every fault stops execution immediately; the kind is translated into
/// the process status code by [`exit_code`](#method.exit_code). There is
/// no recovery across instruction boundaries.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Fault {
    InputFile,    // Program input could not be read
    MalformedXml, // Source is not well-formed XML
    BadStructure, // Source XML does not describe a valid program
    Semantic,     // Duplicate label, unknown label or variable redefinition
    BadType,      // Incompatible operand types
    NoVariable,   // Access to an undeclared variable
    NoFrame,      // Access to an absent temporary or local frame
    NoValue,      // Read of an uninitialised value or an empty stack
    BadOperand,   // Illegal operand value (zero divisor, exit code range)
    BadString,    // String index or code point out of range
    Internal,     // Unclassified internal failure
}

impl Fault {
    /// Status code reported to the process environment for this fault.
    pub fn exit_code(self) -> i32 {
        match self {
            Fault::InputFile => 11,
            Fault::MalformedXml => 31,
            Fault::BadStructure => 32,
            Fault::Semantic => 52,
            Fault::BadType => 53,
            Fault::NoVariable => 54,
            Fault::NoFrame => 55,
            Fault::NoValue => 56,
            Fault::BadOperand => 57,
            Fault::BadString => 58,
            Fault::Internal => 59,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Fault::InputFile => "program input cannot be read",
            Fault::MalformedXml => "source is not well-formed XML",
            Fault::BadStructure => "source XML does not describe a valid program",
            Fault::Semantic => "duplicate label, unknown label or variable redefinition",
            Fault::BadType => "incompatible operand types",
            Fault::NoVariable => "access to an undeclared variable",
            Fault::NoFrame => "access to an absent frame",
            Fault::NoValue => "missing value",
            Fault::BadOperand => "illegal operand value",
            Fault::BadString => "illegal string operation",
            Fault::Internal => "internal error",
        })
    }
}

impl Error for Fault {}
