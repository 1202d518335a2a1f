use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::fault::Fault;

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseEnumError {
    pub value: String,
    pub enum_name: &'static str,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Failed to parse \"{}\" as {}.",
            &self.value, &self.enum_name
        )
    }
}

impl Error for ParseEnumError {}

/// Instruction set of the interpreted language.
///
/// `var` is a variable reference, `symb` a variable or literal, `label`
/// a jump target and `type` one of the type names `int|string|bool`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Opcode {
    //  Mnemonic     | Operands          | Effect
    //---------------+-------------------+---------------------------------------------
    // Frames and variables
    MOVE,        // | var symb          | Copy symb into var
    CREATEFRAME, // |                   | Replace the temporary frame with an empty one
    PUSHFRAME,   // |                   | Move the temporary frame onto the local stack
    POPFRAME,    // |                   | Move the local stack top back to temporary
    DEFVAR,      // | var               | Declare var, uninitialised
    //---------------+-------------------+---------------------------------------------
    // Calls and the data stack
    CALL,        // | label             | Push the next instruction index, jump
    RETURN,      // |                   | Pop an instruction index and jump to it
    PUSHS,       // | symb              | Push symb onto the data stack
    POPS,        // | var               | Pop the data stack into var
    //---------------+-------------------+---------------------------------------------
    // Arithmetic
    ADD,         // | var symb symb     | Integer addition
    SUB,         // | var symb symb     | Integer subtraction
    MUL,         // | var symb symb     | Integer multiplication
    IDIV,        // | var symb symb     | Integer division, floored; zero divisor faults
    //---------------+-------------------+---------------------------------------------
    // Comparison
    LT,          // | var symb symb     | Less-than on equal non-nil types
    GT,          // | var symb symb     | Greater-than on equal non-nil types
    EQ,          // | var symb symb     | Equality; nil equals only nil
    //---------------+-------------------+---------------------------------------------
    // Boolean
    AND,         // | var symb symb     | Logical and
    OR,          // | var symb symb     | Logical or
    NOT,         // | var symb          | Logical negation
    //---------------+-------------------+---------------------------------------------
    // Conversions
    INT2CHAR,    // | var symb          | Code point value to one-character string
    STRI2INT,    // | var symb symb     | Code point value of the character at an index
    //---------------+-------------------+---------------------------------------------
    // Input and output
    READ,        // | var type          | Read one line, convert to the given type
    WRITE,       // | symb              | Write symb to program output
    DPRINT,      // | symb              | Write symb to the error stream
    BREAK,       // |                   | Write interpreter state to the error stream
    //---------------+-------------------+---------------------------------------------
    // Strings
    CONCAT,      // | var symb symb     | String concatenation
    STRLEN,      // | var symb          | String length in code points
    GETCHAR,     // | var symb symb     | One-character string at an index
    SETCHAR,     // | var symb symb     | Replace the character at an index in var
    //---------------+-------------------+---------------------------------------------
    // Types
    TYPE,        // | var symb          | Type name of symb; empty if uninitialised
    //---------------+-------------------+---------------------------------------------
    // Control flow
    LABEL,       // | label             | Jump target; no effect when executed
    JUMP,        // | label             | Unconditional jump
    JUMPIFEQ,    // | label symb symb   | Jump when the operands are equal
    JUMPIFNEQ,   // | label symb symb   | Jump when the operands are not equal
    EXIT,        // | symb              | Stop with the given status code, 0 to 49
}

impl FromStr for Opcode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Opcode, ParseEnumError> {
        match s {
            "MOVE" => Ok(Opcode::MOVE),
            "CREATEFRAME" => Ok(Opcode::CREATEFRAME),
            "PUSHFRAME" => Ok(Opcode::PUSHFRAME),
            "POPFRAME" => Ok(Opcode::POPFRAME),
            "DEFVAR" => Ok(Opcode::DEFVAR),
            "CALL" => Ok(Opcode::CALL),
            "RETURN" => Ok(Opcode::RETURN),
            "PUSHS" => Ok(Opcode::PUSHS),
            "POPS" => Ok(Opcode::POPS),
            "ADD" => Ok(Opcode::ADD),
            "SUB" => Ok(Opcode::SUB),
            "MUL" => Ok(Opcode::MUL),
            "IDIV" => Ok(Opcode::IDIV),
            "LT" => Ok(Opcode::LT),
            "GT" => Ok(Opcode::GT),
            "EQ" => Ok(Opcode::EQ),
            "AND" => Ok(Opcode::AND),
            "OR" => Ok(Opcode::OR),
            "NOT" => Ok(Opcode::NOT),
            "INT2CHAR" => Ok(Opcode::INT2CHAR),
            "STRI2INT" => Ok(Opcode::STRI2INT),
            "READ" => Ok(Opcode::READ),
            "WRITE" => Ok(Opcode::WRITE),
            "DPRINT" => Ok(Opcode::DPRINT),
            "BREAK" => Ok(Opcode::BREAK),
            "CONCAT" => Ok(Opcode::CONCAT),
            "STRLEN" => Ok(Opcode::STRLEN),
            "GETCHAR" => Ok(Opcode::GETCHAR),
            "SETCHAR" => Ok(Opcode::SETCHAR),
            "TYPE" => Ok(Opcode::TYPE),
            "LABEL" => Ok(Opcode::LABEL),
            "JUMP" => Ok(Opcode::JUMP),
            "JUMPIFEQ" => Ok(Opcode::JUMPIFEQ),
            "JUMPIFNEQ" => Ok(Opcode::JUMPIFNEQ),
            "EXIT" => Ok(Opcode::EXIT),
            _ => Err(ParseEnumError {
                value: s.to_string(),
                enum_name: "Opcode",
            }),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Declared type of an instruction argument.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ArgType {
    Int,
    String,
    Bool,
    Nil,
    Var,
    Label,
    Type,
}

impl FromStr for ArgType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<ArgType, ParseEnumError> {
        match s {
            "int" => Ok(ArgType::Int),
            "string" => Ok(ArgType::String),
            "bool" => Ok(ArgType::Bool),
            "nil" => Ok(ArgType::Nil),
            "var" => Ok(ArgType::Var),
            "label" => Ok(ArgType::Label),
            "type" => Ok(ArgType::Type),
            _ => Err(ParseEnumError {
                value: s.to_string(),
                enum_name: "ArgType",
            }),
        }
    }
}

/// One instruction argument: its declared type and the raw element text.
///
/// Both parts stay raw here. The declared type is matched against
/// [`ArgType`] and literal text parsed into a value only when the
/// operand is evaluated, so a malformed argument in an instruction that
/// never runs does not fault.
#[derive(Clone, PartialEq, Debug)]
pub struct Argument {
    pub argtype: String,
    pub text: String,
}

impl Argument {
    pub fn new(argtype: &str, text: &str) -> Argument {
        Argument {
            argtype: argtype.to_string(),
            text: text.to_string(),
        }
    }
}

/// A decoded instruction: its ordering key, upper-cased opcode text and
/// argument slots.
///
/// The opcode text is matched against the [`Opcode`] set when the
/// instruction is dispatched; an unknown opcode faults only if execution
/// reaches it.
#[derive(Clone, PartialEq, Debug)]
pub struct Instruction {
    pub order: i64,
    pub opcode: String,
    args: [Option<Argument>; 3],
}

impl Instruction {
    pub fn new(order: i64, opcode: &str) -> Instruction {
        Instruction {
            order,
            opcode: opcode.to_string(),
            args: [None, None, None],
        }
    }

    /// Fills the argument slot at `index` (0 for `arg1` through 2 for
    /// `arg3`), replacing any previous content.
    pub fn set_arg(&mut self, index: usize, arg: Argument) {
        self.args[index] = Some(arg);
    }

    /// The argument at `index`. An absent slot means the instruction does
    /// not have the shape its opcode requires, which is a structure fault
    /// surfaced at the point of use.
    pub fn arg(&self, index: usize) -> Result<&Argument, Fault> {
        self.args
            .get(index)
            .and_then(|slot| slot.as_ref())
            .ok_or(Fault::BadStructure)
    }
}
