use std::convert::TryFrom;

use num_integer::Integer;

use crate::fault::Fault;
use crate::frame::Frames;
use crate::instruction::{ArgType, Argument, Instruction, Opcode};
use crate::io::Io;
use crate::program::Program;
use crate::value::Value;
use crate::Int;

/// Outcome of dispatching one instruction.
enum Step {
    Next,
    Stop(i32),
}

/// The execution engine: instruction pointer, frames, data stack and
/// call stack, plus the program's IO streams.
///
/// `run` drives the fetch/dispatch loop until the instruction pointer
/// passes the end of the program (status 0), EXIT supplies a status, or
/// a fault terminates execution.
pub struct Machine<'io> {
    io: Io<'io>,
    ip: usize,
    frames: Frames,
    data_stack: Vec<Value>,
    call_stack: Vec<usize>,
}

impl<'io> Machine<'io> {
    pub fn new(io: Io<'io>) -> Machine<'io> {
        Machine {
            io,
            ip: 0,
            frames: Frames::new(),
            data_stack: Vec::new(),
            call_stack: Vec::new(),
        }
    }

    pub fn run(&mut self, program: &Program) -> Result<i32, Fault> {
        loop {
            let instruction = match program.fetch(self.ip) {
                Some(instruction) => instruction,
                None => return Ok(0),
            };
            self.ip += 1;

            match self.execute(program, instruction)? {
                Step::Next => {}
                Step::Stop(code) => return Ok(code),
            }
        }
    }

    fn execute(&mut self, program: &Program, instruction: &Instruction) -> Result<Step, Fault> {
        // An unrecognised opcode is a structure fault, discovered only
        // when the instruction is actually dispatched.
        let opcode = instruction
            .opcode
            .parse::<Opcode>()
            .map_err(|_| Fault::BadStructure)?;

        match opcode {
            Opcode::MOVE => {
                let value = self.value_of(instruction.arg(1)?)?;
                self.frames.set(&instruction.arg(0)?.text, value)?;
            }

            Opcode::CREATEFRAME => self.frames.create_temporary(),

            Opcode::PUSHFRAME => self.frames.push_temporary()?,

            Opcode::POPFRAME => self.frames.pop_local()?,

            Opcode::DEFVAR => self.frames.define(&instruction.arg(0)?.text)?,

            Opcode::CALL => {
                // `ip` has already advanced, so this saves the return site.
                self.call_stack.push(self.ip);
                self.ip = program.label(&instruction.arg(0)?.text)?;
            }

            Opcode::RETURN => {
                self.ip = self.call_stack.pop().ok_or(Fault::NoValue)?;
            }

            Opcode::PUSHS => {
                let value = self.value_of(instruction.arg(0)?)?;
                self.data_stack.push(value);
            }

            Opcode::POPS => {
                let target = &instruction.arg(0)?.text;
                let value = self.data_stack.pop().ok_or(Fault::NoValue)?;
                self.frames.set(target, value)?;
            }

            Opcode::ADD | Opcode::SUB | Opcode::MUL | Opcode::IDIV => {
                let lhs = self.value_of(instruction.arg(1)?)?;
                let rhs = self.value_of(instruction.arg(2)?)?;
                let (a, b) = int_operands(lhs, rhs)?;

                let result = match opcode {
                    Opcode::ADD => a.wrapping_add(b),
                    Opcode::SUB => a.wrapping_sub(b),
                    Opcode::MUL => a.wrapping_mul(b),
                    _ => {
                        if b == 0 {
                            return Err(Fault::BadOperand);
                        }
                        Integer::div_floor(&a, &b)
                    }
                };

                self.frames.set(&instruction.arg(0)?.text, Value::Int(result))?;
            }

            Opcode::LT | Opcode::GT | Opcode::EQ => {
                let lhs = self.value_of(instruction.arg(1)?)?;
                let rhs = self.value_of(instruction.arg(2)?)?;

                let result = match opcode {
                    Opcode::LT => lhs.less(&rhs)?,
                    Opcode::GT => lhs.greater(&rhs)?,
                    _ => lhs.equals(&rhs)?,
                };

                self.frames.set(&instruction.arg(0)?.text, Value::Bool(result))?;
            }

            Opcode::AND | Opcode::OR => {
                let lhs = self.value_of(instruction.arg(1)?)?;
                let rhs = self.value_of(instruction.arg(2)?)?;
                let (a, b) = bool_operands(lhs, rhs)?;

                let result = if opcode == Opcode::AND {
                    a && b
                } else {
                    a || b
                };

                self.frames.set(&instruction.arg(0)?.text, Value::Bool(result))?;
            }

            Opcode::NOT => {
                let value = self.value_of(instruction.arg(1)?)?;
                let operand = match value {
                    Value::Bool(b) => b,
                    _ => return Err(Fault::BadType),
                };
                self.frames
                    .set(&instruction.arg(0)?.text, Value::Bool(!operand))?;
            }

            Opcode::INT2CHAR => {
                let value = self.value_of(instruction.arg(1)?)?;
                let code = int_operand(value)?;
                let c = u32::try_from(code)
                    .ok()
                    .and_then(std::char::from_u32)
                    .ok_or(Fault::BadString)?;
                self.frames
                    .set(&instruction.arg(0)?.text, Value::String(c.to_string()))?;
            }

            Opcode::STRI2INT => {
                let lhs = self.value_of(instruction.arg(1)?)?;
                let rhs = self.value_of(instruction.arg(2)?)?;
                let string = string_operand(lhs)?;
                let position = int_operand(rhs)?;
                if position < 0 {
                    return Err(Fault::BadString);
                }
                let c = string
                    .chars()
                    .nth(position as usize)
                    .ok_or(Fault::BadString)?;
                self.frames
                    .set(&instruction.arg(0)?.text, Value::Int(c as u32 as Int))?;
            }

            Opcode::READ => {
                let target = instruction.arg(0)?;
                let argtype = instruction.arg(1)?;

                let value = match self.io.read_line()? {
                    None => Value::Nil,
                    Some(line) => match argtype.text.as_str() {
                        "int" => match line.parse::<Int>() {
                            Ok(number) => Value::Int(number),
                            Err(_) => Value::Nil,
                        },
                        "string" => Value::String(line),
                        "bool" => Value::Bool(line.to_lowercase() == "true"),
                        _ => return Err(Fault::BadStructure),
                    },
                };

                self.frames.set(&target.text, value)?;
            }

            Opcode::WRITE => {
                let value = self.value_of(instruction.arg(0)?)?;
                let text = value.display()?;
                self.io.write(&text)?;
            }

            Opcode::DPRINT => {
                let value = self.value_of(instruction.arg(0)?)?;
                let text = value.display()?;
                self.io.write_error(&text)?;
            }

            Opcode::BREAK => {
                let state = format!(
                    "break at order {}: ip={} data-stack={} call-stack={} local-frames={} tf={}\n",
                    instruction.order,
                    self.ip,
                    self.data_stack.len(),
                    self.call_stack.len(),
                    self.frames.local_depth(),
                    if self.frames.has_temporary() {
                        "present"
                    } else {
                        "absent"
                    },
                );
                self.io.write_error(&state)?;
            }

            Opcode::CONCAT => {
                let lhs = self.value_of(instruction.arg(1)?)?;
                let rhs = self.value_of(instruction.arg(2)?)?;
                let (a, b) = string_operands(lhs, rhs)?;
                self.frames
                    .set(&instruction.arg(0)?.text, Value::String(a + &b))?;
            }

            Opcode::STRLEN => {
                let string = string_operand(self.value_of(instruction.arg(1)?)?)?;
                let length = string.chars().count() as Int;
                self.frames
                    .set(&instruction.arg(0)?.text, Value::Int(length))?;
            }

            Opcode::GETCHAR => {
                let lhs = self.value_of(instruction.arg(1)?)?;
                let rhs = self.value_of(instruction.arg(2)?)?;
                let string = string_operand(lhs)?;
                let position = int_operand(rhs)?;
                if position < 0 {
                    return Err(Fault::BadString);
                }
                let c = string
                    .chars()
                    .nth(position as usize)
                    .ok_or(Fault::BadString)?;
                self.frames
                    .set(&instruction.arg(0)?.text, Value::String(c.to_string()))?;
            }

            Opcode::SETCHAR => {
                // All three operands are evaluated before any type or
                // range check runs.
                let target = instruction.arg(0)?;
                let dst = self.value_of(target)?;
                let pos = self.value_of(instruction.arg(1)?)?;
                let src = self.value_of(instruction.arg(2)?)?;

                let current = string_operand(dst)?;
                let position = int_operand(pos)?;
                let source = string_operand(src)?;

                if position < 0 {
                    return Err(Fault::BadString);
                }
                let replacement = source.chars().next().ok_or(Fault::BadString)?;

                let position = position as usize;
                if position >= current.chars().count() {
                    return Err(Fault::BadString);
                }

                let replaced: String = current
                    .chars()
                    .enumerate()
                    .map(|(i, c)| if i == position { replacement } else { c })
                    .collect();
                self.frames.set(&target.text, Value::String(replaced))?;
            }

            Opcode::TYPE => {
                let value = self.value_of_any(instruction.arg(1)?)?;
                self.frames.set(
                    &instruction.arg(0)?.text,
                    Value::String(value.type_name().to_string()),
                )?;
            }

            Opcode::LABEL => {}

            Opcode::JUMP => {
                self.ip = program.label(&instruction.arg(0)?.text)?;
            }

            Opcode::JUMPIFEQ | Opcode::JUMPIFNEQ => {
                let lhs = self.value_of(instruction.arg(1)?)?;
                let rhs = self.value_of(instruction.arg(2)?)?;

                // The label must exist whether or not the branch is taken.
                let target = program.label(&instruction.arg(0)?.text)?;

                let wanted = opcode == Opcode::JUMPIFEQ;
                if lhs.equals(&rhs)? == wanted {
                    self.ip = target;
                }
            }

            Opcode::EXIT => {
                let value = self.value_of(instruction.arg(0)?)?;
                let code = int_operand(value)?;
                if !(0..50).contains(&code) {
                    return Err(Fault::BadOperand);
                }
                return Ok(Step::Stop(code as i32));
            }
        }

        Ok(Step::Next)
    }

    /// Evaluates a symbol operand: a literal parses to its value, a
    /// variable reference reads through the frame manager.
    fn value_of(&self, arg: &Argument) -> Result<Value, Fault> {
        self.evaluate(arg, false)
    }

    /// TYPE's variant: an uninitialised variable is a legal operand.
    fn value_of_any(&self, arg: &Argument) -> Result<Value, Fault> {
        self.evaluate(arg, true)
    }

    fn evaluate(&self, arg: &Argument, allow_uninit: bool) -> Result<Value, Fault> {
        let argtype = arg
            .argtype
            .parse::<ArgType>()
            .map_err(|_| Fault::BadStructure)?;

        match argtype {
            ArgType::Int | ArgType::String | ArgType::Bool | ArgType::Nil => {
                Value::parse(argtype, &arg.text)
            }
            ArgType::Var => self.frames.get(&arg.text, allow_uninit),
            ArgType::Label | ArgType::Type => Err(Fault::BadStructure),
        }
    }
}

fn int_operand(value: Value) -> Result<Int, Fault> {
    match value {
        Value::Int(i) => Ok(i),
        _ => Err(Fault::BadType),
    }
}

fn int_operands(lhs: Value, rhs: Value) -> Result<(Int, Int), Fault> {
    Ok((int_operand(lhs)?, int_operand(rhs)?))
}

fn bool_operands(lhs: Value, rhs: Value) -> Result<(bool, bool), Fault> {
    match (lhs, rhs) {
        (Value::Bool(a), Value::Bool(b)) => Ok((a, b)),
        _ => Err(Fault::BadType),
    }
}

fn string_operand(value: Value) -> Result<String, Fault> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(Fault::BadType),
    }
}

fn string_operands(lhs: Value, rhs: Value) -> Result<(String, String), Fault> {
    match (lhs, rhs) {
        (Value::String(a), Value::String(b)) => Ok((a, b)),
        _ => Err(Fault::BadType),
    }
}
