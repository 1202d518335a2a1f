use std::collections::HashMap;
use std::str::FromStr;

use crate::fault::Fault;
use crate::instruction::ParseEnumError;
use crate::value::Value;

/// A frame maps variable names to their current values.
pub type Frame = HashMap<String, Value>;

/// The addressable frame kinds of a variable reference.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FrameName {
    GF, // Global frame, lives for the whole program
    TF, // Temporary frame, absent until CREATEFRAME
    LF, // Top of the local frame stack
}

impl FromStr for FrameName {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<FrameName, ParseEnumError> {
        match s {
            "GF" => Ok(FrameName::GF),
            "TF" => Ok(FrameName::TF),
            "LF" => Ok(FrameName::LF),
            _ => Err(ParseEnumError {
                value: s.to_string(),
                enum_name: "FrameName",
            }),
        }
    }
}

// A `FRAME@NAME` reference split into its parts. Borrows the argument
// text; nothing is allocated until a variable is actually defined.
struct VarRef<'a> {
    frame: FrameName,
    name: &'a str,
}

impl<'a> VarRef<'a> {
    fn parse(text: &'a str) -> Result<VarRef<'a>, Fault> {
        let at = text.find('@').ok_or(Fault::NoFrame)?;
        let frame = text[..at].parse().map_err(|_| Fault::NoFrame)?;
        Ok(VarRef {
            frame,
            name: &text[at + 1..],
        })
    }
}

/// Variable storage: the global frame, the optional temporary frame and
/// the stack of local frames.
///
/// PUSHFRAME and POPFRAME move one owned frame between the temporary
/// role and the top of the local stack; a variable defined in TF is the
/// same storage later addressed through LF.
pub struct Frames {
    global: Frame,
    temporary: Option<Frame>,
    locals: Vec<Frame>,
}

impl Frames {
    pub fn new() -> Frames {
        Frames {
            global: Frame::new(),
            temporary: None,
            locals: Vec::new(),
        }
    }

    /// CREATEFRAME: the previous temporary frame, if any, is discarded.
    pub fn create_temporary(&mut self) {
        self.temporary = Some(Frame::new());
    }

    /// PUSHFRAME: moves the temporary frame onto the local stack.
    pub fn push_temporary(&mut self) -> Result<(), Fault> {
        let frame = self.temporary.take().ok_or(Fault::NoFrame)?;
        self.locals.push(frame);
        Ok(())
    }

    /// POPFRAME: moves the local stack top back into the temporary role.
    pub fn pop_local(&mut self) -> Result<(), Fault> {
        let frame = self.locals.pop().ok_or(Fault::NoFrame)?;
        self.temporary = Some(frame);
        Ok(())
    }

    pub fn has_temporary(&self) -> bool {
        self.temporary.is_some()
    }

    pub fn local_depth(&self) -> usize {
        self.locals.len()
    }

    /// DEFVAR: inserts the variable, uninitialised. Redefinition within
    /// the same frame is a semantic fault.
    pub fn define(&mut self, var: &str) -> Result<(), Fault> {
        let var = VarRef::parse(var)?;
        let frame = self.frame_mut(var.frame)?;
        if frame.contains_key(var.name) {
            return Err(Fault::Semantic);
        }
        frame.insert(var.name.to_string(), Value::Uninit);
        Ok(())
    }

    /// Reads a variable. `allow_uninit` is set only by TYPE; everywhere
    /// else an uninitialised slot is a missing-value fault.
    pub fn get(&self, var: &str, allow_uninit: bool) -> Result<Value, Fault> {
        let var = VarRef::parse(var)?;
        let value = self
            .frame(var.frame)?
            .get(var.name)
            .ok_or(Fault::NoVariable)?;
        if !allow_uninit && *value == Value::Uninit {
            return Err(Fault::NoValue);
        }
        Ok(value.clone())
    }

    /// Replaces the value of a declared variable.
    pub fn set(&mut self, var: &str, value: Value) -> Result<(), Fault> {
        let var = VarRef::parse(var)?;
        let slot = self
            .frame_mut(var.frame)?
            .get_mut(var.name)
            .ok_or(Fault::NoVariable)?;
        *slot = value;
        Ok(())
    }

    fn frame(&self, name: FrameName) -> Result<&Frame, Fault> {
        match name {
            FrameName::GF => Ok(&self.global),
            FrameName::TF => self.temporary.as_ref().ok_or(Fault::NoFrame),
            FrameName::LF => self.locals.last().ok_or(Fault::NoFrame),
        }
    }

    fn frame_mut(&mut self, name: FrameName) -> Result<&mut Frame, Fault> {
        match name {
            FrameName::GF => Ok(&mut self.global),
            FrameName::TF => self.temporary.as_mut().ok_or(Fault::NoFrame),
            FrameName::LF => self.locals.last_mut().ok_or(Fault::NoFrame),
        }
    }
}

impl Default for Frames {
    fn default() -> Frames {
        Frames::new()
    }
}
