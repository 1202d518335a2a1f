//! Loader for the XML representation of IPPcode22 programs.
//!
//! The main entry point is [`load`], which accepts the XML source text
//! and produces an executable [`Program`](../ippvm/program/struct.Program.html).
//! Parsing the document is delegated to [roxmltree]; everything this
//! crate adds is the mapping from the element tree onto the instruction
//! model and the structural validation that goes with it.
//!
//! Faults are reported through the shared
//! [`Fault`](../ippvm/fault/enum.Fault.html) taxonomy: input that is not
//! well-formed XML is `MalformedXml`, any well-formed document that does
//! not describe a program is `BadStructure`, and a duplicate label
//! surfaces as `Semantic` from the program table.
//!
//! [roxmltree]: https://docs.rs/roxmltree/

use ippvm::{Argument, Fault, Instruction, Program};
use roxmltree::{Document, Node};

/// Value the root element's `language` attribute must carry.
pub const LANGUAGE: &str = "IPPcode22";

/// Loads a program from its XML source text.
pub fn load(source: &str) -> Result<Program, Fault> {
    let document = Document::parse(source).map_err(|_| Fault::MalformedXml)?;
    load_document(&document)
}

fn load_document(document: &Document) -> Result<Program, Fault> {
    let root = document.root_element();

    if root.tag_name().name() != "program" {
        return Err(Fault::BadStructure);
    }
    if root.attribute("language") != Some(LANGUAGE) {
        return Err(Fault::BadStructure);
    }

    let mut instructions = Vec::new();
    for node in root.children().filter(|node| node.is_element()) {
        if node.tag_name().name() != "instruction" {
            return Err(Fault::BadStructure);
        }
        instructions.push(decode_instruction(&node)?);
    }

    Program::new(instructions)
}

fn decode_instruction(node: &Node) -> Result<Instruction, Fault> {
    let order = node
        .attribute("order")
        .ok_or(Fault::BadStructure)?
        .parse::<i64>()
        .map_err(|_| Fault::BadStructure)?;

    // Only the attribute's presence is checked here; whether the
    // upper-cased text names a real opcode is decided at dispatch.
    let opcode = node
        .attribute("opcode")
        .ok_or(Fault::BadStructure)?
        .to_uppercase();

    let mut instruction = Instruction::new(order, &opcode);

    for child in node.children().filter(|node| node.is_element()) {
        let index = match child.tag_name().name() {
            "arg1" => 0,
            "arg2" => 1,
            "arg3" => 2,
            _ => return Err(Fault::BadStructure),
        };
        instruction.set_arg(index, decode_argument(&child)?);
    }

    Ok(instruction)
}

fn decode_argument(node: &Node) -> Result<Argument, Fault> {
    let argtype = node.attribute("type").ok_or(Fault::BadStructure)?;

    // A self-closing argument element carries the empty string.
    Ok(Argument::new(argtype, node.text().unwrap_or("")))
}
