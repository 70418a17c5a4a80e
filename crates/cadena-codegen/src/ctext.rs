//! Structured builders for the generated C text.
//!
//! Emission is two-phase: callers fully materialize each construct's element
//! sequence as typed records, then a single `render` pass produces the text.
//! No resolution or lookup happens during rendering, which keeps emission
//! deterministic: the same records always render the same bytes.

use std::fmt::Write;

/// A `typedef enum` with its members in final emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    /// Type name of the enumeration.
    pub name: String,
    /// Members, already ordered.
    pub members: Vec<String>,
}

impl Enumeration {
    /// Render the enumeration definition, followed by a blank line.
    pub fn render(&self) -> String {
        let mut out = String::from("typedef enum\n{\n");
        let mut members = self.members.iter().peekable();
        while let Some(member) = members.next() {
            let separator = if members.peek().is_some() { "," } else { "" };
            let _ = writeln!(out, "    {member}{separator}");
        }
        let _ = writeln!(out, "}} {};\n", self.name);
        out
    }
}

/// A C array definition with its elements in final emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticArray {
    /// Storage class and element type, e.g. `static const uint16`.
    pub decl: String,
    /// Array symbol name.
    pub name: String,
    /// Rendered elements, already ordered.
    pub elements: Vec<String>,
}

impl StaticArray {
    /// Render the array definition, followed by a blank line.
    pub fn render(&self) -> String {
        let mut out = format!("{} {}[] =\n{{\n", self.decl, self.name);
        let mut elements = self.elements.iter().peekable();
        while let Some(element) = elements.next() {
            let separator = if elements.peek().is_some() { "," } else { "" };
            let _ = writeln!(out, "    {element}{separator}");
        }
        out.push_str("};\n\n");
        out
    }
}

/// The generated-file banner comment.
pub fn banner(filename: &str, chain_name: &str) -> String {
    format!(
        "/*!\n\\file {filename}\n\\brief The {chain_name} chain. This file is generated by cadena.\n*/\n\n"
    )
}

/// Opening header guard lines for a chain header.
pub fn guard_open(chain_name: &str) -> String {
    let symbol = chain_name.to_uppercase();
    format!("#ifndef _{symbol}_H_\n#define _{symbol}_H_\n\n")
}

/// Closing header guard line for a chain header.
pub fn guard_close(chain_name: &str) -> String {
    let symbol = chain_name.to_uppercase();
    format!("#endif /* _{symbol}_H_ */\n")
}
