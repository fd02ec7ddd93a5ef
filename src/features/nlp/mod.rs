//! Natural language todo capture.

mod parser;

pub use parser::{parse_todo, ParsedTodo};
