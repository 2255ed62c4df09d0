pub mod lang;

pub use lang::{Interpreter, Value, run};
