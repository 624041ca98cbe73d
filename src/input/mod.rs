//! Input reading from command-line words and stdin.

mod reader;

pub use reader::{InputReader, MAX_INPUT_SIZE};
