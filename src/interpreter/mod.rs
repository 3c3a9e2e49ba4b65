mod session;

pub use session::{Capture, Interpreter, DEFAULT_INTERPRETER, DEFAULT_TEMP_PATH};
