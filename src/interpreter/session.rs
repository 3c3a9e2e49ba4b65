use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

use crate::error::ExpandError;

pub const DEFAULT_INTERPRETER: &str = "py";
pub const DEFAULT_TEMP_PATH: &str = "__pyexpand_temp.py";

/// Everything one interpreter invocation produced. Stderr bytes are folded
/// into `output` after the stdout bytes.
#[derive(Debug, Clone)]
pub struct Capture {
    pub output: Vec<u8>,
    pub exit_code: u32,
}

/// Runs generated programs through the external interpreter via a temp file.
#[derive(Debug, Clone)]
pub struct Interpreter {
    command: Vec<String>,
    temp_path: PathBuf,
}

impl Interpreter {
    /// Interpreter from the environment: `PYEXPAND_INTERPRETER` split into
    /// command words, falling back to `py` when unset or unparseable.
    pub fn from_env() -> Self {
        let command = env::var("PYEXPAND_INTERPRETER")
            .ok()
            .and_then(|raw| shlex::split(&raw))
            .filter(|words| !words.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_INTERPRETER.to_string()]);
        Self {
            command,
            temp_path: PathBuf::from(DEFAULT_TEMP_PATH),
        }
    }

    pub fn with_command(mut self, command: Vec<String>) -> Self {
        if !command.is_empty() {
            self.command = command;
        }
        self
    }

    pub fn with_temp_path(mut self, temp_path: impl Into<PathBuf>) -> Self {
        self.temp_path = temp_path.into();
        self
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Write `program` to the temp file and run the interpreter on it.
    ///
    /// Stdin is inherited; stdout and stderr are piped. Stdout is drained on
    /// this thread while a helper thread drains stderr, so a child filling
    /// both pipes cannot wedge either side; stderr is appended only after
    /// stdout reached end-of-stream, keeping stdout bytes first.
    pub fn eval(&self, program: &[u8]) -> Result<Capture, ExpandError> {
        self.write_program(program)
            .map_err(|source| ExpandError::TempWrite {
                path: self.temp_path.clone(),
                source,
            })?;

        let launch_failed = |source| ExpandError::InterpreterLaunch {
            command: self.command.join(" "),
            source,
        };

        let mut child = Command::new(&self.command[0])
            .args(&self.command[1..])
            .arg(&self.temp_path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(launch_failed)?;

        let mut stdout = child.stdout.take().expect("no stdout pipe");
        let mut stderr = child.stderr.take().expect("no stderr pipe");

        let stderr_thread = thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf);
            buf
        });

        let mut output = Vec::new();
        let mut chunk = [0u8; 512];
        loop {
            match stdout.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => output.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }

        let stderr_bytes = stderr_thread.join().unwrap_or_default();
        output.extend_from_slice(&stderr_bytes);

        let status = child.wait().map_err(launch_failed)?;
        let exit_code = status.code().unwrap_or(-1) as u32;
        debug!(exit_code, bytes = output.len(), "interpreter finished");

        Ok(Capture { output, exit_code })
    }

    /// Remove the temp program file. Missing file is fine.
    pub fn cleanup(&self) {
        let _ = fs::remove_file(&self.temp_path);
    }

    fn write_program(&self, program: &[u8]) -> io::Result<()> {
        let mut file = fs::File::create(&self.temp_path)?;
        file.write_all(program)?;
        file.write_all(b"\n")?;
        Ok(())
    }
}
