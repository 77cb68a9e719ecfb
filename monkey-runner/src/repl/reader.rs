use std::ops::ControlFlow;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = ">> ";

pub enum ReadOutput {
    ControlFlow(ControlFlow<()>),
    Value(String),
}

pub struct Reader {
    rl: DefaultEditor,
}

impl Reader {
    pub fn new() -> Result<Self, ReadlineError> {
        Ok(Self {
            rl: DefaultEditor::new()?,
        })
    }

    pub fn read(&mut self) -> Result<ReadOutput, ReadlineError> {
        match self.rl.readline(PROMPT) {
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                Ok(ReadOutput::ControlFlow(ControlFlow::Continue(()))) // Clear line
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                Ok(ReadOutput::ControlFlow(ControlFlow::Break(())))
            }
            Err(err) => Err(err),
            Ok(line) if line.trim().is_empty() => {
                Ok(ReadOutput::ControlFlow(ControlFlow::Continue(())))
            }
            Ok(line) => {
                self.rl.add_history_entry(line.as_str())?;
                Ok(ReadOutput::Value(line))
            }
        }
    }
}
