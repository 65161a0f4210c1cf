use crate::config::{ErrorPolicy, SessionConfig};
use crate::script::{self, Command, ParseError};
use ringq_core::{Queue, QueueError};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },
    #[error("line {line}: {source}")]
    Queue {
        line: usize,
        #[source]
        source: QueueError,
    },
    #[error("error reading script or writing output: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub commands: usize,
    pub errors: usize,
}

/// A string queue driven by script commands.
#[derive(Debug)]
pub struct Session {
    queue: Queue<String>,
    config: SessionConfig,
}

impl Session {
    /// # Errors
    ///
    /// Returns [`QueueError::NegativeCapacity`] if the configured initial capacity is negative.
    pub fn new(config: SessionConfig) -> Result<Self, QueueError> {
        let queue = Queue::try_with_capacity(config.initial_capacity)?;
        Ok(Self { queue, config })
    }

    pub fn queue(&self) -> &Queue<String> {
        &self.queue
    }

    /// Apply a command to the queue, returning the line it prints, if any.
    ///
    /// # Errors
    ///
    /// Returns the queue's error if the command is invalid for its current state.
    pub fn execute(&mut self, command: &Command) -> Result<Option<String>, QueueError> {
        let output = match command {
            Command::Enqueue(items) => {
                self.queue.extend(items.iter().cloned());
                None
            }
            Command::Dequeue => Some(self.queue.dequeue()?),
            Command::Peek => Some(self.queue.peek()?.clone()),
            Command::Contains(item) => Some(self.queue.contains(item).to_string()),
            Command::Count => Some(self.queue.len().to_string()),
            Command::Capacity => Some(self.queue.capacity().to_string()),
            Command::List => Some(format!("[{}]", self.queue.to_vec().join(", "))),
            Command::Clear => {
                self.queue.clear();
                None
            }
        };

        Ok(output)
    }

    /// Run every command in `input`, writing command output to `out`.
    ///
    /// Under [`ErrorPolicy::Abort`] the first failing line is returned as an error. Under
    /// [`ErrorPolicy::Continue`] it is written to `out` as `error: ...` and counted in the summary.
    /// With `echo_commands` set, every non-blank, non-comment line is echoed as `> line` before
    /// its output or error.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if reading `input` or writing `out` fails, and the first
    /// parse or queue error under [`ErrorPolicy::Abort`].
    pub fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<Summary, SessionError>
    where
        R: BufRead,
        W: Write,
    {
        let mut summary = Summary::default();

        for (i, line) in input.lines().enumerate() {
            let line = line?;
            let line_number = i + 1;

            let parsed = match script::parse_line(&line) {
                Ok(None) => continue,
                parsed => parsed,
            };

            if self.config.echo_commands {
                writeln!(out, "> {}", line.trim())?;
            }

            let command = match parsed {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(source) => {
                    let err = SessionError::Parse {
                        line: line_number,
                        source,
                    };
                    self.handle_error(err, out, &mut summary)?;
                    continue;
                }
            };

            summary.commands += 1;
            match self.execute(&command) {
                Ok(Some(output)) => writeln!(out, "{output}")?,
                Ok(None) => {}
                Err(source) => {
                    let err = SessionError::Queue {
                        line: line_number,
                        source,
                    };
                    self.handle_error(err, out, &mut summary)?;
                }
            }
        }

        Ok(summary)
    }

    fn handle_error<W: Write>(
        &self,
        err: SessionError,
        out: &mut W,
        summary: &mut Summary,
    ) -> Result<(), SessionError> {
        summary.errors += 1;

        match self.config.on_error {
            ErrorPolicy::Abort => Err(err),
            ErrorPolicy::Continue => {
                log::warn!("Skipping failed command: {err}");
                writeln!(out, "error: {err}")?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(config: SessionConfig, script: &str) -> (Result<Summary, SessionError>, String) {
        let mut session = Session::new(config).unwrap();
        let mut out = Vec::new();
        let result = session.run(script.as_bytes(), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn negative_capacity() {
        let config = SessionConfig {
            initial_capacity: -2,
            ..SessionConfig::default()
        };

        assert_eq!(
            Some(QueueError::NegativeCapacity { capacity: -2 }),
            Session::new(config).err()
        );
    }

    #[test]
    fn integer_script() {
        let script = "\
            # starts from the default capacity\n\
            enqueue 1 2 3\n\
            peek\n\
            list\n\
            dequeue\n\
            count\n\
            list\n\
            \n\
            enqueue 4 5 6\n\
            list\n\
            capacity\n";

        let (result, out) = run_script(SessionConfig::default(), script);

        assert_eq!(
            Summary {
                commands: 9,
                errors: 0
            },
            result.unwrap()
        );
        assert_eq!("1\n[1, 2, 3]\n1\n2\n[2, 3]\n[2, 3, 4, 5, 6]\n8\n", out);
    }

    #[test]
    fn contains() {
        let script = "enqueue first second third\ncontains second\ncontains fourth\n";

        let (result, out) = run_script(SessionConfig::default(), script);

        assert!(result.is_ok());
        assert_eq!("true\nfalse\n", out);
    }

    #[test]
    fn abort_on_empty_dequeue() {
        let script = "enqueue a\ndequeue\ndequeue\nenqueue b\n";

        let (result, out) = run_script(SessionConfig::default(), script);

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Queue {
                line: 3,
                source: QueueError::Empty
            }
        ));
        assert_eq!("line 3: queue is empty", err.to_string());
        assert_eq!("a\n", out);
    }

    #[test]
    fn continue_past_errors() {
        let config = SessionConfig {
            on_error: ErrorPolicy::Continue,
            ..SessionConfig::default()
        };
        let script = "peek\npush x\nenqueue x\nclear\ndequeue\ncount\n";

        let (result, out) = run_script(config, script);

        assert_eq!(
            Summary {
                commands: 5,
                errors: 3
            },
            result.unwrap()
        );
        assert_eq!(
            "error: line 1: queue is empty\n\
             error: line 2: invalid verb string: 'push'\n\
             error: line 5: queue is empty\n\
             0\n",
            out
        );
    }

    #[test]
    fn echo_commands() {
        let config = SessionConfig {
            echo_commands: true,
            ..SessionConfig::default()
        };

        let (result, out) = run_script(config, "  enqueue z\npeek\n");

        assert!(result.is_ok());
        assert_eq!("> enqueue z\n> peek\nz\n", out);
    }

    #[test]
    fn echo_precedes_errors() {
        let config = SessionConfig {
            echo_commands: true,
            on_error: ErrorPolicy::Continue,
            ..SessionConfig::default()
        };

        let (result, out) = run_script(config, "# skipped
push x

dequeue
");

        assert_eq!(
            Summary {
                commands: 1,
                errors: 2
            },
            result.unwrap()
        );
        assert_eq!(
            "> push x
             error: line 2: invalid verb string: 'push'
             > dequeue
             error: line 4: queue is empty
",
            out
        );
    }

    #[test]
    fn preallocated_capacity() {
        let config = SessionConfig {
            initial_capacity: 2,
            ..SessionConfig::default()
        };

        let (_, out) = run_script(config, "capacity\nenqueue a b c\ncapacity\n");

        assert_eq!("2\n6\n", out);
    }
}
