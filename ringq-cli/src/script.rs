use ringq_proc_macros::{EnumDisplay, EnumFromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumDisplay, EnumFromStr)]
pub enum Verb {
    Enqueue,
    Dequeue,
    Peek,
    Contains,
    Count,
    Capacity,
    List,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Enqueue(Vec<String>),
    Dequeue,
    Peek,
    Contains(String),
    Count,
    Capacity,
    List,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{msg}")]
    UnknownVerb { msg: String },
    #[error("'{verb}' expects {expected} argument(s), got {got}")]
    ArgumentCount {
        verb: Verb,
        expected: &'static str,
        got: usize,
    },
}

fn expect_no_args(verb: Verb, args: &[&str], command: Command) -> Result<Command, ParseError> {
    if !args.is_empty() {
        return Err(ParseError::ArgumentCount {
            verb,
            expected: "no",
            got: args.len(),
        });
    }

    Ok(command)
}

/// Parse one script line. Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(verb_str) = words.next() else {
        return Ok(None);
    };
    let verb: Verb = verb_str
        .parse()
        .map_err(|msg| ParseError::UnknownVerb { msg })?;
    let args: Vec<_> = words.collect();

    let command = match verb {
        Verb::Enqueue => {
            if args.is_empty() {
                return Err(ParseError::ArgumentCount {
                    verb,
                    expected: "at least 1",
                    got: 0,
                });
            }
            Command::Enqueue(args.into_iter().map(String::from).collect())
        }
        Verb::Contains => match args.as_slice() {
            [item] => Command::Contains((*item).into()),
            _ => {
                return Err(ParseError::ArgumentCount {
                    verb,
                    expected: "exactly 1",
                    got: args.len(),
                })
            }
        },
        Verb::Dequeue => expect_no_args(verb, &args, Command::Dequeue)?,
        Verb::Peek => expect_no_args(verb, &args, Command::Peek)?,
        Verb::Count => expect_no_args(verb, &args, Command::Count)?,
        Verb::Capacity => expect_no_args(verb, &args, Command::Capacity)?,
        Verb::List => expect_no_args(verb, &args, Command::List)?,
        Verb::Clear => expect_no_args(verb, &args, Command::Clear)?,
    };

    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_and_comments() {
        assert_eq!(Ok(None), parse_line(""));
        assert_eq!(Ok(None), parse_line("   \t"));
        assert_eq!(Ok(None), parse_line("# enqueue a"));
    }

    #[test]
    fn verbs() {
        assert_eq!(
            Ok(Some(Command::Enqueue(vec!["a".into(), "b".into()]))),
            parse_line("enqueue a b")
        );
        assert_eq!(Ok(Some(Command::Dequeue)), parse_line("  DEQUEUE  "));
        assert_eq!(Ok(Some(Command::Peek)), parse_line("Peek"));
        assert_eq!(
            Ok(Some(Command::Contains("x".into()))),
            parse_line("contains x")
        );
        assert_eq!(Ok(Some(Command::Count)), parse_line("count"));
        assert_eq!(Ok(Some(Command::Capacity)), parse_line("capacity"));
        assert_eq!(Ok(Some(Command::List)), parse_line("list"));
        assert_eq!(Ok(Some(Command::Clear)), parse_line("clear"));
    }

    #[test]
    fn unknown_verb() {
        assert_eq!(
            Err(ParseError::UnknownVerb {
                msg: "invalid verb string: 'push'".into()
            }),
            parse_line("push 1")
        );
    }

    #[test]
    fn argument_counts() {
        assert_eq!(
            Err(ParseError::ArgumentCount {
                verb: Verb::Enqueue,
                expected: "at least 1",
                got: 0
            }),
            parse_line("enqueue")
        );
        assert_eq!(
            Err(ParseError::ArgumentCount {
                verb: Verb::Contains,
                expected: "exactly 1",
                got: 2
            }),
            parse_line("contains a b")
        );

        let err = parse_line("dequeue now").unwrap_err();
        assert_eq!("'dequeue' expects no argument(s), got 1", err.to_string());
    }
}
