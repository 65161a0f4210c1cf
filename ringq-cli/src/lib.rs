mod config;
mod script;
mod session;

pub use config::{ErrorPolicy, SessionConfig};
pub use script::{parse_line, Command, ParseError, Verb};
pub use session::{Session, SessionError, Summary};
