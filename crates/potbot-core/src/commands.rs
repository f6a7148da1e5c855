//! Command parsing: raw message text to a typed command.

use crate::stake::{StakeAmount, StakeError};

/// Command names and descriptions for the platform's command menu.
pub const COMMAND_MENU: [(&str, &str); 4] = [
    ("start", "Show usage"),
    ("poll", "Price poll: where is the market heading?"),
    ("stake", "Add an amount to the pot (simulated)"),
    ("chaos", "Roll the chaos score"),
];

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Start,
    Poll,
    Stake(StakeAmount),
    Chaos,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: /{0}")]
    Unknown(String),

    #[error(transparent)]
    InvalidStake(#[from] StakeError),
}

impl Command {
    /// Parse a message. Returns `None` for text that is not a command, and for
    /// commands addressed to another bot (`/cmd@other_bot`).
    ///
    /// `bot_username` is this bot's username without the `@`. When it is unknown,
    /// every `@target` is accepted.
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Result<Self, CommandError>> {
        let text = text.trim_start();
        if !text.starts_with('/') {
            return None;
        }

        let (name, target, args) = split_command(text);
        if let (Some(target), Some(me)) = (target.as_deref(), bot_username) {
            if !target.eq_ignore_ascii_case(me.trim_start_matches('@')) {
                return None;
            }
        }

        let cmd = match name.as_str() {
            "start" | "help" => Ok(Self::Start),
            "poll" => Ok(Self::Poll),
            "stake" => StakeAmount::parse_args(&args)
                .map(Self::Stake)
                .map_err(CommandError::from),
            "chaos" => Ok(Self::Chaos),
            _ => Err(CommandError::Unknown(name)),
        };
        Some(cmd)
    }
}

/// Split `/cmd@botname arg1 ...` into a lowercased name, the optional `@` target
/// and the trimmed rest.
fn split_command(text: &str) -> (String, Option<String>, String) {
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let (name, target) = match first.trim_start_matches('/').split_once('@') {
        Some((name, target)) => (name, Some(target.to_string())),
        None => (first.trim_start_matches('/'), None),
    };

    (name.to_lowercase(), target, rest)
}
