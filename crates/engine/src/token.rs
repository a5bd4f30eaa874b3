use std::{
    fmt::{self, Display},
    str::FromStr,
};

use thiserror::Error;

/// One abstract robot action in a [`Program`](crate::Program).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandToken {
    MoveForward,
    MoveBackward,
    Stop,
    Wait,
    TurnRight,
    TurnLeft,
    LedOn,
    LedOff,
    ToneOn,
    ToneOff,
    ReadTemperature,
    /// End-of-program marker. Processed as an inert step.
    Done,
    None,
}

impl CommandToken {
    pub const ALL: [CommandToken; 13] = [
        CommandToken::MoveForward,
        CommandToken::MoveBackward,
        CommandToken::Stop,
        CommandToken::Wait,
        CommandToken::TurnRight,
        CommandToken::TurnLeft,
        CommandToken::LedOn,
        CommandToken::LedOff,
        CommandToken::ToneOn,
        CommandToken::ToneOff,
        CommandToken::ReadTemperature,
        CommandToken::Done,
        CommandToken::None,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            CommandToken::MoveForward => "move-forward",
            CommandToken::MoveBackward => "move-backward",
            CommandToken::Stop => "stop",
            CommandToken::Wait => "wait",
            CommandToken::TurnRight => "turn-right",
            CommandToken::TurnLeft => "turn-left",
            CommandToken::LedOn => "led-on",
            CommandToken::LedOff => "led-off",
            CommandToken::ToneOn => "tone-on",
            CommandToken::ToneOff => "tone-off",
            CommandToken::ReadTemperature => "read-temperature",
            CommandToken::Done => "done",
            CommandToken::None => "none",
        }
    }
}

impl Display for CommandToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command {input:?}")]
pub struct ParseTokenError {
    pub input: String,
}

impl FromStr for CommandToken {
    type Err = ParseTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        let token = match normalized.as_str() {
            "moveforward" | "forward" => CommandToken::MoveForward,
            "movebackward" | "backward" => CommandToken::MoveBackward,
            "stop" | "stopmotors" => CommandToken::Stop,
            "wait" => CommandToken::Wait,
            "turnright" => CommandToken::TurnRight,
            "turnleft" => CommandToken::TurnLeft,
            "ledon" => CommandToken::LedOn,
            "ledoff" => CommandToken::LedOff,
            "toneon" | "noteon" => CommandToken::ToneOn,
            "toneoff" | "noteoff" => CommandToken::ToneOff,
            "readtemperature" | "gettemperature" => CommandToken::ReadTemperature,
            "done" => CommandToken::Done,
            "none" => CommandToken::None,
            _ => {
                return Err(ParseTokenError {
                    input: s.to_owned(),
                })
            }
        };

        Ok(token)
    }
}
