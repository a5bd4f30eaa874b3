use std::fmt::{self, Display};

use finch_device::Finch;
use tracing::{debug, info};

use crate::{action::Action, CommandParameters, CommandToken, Error, Program, Temperature};

/// Wheel speed used for on-the-spot turns, independent of the cruising speed.
pub const TURNING_MOTOR_SPEED: i16 = 100;

/// What happened for one token of a program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackLine {
    pub token: CommandToken,
    /// Set only for [`CommandToken::ReadTemperature`].
    pub temperature: Option<Temperature>,
}

impl Display for FeedbackLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.temperature {
            Some(temperature) => write!(f, "temperature: {temperature}"),
            None => write!(f, "{}", self.token),
        }
    }
}

/// The device call a token stands for, given the program's parameters.
///
/// `Done` and `None` are inert and map to no call.
pub fn action_for(token: CommandToken, parameters: &CommandParameters) -> Option<Action> {
    let speed = i16::from(parameters.motor_speed());

    let action = match token {
        CommandToken::MoveForward => Action::motors(speed, speed),
        CommandToken::MoveBackward => Action::motors(-speed, -speed),
        CommandToken::Stop => Action::STOP,
        CommandToken::Wait => Action::sleep(parameters.wait_ms()),
        CommandToken::TurnRight => Action::motors(TURNING_MOTOR_SPEED, -TURNING_MOTOR_SPEED),
        CommandToken::TurnLeft => Action::motors(-TURNING_MOTOR_SPEED, TURNING_MOTOR_SPEED),
        CommandToken::LedOn => Action::Led(parameters.led()),
        CommandToken::LedOff => Action::LED_OFF,
        CommandToken::ToneOn => Action::Tone(parameters.tone_frequency_hz()),
        CommandToken::ToneOff => Action::ToneOff,
        CommandToken::ReadTemperature => Action::ReadTemperature,
        CommandToken::Done | CommandToken::None => return None,
    };

    Some(action)
}

/// Run every token of `program` in order, reporting each step as it completes.
///
/// The first device failure stops the run; steps already performed are not
/// undone and their feedback has already been reported. The robot is left in
/// whatever state the last step put it in.
pub fn execute_with<D, F>(
    program: &Program,
    parameters: &CommandParameters,
    device: &mut D,
    mut on_feedback: F,
) -> Result<(), Error>
where
    D: Finch + ?Sized,
    F: FnMut(&FeedbackLine),
{
    if !program.is_runnable() {
        return Err(Error::InvalidProgram);
    }

    info!(commands = program.len(), "executing program");

    for &token in program {
        debug!(?token, "executing command");

        let temperature = match action_for(token, parameters) {
            Some(action) => action.apply(device)?,
            None => None,
        };

        on_feedback(&FeedbackLine { token, temperature });
    }

    info!("program complete");

    Ok(())
}

/// Run `program` and collect one feedback line per token.
pub fn execute<D: Finch + ?Sized>(
    program: &Program,
    parameters: &CommandParameters,
    device: &mut D,
) -> Result<Vec<FeedbackLine>, Error> {
    let mut feedback = Vec::with_capacity(program.len());

    execute_with(program, parameters, device, |line| feedback.push(*line))?;

    Ok(feedback)
}
