//! Canned choreography played through the same actions as user programs.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use finch_device::Finch;
use tracing::info;

use crate::{action::Action, alarm::ParseChoiceError, Error, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Routine {
    LightAndSound,
    Dance,
    MixItUp,
    Finale,
    /// Flash and sweep the buzzer after an alarm breach.
    Alarm,
}

/// Opening phrase of "Für Elise": tone, LED colour, optional wheel speeds,
/// and how long the step is held.
const FUR_ELISE: [(u16, Rgb, Option<(i16, i16)>, u32); 18] = [
    (1318, Rgb::new(150, 150, 150), Some((20, 150)), 300),
    (1244, Rgb::new(255, 150, 100), None, 300),
    (1318, Rgb::new(250, 100, 0), None, 300),
    (1244, Rgb::new(100, 100, 255), Some((150, 20)), 300),
    (1318, Rgb::new(50, 0, 50), None, 300),
    (987, Rgb::new(40, 40, 0), None, 300),
    (1174, Rgb::new(0, 30, 30), Some((100, 100)), 300),
    (1046, Rgb::new(20, 0, 20), None, 300),
    (880, Rgb::new(80, 80, 0), None, 600),
    (523, Rgb::new(0, 200, 200), Some((150, 20)), 300),
    (659, Rgb::new(170, 0, 170), None, 300),
    (880, Rgb::new(210, 210, 0), None, 300),
    (987, Rgb::new(110, 0, 110), Some((-20, -150)), 600),
    (659, Rgb::new(0, 255, 255), None, 300),
    (739, Rgb::new(180, 0, 180), None, 300),
    (987, Rgb::new(0, 170, 170), Some((80, 250)), 300),
    (1046, Rgb::new(160, 160, 0), None, 600),
    (659, Rgb::new(5, 5, 5), Some((0, 255)), 600),
];

/// Brightness ramp with a rising tone, `level * 100` Hz.
fn sweep(step: usize) -> impl Iterator<Item = Action> {
    (0..=u8::MAX - 1).step_by(step).flat_map(|level| {
        [
            Action::Led(Rgb::grey(level)),
            Action::Tone(u16::from(level) * 100),
        ]
    })
}

fn finale() -> Vec<Action> {
    let shade = |level: u8| Action::led(level.saturating_sub(10), level.saturating_sub(50), level);

    let up = (0..=u8::MAX - 1).step_by(5).map(shade);
    let down = (1..=u8::MAX).rev().step_by(5).map(shade);

    up.chain(down).chain([Action::LED_OFF]).collect()
}

fn dance() -> Vec<Action> {
    let mut actions = vec![Action::sleep(400)];

    for _ in 0..5 {
        actions.extend([
            Action::motors(255, 255),
            Action::sleep(400),
            Action::motors(-255, -255),
            Action::sleep(400),
        ]);
    }

    for _ in 0..5 {
        actions.extend([
            Action::motors(0, 125),
            Action::sleep(500),
            Action::motors(-125, 0),
            Action::sleep(500),
            Action::motors(0, -125),
            Action::sleep(500),
        ]);
    }

    // figure eight
    actions.extend([
        Action::motors(100, 100),
        Action::sleep(500),
        Action::motors(0, 75),
        Action::sleep(500),
        Action::motors(100, 100),
        Action::sleep(2000),
        Action::motors(75, 0),
        Action::sleep(4500),
        Action::motors(100, 100),
        Action::sleep(2000),
        Action::motors(0, 75),
        Action::sleep(4500),
        Action::motors(100, 100),
        Action::sleep(2000),
        Action::STOP,
    ]);

    actions.extend(finale());
    actions
}

fn mix_it_up() -> Vec<Action> {
    let mut actions = Vec::new();

    for _ in 0..2 {
        for (tone, led, motors, hold_ms) in FUR_ELISE {
            actions.extend([Action::Tone(tone), Action::Led(led)]);

            if let Some((left, right)) = motors {
                actions.push(Action::motors(left, right));
            }

            actions.push(Action::sleep(hold_ms));
        }
    }

    actions.extend([Action::ToneOff, Action::STOP]);
    actions.extend(finale());
    actions
}

impl Routine {
    pub const ALL: [Routine; 5] = [
        Routine::LightAndSound,
        Routine::Dance,
        Routine::MixItUp,
        Routine::Finale,
        Routine::Alarm,
    ];

    pub fn actions(self) -> Vec<Action> {
        match self {
            Routine::LightAndSound => sweep(1)
                .chain([Action::LED_OFF, Action::ToneOff])
                .collect(),
            Routine::Dance => dance(),
            Routine::MixItUp => mix_it_up(),
            Routine::Finale => finale(),
            Routine::Alarm => sweep(10)
                .chain([Action::LED_OFF, Action::ToneOff])
                .collect(),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Routine::LightAndSound => "light-and-sound",
            Routine::Dance => "dance",
            Routine::MixItUp => "mix-it-up",
            Routine::Finale => "finale",
            Routine::Alarm => "alarm",
        }
    }
}

impl Display for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Routine {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_ascii_lowercase();

        Routine::ALL
            .into_iter()
            .find(|routine| routine.name() == input)
            .ok_or_else(|| ParseChoiceError {
                expected: "light-and-sound, dance, mix-it-up, finale, alarm",
                input: s.to_owned(),
            })
    }
}

/// Play every step of `routine` in order, stopping at the first failure.
pub fn play<D: Finch + ?Sized>(routine: Routine, device: &mut D) -> Result<(), Error> {
    let actions = routine.actions();

    info!(%routine, steps = actions.len(), "playing routine");

    for action in actions {
        action.apply(device)?;
    }

    Ok(())
}
