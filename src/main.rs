use std::{env, time::Duration};

use argh::FromArgs;
use color_eyre::eyre::{eyre, Context as _};
use finch_device::{Finch, SerialFinch, Session};
use finch_engine::{
    ambient_light, execute_with, monitor_with, play, record_with, AlarmConfig, CommandParameters,
    CommandToken, Program, RangeMode, RecorderConfig, Routine, SensorSelector,
};
use tracing_subscriber::EnvFilter;

mod report;

/// Drive a Finch robot over its USB serial link
#[derive(FromArgs, Debug)]
struct Args {
    /// serial port the finch is attached to, defaults to $FINCH_PORT
    #[argh(option)]
    port: Option<String>,

    /// baud rate to use
    #[argh(option, default = "9600")]
    baud: u32,

    /// how long to wait for the finch to answer, in milliseconds
    #[argh(option, default = "500")]
    timeout_ms: u64,

    /// log debug output
    #[argh(switch, short = 'v')]
    verbose: bool,

    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Command {
    Ports(PortsArgs),
    Commands(CommandsArgs),
    Run(RunArgs),
    Alarm(AlarmArgs),
    Record(RecordArgs),
    Show(ShowArgs),
    Ambient(AmbientArgs),
}

/// List the available serial ports
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "ports")]
struct PortsArgs {}

/// List the commands a program can use
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "commands")]
struct CommandsArgs {}

/// Execute a list of commands, stopping the list at the first `done`
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "run")]
struct RunArgs {
    /// motor speed [0-255]
    #[argh(option)]
    speed: i64,

    /// red LED brightness [0-255]
    #[argh(option, default = "0")]
    red: i64,

    /// green LED brightness [0-255]
    #[argh(option, default = "0")]
    green: i64,

    /// blue LED brightness [0-255]
    #[argh(option, default = "0")]
    blue: i64,

    /// tone frequency in Hz [100-10000]
    #[argh(option)]
    frequency: i64,

    /// wait time in seconds [0-10]
    #[argh(option)]
    wait: f64,

    /// commands to execute in order
    #[argh(positional)]
    commands: Vec<CommandToken>,
}

/// Watch the light and temperature sensors for a threshold breach
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "alarm")]
struct AlarmArgs {
    /// light sensors to monitor: left, right or both
    #[argh(option)]
    sensors: Option<SensorSelector>,

    /// range type: minimum or maximum
    #[argh(option)]
    range: Option<RangeMode>,

    /// light sensor threshold
    #[argh(option)]
    light: Option<f64>,

    /// temperature threshold in degrees Fahrenheit
    #[argh(option)]
    temperature: Option<f64>,

    /// how many seconds to monitor for
    #[argh(option)]
    seconds: Option<u32>,

    /// do not flash and sound when a threshold is breached
    #[argh(switch)]
    quiet: bool,
}

/// Record temperature readings
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "record")]
struct RecordArgs {
    /// number of data points to record
    #[argh(option)]
    points: u32,

    /// seconds between data points
    #[argh(option)]
    interval: f64,
}

/// Perform a routine: light-and-sound, dance, mix-it-up, finale or alarm
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "show")]
struct ShowArgs {
    /// routine to perform
    #[argh(positional)]
    routine: Routine,
}

/// Read the ambient light level of both sensors
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "ambient")]
struct AmbientArgs {}

/// Validated work for one session with the robot.
enum Job {
    Run {
        program: Program,
        parameters: CommandParameters,
    },
    Alarm {
        config: AlarmConfig,
        signal: bool,
    },
    Record(RecorderConfig),
    Show(Routine),
    Ambient,
}

impl Job {
    fn from_command(command: Command) -> color_eyre::Result<Option<Job>> {
        let job = match command {
            Command::Ports(PortsArgs {}) => {
                report::ports()?;

                return Ok(None);
            }
            Command::Commands(CommandsArgs {}) => {
                report::commands();

                return Ok(None);
            }
            Command::Run(args) => {
                let parameters = CommandParameters::new(
                    args.speed,
                    [args.red, args.green, args.blue],
                    args.frequency,
                    args.wait,
                )
                .wrap_err("invalid command parameters")?;

                let program = {
                    let end = args
                        .commands
                        .iter()
                        .position(|&token| token == CommandToken::Done)
                        .map_or(args.commands.len(), |done| done + 1);

                    args.commands[..end].iter().copied().collect::<Program>()
                };

                if !program.is_runnable() {
                    return Err(eyre!("no commands entered"));
                }

                Job::Run {
                    program,
                    parameters,
                }
            }
            Command::Alarm(args) => {
                let config = AlarmConfig {
                    sensor: args.sensors,
                    range: args.range,
                    light_threshold: args.light,
                    temperature_threshold_f: args.temperature,
                    time_budget_seconds: args.seconds,
                };

                config.validate().wrap_err("invalid alarm settings")?;

                Job::Alarm {
                    config,
                    signal: !args.quiet,
                }
            }
            Command::Record(args) => Job::Record(
                RecorderConfig::new(args.points, args.interval)
                    .wrap_err("invalid recording settings")?,
            ),
            Command::Show(args) => Job::Show(args.routine),
            Command::Ambient(AmbientArgs {}) => Job::Ambient,
        };

        Ok(Some(job))
    }

    fn perform(self, finch: &mut impl Finch) -> color_eyre::Result<()> {
        match self {
            Job::Run {
                program,
                parameters,
            } => {
                report::parameters(&parameters);

                execute_with(&program, &parameters, finch, report::feedback)
                    .wrap_err("program aborted")?;

                report::program_complete();
            }
            Job::Alarm { config, signal } => {
                report::ambient(&ambient_light(finch)?);
                report::alarm_armed(&config);

                let outcome = monitor_with(&config, finch, report::tick)
                    .wrap_err("alarm monitoring aborted")?;

                report::outcome(&outcome);

                if signal && outcome.is_breach() {
                    play(Routine::Alarm, finch).wrap_err("alarm signal aborted")?;
                }
            }
            Job::Record(config) => {
                let samples = record_with(&config, finch, report::sample)
                    .wrap_err("recording aborted")?;

                report::table(&samples);
            }
            Job::Show(routine) => {
                report::routine(routine);

                play(routine, finch).wrap_err_with(|| format!("{routine} aborted"))?;
            }
            Job::Ambient => report::ambient(&ambient_light(finch)?),
        }

        Ok(())
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args: Args = argh::from_env();

    let default_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(job) = Job::from_command(args.command)? else {
        return Ok(());
    };

    let port = args
        .port
        .or_else(|| env::var("FINCH_PORT").ok())
        .ok_or_else(|| eyre!("no serial port given, pass --port or set FINCH_PORT"))?;

    let mut finch = SerialFinch::new(
        port.as_str(),
        args.baud,
        Duration::from_millis(args.timeout_ms),
    );

    let mut session = Session::open(&mut finch)
        .wrap_err_with(|| format!("failed to connect to the finch on {port}"))?;

    tracing::info!(%port, "connected to finch");

    job.perform(&mut *session)
}
