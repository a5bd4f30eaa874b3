//! Console output for each subcommand.

use color_eyre::eyre::Context as _;
use finch_engine::{
    alarm::{AmbientLight, Tick},
    AlarmConfig, CommandParameters, CommandToken, FeedbackLine, Outcome, Routine, Sample,
};
use serialport::SerialPortType;

const COLUMN_WIDTH: usize = 15;

pub fn ports() -> color_eyre::Result<()> {
    let ports = serialport::available_ports().wrap_err("failed to list serial ports")?;

    if ports.is_empty() {
        println!("no serial ports found");
    }

    for port in ports {
        match port.port_type {
            SerialPortType::UsbPort(usb) => println!(
                "{} (usb {:04x}:{:04x}{})",
                port.port_name,
                usb.vid,
                usb.pid,
                usb.product.map(|product| format!(" {product}")).unwrap_or_default()
            ),
            _ => println!("{}", port.port_name),
        }
    }

    Ok(())
}

pub fn commands() {
    for row in CommandToken::ALL.chunks(3) {
        let row = row
            .iter()
            .map(|token| format!("{:<COLUMN_WIDTH$}", token.name()))
            .collect::<String>();

        println!("{}", row.trim_end());
    }
}

pub fn parameters(parameters: &CommandParameters) {
    let led = parameters.led();

    println!("motor speed: {}", parameters.motor_speed());
    println!("led: ({}, {}, {})", led.red, led.green, led.blue);
    println!("tone: {} Hz", parameters.tone_frequency_hz());
    println!("wait: {} s", parameters.wait_seconds());
    println!();
}

pub fn feedback(line: &FeedbackLine) {
    println!("{line}");
}

pub fn program_complete() {
    println!();
    println!("all commands executed");
}

pub fn ambient(light: &AmbientLight) {
    println!("left light sensor: {}", light.left);
    println!("right light sensor: {}", light.right);
}

pub fn alarm_armed(config: &AlarmConfig) {
    if let (Some(sensor), Some(range)) = (config.sensor, config.range) {
        println!("watching {sensor} light sensor(s) for a {range} breach");
    }
}

pub fn tick(tick: &Tick) {
    println!(
        "{:>3} s  light {:>3}  {}",
        tick.elapsed_seconds, tick.reading.light, tick.reading.temperature
    );
}

pub fn outcome(outcome: &Outcome) {
    match *outcome {
        Outcome::LightBreach {
            value,
            threshold,
            elapsed_seconds,
        } => println!("light threshold of {threshold} breached at {elapsed_seconds} s: {value}"),
        Outcome::TemperatureBreach {
            value,
            threshold_f,
            elapsed_seconds,
        } => println!(
            "temperature threshold of {threshold_f:.1}°F breached at {elapsed_seconds} s: {value}"
        ),
        Outcome::NoBreach {
            light_threshold,
            temperature_threshold_f,
        } => println!(
            "thresholds of {light_threshold} and {temperature_threshold_f:.1}°F were not breached"
        ),
    }
}

pub fn sample(sample: &Sample) {
    println!("recording #{}: {}", sample.number, sample.temperature);
}

pub fn table(samples: &[Sample]) {
    println!();
    println!("{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}", "Recording #", "Temp");
    println!("{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}", "-----------", "----");

    for sample in samples {
        println!(
            "{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}",
            sample.number,
            sample.temperature.to_string()
        );
    }
}

pub fn routine(routine: Routine) {
    println!("performing {routine}");
}
