//! Command-line entry point: scores routes for a single request without
//! standing up the HTTP surface.

use clap::{Parser, ValueEnum};
use clean_route_core::{
    Condition, Coordinate, CoreConfig, DelayCode, Dependencies, EngineType, Mode, Orchestrator,
    Preference, RouteRequest,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Car,
    Truck,
    Scooter,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Car => Mode::Car,
            ModeArg::Truck => Mode::Truck,
            ModeArg::Scooter => Mode::Scooter,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConditionArg {
    New,
    Good,
    Average,
    Okay,
}

impl From<ConditionArg> for Condition {
    fn from(value: ConditionArg) -> Self {
        match value {
            ConditionArg::New => Condition::New,
            ConditionArg::Good => Condition::Good,
            ConditionArg::Average => Condition::Average,
            ConditionArg::Okay => Condition::Okay,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EngineArg {
    Petrol,
    Diesel,
    Cng,
    Ev,
}

impl From<EngineArg> for EngineType {
    fn from(value: EngineArg) -> Self {
        match value {
            EngineArg::Petrol => EngineType::Petrol,
            EngineArg::Diesel => EngineType::Diesel,
            EngineArg::Cng => EngineType::Cng,
            EngineArg::Ev => EngineType::Ev,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PreferenceArg {
    Shortest,
    Fastest,
    Leap,
    Emission,
    Balanced,
}

impl From<PreferenceArg> for Preference {
    fn from(value: PreferenceArg) -> Self {
        match value {
            PreferenceArg::Shortest => Preference::Shortest,
            PreferenceArg::Fastest => Preference::Fastest,
            PreferenceArg::Leap => Preference::Leap,
            PreferenceArg::Emission => Preference::Emission,
            PreferenceArg::Balanced => Preference::Balanced,
        }
    }
}

/// Scores routes between two points and prints the winning candidate as JSON.
#[derive(Debug, Parser)]
#[command(name = "route-cli", version, about)]
struct Cli {
    /// Source longitude.
    #[arg(long, allow_hyphen_values = true)]
    src_lon: f64,
    /// Source latitude.
    #[arg(long, allow_hyphen_values = true)]
    src_lat: f64,
    /// Destination longitude.
    #[arg(long, allow_hyphen_values = true)]
    dst_lon: f64,
    /// Destination latitude.
    #[arg(long, allow_hyphen_values = true)]
    dst_lat: f64,

    #[arg(long, value_enum, default_value = "car")]
    mode: ModeArg,

    /// 0 = now, 1..=6 selects an hourly forecast slot.
    #[arg(long, default_value_t = 0)]
    delay_code: u8,

    /// Vehicle mass in kg; 0 uses the mode default.
    #[arg(long, default_value_t = 0.0)]
    vehicle_mass: f64,

    #[arg(long, value_enum, default_value = "good")]
    condition: ConditionArg,

    #[arg(long, value_enum, default_value = "petrol")]
    engine_type: EngineArg,

    #[arg(long, value_enum, default_value = "balanced")]
    preference: PreferenceArg,

    /// Scores every preference over the same candidate set instead of just one.
    #[arg(long)]
    all: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();

    let config = CoreConfig::from_env()?;
    let deps = Dependencies::from_config(config);
    let orchestrator = Orchestrator::new(&deps);

    let request = RouteRequest {
        source: Coordinate::new(cli.src_lon, cli.src_lat),
        destination: Coordinate::new(cli.dst_lon, cli.dst_lat),
        mode: cli.mode.into(),
        delay_code: DelayCode(cli.delay_code),
        vehicle_mass: cli.vehicle_mass,
        condition: cli.condition.into(),
        engine_type: cli.engine_type.into(),
        preference: cli.preference.into(),
    };

    if cli.all {
        let (candidates, diagnostics) = orchestrator.select_all(&request).await?;
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        for warning in diagnostics.warnings {
            tracing::warn!(%warning, "diagnostic");
        }
    } else {
        let (candidate, diagnostics) = orchestrator.select_one(&request).await?;
        println!("{}", serde_json::to_string_pretty(&candidate)?);
        for warning in diagnostics.warnings {
            tracing::warn!(%warning, "diagnostic");
        }
    }

    Ok(())
}
