use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use placard::PlacementPolicy;
use placard_host::SamplePoint;

#[derive(Parser, Debug)]
#[command(name = "placard")]
#[command(about = "AR poster placement rehearsal from the command line")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a scenario file against the simulated host
    Run {
        /// Scenario JSON file
        scenario: PathBuf,

        /// Override the scenario's placement policy
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,

        /// Override the hit-test sample point (normalized "X,Y", default 0.5,0.5)
        #[arg(long, value_name = "X,Y", value_parser = parse_sample_point)]
        sample_point: Option<SamplePoint>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Reparent the poster to the detected surface anchor
    Parent,
    /// Set the world transform once, with no anchor relationship
    Snapshot,
}

impl From<PolicyArg> for PlacementPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Parent => PlacementPolicy::Parent,
            PolicyArg::Snapshot => PlacementPolicy::Snapshot,
        }
    }
}

fn parse_sample_point(value: &str) -> Result<SamplePoint, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected \"X,Y\", got \"{value}\""))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f32>()
            .map_err(|e| format!("invalid coordinate \"{s}\": {e}"))
    };
    Ok(SamplePoint::new(parse(x)?, parse(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_point_parses_pairs() {
        assert_eq!(
            parse_sample_point("0.5,0.5").unwrap(),
            SamplePoint::CENTER
        );
        assert_eq!(
            parse_sample_point("0.25, 0.75").unwrap(),
            SamplePoint::new(0.25, 0.75)
        );
    }

    #[test]
    fn sample_point_rejects_garbage() {
        assert!(parse_sample_point("center").is_err());
        assert!(parse_sample_point("0.5,wall").is_err());
    }
}
