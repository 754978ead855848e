pub mod run;

use crate::cli::Command;

pub async fn dispatch(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Run {
            scenario,
            policy,
            sample_point,
        } => run::run(&scenario, policy, sample_point).await,
    }
}
