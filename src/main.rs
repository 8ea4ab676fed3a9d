use std::fmt::{Debug, Display};

use saloneo_interface::core::{get_subscriber, init_subscriber, AppConfig};
use saloneo_interface::saloneo_interface_app::{InterfaceApp, SyncOutcome};
use tokio::task::JoinError;

use colored::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::new()?;

    let file_appender = tracing_appender::rolling::daily(&config.logging.directory, "app");
    let subscriber = get_subscriber(
        "saloneo_interface".into(),
        config.logging.level.clone(),
        file_appender,
    );
    init_subscriber(subscriber)?;

    let app = InterfaceApp::build(&config)?;
    let sync = tokio::spawn(app.run_sync());

    println!("{}", "-----------------------------------------".green());
    println!("Synchronizing interface settings from {}", config.api.base_url);
    println!("{}", "-----------------------------------------".green());

    let outcome = sync.await;
    report_exit("interface sync", &outcome);

    if let Ok(Ok(summary)) = outcome {
        print_summary(&summary);
        Ok(())
    } else {
        anyhow::bail!("interface sync did not complete")
    }
}

fn print_summary(outcome: &SyncOutcome) {
    println!("{} /salon/{}", "Public page:".green(), outcome.salon_slug);
    println!(
        "{} {}",
        "Template:".green(),
        outcome.template_id.as_deref().unwrap_or("none")
    );
    println!("{} {}", "Services:".green(), outcome.service_count);
    println!(
        "{} {}",
        "Theme written to:".green(),
        outcome.output_path.display()
    );
    if outcome.restored_from_snapshot {
        println!("{}", "Local snapshot was restored before syncing".yellow());
    }
}

fn report_exit<T>(task_name: &str, outcome: &Result<Result<T, impl Debug + Display>, JoinError>) {
    match outcome {
        Ok(Ok(_)) => {
            tracing::info!("{} has exited", task_name)
        }
        Ok(Err(e)) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} failed",
                task_name
            )
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} task failed to complete",
                task_name
            )
        }
    }
}
