use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use telemetry_publisher::{DeliveryOutcome, Payload, Publisher};
use telemetry_sim::{
    GeneratorOpts, RunOpts, Simulator, SimulatorConfig, TransportOpts,
};

#[derive(Parser)]
#[command(name = "telemetry-sim")]
#[command(about = "Synthetic game telemetry generator publishing JSON events to Kafka")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the continuous event simulator
    Run {
        #[command(flatten)]
        transport: TransportOpts,

        #[command(flatten)]
        generator: GeneratorOpts,

        #[command(flatten)]
        run: RunOpts,
    },
    /// Publish a single payload and wait for the delivery outcome
    Publish {
        #[command(flatten)]
        transport: TransportOpts,

        #[command(flatten)]
        generator: GeneratorOpts,

        /// Pre-serialized JSON payload (a freshly generated record when absent)
        #[arg(long)]
        payload: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    match run_main().await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {e:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            transport,
            generator,
            run,
        } => run_simulator(transport, generator, run).await,
        Commands::Publish {
            transport,
            generator,
            payload,
        } => publish_once(transport, generator, payload).await,
    }
}

async fn run_simulator(
    transport: TransportOpts,
    generator: GeneratorOpts,
    run: RunOpts,
) -> anyhow::Result<()> {
    let publisher = build_publisher(&transport).await?;
    let topic = publisher.topic().to_string();

    let config = SimulatorConfig {
        pace: run.pace(),
        delivery_mode: run.delivery_mode.into(),
        max_events: run.max_events,
    };
    let simulator = Simulator::new(generator.build(), publisher, config);

    let cancel = simulator.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, shutting down");
            cancel.cancel();
        }
    });

    tracing::info!("Publishing telemetry to topic '{topic}'");
    let metrics = simulator.run().await;

    if metrics.deliveries_failed > 0 {
        tracing::warn!("{} deliveries failed during the run", metrics.deliveries_failed);
    }

    Ok(())
}

async fn publish_once(
    transport: TransportOpts,
    generator: GeneratorOpts,
    payload: Option<String>,
) -> anyhow::Result<()> {
    let publisher = build_publisher(&transport).await?;

    let payload = match payload {
        Some(raw) => Payload::Raw(raw),
        None => generator.build().next_event().into(),
    };

    match publisher.publish_awaited(payload).await {
        DeliveryOutcome::Delivered { message_id } => {
            println!("Published message ID: {message_id}");
            Ok(())
        }
        DeliveryOutcome::Failed { error } => Err(anyhow::Error::new(error))
            .with_context(|| format!("publish on '{}' failed", publisher.topic())),
    }
}

async fn build_publisher(transport: &TransportOpts) -> anyhow::Result<Publisher> {
    let topic = transport.topic();
    let kafka = transport
        .connect()
        .context("failed to create Kafka producer")?;

    if transport.create_topic {
        kafka
            .create_topic_if_not_exists(&topic, 3)
            .await
            .with_context(|| format!("failed to create topic '{topic}'"))?;
    }

    Ok(Publisher::new(Arc::new(kafka), topic)
        .with_delivery_timeout(transport.delivery_timeout()))
}
