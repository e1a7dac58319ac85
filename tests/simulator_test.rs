//! Integration tests driving the simulator loop against the in-memory
//! transport double.

use std::sync::Arc;
use std::time::Duration;
use telemetry_events::{TelemetryRecord, GAME_MAPS, GAME_TYPES, WEAPONS};
use telemetry_generator::{EventGenerator, PaceConfig, PlayerNaming};
use telemetry_publisher::testing::MemoryTransport;
use telemetry_publisher::{DeliveryMode, Publisher};
use telemetry_sim::{Simulator, SimulatorConfig};

const TOPIC: &str = "gaming-demos.game-events";

fn bounded_simulator(
    transport: Arc<MemoryTransport>,
    mode: DeliveryMode,
    max_events: u64,
) -> Simulator {
    let publisher = Publisher::new(transport, TOPIC);
    let generator = EventGenerator::new(PlayerNaming::Roster, 42);
    Simulator::new(
        generator,
        publisher,
        SimulatorConfig {
            pace: PaceConfig::disabled(),
            delivery_mode: mode,
            max_events: Some(max_events),
        },
    )
}

#[tokio::test]
async fn awaited_run_round_trips_every_payload() {
    let transport = Arc::new(MemoryTransport::new());
    let metrics = bounded_simulator(transport.clone(), DeliveryMode::Awaited, 1000)
        .run()
        .await;

    assert_eq!(metrics.events_emitted, 1000);
    assert_eq!(metrics.deliveries_confirmed, 1000);
    assert_eq!(metrics.deliveries_failed, 0);
    // Pacing disabled: the loop never slept.
    assert_eq!(metrics.total_sleep, Duration::ZERO);

    let published = transport.published();
    assert_eq!(published.len(), 1000);

    let mut previous_event_time = String::new();
    for (topic, payload) in published {
        assert_eq!(topic, TOPIC);

        let record: TelemetryRecord = serde_json::from_slice(&payload).expect("payload is JSON");
        assert!(GAME_TYPES.contains(&record.game_type.as_str()));
        assert!(GAME_MAPS.contains(&record.game_map.as_str()));
        assert!(WEAPONS.contains(&record.weapon.as_str()));
        assert!(record.uid < 1_000_000);
        assert!((1000..=1050).contains(&record.game_id));
        assert!(record.kill_flag <= 1);
        for coord in [record.x_coord, record.y_coord, record.z_coord] {
            assert!((1..=100).contains(&coord));
        }

        assert!(record.event_time >= previous_event_time);
        previous_event_time = record.event_time;
    }
}

#[tokio::test]
async fn failing_transport_does_not_stop_the_loop() {
    let transport = Arc::new(MemoryTransport::failing());
    let metrics = bounded_simulator(transport.clone(), DeliveryMode::Awaited, 100)
        .run()
        .await;

    assert_eq!(metrics.events_emitted, 100);
    assert_eq!(metrics.deliveries_failed, 100);
    assert_eq!(metrics.deliveries_confirmed, 0);
    assert!(transport.published().is_empty());
}

#[tokio::test]
async fn detached_run_completes_all_deliveries() {
    let transport = Arc::new(MemoryTransport::new());
    let metrics = bounded_simulator(transport.clone(), DeliveryMode::Detached, 200)
        .run()
        .await;

    // Fire-and-forget: the loop finishes without waiting for confirmations.
    assert_eq!(metrics.events_emitted, 200);
    assert_eq!(metrics.deliveries_confirmed, 0);

    // The spawned completion tasks land shortly after.
    for _ in 0..100 {
        if transport.published_count() == 200 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("detached deliveries did not complete");
}

#[tokio::test]
async fn cancellation_ends_an_unbounded_run() {
    let transport = Arc::new(MemoryTransport::new());
    let publisher = Publisher::new(transport, TOPIC);
    let generator = EventGenerator::new(PlayerNaming::Generated, 42);
    let simulator = Simulator::new(
        generator,
        publisher,
        SimulatorConfig {
            pace: PaceConfig::uniform(Duration::from_millis(5)),
            delivery_mode: DeliveryMode::Detached,
            max_events: None,
        },
    );

    let cancel = simulator.cancellation_token();
    let handle = tokio::spawn(simulator.run());

    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel.cancel();

    let metrics = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("run did not stop after cancellation")
        .expect("run task panicked");
    assert!(metrics.total_duration >= Duration::from_millis(50));
}

#[tokio::test]
async fn same_seed_reproduces_the_same_stream() {
    let first = Arc::new(MemoryTransport::new());
    let second = Arc::new(MemoryTransport::new());

    bounded_simulator(first.clone(), DeliveryMode::Awaited, 50)
        .run()
        .await;
    bounded_simulator(second.clone(), DeliveryMode::Awaited, 50)
        .run()
        .await;

    let strip_time = |payloads: Vec<(String, Vec<u8>)>| -> Vec<TelemetryRecord> {
        payloads
            .into_iter()
            .map(|(_, payload)| {
                let mut record: TelemetryRecord = serde_json::from_slice(&payload).unwrap();
                // Event times come from the wall clock; everything else is
                // seed-determined.
                record.event_time.clear();
                record
            })
            .collect()
    };

    assert_eq!(strip_time(first.published()), strip_time(second.published()));
}
