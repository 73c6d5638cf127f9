//! Runtime tests: driving a session from JSON-lines input with timer ticks.

use std::io::Write;
use std::time::Duration;

use cogstate_engine::cognition::engine::CognitiveEngine;
use cogstate_engine::cognition::types::{BiometricSample, Recommendation, TutorResponse};
use cogstate_engine::runtime::{self, StreamError};
use cogstate_engine::sessions::{SessionError, SessionRegistry};

const HOUR: Duration = Duration::from_secs(3600);

fn lines(output: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8(output.to_vec())
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[tokio::test]
async fn drive_emits_one_snapshot_per_sample() {
    let input = concat!(
        r#"{"timestamp":1000,"attentionLevel":0.8,"heartRate":72}"#,
        "\n",
        r#"{"timestamp":2000,"attentionLevel":0.7,"pupilDilation":0.9}"#,
        "\n",
    );
    let reader = tokio::io::BufReader::new(input.as_bytes());
    let mut output = Vec::new();
    let mut engine = CognitiveEngine::default();

    let summary = runtime::drive(reader, &mut output, &mut engine, HOUR, std::future::pending())
        .await
        .expect("drive should succeed");

    assert_eq!(summary.samples, 2);
    assert_eq!(summary.ticks, 0);
    assert_eq!(summary.final_snapshot.history_len, 2);

    let emitted = lines(&output);
    assert_eq!(emitted.len(), 2);
    assert_eq!(emitted[0]["trigger"], "sample");
    assert_eq!(emitted[1]["snapshot"]["state"]["timestamp"], 2000);
    assert_eq!(emitted[1]["snapshot"]["samplesSeen"], 2);
}

#[tokio::test]
async fn undecodable_lines_are_skipped() {
    let input = "not json\n\n{\"timestamp\":5}\n{\"heartRate\":80}\n";
    let reader = tokio::io::BufReader::new(input.as_bytes());
    let mut output = Vec::new();
    let mut engine = CognitiveEngine::default();

    let summary = runtime::drive(reader, &mut output, &mut engine, HOUR, std::future::pending())
        .await
        .unwrap();

    // the last line lacks the required timestamp
    assert_eq!(summary.samples, 1);
    assert_eq!(summary.skipped_lines, 2);
    assert_eq!(lines(&output).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn timer_ticks_recompute_without_samples() {
    let (_client, server) = tokio::io::duplex(64);
    let reader = tokio::io::BufReader::new(server);
    let mut output = Vec::new();
    let mut engine = CognitiveEngine::default();

    let shutdown = tokio::time::sleep(Duration::from_secs(12));
    let summary = runtime::drive(
        reader,
        &mut output,
        &mut engine,
        Duration::from_secs(5),
        shutdown,
    )
    .await
    .unwrap();

    assert_eq!(summary.samples, 0);
    assert_eq!(summary.ticks, 2);
    let emitted = lines(&output);
    assert!(emitted.iter().all(|l| l["trigger"] == "tick"));
    assert_eq!(
        emitted[0]["snapshot"]["metrics"]["recommendation"],
        Recommendation::Continue.as_str()
    );
}

#[tokio::test(start_paused = true)]
async fn tick_stamps_follow_sample_clock() {
    use tokio::io::AsyncWriteExt;

    let (mut client, server) = tokio::io::duplex(1024);
    let feeder = tokio::spawn(async move {
        client.write_all(b"{\"timestamp\":1000}\n").await.unwrap();
        tokio::time::sleep(Duration::from_secs(7)).await;
        client.write_all(b"{\"timestamp\":2000}\n").await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
        drop(client);
    });

    let reader = tokio::io::BufReader::new(server);
    let mut output = Vec::new();
    let mut engine = CognitiveEngine::default();
    let summary = runtime::drive(
        reader,
        &mut output,
        &mut engine,
        Duration::from_secs(5),
        tokio::time::sleep(Duration::from_secs(12)),
    )
    .await
    .unwrap();
    feeder.abort();

    assert_eq!(summary.samples, 2);
    assert_eq!(summary.ticks, 2);

    let emitted = lines(&output);
    let triggers: Vec<&str> = emitted.iter().map(|l| l["trigger"].as_str().unwrap()).collect();
    assert_eq!(triggers, vec!["sample", "tick", "sample", "tick"]);

    let stamps: Vec<i64> = emitted
        .iter()
        .map(|l| l["snapshot"]["state"]["timestamp"].as_i64().unwrap())
        .collect();
    assert_eq!(stamps[0], 1000);
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]), "timestamps went backwards: {stamps:?}");
    // the late sample is held at the first tick's stamp
    assert_eq!(stamps[2], stamps[1]);
    assert!(stamps[3] < 60_000, "tick used wall-clock time: {stamps:?}");
}

#[tokio::test]
async fn samples_can_be_read_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"timestamp":10,"blinkRate":12.0}}"#).unwrap();
    writeln!(file, r#"{{"timestamp":20,"blinkRate":18.0}}"#).unwrap();
    writeln!(file, r#"{{"timestamp":30,"blinkRate":24.0}}"#).unwrap();
    file.flush().unwrap();

    let source = runtime::open_source(Some(file.path())).await.unwrap();
    let mut output = Vec::new();
    let mut engine = CognitiveEngine::default();

    let summary = runtime::drive(source, &mut output, &mut engine, HOUR, std::future::pending())
        .await
        .unwrap();

    assert_eq!(summary.samples, 3);
    assert_eq!(summary.final_snapshot.state.timestamp, 30);
    assert!((summary.final_snapshot.state.fatigue - 0.8).abs() < 1e-9);
}

#[tokio::test]
async fn missing_sample_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.jsonl");
    let result = runtime::open_source(Some(missing.as_path())).await;
    assert!(matches!(result, Err(StreamError::Io(_))));
}

#[test]
fn registry_round_trip() {
    let registry = SessionRegistry::default();
    let id = registry.open_session();

    registry
        .analyze(
            &id,
            BiometricSample {
                attention_level: Some(0.9),
                ..BiometricSample::at(1)
            },
        )
        .unwrap();
    let adapted = registry.adapt(&id, TutorResponse::new("Intro to vectors", 0.5)).unwrap();
    assert!(adapted.applied.is_empty());

    registry.reset(&id).unwrap();
    assert_eq!(registry.snapshot(&id).unwrap().history_len, 0);
    assert_eq!(registry.tick(&id, 10).unwrap().current_load, 0.5);

    registry.close_session(&id).unwrap();
    assert_eq!(
        registry.snapshot(&id),
        Err(SessionError::UnknownSession(id.clone()))
    );
}
