mod common;

use std::f64::consts::PI;
use std::time::Duration;

use common::RecordingTransport;
use reachy_core::Params;
use reachy_exec::units::{
    ExpressEmotion, MoveAntennas, MoveHead, NodHead, PerformGesture, ResetHead, StateProjection,
    TiltHead, GOTO_ENDPOINT, STATE_ENDPOINT,
};
use reachy_exec::{
    Capabilities, ExecutionUnit, Method, StandardPoses, TransportError, UnitError,
};
use serde_json::{json, Value};

fn params(v: Value) -> Params {
    v.as_object().cloned().unwrap()
}

fn close(a: &Value, b: f64) -> bool {
    (a.as_f64().unwrap() - b).abs() < 1e-9
}

async fn run(unit: &dyn ExecutionUnit, transport: &RecordingTransport, p: Value) -> Result<Value, UnitError> {
    let caps = Capabilities {
        transport,
        poses: &StandardPoses,
    };
    unit.execute(&caps, &params(p)).await
}

#[tokio::test]
async fn move_head_converts_operator_units() {
    let t = RecordingTransport::ok();
    let out = run(&MoveHead, &t, json!({ "z": 20.0, "yaw": 90.0, "duration": 0.0 }))
        .await
        .unwrap();
    assert_eq!(out, json!({ "status": "success" }));

    let calls = t.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::Post);
    assert_eq!(calls[0].endpoint, GOTO_ENDPOINT);
    let body = calls[0].body.as_ref().unwrap();
    assert!(close(&body["head_pose"]["z"], 0.02));
    assert!(close(&body["head_pose"]["yaw"], PI / 2.0));
    assert!(body.get("antennas").is_none());
    assert!(close(&body["duration"], 0.0));
}

#[tokio::test]
async fn move_antennas_sends_radians() {
    let t = RecordingTransport::ok();
    run(&MoveAntennas, &t, json!({ "left": 180.0, "right": "-90", "duration": 0 }))
        .await
        .unwrap();
    let body = t.calls()[0].body.clone().unwrap();
    assert!(close(&body["antennas"][0], PI));
    assert!(close(&body["antennas"][1], -PI / 2.0));
}

#[tokio::test(start_paused = true)]
async fn keyframes_wait_for_each_move() {
    let t = RecordingTransport::ok();
    let start = tokio::time::Instant::now();
    let out = run(&NodHead, &t, json!({ "angle": 10.0, "duration": 2.0 })).await.unwrap();

    assert_eq!(start.elapsed(), Duration::from_secs(2));
    assert_eq!(out["frames"], 4);
    assert_eq!(out["moves"].as_array().unwrap().len(), 4);

    let pitches: Vec<f64> = t
        .calls()
        .iter()
        .map(|c| c.body.as_ref().unwrap()["head_pose"]["pitch"].as_f64().unwrap().to_degrees())
        .collect();
    assert_eq!(pitches.len(), 4);
    assert!((pitches[0] - 10.0).abs() < 1e-9);
    assert!(pitches[3].abs() < 1e-9);
}

#[tokio::test(start_paused = true)]
async fn reset_head_waits_default_duration() {
    let t = RecordingTransport::ok();
    let start = tokio::time::Instant::now();
    run(&ResetHead, &t, json!({})).await.unwrap();
    assert_eq!(start.elapsed(), Duration::from_secs(2));
    let body = t.calls()[0].body.clone().unwrap();
    assert_eq!(body["head_pose"], json!({ "x": 0.0, "y": 0.0, "z": 0.0, "roll": 0.0, "pitch": 0.0, "yaw": 0.0 }));
}

#[tokio::test]
async fn oversized_duration_is_rejected_before_moving() {
    let t = RecordingTransport::ok();
    let err = run(&MoveHead, &t, json!({ "duration": 1e20 })).await.unwrap_err();
    assert!(matches!(err, UnitError::InvalidParameter { ref name, .. } if name == "duration"));
    assert!(t.calls().is_empty());

    let err = run(&NodHead, &t, json!({ "duration": 1e20 })).await.unwrap_err();
    assert!(matches!(err, UnitError::InvalidParameter { .. }));
    assert!(t.calls().is_empty());
}

#[tokio::test]
async fn tilt_direction_sets_roll_sign() {
    let t = RecordingTransport::ok();
    run(&TiltHead, &t, json!({ "direction": "right", "angle": 30.0, "duration": 0 }))
        .await
        .unwrap();
    let roll = t.calls()[0].body.as_ref().unwrap()["head_pose"]["roll"].as_f64().unwrap();
    assert!((roll.to_degrees() + 30.0).abs() < 1e-9);
}

#[tokio::test]
async fn unknown_choices_name_allowed_values() {
    let t = RecordingTransport::ok();
    let err = run(&ExpressEmotion, &t, json!({ "emotion": "bored" })).await.unwrap_err();
    match err {
        UnitError::InvalidParameter { name, reason } => {
            assert_eq!(name, "emotion");
            assert!(reason.contains("happy, sad, curious, surprised, confused, neutral"));
        }
        other => panic!("expected invalid parameter, got {other:?}"),
    }

    let err = run(&PerformGesture, &t, json!({})).await.unwrap_err();
    assert!(matches!(err, UnitError::MissingParameter(ref n) if n == "gesture"));
    assert!(t.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn gestures_play_multiple_frames() {
    let t = RecordingTransport::ok();
    let out = run(&PerformGesture, &t, json!({ "gesture": "greeting" })).await.unwrap();
    assert_eq!(out["frames"], 4);
    assert_eq!(t.calls().len(), 4);
}

#[tokio::test]
async fn transport_failure_stops_playback() {
    let t = RecordingTransport::with(|_| {
        Err(TransportError::Status {
            status: 503,
            body: "busy".into(),
        })
    });
    let err = run(&NodHead, &t, json!({ "duration": 0 })).await.unwrap_err();
    assert!(matches!(err, UnitError::Transport(TransportError::Status { status: 503, .. })));
    assert_eq!(t.calls().len(), 1);
}

#[tokio::test]
async fn state_projection_picks_one_field() {
    let t = RecordingTransport::with(|req| {
        assert_eq!(req.endpoint, STATE_ENDPOINT);
        Ok(json!({ "head_pose": { "x": 1 }, "body_yaw": 0.0 }))
    });
    let unit = StateProjection::new(STATE_ENDPOINT, "head_pose");
    assert_eq!(run(&unit, &t, json!({})).await.unwrap(), json!({ "head_pose": { "x": 1 } }));

    let unit = StateProjection::new(STATE_ENDPOINT, "antennas_position");
    let err = run(&unit, &t, json!({})).await.unwrap_err();
    assert_eq!(err.to_string(), "daemon state has no 'antennas_position' field");
}
