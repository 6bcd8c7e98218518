//! Multi-keyframe head and antenna routines.
//!
//! Angles are degrees and head positions millimetres; [`play`] converts through the
//! pose capability and paces the daemon calls.

use async_trait::async_trait;
use reachy_core::Params;
use serde_json::Value;

use super::motion::{play, Keyframe};
use crate::pose::PoseSpec;
use crate::unit::{Capabilities, ExecutionUnit, ParamReader, UnitError};

const NOD_ANGLE: f64 = 15.0;
const SHAKE_ANGLE: f64 = 20.0;
const TILT_ANGLE: f64 = 20.0;
const GESTURE_DURATION: f64 = 1.0;
const LOOK_PITCH: f64 = 25.0;
const LOOK_YAW: f64 = 35.0;

pub const EMOTIONS: &[&str] = &["happy", "sad", "curious", "surprised", "confused", "neutral"];
pub const GESTURES: &[&str] = &["greeting", "yes", "no", "thinking", "celebration"];
pub const TILT_DIRECTIONS: &[&str] = &["left", "right"];
pub const LOOK_DIRECTIONS: &[&str] = &["up", "down", "left", "right", "forward"];

fn head(duration: f64, pose: PoseSpec) -> Keyframe {
    Keyframe::new(duration).head(pose)
}

fn neutral(duration: f64) -> Keyframe {
    head(duration, PoseSpec::operator())
}

/// Splits `duration` evenly over one keyframe per angle, each built by `pose`.
fn oscillate(angles: &[f64], duration: f64, pose: impl Fn(f64) -> PoseSpec) -> Vec<Keyframe> {
    let step = duration / angles.len() as f64;
    angles.iter().map(|a| head(step, pose(*a))).collect()
}

/// Pitch down, up, down, neutral.
pub struct NodHead;

#[async_trait]
impl ExecutionUnit for NodHead {
    async fn execute(&self, caps: &Capabilities<'_>, params: &Params) -> Result<Value, UnitError> {
        let p = ParamReader::new(params);
        let angle = p.number_or("angle", NOD_ANGLE)?;
        let duration = p.duration_or("duration", GESTURE_DURATION)?;
        let frames = oscillate(&[angle, 0.0, angle, 0.0], duration, |a| {
            PoseSpec::operator().pitch(a)
        });
        play(caps, &frames).await
    }
}

/// Yaw one way, the other way, back, neutral.
pub struct ShakeHead;

#[async_trait]
impl ExecutionUnit for ShakeHead {
    async fn execute(&self, caps: &Capabilities<'_>, params: &Params) -> Result<Value, UnitError> {
        let p = ParamReader::new(params);
        let angle = p.number_or("angle", SHAKE_ANGLE)?;
        let duration = p.duration_or("duration", GESTURE_DURATION)?;
        let frames = oscillate(&[angle, -angle, angle, 0.0], duration, |a| {
            PoseSpec::operator().yaw(a)
        });
        play(caps, &frames).await
    }
}

pub struct TiltHead;

#[async_trait]
impl ExecutionUnit for TiltHead {
    async fn execute(&self, caps: &Capabilities<'_>, params: &Params) -> Result<Value, UnitError> {
        let p = ParamReader::new(params);
        let direction = p.choice("direction", TILT_DIRECTIONS)?;
        let angle = p.number_or("angle", TILT_ANGLE)?;
        let duration = p.duration_or("duration", GESTURE_DURATION)?;
        let roll = if direction == "left" { angle } else { -angle };
        play(caps, &[head(duration, PoseSpec::operator().roll(roll))]).await
    }
}

pub struct LookAtDirection;

#[async_trait]
impl ExecutionUnit for LookAtDirection {
    async fn execute(&self, caps: &Capabilities<'_>, params: &Params) -> Result<Value, UnitError> {
        let p = ParamReader::new(params);
        let direction = p.choice("direction", LOOK_DIRECTIONS)?;
        let duration = p.duration_or("duration", GESTURE_DURATION)?;
        let pose = match direction {
            "up" => PoseSpec::operator().pitch(-LOOK_PITCH),
            "down" => PoseSpec::operator().pitch(LOOK_PITCH),
            "left" => PoseSpec::operator().yaw(LOOK_YAW),
            "right" => PoseSpec::operator().yaw(-LOOK_YAW),
            _ => PoseSpec::operator(),
        };
        play(caps, &[head(duration, pose)]).await
    }
}

fn emotion_frames(emotion: &str) -> Vec<Keyframe> {
    let op = PoseSpec::operator;
    match emotion {
        "happy" => vec![
            head(0.5, op().z(10.0).pitch(-10.0)).antennas(30.0, 30.0),
            Keyframe::new(0.3).antennas(-10.0, -10.0),
            Keyframe::new(0.3).antennas(30.0, 30.0),
            neutral(0.5).antennas(0.0, 0.0),
        ],
        "sad" => vec![
            head(1.5, op().z(-10.0).pitch(20.0)).antennas(-60.0, -60.0),
            neutral(1.5).antennas(0.0, 0.0),
        ],
        "curious" => vec![
            head(0.8, op().roll(15.0).pitch(-5.0)).antennas(20.0, -20.0),
            head(0.8, op().roll(-15.0).pitch(-5.0)).antennas(-20.0, 20.0),
            neutral(0.6).antennas(0.0, 0.0),
        ],
        "surprised" => vec![
            head(0.3, op().z(15.0).pitch(-15.0)).antennas(60.0, 60.0),
            neutral(1.0).antennas(0.0, 0.0),
        ],
        "confused" => vec![
            head(0.6, op().roll(20.0)).antennas(30.0, -30.0),
            head(0.6, op().roll(-20.0)).antennas(-30.0, 30.0),
            neutral(0.6).antennas(0.0, 0.0),
        ],
        _ => vec![neutral(1.0).antennas(0.0, 0.0)],
    }
}

/// Head and antenna choreography for one of [`EMOTIONS`].
pub struct ExpressEmotion;

#[async_trait]
impl ExecutionUnit for ExpressEmotion {
    async fn execute(&self, caps: &Capabilities<'_>, params: &Params) -> Result<Value, UnitError> {
        let emotion = ParamReader::new(params).choice("emotion", EMOTIONS)?;
        tracing::debug!(emotion, "expressing emotion");
        play(caps, &emotion_frames(emotion)).await
    }
}

fn gesture_frames(gesture: &str) -> Vec<Keyframe> {
    let op = PoseSpec::operator;
    match gesture {
        "greeting" => vec![
            head(0.5, op().pitch(-10.0)).antennas(40.0, -40.0),
            Keyframe::new(0.4).antennas(-40.0, 40.0),
            Keyframe::new(0.4).antennas(40.0, -40.0),
            neutral(0.5).antennas(0.0, 0.0),
        ],
        "yes" => oscillate(&[NOD_ANGLE, 0.0, NOD_ANGLE, 0.0], GESTURE_DURATION, |a| op().pitch(a)),
        "no" => oscillate(&[SHAKE_ANGLE, -SHAKE_ANGLE, SHAKE_ANGLE, 0.0], GESTURE_DURATION, |a| {
            op().yaw(a)
        }),
        "thinking" => vec![
            head(1.0, op().roll(10.0).pitch(-15.0).yaw(15.0)).antennas(15.0, -15.0),
            neutral(1.0).antennas(0.0, 0.0),
        ],
        _ => vec![
            head(0.4, op().z(15.0).pitch(-15.0)).antennas(70.0, 70.0),
            Keyframe::new(0.3).antennas(-20.0, -20.0),
            Keyframe::new(0.3).antennas(70.0, 70.0),
            neutral(0.6).antennas(0.0, 0.0),
        ],
    }
}

/// Head and antenna choreography for one of [`GESTURES`].
pub struct PerformGesture;

#[async_trait]
impl ExecutionUnit for PerformGesture {
    async fn execute(&self, caps: &Capabilities<'_>, params: &Params) -> Result<Value, UnitError> {
        let gesture = ParamReader::new(params).choice("gesture", GESTURES)?;
        tracing::debug!(gesture, "performing gesture");
        play(caps, &gesture_frames(gesture)).await
    }
}
