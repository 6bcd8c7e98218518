use std::time::Duration;

use async_trait::async_trait;
use reachy_core::Params;
use serde_json::{json, Map, Value};

use crate::pose::PoseSpec;
use crate::transport::TransportRequest;
use crate::unit::{Capabilities, ExecutionUnit, ParamReader, UnitError};

pub const GOTO_ENDPOINT: &str = "/api/move/goto";

const RESET_DURATION: f64 = 2.0;
const MOVE_DURATION: f64 = 2.0;

/// One `goto` target. Antenna angles are degrees, left then right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub head: Option<PoseSpec>,
    pub antennas: Option<[f64; 2]>,
    pub duration: f64,
}

impl Keyframe {
    pub fn new(duration: f64) -> Self {
        Self {
            head: None,
            antennas: None,
            duration,
        }
    }

    pub fn head(mut self, pose: PoseSpec) -> Self {
        self.head = Some(pose);
        self
    }

    pub fn antennas(mut self, left: f64, right: f64) -> Self {
        self.antennas = Some([left, right]);
        self
    }

    fn payload(&self, caps: &Capabilities<'_>) -> Value {
        let mut body = Map::new();
        if let Some(head) = &self.head {
            body.insert("head_pose".into(), caps.poses.head_pose(head).into());
        }
        if let Some([left, right]) = self.antennas {
            body.insert(
                "antennas".into(),
                json!([left.to_radians(), right.to_radians()]),
            );
        }
        body.insert("duration".into(), json!(self.duration));
        Value::Object(body)
    }
}

/// Sends each keyframe and waits for it to finish before the next one.
///
/// A single keyframe returns the daemon response as is; several are reported as
/// `{"frames": n, "moves": [...]}`.
pub(crate) async fn play(caps: &Capabilities<'_>, frames: &[Keyframe]) -> Result<Value, UnitError> {
    let mut moves = Vec::with_capacity(frames.len());
    for frame in frames {
        let req = TransportRequest::post(GOTO_ENDPOINT).with_json(frame.payload(caps));
        moves.push(caps.transport.call(req).await?);
        settle(frame.duration).await;
    }
    if moves.len() == 1 {
        return Ok(moves.remove(0));
    }
    Ok(json!({ "frames": frames.len(), "moves": moves }))
}

async fn settle(secs: f64) {
    if let Ok(wait) = Duration::try_from_secs_f64(secs) {
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
    }
}

pub struct ResetHead;

#[async_trait]
impl ExecutionUnit for ResetHead {
    async fn execute(&self, caps: &Capabilities<'_>, _params: &Params) -> Result<Value, UnitError> {
        play(caps, &[Keyframe::new(RESET_DURATION).head(PoseSpec::default())]).await
    }
}

pub struct ResetAntennas;

#[async_trait]
impl ExecutionUnit for ResetAntennas {
    async fn execute(&self, caps: &Capabilities<'_>, _params: &Params) -> Result<Value, UnitError> {
        play(caps, &[Keyframe::new(RESET_DURATION).antennas(0.0, 0.0)]).await
    }
}

/// Head pose from x/y/z in millimetres and roll/pitch/yaw in degrees.
pub struct MoveHead;

#[async_trait]
impl ExecutionUnit for MoveHead {
    async fn execute(&self, caps: &Capabilities<'_>, params: &Params) -> Result<Value, UnitError> {
        let p = ParamReader::new(params);
        let pose = PoseSpec::operator()
            .at(p.number_or("x", 0.0)?, p.number_or("y", 0.0)?, p.number_or("z", 0.0)?)
            .rotated(
                p.number_or("roll", 0.0)?,
                p.number_or("pitch", 0.0)?,
                p.number_or("yaw", 0.0)?,
            );
        let duration = p.duration_or("duration", MOVE_DURATION)?;
        play(caps, &[Keyframe::new(duration).head(pose)]).await
    }
}

pub struct MoveAntennas;

#[async_trait]
impl ExecutionUnit for MoveAntennas {
    async fn execute(&self, caps: &Capabilities<'_>, params: &Params) -> Result<Value, UnitError> {
        let p = ParamReader::new(params);
        let left = p.number_or("left", 0.0)?;
        let right = p.number_or("right", 0.0)?;
        let duration = p.duration_or("duration", MOVE_DURATION)?;
        play(caps, &[Keyframe::new(duration).antennas(left, right)]).await
    }
}
