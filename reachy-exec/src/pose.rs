//! Head pose construction.
//!
//! The daemon expects metres and radians. Units and catalog parameters speak
//! millimetres and degrees, so a [`PoseSpec`] records which units its fields use
//! and a [`PoseFactory`] normalises it.

use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PoseSpec {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    /// Positions are millimetres.
    pub mm: bool,
    /// Angles are degrees.
    pub degrees: bool,
}

impl PoseSpec {
    /// Neutral pose expressed in millimetres and degrees.
    pub fn operator() -> Self {
        Self {
            mm: true,
            degrees: true,
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f64, y: f64, z: f64) -> Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    pub fn rotated(mut self, roll: f64, pitch: f64, yaw: f64) -> Self {
        self.roll = roll;
        self.pitch = pitch;
        self.yaw = yaw;
        self
    }

    pub fn roll(mut self, roll: f64) -> Self {
        self.roll = roll;
        self
    }

    pub fn pitch(mut self, pitch: f64) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn yaw(mut self, yaw: f64) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn z(mut self, z: f64) -> Self {
        self.z = z;
        self
    }
}

/// Head pose in metres and radians, as sent to the daemon.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HeadPose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl From<HeadPose> for Value {
    fn from(p: HeadPose) -> Self {
        json!({
            "x": p.x,
            "y": p.y,
            "z": p.z,
            "roll": p.roll,
            "pitch": p.pitch,
            "yaw": p.yaw,
        })
    }
}

/// Pose construction capability handed to execution units.
pub trait PoseFactory: Send + Sync {
    fn head_pose(&self, spec: &PoseSpec) -> HeadPose;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPoses;

impl PoseFactory for StandardPoses {
    fn head_pose(&self, spec: &PoseSpec) -> HeadPose {
        create_head_pose(spec)
    }
}

pub fn create_head_pose(spec: &PoseSpec) -> HeadPose {
    let (x, y, z) = if spec.mm {
        (spec.x / 1000.0, spec.y / 1000.0, spec.z / 1000.0)
    } else {
        (spec.x, spec.y, spec.z)
    };
    let (roll, pitch, yaw) = if spec.degrees {
        (spec.roll.to_radians(), spec.pitch.to_radians(), spec.yaw.to_radians())
    } else {
        (spec.roll, spec.pitch, spec.yaw)
    };
    HeadPose {
        x,
        y,
        z,
        roll,
        pitch,
        yaw,
    }
}
