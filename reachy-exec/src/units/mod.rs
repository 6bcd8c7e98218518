//! Execution units compiled into the binary, addressed by catalog `execution.unit` names.

mod choreography;
mod motion;
mod request;

use std::sync::Arc;

use crate::transport::Method;
use crate::unit::ExecutionUnit;

pub use choreography::{ExpressEmotion, LookAtDirection, NodHead, PerformGesture, ShakeHead, TiltHead};
pub use motion::{Keyframe, MoveAntennas, MoveHead, ResetAntennas, ResetHead, GOTO_ENDPOINT};
pub use request::{RequestUnit, StateProjection};

pub const STATE_ENDPOINT: &str = "/api/state/full";
pub const MOTORS_ENABLED_ENDPOINT: &str = "/api/motors/set_mode/enabled";
pub const MOTORS_DISABLED_ENDPOINT: &str = "/api/motors/set_mode/disabled";
pub const MOTORS_STATUS_ENDPOINT: &str = "/api/motors/status";
pub const DAEMON_STATUS_ENDPOINT: &str = "/api/daemon/status";

fn shared(unit: impl ExecutionUnit + 'static) -> Arc<dyn ExecutionUnit> {
    Arc::new(unit)
}

/// Every built-in unit with the name catalogs use to reference it.
pub fn builtin_units() -> Vec<(&'static str, Arc<dyn ExecutionUnit>)> {
    vec![
        ("turn_on_robot", shared(RequestUnit::new(Method::Post, MOTORS_ENABLED_ENDPOINT))),
        ("turn_off_robot", shared(RequestUnit::new(Method::Post, MOTORS_DISABLED_ENDPOINT))),
        ("stop_all_movements", shared(RequestUnit::new(Method::Post, MOTORS_DISABLED_ENDPOINT))),
        ("get_robot_state", shared(RequestUnit::new(Method::Get, STATE_ENDPOINT))),
        ("get_head_state", shared(StateProjection::new(STATE_ENDPOINT, "head_pose"))),
        ("get_antennas_state", shared(StateProjection::new(STATE_ENDPOINT, "antennas_position"))),
        ("get_power_state", shared(RequestUnit::new(Method::Get, MOTORS_STATUS_ENDPOINT))),
        ("get_health_status", shared(RequestUnit::new(Method::Get, DAEMON_STATUS_ENDPOINT))),
        ("reset_head", shared(ResetHead)),
        ("reset_antennas", shared(ResetAntennas)),
        ("move_head", shared(MoveHead)),
        ("move_antennas", shared(MoveAntennas)),
        ("nod_head", shared(NodHead)),
        ("shake_head", shared(ShakeHead)),
        ("tilt_head", shared(TiltHead)),
        ("look_at_direction", shared(LookAtDirection)),
        ("express_emotion", shared(ExpressEmotion)),
        ("perform_gesture", shared(PerformGesture)),
    ]
}
