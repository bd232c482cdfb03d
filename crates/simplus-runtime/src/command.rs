//! [`RobotCommand`] – what a game client asks the robot to do in one tick.

use serde::{Deserialize, Serialize};
use simplus_hal::{DifferentialDrive, IndicatorColor, RobotDriver};
use simplus_types::{ActionRequest, SimError};

/// Body velocity, indicator colour and the actions to score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotCommand {
    /// Forward velocity in m/s.
    pub linear: f64,
    /// Turn rate in rad/s, counter-clockwise positive.
    pub angular: f64,
    pub indicator: IndicatorColor,
    pub actions: Vec<ActionRequest>,
}

impl RobotCommand {
    /// Push the motion and indicator parts of the command to `driver`.
    /// Actions are scored separately by the tick runner.
    pub fn apply(
        &self,
        driver: &mut impl RobotDriver,
        drive: &DifferentialDrive,
    ) -> Result<(), SimError> {
        drive.apply(driver, self.linear, self.angular)?;
        driver.set_indicator_color(self.indicator)
    }
}
