//! Tachometer output task
//!
//! Follows the published RPM target and drives the air-core tach
//! movement with a proportional PWM duty.

use defmt::*;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};

use quadro_core::traits::{rpm_to_duty, TachOutput};

use crate::channels::TACH_RPM;

/// PWM-driven tachometer movement
pub struct PwmTach {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl PwmTach {
    /// Take over a PWM slice and park the needle
    pub fn new(mut pwm: Pwm<'static>) -> Self {
        let mut config = PwmConfig::default();
        // Full u16 range so duty maps one-to-one
        config.top = 0xFFFF;
        config.compare_b = 0;
        pwm.set_config(&config);

        Self { pwm, config }
    }
}

impl TachOutput for PwmTach {
    fn set_duty(&mut self, duty: u16) {
        self.config.compare_b = duty;
        self.pwm.set_config(&self.config);
    }
}

/// Tachometer task - follows the published RPM target
#[embassy_executor::task]
pub async fn tach_task(pwm: Pwm<'static>) {
    info!("Tach task started");

    let mut tach = PwmTach::new(pwm);

    loop {
        let rpm = TACH_RPM.wait().await;
        let duty = rpm_to_duty(rpm);
        trace!("Tach: {} RPM -> duty {}", rpm, duty);
        tach.set_duty(duty);
    }
}
