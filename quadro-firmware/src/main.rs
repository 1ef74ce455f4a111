//! Quadro - EV Instrument Cluster Firmware
//!
//! Main firmware binary for RP2040-based instrument clusters.
//! Listens on the vehicle's RS485 telemetry bus and drives the cluster
//! face: speedometer, odometer, tachometer, temperature dial and
//! drive-system status.
//!
//! Named after the Italian "quadro strumenti" - the instrument panel.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use quadro_core::config::ClusterConfig;
use quadro_core::odometer::OdometerSnapshot;
use quadro_hal_rp2040::flash::Rp2040FlashStorage;

use crate::config::ClusterPersistence;
use crate::tasks::{ButtonTaskConfig, WheelSensorConfig};

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Quadro firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Load configuration and odometer totals from flash
    let storage = Rp2040FlashStorage::new(p.FLASH, p.DMA_CH0);
    let mut persistence = ClusterPersistence::new(storage);

    let config = load_cluster_config(&mut persistence).await;
    let odometer = load_odometer(&mut persistence).await;

    // Setup UART for the telemetry bus (receive only, the cluster never talks)
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();

    info!("UART initialized for telemetry reception");

    // Wheel speed sensor (hall sensor, pulses low on magnet pass)
    let wheel_sensor = Input::new(p.PIN_22, Pull::Up);

    // Mode button (pulls the line low when pressed)
    let button = Input::new(p.PIN_16, Pull::Up);
    let button_config = ButtonTaskConfig {
        long_press_ms: config.ui.long_press_ms,
        ..Default::default()
    };

    // Tachometer movement on PWM slice 7 channel B (GPIO15)
    let tach_pwm = Pwm::new_output_b(p.PWM_SLICE7, p.PIN_15, PwmConfig::default());

    info!("Sensor and gauge pins initialized");

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::telemetry_rx_task(rx)).unwrap();
    spawner
        .spawn(tasks::wheel_pulse_task(wheel_sensor, WheelSensorConfig::default()))
        .unwrap();
    spawner.spawn(tasks::button_task(button, button_config)).unwrap();
    spawner
        .spawn(tasks::odometer_task(persistence, config.wheel, odometer))
        .unwrap();
    spawner
        .spawn(tasks::cluster_task(config.ui.clone(), config.link))
        .unwrap();
    spawner.spawn(tasks::tach_task(tach_pwm)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Load the cluster configuration from flash
///
/// Falls back to compiled-in defaults when flash is empty or the
/// stored record fails validation.
async fn load_cluster_config(persistence: &mut ClusterPersistence<'static>) -> ClusterConfig {
    match persistence.load_config().await {
        Ok(config) if config.is_valid() => {
            info!("Loaded configuration from flash");
            config
        }
        Ok(_) => {
            warn!("Stored configuration is out of range, using defaults");
            ClusterConfig::default()
        }
        Err(_) => {
            info!("No valid configuration in flash, using defaults");
            ClusterConfig::default()
        }
    }
}

/// Load the persisted odometer totals
///
/// A fresh board starts at zero.
async fn load_odometer(persistence: &mut ClusterPersistence<'static>) -> OdometerSnapshot {
    match persistence.load_odometer().await {
        Ok(snapshot) => {
            info!("Odometer restored: {} mm total", snapshot.total_mm);
            snapshot
        }
        Err(_) => {
            info!("No odometer record in flash, starting at zero");
            OdometerSnapshot::default()
        }
    }
}
