//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicU32;

use quadro_core::link::LinkStats;
use quadro_core::odometer::OdometerReading;
use quadro_core::ui::ButtonAction;
use quadro_protocol::TelemetryRecord;

/// Channel capacity for classified button presses
const BUTTON_CHANNEL_SIZE: usize = 4;

/// Latest accepted telemetry record (updated by the RX task)
pub static TELEMETRY: Signal<CriticalSectionRawMutex, TelemetryRecord> = Signal::new();

/// Receiver bookkeeping for link supervision (updated by the RX task)
pub static LINK_STATS: Signal<CriticalSectionRawMutex, LinkStats> = Signal::new();

/// Tachometer target in RPM (updated by the RX task, parked by the
/// cluster task when the link goes quiet)
pub static TACH_RPM: Signal<CriticalSectionRawMutex, u16> = Signal::new();

/// Odometer reading for the display (updated by the odometer task)
pub static ODOMETER: Signal<CriticalSectionRawMutex, OdometerReading> = Signal::new();

/// Classified presses of the mode button
pub static BUTTON_EVENTS: Channel<CriticalSectionRawMutex, ButtonAction, BUTTON_CHANNEL_SIZE> =
    Channel::new();

/// Request to zero the trip counter (consumed by the odometer task)
pub static TRIP_RESET: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Wheel sensor pulses since the odometer task last drained the count
pub static WHEEL_PULSES: AtomicU32 = AtomicU32::new(0);
