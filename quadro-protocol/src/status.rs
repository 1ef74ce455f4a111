//! Status word decoding.
//!
//! Maps the raw IMD, VIFC and MCU status words onto the states the
//! cluster can display. Every mapping is total: any 16-bit word decodes
//! to exactly one state, and more severe conditions shadow less severe
//! ones.

// IMD status word bits
const IMD_ISO_FAULT_MASK: u16 = 0x0003;
const IMD_DEVICE_ERROR: u16 = 1 << 2;
const IMD_CALIBRATING: u16 = 1 << 3;
const IMD_SELF_TEST: u16 = 1 << 4;
const IMD_WARNING: u16 = 1 << 5;

// VIFC status word bits
const VIFC_ISO_OFF: u16 = 1 << 0;
const VIFC_COM_ERROR_MASK: u16 = (1 << 1) | (1 << 2) | (1 << 4);
const VIFC_STALE_DATA: u16 = 1 << 8;
const VIFC_SELF_TEST_MASK: u16 = (1 << 12) | (1 << 13);

// MCU status flag bits. Bits 2-3 double as the gear field, see
// `Gear::from_flags`.
const MCU_BLOCKED: u16 = 1 << 0;
const MCU_STOPPED: u16 = 1 << 1;
const MCU_LIMITED: u16 = 1 << 2;
const MCU_WARNING: u16 = 1 << 3;

/// Insulation monitoring device state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImdState {
    /// Isolation fault detected
    IsoError,
    /// Device error
    Error,
    /// Isolation resistance below the warning threshold
    Warn,
    /// Self test running
    SelfTest,
    /// Calibration running
    Calibrating,
    /// Monitoring, no findings
    Ok,
}

impl ImdState {
    /// Decode the IMD status word
    ///
    /// A warning raised while a calibration or self test is running
    /// counts as an isolation fault.
    pub fn from_status(status: u16) -> Self {
        if status & IMD_ISO_FAULT_MASK != 0
            || (status & IMD_WARNING != 0
                && status & (IMD_CALIBRATING | IMD_SELF_TEST) != 0)
        {
            ImdState::IsoError
        } else if status & IMD_DEVICE_ERROR != 0 {
            ImdState::Error
        } else if status & IMD_WARNING != 0 {
            ImdState::Warn
        } else if status & IMD_SELF_TEST != 0 {
            ImdState::SelfTest
        } else if status & IMD_CALIBRATING != 0 {
            ImdState::Calibrating
        } else {
            ImdState::Ok
        }
    }

    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            ImdState::IsoError => "ISO ERROR",
            ImdState::Error => "IMD ERROR",
            ImdState::Warn => "IMD WARN",
            ImdState::SelfTest => "IMD TEST",
            ImdState::Calibrating => "IMD CALIB",
            ImdState::Ok => "IMD OK",
        }
    }
}

/// Vehicle interface controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VifcState {
    /// Lost contact with another drive-system node
    ComError,
    /// Forwarded data is stale
    Stale,
    /// Power-on self test failed
    SelfTestError,
    /// Isolation monitoring active
    IsoActive,
    /// Nominal, isolation monitoring switched off
    Ok,
}

impl VifcState {
    /// Decode the VIFC status word
    pub fn from_status(status: u16) -> Self {
        if status & VIFC_COM_ERROR_MASK != 0 {
            VifcState::ComError
        } else if status & VIFC_STALE_DATA != 0 {
            VifcState::Stale
        } else if status & VIFC_SELF_TEST_MASK != 0 {
            VifcState::SelfTestError
        } else if status & VIFC_ISO_OFF == 0 {
            VifcState::IsoActive
        } else {
            VifcState::Ok
        }
    }

    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            VifcState::ComError => "VI COM ERR",
            VifcState::Stale => "VI STALE",
            VifcState::SelfTestError => "VI TST ERR",
            VifcState::IsoActive => "VI ISO ON",
            VifcState::Ok => "VIFC OK",
        }
    }
}

/// Motor controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum McuState {
    /// Derating or thermal warning
    Warn,
    /// Output power limited
    Limit,
    /// Drive stopped by the controller
    Stop,
    /// Drive blocked, will not start
    Block,
    /// Nominal
    Ok,
}

impl McuState {
    /// Decode the MCU status flags
    pub fn from_flags(flags: u16) -> Self {
        if flags & MCU_WARNING != 0 {
            McuState::Warn
        } else if flags & MCU_LIMITED != 0 {
            McuState::Limit
        } else if flags & MCU_STOPPED != 0 {
            McuState::Stop
        } else if flags & MCU_BLOCKED != 0 {
            McuState::Block
        } else {
            McuState::Ok
        }
    }

    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            McuState::Warn => "MCU WARN",
            McuState::Limit => "MCU LIMIT",
            McuState::Stop => "MCU STOP",
            McuState::Block => "MCU BLOCK",
            McuState::Ok => "MCU OK",
        }
    }
}

/// Selected gear as reported in the MCU status flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gear {
    Neutral,
    Reverse,
    Drive,
}

impl Gear {
    /// Decode the gear field from the MCU status flags
    ///
    /// Returns `None` for the reserved fourth encoding.
    pub fn from_flags(flags: u16) -> Option<Self> {
        match (flags >> 2) & 0x3 {
            0 => Some(Gear::Neutral),
            1 => Some(Gear::Reverse),
            2 => Some(Gear::Drive),
            _ => None,
        }
    }

    /// Single-letter display label
    pub fn label(&self) -> &'static str {
        match self {
            Gear::Neutral => "N",
            Gear::Reverse => "R",
            Gear::Drive => "D",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imd_state_tiers() {
        assert_eq!(ImdState::from_status(0x0000), ImdState::Ok);
        assert_eq!(ImdState::from_status(0x0008), ImdState::Calibrating);
        assert_eq!(ImdState::from_status(0x0010), ImdState::SelfTest);
        assert_eq!(ImdState::from_status(0x0020), ImdState::Warn);
        assert_eq!(ImdState::from_status(0x0004), ImdState::Error);
        assert_eq!(ImdState::from_status(0x0001), ImdState::IsoError);
        assert_eq!(ImdState::from_status(0x0002), ImdState::IsoError);

        // Device error shadows a plain warning
        assert_eq!(ImdState::from_status(0x0024), ImdState::Error);
    }

    #[test]
    fn test_imd_warning_during_test_is_iso_error() {
        assert_eq!(ImdState::from_status(0x0028), ImdState::IsoError); // warn + calib
        assert_eq!(ImdState::from_status(0x0030), ImdState::IsoError); // warn + test
    }

    #[test]
    fn test_imd_iso_fault_dominates() {
        for status in 0u16..=u16::MAX {
            if status & 0x0003 != 0 {
                assert_eq!(ImdState::from_status(status), ImdState::IsoError);
            }
        }
    }

    #[test]
    fn test_imd_labels() {
        assert_eq!(ImdState::from_status(0x0000).label(), "IMD OK");
        assert_eq!(ImdState::from_status(0x0001).label(), "ISO ERROR");
        assert_eq!(ImdState::from_status(0x0004).label(), "IMD ERROR");
        assert_eq!(ImdState::from_status(0x0008).label(), "IMD CALIB");
        assert_eq!(ImdState::from_status(0x0010).label(), "IMD TEST");
        assert_eq!(ImdState::from_status(0x0020).label(), "IMD WARN");
    }

    #[test]
    fn test_vifc_state_tiers() {
        assert_eq!(VifcState::from_status(0x0001), VifcState::Ok);
        assert_eq!(VifcState::from_status(0x0000), VifcState::IsoActive);
        assert_eq!(VifcState::from_status(0x0002), VifcState::ComError);
        assert_eq!(VifcState::from_status(0x0004), VifcState::ComError);
        assert_eq!(VifcState::from_status(0x0010), VifcState::ComError);
        assert_eq!(VifcState::from_status(0x0100), VifcState::Stale);
        assert_eq!(VifcState::from_status(0x1000), VifcState::SelfTestError);
        assert_eq!(VifcState::from_status(0x2000), VifcState::SelfTestError);

        // Com errors shadow stale data
        assert_eq!(VifcState::from_status(0x0102), VifcState::ComError);
    }

    #[test]
    fn test_vifc_com_error_dominates() {
        for status in 0u16..=u16::MAX {
            if status & 0x0016 != 0 {
                assert_eq!(VifcState::from_status(status), VifcState::ComError);
            }
        }
    }

    #[test]
    fn test_vifc_labels() {
        assert_eq!(VifcState::from_status(0x0000).label(), "VI ISO ON");
        assert_eq!(VifcState::from_status(0x0001).label(), "VIFC OK");
        assert_eq!(VifcState::from_status(0x0002).label(), "VI COM ERR");
        assert_eq!(VifcState::from_status(0x0100).label(), "VI STALE");
        assert_eq!(VifcState::from_status(0x1000).label(), "VI TST ERR");
    }

    #[test]
    fn test_mcu_state_tiers() {
        assert_eq!(McuState::from_flags(0x0000), McuState::Ok);
        assert_eq!(McuState::from_flags(0x0001), McuState::Block);
        assert_eq!(McuState::from_flags(0x0002), McuState::Stop);
        assert_eq!(McuState::from_flags(0x0004), McuState::Limit);
        assert_eq!(McuState::from_flags(0x0008), McuState::Warn);

        // Warning shadows the limit flag
        assert_eq!(McuState::from_flags(0x000C), McuState::Warn);
    }

    #[test]
    fn test_mcu_labels() {
        assert_eq!(McuState::from_flags(0x0000).label(), "MCU OK");
        assert_eq!(McuState::from_flags(0x0001).label(), "MCU BLOCK");
        assert_eq!(McuState::from_flags(0x0002).label(), "MCU STOP");
        assert_eq!(McuState::from_flags(0x0004).label(), "MCU LIMIT");
        assert_eq!(McuState::from_flags(0x0008).label(), "MCU WARN");
    }

    #[test]
    fn test_gear_field() {
        assert_eq!(Gear::from_flags(0x0000), Some(Gear::Neutral));
        assert_eq!(Gear::from_flags(0x0004), Some(Gear::Reverse));
        assert_eq!(Gear::from_flags(0x0008), Some(Gear::Drive));
        assert_eq!(Gear::from_flags(0x000C), None);

        // Other flag bits do not disturb the gear field
        assert_eq!(Gear::from_flags(0xFF08), Some(Gear::Drive));

        assert_eq!(Gear::Neutral.label(), "N");
        assert_eq!(Gear::Reverse.label(), "R");
        assert_eq!(Gear::Drive.label(), "D");
    }
}
