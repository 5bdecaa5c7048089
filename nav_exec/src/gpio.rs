//! # GPIO
//!
//! The start button and the indicator LED are wired directly to the single board computer's GPIO
//! header. On other hosts (development machines, CI) the pins are replaced by stand-ins which hold
//! their state in memory, so the exec can run without the hardware.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Highest BCM pin number broken out on the 40 pin header.
pub const MAX_HEADER_PIN: u8 = 27;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// The indicator LED, lit while autonomous navigation is running.
pub trait IndicatorLed {
    /// Set the LED on or off.
    fn set(&mut self, on: bool) -> Result<(), GpioError>;

    /// Returns true if the LED is currently on.
    fn is_on(&self) -> bool;
}

/// The start button. The pin reads high while the button is held down.
pub trait StartButton {
    fn is_pressed(&self) -> bool;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Pin assignments, using BCM numbering.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GpioParams {
    pub button_pin: u8,
    pub indicator_pin: u8,
}

/// In-memory indicator used when there is no GPIO hardware.
#[derive(Debug, Default)]
pub struct VirtualIndicator {
    on: bool,
}

/// In-memory start button used when there is no GPIO hardware.
#[derive(Debug, Default)]
pub struct VirtualButton {
    pub pressed: bool,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum GpioError {
    #[error("BCM pin {0} is not on the GPIO header")]
    InvalidPin(u8),

    #[cfg(all(target_arch = "arm", target_os = "linux"))]
    #[error("GPIO error: {0}")]
    Rppal(rppal::gpio::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl GpioParams {
    /// Check both pins are on the header.
    pub fn validate(&self) -> Result<(), GpioError> {
        for pin in [self.button_pin, self.indicator_pin].iter() {
            if *pin > MAX_HEADER_PIN {
                return Err(GpioError::InvalidPin(*pin));
            }
        }

        Ok(())
    }
}

impl IndicatorLed for VirtualIndicator {
    fn set(&mut self, on: bool) -> Result<(), GpioError> {
        self.on = on;
        Ok(())
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

impl StartButton for VirtualButton {
    fn is_pressed(&self) -> bool {
        self.pressed
    }
}

#[cfg(all(target_arch = "arm", target_os = "linux"))]
mod hw {
    use super::*;
    use rppal::gpio::{Gpio, InputPin, OutputPin};

    /// Indicator LED on a GPIO output pin.
    pub struct GpioIndicator {
        pin: OutputPin,
    }

    /// Start button on a GPIO input pin, pulled down so that it reads low when released.
    pub struct GpioButton {
        pin: InputPin,
    }

    impl GpioIndicator {
        pub fn new(gpio: &Gpio, pin: u8) -> Result<Self, GpioError> {
            let mut pin = gpio.get(pin).map_err(GpioError::Rppal)?.into_output();
            pin.set_low();

            Ok(Self { pin })
        }
    }

    impl GpioButton {
        pub fn new(gpio: &Gpio, pin: u8) -> Result<Self, GpioError> {
            let pin = gpio
                .get(pin)
                .map_err(GpioError::Rppal)?
                .into_input_pulldown();

            Ok(Self { pin })
        }
    }

    impl IndicatorLed for GpioIndicator {
        fn set(&mut self, on: bool) -> Result<(), GpioError> {
            if on {
                self.pin.set_high()
            } else {
                self.pin.set_low()
            }
            Ok(())
        }

        fn is_on(&self) -> bool {
            self.pin.is_set_high()
        }
    }

    impl StartButton for GpioButton {
        fn is_pressed(&self) -> bool {
            self.pin.is_high()
        }
    }

    // The LED must not be left lit when the exec stops
    impl Drop for GpioIndicator {
        fn drop(&mut self) {
            self.pin.set_low();
        }
    }

    pub fn open(
        params: &GpioParams,
    ) -> Result<(Box<dyn IndicatorLed>, Box<dyn StartButton>), GpioError> {
        let gpio = Gpio::new().map_err(GpioError::Rppal)?;

        Ok((
            Box::new(GpioIndicator::new(&gpio, params.indicator_pin)?),
            Box::new(GpioButton::new(&gpio, params.button_pin)?),
        ))
    }
}

#[cfg(all(target_arch = "arm", target_os = "linux"))]
pub use hw::{GpioButton, GpioIndicator};

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Open the indicator and start button.
#[cfg(all(target_arch = "arm", target_os = "linux"))]
pub fn open(
    params: &GpioParams,
) -> Result<(Box<dyn IndicatorLed>, Box<dyn StartButton>), GpioError> {
    params.validate()?;
    hw::open(params)
}

/// Open the indicator and start button.
///
/// There is no GPIO on this host so virtual pins are returned.
#[cfg(not(all(target_arch = "arm", target_os = "linux")))]
pub fn open(
    params: &GpioParams,
) -> Result<(Box<dyn IndicatorLed>, Box<dyn StartButton>), GpioError> {
    params.validate()?;

    log::warn!(
        "No GPIO on this host, using virtual pins in place of the button (pin {}) and indicator \
        (pin {})",
        params.button_pin, params.indicator_pin
    );

    Ok((
        Box::new(VirtualIndicator::default()),
        Box::new(VirtualButton::default()),
    ))
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_virtual_pins() {
        let mut led = VirtualIndicator::default();
        assert!(!led.is_on());
        led.set(true).unwrap();
        assert!(led.is_on());

        let mut button = VirtualButton::default();
        assert!(!button.is_pressed());
        button.pressed = true;
        assert!(button.is_pressed());
    }

    #[test]
    fn test_params() {
        let params: GpioParams =
            util::params::load_from_str("button_pin = 17\nindicator_pin = 27").unwrap();

        assert_eq!(params.button_pin, 17);
        assert_eq!(params.indicator_pin, 27);
        assert!(params.validate().is_ok());

        let params = GpioParams {
            button_pin: 40,
            indicator_pin: 27,
        };
        assert!(matches!(params.validate(), Err(GpioError::InvalidPin(40))));
        assert!(open(&params).is_err());
    }
}
