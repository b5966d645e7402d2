//! What the game needs from the board.

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::sequence::Color;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Idle,
}

/// Two line character display.
pub trait TextDisplay {
    fn show(&mut self, line_one: &str, line_two: &str);
}

/// Joystick with a push button. Reads are already debounced.
pub trait Joystick {
    fn direction(&mut self) -> Direction;
    fn pressed(&mut self) -> bool;
    /// Raw ADC sample of both axes.
    fn raw_xy(&mut self) -> (u16, u16);
}

/// The four colour switches, read raw.
pub trait ColorInputs {
    fn is_pressed(&mut self, color: Color) -> bool;
}

/// The four colour lights plus the buzzer.
pub trait ColorOutputs {
    fn set(&mut self, color: Color, on: bool);
    fn set_alert(&mut self, on: bool);
}

/// Counter advanced by the periodic tick interrupt.
pub trait TickClock {
    fn elapsed_ticks(&mut self) -> u16;
    fn reset(&mut self);
}

/// The collaborators a [`Game`](crate::Game) drives.
pub struct Board<S, J, I, L, C, D> {
    pub screen: S,
    pub joystick: J,
    pub buttons: I,
    pub lights: L,
    pub clock: C,
    pub delay: D,
}

/// Four pull-up switches, indexed by colour code.
pub struct ButtonPanel<P> {
    pins: [P; 4],
}

impl<P: InputPin> ButtonPanel<P> {
    pub fn new(red: P, blue: P, yellow: P, green: P) -> Self {
        ButtonPanel {
            pins: [red, blue, yellow, green],
        }
    }
}

impl<P: InputPin> ColorInputs for ButtonPanel<P> {
    fn is_pressed(&mut self, color: Color) -> bool {
        self.pins[color.index()].is_low().unwrap_or(false)
    }
}

/// Four colour LEDs and the buzzer line.
pub struct LightPanel<P, A> {
    lights: [P; 4],
    alert: A,
}

impl<P: OutputPin, A: OutputPin> LightPanel<P, A> {
    pub fn new(red: P, blue: P, yellow: P, green: P, alert: A) -> Self {
        LightPanel {
            lights: [red, blue, yellow, green],
            alert,
        }
    }
}

impl<P: OutputPin, A: OutputPin> ColorOutputs for LightPanel<P, A> {
    fn set(&mut self, color: Color, on: bool) {
        self.lights[color.index()].set_state(PinState::from(on)).ok();
    }

    fn set_alert(&mut self, on: bool) {
        self.alert.set_state(PinState::from(on)).ok();
    }
}

/// Log sink that drops everything.
pub struct NoLog;

impl ufmt::uWrite for NoLog {
    type Error = Infallible;

    fn write_str(&mut self, _s: &str) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};

    #[derive(Debug)]
    struct Broken;

    impl Error for Broken {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    struct FakePin {
        low: Result<bool, ()>,
        level: Option<bool>,
    }

    impl FakePin {
        fn reading(low: bool) -> Self {
            FakePin {
                low: Ok(low),
                level: None,
            }
        }
    }

    impl ErrorType for FakePin {
        type Error = Broken;
    }

    impl InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, Broken> {
            self.is_low().map(|low| !low)
        }

        fn is_low(&mut self) -> Result<bool, Broken> {
            self.low.map_err(|_| Broken)
        }
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Broken> {
            self.level = Some(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Broken> {
            self.level = Some(true);
            Ok(())
        }
    }

    #[test]
    fn switches_are_active_low() {
        let mut panel = ButtonPanel::new(
            FakePin::reading(false),
            FakePin::reading(true),
            FakePin::reading(false),
            FakePin {
                low: Err(()),
                level: None,
            },
        );

        assert!(!panel.is_pressed(Color::Red));
        assert!(panel.is_pressed(Color::Blue));
        assert!(!panel.is_pressed(Color::Yellow));
        assert!(!panel.is_pressed(Color::Green), "read errors count as released");
    }

    #[test]
    fn lights_follow_colour_codes() {
        let mut panel = LightPanel::new(
            FakePin::reading(false),
            FakePin::reading(false),
            FakePin::reading(false),
            FakePin::reading(false),
            FakePin::reading(false),
        );

        panel.set(Color::Yellow, true);
        panel.set_alert(true);
        panel.set_alert(false);

        assert_eq!(panel.lights[Color::Yellow.index()].level, Some(true));
        assert_eq!(panel.lights[Color::Red.index()].level, None);
        assert_eq!(panel.alert.level, Some(false));
    }

    #[test]
    fn no_log_accepts_anything() {
        assert!(ufmt::uwriteln!(&mut NoLog, "state {} -> {}", "A", 3u8).is_ok());
    }
}
