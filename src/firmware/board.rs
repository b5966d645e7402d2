use core::cell::Cell;

use ag_lcd::LcdDisplay;
use arduino_hal::adc::Channel;
use arduino_hal::hal::port::PD6;
use arduino_hal::port::mode::{Input, PullUp};
use arduino_hal::port::Pin;
use avr_device::interrupt::Mutex;
use embedded_hal::{delay::DelayNs, digital::OutputPin};
use simon::{Direction, Joystick, TextDisplay, TickClock};

// Timer1 runs at 16 MHz / 256.
pub const TIMER_HZ: u32 = 16_000_000 / 256;
const TCCR1B_CTC_PRESCALE_256: u8 = (1 << 3) | (1 << 2);
const OCIE1A: u8 = 1 << 1;

const ADC_SAMPLES: u32 = 16;
const CALIBRATION_READS: u32 = 32;
// 10-bit ADC, so a quarter of the usual 12-bit dead zone.
const DEAD_ZONE: i16 = 20;

static TICKS: Mutex<Cell<u16>> = Mutex::new(Cell::new(0));

/// Called from the `TIMER1_COMPA` interrupt.
pub fn on_tick() {
    avr_device::interrupt::free(|cs| {
        let ticks = TICKS.borrow(cs);
        ticks.set(ticks.get().wrapping_add(1));
    })
}

/// Tick counter fed by Timer1 in CTC mode.
pub struct Ticks;

impl Ticks {
    /// `compare` comes from [`Config::tick_compare`](simon::Config::tick_compare).
    pub fn start(tc1: arduino_hal::pac::TC1, compare: u16) -> Self {
        tc1.tccr1a.write(|w| unsafe { w.bits(0) });
        tc1.ocr1a.write(|w| unsafe { w.bits(compare) });
        tc1.tccr1b.write(|w| unsafe { w.bits(TCCR1B_CTC_PRESCALE_256) });
        tc1.timsk1.write(|w| unsafe { w.bits(OCIE1A) });
        Ticks
    }
}

impl TickClock for Ticks {
    fn elapsed_ticks(&mut self) -> u16 {
        avr_device::interrupt::free(|cs| TICKS.borrow(cs).get())
    }

    fn reset(&mut self) {
        avr_device::interrupt::free(|cs| TICKS.borrow(cs).set(0))
    }
}

/// Analog joystick on A0/A1 with its push button on D6.
pub struct Stick {
    adc: arduino_hal::Adc,
    x: Channel,
    y: Channel,
    button: Pin<Input<PullUp>, PD6>,
    center_x: u16,
}

impl Stick {
    pub fn new(adc: arduino_hal::Adc, x: Channel, y: Channel, button: Pin<Input<PullUp>, PD6>) -> Self {
        let mut stick = Stick {
            adc,
            x,
            y,
            button,
            center_x: 0,
        };
        stick.calibrate();
        stick
    }

    /// The stick must be left alone at boot.
    fn calibrate(&mut self) {
        let mut sum: u32 = 0;
        for _ in 0..CALIBRATION_READS {
            sum += self.read_x() as u32;
        }
        self.center_x = (sum / CALIBRATION_READS) as u16;
    }

    fn read_x(&mut self) -> u16 {
        average(&mut self.adc, &self.x)
    }

    fn read_y(&mut self) -> u16 {
        average(&mut self.adc, &self.y)
    }
}

fn average(adc: &mut arduino_hal::Adc, channel: &Channel) -> u16 {
    let mut sum: u32 = 0;
    for _ in 0..ADC_SAMPLES {
        sum += adc.read_blocking(channel) as u32;
    }
    (sum / ADC_SAMPLES) as u16
}

impl Joystick for Stick {
    fn direction(&mut self) -> Direction {
        let diff = self.read_x() as i16 - self.center_x as i16;
        if diff > DEAD_ZONE {
            Direction::Up
        } else if diff < -DEAD_ZONE {
            Direction::Down
        } else {
            Direction::Idle
        }
    }

    fn pressed(&mut self) -> bool {
        if !self.button.is_low() {
            return false;
        }
        arduino_hal::delay_ms(20);
        self.button.is_low()
    }

    fn raw_xy(&mut self) -> (u16, u16) {
        (self.read_x(), self.read_y())
    }
}

/// 16x2 HD44780 behind the PCF8574 backpack.
pub struct Lcd<T, D>
where
    T: OutputPin + Sized,
    D: DelayNs + Sized,
{
    lcd: LcdDisplay<T, D>,
}

impl<T, D> Lcd<T, D>
where
    T: OutputPin + Sized,
    D: DelayNs + Sized,
{
    pub fn new(lcd: LcdDisplay<T, D>) -> Self {
        Lcd { lcd }
    }
}

impl<T, D> TextDisplay for Lcd<T, D>
where
    T: OutputPin + Sized,
    D: DelayNs + Sized,
{
    fn show(&mut self, line_one: &str, line_two: &str) {
        self.lcd.clear();
        self.lcd.set_position(0, 0);
        self.lcd.print(line_one);
        self.lcd.set_position(0, 1);
        self.lcd.print(line_two);
    }
}
