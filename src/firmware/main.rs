#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

#[cfg(target_arch = "avr")]
mod board;

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[avr_device::interrupt(atmega328p)]
#[allow(non_snake_case)]
fn TIMER1_COMPA() {
    board::on_tick();
}

#[cfg(target_arch = "avr")]
#[arduino_hal::entry]
fn main() -> ! {
    use ag_lcd::{Cursor, Display, LcdDisplay, Lines};
    use port_expander::dev::pcf8574::Pcf8574;
    use simon::{Board, ButtonPanel, Config, Game, LightPanel};

    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);

    let mut serial = arduino_hal::default_serial!(dp, pins, 57600);

    let config = Config::DEFAULT;
    let compare = config.tick_compare(board::TIMER_HZ).unwrap();
    let clock = board::Ticks::start(dp.TC1, compare);

    let mut adc = arduino_hal::Adc::new(dp.ADC, Default::default());
    let x_axis = pins.a0.into_analog_input(&mut adc).into_channel();
    let y_axis = pins.a1.into_analog_input(&mut adc).into_channel();
    let joystick = board::Stick::new(adc, x_axis, y_axis, pins.d6.into_pull_up_input());

    let buttons = ButtonPanel::new(
        pins.d2.into_pull_up_input().downgrade(), // red
        pins.d3.into_pull_up_input().downgrade(), // blue
        pins.d4.into_pull_up_input().downgrade(), // yellow
        pins.d5.into_pull_up_input().downgrade(), // green
    );

    let lights = LightPanel::new(
        pins.d8.into_output().downgrade(),
        pins.d9.into_output().downgrade(),
        pins.d10.into_output().downgrade(),
        pins.d11.into_output().downgrade(),
        pins.d7.into_output(), // buzzer
    );

    let sda = pins.a4.into_pull_up_input();
    let scl = pins.a5.into_pull_up_input();
    let i2c_bus = arduino_hal::i2c::I2c::new(dp.TWI, sda, scl, 50000);
    let mut i2c_expander = Pcf8574::new(i2c_bus, true, true, true);

    let lcd: LcdDisplay<_, _> = LcdDisplay::new_pcf8574(&mut i2c_expander, arduino_hal::Delay::new())
        .with_lines(Lines::TwoLines)
        .with_display(Display::On)
        .with_cursor(Cursor::Off)
        .build();

    ufmt::uwriteln!(&mut serial, "simon ready").ok();

    unsafe { avr_device::interrupt::enable() };

    let board = Board {
        screen: board::Lcd::new(lcd),
        joystick,
        buttons,
        lights,
        clock,
        delay: arduino_hal::Delay::new(),
    };

    Game::new(board, config, serial).run()
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("simon: the firmware only runs on the Arduino Uno, build it for avr-atmega328p");
}
