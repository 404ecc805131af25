//! Lil Guy - handheld character firmware
//!
//! Main firmware binary for the Pico 2 W based Lil Guy board. Brings up the
//! ST7796 panel over SPI, allocates the character sprite on the heap, then
//! runs a single polling loop: sample inputs, update the scene, redraw only
//! when something changed, blink the status LED.

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{AnyPin, Level};
use embassy_rp::Peri;
use embassy_time::{Duration, Instant, Timer};
use embedded_alloc::LlffHeap as Heap;
use {defmt_rtt as _, panic_probe as _};

use lilguy_display::{
    BusSession, Flush, Joystick, LilGuy, Panel, RedrawScheduler, Scene, Sprite,
};
use lilguy_hal_rp2040::adc::AnalogStick;
use lilguy_hal_rp2040::delay::BlockingDelay;
use lilguy_hal_rp2040::gpio::{RpInput, RpOutput};
use lilguy_hal_rp2040::pins::PinBank;
use lilguy_hal_rp2040::spi::RpSpi;

use crate::controls::{Controls, DPad};

mod board;
mod controls;

/// Boot ROM image definition (RP2350)
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

// Heap allocator for the sprite buffer
#[global_allocator]
static HEAP: Heap = Heap::empty();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Lil Guy firmware starting...");

    // Initialize heap allocator
    init_heap();

    // Initialize RP2350 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // SPI0 clock/data and ADC0/ADC1 are typed; board.toml pins go by number
    let mut bank = match board::board_pin_bank!(p) {
        Ok(bank) => bank,
        Err(e) => defmt::panic!("Pin bank setup failed: {}", e),
    };

    // Panel link
    let spi = RpSpi::new(p.SPI0, p.PIN_2, p.PIN_3, &board::spi_config());
    let cs = RpOutput::new(claim(&mut bank, board::PIN_CS), Level::High);
    let dc = RpOutput::new(claim(&mut bank, board::PIN_DC), Level::High);
    let rst = RpOutput::new(claim(&mut bank, board::PIN_RST), Level::High);
    let bus = BusSession::new(spi, cs, dc);
    let mut panel = Panel::new(bus, rst, BlockingDelay, board::panel_config());

    if let Err(e) = panel.init() {
        defmt::panic!("Panel init failed: {}", e);
    }
    info!(
        "Panel initialized: {}x{} @ {} Hz",
        panel.width(),
        panel.height(),
        board::SPI_FREQUENCY_HZ
    );

    let scene_config = board::scene_config();
    if let Err(e) = panel.clear(scene_config.background) {
        defmt::panic!("Panel clear failed: {}", e);
    }

    // Inputs
    let stick = AnalogStick::new(p.ADC, p.PIN_26, p.PIN_27);
    let dpad = DPad {
        up: button(&mut bank, board::PIN_DPAD_UP),
        down: button(&mut bank, board::PIN_DPAD_DOWN),
        left: button(&mut bank, board::PIN_DPAD_LEFT),
        right: button(&mut bank, board::PIN_DPAD_RIGHT),
    };
    let mut controls = Controls::new(
        RpInput::pulled_up(claim(&mut bank, board::PIN_BUTTON_PRIMARY)),
        RpInput::pulled_up(claim(&mut bank, board::PIN_BUTTON_SECONDARY)),
        stick,
        dpad,
        Joystick::new(board::joystick_config()),
    );

    let mut led = RpOutput::new(claim(&mut bank, board::PIN_LED), Level::Low);
    let blink = Duration::from_millis(board::BLINK_MS);
    let mut next_blink = Instant::now() + blink;

    // Sprite
    let mut sprite = match Sprite::new(scene_config.sprite_width, scene_config.sprite_height) {
        Ok(sprite) => Some(sprite),
        Err(e) => {
            error!("Sprite allocation failed: {}; animation disabled", e);
            None
        }
    };

    let mut scene = Scene::new(&scene_config);
    let art = LilGuy::new(scene_config.background);
    let mut scheduler = RedrawScheduler::new();

    info!("=== Lil Guy ready ===");

    loop {
        if let Some(sprite) = sprite.as_mut() {
            let input = controls.sample();
            if scene.apply(&input) {
                trace!("Input: {}", input);
                scheduler.invalidate();
            }

            match scheduler.flush(&mut scene, sprite, &art, &mut panel) {
                Ok(Flush::Drawn { erased }) => {
                    let at = scene.placement();
                    debug!(
                        "Frame at ({}, {}) mood={} color={} erased={}",
                        at.x,
                        at.y,
                        scene.mood(),
                        scene.color_index(),
                        erased
                    );
                }
                Ok(Flush::Skipped) => {}
                Err(e) => defmt::panic!("Panel write failed: {}", e),
            }
        }

        // Heartbeat
        if Instant::now() >= next_blink {
            led.toggle();
            next_blink += blink;
        }

        Timer::after_millis(board::FRAME_MS).await;
    }
}

/// Take a board pin from the bank; wiring errors are fatal
fn claim(bank: &mut PinBank, num: u8) -> Peri<'static, AnyPin> {
    match bank.take(num) {
        Ok(pin) => pin,
        Err(e) => defmt::panic!("GPIO {} unavailable: {}", num, e),
    }
}

fn button(bank: &mut PinBank, num: u8) -> lilguy_hal::gpio::ActiveLow<RpInput<'static>> {
    lilguy_hal::gpio::ActiveLow::new(RpInput::pulled_up(claim(bank, num)))
}

fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; board::HEAP_SIZE] =
        [MaybeUninit::uninit(); board::HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, board::HEAP_SIZE)
    }
}
