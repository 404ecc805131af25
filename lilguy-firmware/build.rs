//! Build script for lilguy-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time
//! - Generates `board.rs` constants from it

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// GPIOs driven by a dedicated peripheral (SPI0 clock/data, ADC0/ADC1)
const PERIPHERAL_PINS: [i64; 4] = [2, 3, 26, 27];

/// GPIOs wired to the CYW43 radio on the Pico 2 W
const RADIO_PINS: [i64; 4] = [23, 24, 25, 29];

/// Board pins in the order they are generated
const PIN_KEYS: [&str; 10] = [
    "cs",
    "dc",
    "rst",
    "button_primary",
    "button_secondary",
    "dpad_up",
    "dpad_down",
    "dpad_left",
    "dpad_right",
    "led",
];

/// Largest panel or sprite side; drawing uses signed 16-bit coordinates
const MAX_DIMENSION: i64 = i16::MAX as i64;

/// Fastest clock the RP2350 SPI block can generate from the default sysclk
const MAX_SPI_HZ: i64 = 62_500_000;

fn main() {
    setup_linker();
    let config = load_config();
    let board = validate_config(&config);
    generate_board(&board);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Linker scripts, in the order the runtime expects
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and parse board.toml
fn load_config() -> toml::Value {
    // Re-run if board.toml changes
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml wiring file.                 ║\n\
            ║  Please create one in the lilguy-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Panic with every collected problem in one box
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Validated board values
struct Board {
    spi_hz: i64,
    spi_mode: i64,
    pins: Vec<(&'static str, i64)>,
    panel_width: i64,
    panel_height: i64,
    background: i64,
    sprite_width: i64,
    sprite_height: i64,
    sprite_x: i64,
    sprite_y: i64,
    joy_center: i64,
    joy_dead_zone: i64,
    joy_max_step: i64,
    joy_invert_y: bool,
    frame_ms: i64,
    blink_ms: i64,
    touch_repeat_ms: i64,
    heap_kib: i64,
}

/// Integer field lookup, recording a problem if missing or out of range
fn int(
    config: &toml::Value,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) -> i64 {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(v)) if range.contains(v) => *v,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!(
                "[{}] {} must be {}-{}",
                section,
                key,
                range.start(),
                range.end()
            ));
            0
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            0
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            0
        }
    }
}

fn boolean(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) -> bool {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Boolean(v)) => *v,
        Some(_) => {
            errors.push(format!("[{}] {} must be true or false", section, key));
            false
        }
        None => false,
    }
}

/// Validate board.toml and collect its values
fn validate_config(config: &toml::Value) -> Board {
    let mut errors = Vec::new();
    for section in ["spi", "pins", "panel", "sprite", "joystick", "loop", "heap"] {
        if config.get(section).and_then(|s| s.as_table()).is_none() {
            errors.push(format!("Missing [{}] section", section));
        }
    }
    report("Missing required sections in board.toml", &errors);

    let board = Board {
        spi_hz: int(config, "spi", "frequency_hz", 1..=MAX_SPI_HZ, &mut errors),
        spi_mode: int(config, "spi", "mode", 0..=3, &mut errors),
        pins: PIN_KEYS
            .iter()
            .map(|&key| (key, int(config, "pins", key, 0..=29, &mut errors)))
            .collect(),
        panel_width: int(config, "panel", "width", 1..=MAX_DIMENSION, &mut errors),
        panel_height: int(config, "panel", "height", 1..=MAX_DIMENSION, &mut errors),
        background: int(config, "panel", "background", 0..=0xFFFF, &mut errors),
        sprite_width: int(config, "sprite", "width", 1..=MAX_DIMENSION, &mut errors),
        sprite_height: int(config, "sprite", "height", 1..=MAX_DIMENSION, &mut errors),
        sprite_x: int(config, "sprite", "x", 0..=MAX_DIMENSION, &mut errors),
        sprite_y: int(config, "sprite", "y", 0..=MAX_DIMENSION, &mut errors),
        joy_center: int(config, "joystick", "center", 0..=4095, &mut errors),
        joy_dead_zone: int(config, "joystick", "dead_zone", 0..=2047, &mut errors),
        joy_max_step: int(config, "joystick", "max_step", 1..=100, &mut errors),
        joy_invert_y: boolean(config, "joystick", "invert_y", &mut errors),
        frame_ms: int(config, "loop", "frame_ms", 1..=1000, &mut errors),
        blink_ms: int(config, "loop", "blink_ms", 1..=10_000, &mut errors),
        touch_repeat_ms: int(config, "loop", "touch_repeat_ms", 1..=10_000, &mut errors),
        heap_kib: int(config, "heap", "size_kib", 1..=384, &mut errors),
    };
    report("Invalid values in board.toml", &errors);

    validate_pins(&board);
    validate_geometry(&board);

    println!("cargo:warning=board.toml validated successfully");
    board
}

/// Pins must be distinct and free for general I/O
fn validate_pins(board: &Board) {
    let mut errors = Vec::new();

    for (i, (key, pin)) in board.pins.iter().enumerate() {
        if PERIPHERAL_PINS.contains(pin) {
            errors.push(format!("[pins] {} = {} is used by SPI0 or the ADC", key, pin));
        }
        if RADIO_PINS.contains(pin) {
            errors.push(format!("[pins] {} = {} is wired to the radio", key, pin));
        }
        if let Some((other, _)) = board.pins[..i].iter().find(|(_, p)| p == pin) {
            errors.push(format!("[pins] {} and {} both use GPIO {}", other, key, pin));
        }
    }

    report("Invalid pin assignment in board.toml", &errors);
}

/// The sprite must fit the panel, start on it, and fit the heap
fn validate_geometry(board: &Board) {
    let mut errors = Vec::new();

    if board.sprite_width > board.panel_width || board.sprite_height > board.panel_height {
        errors.push("sprite is larger than the panel".to_string());
    }
    if board.sprite_x + board.sprite_width > board.panel_width
        || board.sprite_y + board.sprite_height > board.panel_height
    {
        errors.push("sprite start position runs off the panel".to_string());
    }

    // RGB565: two bytes per pixel
    let sprite_bytes = board.sprite_width * board.sprite_height * 2;
    if sprite_bytes > board.heap_kib * 1024 {
        errors.push(format!(
            "sprite needs {} bytes, heap is {} KiB",
            sprite_bytes, board.heap_kib
        ));
    }

    report("Invalid geometry in board.toml", &errors);
}

/// Write `board.rs` into OUT_DIR
fn generate_board(board: &Board) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut out = String::new();

    out.push_str("// Generated from board.toml by build.rs\n\n");
    out.push_str(&format!("pub const SPI_FREQUENCY_HZ: u32 = {};\n", board.spi_hz));
    out.push_str(&format!("pub const SPI_MODE: u8 = {};\n\n", board.spi_mode));

    for (key, pin) in &board.pins {
        out.push_str(&format!("pub const PIN_{}: u8 = {};\n", key.to_uppercase(), pin));
    }

    // Bank holding exactly the pins named above
    let mut numbers: Vec<i64> = board.pins.iter().map(|(_, pin)| *pin).collect();
    numbers.sort_unstable();
    let entries = numbers
        .iter()
        .map(|n| format!("{} => PIN_{}", n, n))
        .collect::<Vec<_>>()
        .join(", ");
    out.push_str("\n/// Move every board.toml pin out of the peripherals into a `PinBank`\n");
    out.push_str("macro_rules! board_pin_bank {\n");
    out.push_str("    ($p:ident) => {\n");
    out.push_str(&format!("        lilguy_hal_rp2040::pin_bank!($p, {})\n", entries));
    out.push_str("    };\n}\npub(crate) use board_pin_bank;\n");

    out.push_str(&format!("\npub const PANEL_WIDTH: u16 = {};\n", board.panel_width));
    out.push_str(&format!("pub const PANEL_HEIGHT: u16 = {};\n", board.panel_height));
    out.push_str(&format!("pub const BACKGROUND: u16 = {:#06X};\n\n", board.background));

    out.push_str(&format!("pub const SPRITE_WIDTH: u16 = {};\n", board.sprite_width));
    out.push_str(&format!("pub const SPRITE_HEIGHT: u16 = {};\n", board.sprite_height));
    out.push_str(&format!("pub const SPRITE_X: u16 = {};\n", board.sprite_x));
    out.push_str(&format!("pub const SPRITE_Y: u16 = {};\n\n", board.sprite_y));

    out.push_str(&format!("pub const JOY_CENTER: u16 = {};\n", board.joy_center));
    out.push_str(&format!("pub const JOY_DEAD_ZONE: u16 = {};\n", board.joy_dead_zone));
    out.push_str(&format!("pub const JOY_MAX_STEP: i16 = {};\n", board.joy_max_step));
    out.push_str(&format!("pub const JOY_INVERT_Y: bool = {};\n\n", board.joy_invert_y));

    out.push_str(&format!("pub const FRAME_MS: u64 = {};\n", board.frame_ms));
    out.push_str(&format!("pub const BLINK_MS: u64 = {};\n", board.blink_ms));
    out.push_str(&format!("pub const TOUCH_REPEAT_MS: u64 = {};\n\n", board.touch_repeat_ms));

    out.push_str(&format!("pub const HEAP_SIZE: usize = {} * 1024;\n", board.heap_kib));

    fs::write(out_dir.join("board.rs"), out).unwrap();
}
