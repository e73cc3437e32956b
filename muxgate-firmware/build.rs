//! Build script for muxgate-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time
//! - Generates the board constants and pin hand-out (`board_config.rs`)

use std::collections::BTreeSet;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Highest user GPIO on the RP2040
const MAX_GPIO: i64 = 29;

/// Must match muxgate-core limits
const MAX_BUTTONS: usize = 8;
const MAX_PASSCODE_LEN: usize = 8;
const MAX_SELECT_LINES: usize = 3;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    setup_linker(&out_dir);
    let board = validate_config();
    generate_board_config(&board, &out_dir);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated board description
struct Board {
    select_pins: Vec<i64>,
    sense_pin: i64,
    button_pins: Vec<i64>,
    output_pins: Vec<i64>,
    passcode: Vec<i64>,
    settle_ms: i64,
    cycle_ms: i64,
    debounce_ms: i64,
    idle_timeout_ms: i64,
}

/// Read and validate board.toml
fn validate_config() -> Board {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml file describing the mux,     ║\n\
            ║  button and output wiring. Create one in muxgate-firmware/.      ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read board.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in board.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();

    let select_pins = pin_list(&config, "mux", "select_pins", &mut errors);
    let sense_pin = integer(&config, "mux", "sense_pin", &mut errors);
    let settle_ms = integer(&config, "mux", "settle_ms", &mut errors);
    let button_pins = pin_list(&config, "buttons", "pins", &mut errors);
    let debounce_ms = integer(&config, "buttons", "debounce_ms", &mut errors);
    let idle_timeout_ms = integer(&config, "buttons", "idle_timeout_ms", &mut errors);
    let passcode = pin_list(&config, "passcode", "sequence", &mut errors);
    let output_pins = pin_list(&config, "outputs", "pins", &mut errors);
    let cycle_ms = integer(&config, "loop", "cycle_ms", &mut errors);

    if !errors.is_empty() {
        fail("Missing or malformed entries in board.toml", &errors);
    }

    let board = Board {
        select_pins,
        sense_pin,
        button_pins,
        output_pins,
        passcode,
        settle_ms,
        cycle_ms,
        debounce_ms,
        idle_timeout_ms,
    };

    validate_pins(&board, &mut errors);
    validate_passcode(&board, &mut errors);
    validate_timing(&board, &mut errors);

    if !errors.is_empty() {
        fail("Invalid board configuration", &errors);
    }

    println!("cargo:warning=board.toml validated successfully");
    board
}

/// Look up `[section] key` as an integer
fn integer(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) -> i64 {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(value)) => *value,
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

/// Look up `[section] key` as an array of integers
fn pin_list(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) -> Vec<i64> {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Array(items)) => {
            let values: Vec<i64> = items.iter().filter_map(toml::Value::as_integer).collect();
            if values.len() != items.len() {
                errors.push(format!("[{}] {} must contain only integers", section, key));
            }
            values
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an array", section, key));
            Vec::new()
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            Vec::new()
        }
    }
}

/// Every pin must exist and be claimed once
fn validate_pins(board: &Board, errors: &mut Vec<String>) {
    if board.select_pins.is_empty() || board.select_pins.len() > MAX_SELECT_LINES {
        errors.push(format!("[mux] select_pins must list 1-{} pins", MAX_SELECT_LINES));
    }
    if board.button_pins.is_empty() || board.button_pins.len() > MAX_BUTTONS {
        errors.push(format!("[buttons] pins must list 1-{} pins", MAX_BUTTONS));
    }
    if board.output_pins.is_empty() {
        errors.push("[outputs] pins cannot be empty".to_string());
    }

    let mut claimed = BTreeSet::new();
    let all = board
        .select_pins
        .iter()
        .chain(core::iter::once(&board.sense_pin))
        .chain(&board.button_pins)
        .chain(&board.output_pins);

    for &pin in all {
        if !(0..=MAX_GPIO).contains(&pin) {
            errors.push(format!("GPIO{} does not exist (valid: 0-{})", pin, MAX_GPIO));
        } else if !claimed.insert(pin) {
            errors.push(format!("GPIO{} is assigned more than once", pin));
        }
    }
}

fn validate_passcode(board: &Board, errors: &mut Vec<String>) {
    if board.passcode.is_empty() {
        errors.push("[passcode] sequence cannot be empty".to_string());
    }
    if board.passcode.len() > MAX_PASSCODE_LEN {
        errors.push(format!(
            "[passcode] sequence is limited to {} presses",
            MAX_PASSCODE_LEN
        ));
    }
    let buttons = board.button_pins.len() as i64;
    for (i, &button) in board.passcode.iter().enumerate() {
        if !(0..buttons).contains(&button) {
            errors.push(format!(
                "[passcode] entry {} refers to unknown button {}",
                i, button
            ));
        }
    }
}

fn validate_timing(board: &Board, errors: &mut Vec<String>) {
    let fields = [
        ("[mux] settle_ms", board.settle_ms),
        ("[loop] cycle_ms", board.cycle_ms),
        ("[buttons] debounce_ms", board.debounce_ms),
        ("[buttons] idle_timeout_ms", board.idle_timeout_ms),
    ];
    for (name, value) in fields {
        if !(0..=i64::from(u32::MAX)).contains(&value) {
            errors.push(format!("{} must fit in a u32", name));
        }
    }
    if board.debounce_ms == 0 {
        errors.push("[buttons] debounce_ms must be greater than 0".to_string());
    }
    if board.idle_timeout_ms <= board.debounce_ms {
        errors.push("[buttons] idle_timeout_ms must exceed debounce_ms".to_string());
    }
}

/// Write `board_config.rs` for `include!` from src/board.rs
fn generate_board_config(board: &Board, out_dir: &Path) {
    let join = |values: &[i64]| {
        values
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let peri = |values: &[i64]| {
        values
            .iter()
            .map(|pin| format!("Peri::<AnyPin>::from(p.PIN_{})", pin))
            .collect::<Vec<_>>()
            .join(",\n            ")
    };

    let code = format!(
        "// Generated by build.rs from board.toml. Do not edit.\n\
        \n\
        pub const SELECT_LINES: usize = {select_count};\n\
        pub const BUTTON_COUNT: usize = {button_count};\n\
        pub const OUTPUT_COUNT: usize = {output_count};\n\
        pub const PASSCODE: [u8; {passcode_len}] = [{passcode}];\n\
        pub const TIMING: TimingConfig = TimingConfig {{\n\
        \x20   settle_ms: {settle},\n\
        \x20   cycle_ms: {cycle},\n\
        \x20   debounce_ms: {debounce},\n\
        \x20   idle_timeout_ms: {idle},\n\
        }};\n\
        \n\
        pub const SELECT_GPIOS: [u8; {select_count}] = [{select_gpios}];\n\
        pub const SENSE_GPIO: u8 = {sense};\n\
        pub const BUTTON_GPIOS: [u8; {button_count}] = [{button_gpios}];\n\
        pub const OUTPUT_GPIOS: [u8; {output_count}] = [{output_gpios}];\n\
        \n\
        pub fn take_pins(p: embassy_rp::Peripherals) -> BoardPins {{\n\
        \x20   BoardPins {{\n\
        \x20       select: [\n            {select_peri},\n        ],\n\
        \x20       sense: Peri::<AnyPin>::from(p.PIN_{sense}),\n\
        \x20       buttons: [\n            {button_peri},\n        ],\n\
        \x20       outputs: [\n            {output_peri},\n        ],\n\
        \x20   }}\n\
        }}\n",
        select_count = board.select_pins.len(),
        button_count = board.button_pins.len(),
        output_count = board.output_pins.len(),
        passcode_len = board.passcode.len(),
        passcode = join(&board.passcode),
        settle = board.settle_ms,
        cycle = board.cycle_ms,
        debounce = board.debounce_ms,
        idle = board.idle_timeout_ms,
        select_gpios = join(&board.select_pins),
        sense = board.sense_pin,
        button_gpios = join(&board.button_pins),
        output_gpios = join(&board.output_pins),
        select_peri = peri(&board.select_pins),
        button_peri = peri(&board.button_pins),
        output_peri = peri(&board.output_pins),
    );

    fs::write(out_dir.join("board_config.rs"), code).unwrap();
}

/// Abort the build with a framed error listing
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| {
                let line = if e.chars().count() > 62 {
                    format!("{}...", e.chars().take(59).collect::<String>())
                } else {
                    e.clone()
                };
                format!("║  • {:<62} ║", line)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}
