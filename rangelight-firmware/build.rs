//! Build script for rangelight-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates light.toml at compile time
//! - Generates the configuration constants included by `src/config.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Largest frame; the receive buffer must hold one
const MAX_FRAME_LEN: i64 = 255;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    setup_linker(&out_dir);

    let config = load_config();
    let settings = validate_config(&config);
    generate_constants(&out_dir, &settings);

    println!("cargo:warning=light.toml validated successfully");
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Abort the build with a boxed list of problems
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| format!("║  • {:<62} ║", truncate(line, 62)))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

fn truncate(line: &str, width: usize) -> String {
    if line.len() > width {
        format!("{}...", &line[..width - 3])
    } else {
        line.to_string()
    }
}

fn load_config() -> toml::Value {
    println!("cargo:rerun-if-changed=light.toml");

    let config_path = Path::new("light.toml");
    if !config_path.exists() {
        fail(
            "light.toml not found",
            &["Create light.toml in the rangelight-firmware directory".to_string()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read light.toml", &[e.to_string()]),
    };

    match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in light.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    }
}

/// Validated values from light.toml
struct Settings {
    baudrate: i64,
    rx_buffer: i64,
    buzzer_pulse_ms: i64,
    countdown_tick_ms: i64,
    emergency_beeps: i64,
    brightness_low: i64,
    brightness_high: i64,
    volume_quiet: i64,
    volume_loud: i64,
}

/// Reads `[section] key` as an integer within `min..=max`
struct Reader<'a> {
    config: &'a toml::Value,
    errors: Vec<String>,
}

impl Reader<'_> {
    fn integer(&mut self, section: &str, key: &str, min: i64, max: i64) -> i64 {
        let value = match self.config.get(section) {
            Some(toml::Value::Table(t)) => t.get(key),
            Some(_) => {
                self.errors.push(format!("[{}] must be a table", section));
                return min;
            }
            None => {
                self.errors.push(format!("Missing [{}] section", section));
                return min;
            }
        };

        match value {
            Some(toml::Value::Integer(v)) if (min..=max).contains(v) => *v,
            Some(toml::Value::Integer(_)) => {
                self.errors
                    .push(format!("[{}] {} must be {}-{}", section, key, min, max));
                min
            }
            Some(_) => {
                self.errors
                    .push(format!("[{}] {} must be an integer", section, key));
                min
            }
            None => {
                self.errors.push(format!("[{}] missing '{}'", section, key));
                min
            }
        }
    }
}

fn validate_config(config: &toml::Value) -> Settings {
    let mut reader = Reader {
        config,
        errors: Vec::new(),
    };

    let settings = Settings {
        baudrate: reader.integer("serial", "baudrate", 1200, 921_600),
        rx_buffer: reader.integer("serial", "rx_buffer", MAX_FRAME_LEN, u16::MAX as i64),
        buzzer_pulse_ms: reader.integer("timing", "buzzer_pulse_ms", 1, 10_000),
        countdown_tick_ms: reader.integer("timing", "countdown_tick_ms", 1, 60_000),
        emergency_beeps: reader.integer("timing", "emergency_beeps", 0, u8::MAX as i64),
        brightness_low: reader.integer("brightness", "low", 0, 255),
        brightness_high: reader.integer("brightness", "high", 0, 255),
        volume_quiet: reader.integer("volume", "quiet", 0, 255),
        volume_loud: reader.integer("volume", "loud", 0, 255),
    };

    let mut errors = reader.errors;
    if settings.brightness_low > settings.brightness_high {
        errors.push("[brightness] low must not exceed high".to_string());
    }
    if settings.volume_quiet > settings.volume_loud {
        errors.push("[volume] quiet must not exceed loud".to_string());
    }

    if !errors.is_empty() {
        fail("Invalid configuration in light.toml", &errors);
    }
    settings
}

fn generate_constants(out_dir: &Path, s: &Settings) {
    let generated = format!(
        "// Generated from light.toml by build.rs\n\
         pub const UART_BAUDRATE: u32 = {};\n\
         pub const RX_BUFFER_CAPACITY: u16 = {};\n\
         pub const BUZZER_PULSE_MS: u32 = {};\n\
         pub const COUNTDOWN_TICK_MS: u32 = {};\n\
         pub const EMERGENCY_BEEPS: u8 = {};\n\
         pub const BRIGHTNESS_LOW: u8 = {};\n\
         pub const BRIGHTNESS_HIGH: u8 = {};\n\
         pub const VOLUME_QUIET: u8 = {};\n\
         pub const VOLUME_LOUD: u8 = {};\n",
        s.baudrate,
        s.rx_buffer,
        s.buzzer_pulse_ms,
        s.countdown_tick_ms,
        s.emergency_beeps,
        s.brightness_low,
        s.brightness_high,
        s.volume_quiet,
        s.volume_loud,
    );

    let mut f = File::create(out_dir.join("light_config.rs")).unwrap();
    f.write_all(generated.as_bytes()).unwrap();
}
