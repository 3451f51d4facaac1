//! Rangelight - Shooting Range Light Firmware
//!
//! Main firmware binary for RP2040-based range lights. The light listens to
//! the range controller over a one-way radio serial link and shows the
//! traffic light colour, detail letters and countdown, sounding the buzzer
//! at the start and end of each end.
//!
//! Everything runs in a single cooperative loop: drain the UART, apply
//! commands, tick the countdown and buzzer, flush the panel, yield.

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::{Duration, Instant};
use embedded_alloc::LlffHeap as Heap;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use rangelight_core::Controller;
use rangelight_drivers::{FrameBufferDisplay, IoRx, PwmBuzzer, SwitchPanel};

use crate::board::DefmtPanel;

mod board;
mod config;
mod logging;

// Heap allocator for the receive buffer
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 4KB
const HEAP_SIZE: usize = 4 * 1024;

/// Interval between link statistics reports
const STATS_INTERVAL: Duration = Duration::from_secs(60);

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Rangelight firmware starting...");

    // Initialize heap allocator
    init_heap();

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Radio modem link (receive only)
    let link = config::uart_config();
    let tx_buf = TX_BUF.init([0u8; 16]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, board::uart_config(link));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();
    let mut rx = IoRx::new(rx);
    info!("UART initialized at {} baud", link.baudrate);

    // Buzzer
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = board::BUZZER_PWM_TOP;
    pwm_config.compare_b = 0;
    let pwm = Pwm::new_output_b(p.PWM_SLICE5, p.PIN_11, pwm_config);
    let (_, buzzer_out) = pwm.split();
    let mut buzzer = PwmBuzzer::new(unwrap!(buzzer_out), config::volume_levels());

    // Front panel switches
    let mut switches = SwitchPanel::new(
        Input::new(p.PIN_9, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_12, Pull::Up),
        Input::new(p.PIN_8, Pull::Up),
    );

    let mut display = FrameBufferDisplay::new(DefmtPanel::default(), config::brightness_levels());

    let light_config = config::light_config();
    info!(
        "Light config: pulse={}ms tick={}ms estop beeps={} rx buffer={}",
        light_config.buzzer_pulse_ms,
        light_config.countdown_tick_ms,
        light_config.emergency_beeps,
        light_config.rx_buffer_capacity
    );

    let mut controller = Controller::new(light_config);
    controller.start(&mut display);
    info!("Light ready");

    let mut last_stats = Instant::now();
    loop {
        let now_ms = Instant::now().as_millis();
        let report = controller.poll(now_ms, &mut rx, &mut switches, &mut display, &mut buzzer);
        logging::log_report(&report);

        if last_stats.elapsed() >= STATS_INTERVAL {
            logging::log_stats(controller.stats());
            if buzzer.errors() > 0 || switches.read_errors() > 0 {
                warn!(
                    "Driver errors: buzzer={} switches={}",
                    buzzer.errors(),
                    switches.read_errors()
                );
            }
            last_stats = Instant::now();
        }

        // Let the executor service the UART interrupt
        yield_now().await;
    }
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
