//! Loading-view spinner frames and the rotating whimsical message pool.

use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// The 10-frame Braille spinner, advanced every 80ms.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const SPINNER_INTERVAL_MS: u64 = 80;
pub const MESSAGE_INTERVAL_MS: u64 = 1000;

const MESSAGES: [&str; 16] = [
    "Summoning the catalog spirits…",
    "Untangling the schema…",
    "Polishing the response…",
    "Consulting the usual suspects…",
    "Warming up the JSON…",
    "Negotiating with the remote…",
    "Reticulating splines…",
    "Counting the brackets…",
    "Herding the tokens…",
    "Waiting for the modem to dial…",
    "Asking nicely…",
    "Double-checking the math…",
    "Brewing a fresh response…",
    "Measuring twice, calling once…",
    "Spinning up the request…",
    "Almost there, probably…",
];

/// Frame text for `spinner_frame` (wraps modulo the frame count).
pub fn spinner_frame(counter: usize) -> &'static str {
    SPINNER_FRAMES[counter % SPINNER_FRAMES.len()]
}

/// The message for `message_index`, drawn from a pool shuffled once per
/// process so repeated invocations don't always open on the same line.
pub fn loading_message(message_index: usize) -> &'static str {
    let order = shuffled_order();
    order[message_index % order.len()]
}

fn shuffled_order() -> &'static [&'static str; 16] {
    static ORDER: OnceLock<[&'static str; 16]> = OnceLock::new();
    ORDER.get_or_init(|| {
        let mut items = MESSAGES;
        let mut seed = process_seed();
        // Fisher-Yates using a small xorshift PRNG: no workspace
        // dependency carries a general-purpose RNG, and a one-time
        // per-process shuffle of 16 items doesn't need one.
        for i in (1..items.len()).rev() {
            seed = xorshift(seed);
            let j = (seed as usize) % (i + 1);
            items.swap(i, j);
        }
        items
    })
}

fn process_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9E3779B97F4A7C15)
        | 1
}

fn xorshift(mut x: u64) -> u64 {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}
