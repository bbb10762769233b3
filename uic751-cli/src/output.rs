//! Literal stdout protocol output, byte-for-byte format, independent of
//! the diagnostic logger.

use uic751_core::telegram::{Telegram, TelegramStatus};
use uic751_core::Event;

/// Prints the line(s) for a non-PACKET event. Returns `false` for
/// `Event::None` (nothing printed).
pub fn print_event(event: Event) -> bool {
    let line = match event {
        Event::None => return false,
        Event::Warning => "Warning",
        Event::Listening => "Listening",
        Event::Chfree => "Channel free",
        Event::Pilot => "Voice pilot",
        Event::Silence => "Silence",
        Event::Packet => unreachable!("packets are printed via print_packet"),
    };
    println!("{line}");
    true
}

/// Prints a completed telegram. `hide_damaged` suppresses INTEGRITY
/// frames entirely (the `-d` flag). `raw` additionally prints the raw
/// 39-bit payload (the `-u` flag).
pub fn print_packet(telegram: &Telegram, hide_damaged: bool, raw: bool) {
    match telegram.status() {
        TelegramStatus::Ok => {
            println!(
                "Packet {:06X} {:02X}",
                telegram.train_number(),
                telegram.code_number()
            );
        }
        TelegramStatus::Integrity => {
            if hide_damaged {
                return;
            }
            println!(
                "Packet {:06X} {:02X} (received CRC: {:02X}, correct: {:02X})",
                telegram.train_number(),
                telegram.code_number(),
                telegram.received_crc(),
                telegram.correct_crc()
            );
        }
        TelegramStatus::More | TelegramStatus::NoSync => {
            // A PACKET event only ever fires once `telegram.status().is_done()`;
            // reaching this arm would indicate a coordinator bug.
            return;
        }
    }

    if raw {
        println!("Raw packet: {:039b}", telegram.raw());
    }
}
