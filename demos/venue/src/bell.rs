//! Terminal bell as the overcrowding tone.

use std::io::{self, IsTerminal, Stderr, Write};

use cm_sim::{AlertNotifier, TickReport};

/// Rings the terminal bell on stderr.  One handle for the whole run.
pub struct BellNotifier {
    out: Stderr,
}

impl BellNotifier {
    /// Fails when stderr is not a terminal.
    pub fn open() -> Result<Self, &'static str> {
        let out = io::stderr();
        if out.is_terminal() {
            Ok(Self { out })
        } else {
            Err("stderr is not a terminal")
        }
    }
}

impl AlertNotifier for BellNotifier {
    fn notify(&mut self, _report: &TickReport) {
        let mut out = self.out.lock();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}
