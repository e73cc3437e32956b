//! Multiplexer line access

/// Select and sense lines of an input multiplexer
///
/// The scanner drives the select lines, waits for the mux to settle,
/// then samples the shared sense line. Implementations only move bits;
/// timing belongs to the scanner.
pub trait MuxLines {
    /// Number of select lines wired to the mux
    fn select_lines(&self) -> usize;

    /// Drive select line `line` high or low
    ///
    /// `line` is in `0..select_lines()`; line 0 carries the least
    /// significant selector bit.
    fn set_select(&mut self, line: usize, high: bool);

    /// Sample the mux common (sense) line
    fn read_sense(&mut self) -> bool;
}
