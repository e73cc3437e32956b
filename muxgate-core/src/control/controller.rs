//! Per-cycle controller
//!
//! Owns the mux lines and the output bank. The keypad is shared with the
//! edge handlers and only borrowed for the duration of one lock.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use heapless::Vec;

use super::diagnostic::Diagnostic;
use crate::config::ControlConfig;
use crate::input::SharedKeypad;
use crate::passcode::{MatchOutcome, Passcode};
use crate::scan::{ChannelCode, MuxScanner};
use crate::traits::{Clock, MuxLines, OutputBank, OutputError};

/// Upper bound on diagnostics produced by one cycle
pub const MAX_CYCLE_DIAGNOSTICS: usize = 8;

/// Everything one cycle observed and did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Code scanned this cycle
    pub code: ChannelCode,
    /// Outcome of the passcode attempt evaluated this cycle, if any
    pub outcome: Option<MatchOutcome>,
    /// Diagnostics in the order they were produced
    pub diagnostics: Vec<Diagnostic, MAX_CYCLE_DIAGNOSTICS>,
}

impl CycleReport {
    fn new(code: ChannelCode) -> Self {
        Self {
            code,
            outcome: None,
            diagnostics: Vec::new(),
        }
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        // Bounded by construction: at most five per cycle
        let _ = self.diagnostics.push(diagnostic);
    }

    /// Iterate diagnostics in order
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

/// Control loop state for a mux with `W` select lines
pub struct Controller<L, O, const W: usize> {
    lines: L,
    outputs: O,
    scanner: MuxScanner<W>,
    passcode: Passcode,
    cycle_ms: u32,
}

impl<L, O, const W: usize> Controller<L, O, W>
where
    L: MuxLines,
    O: OutputBank,
{
    /// Create a controller; every output is driven low
    pub fn new(config: &ControlConfig, lines: L, mut outputs: O) -> Self {
        outputs.clear_all();
        Self {
            lines,
            outputs,
            scanner: MuxScanner::new(config.timing.settle_ms),
            passcode: config.passcode.clone(),
            cycle_ms: config.timing.cycle_ms,
        }
    }

    /// Run one control cycle
    ///
    /// 1. Scan the mux (one settle delay per channel)
    /// 2. Report the code if it changed since the last report
    /// 3. Wait the inter-cycle delay
    /// 4. Evaluate and consume a full passcode attempt, if queued
    /// 5. Otherwise clear an idle, incomplete sequence
    ///
    /// Steps 4 and 5 run under a single keypad lock. Actuation uses the
    /// code scanned in step 1.
    pub async fn run_cycle<M, C, D>(
        &mut self,
        keypad: &SharedKeypad<M>,
        clock: &C,
        delay: &mut D,
    ) -> CycleReport
    where
        M: RawMutex,
        C: Clock,
        D: DelayNs,
    {
        let code = self.scanner.scan(&mut self.lines, delay).await;
        let mut report = CycleReport::new(code);

        if let Some(changed) = self.scanner.report(code) {
            report.push(Diagnostic::ChannelSelected(changed));
        }

        delay.delay_ms(self.cycle_ms).await;

        let now_ms = clock.now_ms();
        let passcode = &self.passcode;
        let (outcome, pending, evicted) = keypad.lock(|keypad| {
            let outcome = passcode.evaluate(keypad.queue_mut());
            let pending = keypad.queue().len();
            // At most one trim per cycle; a stale leftover goes next cycle
            let evicted = match outcome {
                Some(_) => None,
                None => keypad.evict_if_idle(now_ms),
            };
            (outcome, pending, evicted)
        });

        if let Some(outcome) = outcome {
            report.outcome = Some(outcome);
            self.actuate(outcome, code, &mut report);
            report.push(Diagnostic::AttemptConsumed { pending });
        }

        if let Some(evicted) = evicted {
            report.push(evicted);
        }

        report
    }

    /// Apply a passcode outcome to the outputs
    fn actuate(&mut self, outcome: MatchOutcome, code: ChannelCode, report: &mut CycleReport) {
        match outcome {
            MatchOutcome::Rejected => report.push(Diagnostic::PasscodeRejected),
            MatchOutcome::Accepted => {
                report.push(Diagnostic::PasscodeAccepted);
                match self.outputs.toggle(code.as_index()) {
                    Ok(high) => report.push(Diagnostic::OutputToggled { index: code, high }),
                    Err(OutputError::OutOfRange { len, .. }) => {
                        report.push(Diagnostic::OutputOutOfRange { code, outputs: len })
                    }
                }
            }
        }
    }

    /// Output bank
    pub fn outputs(&self) -> &O {
        &self.outputs
    }

    /// Last code reported as changed
    pub fn last_reported(&self) -> Option<ChannelCode> {
        self.scanner.last_reported()
    }

    /// Passcode reference
    pub fn passcode(&self) -> &Passcode {
        &self.passcode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimingConfig;
    use crate::input::ButtonId;
    use core::cell::Cell;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    const A: ButtonId = ButtonId::new(0);
    const B: ButtonId = ButtonId::new(1);
    const C: ButtonId = ButtonId::new(2);

    /// Mux with fixed per-channel inputs
    struct MockLines {
        inputs: [bool; 4],
        selector: usize,
    }

    impl MockLines {
        fn new(inputs: [bool; 4]) -> Self {
            Self { inputs, selector: 0 }
        }
    }

    impl MuxLines for MockLines {
        fn select_lines(&self) -> usize {
            2
        }

        fn set_select(&mut self, line: usize, high: bool) {
            if high {
                self.selector |= 1 << line;
            } else {
                self.selector &= !(1 << line);
            }
        }

        fn read_sense(&mut self) -> bool {
            self.inputs[self.selector]
        }
    }

    /// Nine outputs, like the reference board
    struct MockOutputs {
        levels: [bool; 9],
    }

    impl OutputBank for MockOutputs {
        fn len(&self) -> usize {
            self.levels.len()
        }

        fn set(&mut self, index: usize, high: bool) -> Result<(), OutputError> {
            let len = self.len();
            *self
                .levels
                .get_mut(index)
                .ok_or(OutputError::OutOfRange { index, len })? = high;
            Ok(())
        }

        fn is_set_high(&self, index: usize) -> Option<bool> {
            self.levels.get(index).copied()
        }
    }

    struct MockClock {
        now: Cell<u32>,
    }

    impl MockClock {
        fn at(now: u32) -> Self {
            Self { now: Cell::new(now) }
        }
    }

    impl Clock for MockClock {
        fn now_ms(&self) -> u32 {
            self.now.get()
        }
    }

    /// Delay that advances the mock clock
    struct MockDelay<'a> {
        clock: &'a MockClock,
    }

    impl DelayNs for MockDelay<'_> {
        async fn delay_ns(&mut self, ns: u32) {
            self.clock.now.set(self.clock.now.get() + ns / 1_000_000);
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.clock.now.set(self.clock.now.get() + ms);
        }
    }

    type TestController = Controller<MockLines, MockOutputs, 2>;

    fn controller(inputs: [bool; 4]) -> TestController {
        Controller::new(
            &ControlConfig::default(),
            MockLines::new(inputs),
            MockOutputs { levels: [true; 9] },
        )
    }

    fn keypad() -> SharedKeypad<NoopRawMutex> {
        SharedKeypad::new(TimingConfig::DEFAULT)
    }

    fn cycle(
        controller: &mut TestController,
        keypad: &SharedKeypad<NoopRawMutex>,
        clock: &MockClock,
    ) -> CycleReport {
        let mut delay = MockDelay { clock };
        block_on(controller.run_cycle(keypad, clock, &mut delay))
    }

    fn press_all(keypad: &SharedKeypad<NoopRawMutex>, presses: &[(ButtonId, u32)]) {
        for &(button, at) in presses {
            assert_eq!(keypad.on_edge(button, at), Some(Diagnostic::KeyPress(button)));
        }
    }

    #[test]
    fn test_outputs_start_low() {
        let controller = controller([false; 4]);
        assert_eq!(controller.outputs().levels, [false; 9]);
    }

    #[test]
    fn test_cycle_timing() {
        let mut controller = controller([false; 4]);
        let keypad = keypad();
        let clock = MockClock::at(1000);
        cycle(&mut controller, &keypad, &clock);
        // 4 x 20ms settle + 100ms pause
        assert_eq!(clock.now_ms(), 1180);
    }

    #[test]
    fn test_scenario_a_correct_passcode_toggles_selected_output() {
        let mut controller = controller([true, false, true, false]);
        let keypad = keypad();
        press_all(&keypad, &[(A, 300), (C, 600), (B, 900)]);

        let clock = MockClock::at(1000);
        let report = cycle(&mut controller, &keypad, &clock);

        assert_eq!(report.code, ChannelCode::new(5));
        assert_eq!(report.outcome, Some(MatchOutcome::Accepted));
        assert_eq!(
            report.diagnostics.as_slice(),
            &[
                Diagnostic::ChannelSelected(ChannelCode::new(5)),
                Diagnostic::PasscodeAccepted,
                Diagnostic::OutputToggled {
                    index: ChannelCode::new(5),
                    high: true
                },
                Diagnostic::AttemptConsumed { pending: 0 },
            ]
        );
        assert_eq!(keypad.queued(), 0);
        assert_eq!(controller.outputs().is_set_high(5), Some(true));
        assert_eq!(
            controller.outputs().levels.iter().filter(|&&on| on).count(),
            1
        );
    }

    #[test]
    fn test_second_match_toggles_back() {
        let mut controller = controller([true, false, true, false]);
        let keypad = keypad();
        let clock = MockClock::at(1000);

        press_all(&keypad, &[(A, 300), (C, 600), (B, 900)]);
        cycle(&mut controller, &keypad, &clock);

        press_all(&keypad, &[(A, 1300), (C, 1600), (B, 1900)]);
        clock.now.set(2000);
        let report = cycle(&mut controller, &keypad, &clock);

        assert!(report.diagnostics.contains(&Diagnostic::OutputToggled {
            index: ChannelCode::new(5),
            high: false
        }));
        assert_eq!(controller.outputs().is_set_high(5), Some(false));
    }

    #[test]
    fn test_scenario_b_wrong_passcode_still_consumed() {
        let mut controller = controller([true, false, true, false]);
        let keypad = keypad();
        press_all(&keypad, &[(A, 300), (B, 600), (C, 900)]);

        let clock = MockClock::at(1000);
        let report = cycle(&mut controller, &keypad, &clock);

        assert_eq!(report.outcome, Some(MatchOutcome::Rejected));
        assert!(report.diagnostics.contains(&Diagnostic::PasscodeRejected));
        assert_eq!(keypad.queued(), 0);
        assert_eq!(controller.outputs().levels, [false; 9]);
    }

    #[test]
    fn test_scenario_d_out_of_range_code() {
        let mut controller = controller([false, false, true, true]);
        let keypad = keypad();
        press_all(&keypad, &[(A, 300), (C, 600), (B, 900)]);

        let clock = MockClock::at(1000);
        let report = cycle(&mut controller, &keypad, &clock);

        assert_eq!(report.code.value(), 12);
        assert_eq!(report.outcome, Some(MatchOutcome::Accepted));
        assert!(report.diagnostics.contains(&Diagnostic::OutputOutOfRange {
            code: ChannelCode::new(12),
            outputs: 9
        }));
        assert_eq!(controller.outputs().levels, [false; 9]);
        assert_eq!(keypad.queued(), 0);
    }

    #[test]
    fn test_unchanged_code_not_reported_twice() {
        let mut controller = controller([false, true, false, false]);
        let keypad = keypad();
        let clock = MockClock::at(1000);

        let first = cycle(&mut controller, &keypad, &clock);
        assert_eq!(
            first.diagnostics.as_slice(),
            &[Diagnostic::ChannelSelected(ChannelCode::new(2))]
        );

        let second = cycle(&mut controller, &keypad, &clock);
        assert_eq!(second.code, ChannelCode::new(2));
        assert!(second.diagnostics.is_empty());
        assert_eq!(controller.last_reported(), Some(ChannelCode::new(2)));
    }

    #[test]
    fn test_partial_sequence_waits() {
        let mut controller = controller([false; 4]);
        let keypad = keypad();
        press_all(&keypad, &[(A, 300), (C, 600)]);

        let clock = MockClock::at(1000);
        let report = cycle(&mut controller, &keypad, &clock);

        assert_eq!(report.outcome, None);
        assert_eq!(keypad.queued(), 2);
    }

    #[test]
    fn test_idle_sequence_evicted_once() {
        let mut controller = controller([false; 4]);
        let keypad = keypad();
        press_all(&keypad, &[(A, 300), (C, 600)]);

        // 3700 + 180ms of cycle delays is more than 3000ms after 600
        let clock = MockClock::at(3700);
        let report = cycle(&mut controller, &keypad, &clock);
        assert!(report.diagnostics.contains(&Diagnostic::SequenceCleared {
            idle_timeout_ms: 3000
        }));
        assert_eq!(keypad.queued(), 0);

        let report = cycle(&mut controller, &keypad, &clock);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_leftover_press_kept_after_attempt() {
        let mut controller = controller([true, false, true, false]);
        let keypad = keypad();
        press_all(&keypad, &[(A, 300), (C, 600), (B, 900), (A, 1200)]);

        let clock = MockClock::at(1300);
        let report = cycle(&mut controller, &keypad, &clock);

        assert!(report
            .diagnostics
            .contains(&Diagnostic::AttemptConsumed { pending: 1 }));
        assert_eq!(keypad.queued(), 1);
        let leftover = keypad.lock(|keypad| keypad.queue().buttons().next());
        assert_eq!(leftover, Some(A));
    }

    #[test]
    fn test_stale_leftover_cleared_on_following_cycle() {
        let mut controller = controller([false; 4]);
        let keypad = keypad();
        press_all(&keypad, &[(A, 300), (C, 600), (B, 900), (A, 1200)]);

        // Well past the idle timeout of the last press
        let clock = MockClock::at(4300);
        let report = cycle(&mut controller, &keypad, &clock);

        assert_eq!(report.outcome, Some(MatchOutcome::Accepted));
        assert!(report
            .diagnostics
            .contains(&Diagnostic::AttemptConsumed { pending: 1 }));
        assert!(!report.diagnostics.contains(&Diagnostic::SequenceCleared {
            idle_timeout_ms: 3000
        }));
        assert_eq!(keypad.queued(), 1);

        let report = cycle(&mut controller, &keypad, &clock);
        assert_eq!(report.outcome, None);
        assert_eq!(
            report.diagnostics.as_slice(),
            &[Diagnostic::SequenceCleared {
                idle_timeout_ms: 3000
            }]
        );
        assert_eq!(keypad.queued(), 0);
    }
}
