// Classifier + accumulator + debounce, one instance per widget.
use log::{debug, warn};

use super::accumulator::GestureAccumulator;
use super::scheduler::Scheduler;
use crate::config::GestureConfig;
use crate::feedback::{LiveFeedback, NoFeedback};
use crate::model::{DeltaRecord, Disposition, GesturePhase, PointerInput, Transform};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Built but not yet started; input is ignored.
    Idle,
    Running,
    /// Torn down. Can be started again.
    Stopped,
}

/// Turns a burst of raw wheel/gesture input into one [`DeltaRecord`].
///
/// Every qualifying event updates the accumulator, pushes the live transform
/// to the feedback target and restarts the single consolidation timer. When
/// the timer comes due the host calls [`fire`](Self::fire) and forwards the
/// returned record. Wheel and gesture input feed the same totals.
pub struct GestureEngine<S: Scheduler, F: LiveFeedback = NoFeedback> {
    config: GestureConfig,
    accumulator: GestureAccumulator,
    pending: Option<S::Handle>,
    scheduler: S,
    feedback: F,
    lifecycle: Lifecycle,
}

impl<S: Scheduler> GestureEngine<S, NoFeedback> {
    pub fn headless(config: GestureConfig, scheduler: S) -> Self {
        Self::new(config, scheduler, NoFeedback)
    }
}

impl<S: Scheduler, F: LiveFeedback> GestureEngine<S, F> {
    pub fn new(config: GestureConfig, scheduler: S, feedback: F) -> Self {
        Self {
            config,
            accumulator: GestureAccumulator::default(),
            pending: None,
            scheduler,
            feedback,
            lifecycle: Lifecycle::Idle,
        }
    }

    pub fn start(&mut self) {
        if self.lifecycle != Lifecycle::Running {
            debug!("gesture engine started ({:?})", self.config);
            self.lifecycle = Lifecycle::Running;
        }
    }

    /// Cancels any pending consolidation and drops unconsolidated movement,
    /// so nothing is emitted after teardown.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        if !self.accumulator.is_at_rest() {
            debug!("discarding unconsolidated movement on stop: {:?}", self.accumulator.transform());
        }
        self.accumulator.clear();
        self.feedback.apply(&Transform::IDENTITY);
        self.lifecycle = Lifecycle::Stopped;
    }

    /// A changed interval applies from the next reschedule on.
    pub fn reconfigure(&mut self, config: GestureConfig) {
        self.config = config;
    }

    pub fn handle(&mut self, input: impl Into<PointerInput>) -> Disposition {
        if self.lifecycle != Lifecycle::Running {
            return Disposition::Ignored;
        }
        match input.into() {
            PointerInput::Wheel(wheel) => {
                if !self.config.input_device.accepts_wheel() {
                    return Disposition::Ignored;
                }
                self.accumulator
                    .apply_wheel(&wheel, self.config.direction.sign());
            }
            PointerInput::Gesture(gesture) => {
                if !self.config.input_device.accepts_gesture() {
                    return Disposition::Ignored;
                }
                self.accumulator.apply_gesture(&gesture);
                // Start only captures the snapshot; nothing moved yet.
                if gesture.phase == GesturePhase::Start {
                    return Disposition::Consumed;
                }
            }
        }
        self.feedback.apply(&self.accumulator.transform());
        self.reschedule();
        Disposition::Consumed
    }

    fn reschedule(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.pending = self.scheduler.schedule(self.config.consolidation_interval);
        if self.pending.is_none() {
            // Nothing will fire; the next qualifying event tries again.
            warn!("consolidation timer could not be armed");
        }
    }

    /// Timer callback. Returns the record the host must emit.
    pub fn fire(&mut self) -> Option<DeltaRecord> {
        if self.lifecycle != Lifecycle::Running || self.pending.is_none() {
            debug_assert!(
                false,
                "consolidation timer fired with nothing pending ({:?})",
                self.lifecycle
            );
            warn!("ignoring stray consolidation timer ({:?})", self.lifecycle);
            return None;
        }
        Some(self.finalize())
    }

    fn finalize(&mut self) -> DeltaRecord {
        self.pending = None;
        let record = self.accumulator.take_delta();
        self.feedback.apply(&Transform::IDENTITY);
        debug!("consolidate delta {:?}", record);
        record
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn accumulator(&self) -> &GestureAccumulator {
        &self.accumulator
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }
}

impl<S: Scheduler, F: LiveFeedback> Drop for GestureEngine<S, F> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InputDevice, ScrollDirection};
    use crate::model::{GestureInput, WheelInput};
    use crate::state::ManualScheduler;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct RecordingFeedback(Rc<RefCell<Vec<Transform>>>);

    impl LiveFeedback for RecordingFeedback {
        fn apply(&mut self, transform: &Transform) {
            self.0.borrow_mut().push(*transform);
        }
    }

    type TestEngine = GestureEngine<ManualScheduler, RecordingFeedback>;

    fn engine_with(config: GestureConfig) -> (TestEngine, ManualScheduler, RecordingFeedback) {
        let clock = ManualScheduler::new();
        let feedback = RecordingFeedback::default();
        let mut engine = GestureEngine::new(config, clock.clone(), feedback.clone());
        engine.start();
        (engine, clock, feedback)
    }

    fn engine() -> (TestEngine, ManualScheduler, RecordingFeedback) {
        engine_with(GestureConfig::default())
    }

    /// Advances the clock and fires the engine for every timer that came due.
    fn run_for(engine: &mut TestEngine, clock: &ManualScheduler, ms: u64) -> Vec<DeltaRecord> {
        clock
            .advance(ms)
            .into_iter()
            .filter_map(|_| engine.fire())
            .collect()
    }

    fn wheel(delta_x: f64, delta_y: f64, ctrl_key: bool) -> WheelInput {
        WheelInput {
            delta_x,
            delta_y,
            ctrl_key,
        }
    }

    fn gesture(phase: GesturePhase, x: f64, y: f64, scale: f64) -> GestureInput {
        GestureInput::new(phase, x, y, scale)
    }

    #[test]
    fn nothing_is_emitted_without_input() {
        let (mut engine, clock, _) = engine();
        assert!(run_for(&mut engine, &clock, 10_000).is_empty());
        assert!(!engine.is_pending());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn pure_pan_scenario() {
        let (mut engine, clock, _) = engine();
        assert_eq!(engine.handle(wheel(20.0, 0.0, false)), Disposition::Consumed);
        assert_eq!(
            run_for(&mut engine, &clock, 50),
            vec![DeltaRecord {
                x: 20.0,
                y: 0.0,
                scale_percentage: 100
            }]
        );
    }

    #[test]
    fn pure_zoom_scenario() {
        let (mut engine, clock, _) = engine();
        engine.handle(wheel(0.0, -100.0, true));
        assert!((engine.accumulator().cumulative_scale - std::f64::consts::E).abs() < 1e-12);
        let out = run_for(&mut engine, &clock, 50);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].scale_percentage, 272);
        assert_eq!((out[0].x, out[0].y), (0.0, 0.0));
    }

    #[test]
    fn burst_collapses_into_one_record() {
        let (mut engine, clock, _) = engine();
        let burst = [
            wheel(3.0, 1.0, false),
            wheel(0.0, -20.0, true),
            wheel(-7.5, 4.0, false),
            wheel(0.0, 35.0, true),
            wheel(10.0, 2.5, false),
        ];
        let mut expected_scale = 1.0;
        for w in &burst {
            engine.handle(*w);
            if w.ctrl_key {
                expected_scale *= (-w.delta_y / 100.0).exp();
            }
            assert!(run_for(&mut engine, &clock, 49).is_empty());
        }
        assert_eq!(clock.pending(), 1);
        let out = run_for(&mut engine, &clock, 1);
        assert_eq!(
            out,
            vec![DeltaRecord {
                x: 5.5,
                y: 7.5,
                scale_percentage: (expected_scale * 100.0).round() as u32
            }]
        );
        assert!(run_for(&mut engine, &clock, 1_000).is_empty());
    }

    #[test]
    fn natural_direction_inverts_pan() {
        let (mut engine, clock, _) = engine_with(GestureConfig {
            direction: ScrollDirection::Natural,
            ..GestureConfig::default()
        });
        engine.handle(wheel(12.0, -3.0, false));
        let out = run_for(&mut engine, &clock, 50);
        assert_eq!((out[0].x, out[0].y), (-12.0, 3.0));
    }

    #[test]
    fn accumulator_resets_after_consolidation() {
        let (mut engine, clock, feedback) = engine();
        engine.handle(wheel(5.0, 5.0, false));
        engine.handle(wheel(0.0, -50.0, true));
        run_for(&mut engine, &clock, 50);
        let acc = engine.accumulator();
        assert_eq!(acc.cumulative_translate_x, 0.0);
        assert_eq!(acc.cumulative_translate_y, 0.0);
        assert_eq!(acc.cumulative_scale, 1.0);
        assert!(!engine.is_pending());
        assert_eq!(feedback.0.borrow().last(), Some(&Transform::IDENTITY));
    }

    #[test]
    fn separate_bursts_emit_separately() {
        let (mut engine, clock, _) = engine();
        engine.handle(wheel(1.0, 0.0, false));
        let first = run_for(&mut engine, &clock, 60);
        engine.handle(wheel(2.0, 0.0, false));
        let second = run_for(&mut engine, &clock, 60);
        assert_eq!(first[0].x, 1.0);
        assert_eq!(second[0].x, 2.0);
    }

    #[test]
    fn gesture_incrementality() {
        let (mut engine, clock, _) = engine();
        assert_eq!(
            engine.handle(gesture(GesturePhase::Start, 100.0, 100.0, 1.0)),
            Disposition::Consumed
        );
        assert!(!engine.is_pending());
        engine.handle(gesture(GesturePhase::Change, 110.0, 95.0, 1.2));
        let acc = engine.accumulator();
        assert_eq!(acc.cumulative_translate_x, 10.0);
        assert_eq!(acc.cumulative_translate_y, -5.0);
        assert!((acc.cumulative_scale - 1.2).abs() < 1e-12);
        let out = run_for(&mut engine, &clock, 50);
        assert_eq!(
            out,
            vec![DeltaRecord {
                x: 10.0,
                y: -5.0,
                scale_percentage: 120
            }]
        );
    }

    #[test]
    fn touch_snapshot_survives_consolidation() {
        let (mut engine, clock, _) = engine();
        engine.handle(gesture(GesturePhase::Start, 0.0, 0.0, 1.0));
        engine.handle(gesture(GesturePhase::Change, 10.0, 0.0, 1.0));
        assert_eq!(run_for(&mut engine, &clock, 50)[0].x, 10.0);
        // Same gesture continues in the next window: only the new movement counts.
        engine.handle(gesture(GesturePhase::Change, 14.0, 0.0, 1.0));
        engine.handle(gesture(GesturePhase::End, 15.0, 2.0, 1.0));
        let out = run_for(&mut engine, &clock, 50);
        assert_eq!((out[0].x, out[0].y), (5.0, 2.0));
    }

    #[test]
    fn wheel_and_gesture_input_are_summed() {
        let (mut engine, clock, _) = engine();
        engine.handle(gesture(GesturePhase::Start, 0.0, 0.0, 1.0));
        engine.handle(wheel(4.0, 0.0, false));
        engine.handle(gesture(GesturePhase::Change, 6.0, 0.0, 1.0));
        let out = run_for(&mut engine, &clock, 50);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].x, 10.0);
    }

    #[test]
    fn live_feedback_tracks_accumulator() {
        let (mut engine, clock, feedback) = engine();
        engine.handle(wheel(2.0, 3.0, false));
        engine.handle(wheel(1.0, 1.0, false));
        assert_eq!(
            *feedback.0.borrow(),
            vec![
                Transform {
                    tx: 2.0,
                    ty: 3.0,
                    scale: 1.0
                },
                Transform {
                    tx: 3.0,
                    ty: 4.0,
                    scale: 1.0
                },
            ]
        );
        run_for(&mut engine, &clock, 50);
        assert_eq!(feedback.0.borrow().len(), 3);
    }

    #[test]
    fn input_device_filters_families() {
        let (mut engine, clock, _) = engine_with(GestureConfig {
            input_device: InputDevice::Touchscreen,
            ..GestureConfig::default()
        });
        assert_eq!(engine.handle(wheel(5.0, 5.0, false)), Disposition::Ignored);
        assert!(!engine.is_pending());
        assert!(run_for(&mut engine, &clock, 100).is_empty());

        let (mut engine, _, _) = engine_with(GestureConfig {
            input_device: InputDevice::Touchpad,
            ..GestureConfig::default()
        });
        assert_eq!(
            engine.handle(gesture(GesturePhase::Start, 0.0, 0.0, 1.0)),
            Disposition::Ignored
        );
        assert!(engine.accumulator().is_at_rest());
    }

    #[test]
    fn input_before_start_is_ignored() {
        let clock = ManualScheduler::new();
        let mut engine = GestureEngine::headless(GestureConfig::default(), clock.clone());
        assert_eq!(engine.lifecycle(), Lifecycle::Idle);
        assert_eq!(engine.handle(wheel(1.0, 1.0, false)), Disposition::Ignored);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn stop_cancels_pending_emission() {
        let (mut engine, clock, feedback) = engine();
        engine.handle(wheel(9.0, 9.0, false));
        assert_eq!(clock.pending(), 1);
        engine.stop();
        assert_eq!(engine.lifecycle(), Lifecycle::Stopped);
        assert_eq!(clock.pending(), 0);
        assert!(clock.advance(1_000).is_empty());
        assert!(engine.accumulator().is_at_rest());
        assert_eq!(feedback.0.borrow().last(), Some(&Transform::IDENTITY));
        assert_eq!(engine.handle(wheel(1.0, 0.0, false)), Disposition::Ignored);
    }

    #[test]
    fn restart_after_stop_accumulates_fresh() {
        let (mut engine, clock, _) = engine();
        engine.handle(wheel(9.0, 0.0, false));
        engine.stop();
        engine.start();
        engine.handle(wheel(1.0, 0.0, false));
        assert_eq!(run_for(&mut engine, &clock, 50)[0].x, 1.0);
    }

    struct RefusingScheduler;

    impl Scheduler for RefusingScheduler {
        type Handle = ();

        fn schedule(&mut self, _delay_ms: u32) -> Option<()> {
            None
        }

        fn cancel(&mut self, _handle: ()) {}
    }

    #[test]
    fn unarmed_timer_is_not_reported_as_pending() {
        let mut engine = GestureEngine::headless(GestureConfig::default(), RefusingScheduler);
        engine.start();
        assert_eq!(engine.handle(wheel(3.0, 0.0, false)), Disposition::Consumed);
        assert!(!engine.is_pending());
        assert_eq!(engine.accumulator().cumulative_translate_x, 3.0);
        // Movement is kept for the next window that does arm.
        engine.handle(wheel(1.0, 0.0, false));
        assert_eq!(engine.accumulator().cumulative_translate_x, 4.0);
        assert!(!engine.is_pending());
    }

    #[test]
    fn dropping_engine_cancels_timer() {
        let (mut engine, clock, _) = engine();
        engine.handle(wheel(1.0, 0.0, false));
        drop(engine);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn reconfigured_interval_applies_on_next_event() {
        let (mut engine, clock, _) = engine();
        engine.reconfigure(GestureConfig {
            consolidation_interval: 300,
            ..GestureConfig::default()
        });
        engine.handle(wheel(1.0, 0.0, false));
        assert!(run_for(&mut engine, &clock, 299).is_empty());
        assert_eq!(run_for(&mut engine, &clock, 1).len(), 1);
    }

    #[test]
    fn instances_do_not_share_state() {
        let (mut a, clock_a, _) = engine();
        let (mut b, clock_b, _) = engine();
        a.handle(wheel(7.0, 0.0, false));
        assert!(b.accumulator().is_at_rest());
        assert!(!b.is_pending());
        b.handle(wheel(0.0, -100.0, true));
        let out_a = run_for(&mut a, &clock_a, 50);
        let out_b = run_for(&mut b, &clock_b, 50);
        assert_eq!(out_a[0].scale_percentage, 100);
        assert_eq!(out_a[0].x, 7.0);
        assert_eq!(out_b[0].x, 0.0);
        assert_eq!(out_b[0].scale_percentage, 272);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "nothing pending")]
    fn stray_fire_is_a_defect_in_development() {
        let (mut engine, _, _) = engine();
        engine.fire();
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn stray_fire_is_ignored_in_release() {
        let (mut engine, _, _) = engine();
        engine.stop();
        assert_eq!(engine.fire(), None);
    }
}
