//! Landing-page animation: three decorative phases cycled on a timer.
//!
//! Each phase owns its sub-animation. Leaving a phase drops the sub-animation,
//! entering it starts a fresh one, and `Sequencer::stop` drops everything.

mod timer;

use std::f32::consts::TAU;
use std::time::Duration;

use shared::geometry::{self, CubeOutline};

pub use timer::{IntervalTimer, Timeline};

/// Time each phase stays on screen
pub const PHASE_PERIOD: Duration = Duration::from_millis(4000);
/// Duration of the extrusion growth
pub const EXTRUSION_DURATION: Duration = Duration::from_millis(3500);
/// Duration of the spin deceleration
pub const SPIN_DECAY: Duration = Duration::from_millis(2500);

/// Initial angular speed of the interactive cube (rad/s)
pub const SPIN_START_SPEED: f32 = 6.0;
/// Angular speed the cube settles at (rad/s)
pub const SPIN_REST_SPEED: f32 = 0.6;

/// Footprint of the extruded cube
pub const EXTRUSION_FOOTPRINT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    Orthographic,
    Extrusion,
    Interactive,
}

impl AnimationPhase {
    pub const ALL: [AnimationPhase; 3] = [
        AnimationPhase::Orthographic,
        AnimationPhase::Extrusion,
        AnimationPhase::Interactive,
    ];

    pub fn index(&self) -> usize {
        match self {
            AnimationPhase::Orthographic => 0,
            AnimationPhase::Extrusion => 1,
            AnimationPhase::Interactive => 2,
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// i18n key for the phase caption
    pub fn caption_key(&self) -> &'static str {
        match self {
            AnimationPhase::Orthographic => "demo.orthographic",
            AnimationPhase::Extrusion => "demo.extrusion",
            AnimationPhase::Interactive => "demo.interactive",
        }
    }
}

/// Growing dashed cube
#[derive(Debug, Clone)]
pub struct ExtrusionAnimation {
    timeline: Timeline,
}

impl ExtrusionAnimation {
    pub fn start(now: Duration) -> Self {
        Self {
            timeline: Timeline::start(EXTRUSION_DURATION, now),
        }
    }

    pub fn progress(&self, now: Duration) -> f32 {
        self.timeline.progress(now)
    }

    pub fn height(&self, now: Duration) -> f32 {
        geometry::extrusion_height(self.progress(now))
    }

    /// Outline for the current frame; regenerated each call
    pub fn outline(&self, now: Duration) -> CubeOutline {
        geometry::extrusion_outline(
            self.height(now),
            EXTRUSION_FOOTPRINT,
            geometry::DEFAULT_DASH,
            geometry::DEFAULT_GAP,
        )
    }
}

/// Spinning cube that decelerates to a gentle idle rotation
#[derive(Debug, Clone)]
pub struct SpinAnimation {
    decay: Timeline,
    angle: f32,
}

impl SpinAnimation {
    pub fn start(now: Duration) -> Self {
        Self {
            decay: Timeline::start(SPIN_DECAY, now),
            angle: 0.0,
        }
    }

    /// Current angular speed (rad/s)
    pub fn speed(&self, now: Duration) -> f32 {
        let eased = geometry::ease_out_cubic(self.decay.progress(now));
        SPIN_START_SPEED + (SPIN_REST_SPEED - SPIN_START_SPEED) * eased
    }

    /// Per-frame update; no allocation
    pub fn advance(&mut self, now: Duration, dt: f32) {
        self.angle = (self.angle + self.speed(now) * dt.max(0.0)).rem_euclid(TAU);
    }

    /// Manual rotation from pointer drag
    pub fn nudge(&mut self, radians: f32) {
        self.angle = (self.angle + radians).rem_euclid(TAU);
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }
}

/// Phase cycle plus the sub-animation of the active phase
#[derive(Debug, Default)]
pub struct Sequencer {
    phase: Option<AnimationPhase>,
    cycle: Option<IntervalTimer>,
    extrusion: Option<ExtrusionAnimation>,
    spin: Option<SpinAnimation>,
    phase_started: Duration,
    last_frame: Option<Duration>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount: start the cycle at the first phase
    pub fn start(&mut self, now: Duration) {
        self.cycle = Some(IntervalTimer::start(PHASE_PERIOD, now));
        self.phase = Some(AnimationPhase::Orthographic);
        self.activate(now);
        tracing::debug!("Animation sequencer started");
    }

    /// Unmount: cancel every timer
    pub fn stop(&mut self) {
        if self.cycle.take().is_some() {
            tracing::debug!("Animation sequencer stopped");
        }
        self.extrusion = None;
        self.spin = None;
        self.last_frame = None;
    }

    pub fn is_running(&self) -> bool {
        self.cycle.is_some()
    }

    /// Current phase (first phase while stopped)
    pub fn phase(&self) -> AnimationPhase {
        self.phase.unwrap_or(AnimationPhase::Orthographic)
    }

    /// Advance timers to `now`. Returns true when the phase changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        let Some(cycle) = self.cycle.as_mut() else {
            return false;
        };

        let fired = cycle.poll(now);
        let mut phase = self.phase();
        for _ in 0..fired {
            phase = phase.next();
        }

        let changed = fired > 0;
        if changed {
            tracing::debug!("Animation phase -> {:?}", phase);
            self.phase = Some(phase);
            self.activate(now);
        }

        let dt = self
            .last_frame
            .map(|last| now.saturating_sub(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame = Some(now);
        if let Some(spin) = self.spin.as_mut() {
            spin.advance(now, dt);
        }

        changed
    }

    fn activate(&mut self, now: Duration) {
        self.phase_started = now;
        self.last_frame = Some(now);
        let phase = self.phase();
        self.extrusion = (phase == AnimationPhase::Extrusion).then(|| ExtrusionAnimation::start(now));
        self.spin = (phase == AnimationPhase::Interactive).then(|| SpinAnimation::start(now));
    }

    /// Time since the current phase became active
    pub fn phase_elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.phase_started)
    }

    pub fn extrusion(&self) -> Option<&ExtrusionAnimation> {
        self.extrusion.as_ref()
    }

    pub fn spin(&self) -> Option<&SpinAnimation> {
        self.spin.as_ref()
    }

    pub fn spin_mut(&mut self) -> Option<&mut SpinAnimation> {
        self.spin.as_mut()
    }

    /// Whether any sub-animation timer is alive
    pub fn has_active_sub_animation(&self) -> bool {
        self.extrusion.is_some() || self.spin.is_some()
    }

    /// Time until the next phase change
    pub fn until_next_phase(&self, now: Duration) -> Option<Duration> {
        self.cycle.as_ref().map(|c| c.remaining(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_phase_wraps_after_three_ticks() {
        let mut seq = Sequencer::new();
        seq.start(ms(0));
        assert_eq!(seq.phase(), AnimationPhase::Orthographic);

        assert!(seq.tick(ms(4000)));
        assert_eq!(seq.phase(), AnimationPhase::Extrusion);
        assert!(seq.tick(ms(8000)));
        assert_eq!(seq.phase(), AnimationPhase::Interactive);
        assert!(seq.tick(ms(12000)));
        assert_eq!(seq.phase(), AnimationPhase::Orthographic);
    }

    #[test]
    fn test_no_change_between_ticks() {
        let mut seq = Sequencer::new();
        seq.start(ms(0));
        assert!(!seq.tick(ms(16)));
        assert!(!seq.tick(ms(3999)));
        assert_eq!(seq.phase(), AnimationPhase::Orthographic);
    }

    #[test]
    fn test_sub_animation_only_while_phase_active() {
        let mut seq = Sequencer::new();
        seq.start(ms(0));
        assert!(!seq.has_active_sub_animation());

        seq.tick(ms(4000));
        assert!(seq.extrusion().is_some());
        assert!(seq.spin().is_none());

        seq.tick(ms(8000));
        assert!(seq.extrusion().is_none());
        assert!(seq.spin().is_some());

        seq.tick(ms(12000));
        assert!(!seq.has_active_sub_animation());
    }

    #[test]
    fn test_extrusion_grows_then_resets_on_reactivation() {
        let mut seq = Sequencer::new();
        seq.start(ms(0));
        seq.tick(ms(4000));

        let mut prev = 0.0;
        for t in (4000..=7500).step_by(100) {
            seq.tick(ms(t));
            let h = seq.extrusion().unwrap().height(ms(t));
            assert!(h >= prev);
            prev = h;
        }
        assert_eq!(prev, 2.0);

        // leave and come back around
        seq.tick(ms(8000));
        seq.tick(ms(12000));
        seq.tick(ms(16000));
        assert_eq!(seq.phase(), AnimationPhase::Extrusion);
        assert_eq!(seq.extrusion().unwrap().height(ms(16000)), 0.1);
    }

    #[test]
    fn test_stop_cancels_everything() {
        let mut seq = Sequencer::new();
        seq.start(ms(0));
        seq.tick(ms(4000));
        seq.stop();

        assert!(!seq.is_running());
        assert!(!seq.has_active_sub_animation());
        assert!(!seq.tick(ms(20000)));
        assert!(seq.until_next_phase(ms(20000)).is_none());
    }

    #[test]
    fn test_restart_begins_at_first_phase() {
        let mut seq = Sequencer::new();
        seq.start(ms(0));
        seq.tick(ms(4000));
        seq.stop();
        seq.start(ms(30000));
        assert_eq!(seq.phase(), AnimationPhase::Orthographic);
        assert!(!seq.tick(ms(33000)));
        assert!(seq.tick(ms(34000)));
    }

    #[test]
    fn test_spin_decelerates_to_rest_speed() {
        let spin = SpinAnimation::start(ms(0));
        assert_eq!(spin.speed(ms(0)), SPIN_START_SPEED);
        let mid = spin.speed(ms(1000));
        assert!(mid < SPIN_START_SPEED && mid > SPIN_REST_SPEED);
        assert!((spin.speed(ms(2500)) - SPIN_REST_SPEED).abs() < 1e-5);
        assert!((spin.speed(ms(10000)) - SPIN_REST_SPEED).abs() < 1e-5);
    }

    #[test]
    fn test_spin_advances_with_frames() {
        let mut seq = Sequencer::new();
        seq.start(ms(0));
        seq.tick(ms(4000));
        seq.tick(ms(8000));
        seq.tick(ms(8016));
        let a = seq.spin().unwrap().angle();
        assert!(a > 0.0);
        seq.tick(ms(8032));
        assert!(seq.spin().unwrap().angle() > a);
    }
}
