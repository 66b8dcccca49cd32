//! Keyboard controller: owns the document, the tilt value and every key
//!
//! All input reaches the document through here: committed flicks, side keys,
//! and the hardware-keyboard source. The tilt value lives on the controller
//! and is handed to each key's emphasis controller on every update.

use std::time::Instant;

use crate::emphasis::{EmphasisController, EmphasisState, EmphasisTransition, KeySide};
use crate::flick::{FlickCommit, FlickDirection, FlickRecognizer};
use crate::kana::{self, KanaModifier};
use crate::keymap::{self, KeyDefinition, KeyKind, KeyPlacement, SideKey};
use crate::settings::KeyboardSettings;
use crate::source::{EventSource, SourceError, Subscription};
use crate::text_buffer::TextBuffer;
use crate::tilt::{
    MotionSample, Orientation, RawAcceleration, SensorStatus, TiltState, normalize_tilt,
};

/// Editing operation shared by on-screen and hardware keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    Char(char),
    Space,
    Newline,
    Backspace,
    Clear,
}

impl EditCommand {
    /// Map a raw hardware key identifier. Named keys other than Backspace and
    /// Enter ("Shift", "ArrowLeft", ...) map to nothing.
    pub fn from_hardware_key(key: &str) -> Option<Self> {
        match key {
            "Backspace" => Some(EditCommand::Backspace),
            "Enter" => Some(EditCommand::Newline),
            " " => Some(EditCommand::Space),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => Some(EditCommand::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

impl From<SideKey> for EditCommand {
    fn from(key: SideKey) -> Self {
        match key {
            SideKey::Backspace => EditCommand::Backspace,
            SideKey::Space => EditCommand::Space,
            SideKey::Enter => EditCommand::Newline,
            SideKey::Clear => EditCommand::Clear,
        }
    }
}

/// One flick key: its layout entry plus gesture and emphasis state
pub struct FlickKey {
    definition: &'static KeyDefinition,
    placement: KeyPlacement,
    recognizer: FlickRecognizer,
    emphasis: EmphasisController,
}

impl FlickKey {
    pub fn definition(&self) -> &'static KeyDefinition {
        self.definition
    }

    pub fn placement(&self) -> KeyPlacement {
        self.placement
    }

    /// Live flick direction; `None` when hints are hidden
    pub fn active_direction(&self) -> Option<FlickDirection> {
        self.recognizer.active_direction()
    }

    pub fn emphasis(&self) -> &EmphasisController {
        &self.emphasis
    }

    pub fn emphasis_state(&self, now: Instant) -> EmphasisState {
        self.emphasis.state(now)
    }
}

/// Snapshot of the motion pipeline for the debug panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorDiagnostics {
    pub status: SensorStatus,
    /// Last raw sample, before normalization
    pub acceleration: Option<RawAcceleration>,
    pub orientation: Option<Orientation>,
    pub tilt: f32,
    /// Number of tilt updates since start
    pub tilt_updates: u64,
    pub threshold: f32,
    /// Side the current tilt is enlarging, if any
    pub emphasized_side: Option<KeySide>,
}

pub struct KeyboardController {
    buffer: TextBuffer,
    tilt: TiltState,
    tilt_threshold: f32,
    sensor: SensorStatus,
    acceleration: Option<RawAcceleration>,
    orientation: Option<Orientation>,
    keys: Vec<FlickKey>,
    motion: Option<Subscription<MotionSample>>,
    hardware: Option<Subscription<String>>,
    notice: Option<String>,
    notice_raised: bool,
}

impl KeyboardController {
    pub fn new(settings: &KeyboardSettings, now: Instant) -> Self {
        let timing = settings.emphasis_timing();
        let keys = keymap::flick_keys()
            .map(|(placement, definition)| FlickKey {
                definition,
                placement,
                recognizer: FlickRecognizer::new(settings.flick_threshold_px),
                emphasis: EmphasisController::new(placement.side(), timing, now),
            })
            .collect();

        Self {
            buffer: TextBuffer::new(),
            tilt: TiltState::default(),
            tilt_threshold: timing.threshold,
            sensor: SensorStatus::default(),
            acceleration: None,
            orientation: None,
            keys,
            motion: None,
            hardware: None,
            notice: None,
            notice_raised: false,
        }
    }

    // =========================================================================
    // Document
    // =========================================================================

    pub fn text(&self) -> String {
        self.buffer.content()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn append_char(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    pub fn append_space(&mut self) {
        self.buffer.push(' ');
    }

    pub fn append_newline(&mut self) {
        self.buffer.push('\n');
    }

    /// Remove the last character; no-op on an empty document
    pub fn backspace(&mut self) {
        self.buffer.backspace();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Apply a command. Returns true if the document changed.
    pub fn apply(&mut self, command: EditCommand) -> bool {
        match command {
            EditCommand::Char(ch) => self.append_char(ch),
            EditCommand::Space => self.append_space(),
            EditCommand::Newline => self.append_newline(),
            EditCommand::Backspace => return self.buffer.backspace().is_some(),
            EditCommand::Clear => {
                let had_text = !self.buffer.is_empty();
                self.clear();
                return had_text;
            }
        }
        true
    }

    pub fn handle_hardware_key(&mut self, key: &str) -> bool {
        match EditCommand::from_hardware_key(key) {
            Some(command) => self.apply(command),
            None => {
                log::trace!("ignoring hardware key {key:?}");
                false
            }
        }
    }

    pub fn press_side_key(&mut self, key: SideKey) -> bool {
        self.apply(key.into())
    }

    /// Insert a committed flick glyph, or run it as a modifier for modifier keys
    pub fn commit_glyph(&mut self, definition: &KeyDefinition, glyph: &str) -> bool {
        match definition.kind {
            KeyKind::Glyph => {
                self.buffer.push_str(glyph);
                log::debug!("commit {glyph:?}");
                true
            }
            KeyKind::Modifier => match KanaModifier::from_glyph(glyph) {
                Some(modifier) => self.apply_modifier(modifier),
                None => false,
            },
        }
    }

    /// Convert the last character; false when it has no such variant
    pub fn apply_modifier(&mut self, modifier: KanaModifier) -> bool {
        let Some(last) = self.buffer.last_char() else {
            return false;
        };
        match kana::apply(modifier, last) {
            Some(converted) => self.buffer.replace_last(converted),
            None => false,
        }
    }

    // =========================================================================
    // Keys and gestures
    // =========================================================================

    pub fn keys(&self) -> &[FlickKey] {
        &self.keys
    }

    pub fn key_index(&self, placement: KeyPlacement) -> Option<usize> {
        self.keys.iter().position(|key| key.placement == placement)
    }

    pub fn pointer_down(&mut self, key: usize, x: f32, y: f32) -> bool {
        match self.keys.get_mut(key) {
            Some(key) => {
                key.recognizer.pointer_down(x, y);
                true
            }
            None => false,
        }
    }

    /// Returns true if the highlighted direction changed
    pub fn pointer_move(&mut self, key: usize, x: f32, y: f32) -> bool {
        self.keys
            .get_mut(key)
            .is_some_and(|key| key.recognizer.pointer_move(x, y))
    }

    /// Finish the gesture on `key` and apply whatever it committed
    pub fn pointer_up(&mut self, key: usize) -> Option<FlickCommit> {
        let key = self.keys.get_mut(key)?;
        let definition = key.definition;
        let commit = key.recognizer.pointer_up(definition)?;
        self.commit_glyph(definition, commit.glyph);
        Some(commit)
    }

    pub fn pointer_cancel(&mut self, key: usize) {
        if let Some(key) = self.keys.get_mut(key) {
            key.recognizer.cancel();
        }
    }

    // =========================================================================
    // Tilt and emphasis
    // =========================================================================

    pub fn tilt(&self) -> f32 {
        self.tilt.value()
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    pub fn sensor_status(&self) -> SensorStatus {
        self.sensor
    }

    /// Side the current tilt reading enlarges, if any
    pub fn emphasized_side(&self) -> Option<KeySide> {
        let tilt = self.tilt.value();
        [KeySide::Left, KeySide::Right]
            .into_iter()
            .find(|side| side.is_triggered_by(tilt, self.tilt_threshold))
    }

    pub fn diagnostics(&self) -> SensorDiagnostics {
        SensorDiagnostics {
            status: self.sensor,
            acceleration: self.acceleration,
            orientation: self.orientation,
            tilt: self.tilt.value(),
            tilt_updates: self.tilt.revision(),
            threshold: self.tilt_threshold,
            emphasized_side: self.emphasized_side(),
        }
    }

    /// Store a tilt reading and re-evaluate every key against it.
    /// Returns true if any key started or retargeted an animation.
    pub fn set_tilt(&mut self, tilt: f32, now: Instant) -> bool {
        self.tilt.set(tilt);
        let value = self.tilt.value();
        let mut animated = false;
        for key in &mut self.keys {
            let transition = key.emphasis.on_tilt(value, now);
            animated |= matches!(
                transition,
                EmphasisTransition::Grow | EmphasisTransition::Revert
            );
        }
        animated
    }

    pub fn handle_motion(&mut self, sample: MotionSample, now: Instant) -> bool {
        match sample {
            MotionSample::Acceleration { x, y, z, origin } => {
                self.acceleration = Some(RawAcceleration::from_axes(x, y, z, origin));
                self.set_tilt(normalize_tilt(x, origin), now)
            }
            MotionSample::Orientation { alpha, beta, gamma } => {
                self.orientation = Some(Orientation::from_axes(alpha, beta, gamma));
                false
            }
        }
    }

    /// Fire due revert timers. Returns true while any key is animating.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut animating = false;
        for key in &mut self.keys {
            animating |= key.emphasis.tick(now);
        }
        animating
    }

    // =========================================================================
    // Source lifecycle
    // =========================================================================

    /// Register with the motion and hardware-keyboard sources.
    ///
    /// A refused motion source leaves tilt at 0 and raises a single notice.
    pub fn mount(
        &mut self,
        motion: &mut dyn EventSource<MotionSample>,
        hardware: &mut dyn EventSource<String>,
    ) {
        match motion.subscribe() {
            Ok(subscription) => {
                self.motion = Some(subscription);
                self.sensor = SensorStatus::Active;
            }
            Err(err) => {
                log::warn!("tilt assistance disabled: {err}");
                self.sensor = SensorStatus::from(err);
                self.raise_notice(err);
            }
        }
        match hardware.subscribe() {
            Ok(subscription) => self.hardware = Some(subscription),
            Err(err) => log::warn!("hardware keyboard passthrough disabled: {err}"),
        }
    }

    /// Deregister from both sources, drop in-flight gestures and settle every key
    pub fn unmount(
        &mut self,
        motion: &mut dyn EventSource<MotionSample>,
        hardware: &mut dyn EventSource<String>,
        now: Instant,
    ) {
        if let Some(subscription) = self.motion.take() {
            motion.unsubscribe(subscription);
            self.sensor = SensorStatus::Unmounted;
        }
        if let Some(subscription) = self.hardware.take() {
            hardware.unsubscribe(subscription);
        }
        for key in &mut self.keys {
            key.recognizer.cancel();
            key.emphasis.reset(now);
        }
        self.tilt.set(0.0);
    }

    pub fn is_mounted(&self) -> bool {
        self.motion.is_some() || self.hardware.is_some()
    }

    /// Drain pending source events. Returns true if anything visible changed.
    pub fn pump(&mut self, now: Instant) -> bool {
        // Timers that ran out before these events fire first.
        let mut changed = self.tick(now);
        let samples: Vec<MotionSample> = self
            .motion
            .as_ref()
            .map(|sub| sub.drain().collect())
            .unwrap_or_default();
        let keys: Vec<String> = self
            .hardware
            .as_ref()
            .map(|sub| sub.drain().collect())
            .unwrap_or_default();

        for sample in samples {
            changed |= self.handle_motion(sample, now);
        }
        for key in keys {
            changed |= self.handle_hardware_key(&key);
        }
        changed
    }

    /// One-time user-facing message about degraded input
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    fn raise_notice(&mut self, err: SourceError) {
        if self.notice_raised {
            return;
        }
        self.notice_raised = true;
        self.notice = Some(match err {
            SourceError::Unsupported => {
                "この端末では傾きセンサーを利用できません。キーの拡大表示は無効です。".to_string()
            }
            SourceError::PermissionDenied => {
                "傾きセンサーの利用が許可されていません。キーの拡大表示は無効です。".to_string()
            }
        });
    }
}
