//! Per-user conversation state.
//!
//! Every user walks a menu tree one message at a time, so the only state
//! worth keeping is which input the calculator expects next, plus whatever
//! the user already typed on the way there. [`SessionStore`] keeps one
//! [`Step`] per user and expires it after ten minutes of silence.

use std::collections::HashMap;
use std::time::{Duration, SystemTime};

use codon_types::{BitString, DigitString, Radix, UserId};

// ============================================================================
// Steps
// ============================================================================

/// Complement flavor selected before the number arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntCodeMethod {
    OnesComplement,
    TwosComplement,
}

/// One of the five audio recording parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioParam {
    Volume,
    Frequency,
    Depth,
    Duration,
    Channels,
}

/// Collected audio parameter values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AudioInputs {
    pub volume: Option<f64>,
    pub frequency: Option<f64>,
    pub depth: Option<f64>,
    pub duration: Option<f64>,
    pub channels: Option<f64>,
}

impl AudioInputs {
    #[must_use]
    pub fn value(&self, param: AudioParam) -> Option<f64> {
        match param {
            AudioParam::Volume => self.volume,
            AudioParam::Frequency => self.frequency,
            AudioParam::Depth => self.depth,
            AudioParam::Duration => self.duration,
            AudioParam::Channels => self.channels,
        }
    }
}

/// Progress through the audio calculator.
///
/// The user first picks which parameter to solve for, then supplies the
/// remaining four one value per message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioSession {
    pub target: AudioParam,
    pub inputs: AudioInputs,
}

impl AudioSession {
    /// Order in which missing parameters are requested.
    pub const ORDER: [AudioParam; 5] = [
        AudioParam::Volume,
        AudioParam::Frequency,
        AudioParam::Depth,
        AudioParam::Duration,
        AudioParam::Channels,
    ];

    #[must_use]
    pub fn new(target: AudioParam) -> Self {
        Self {
            target,
            inputs: AudioInputs::default(),
        }
    }

    /// The next parameter to ask for, or `None` once all four are in.
    #[must_use]
    pub fn awaiting(&self) -> Option<AudioParam> {
        Self::ORDER
            .into_iter()
            .find(|&param| param != self.target && self.inputs.value(param).is_none())
    }

    pub fn set(&mut self, param: AudioParam, value: f64) {
        let slot = match param {
            AudioParam::Volume => &mut self.inputs.volume,
            AudioParam::Frequency => &mut self.inputs.frequency,
            AudioParam::Depth => &mut self.inputs.depth,
            AudioParam::Duration => &mut self.inputs.duration,
            AudioParam::Channels => &mut self.inputs.channels,
        };
        *slot = Some(value);
    }
}

/// The input the calculator expects from a user next.
///
/// Menu variants remember which screen the user is looking at, so a bare
/// "1" always has one meaning. Multi-input flows carry the earlier inputs
/// in the variant so a session survives between messages without any other
/// storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Step {
    #[default]
    MainMenu,
    SystemsMenu,
    CodesMenu,
    QrMenu,
    Koi8Menu,
    AudioTargetMenu,
    DetectionMenu,
    HammingMenu,
    ClassificationMenu,
    ConvertAwaitNumber,
    ConvertAwaitFromBase {
        digits: String,
    },
    ConvertAwaitToBase {
        digits: String,
        from: Radix,
    },
    IntCodeAwaitNumber {
        method: IntCodeMethod,
    },
    FloatAwaitNumber,
    Koi8AwaitText,
    Koi8AwaitBits,
    BlockParityAwaitBits,
    BlockParityAwaitSize {
        bits: BitString,
    },
    ParityAwaitBits,
    ConstWeightAwaitBits,
    ConstWeightAwaitTarget {
        bits: BitString,
    },
    InverseAwaitBits,
    ControlNumberAwaitDigits,
    HammingAwaitData,
    HammingAwaitReceived,
    BarcodeAwaitDigits,
    QrNumericAwaitDigits,
    QrMaskedAwaitDigits,
    QrMaskedAwaitMask {
        digits: DigitString,
    },
    QrAlphaAwaitText,
    Audio(AudioSession),
    RedundancyAwaitTotal,
    RedundancyAwaitUsed {
        total: u64,
    },
}

// ============================================================================
// Store
// ============================================================================

/// A user's current step and when they last sent anything.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub step: Step,
    pub last_activity: SystemTime,
}

impl SessionRecord {
    fn new() -> Self {
        Self::with_step(Step::MainMenu)
    }

    fn with_step(step: Step) -> Self {
        Self {
            step,
            last_activity: SystemTime::now(),
        }
    }
}

/// In-memory session table keyed by user id.
#[derive(Debug)]
pub struct SessionStore {
    sessions: HashMap<UserId, SessionRecord>,
    timeout: Duration,
}

impl SessionStore {
    /// Sessions expire after this much silence.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            timeout,
        }
    }

    /// Replace the timeout used by subsequent expiry checks.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// The user's current step, starting a fresh session at the main menu
    /// when none exists yet.
    pub fn get_or_create(&mut self, user: UserId) -> &Step {
        &self
            .sessions
            .entry(user)
            .or_insert_with(SessionRecord::new)
            .step
    }

    #[must_use]
    pub fn record(&self, user: UserId) -> Option<&SessionRecord> {
        self.sessions.get(&user)
    }

    /// Move the user to `step` and stamp their activity.
    pub fn update(&mut self, user: UserId, step: Step) {
        self.sessions.insert(user, SessionRecord::with_step(step));
    }

    /// Drop whatever the user was doing and put them back at the main menu.
    pub fn reset(&mut self, user: UserId) {
        self.sessions.insert(user, SessionRecord::new());
    }

    /// Whether the user's session has sat idle past the timeout.
    ///
    /// Unknown users are never expired; their first message simply starts a
    /// fresh session.
    #[must_use]
    pub fn is_expired(&self, user: UserId) -> bool {
        self.is_expired_at(user, SystemTime::now())
    }

    #[must_use]
    pub fn is_expired_at(&self, user: UserId, now: SystemTime) -> bool {
        self.sessions.get(&user).is_some_and(|record| {
            now.duration_since(record.last_activity)
                .is_ok_and(|elapsed| elapsed > self.timeout)
        })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{AudioParam, AudioSession, SessionStore, Step};
    use codon_types::UserId;
    use std::time::Duration;

    const USER: UserId = UserId::new(42);

    #[test]
    fn unknown_user_starts_at_main_menu() {
        let mut store = SessionStore::new();
        assert!(store.record(USER).is_none());
        assert_eq!(store.get_or_create(USER), &Step::MainMenu);
        assert!(store.record(USER).is_some());
    }

    #[test]
    fn unknown_user_is_never_expired() {
        let store = SessionStore::with_timeout(Duration::ZERO);
        assert!(!store.is_expired(USER));
    }

    #[test]
    fn update_replaces_the_step() {
        let mut store = SessionStore::new();
        store.update(USER, Step::ConvertAwaitNumber);
        assert_eq!(store.get_or_create(USER), &Step::ConvertAwaitNumber);
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let mut store = SessionStore::new();
        store.update(USER, Step::MainMenu);
        let started = store.record(USER).unwrap().last_activity;

        assert!(!store.is_expired_at(USER, started + Duration::from_secs(599)));
        assert!(!store.is_expired_at(USER, started + Duration::from_secs(600)));
        assert!(store.is_expired_at(USER, started + Duration::from_secs(601)));
    }

    #[test]
    fn timeout_change_applies_to_existing_sessions() {
        let mut store = SessionStore::new();
        store.update(USER, Step::MainMenu);
        let started = store.record(USER).unwrap().last_activity;
        let later = started + Duration::from_secs(120);

        assert!(!store.is_expired_at(USER, later));
        store.set_timeout(Duration::from_secs(60));
        assert!(store.is_expired_at(USER, later));
    }

    #[test]
    fn reset_returns_to_main_menu_and_restamps() {
        let mut store = SessionStore::new();
        store.update(USER, Step::HammingAwaitData);
        let before = store.record(USER).unwrap().last_activity;

        store.reset(USER);
        let record = store.record(USER).unwrap();
        assert_eq!(record.step, Step::MainMenu);
        assert!(record.last_activity >= before);
    }

    #[test]
    fn users_do_not_share_sessions() {
        let other = UserId::new(7);
        let mut store = SessionStore::new();
        store.update(USER, Step::BarcodeAwaitDigits);
        store.update(other, Step::Koi8AwaitText);
        assert_eq!(store.get_or_create(USER), &Step::BarcodeAwaitDigits);
        assert_eq!(store.get_or_create(other), &Step::Koi8AwaitText);
    }

    #[test]
    fn audio_session_requests_parameters_in_order() {
        let mut session = AudioSession::new(AudioParam::Frequency);
        assert_eq!(session.awaiting(), Some(AudioParam::Volume));

        session.set(AudioParam::Volume, 10_584_000.0);
        assert_eq!(session.awaiting(), Some(AudioParam::Depth));

        session.set(AudioParam::Depth, 16.0);
        session.set(AudioParam::Duration, 60.0);
        assert_eq!(session.awaiting(), Some(AudioParam::Channels));

        session.set(AudioParam::Channels, 2.0);
        assert_eq!(session.awaiting(), None);
        assert_eq!(session.inputs.value(AudioParam::Frequency), None);
    }

    #[test]
    fn audio_target_volume_skips_volume_prompt() {
        let session = AudioSession::new(AudioParam::Volume);
        assert_eq!(session.awaiting(), Some(AudioParam::Frequency));
    }
}
