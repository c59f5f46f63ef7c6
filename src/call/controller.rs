//! Call Session Controller
//!
//! Owns the call lifecycle: credential fetch, ringtone playback, room
//! connection and teardown. All methods run on the UI event loop; state
//! changes happen synchronously before any await so only one attempt can be
//! in flight. Each attempt carries a number and any result that arrives for
//! an abandoned attempt is discarded.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::channel::mpsc;
use futures::{FutureExt, StreamExt};

use super::audio_session::AudioSessionGuard;
use super::{
    AudioSession, CallError, CredentialProvider, RingtonePlayer, RoomConnection, RoomConnector, RoomSession,
};
use crate::models::{
    AgentState, AudioMode, AudioOutput, CallState, CallView, ConnectionState, Credentials, RoomEvent,
    RoomOptions, TranscriptionSegment,
};

/// Tunables for a controller instance.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSettings {
    pub ringing_enabled: bool,
    /// How long the ringtone keeps playing once credentials arrive.
    pub ringtone_grace: Duration,
    pub audio_output: AudioOutput,
    pub audio_mode: AudioMode,
    pub room_options: RoomOptions,
}

impl Default for CallSettings {
    fn default() -> Self {
        Self {
            ringing_enabled: true,
            ringtone_grace: Duration::ZERO,
            audio_output: AudioOutput::Speaker,
            audio_mode: AudioMode::default(),
            room_options: RoomOptions::default(),
        }
    }
}

enum Phase {
    Idle,
    FetchingCredentials,
    Ringing(Credentials),
    Connected(Credentials),
}

impl Phase {
    fn state(&self) -> CallState {
        match self {
            Phase::Idle => CallState::Idle,
            Phase::FetchingCredentials => CallState::FetchingCredentials,
            Phase::Ringing(_) => CallState::Ringing,
            Phase::Connected(_) => CallState::Connected,
        }
    }
}

struct Inner {
    phase: Phase,
    attempt: u64,
    connecting: bool,
    session: Option<Box<dyn RoomSession>>,
    audio: Option<AudioSessionGuard>,
    segments: Vec<TranscriptionSegment>,
    connection_state: Option<ConnectionState>,
    agent_state: Option<AgentState>,
    notice: Option<String>,
}

impl Inner {
    fn view(&self) -> CallView {
        CallView {
            state: self.phase.state(),
            transcriptions: self.segments.iter().map(|s| s.text.clone()).collect(),
            connection_state: self.connection_state,
            agent_state: self.agent_state,
            notice: self.notice.clone(),
        }
    }

    fn upsert_segment(&mut self, segment: TranscriptionSegment) {
        match self.segments.iter_mut().find(|s| s.id == segment.id) {
            Some(existing) => *existing = segment,
            None => self.segments.push(segment),
        }
    }
}

/// Room events for one connected attempt, consumed by [`CallController::relay`].
pub struct RoomEvents {
    attempt: u64,
    receiver: mpsc::UnboundedReceiver<RoomEvent>,
}

impl RoomEvents {
    pub fn attempt(&self) -> u64 {
        self.attempt
    }
}

type Observer = Box<dyn Fn(&CallView)>;

pub struct CallController {
    settings: CallSettings,
    credentials: Rc<dyn CredentialProvider>,
    ringtone: Rc<dyn RingtonePlayer>,
    audio: Rc<dyn AudioSession>,
    room: Rc<dyn RoomConnector>,
    inner: RefCell<Inner>,
    observer: RefCell<Option<Observer>>,
}

impl CallController {
    pub fn new(
        settings: CallSettings,
        credentials: Rc<dyn CredentialProvider>,
        ringtone: Rc<dyn RingtonePlayer>,
        audio: Rc<dyn AudioSession>,
        room: Rc<dyn RoomConnector>,
    ) -> Self {
        Self {
            settings,
            credentials,
            ringtone,
            audio,
            room,
            inner: RefCell::new(Inner {
                phase: Phase::Idle,
                attempt: 0,
                connecting: false,
                session: None,
                audio: None,
                segments: Vec::new(),
                connection_state: None,
                agent_state: None,
                notice: None,
            }),
            observer: RefCell::new(None),
        }
    }

    /// Register a callback invoked with a fresh snapshot after every change.
    pub fn set_observer(&self, observer: impl Fn(&CallView) + 'static) {
        *self.observer.borrow_mut() = Some(Box::new(observer));
    }

    pub fn state(&self) -> CallState {
        self.inner.borrow().phase.state()
    }

    pub fn view(&self) -> CallView {
        self.inner.borrow().view()
    }

    #[cfg(test)]
    fn credentials(&self) -> Option<Credentials> {
        match &self.inner.borrow().phase {
            Phase::Ringing(c) | Phase::Connected(c) => Some(c.clone()),
            Phase::Idle | Phase::FetchingCredentials => None,
        }
    }

    /// Fetch credentials, ring, and connect the room.
    ///
    /// Returns the room event stream once the call is `Connected`. Rejected
    /// with [`CallError::Busy`] unless the controller is idle.
    pub async fn start_call(&self) -> Result<RoomEvents, CallError> {
        let attempt = {
            let mut inner = self.inner.borrow_mut();
            let current = inner.phase.state();
            if current != CallState::Idle {
                tracing::warn!("Ignoring start call while {}", current);
                return Err(CallError::Busy(current));
            }
            inner.attempt += 1;
            inner.phase = Phase::FetchingCredentials;
            inner.segments.clear();
            inner.connection_state = None;
            inner.agent_state = None;
            inner.notice = None;
            inner.attempt
        };

        tracing::info!(attempt, "Starting call, fetching credentials");
        self.start_ringing();
        self.notify();

        let fetched = self.credentials.fetch().await;
        if !self.is_current(attempt) {
            tracing::debug!(attempt, "Discarding credential response for abandoned attempt");
            return Err(CallError::Cancelled);
        }

        let credentials = match fetched {
            Ok(credentials) => credentials,
            Err(e) => {
                tracing::error!(attempt, "Credential fetch failed: {}", e);
                let err = CallError::CredentialFetch(e);
                self.teardown(Some(err.to_string()));
                return Err(err);
            }
        };

        let grace = self.ringing_grace();
        if grace.is_none() {
            self.stop_ringing();
        }
        {
            let mut inner = self.inner.borrow_mut();
            inner.phase = match grace {
                Some(_) => Phase::Ringing(credentials.clone()),
                None => Phase::Connected(credentials.clone()),
            };
        }
        self.notify();

        let audio = match AudioSessionGuard::acquire(self.audio.clone(), self.settings.audio_output).await {
            Ok(guard) => Some(guard),
            Err(e) => {
                tracing::warn!(attempt, "Audio session unavailable: {}", e);
                None
            }
        };
        if !self.is_current(attempt) {
            tracing::debug!(attempt, "Call ended while starting audio session");
            return Err(CallError::Cancelled);
        }
        self.inner.borrow_mut().audio = audio;

        tracing::info!(attempt, "Connecting to room at {}", credentials.server_url());
        self.inner.borrow_mut().connecting = true;
        let connected = self.room.connect(&credentials, self.settings.room_options).await;
        if !self.is_current(attempt) {
            if let Ok(connection) = connected {
                tracing::debug!(attempt, "Disconnecting room opened for abandoned attempt");
                connection.session.disconnect();
            }
            return Err(CallError::Cancelled);
        }
        self.inner.borrow_mut().connecting = false;

        let RoomConnection { session, mut events } = match connected {
            Ok(connection) => connection,
            Err(e) => {
                tracing::error!(attempt, "Room connection failed: {}", e);
                let err = CallError::from(e);
                self.teardown(Some(err.to_string()));
                return Err(err);
            }
        };
        self.inner.borrow_mut().session = Some(session);

        if let Some(grace) = grace {
            // Room events keep flowing while the ringtone finishes
            let timer = super::sleep(grace).fuse();
            futures::pin_mut!(timer);
            loop {
                futures::select! {
                    _ = timer => break,
                    event = events.next() => match event {
                        Some(event) => self.apply_room_event(attempt, event)?,
                        None => return Err(self.connection_lost(attempt)),
                    },
                }
            }
            if !self.is_current(attempt) {
                return Err(CallError::Cancelled);
            }

            self.stop_ringing();
            {
                let mut inner = self.inner.borrow_mut();
                if matches!(inner.phase, Phase::Ringing(_)) {
                    inner.phase = Phase::Connected(credentials);
                }
            }
            self.notify();
        }

        tracing::info!(attempt, "Call connected");
        Ok(RoomEvents {
            attempt,
            receiver: events,
        })
    }

    /// Hang up or cancel the pending attempt. A no-op when idle.
    pub fn end_call(&self) {
        if self.teardown(Some("Call ended".to_string())) {
            tracing::info!("Call ended by user");
        } else {
            tracing::debug!("End call ignored while idle");
        }
    }

    /// Mirror room events into the display until the session ends.
    pub async fn relay(&self, mut events: RoomEvents) {
        let attempt = events.attempt();
        while let Some(event) = events.receiver.next().await {
            if self.apply_room_event(attempt, event).is_err() {
                return;
            }
        }
        self.connection_lost(attempt);
    }

    /// Apply one room event. Returns `false` once the attempt is over.
    pub fn handle_room_event(&self, attempt: u64, event: RoomEvent) -> bool {
        self.apply_room_event(attempt, event).is_ok()
    }

    /// Apply one room event, failing with the error that ended the attempt.
    fn apply_room_event(&self, attempt: u64, event: RoomEvent) -> Result<(), CallError> {
        if !self.is_current(attempt) {
            tracing::debug!(attempt, "Ignoring room event for abandoned attempt");
            return Err(CallError::Cancelled);
        }

        let failure = match event {
            RoomEvent::ConnectionStateChanged { state } => {
                tracing::info!(attempt, "Connection state: {}", state);
                self.inner.borrow_mut().connection_state = Some(state);
                if state == ConnectionState::Disconnected {
                    self.teardown(Some("Connection lost".to_string()));
                    return Err(CallError::RoomConnection("Connection lost".to_string()));
                }
                None
            }
            RoomEvent::AgentStateChanged { state } => {
                tracing::debug!(attempt, "Agent state: {}", state);
                self.inner.borrow_mut().agent_state = Some(state);
                None
            }
            RoomEvent::Transcription(segment) => {
                self.inner.borrow_mut().upsert_segment(segment);
                None
            }
            RoomEvent::Error { message } => Some(CallError::RoomConnection(message)),
            RoomEvent::EncryptionError { message } => Some(CallError::Encryption(message)),
            RoomEvent::MediaDeviceFailure { message } => Some(CallError::MediaDevice(message)),
        };

        if let Some(err) = failure {
            if err.is_fatal() {
                tracing::error!(attempt, "Room failure: {}", err);
                self.teardown(Some(err.to_string()));
                return Err(err);
            }
            tracing::warn!(attempt, "Room warning: {}", err);
            self.inner.borrow_mut().notice = Some(err.to_string());
        }

        self.notify();
        Ok(())
    }

    /// Tear down after the room event stream closed on its own.
    fn connection_lost(&self, attempt: u64) -> CallError {
        if !self.is_current(attempt) {
            return CallError::Cancelled;
        }
        tracing::warn!(attempt, "Room event stream closed");
        self.teardown(Some("Connection lost".to_string()));
        CallError::RoomConnection("Connection lost".to_string())
    }

    fn is_current(&self, attempt: u64) -> bool {
        let inner = self.inner.borrow();
        inner.attempt == attempt && !matches!(inner.phase, Phase::Idle)
    }

    fn ringing_grace(&self) -> Option<Duration> {
        let grace = self.settings.ringtone_grace;
        (self.settings.ringing_enabled && !grace.is_zero()).then_some(grace)
    }

    fn start_ringing(&self) {
        if !self.settings.ringing_enabled {
            return;
        }
        self.ringtone.set_audio_mode(self.settings.audio_mode);
        self.ringtone.set_loop(true);
        self.ringtone.play();
    }

    fn stop_ringing(&self) {
        if self.settings.ringing_enabled {
            self.ringtone.pause();
        }
    }

    /// Return to idle, releasing everything the attempt holds.
    fn teardown(&self, notice: Option<String>) -> bool {
        let (was, connecting, session, audio) = {
            let mut inner = self.inner.borrow_mut();
            let was = inner.phase.state();
            if was == CallState::Idle {
                return false;
            }
            inner.phase = Phase::Idle;
            inner.connection_state = None;
            inner.agent_state = None;
            inner.notice = notice;
            let connecting = std::mem::take(&mut inner.connecting);
            (was, connecting, inner.session.take(), inner.audio.take())
        };

        if was.is_ringing() {
            self.stop_ringing();
        }
        if connecting {
            self.room.cancel();
        }
        if let Some(session) = session {
            session.disconnect();
        }
        drop(audio);

        self.notify();
        true
    }

    fn notify(&self) {
        let view = self.view();
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer(&view);
        }
    }
}
