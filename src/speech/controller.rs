use super::aggregator::TranscriptAggregator;
use super::device::{DeviceEvent, SpeechDevice};
use crate::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Listening lifecycle, owned exclusively by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListeningState {
    /// Not listening
    Idle,
    /// Device running, emitting events
    Active,
    /// Device ended mid-span; re-acquire in flight
    Restarting,
}

/// Observable side effects of a listening span
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionNotice {
    /// The transcript changed; fired once per committed final and once per
    /// meaningfully-changed interim
    Transcript { text: String, is_final: bool },
    /// Continuous-mode auto-restart failed; listening fell back to idle
    RestartFailed { reason: String },
    /// Hard device error; listening stopped without a restart attempt
    DeviceError { code: String },
}

/// Owns the speech device lifecycle and routes its events into the
/// transcript aggregator
///
/// In continuous mode an ordinary end of utterance does not end the span:
/// the controller re-acquires the device and keeps appending to the same
/// transcript. `stop()` wins over a restart in flight.
pub struct RecognitionController {
    device: Arc<Mutex<Box<dyn SpeechDevice>>>,
    aggregator: Arc<Mutex<TranscriptAggregator>>,
    continuous: bool,
    listening: Arc<AtomicBool>,
    state_tx: watch::Sender<ListeningState>,
    state_rx: watch::Receiver<ListeningState>,
    notice_tx: mpsc::UnboundedSender<RecognitionNotice>,
    pump_handle: Mutex<Option<JoinHandle<()>>>,
}

impl RecognitionController {
    /// Wrap a device; returns the controller plus its notice stream
    pub fn new(
        device: Box<dyn SpeechDevice>,
        continuous: bool,
    ) -> (Self, mpsc::UnboundedReceiver<RecognitionNotice>) {
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ListeningState::Idle);

        let controller = Self {
            device: Arc::new(Mutex::new(device)),
            aggregator: Arc::new(Mutex::new(TranscriptAggregator::new())),
            continuous,
            listening: Arc::new(AtomicBool::new(false)),
            state_tx,
            state_rx,
            notice_tx,
            pump_handle: Mutex::new(None),
        };

        (controller, notice_rx)
    }

    pub fn state(&self) -> ListeningState {
        *self.state_rx.borrow()
    }

    /// Watch listening-state transitions
    pub fn watch_state(&self) -> watch::Receiver<ListeningState> {
        self.state_rx.clone()
    }

    /// Current transcript: committed segments plus pending interim
    pub async fn transcript(&self) -> String {
        self.aggregator.lock().await.full_transcript()
    }

    /// Reset the transcript; permitted in any listening state
    pub async fn clear(&self) {
        self.aggregator.lock().await.clear();
    }

    /// Begin a listening span
    ///
    /// Fails with `Error::Unsupported` when the platform has no recognition
    /// capability. The transcript is reset first so segments from a previous
    /// span never leak into this one.
    pub async fn start(&self) -> Result<(), Error> {
        {
            let device = self.device.lock().await;
            if !device.is_supported() {
                return Err(Error::Unsupported);
            }
        }

        if self.listening.load(Ordering::SeqCst) {
            warn!("recognition already active");
            return Ok(());
        }

        // Reap the pump from a span that ended on its own (hard error,
        // failed restart, ordinary non-continuous end) so its final writes
        // cannot race this span's
        if let Some(old_pump) = self.pump_handle.lock().await.take() {
            if let Err(e) = old_pump.await {
                error!("recognition pump panicked: {}", e);
            }
        }
        self.listening.store(true, Ordering::SeqCst);

        self.aggregator.lock().await.clear();

        let events = {
            let mut device = self.device.lock().await;
            match device.start().await {
                Ok(events) => {
                    info!("recognition started ({})", device.name());
                    events
                }
                Err(e) => {
                    self.listening.store(false, Ordering::SeqCst);
                    return Err(Error::DeviceStart(e.to_string()));
                }
            }
        };

        self.state_tx.send_replace(ListeningState::Active);

        let pump = tokio::spawn(pump_events(
            events,
            Arc::clone(&self.device),
            Arc::clone(&self.aggregator),
            self.continuous,
            Arc::clone(&self.listening),
            self.state_tx.clone(),
            self.notice_tx.clone(),
        ));
        *self.pump_handle.lock().await = Some(pump);

        Ok(())
    }

    /// End the listening span, winning over any restart in flight
    ///
    /// The device is stopped before this returns and the pump task is
    /// joined, so no further notices arrive afterwards.
    pub async fn stop(&self) {
        if !self.listening.swap(false, Ordering::SeqCst) {
            return;
        }

        {
            let mut device = self.device.lock().await;
            if let Err(e) = device.stop().await {
                warn!("failed to stop speech device: {}", e);
            }
        }

        if let Some(pump) = self.pump_handle.lock().await.take() {
            if let Err(e) = pump.await {
                error!("recognition pump panicked: {}", e);
            }
        }

        self.state_tx.send_replace(ListeningState::Idle);
        info!("recognition stopped");
    }
}

/// Consume device events across restarts until the span ends
async fn pump_events(
    mut events: mpsc::Receiver<DeviceEvent>,
    device: Arc<Mutex<Box<dyn SpeechDevice>>>,
    aggregator: Arc<Mutex<TranscriptAggregator>>,
    continuous: bool,
    listening: Arc<AtomicBool>,
    state_tx: watch::Sender<ListeningState>,
    notice_tx: mpsc::UnboundedSender<RecognitionNotice>,
) {
    loop {
        // Drain one device span. `true` means the device ended ordinarily
        // (end of utterance or closed channel); `false` means a hard error.
        let ended = loop {
            let Some(event) = events.recv().await else {
                break true;
            };

            match event {
                DeviceEvent::Started => {}
                DeviceEvent::Result(event) => {
                    let update = aggregator.lock().await.apply(&event);
                    if let Some(update) = update {
                        let _ = notice_tx.send(RecognitionNotice::Transcript {
                            text: update.transcript,
                            is_final: update.is_final,
                        });
                    }
                }
                DeviceEvent::Error(code) => {
                    warn!("speech device error: {}", code);
                    listening.store(false, Ordering::SeqCst);
                    let _ = notice_tx.send(RecognitionNotice::DeviceError { code });
                    break false;
                }
                DeviceEvent::Ended => break true,
            }
        };

        if !ended || !continuous || !listening.load(Ordering::SeqCst) {
            if ended && !continuous {
                // An ordinary end ends the whole span when not continuous
                listening.store(false, Ordering::SeqCst);
            }
            break;
        }

        // Ordinary end of utterance while the caller still wants to listen:
        // re-acquire the device and keep appending to the same transcript
        state_tx.send_replace(ListeningState::Restarting);
        info!("speech device ended early, restarting");

        let reacquired = {
            let mut device = device.lock().await;
            if !listening.load(Ordering::SeqCst) {
                // stop() won the race before the restart was attempted
                None
            } else {
                match device.start().await {
                    Ok(events) => Some(events),
                    Err(e) => {
                        warn!("recognition restart failed: {}", e);
                        listening.store(false, Ordering::SeqCst);
                        let _ = notice_tx.send(RecognitionNotice::RestartFailed {
                            reason: e.to_string(),
                        });
                        None
                    }
                }
            }
        };

        match reacquired {
            Some(new_events) if listening.load(Ordering::SeqCst) => {
                state_tx.send_replace(ListeningState::Active);
                events = new_events;
            }
            Some(_) => {
                // stop() arrived while the restart was in flight; the
                // re-acquired device must not be left running
                let mut device = device.lock().await;
                if let Err(e) = device.stop().await {
                    warn!("failed to stop re-acquired device: {}", e);
                }
                break;
            }
            None => break,
        }
    }

    state_tx.send_replace(ListeningState::Idle);
}
