//! Real-time playback of decoded frames over IWP.
//!
//! A [`Player`] owns one datagram transport for the whole session. Creating
//! it sends the scan-period datagram; [`Player::play`] then walks the frames
//! in order, once per repetition, sending every packet of every frame. The
//! loop is single-threaded: it blocks on sends and on the optional pacing
//! sleep after each packet, and polls a [`StopFlag`] in between.
//!
//! Datagrams are never acknowledged or retried. What happens when a send
//! fails is chosen by [`SendErrorPolicy`].

pub mod transport;

use std::num::NonZeroU32;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use time::OffsetDateTime;

use crate::animation::Frame;
use crate::protocols::iwp::{ColorDepth, PacketEncoder, period_packet, turn_off_packet};
use transport::{DatagramTransport, TransportError};

const MICROS_PER_SECOND: f64 = 1_000_000.0;
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(5);

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("scan rate must be positive")]
    InvalidScanRate,
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Scan period for `scan_rate_hz`, rounded and clamped to the wire range.
///
/// # Examples
/// ```
/// use ildacast_core::scan_period_us;
///
/// assert_eq!(scan_period_us(1000).unwrap(), 1000);
/// assert_eq!(scan_period_us(3).unwrap(), 333_333);
/// assert!(scan_period_us(0).is_err());
/// ```
pub fn scan_period_us(scan_rate_hz: u32) -> Result<u32, PlayerError> {
    if scan_rate_hz == 0 {
        return Err(PlayerError::InvalidScanRate);
    }
    let period = (MICROS_PER_SECOND / f64::from(scan_rate_hz)).round();
    Ok(period.clamp(1.0, f64::from(u32::MAX)) as u32)
}

/// How many times the frame list is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Forever,
    Times(NonZeroU32),
}

impl Repeat {
    /// `0` means forever.
    pub fn from_count(count: u32) -> Self {
        NonZeroU32::new(count).map_or(Repeat::Forever, Repeat::Times)
    }

    fn allows(self, completed: u32) -> bool {
        match self {
            Repeat::Forever => true,
            Repeat::Times(times) => completed < times.get(),
        }
    }
}

impl Default for Repeat {
    fn default() -> Self {
        Repeat::Times(NonZeroU32::MIN)
    }
}

/// What to do when a datagram cannot be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendErrorPolicy {
    /// End the session and return the transport error.
    #[default]
    Abort,
    /// Log, count the datagram as skipped and carry on.
    Skip,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    pub scan_rate_hz: u32,
    /// Pause after every packet. `None` sends as fast as possible.
    pub pacing: Option<Duration>,
    pub repeat: Repeat,
    pub depth: ColorDepth,
    pub send_error_policy: SendErrorPolicy,
    /// Send a turn-off datagram when playback ends.
    pub turn_off_on_exit: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            scan_rate_hz: 1000,
            pacing: None,
            repeat: Repeat::default(),
            depth: ColorDepth::default(),
            send_error_policy: SendErrorPolicy::default(),
            turn_off_on_exit: false,
        }
    }
}

impl PlayerConfig {
    /// Pace packets at `rate_hz`; zero, negative or non-finite disables pacing.
    pub fn with_pacing_rate(mut self, rate_hz: f64) -> Self {
        self.pacing = if rate_hz.is_finite() && rate_hz > 0.0 {
            Duration::try_from_secs_f64(1.0 / rate_hz).ok()
        } else {
            None
        };
        self
    }
}

/// Cooperative cancellation shared between the player and an interrupt
/// handler.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackStats {
    /// Point datagrams handed to the transport.
    pub packets_sent: u64,
    pub bytes_sent: u64,
    /// Frames whose every packet was sent.
    pub frames_sent: u64,
    pub loops_completed: u32,
    /// Datagrams dropped under [`SendErrorPolicy::Skip`].
    pub packets_skipped: u64,
    pub interrupted: bool,
    pub started_at: OffsetDateTime,
    pub finished_at: OffsetDateTime,
}

impl PlaybackStats {
    fn start() -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            packets_sent: 0,
            bytes_sent: 0,
            frames_sent: 0,
            loops_completed: 0,
            packets_skipped: 0,
            interrupted: false,
            started_at: now,
            finished_at: now,
        }
    }
}

pub struct Player<T: DatagramTransport> {
    transport: T,
    config: PlayerConfig,
    encoder: PacketEncoder,
    scan_period_us: u32,
}

impl<T: DatagramTransport> Player<T> {
    /// Open a session: validate the scan rate and send the period datagram.
    pub fn new(mut transport: T, config: PlayerConfig) -> Result<Self, PlayerError> {
        let scan_period_us = scan_period_us(config.scan_rate_hz)?;
        transport.send(&period_packet(scan_period_us))?;
        tracing::info!(
            scan_rate_hz = config.scan_rate_hz,
            scan_period_us,
            "scan period configured"
        );
        Ok(Self {
            transport,
            encoder: PacketEncoder::new(config.depth),
            config,
            scan_period_us,
        })
    }

    pub fn scan_period_us(&self) -> u32 {
        self.scan_period_us
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Stream `frames` until the repeat count is reached or `stop` is set.
    ///
    /// Every datagram is built before the first one is sent. An interrupt
    /// takes effect after the datagram in flight; it is not an error.
    pub fn play(
        &mut self,
        frames: &[Frame],
        stop: &StopFlag,
    ) -> Result<PlaybackStats, PlayerError> {
        let packets: Vec<Vec<Vec<u8>>> = frames
            .iter()
            .map(|frame| self.encoder.encode_points(&frame.points))
            .collect();
        let packets_per_loop: usize = packets.iter().map(Vec::len).sum();
        tracing::info!(
            frames = frames.len(),
            packets_per_loop,
            repeat = ?self.config.repeat,
            pacing = ?self.config.pacing,
            "playback started"
        );

        let mut stats = PlaybackStats::start();
        let outcome = self.run(&packets, packets_per_loop, stop, &mut stats);

        if self.config.turn_off_on_exit {
            if let Err(err) = self.transport.send(&turn_off_packet()) {
                tracing::warn!(error = %err, "turn-off datagram not sent");
            }
        }
        stats.finished_at = OffsetDateTime::now_utc();
        tracing::info!(
            packets = stats.packets_sent,
            frames = stats.frames_sent,
            loops = stats.loops_completed,
            interrupted = stats.interrupted,
            "playback finished"
        );
        outcome.map(|()| stats)
    }

    fn run(
        &mut self,
        packets: &[Vec<Vec<u8>>],
        packets_per_loop: usize,
        stop: &StopFlag,
        stats: &mut PlaybackStats,
    ) -> Result<(), PlayerError> {
        if packets_per_loop == 0 {
            tracing::warn!("no frame produces any datagram; playing a single pass");
        }

        while self.config.repeat.allows(stats.loops_completed) {
            if stop.is_stop_requested() {
                stats.interrupted = true;
                return Ok(());
            }
            for frame in packets {
                for packet in frame {
                    // A frame counts as sent once its last datagram is out.
                    if stop.is_stop_requested() {
                        stats.interrupted = true;
                        return Ok(());
                    }
                    self.send_packet(packet, stats)?;
                    if let Some(pacing) = self.config.pacing {
                        pause(pacing, stop);
                    }
                }
                stats.frames_sent += 1;
            }
            stats.loops_completed = stats.loops_completed.saturating_add(1);
            if packets_per_loop == 0 {
                break;
            }
        }
        Ok(())
    }

    fn send_packet(&mut self, packet: &[u8], stats: &mut PlaybackStats) -> Result<(), PlayerError> {
        match self.transport.send(packet) {
            Ok(()) => {
                stats.packets_sent += 1;
                stats.bytes_sent += packet.len() as u64;
                Ok(())
            }
            Err(err) => match self.config.send_error_policy {
                SendErrorPolicy::Abort => Err(err.into()),
                SendErrorPolicy::Skip => {
                    stats.packets_skipped += 1;
                    tracing::warn!(
                        error = %err,
                        skipped = stats.packets_skipped,
                        "datagram skipped"
                    );
                    Ok(())
                }
            },
        }
    }
}

/// Sleep for `duration`, returning early once `stop` is set.
fn pause(duration: Duration, stop: &StopFlag) {
    let deadline = Instant::now() + duration;
    loop {
        if stop.is_stop_requested() {
            return;
        }
        let now = Instant::now();
        if now >= deadline {
            return;
        }
        thread::sleep((deadline - now).min(STOP_POLL_INTERVAL));
    }
}
