// ## `pattern/core.rs`: stable public API

use std::sync::Arc;

use crossbeam::channel::{bounded, unbounded};
use tracing::{debug, warn};

use crate::{
    alphabet::{Rgb, SymbolAlphabet},
    config::CodecConfig,
    crypto::{derive_aead_key, AeadImpl, CipherSuite, MasterKey},
    envelope::{Envelope, EnvelopeError, SecurityLevel},
    framing::{decode_frames, encode_frames, Frame, Sample},
    pattern::{
        document::PatternDocument,
        info::{pattern_hash, InfoSource, PatternInfo},
    },
    session::{Session, SessionId, Timestamp},
    sync::{unwrap, wrap, FrameSequence, SyncAnomaly, SyncMetadata},
    telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer},
    types::CodecError,
};

/// Result of one encode.
#[derive(Clone, Debug)]
pub struct EncodedPattern {
    pub sequence: FrameSequence,
    pub pattern_id: String,
    pub session_id: SessionId,
    pub sequence_number: u64,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub security_level: SecurityLevel,
    pub cipher_suite: CipherSuite,
    /// BLAKE3 fingerprint of the frames, see `pattern_hash`.
    pub pattern_hash: String,
    pub telemetry: TelemetrySnapshot,
}

impl EncodedPattern {
    pub fn frames(&self) -> &[Frame] {
        self.sequence.frames()
    }

    pub fn to_document(&self) -> PatternDocument {
        PatternDocument {
            frames: self.sequence.frames().to_vec(),
            frame_duration: self.sequence.frame_duration,
            total_frames: self.sequence.total_frames(),
            created_at: self.created_at,
            expires_at: self.expires_at,
            security_level: self.security_level,
            pattern_id: self.pattern_id.clone(),
            sequence_number: self.sequence_number,
            cipher_suite: self.cipher_suite,
            pattern_hash: self.pattern_hash.clone(),
        }
    }

    pub fn info(&self, now: Timestamp) -> PatternInfo {
        PatternInfo::build(
            InfoSource {
                pattern_id: &self.pattern_id,
                sequence_number: self.sequence_number,
                security_level: self.security_level,
                cipher_suite: self.cipher_suite,
                total_frames: self.sequence.total_frames(),
                frame_duration: self.sequence.frame_duration,
                created_at: self.created_at,
                expires_at: self.expires_at,
                pattern_hash: &self.pattern_hash,
            },
            now,
        )
    }
}

/// Result of one successful decode.
#[derive(Clone, Debug)]
pub struct DecodeOutcome {
    pub payload: String,
    pub envelope: Envelope,
    /// Advisory findings; never affect whether the decode succeeded.
    pub anomalies: Vec<SyncAnomaly>,
    pub telemetry: TelemetrySnapshot,
}

pub fn pattern_id(session_id: &SessionId, sequence: u64) -> String {
    format!("RP_{}_{:04}", session_id.to_hex(), sequence)
}

fn setup_cipher(config: &CodecConfig, master_key: &MasterKey) -> Result<(SymbolAlphabet, AeadImpl), CodecError> {
    config.validate()?;
    let alphabet = config.alphabet()?;
    let key = derive_aead_key(master_key, config.kdf_prf, config.cipher_suite)?;
    let aead = AeadImpl::new(config.cipher_suite, &key)?;
    Ok((alphabet, aead))
}

/// 🔐 Encoder: string in, frame sequence out.
///
/// Holds one session; every encode consumes one sequence number from it.
pub struct PatternEncoder {
    config: CodecConfig,
    alphabet: SymbolAlphabet,
    aead: AeadImpl,
    session: Arc<Session>,
}

impl PatternEncoder {
    pub fn new(config: CodecConfig, session: impl Into<Arc<Session>>) -> Result<Self, CodecError> {
        let session = session.into();
        let (alphabet, aead) = setup_cipher(&config, session.master_key())?;
        Ok(Self { config, alphabet, aead, session })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn alphabet(&self) -> &SymbolAlphabet {
        &self.alphabet
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn encode(&self, data: &str) -> Result<EncodedPattern, CodecError> {
        self.encode_at(data, Timestamp::now())
    }

    /// Encode with an explicit clock reading.
    pub fn encode_at(&self, data: &str, now: Timestamp) -> Result<EncodedPattern, CodecError> {
        let mut timer = TelemetryTimer::new();
        let mut counters = TelemetryCounters::default();
        let grid = self.config.grid_size;

        // 1️⃣ Envelope (consumes a sequence number)
        let params = self.config.envelope_params();
        let envelope = timer.time(Stage::Envelope, || Envelope::build(data, &params, &self.session, now))?;
        let plaintext = envelope.to_bytes();

        // 2️⃣ Seal
        let ciphertext = timer.time(Stage::Encrypt, || self.aead.seal(&plaintext))?.to_bytes();

        // 3️⃣ Bits to frames
        let framed = timer.time(Stage::Frame, || {
            encode_frames(&ciphertext, &self.alphabet, grid, self.config.checksum)
        });
        counters.add_framing(framed.checksum.len(), framed.pad_bits);

        // 4️⃣ Markers and metadata
        let metadata = self
            .config
            .sync_metadata
            .then(|| SyncMetadata::new(envelope.created_at, &framed.checksum));
        let data_frames = framed.frames.len();
        let sequence = timer.time(Stage::Wrap, || {
            wrap(framed.frames, metadata.as_ref(), &self.alphabet, grid, self.config.frame_duration)
        });

        counters.add_bytes(data.len(), plaintext.len(), ciphertext.len());
        counters.add_sequence(data_frames, sequence.metadata_frames());
        timer.finish();

        let pattern_id = pattern_id(&envelope.session_id, envelope.sequence);
        debug!(
            pattern = %pattern_id,
            frames = sequence.total_frames(),
            ciphertext_len = ciphertext.len(),
            "pattern encoded"
        );

        Ok(EncodedPattern {
            pattern_id,
            session_id: envelope.session_id,
            sequence_number: envelope.sequence,
            created_at: envelope.created_at,
            expires_at: envelope.expires_at,
            security_level: envelope.security_level,
            cipher_suite: self.config.cipher_suite,
            pattern_hash: pattern_hash(sequence.frames()),
            telemetry: TelemetrySnapshot::from(&counters, &timer),
            sequence,
        })
    }
}

/// 🔓 Decoder: observed frames in, payload out.
///
/// Stateless apart from configuration and key material, so one decoder may
/// serve many threads.
pub struct PatternDecoder {
    config: CodecConfig,
    alphabet: SymbolAlphabet,
    aead: AeadImpl,
    master_key: MasterKey,
}

impl PatternDecoder {
    pub fn new(config: CodecConfig, master_key: MasterKey) -> Result<Self, CodecError> {
        let (alphabet, aead) = setup_cipher(&config, &master_key)?;
        Ok(Self { config, alphabet, aead, master_key })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn decode(&self, frames: &[Frame]) -> Result<DecodeOutcome, CodecError> {
        self.decode_at(frames, Timestamp::now())
    }

    /// Decode already-sampled symbol values (one per frame).
    pub fn decode_samples(&self, samples: &[Rgb], now: Timestamp) -> Result<DecodeOutcome, CodecError> {
        self.decode_at(samples, now)
    }

    pub fn decode_document(&self, doc: &PatternDocument, now: Timestamp) -> Result<DecodeOutcome, CodecError> {
        doc.validate()?;
        self.decode_at(&doc.frames, now)
    }

    /// Decode with an explicit clock reading.
    ///
    /// Check order: sync markers, framer checksum, AEAD, envelope structure,
    /// integrity tag, expiry, then advisory metadata.
    pub fn decode_at<T: Sample>(&self, observed: &[T], now: Timestamp) -> Result<DecodeOutcome, CodecError> {
        self.decode_inner(observed, now).map_err(|e| {
            warn!(error = %e, frames = observed.len(), "pattern rejected");
            e
        })
    }

    fn decode_inner<T: Sample>(&self, observed: &[T], now: Timestamp) -> Result<DecodeOutcome, CodecError> {
        let mut timer = TelemetryTimer::new();
        let mut counters = TelemetryCounters::default();
        let k = self.alphabet.bits_per_symbol() as usize;

        // 1️⃣ Locate the data run
        let window = timer.time(Stage::Unwrap, || unwrap(observed, &self.alphabet))?;
        let window_len = window.end_index - window.start_index + 1;
        let metadata_frames = window_len - 2 - window.data.len();
        counters.add_ignored(observed.len() - window_len);
        counters.add_sequence(window.data.len(), metadata_frames);

        // 2️⃣ Samples to bytes, framer checksum
        let deframed = timer.time(Stage::Sample, || {
            decode_frames(window.data, &self.alphabet, self.config.checksum, self.config.sample_tolerance)
        })?;
        counters.add_untrusted(deframed.untrusted_samples);
        counters.add_framing(deframed.checksum.len(), ((window.data.len() * k) % 8) as u8);

        // 3️⃣ AEAD
        let plaintext = timer.time(Stage::Decrypt, || self.aead.open_bytes(&deframed.bytes))?;

        // 4️⃣ Envelope: structure, tag, expiry
        let envelope = timer.time(Stage::Validate, || -> Result<Envelope, EnvelopeError> {
            let envelope = Envelope::parse(&plaintext)?;
            envelope.validate(&self.master_key, self.config.kdf_prf, now)?;
            Ok(envelope)
        })?;

        // 5️⃣ Advisory findings
        let mut anomalies = Vec::new();
        if let Some(meta) = window.metadata {
            anomalies.extend(meta.check(envelope.created_at, &deframed.checksum));
        }
        if window.metadata_unreadable {
            anomalies.push(SyncAnomaly::MetadataUnreadable);
        }
        if deframed.untrusted_samples > 0 {
            anomalies.push(SyncAnomaly::UntrustedSamples { count: deframed.untrusted_samples });
        }
        for a in &anomalies {
            warn!(anomaly = %a, sequence = envelope.sequence, "sync anomaly");
        }

        counters.add_bytes(envelope.payload.len(), plaintext.len(), deframed.bytes.len());
        timer.finish();

        debug!(
            pattern = %pattern_id(&envelope.session_id, envelope.sequence),
            frames = observed.len(),
            anomalies = anomalies.len(),
            "pattern decoded"
        );

        Ok(DecodeOutcome {
            payload: envelope.payload.clone(),
            envelope,
            anomalies,
            telemetry: TelemetrySnapshot::from(&counters, &timer),
        })
    }

    /// Decode independent observations on a small worker pool. Results are
    /// returned in input order.
    pub fn decode_batch<T: Sample + Sync>(
        &self,
        observations: &[Vec<T>],
        now: Timestamp,
    ) -> Vec<Result<DecodeOutcome, CodecError>> {
        let n = observations.len();
        if n == 0 {
            return Vec::new();
        }
        let workers = num_cpus::get().max(1).min(n);

        // Job queue holds every index up front; workers drain it.
        let (job_tx, job_rx) = bounded::<usize>(n);
        let (out_tx, out_rx) = unbounded::<(usize, Result<DecodeOutcome, CodecError>)>();
        for i in 0..n {
            if job_tx.send(i).is_err() {
                break;
            }
        }
        drop(job_tx);

        let scoped = crossbeam::thread::scope(|s| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let out_tx = out_tx.clone();
                s.spawn(move |_| {
                    while let Ok(i) = job_rx.recv() {
                        let result = self.decode_at(&observations[i], now);
                        if out_tx.send((i, result)).is_err() {
                            return;
                        }
                    }
                });
            }
        });
        drop(out_tx);
        if scoped.is_err() {
            warn!("batch decode worker panicked");
        }

        let mut slots: Vec<Option<Result<DecodeOutcome, CodecError>>> = (0..n).map(|_| None).collect();
        for (i, result) in out_rx.try_iter() {
            slots[i] = Some(result);
        }
        slots
            .into_iter()
            .map(|slot| slot.unwrap_or(Err(CodecError::PipelineError("batch worker exited early"))))
            .collect()
    }
}
