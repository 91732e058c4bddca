//! Continuous frame decoding on an owned worker thread.
//!
//! A session owns a bounded frame queue and one worker. The caller's thread
//! appends frames; the worker decodes them in order, keeps the most recent
//! results and hands each one to the session callback. The callback always
//! runs on the worker thread.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use barcode_reader_core::{ErrorCode, FrameDecodingParameters, TextResult};
use log::{debug, error, warn};

use crate::reader::collect_text_results;
use crate::{BarcodeReaderError, NativeEngine};

/// Outcome of decoding one video frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameResult {
    /// Id returned by [`append_video_frame`](crate::BarcodeReader::append_video_frame).
    pub frame_id: u64,
    /// Status reported by the engine for this frame.
    pub status: ErrorCode,
    /// Results in engine order; empty when nothing was found or the status
    /// was not a tolerated one.
    pub results: Vec<TextResult>,
}

struct PendingFrame {
    id: u64,
    data: Vec<u8>,
}

/// State shared between the session handle and its worker.
struct Shared {
    queued: AtomicUsize,
    recent: Mutex<VecDeque<FrameResult>>,
    result_capacity: usize,
}

impl Shared {
    fn retain(&self, result: FrameResult) {
        let mut recent = self.recent.lock().unwrap_or_else(PoisonError::into_inner);
        while recent.len() >= self.result_capacity {
            recent.pop_front();
        }
        recent.push_back(result);
    }
}

pub(crate) struct VideoSession {
    sender: Option<SyncSender<PendingFrame>>,
    worker: Option<JoinHandle<()>>,
    shared: Arc<Shared>,
    next_frame_id: u64,
    /// Minimum frame length, when the session geometry is complete.
    frame_len: Option<usize>,
}

impl VideoSession {
    pub(crate) fn start<E, F>(
        engine: Arc<Mutex<E>>,
        parameters: FrameDecodingParameters,
        template: String,
        callback: F,
    ) -> std::io::Result<Self>
    where
        E: NativeEngine + Send + 'static,
        F: FnMut(&FrameResult) + Send + 'static,
    {
        let (sender, frames) = mpsc::sync_channel(parameters.queue_capacity());
        let shared = Arc::new(Shared {
            queued: AtomicUsize::new(0),
            recent: Mutex::new(VecDeque::with_capacity(parameters.result_capacity())),
            result_capacity: parameters.result_capacity(),
        });
        let frame_len = parameters.geometry().min_buffer_len().ok();

        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("barcode-video".into())
            .spawn(move || {
                run_worker(engine, frames, parameters, template, worker_shared, callback)
            })?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
            shared,
            next_frame_id: 0,
            frame_len,
        })
    }

    /// Queue a frame. A full queue drops the frame; its id is still used.
    pub(crate) fn append(&mut self, data: Vec<u8>) -> Result<u64, BarcodeReaderError> {
        if let Some(expected) = self.frame_len {
            if data.len() < expected {
                return Err(BarcodeReaderError::InvalidBuffer {
                    expected,
                    got: data.len(),
                });
            }
        }
        let sender = self
            .sender
            .as_ref()
            .ok_or(BarcodeReaderError::VideoModeNotRunning)?;

        let id = self.next_frame_id;
        self.next_frame_id += 1;

        self.shared.queued.fetch_add(1, Ordering::AcqRel);
        match sender.try_send(PendingFrame { id, data }) {
            Ok(()) => Ok(id),
            Err(TrySendError::Full(_)) => {
                self.shared.queued.fetch_sub(1, Ordering::AcqRel);
                debug!("frame queue full, dropping frame {id}");
                Ok(id)
            }
            Err(TrySendError::Disconnected(_)) => {
                self.shared.queued.fetch_sub(1, Ordering::AcqRel);
                error!("video worker exited unexpectedly");
                Err(BarcodeReaderError::VideoModeNotRunning)
            }
        }
    }

    /// Frames waiting for the worker. Advisory only.
    pub(crate) fn queue_len(&self) -> usize {
        self.shared.queued.load(Ordering::Acquire)
    }

    pub(crate) fn recent_results(&self) -> Vec<FrameResult> {
        self.shared
            .recent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Close the queue and wait for the worker to finish the frames it holds.
    pub(crate) fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("video worker panicked");
            }
        }
    }
}

impl Drop for VideoSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker<E, F>(
    engine: Arc<Mutex<E>>,
    frames: Receiver<PendingFrame>,
    parameters: FrameDecodingParameters,
    template: String,
    shared: Arc<Shared>,
    mut callback: F,
) where
    E: NativeEngine,
    F: FnMut(&FrameResult),
{
    debug!("video worker started");
    for frame in frames.iter() {
        shared.queued.fetch_sub(1, Ordering::AcqRel);

        let outcome = {
            let mut engine = engine.lock().unwrap_or_else(PoisonError::into_inner);
            let code = engine.decode_frame(&frame.data, &parameters, &template);
            (code, collect_text_results(&mut *engine, code))
        };
        let (code, results) = match outcome {
            (code, Ok(results)) => (code, results),
            (code, Err(err)) => {
                warn!("frame {} failed: {err}", frame.id);
                (code, Vec::new())
            }
        };

        let result = FrameResult {
            frame_id: frame.id,
            status: ErrorCode::from(code),
            results,
        };
        shared.retain(result.clone());
        callback(&result);
    }
    debug!("video worker finished");
}
