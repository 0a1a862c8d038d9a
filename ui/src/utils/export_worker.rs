//! Background rendering of export images.
//!
//! Rendering a card at 2x and encoding it as PNG takes long enough to drop
//! frames, so jobs go to a worker thread over a `flume` channel and the app
//! drains finished jobs once per frame.

use flume::{Receiver, Sender, TryRecvError};
use paylink_business::{ExportContent, ExportKind};
use paylink_render::{RenderError, RenderOptions, RenderedImage, render_export};

/// Where a finished export goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    /// RGBA pixels for the image clipboard.
    Clipboard,
    /// PNG bytes for a file.
    File,
}

#[derive(Debug, Clone)]
pub struct ExportJob {
    pub kind: ExportKind,
    pub target: ExportTarget,
    pub content: ExportContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportPayload {
    Image(RenderedImage),
    Png(Vec<u8>),
}

#[derive(Debug)]
pub struct ExportDone {
    pub job: ExportJob,
    pub payload: Result<ExportPayload, RenderError>,
}

/// Renders a job synchronously.
pub fn run_job(job: ExportJob, options: &RenderOptions) -> ExportDone {
    let payload =
        render_export(job.kind, &job.content, options).and_then(|image| match job.target {
            ExportTarget::Clipboard => Ok(ExportPayload::Image(image)),
            ExportTarget::File => image.to_png().map(ExportPayload::Png),
        });
    if let Err(err) = &payload {
        log::warn!("{} export failed: {err}", job.kind.slug());
    }
    ExportDone { job, payload }
}

/// Jobs and results are tagged with the batch they were submitted in.
type Tagged<T> = (u64, T);

enum Mode {
    Thread(Sender<Tagged<ExportJob>>),
    Inline(RenderOptions),
}

/// Queue of export jobs with their results.
pub struct ExportWorker {
    mode: Mode,
    done_tx: Sender<Tagged<ExportDone>>,
    done_rx: Receiver<Tagged<ExportDone>>,
    pending: usize,
    batch: u64,
}

impl std::fmt::Debug for ExportWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportWorker")
            .field("threaded", &matches!(self.mode, Mode::Thread(_)))
            .field("pending", &self.pending)
            .field("batch", &self.batch)
            .finish()
    }
}

impl Default for ExportWorker {
    fn default() -> Self {
        Self::spawn(RenderOptions::default())
    }
}

impl ExportWorker {
    /// Starts the worker thread. Falls back to inline rendering when
    /// threads are unavailable.
    pub fn spawn(options: RenderOptions) -> Self {
        let (done_tx, done_rx) = flume::unbounded();

        #[cfg(not(target_arch = "wasm32"))]
        {
            let (job_tx, job_rx) = flume::unbounded::<Tagged<ExportJob>>();
            let results = done_tx.clone();
            let worker_options = options.clone();
            let spawned = std::thread::Builder::new()
                .name("paylink-export".to_owned())
                .spawn(move || {
                    while let Ok((batch, job)) = job_rx.recv() {
                        if results.send((batch, run_job(job, &worker_options))).is_err() {
                            break;
                        }
                    }
                    log::debug!("export worker stopped");
                });

            match spawned {
                Ok(_) => {
                    return Self {
                        mode: Mode::Thread(job_tx),
                        done_tx,
                        done_rx,
                        pending: 0,
                        batch: 0,
                    };
                }
                Err(err) => log::warn!("export worker unavailable, rendering inline: {err}"),
            }
        }

        Self {
            mode: Mode::Inline(options),
            done_tx,
            done_rx,
            pending: 0,
            batch: 0,
        }
    }

    /// Renders on the calling thread; results are still read with [`Self::try_recv`].
    pub fn inline(options: RenderOptions) -> Self {
        let (done_tx, done_rx) = flume::unbounded();
        Self {
            mode: Mode::Inline(options),
            done_tx,
            done_rx,
            pending: 0,
            batch: 0,
        }
    }

    pub fn submit(&mut self, job: ExportJob) {
        log::debug!("export queued: {} for {:?}", job.kind.slug(), job.target);
        self.pending += 1;
        match &self.mode {
            Mode::Thread(jobs) => {
                if let Err(flume::SendError((_, job))) = jobs.send((self.batch, job)) {
                    log::warn!("export worker gone, rendering inline");
                    let done = run_job(job, &RenderOptions::default());
                    self.deliver_local(done);
                }
            }
            Mode::Inline(options) => {
                let done = run_job(job, options);
                self.deliver_local(done);
            }
        }
    }

    fn deliver_local(&self, done: ExportDone) {
        // The receiver lives in `self`, so this cannot be disconnected.
        if self.done_tx.send((self.batch, done)).is_err() {
            log::error!("export result dropped");
        }
    }

    /// Next finished job, if any. Results of discarded jobs are skipped.
    pub fn try_recv(&mut self) -> Option<ExportDone> {
        loop {
            match self.done_rx.try_recv() {
                Ok((batch, done)) if batch == self.batch => {
                    self.pending = self.pending.saturating_sub(1);
                    return Some(done);
                }
                Ok((_, done)) => {
                    log::debug!("dropping discarded {} export", done.job.kind.slug());
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Forgets every submitted job. Jobs still rendering finish, but their
    /// results are never returned by [`Self::try_recv`].
    pub fn discard_pending(&mut self) {
        if self.pending > 0 {
            log::debug!("discarding {} pending exports", self.pending);
        }
        self.batch += 1;
        self.pending = 0;
        while self.done_rx.try_recv().is_ok() {}
    }

    /// Number of submitted jobs not yet received.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn is_busy(&self) -> bool {
        self.pending > 0
    }
}
