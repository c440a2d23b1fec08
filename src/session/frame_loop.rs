use std::sync::mpsc::{RecvTimeoutError, TryRecvError};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::animation::clock::AnimationClock;
use crate::animation::pose::solve;
use crate::emotion::state::{EmotionSnapshot, EmotionState};
use crate::foundation::error::{MascotError, MascotResult};
use crate::render::compositor::Compositor;
use crate::render::surface::Surface;
use crate::scene::rig::CharacterRig;

/// Target frame rate of the render loop.
pub const TARGET_FPS: u32 = 60;
/// Fixed per-frame budget derived from [`TARGET_FPS`].
pub const FRAME_BUDGET: Duration = Duration::from_micros(1_000_000 / TARGET_FPS as u64);

/// Delta-time clamp: one frame never advances animation by more than this,
/// so a stall (e.g. the host backgrounding the process) does not jump the
/// character.
pub const MAX_DELTA_SECS: f32 = 0.1;

/// Bound on how long `stop` waits for the loop to exit.
const STOP_TIMEOUT: Duration = Duration::from_secs(1);
const STOP_POLL: Duration = Duration::from_millis(5);

/// Everything one tick needs: the animation clock, the resolved rig, and the
/// compositor. Owned behind a mutex shared with the render thread so clock
/// state survives stop/start cycles.
pub struct ScenePipeline {
    clock: AnimationClock,
    rig: CharacterRig,
    compositor: Compositor,
}

impl ScenePipeline {
    pub fn new(rig: CharacterRig) -> Self {
        Self {
            clock: AnimationClock::new(),
            rig,
            compositor: Compositor::new(),
        }
    }

    /// Replace the default compositor (e.g. to change the background color).
    pub fn with_compositor(mut self, compositor: Compositor) -> Self {
        self.compositor = compositor;
        self
    }

    /// Run one frame: acquire the surface, advance the clock, solve the pose,
    /// composite, present. The clock only advances when the surface yields a
    /// drawable target, so dropped frames do not consume animation time.
    pub fn tick(
        &mut self,
        dt: f32,
        emotion: EmotionSnapshot,
        surface: &mut dyn Surface,
    ) -> MascotResult<()> {
        let canvas = surface.begin_frame()?;
        self.clock.advance(dt);
        let pose = solve(self.clock.elapsed(), self.clock.blinking(), emotion, canvas);
        let frame = self.compositor.render(&self.rig, &pose, canvas)?;
        surface.present(&frame)
    }
}

struct Worker {
    stop_tx: mpsc::Sender<()>,
    handle: thread::JoinHandle<()>,
}

/// Paced frame producer on a dedicated thread.
///
/// `start` spawns the loop, `stop` cooperatively cancels it: a shared channel
/// doubles as the stop signal and the interruptible between-frame sleep, and
/// `stop` blocks until the loop exits or a ~1 s bound elapses (best-effort,
/// so a stuck render cannot hang shutdown).
pub struct FrameScheduler {
    pipeline: Arc<Mutex<ScenePipeline>>,
    surface: Arc<Mutex<dyn Surface>>,
    emotion: Arc<EmotionState>,
    worker: Option<Worker>,
}

impl FrameScheduler {
    pub fn new(
        pipeline: ScenePipeline,
        surface: Arc<Mutex<dyn Surface>>,
        emotion: Arc<EmotionState>,
    ) -> Self {
        Self {
            pipeline: Arc::new(Mutex::new(pipeline)),
            surface,
            emotion,
            worker: None,
        }
    }

    /// True while the render thread is alive.
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|w| !w.handle.is_finished())
    }

    /// Spawn the render loop. A no-op while the loop is already running, so
    /// two loops can never race one surface.
    pub fn start(&mut self) -> MascotResult<()> {
        if self.is_running() {
            debug!("render loop already running");
            return Ok(());
        }
        self.worker = None;

        let (stop_tx, stop_rx) = mpsc::channel();
        let pipeline = Arc::clone(&self.pipeline);
        let surface = Arc::clone(&self.surface);
        let emotion = Arc::clone(&self.emotion);

        let handle = thread::Builder::new()
            .name("mascot-render".into())
            .spawn(move || run_loop(&pipeline, &surface, &emotion, &stop_rx))
            .map_err(|e| MascotError::render(format!("failed to spawn render thread: {e}")))?;

        self.worker = Some(Worker { stop_tx, handle });
        Ok(())
    }

    /// Signal the loop to exit and wait for it, bounded by ~1 s.
    ///
    /// Idempotent: a second call returns immediately. Safe to call from the
    /// surface owner at any time, including mid-sleep (the sleep is the stop
    /// channel's receive). The timeout is best-effort, not a correctness
    /// guarantee; on timeout the thread is detached and teardown proceeds.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        let _ = worker.stop_tx.send(());

        let deadline = Instant::now() + STOP_TIMEOUT;
        while !worker.handle.is_finished() {
            if Instant::now() >= deadline {
                warn!("render loop did not stop within {STOP_TIMEOUT:?}; detaching");
                return;
            }
            thread::sleep(STOP_POLL);
        }
        if worker.handle.join().is_err() {
            warn!("render loop thread panicked");
        }
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_loop(
    pipeline: &Mutex<ScenePipeline>,
    surface: &Mutex<dyn Surface>,
    emotion: &EmotionState,
    stop_rx: &mpsc::Receiver<()>,
) {
    debug!("render loop started");
    let mut last = Instant::now();

    loop {
        match stop_rx.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => break,
            Err(TryRecvError::Empty) => {}
        }

        let frame_start = Instant::now();
        let dt = (frame_start - last).as_secs_f32().min(MAX_DELTA_SECS);
        last = frame_start;

        // One critical section covers acquire -> render -> present, so
        // surface teardown cannot race an in-flight render.
        let tick = (|| -> MascotResult<()> {
            let mut surface = surface
                .lock()
                .map_err(|_| MascotError::render("surface lock poisoned"))?;
            let mut pipeline = pipeline
                .lock()
                .map_err(|_| MascotError::render("pipeline lock poisoned"))?;
            pipeline.tick(dt, emotion.snapshot(), &mut *surface)
        })();
        if let Err(e) = tick {
            warn!(error = %e, "frame dropped");
        }

        // Pace to the frame budget; the wait doubles as the stop signal's
        // delivery point, so a stop request interrupts the sleep.
        if let Some(rest) = FRAME_BUDGET.checked_sub(frame_start.elapsed()) {
            match stop_rx.recv_timeout(rest) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }
        }
    }
    debug!("render loop exited");
}
