use crate::driver::game_driver::GameDriver;
use crate::game::{
    ControllerSettings, GameSnapshot, KeyEvent, ReactionGameController, SelectionIndex,
};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Initialization error: {0}")]
    InitializationError(String),
}

// Public handle for the running game
pub struct GameHandle {
    key_sender: mpsc::Sender<KeyEvent>,
    snapshot_receiver: watch::Receiver<GameSnapshot>,
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl GameHandle {
    /// Spawns the driver task on the current tokio runtime
    pub fn spawn(
        settings: ControllerSettings,
        initial: SelectionIndex,
    ) -> Result<Self, DriverError> {
        info!("Initializing game driver with settings: {:?}", settings);

        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            DriverError::InitializationError(format!("No tokio runtime available: {}", e))
        })?;

        let tick_interval = settings.display_poll.max(Duration::from_millis(1));
        let controller = ReactionGameController::new(settings, initial);

        let (key_sender, key_receiver) = mpsc::channel(256);
        debug!("Created key channel with buffer capacity 256");

        let driver = GameDriver::create(controller, key_receiver, tick_interval);
        let snapshot_receiver = driver.subscribe();
        let shutdown = CancellationToken::new();

        let token = shutdown.clone();
        let task = runtime.spawn(async move {
            info!("Game driver task started");
            let stopped = driver.start().run_until_cancelled(token).await;
            info!("Game driver finished: {:?}", stopped.stats());
        });

        info!("Game driver successfully started");
        Ok(Self {
            key_sender,
            snapshot_receiver,
            shutdown,
            task,
        })
    }

    /// Sender for the UI; use `try_send` so the frame never blocks
    pub fn key_sender(&self) -> mpsc::Sender<KeyEvent> {
        self.key_sender.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshot_receiver.clone()
    }

    /// Cancels the driver and waits for the task to exit
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Err(e) = self.task.await {
            error!("Game driver task failed: {}", e);
        }
    }
}
