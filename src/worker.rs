//! Background generation for native hosts.
//!
//! A generation runs on its own thread and reports through a one-slot
//! channel. The caller owns the handle; dropping or cancelling it abandons
//! the thread, whose result is then discarded.

use std::thread;

use async_channel::{Receiver, TryRecvError};
use log::debug;

use crate::config::BoardSize;
use crate::error::GenerationError;
use crate::generator;
use crate::serial::SerializedBoard;

type GenerationResult = Result<SerializedBoard, GenerationError>;

/// Caller-owned handle on one background generation.
pub struct GenerationHandle {
    size: BoardSize,
    receiver: Receiver<GenerationResult>,
}

/// Start generating a board of `size` on a new thread.
pub fn spawn_generation(size: BoardSize) -> GenerationHandle {
    spawn_with(size, move || generator::generate_board(size))
}

/// Like [`spawn_generation`], reproducible from `seed`.
pub fn spawn_generation_with_seed(size: BoardSize, seed: u64) -> GenerationHandle {
    spawn_with(size, move || generator::generate_board_with_seed(size, seed))
}

fn spawn_with<F>(size: BoardSize, generate: F) -> GenerationHandle
where
    F: FnOnce() -> GenerationResult + Send + 'static,
{
    let (sender, receiver) = async_channel::bounded::<GenerationResult>(1);
    thread::spawn(move || {
        let result = generate();
        if sender.send_blocking(result).is_err() {
            debug!("Generation of a {size} board finished after it was cancelled");
        }
    });
    GenerationHandle { size, receiver }
}

impl GenerationHandle {
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// The result if generation has finished, `None` while it is running.
    pub fn try_result(&self) -> Option<GenerationResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(GenerationError::Cancelled)),
        }
    }

    /// Block until the board is ready.
    pub fn wait(self) -> GenerationResult {
        self.receiver
            .recv_blocking()
            .unwrap_or(Err(GenerationError::Cancelled))
    }

    /// Await the board from async code.
    pub async fn recv(self) -> GenerationResult {
        self.receiver
            .recv()
            .await
            .unwrap_or(Err(GenerationError::Cancelled))
    }

    /// Abandon the generation. The thread runs on but its result is dropped.
    pub fn cancel(self) {
        debug!("Cancelling generation of a {} board", self.size);
        self.receiver.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_returns_board() {
        let board = spawn_generation_with_seed(BoardSize::Small, 3).wait().unwrap();
        assert_eq!(board.len(), 5);
        assert!(board.iter().all(|row| row.len() == 5));
    }

    #[test]
    fn test_matches_synchronous_generation() {
        let background = spawn_generation_with_seed(BoardSize::Standard, 21).wait().unwrap();
        let direct = generator::generate_board_with_seed(BoardSize::Standard, 21).unwrap();
        assert_eq!(background, direct);
    }

    #[test]
    fn test_try_result_eventually_ready() {
        let handle = spawn_generation(BoardSize::Small);
        assert_eq!(handle.size(), BoardSize::Small);
        let result = loop {
            if let Some(result) = handle.try_result() {
                break result;
            }
            thread::yield_now();
        };
        assert!(result.is_ok());
    }

    #[test]
    fn test_closed_channel_reports_cancelled() {
        let (sender, receiver) = async_channel::bounded::<GenerationResult>(1);
        drop(sender);
        let handle = GenerationHandle {
            size: BoardSize::Small,
            receiver,
        };
        assert!(matches!(handle.try_result(), Some(Err(GenerationError::Cancelled))));
        assert!(matches!(handle.wait(), Err(GenerationError::Cancelled)));
    }

    #[test]
    fn test_cancel_does_not_block() {
        spawn_generation(BoardSize::Standard).cancel();
    }
}
