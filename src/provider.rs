use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::predict::{self, PredictConfig};
use crate::state::{Delta, ProviderCommand};

/// Spawns the prediction worker. One command is handled at a time; the UI
/// keeps `loading` set until the matching delta arrives, so at most one
/// provider call is ever in flight.
pub fn spawn_prediction_provider(
    cfg: PredictConfig,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::Predict { request } => {
                    let _ = tx.send(Delta::Log(format!(
                        "[INFO] Requesting prediction: {} vs {}",
                        request.home.name, request.away.name
                    )));
                    let result = predict::request_prediction(&cfg, &request);
                    if tx.send(Delta::Prediction(result)).is_err() {
                        break;
                    }
                }
            }
        }
    });
}
