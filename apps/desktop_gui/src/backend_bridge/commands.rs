//! Commands the UI queues for the backend worker.

use shared::protocol::PeriodPayload;

pub enum BackendCommand {
    Evaluate { periodos: Vec<PeriodPayload> },
}
