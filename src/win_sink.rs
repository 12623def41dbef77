use std::io::Write;

use tracing::info;

use crate::error::SinkError;
use crate::session::WinClaim;

/// Receives solved levels. Building and signing the reward transaction is
/// the sink's business; the engine only hands over the claim.
pub trait WinSink {
    fn submit(&mut self, claim: &WinClaim) -> Result<(), SinkError>;
}

/// Writes each claim as one line of JSON.
pub struct ClaimWriter<W: Write> {
    out: W,
    submitted: usize,
}

impl<W: Write> ClaimWriter<W> {
    pub fn new(out: W) -> Self {
        ClaimWriter { out, submitted: 0 }
    }

    pub fn submitted(&self) -> usize {
        self.submitted
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> WinSink for ClaimWriter<W> {
    fn submit(&mut self, claim: &WinClaim) -> Result<(), SinkError> {
        if claim.actions.is_empty() {
            return Err(SinkError::EmptyClaim(claim.level_index));
        }
        serde_json::to_writer(&mut self.out, claim)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.submitted += 1;
        info!(level = claim.level_index, actions = claim.actions.len(), "claim submitted");
        Ok(())
    }
}
