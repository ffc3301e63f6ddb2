use std::path::PathBuf;

use crate::texture::CardImage;

/// Request for the acquire task: decode `source` for the card at `slot`.
///
/// `epoch` snapshots the store generation at request time so completions
/// that outlive a reconcile can be recognized as stale and dropped.
#[derive(Debug, Clone)]
pub struct AcquireTexture {
    pub slot: usize,
    pub epoch: u64,
    pub source: PathBuf,
}

/// Completion delivered back to the frame loop.
#[derive(Debug)]
pub enum TextureEvent {
    Ready {
        slot: usize,
        epoch: u64,
        source: PathBuf,
        image: CardImage,
    },
    Failed {
        slot: usize,
        epoch: u64,
        source: PathBuf,
    },
}

impl TextureEvent {
    pub fn slot(&self) -> usize {
        match self {
            Self::Ready { slot, .. } | Self::Failed { slot, .. } => *slot,
        }
    }

    pub fn epoch(&self) -> u64 {
        match self {
            Self::Ready { epoch, .. } | Self::Failed { epoch, .. } => *epoch,
        }
    }

    pub fn source(&self) -> &PathBuf {
        match self {
            Self::Ready { source, .. } | Self::Failed { source, .. } => source,
        }
    }
}
