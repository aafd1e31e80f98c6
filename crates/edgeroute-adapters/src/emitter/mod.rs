//! Platform emitters.
//!
//! One type per platform. Callers pick one with [`emitter_for`] and never
//! branch on the platform again.

mod netlify;
mod vercel;

pub use netlify::NetlifyEmitter;
pub use vercel::VercelEmitter;

use edgeroute_core::{application::ports::ConfigEmitter, domain::Platform};

/// Build the emitter for a platform.
pub fn emitter_for(platform: Platform) -> Box<dyn ConfigEmitter> {
    match platform {
        Platform::Vercel => Box::new(VercelEmitter::new()),
        Platform::Netlify => Box::new(NetlifyEmitter::new()),
    }
}

/// Every supported emitter, in [`Platform::ALL`] order.
pub fn all_emitters() -> Vec<Box<dyn ConfigEmitter>> {
    Platform::ALL.into_iter().map(emitter_for).collect()
}
