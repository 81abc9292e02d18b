//! Integration test common infrastructure.
//!
//! A scripted IRC peer on a loopback socket and a publisher that records
//! what it was handed.

pub mod peer;
pub mod recorder;

#[allow(unused_imports)]
pub use peer::TestPeer;
#[allow(unused_imports)]
pub use recorder::{Published, Recorder};
