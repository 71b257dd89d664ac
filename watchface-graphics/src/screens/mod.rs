pub use watch_face::{WatchFace, WatchFaceResources};

pub mod watch_face;
