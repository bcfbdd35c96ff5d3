use std::sync::atomic::{AtomicBool, Ordering};

use sugar_activity::WindowHost;
use tracing::info;

/// Window stand-in for activities served without a toolkit: realized from the
/// start with the handle given on the command line.
pub struct HeadlessWindow {
    xid: u32,
    presented: AtomicBool,
}

impl HeadlessWindow {
    pub fn new(xid: u32) -> Self {
        Self {
            xid,
            presented: AtomicBool::new(false),
        }
    }
}

impl WindowHost for HeadlessWindow {
    fn xid(&self) -> Option<u32> {
        Some(self.xid)
    }

    fn present(&self) {
        if !self.presented.swap(true, Ordering::SeqCst) {
            info!("Window {} presented", self.xid);
        }
    }
}
