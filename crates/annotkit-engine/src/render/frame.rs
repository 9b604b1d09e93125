/// Coalesces redraw requests so at most one redraw runs per animation frame.
///
/// Pointer-move handlers call [`FrameGate::request`] as often as they like;
/// the host's frame callback calls [`FrameGate::take`] once per tick and only
/// redraws when it returns true.
#[derive(Debug, Clone, Default)]
pub struct FrameGate {
    pending: bool,
    requested: u64,
    delivered: u64,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the canvas stale. Returns true if this is the first request since
    /// the last frame (i.e. the host should schedule a frame callback).
    pub fn request(&mut self) -> bool {
        self.requested += 1;
        !std::mem::replace(&mut self.pending, true)
    }

    /// Consumes the pending request for this frame.
    pub fn take(&mut self) -> bool {
        if std::mem::take(&mut self.pending) {
            self.delivered += 1;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of redraws actually delivered.
    pub fn frames(&self) -> u64 {
        self.delivered
    }

    /// Number of redraw requests received, including coalesced ones.
    pub fn requests(&self) -> u64 {
        self.requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_coalesce_into_one_frame() {
        let mut gate = FrameGate::new();
        assert!(gate.request());
        assert!(!gate.request());
        assert!(!gate.request());
        assert!(gate.take());
        assert!(!gate.take());
        assert_eq!(gate.frames(), 1);
        assert_eq!(gate.requests(), 3);
    }
}
