/// Marker at the end of the gallery. While armed, coming within `margin` of
/// it requests the next page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentinel {
    armed: bool,
    margin: u32,
}

impl Sentinel {
    pub fn new(margin: u32) -> Self {
        Self {
            armed: false,
            margin,
        }
    }

    pub fn arm(&mut self) {
        if !self.armed {
            log::debug!("sentinel armed");
        }
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        if self.armed {
            log::debug!("sentinel disarmed");
        }
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// `remaining` is the distance between the end of the viewport and the
    /// sentinel, in whatever unit `margin` uses.
    pub fn intersects(&self, remaining: u32) -> bool {
        self.armed && remaining <= self.margin
    }
}
