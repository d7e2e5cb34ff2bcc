/// Wakes the UI after a background task has delivered an event.
pub trait Repaint: Send + Sync + 'static {
    fn repaint(&self);
}

impl Repaint for egui::Context {
    fn repaint(&self) {
        self.request_repaint();
    }
}

// headless
impl Repaint for () {
    fn repaint(&self) {}
}

#[cfg(test)]
pub(crate) use counter::RepaintCounter;
