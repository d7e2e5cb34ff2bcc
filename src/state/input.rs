#[derive(Debug, Default)]
pub struct InputText {
    buffer: String,
}

impl InputText {
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    #[cfg(test)]
    pub(crate) fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Returns the text and leaves the input empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}
