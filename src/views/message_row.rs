use egui::{Frame, RichText};
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

use crate::Message;

const SENT_AT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// What a single message card shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageRow {
    pub header: String,
    pub body: String,
}

impl From<&Message> for MessageRow {
    fn from(msg: &Message) -> Self {
        Self {
            header: Self::format_sent_at(msg.timestamp()),
            body: msg.text().to_string(),
        }
    }
}

impl MessageRow {
    pub fn display(&self, ui: &mut egui::Ui) {
        Frame::group(ui.style())
            .fill(ui.visuals().faint_bg_color)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(self.header.as_str()).small().weak());
                ui.label(self.body.as_str());
            });
    }

    // UTC; falls back to the raw value when out of range
    fn format_sent_at(timestamp: i64) -> String {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(timestamp) * 1_000_000)
            .ok()
            .and_then(|at| at.format(SENT_AT).ok())
            .unwrap_or_else(|| timestamp.to_string())
    }
}
