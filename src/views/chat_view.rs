use egui::{Align, Button, CentralPanel, Key, Layout, ScrollArea, TextEdit, TopBottomPanel};

use crate::{realtime::Store, state::ChatState};

use super::MessageRow;

pub struct ChatView<'a, S> {
    pub title: &'a str,
    pub chat: &'a mut ChatState<S>,
}

impl<'a, S: Store> ChatView<'a, S> {
    const HINT: &'static str = "Enter your message";

    pub fn display(self, ctx: &egui::Context) {
        Self::display_app_bar(ctx, self.title);
        Self::display_input_row(ctx, self.chat);
        Self::display_messages(ctx, self.chat);
    }

    fn display_app_bar(ctx: &egui::Context, title: &str) {
        TopBottomPanel::top("app_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading(title);
            ui.add_space(4.0);
        });
    }

    fn display_input_row(ctx: &egui::Context, chat: &mut ChatState<S>) {
        TopBottomPanel::bottom("input_row").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                // emoji entry has no handler, so it is never enabled
                ui.add_enabled(false, Button::new("☺"))
                    .on_disabled_hover_text("Emoji entry is not available");

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let send = ui.button("Send").clicked();

                    let resp = ui.add(
                        TextEdit::singleline(chat.input_mut().buffer_mut())
                            .hint_text(Self::HINT)
                            .desired_width(ui.available_width()),
                    );

                    let entered = resp.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                    if send || entered {
                        chat.submit();
                        resp.request_focus();
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn display_messages(ctx: &egui::Context, chat: &ChatState<S>) {
        CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false; 2])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for msg in chat.messages().iter() {
                        MessageRow::from(msg).display(ui);
                    }
                });
        });
    }
}
