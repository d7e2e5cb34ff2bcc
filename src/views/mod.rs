mod chat_view;
pub use chat_view::ChatView;

mod message_row;
pub use message_row::MessageRow;
