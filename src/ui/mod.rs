pub mod chat_view;
