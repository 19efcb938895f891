mod chat_ref;
mod history;
