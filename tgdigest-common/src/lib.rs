pub mod conversation;
pub mod message;
pub mod prompt;
pub mod report;

#[cfg(test)]
mod tests;

pub use conversation::{FocusSet, Organized, Participant, Role, organize};
pub use message::{Conversation, Message, Sender};
pub use prompt::{PromptKind, PromptSet, PromptTemplate, PromptVars};
pub use report::{ParticipantSummary, Report, ReportFormat, ReportSink, SummaryResult};
