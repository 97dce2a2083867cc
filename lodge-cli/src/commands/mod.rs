//! CLI command implementations.
//!
//! - `init`: Create the data directory and database
//! - `register_property`: Record a property's owner and base price
//! - `publish`: Publish availability for a day or a range
//! - `availability`: Show published days
//! - `reserve`: Book a range of days
//! - `status`: Confirm, cancel or otherwise change a booking's status
//! - `delete`: Permanently remove a booking
//! - `show`: Display one booking
//! - `list`: List bookings
//! - `completions`: Generate shell completion scripts

pub mod availability;
pub mod completions;
pub mod delete;
pub mod init;
pub mod list;
pub mod publish;
pub mod register_property;
pub mod reserve;
pub mod show;
pub mod status;

pub use availability::AvailabilityCommand;
pub use completions::CompletionsCommand;
pub use delete::DeleteCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use publish::{PublishDayCommand, PublishRangeCommand};
pub use register_property::RegisterPropertyCommand;
pub use reserve::ReserveCommand;
pub use show::ShowCommand;
pub use status::{CancelCommand, ConfirmCommand, SetStatusCommand};
