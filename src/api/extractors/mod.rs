//! Custom request extractors.

mod form;
mod session;

pub use form::SubmittedForm;
pub use session::CurrentSession;
