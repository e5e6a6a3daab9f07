//! Form rendering module
//!
//! - `field_renderer`: draws a single field with its inline error
//! - `contact_form`: lays out the contact form and its submit button

mod contact_form;
mod field_renderer;

pub use contact_form::draw_contact_form;
