//! Backend API client.
//!
//! Workout content is fetched once before a session starts; nothing here is
//! called from inside the timer loop. Admin mutations need a bearer token.
//! Only the contact form is retried.

mod client;
mod contact;

pub use client::ApiClient;
pub use contact::RetryPolicy;
