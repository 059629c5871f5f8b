//! Rendering of the assignment email.
//!
//! Templates live in a shared `minijinja` environment. The HTML body is
//! registered under a `.html` name so substituted names are auto-escaped.

use std::sync::LazyLock;

use minijinja::{Environment, context};
use serde::Serialize;

use santa_common::types::Assignment;

use crate::DeliveryError;

pub const SUBJECT: &str = "🎅 Your Secret Santa Assignment!";

const ASSIGNMENT_HTML: &str = "assignment.html";
const ASSIGNMENT_TEXT: &str = "assignment.txt";

static TEMPLATES: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    for (name, source) in [
        (ASSIGNMENT_HTML, include_str!("templates/assignment.html")),
        (ASSIGNMENT_TEXT, include_str!("templates/assignment.txt")),
    ] {
        if let Err(e) = env.add_template(name, source) {
            tracing::error!(template = name, error = %e, "Failed to load email template");
        }
    }
    env
});

/// A rendered email ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl EmailMessage {
    /// Build the message telling `assignment.giver` who they are buying for.
    pub fn for_assignment(assignment: &Assignment) -> Result<Self, DeliveryError> {
        let ctx = context! {
            giver => assignment.giver.name.as_str(),
            receiver => assignment.receiver.name.as_str(),
        };

        Ok(Self {
            to: assignment.giver.email.clone(),
            subject: SUBJECT.to_string(),
            html: TEMPLATES.get_template(ASSIGNMENT_HTML)?.render(&ctx)?,
            text: TEMPLATES.get_template(ASSIGNMENT_TEXT)?.render(&ctx)?,
        })
    }
}
