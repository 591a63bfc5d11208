//! Console formatting for chat messages and status reports

use chat_application::{HealthReport, SessionListing, SessionStatus};
use chat_domain::{Message, SessionId, Sender};
use colored::Colorize;

/// Formats messages and reports for terminal display
#[derive(Debug, Clone)]
pub struct ConsoleFormatter {
    bot_name: String,
    color: bool,
    show_timestamps: bool,
}

impl ConsoleFormatter {
    pub fn new(bot_name: impl Into<String>) -> Self {
        Self {
            bot_name: bot_name.into(),
            color: true,
            show_timestamps: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    /// Format one transcript message as `[HH:MM] Name: text`.
    ///
    /// Continuation lines are indented under the first.
    pub fn format_message(&self, message: &Message) -> String {
        let label = match message.sender() {
            Sender::User => "You",
            Sender::Bot => self.bot_name.as_str(),
        };
        let label = if !self.color {
            format!("{}:", label)
        } else {
            match message.sender() {
                Sender::User => format!("{}:", label).green().bold().to_string(),
                Sender::Bot => format!("{}:", label).cyan().bold().to_string(),
            }
        };

        let mut lines = message.text().lines();
        let first = lines.next().unwrap_or_default();
        let mut output = String::new();

        if self.show_timestamps {
            let time = format!("[{}]", message.display_time());
            if self.color {
                output.push_str(&time.dimmed().to_string());
            } else {
                output.push_str(&time);
            }
            output.push(' ');
        }
        output.push_str(&label);
        output.push(' ');
        output.push_str(first);

        for line in lines {
            output.push('\n');
            output.push_str("    ");
            output.push_str(line);
        }

        output
    }

    /// Format a server-side session status report
    pub fn format_status(&self, status: &SessionStatus) -> String {
        let none = "None";
        let completed = if status.completed_workflows.is_empty() {
            none.to_string()
        } else {
            status.completed_workflows.join(", ")
        };

        let mut output = self.heading("Session Status");
        output.push_str(&format!("  Session:         {}\n", status.session_id));
        output.push_str(&format!(
            "  Active:          {}\n",
            if status.is_active { "yes" } else { "no" }
        ));
        output.push_str(&format!(
            "  Active workflow: {}\n",
            status.active_workflow.as_deref().unwrap_or(none)
        ));
        output.push_str(&format!(
            "  KYC step:        {}\n",
            status.kyc_step.as_deref().unwrap_or(none)
        ));
        output.push_str(&format!("  Completed:       {}\n", completed));
        if let Some(created) = &status.created_at {
            output.push_str(&format!("  Created:         {}\n", created));
        }
        if let Some(last) = &status.last_activity {
            output.push_str(&format!("  Last activity:   {}\n", last));
        }
        output
    }

    /// Format a backend health report
    pub fn format_health(&self, report: &HealthReport) -> String {
        let mut output = self.heading("Backend Health");
        output.push_str(&format!("  Status:          {}\n", report.status));
        output.push_str(&format!("  Service:         {}\n", report.service));
        output.push_str(&format!("  Active sessions: {}\n", report.active_sessions));
        if let Some(webhooks) = report.registered_webhooks {
            output.push_str(&format!("  Webhooks:        {}\n", webhooks));
        }
        output
    }

    /// Format the backend's session list, marking the client's own session
    pub fn format_sessions(
        &self,
        listing: &SessionListing,
        current: Option<&SessionId>,
    ) -> String {
        let mut output =
            self.heading(&format!("Active Sessions ({})", listing.active_sessions));
        if listing.sessions.is_empty() {
            output.push_str("  (none)\n");
            return output;
        }
        for session in &listing.sessions {
            let marker = if current.is_some_and(|id| id.as_str() == session.session_id) {
                "*"
            } else {
                " "
            };
            output.push_str(&format!(
                "{} {}  workflow: {}  step: {}\n",
                marker,
                session.session_id,
                session.active_workflow.as_deref().unwrap_or("None"),
                session.kyc_step.as_deref().unwrap_or("None"),
            ));
        }
        output
    }

    /// Format the numbered FAQ list
    pub fn format_faqs(&self, faqs: &[String]) -> String {
        if faqs.is_empty() {
            return "No FAQ questions configured.\n".to_string();
        }
        let mut output = self.heading("Frequently Asked Questions");
        for (i, faq) in faqs.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, faq));
        }
        output.push_str("Send one with /faq <number>\n");
        output
    }

    fn heading(&self, title: &str) -> String {
        if self.color {
            format!("{}\n", title.cyan().bold())
        } else {
            format!("{}\n", title)
        }
    }
}
