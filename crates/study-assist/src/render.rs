use crate::operation::OperationSpec;

/// Who a chat bubble belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    Error,
}

/// Turns outcomes into the markup a particular view displays.
pub trait Renderer: Send + Sync {
    /// The view's representation of a line break.
    fn line_break(&self) -> &str;

    fn success_panel(&self, spec: &OperationSpec, title: &str, content: &str) -> String;

    fn failure_panel(&self, message: &str) -> String;

    fn bubble(&self, role: Role, text: &str) -> String;

    /// Replace every `\n` in `text` with [`Renderer::line_break`].
    fn format_content(&self, text: &str) -> String {
        text.replace('\n', self.line_break())
    }
}

/// HTML fragments for a browser page.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn line_break(&self) -> &str {
        "<br>"
    }

    fn success_panel(&self, spec: &OperationSpec, title: &str, content: &str) -> String {
        format!(
            "<div class=\"result-card\">\
             <h3><i class=\"fas {icon}\"></i> {title}</h3>\
             <div class=\"{class}\">{content}</div>\
             </div>",
            icon = spec.icon,
            class = spec.content_class,
        )
    }

    fn failure_panel(&self, message: &str) -> String {
        format!(
            "<div class=\"error-message\">\
             <i class=\"fas fa-exclamation-circle\"></i>\
             <p>{message}</p>\
             </div>"
        )
    }

    fn bubble(&self, role: Role, text: &str) -> String {
        let (class, icon, prefix) = match role {
            Role::User => ("user-message", "fa-user", ""),
            Role::Assistant => ("ai-message", "fa-robot", ""),
            Role::Error => ("error-message", "fa-exclamation-circle", "Error: "),
        };
        format!(
            "<div class=\"message {class}\">\
             <i class=\"fas {icon}\"></i>\
             <p>{prefix}{text}</p>\
             </div>"
        )
    }
}

/// Plain text for terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn line_break(&self) -> &str {
        "\n"
    }

    fn success_panel(&self, _spec: &OperationSpec, title: &str, content: &str) -> String {
        let rule = "=".repeat(title.chars().count());
        format!("{title}\n{rule}\n{content}\n")
    }

    fn failure_panel(&self, message: &str) -> String {
        format!("Error: {message}\n")
    }

    fn bubble(&self, role: Role, text: &str) -> String {
        let label = match role {
            Role::User => "You",
            Role::Assistant => "Assistant",
            Role::Error => "Error",
        };
        format!("{label}: {text}\n")
    }
}
