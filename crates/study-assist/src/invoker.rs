use crate::busy::BusyIndicator;
use crate::operation::{OperationSpec, RenderPolicy};
use crate::region::DisplayRegion;
use crate::render::{HtmlRenderer, Renderer, Role};
use crate::request::{ActionRequest, InputSource, ValidationError};
use crate::response::ActionResponse;
use crate::transport::{Transport, TransportError};

/// Shown when a failure arrives without any message.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

/// Why an invocation did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvokeError {
    /// A required input was empty; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered with `success: false`.
    #[error("{0}")]
    Server(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl InvokeError {
    /// Text for the failure panel.
    pub fn display_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_owned()
        } else {
            message
        }
    }
}

/// Runs the request lifecycle shared by every operation:
/// validate, mark busy, send, interpret, render, release.
pub struct ActionInvoker<T, R = HtmlRenderer> {
    transport: T,
    renderer: R,
    busy: BusyIndicator,
    session_id: Option<String>,
}

impl<T: Transport> ActionInvoker<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            renderer: HtmlRenderer,
            busy: BusyIndicator::new(),
            session_id: None,
        }
    }
}

impl<T: Transport, R: Renderer> ActionInvoker<T, R> {
    pub fn with_renderer<R2: Renderer>(self, renderer: R2) -> ActionInvoker<T, R2> {
        ActionInvoker {
            transport: self.transport,
            renderer,
            busy: self.busy,
            session_id: self.session_id,
        }
    }

    /// Share an existing indicator instead of the invoker's own.
    pub fn with_busy_indicator(mut self, busy: BusyIndicator) -> Self {
        self.busy = busy;
        self
    }

    /// Session id sent with session-scoped operations.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn busy(&self) -> &BusyIndicator {
        &self.busy
    }

    /// Build the request body for `spec` from the current inputs.
    pub fn prepare(
        &self,
        spec: &OperationSpec,
        inputs: &dyn InputSource,
    ) -> Result<ActionRequest, ValidationError> {
        let request = ActionRequest::build(spec, inputs)?;

        Ok(match (&self.session_id, spec.session_scoped) {
            (Some(session_id), true) => request.with_field("session_id", session_id.as_str()),
            _ => request,
        })
    }

    /// Validate the inputs and, if they pass, run the request.
    ///
    /// The outcome is always rendered into `region`; the return value
    /// reports the raw result text or the reason there is none.
    pub async fn invoke(
        &self,
        spec: &OperationSpec,
        inputs: &dyn InputSource,
        region: &dyn DisplayRegion,
    ) -> Result<String, InvokeError> {
        let request = match self.prepare(spec, inputs) {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(operation = spec.name, field = err.field, "missing required input");
                let err = InvokeError::from(err);
                self.render_failure(spec, region, &err);
                return Err(err);
            }
        };

        self.dispatch(spec, &request, region).await
    }

    /// Send an already validated request and render its outcome.
    pub async fn dispatch(
        &self,
        spec: &OperationSpec,
        request: &ActionRequest,
        region: &dyn DisplayRegion,
    ) -> Result<String, InvokeError> {
        let _busy = self.busy.acquire();

        if spec.policy == RenderPolicy::Append
            && let Some(text) = request.echo(spec)
        {
            region.append(self.renderer.bubble(Role::User, text));
        }

        tracing::debug!(operation = spec.name, path = spec.path, "sending request");
        let result = self.exchange(spec, request).await;

        match &result {
            Ok(text) => {
                tracing::info!(operation = spec.name, bytes = text.len(), "request succeeded");
                self.render_success(spec, request, region, text);
            }
            Err(err) => {
                tracing::warn!(operation = spec.name, error = %err, "request failed");
                self.render_failure(spec, region, err);
            }
        }

        result
    }

    async fn exchange(
        &self,
        spec: &OperationSpec,
        request: &ActionRequest,
    ) -> Result<String, InvokeError> {
        let body = self.transport.post(spec.path, &request.to_json()).await?;

        match ActionResponse::from_value(body)? {
            ActionResponse::Success { mut payload } => {
                payload.remove(spec.result_key).ok_or_else(|| {
                    TransportError::Decode(format!("response has no `{}` field", spec.result_key))
                        .into()
                })
            }
            ActionResponse::Failure { message } => Err(InvokeError::Server(message)),
        }
    }

    fn render_success(
        &self,
        spec: &OperationSpec,
        request: &ActionRequest,
        region: &dyn DisplayRegion,
        text: &str,
    ) {
        let content = self.renderer.format_content(text);
        let markup = match spec.policy {
            RenderPolicy::Append => self.renderer.bubble(Role::Assistant, &content),
            RenderPolicy::Replace => {
                self.renderer
                    .success_panel(spec, &spec.title_for(request), &content)
            }
        };
        region.apply(spec.policy, markup);
    }

    fn render_failure(&self, spec: &OperationSpec, region: &dyn DisplayRegion, err: &InvokeError) {
        let message = err.display_message();
        let markup = match spec.policy {
            RenderPolicy::Append => self.renderer.bubble(Role::Error, &message),
            RenderPolicy::Replace => self.renderer.failure_panel(&message),
        };
        region.apply(spec.policy, markup);
    }
}
