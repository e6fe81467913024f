pub mod busy;
pub mod invoker;
pub mod operation;
pub mod region;
pub mod render;
pub mod request;
pub mod response;
pub mod transport;

pub use busy::{BusyIndicator, BusyToken};
pub use invoker::{ActionInvoker, FALLBACK_ERROR_MESSAGE, InvokeError};
pub use operation::{FieldKind, FieldSpec, OperationSpec, RenderPolicy};
pub use region::{DisplayRegion, RegionId};
pub use render::{HtmlRenderer, PlainRenderer, Renderer, Role};
pub use request::{ActionRequest, InputSource, ValidationError};
pub use response::ActionResponse;
pub use transport::{Transport, TransportError};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
