//! Text rendering for canonical actions.
//!
//! Turns the typed parameters of a [`txlens_types::CanonicalAction`] into
//! display strings: addresses are aliased or truncated, coins are scaled and
//! given their denomination symbol, labels go through a [`Translator`].
//! Formatting problems never abort rendering; the affected value is shown
//! raw instead.

pub mod denom;
pub mod format;
pub mod renderer;
pub mod translate;
pub mod types;

pub use denom::{DenomInfo, DenomRegistry};
pub use format::{FormatError, Formatters};
pub use renderer::{render, render_group};
pub use translate::{CatalogTranslator, Translator};
pub use types::{DenomConfig, RenderConfig};
